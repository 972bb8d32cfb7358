//! Builders selecting adapters for the HTTP state from settings.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use pitchfeed::domain::ports::{CoverImageStore, IdeaRepository};
use pitchfeed::domain::{FeedService, IdeaCommandService};
use pitchfeed::inbound::http::state::HttpState;
use pitchfeed::outbound::memory::{InMemoryCoverImageStore, InMemoryIdeaRepository};
use pitchfeed::outbound::object_storage::{HttpObjectStore, ObjectStoreSettings};
use pitchfeed::outbound::persistence::{
    DbPool, DieselIdeaRepository, PoolConfig, run_pending_migrations,
};

use super::AppSettings;

/// Wire repositories, storage and services into handler state.
///
/// # Errors
/// Returns an error when migrations, the pool or the HTTP client cannot be
/// set up.
pub(crate) async fn build_http_state(settings: &AppSettings) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let repository = build_idea_repository(settings).await?;
    let covers = build_cover_store(settings, clock.clone())?;

    let ideas = Arc::new(IdeaCommandService::new(repository.clone(), covers, clock));
    let feed = Arc::new(FeedService::new(repository));
    Ok(HttpState::new(ideas, feed.clone(), feed))
}

async fn build_idea_repository(settings: &AppSettings) -> std::io::Result<Arc<dyn IdeaRepository>> {
    let Some(database_url) = settings.database_url.as_deref() else {
        warn!("no database configured; ideas are kept in memory only");
        return Ok(Arc::new(InMemoryIdeaRepository::new()));
    };

    let applied = run_pending_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(std::io::Error::other)?;
    Ok(Arc::new(DieselIdeaRepository::new(pool)))
}

fn build_cover_store(
    settings: &AppSettings,
    clock: Arc<dyn Clock>,
) -> std::io::Result<Arc<dyn CoverImageStore>> {
    let Some(endpoint) = settings.storage_endpoint.clone() else {
        warn!("no storage endpoint configured; cover images are kept in memory only");
        return Ok(Arc::new(InMemoryCoverImageStore::new(clock)));
    };

    let public_base_url = settings
        .storage_public_base_url
        .clone()
        .unwrap_or_else(|| endpoint.clone());
    let store = HttpObjectStore::new(
        ObjectStoreSettings {
            endpoint,
            bucket: settings.storage_bucket().to_owned(),
            public_base_url,
            token: settings.storage_token.clone(),
            timeout: settings.upload_timeout(),
        },
        clock,
    )
    .map_err(std::io::Error::other)?;
    Ok(Arc::new(store))
}
