//! Feed query engine.
//!
//! Serves sorted and filtered views of the feed and owns the like toggle.
//! Sorting and search filtering run in the domain over the repository's
//! natural storage order.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::idea_service::map_repository_error;
use crate::domain::ports::{FeedQuery, IdeaRepository, LikeCommand, SearchIdeasRequest};
use crate::domain::{
    Error, IdeaId, IdeaWithOwner, LikeToggle, SearchQuery, SortBy, UserId, UserProfile, sort_ideas,
};

/// Service implementing the feed read ports and the like toggle.
#[derive(Clone)]
pub struct FeedService<R: ?Sized> {
    idea_repo: Arc<R>,
}

impl<R: ?Sized> FeedService<R> {
    pub fn new(idea_repo: Arc<R>) -> Self {
        Self { idea_repo }
    }
}

#[async_trait]
impl<R> FeedQuery for FeedService<R>
where
    R: IdeaRepository + ?Sized,
{
    async fn list_ideas(&self, sort_by: SortBy) -> Result<Vec<IdeaWithOwner>, Error> {
        let mut ideas = self
            .idea_repo
            .list_with_owners()
            .await
            .map_err(map_repository_error)?;
        sort_ideas(&mut ideas, sort_by);
        Ok(ideas)
    }

    async fn search_ideas(
        &self,
        request: SearchIdeasRequest,
    ) -> Result<Vec<IdeaWithOwner>, Error> {
        let query = SearchQuery::new(request.query.as_deref())
            .map_err(|_| Error::invalid_request("Search query is required"))?;

        let mut ideas: Vec<IdeaWithOwner> = self
            .idea_repo
            .list_with_owners()
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .filter(|entry| query.matches(entry.idea()))
            .collect();
        sort_ideas(&mut ideas, request.sort_by);
        Ok(ideas)
    }

    async fn get_idea(&self, idea_id: &IdeaId) -> Result<IdeaWithOwner, Error> {
        self.idea_repo
            .find_with_owner(idea_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Idea not found"))
    }

    async fn user_ideas(&self, owner: &UserId) -> Result<Vec<IdeaWithOwner>, Error> {
        self.idea_repo
            .list_by_owner(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn user_profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        let user = self
            .idea_repo
            .find_user(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;
        // The idea table is authoritative; stale back-references are skipped.
        let ideas = self
            .idea_repo
            .list_by_owner(user_id)
            .await
            .map_err(map_repository_error)?;
        Ok(UserProfile::new(&user, ideas))
    }
}

#[async_trait]
impl<R> LikeCommand for FeedService<R>
where
    R: IdeaRepository + ?Sized,
{
    async fn toggle_like(
        &self,
        principal: &UserId,
        idea_id: &IdeaId,
    ) -> Result<LikeToggle, Error> {
        let outcome = self
            .idea_repo
            .toggle_like(idea_id, principal)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Idea not found"))?;
        info!(
            idea_id = %idea_id,
            user_id = %principal,
            liked = outcome.liked,
            total_likes = outcome.total_likes,
            "idea like toggled"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "feed_service_tests.rs"]
mod tests;
