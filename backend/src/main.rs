//! Backend entry-point: loads settings, wires adapters, and serves the API.

mod server;

use std::path::Path;

use actix_web::cookie::Key;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pitchfeed::inbound::http::health::HealthState;
use server::{AppSettings, ServerConfig, build_http_state, create_server};

const MIN_KEY_BYTES: usize = 32;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let key = load_session_key(&settings.session_key_file(), settings.session_allow_ephemeral)?;
    let bind_addr = settings.bind_addr()?;
    let http_state = build_http_state(&settings).await?;

    let config = ServerConfig::new(key, bind_addr, http_state)
        .with_cookie_secure(settings.cookie_secure)
        .with_max_upload_bytes(settings.max_upload_bytes());
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "pitchfeed listening");
    server.await
}

/// Read the session signing key, or generate one when allowed.
fn load_session_key(path: &Path, allow_ephemeral: bool) -> std::io::Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.len() >= MIN_KEY_BYTES => Ok(Key::derive_from(&bytes)),
        Ok(bytes) => Err(std::io::Error::other(format!(
            "session key at {} is {} bytes; at least {MIN_KEY_BYTES} required",
            path.display(),
            bytes.len()
        ))),
        Err(e) if cfg!(debug_assertions) || allow_ephemeral => {
            warn!(path = %path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(std::io::Error::other(format!(
            "failed to read session key at {}: {e}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    fn key_file_contents_derive_the_key() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(&[7u8; 64]).expect("write key");

        let first = load_session_key(file.path(), false).expect("key loads");
        let second = load_session_key(file.path(), false).expect("key loads");

        assert_eq!(first.master(), second.master());
    }

    #[rstest]
    fn short_key_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"too short").expect("write key");

        assert!(load_session_key(file.path(), true).is_err());
    }

    #[rstest]
    fn missing_key_file_falls_back_when_allowed() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent");

        assert!(load_session_key(&path, true).is_ok());
    }
}
