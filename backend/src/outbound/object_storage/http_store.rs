//! Reqwest-backed `CoverImageStore`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::{Client, StatusCode, header};
use tracing::debug;

use super::{object_key, object_url};
use crate::domain::CoverImageUrl;
use crate::domain::ports::{CoverImageStore, CoverImageStoreError, CoverImageUpload};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Where and how to upload objects.
#[derive(Debug, Clone)]
pub struct ObjectStoreSettings {
    /// Base URL objects are `PUT` to.
    pub endpoint: String,
    pub bucket: String,
    /// Base URL objects are served from.
    pub public_base_url: String,
    /// Optional bearer token.
    pub token: Option<String>,
    /// Upper bound for one upload request.
    pub timeout: Duration,
}

/// Uploads cover images with a single `PUT` per object.
pub struct HttpObjectStore {
    client: Client,
    settings: ObjectStoreSettings,
    clock: Arc<dyn Clock>,
}

impl HttpObjectStore {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: ObjectStoreSettings, clock: Arc<dyn Clock>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            settings,
            clock,
        })
    }
}

#[async_trait]
impl CoverImageStore for HttpObjectStore {
    async fn upload(&self, upload: CoverImageUpload) -> Result<CoverImageUrl, CoverImageStoreError> {
        let key = object_key(self.clock.utc().timestamp_millis(), &upload.filename);
        let target = object_url(&self.settings.endpoint, &self.settings.bucket, &key);
        let content_type = upload
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned());
        let size = upload.bytes.len();

        let mut request = self
            .client
            .put(&target)
            .header(header::CONTENT_TYPE, content_type)
            .body(upload.bytes);
        if let Some(token) = &self.settings.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(map_status_error(status, body.as_ref()));
        }
        debug!(%key, size, "cover image uploaded");

        let public = object_url(&self.settings.public_base_url, &self.settings.bucket, &key);
        CoverImageUrl::new(&public).map_err(|err| CoverImageStoreError::invalid_url(err.to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> CoverImageStoreError {
    if error.is_timeout() {
        CoverImageStoreError::transport(format!("upload timed out: {error}"))
    } else {
        CoverImageStoreError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CoverImageStoreError {
    CoverImageStoreError::rejected(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
