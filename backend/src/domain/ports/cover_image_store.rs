//! Port for durable cover image storage.

use async_trait::async_trait;

use crate::domain::CoverImageUrl;

use super::define_port_error;

define_port_error! {
    /// Errors raised by cover image storage adapters.
    pub enum CoverImageStoreError {
        /// The store could not be reached or timed out.
        Transport { message: String } =>
            "cover image store unreachable: {message}",
        /// The store answered but refused the object.
        Rejected { status: u16, message: String } =>
            "cover image store rejected upload ({status}): {message}",
        /// The store did not yield a usable public URL.
        InvalidUrl { message: String } =>
            "cover image store returned no usable URL: {message}",
    }
}

/// Raw cover image file as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImageUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: Option<String>,
}

/// Uploads cover images and returns a publicly resolvable URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoverImageStore: Send + Sync {
    async fn upload(&self, upload: CoverImageUpload) -> Result<CoverImageUrl, CoverImageStoreError>;
}

/// Fixture store that accepts every upload without persisting bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCoverImageStore;

#[async_trait]
impl CoverImageStore for FixtureCoverImageStore {
    async fn upload(&self, upload: CoverImageUpload) -> Result<CoverImageUrl, CoverImageStoreError> {
        let raw = format!("https://covers.example.com/{}", upload.filename);
        CoverImageUrl::new(&raw).map_err(|err| CoverImageStoreError::invalid_url(err.to_string()))
    }
}
