//! Idea aggregate service.
//!
//! Implements [`IdeaCommand`]: validation first, then the cover image upload,
//! then one atomic persistence step covering the idea and its owner's
//! back-reference. A successful upload followed by a failed persistence step
//! leaves the uploaded object in place.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    CoverImageStore, CoverImageStoreError, CreateIdeaRequest, DeleteIdeaRequest, IdeaCommand,
    IdeaRepository, IdeaRepositoryError,
};
use crate::domain::{Error, Idea, IdeaDetails, IdeaDraft, IdeaId, IdeaValidationError};

pub(crate) fn map_repository_error(error: IdeaRepositoryError) -> Error {
    match error {
        IdeaRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("idea repository unavailable: {message}"))
        }
        IdeaRepositoryError::Query { message } => {
            Error::internal(format!("idea repository error: {message}"))
        }
        IdeaRepositoryError::OwnerNotFound { user_id } => {
            Error::internal(format!("User not found: {user_id}"))
        }
    }
}

fn map_upload_error(error: CoverImageStoreError) -> Error {
    warn!(error = %error, "cover image upload failed");
    Error::internal("Error in cover image upload")
}

fn map_validation_error(error: IdeaValidationError) -> Error {
    match error {
        IdeaValidationError::MissingFields(fields) => {
            let fields: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
            Error::invalid_request("Please provide all fields")
                .with_details(json!({ "missing": fields, "code": "missing_field" }))
        }
        IdeaValidationError::InvalidCoverImage(message) => {
            Error::internal(format!("cover image URL rejected: {message}"))
        }
    }
}

/// Service owning idea creation and deletion.
#[derive(Clone)]
pub struct IdeaCommandService<R: ?Sized, S: ?Sized> {
    idea_repo: Arc<R>,
    cover_store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized, S: ?Sized> IdeaCommandService<R, S> {
    /// Create the service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use pitchfeed::domain::IdeaCommandService;
    /// use pitchfeed::domain::ports::{FixtureCoverImageStore, FixtureIdeaRepository};
    ///
    /// let _service = IdeaCommandService::new(
    ///     Arc::new(FixtureIdeaRepository),
    ///     Arc::new(FixtureCoverImageStore),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(idea_repo: Arc<R>, cover_store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            idea_repo,
            cover_store,
            clock,
        }
    }
}

#[async_trait]
impl<R, S> IdeaCommand for IdeaCommandService<R, S>
where
    R: IdeaRepository + ?Sized,
    S: CoverImageStore + ?Sized,
{
    async fn create_idea(&self, request: CreateIdeaRequest) -> Result<Idea, Error> {
        let CreateIdeaRequest {
            owner,
            name,
            description,
            pitch,
            category,
            cover_image,
        } = request;

        let details =
            IdeaDetails::new(name, description, pitch, category).map_err(map_validation_error)?;
        let upload = cover_image
            .filter(|upload| !upload.bytes.is_empty())
            .ok_or_else(|| Error::invalid_request("Cover image is required"))?;

        let cover_image = self
            .cover_store
            .upload(upload)
            .await
            .map_err(map_upload_error)?;

        let idea = Idea::new(IdeaDraft {
            id: IdeaId::random(),
            details,
            cover_image,
            owner,
            created_at: self.clock.utc(),
        });

        self.idea_repo
            .create_with_owner_link(&idea)
            .await
            .map_err(|err| {
                warn!(
                    error = %err,
                    cover_image = %idea.cover_image(),
                    "idea persistence failed after upload; cover image left in storage"
                );
                map_repository_error(err)
            })?;

        info!(idea_id = %idea.id(), owner = %owner, "idea created");
        Ok(idea)
    }

    async fn delete_idea(&self, request: DeleteIdeaRequest) -> Result<(), Error> {
        let DeleteIdeaRequest { principal, idea_id } = request;

        let existing = self
            .idea_repo
            .find_with_owner(&idea_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Startup Idea not found"))?;

        if !existing.idea().is_owned_by(&principal) {
            return Err(Error::forbidden("Unauthorized action"));
        }

        let deleted = self
            .idea_repo
            .delete_with_owner_unlink(&idea_id, &principal)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found("Startup Idea not found"));
        }

        info!(idea_id = %idea_id, owner = %principal, "idea deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "idea_service_tests.rs"]
mod tests;
