//! Driving port for idea creation and deletion.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{CoverImageUrl, Error, Idea, IdeaDetails, IdeaDraft, IdeaId, UserId};

use super::CoverImageUpload;

/// Request to pitch a new idea.
///
/// Text fields arrive unvalidated; `cover_image` is `None` when the client
/// sent no file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIdeaRequest {
    pub owner: UserId,
    pub name: String,
    pub description: String,
    pub pitch: String,
    pub category: String,
    pub cover_image: Option<CoverImageUpload>,
}

/// Request to delete an idea on behalf of `principal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteIdeaRequest {
    pub principal: UserId,
    pub idea_id: IdeaId,
}

/// Driving port for idea write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdeaCommand: Send + Sync {
    /// Validate, upload the cover image, then persist the idea and the owner
    /// back-reference together.
    async fn create_idea(&self, request: CreateIdeaRequest) -> Result<Idea, Error>;

    /// Delete an idea owned by the requesting principal.
    async fn delete_idea(&self, request: DeleteIdeaRequest) -> Result<(), Error>;
}

/// Fixture command that builds ideas without persisting them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdeaCommand;

#[async_trait]
impl IdeaCommand for FixtureIdeaCommand {
    async fn create_idea(&self, request: CreateIdeaRequest) -> Result<Idea, Error> {
        let details = IdeaDetails::new(
            request.name,
            request.description,
            request.pitch,
            request.category,
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        let upload = request
            .cover_image
            .ok_or_else(|| Error::invalid_request("Cover image is required"))?;
        let cover_image =
            CoverImageUrl::new(&format!("https://covers.example.com/{}", upload.filename))
                .map_err(|err| Error::internal(err.to_string()))?;
        Ok(Idea::new(IdeaDraft {
            id: IdeaId::random(),
            details,
            cover_image,
            owner: request.owner,
            created_at: Utc::now(),
        }))
    }

    async fn delete_idea(&self, _request: DeleteIdeaRequest) -> Result<(), Error> {
        Ok(())
    }
}
