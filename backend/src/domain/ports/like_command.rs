//! Driving port for like toggles.

use async_trait::async_trait;

use crate::domain::{Error, IdeaId, LikeToggle, UserId};

/// Domain use-case port for liking and unliking ideas.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeCommand: Send + Sync {
    /// Flip `principal`'s like on `idea_id`.
    async fn toggle_like(&self, principal: &UserId, idea_id: &IdeaId)
    -> Result<LikeToggle, Error>;
}

/// Fixture command that always reports a fresh like.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLikeCommand;

#[async_trait]
impl LikeCommand for FixtureLikeCommand {
    async fn toggle_like(
        &self,
        _principal: &UserId,
        _idea_id: &IdeaId,
    ) -> Result<LikeToggle, Error> {
        Ok(LikeToggle {
            liked: true,
            total_likes: 1,
        })
    }
}
