//! Driving port for read-only feed views.

use async_trait::async_trait;

use crate::domain::{Error, IdeaId, IdeaWithOwner, SortBy, UserId, UserProfile};

/// Request to search the feed.
///
/// `query` is the raw client value; blank or absent queries are rejected by
/// the implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIdeasRequest {
    pub query: Option<String>,
    pub sort_by: SortBy,
}

/// Domain use-case port for browsing ideas and profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Every idea, owner expanded, in the requested order.
    async fn list_ideas(&self, sort_by: SortBy) -> Result<Vec<IdeaWithOwner>, Error>;

    /// Ideas whose text fields contain the query, in the requested order.
    async fn search_ideas(&self, request: SearchIdeasRequest)
    -> Result<Vec<IdeaWithOwner>, Error>;

    /// One idea with its owner expanded.
    async fn get_idea(&self, idea_id: &IdeaId) -> Result<IdeaWithOwner, Error>;

    /// Ideas authored by `owner`, in natural storage order.
    async fn user_ideas(&self, owner: &UserId) -> Result<Vec<IdeaWithOwner>, Error>;

    /// A user with every authored idea expanded.
    async fn user_profile(&self, user_id: &UserId) -> Result<UserProfile, Error>;
}

/// Fixture query over an empty feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeedQuery;

#[async_trait]
impl FeedQuery for FixtureFeedQuery {
    async fn list_ideas(&self, _sort_by: SortBy) -> Result<Vec<IdeaWithOwner>, Error> {
        Ok(Vec::new())
    }

    async fn search_ideas(
        &self,
        _request: SearchIdeasRequest,
    ) -> Result<Vec<IdeaWithOwner>, Error> {
        Ok(Vec::new())
    }

    async fn get_idea(&self, _idea_id: &IdeaId) -> Result<IdeaWithOwner, Error> {
        Err(Error::not_found("Startup Idea not found"))
    }

    async fn user_ideas(&self, _owner: &UserId) -> Result<Vec<IdeaWithOwner>, Error> {
        Ok(Vec::new())
    }

    async fn user_profile(&self, _user_id: &UserId) -> Result<UserProfile, Error> {
        Err(Error::not_found("User not found"))
    }
}
