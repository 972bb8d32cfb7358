//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FeedQuery, FixtureFeedQuery, FixtureIdeaCommand, FixtureLikeCommand, IdeaCommand, LikeCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub ideas: Arc<dyn IdeaCommand>,
    pub feed: Arc<dyn FeedQuery>,
    pub likes: Arc<dyn LikeCommand>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use pitchfeed::domain::ports::{FixtureFeedQuery, FixtureIdeaCommand, FixtureLikeCommand};
    /// use pitchfeed::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureIdeaCommand),
    ///     Arc::new(FixtureFeedQuery),
    ///     Arc::new(FixtureLikeCommand),
    /// );
    /// let _feed = state.feed.clone();
    /// ```
    pub fn new(
        ideas: Arc<dyn IdeaCommand>,
        feed: Arc<dyn FeedQuery>,
        likes: Arc<dyn LikeCommand>,
    ) -> Self {
        Self { ideas, feed, likes }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureIdeaCommand),
            Arc::new(FixtureFeedQuery),
            Arc::new(FixtureLikeCommand),
        )
    }
}
