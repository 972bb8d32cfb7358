//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cover_image_store;
mod feed_query;
mod idea_command;
mod idea_repository;
mod like_command;

#[cfg(test)]
pub use cover_image_store::MockCoverImageStore;
pub use cover_image_store::{
    CoverImageStore, CoverImageStoreError, CoverImageUpload, FixtureCoverImageStore,
};
#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::{FeedQuery, FixtureFeedQuery, SearchIdeasRequest};
#[cfg(test)]
pub use idea_command::MockIdeaCommand;
pub use idea_command::{CreateIdeaRequest, DeleteIdeaRequest, FixtureIdeaCommand, IdeaCommand};
#[cfg(test)]
pub use idea_repository::MockIdeaRepository;
pub use idea_repository::{FixtureIdeaRepository, IdeaRepository, IdeaRepositoryError};
#[cfg(test)]
pub use like_command::MockLikeCommand;
pub use like_command::{FixtureLikeCommand, LikeCommand};
