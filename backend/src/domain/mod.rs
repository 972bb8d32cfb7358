//! Domain primitives, aggregates, services and ports.
//!
//! Purpose: keep the `User`/`Idea` aggregate pair consistent and serve feed
//! views over it. Nothing in here knows about HTTP or SQL; adapters reach the
//! domain only through [`ports`].
//!
//! Public surface:
//! - Error, ErrorCode: transport agnostic failure payload.
//! - User, UserProfile: authors and the profile view.
//! - Idea, IdeaWithOwner, LikeToggle: the idea aggregate and its projections.
//! - SortBy, SearchQuery: feed ordering and filtering.
//! - IdeaCommandService, FeedService: driving port implementations.

pub mod error;
pub mod feed;
mod feed_service;
pub mod idea;
mod idea_service;
pub mod identity;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed::{EmptySearchQuery, SearchQuery, SortBy, sort_ideas};
pub use self::feed_service::FeedService;
pub use self::idea::{
    CoverImageUrl, Idea, IdeaDetails, IdeaDraft, IdeaField, IdeaId, IdeaValidationError,
    IdeaWithOwner, LikeToggle, Likes,
};
pub use self::idea_service::IdeaCommandService;
pub use self::identity::{IdentifierError, resolve_idea_id, resolve_user_id};
pub use self::trace_id::TraceId;
pub use self::user::{
    DisplayName, User, UserId, UserProfile, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pitchfeed::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Unauthorized action"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
