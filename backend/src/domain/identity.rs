//! Identity reference resolution.
//!
//! Path and query identifiers arrive as raw strings. Resolving them here, before
//! any repository lookup, keeps "malformed id" (400) distinct from "well formed
//! but absent" (404).

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, IdeaId, UserId};

/// Reasons a raw identifier cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier must not be empty")]
    Empty,
    #[error("identifier must be a valid UUID")]
    Malformed,
}

/// Parse and normalise a UUID-shaped identifier.
///
/// Surrounding whitespace is ignored; the canonical lowercase hyphenated form
/// is what reaches persistence.
pub(crate) fn parse_identifier(raw: &str) -> Result<Uuid, IdentifierError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::Empty);
    }
    Uuid::parse_str(trimmed).map_err(|_| IdentifierError::Malformed)
}

/// Entity an identifier refers to; selects the client-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReferenceKind {
    Idea,
    User,
}

impl ReferenceKind {
    fn missing_message(self) -> &'static str {
        match self {
            Self::Idea => "Idea ID not provided",
            Self::User => "User ID not provided",
        }
    }

    fn malformed_message(self) -> &'static str {
        match self {
            Self::Idea => "Invalid idea ID format",
            Self::User => "Invalid user ID format",
        }
    }
}

fn reference_error(kind: ReferenceKind, error: IdentifierError, raw: Option<&str>) -> Error {
    match error {
        IdentifierError::Empty => Error::invalid_request(kind.missing_message())
            .with_details(json!({ "field": "id", "code": "missing_field" })),
        IdentifierError::Malformed => {
            Error::invalid_request(kind.malformed_message()).with_details(json!({
                "field": "id",
                "value": raw.unwrap_or_default(),
                "code": "invalid_uuid",
            }))
        }
    }
}

/// Resolve a raw idea reference.
///
/// # Examples
/// ```
/// use pitchfeed::domain::identity::resolve_idea_id;
/// use pitchfeed::domain::ErrorCode;
///
/// let id = resolve_idea_id(Some("7D444840-9DC0-11D1-B245-5FFDCE74FAD2")).expect("valid");
/// assert_eq!(id.to_string(), "7d444840-9dc0-11d1-b245-5ffdce74fad2");
///
/// let err = resolve_idea_id(Some("42")).expect_err("malformed");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// ```
pub fn resolve_idea_id(raw: Option<&str>) -> Result<IdeaId, Error> {
    raw.ok_or(IdentifierError::Empty)
        .and_then(IdeaId::new)
        .map_err(|err| reference_error(ReferenceKind::Idea, err, raw))
}

/// Resolve a raw user reference.
pub fn resolve_user_id(raw: Option<&str>) -> Result<UserId, Error> {
    raw.ok_or(IdentifierError::Empty)
        .and_then(UserId::new)
        .map_err(|err| reference_error(ReferenceKind::User, err, raw))
}
