//! User aggregate as seen by the idea feed.
//!
//! Users are created by the signup collaborator. This core only reads them and
//! maintains the denormalised `ideas` back-reference list.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::identity::{IdentifierError, parse_identifier};
use crate::domain::{IdeaId, IdeaWithOwner};

/// Validation errors raised while building a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id: {0}")]
    InvalidId(#[from] IdentifierError),
}

/// Stable user identifier. Also the shape of an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Resolve a raw identifier.
    pub fn new(raw: &str) -> Result<Self, IdentifierError> {
        parse_identifier(raw).map(Self)
    }

    /// Generate a random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Name shown next to a user's ideas.
///
/// Names are owned by the signup collaborator and kept exactly as stored;
/// this core never rejects a user because of its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self(display_name.into())
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl From<String> for DisplayName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Application user with the back-reference list of authored ideas.
///
/// ## Invariants
/// - `ideas` holds no duplicates and keeps append order.
/// - `ideas` is a denormalised cache: the idea store is authoritative for
///   existence and ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    display_name: DisplayName,
    ideas: Vec<IdeaId>,
}

impl User {
    /// Build a user from validated components, dropping duplicate references.
    pub fn new(id: UserId, display_name: DisplayName, ideas: Vec<IdeaId>) -> Self {
        let mut unique = Vec::with_capacity(ideas.len());
        for idea in ideas {
            if !unique.contains(&idea) {
                unique.push(idea);
            }
        }
        Self {
            id,
            display_name,
            ideas: unique,
        }
    }

    /// Build a user with no authored ideas from raw strings.
    ///
    /// # Examples
    /// ```
    /// use pitchfeed::domain::User;
    ///
    /// let user = User::try_from_strings("3fa85f64-5717-4562-b3fc-2c963f66afa6", "Ada Lovelace")
    ///     .expect("valid user");
    /// assert!(user.ideas().is_empty());
    /// ```
    pub fn try_from_strings(
        id: &str,
        display_name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let id = UserId::new(id)?;
        Ok(Self::new(id, DisplayName::new(display_name), Vec::new()))
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Authored idea references in append order.
    pub fn ideas(&self) -> &[IdeaId] {
        &self.ideas
    }

    /// Append a back-reference; a reference already present is left alone.
    pub fn link_idea(&mut self, idea_id: IdeaId) {
        if !self.ideas.contains(&idea_id) {
            self.ideas.push(idea_id);
        }
    }

    /// Remove a back-reference. Returns whether anything was removed.
    pub fn unlink_idea(&mut self, idea_id: &IdeaId) -> bool {
        let before = self.ideas.len();
        self.ideas.retain(|id| id != idea_id);
        before != self.ideas.len()
    }
}

/// Profile view: a user with every authored idea expanded, each carrying its
/// owner again.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    id: UserId,
    display_name: DisplayName,
    ideas: Vec<IdeaWithOwner>,
}

impl UserProfile {
    /// Expand `user` with the given ideas.
    ///
    /// Ideas are ordered by their position in the back-reference list; ideas
    /// the list does not mention follow in the order given.
    pub fn new(user: &User, mut ideas: Vec<IdeaWithOwner>) -> Self {
        let position = |idea: &IdeaWithOwner| {
            user.ideas()
                .iter()
                .position(|id| id == idea.idea().id())
                .unwrap_or(usize::MAX)
        };
        ideas.sort_by_key(position);
        Self {
            id: *user.id(),
            display_name: user.display_name().clone(),
            ideas,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn ideas(&self) -> &[IdeaWithOwner] {
        &self.ideas
    }
}
