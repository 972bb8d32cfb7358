//! Idea aggregate: the pitched startup idea, its cover image and its likes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use url::Url;
use uuid::Uuid;

use crate::domain::identity::{IdentifierError, parse_identifier};
use crate::domain::{User, UserId};

/// Stable idea identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(Uuid);

impl IdeaId {
    /// Resolve a raw identifier.
    pub fn new(raw: &str) -> Result<Self, IdentifierError> {
        parse_identifier(raw).map(Self)
    }

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

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Required text fields of an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdeaField {
    Name,
    Description,
    Pitch,
    Category,
}

impl IdeaField {
    pub const ALL: [IdeaField; 4] = [Self::Name, Self::Description, Self::Pitch, Self::Category];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Pitch => "pitch",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for IdeaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures raised while building idea values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdeaValidationError {
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<IdeaField>),
    #[error("cover image URL is invalid: {0}")]
    InvalidCoverImage(String),
}

fn join_fields(fields: &[IdeaField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The four free-text fields of an idea, each non-empty once trimmed.
///
/// # Examples
/// ```
/// use pitchfeed::domain::{IdeaDetails, IdeaField, IdeaValidationError};
///
/// let details = IdeaDetails::new(" Rocket ", "Launch things", "Cheap orbit", "Space")
///     .expect("valid details");
/// assert_eq!(details.name(), "Rocket");
///
/// let err = IdeaDetails::new("Rocket", "", "  ", "Space").expect_err("blank fields");
/// assert_eq!(
///     err,
///     IdeaValidationError::MissingFields(vec![IdeaField::Description, IdeaField::Pitch])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeaDetails {
    name: String,
    description: String,
    pitch: String,
    category: String,
}

impl IdeaDetails {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        pitch: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, IdeaValidationError> {
        let values = [name.into(), description.into(), pitch.into(), category.into()];
        let missing: Vec<IdeaField> = IdeaField::ALL
            .into_iter()
            .zip(values.iter())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();
        if !missing.is_empty() {
            return Err(IdeaValidationError::MissingFields(missing));
        }
        let [name, description, pitch, category] = values.map(|value| value.trim().to_owned());
        Ok(Self {
            name,
            description,
            pitch,
            category,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn pitch(&self) -> &str {
        &self.pitch
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Field values paired with their field name.
    pub fn fields(&self) -> [(IdeaField, &str); 4] {
        [
            (IdeaField::Name, self.name.as_str()),
            (IdeaField::Description, self.description.as_str()),
            (IdeaField::Pitch, self.pitch.as_str()),
            (IdeaField::Category, self.category.as_str()),
        ]
    }
}

/// Public URL of an uploaded cover image. Only `http` and `https` URLs are
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImageUrl(Url);

impl CoverImageUrl {
    pub fn new(raw: &str) -> Result<Self, IdeaValidationError> {
        let url = Url::parse(raw.trim())
            .map_err(|err| IdeaValidationError::InvalidCoverImage(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(IdeaValidationError::InvalidCoverImage(format!(
                "unsupported scheme `{other}`"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CoverImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CoverImageUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Set of users who liked an idea, in the order they liked it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Likes(Vec<UserId>);

impl Likes {
    /// Build from stored members, dropping repeats.
    pub fn new(members: impl IntoIterator<Item = UserId>) -> Self {
        let mut likes = Self::default();
        for member in members {
            if !likes.contains(&member) {
                likes.0.push(member);
            }
        }
        likes
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.0.contains(user)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }

    /// Flip membership of `user`; returns `true` when the user now likes it.
    pub fn toggle(&mut self, user: UserId) -> bool {
        if self.contains(&user) {
            self.0.retain(|member| member != &user);
            false
        } else {
            self.0.push(user);
            true
        }
    }
}

/// Outcome of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub liked: bool,
    pub total_likes: usize,
}

/// Inputs for a freshly created idea.
#[derive(Debug, Clone)]
pub struct IdeaDraft {
    pub id: IdeaId,
    pub details: IdeaDetails,
    pub cover_image: CoverImageUrl,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
}

/// Persisted idea.
///
/// ## Invariants
/// - `cover_image`, `owner` and `created_at` never change after creation.
/// - `likes` never holds the same user twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idea {
    id: IdeaId,
    details: IdeaDetails,
    cover_image: CoverImageUrl,
    owner: UserId,
    likes: Likes,
    created_at: DateTime<Utc>,
}

impl Idea {
    /// Create an idea with no likes.
    pub fn new(draft: IdeaDraft) -> Self {
        let IdeaDraft {
            id,
            details,
            cover_image,
            owner,
            created_at,
        } = draft;
        Self {
            id,
            details,
            cover_image,
            owner,
            likes: Likes::default(),
            created_at,
        }
    }

    /// Restore stored likes when loading an existing idea.
    pub fn with_likes(mut self, likes: Likes) -> Self {
        self.likes = likes;
        self
    }

    pub fn id(&self) -> &IdeaId {
        &self.id
    }

    pub fn details(&self) -> &IdeaDetails {
        &self.details
    }

    pub fn cover_image(&self) -> &CoverImageUrl {
        &self.cover_image
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn likes(&self) -> &Likes {
        &self.likes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Flip `user`'s like and report the resulting state.
    pub fn toggle_like(&mut self, user: UserId) -> LikeToggle {
        let liked = self.likes.toggle(user);
        LikeToggle {
            liked,
            total_likes: self.likes.len(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdeaView<'a, U: Serialize> {
    id: &'a IdeaId,
    #[serde(flatten)]
    details: &'a IdeaDetails,
    cover_image: &'a CoverImageUrl,
    user: U,
    likes: &'a Likes,
    created_at: DateTime<Utc>,
}

impl<'a, U: Serialize> IdeaView<'a, U> {
    fn of(idea: &'a Idea, user: U) -> Self {
        Self {
            id: &idea.id,
            details: &idea.details,
            cover_image: &idea.cover_image,
            user,
            likes: &idea.likes,
            created_at: idea.created_at,
        }
    }
}

impl Serialize for Idea {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        IdeaView::of(self, &self.owner).serialize(serializer)
    }
}

/// An idea with its owning user expanded in place of the owner id.
#[derive(Debug, Clone, PartialEq)]
pub struct IdeaWithOwner {
    idea: Idea,
    owner: User,
}

impl IdeaWithOwner {
    /// Pair an idea with its owner. `owner` must be the user the idea
    /// references.
    pub fn new(idea: Idea, owner: User) -> Self {
        debug_assert_eq!(idea.owner(), owner.id(), "owner must match the idea");
        Self { idea, owner }
    }

    pub fn idea(&self) -> &Idea {
        &self.idea
    }

    pub fn owner(&self) -> &User {
        &self.owner
    }

    pub fn into_parts(self) -> (Idea, User) {
        (self.idea, self.owner)
    }
}

impl Serialize for IdeaWithOwner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        IdeaView::of(&self.idea, &self.owner).serialize(serializer)
    }
}
