//! Feed ordering and search filtering.

use std::cmp::Reverse;
use std::fmt;

use crate::domain::{Idea, IdeaWithOwner};

/// Requested feed ordering.
///
/// `popular` ranks by like count at read time. It is also what any absent or
/// unrecognised value falls back to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortBy {
    Newest,
    Oldest,
    #[default]
    Popular,
}

impl SortBy {
    /// Interpret a raw `sortBy` query value.
    ///
    /// # Examples
    /// ```
    /// use pitchfeed::domain::SortBy;
    ///
    /// assert_eq!(SortBy::parse(Some("newest")), SortBy::Newest);
    /// assert_eq!(SortBy::parse(Some("trending")), SortBy::Popular);
    /// assert_eq!(SortBy::parse(None), SortBy::Popular);
    /// ```
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("newest") => Self::Newest,
            Some("oldest") => Self::Oldest,
            _ => Self::Popular,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Popular => "popular",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order ideas in place.
///
/// The input is expected in natural storage order. All orderings are stable,
/// so equal keys keep that order.
pub fn sort_ideas(ideas: &mut [IdeaWithOwner], sort_by: SortBy) {
    match sort_by {
        SortBy::Newest => ideas.sort_by_key(|entry| Reverse(entry.idea().created_at())),
        SortBy::Oldest => ideas.sort_by_key(|entry| entry.idea().created_at()),
        SortBy::Popular => ideas.sort_by_key(|entry| Reverse(entry.idea().likes().len())),
    }
}

/// Raised when a search is attempted without a usable query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search query must not be empty")]
pub struct EmptySearchQuery;

/// Case-insensitive substring query over an idea's text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    /// Accept a non-blank query. The text is matched as given, whitespace
    /// included.
    pub fn new(raw: Option<&str>) -> Result<Self, EmptySearchQuery> {
        let raw = raw.unwrap_or_default();
        if raw.trim().is_empty() {
            return Err(EmptySearchQuery);
        }
        Ok(Self {
            raw: raw.to_owned(),
            folded: raw.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether any of name, description, pitch or category contains the
    /// query, ignoring case.
    ///
    /// # Examples
    /// ```
    /// # use chrono::Utc;
    /// use pitchfeed::domain::{
    ///     CoverImageUrl, Idea, IdeaDetails, IdeaDraft, IdeaId, SearchQuery, UserId,
    /// };
    ///
    /// let idea = Idea::new(IdeaDraft {
    ///     id: IdeaId::random(),
    ///     details: IdeaDetails::new("Rocket Launcher", "Orbit", "Cheap", "Space").unwrap(),
    ///     cover_image: CoverImageUrl::new("https://cdn.example.com/r.png").unwrap(),
    ///     owner: UserId::random(),
    ///     created_at: Utc::now(),
    /// });
    /// assert!(SearchQuery::new(Some("rocket")).unwrap().matches(&idea));
    /// assert!(!SearchQuery::new(Some("banana")).unwrap().matches(&idea));
    /// ```
    pub fn matches(&self, idea: &Idea) -> bool {
        idea.details()
            .fields()
            .iter()
            .any(|(_, value)| value.to_lowercase().contains(&self.folded))
    }
}
