//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; conversions into domain types
//! surface corrupt rows as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool};
use uuid::Uuid;

use crate::domain::ports::IdeaRepositoryError;
use crate::domain::{
    CoverImageUrl, DisplayName, Idea, IdeaDetails, IdeaDraft, IdeaId, IdeaWithOwner, LikeToggle,
    Likes, User, UserId,
};

use super::schema::{ideas, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub idea_ids: Vec<Uuid>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, IdeaRepositoryError> {
        Ok(User::new(
            UserId::from_uuid(self.id),
            DisplayName::new(self.display_name),
            self.idea_ids.into_iter().map(IdeaId::from_uuid).collect(),
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ideas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IdeaRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub pitch: String,
    pub category: String,
    pub cover_image: String,
    pub user_id: Uuid,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl IdeaRow {
    pub(crate) fn into_domain(self) -> Result<Idea, IdeaRepositoryError> {
        let corrupt = |err: String| {
            IdeaRepositoryError::query(format!("idea {} is corrupt: {err}", self.id))
        };
        let details = IdeaDetails::new(self.name, self.description, self.pitch, self.category)
            .map_err(|err| corrupt(err.to_string()))?;
        let cover_image =
            CoverImageUrl::new(&self.cover_image).map_err(|err| corrupt(err.to_string()))?;
        let idea = Idea::new(IdeaDraft {
            id: IdeaId::from_uuid(self.id),
            details,
            cover_image,
            owner: UserId::from_uuid(self.user_id),
            created_at: self.created_at,
        });
        Ok(idea.with_likes(Likes::new(self.likes.into_iter().map(UserId::from_uuid))))
    }
}

/// Convert a joined `(idea, owner)` row.
pub(crate) fn idea_with_owner(
    (idea, owner): (IdeaRow, UserRow),
) -> Result<IdeaWithOwner, IdeaRepositoryError> {
    Ok(IdeaWithOwner::new(idea.into_domain()?, owner.into_domain()?))
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ideas)]
pub(crate) struct NewIdeaRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub pitch: &'a str,
    pub category: &'a str,
    pub cover_image: &'a str,
    pub user_id: Uuid,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Idea> for NewIdeaRow<'a> {
    fn from(idea: &'a Idea) -> Self {
        let details = idea.details();
        Self {
            id: *idea.id().as_uuid(),
            name: details.name(),
            description: details.description(),
            pitch: details.pitch(),
            category: details.category(),
            cover_image: idea.cover_image().as_str(),
            user_id: *idea.owner().as_uuid(),
            likes: idea.likes().iter().map(|user| *user.as_uuid()).collect(),
            created_at: idea.created_at(),
        }
    }
}

/// Result of the atomic like toggle statement.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct LikeToggleRow {
    #[diesel(sql_type = Bool)]
    pub liked: bool,
    #[diesel(sql_type = BigInt)]
    pub total_likes: i64,
}

impl From<LikeToggleRow> for LikeToggle {
    fn from(row: LikeToggleRow) -> Self {
        Self {
            liked: row.liked,
            total_likes: usize::try_from(row.total_likes).unwrap_or_default(),
        }
    }
}
