//! PostgreSQL-backed `IdeaRepository`.
//!
//! Writes that touch both tables run in one transaction. The like toggle is a
//! single `UPDATE ... RETURNING`, so concurrent toggles serialise on the row
//! lock instead of racing a read-modify-write.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Uuid as SqlUuid;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{IdeaRepository, IdeaRepositoryError};
use crate::domain::{Idea, IdeaId, IdeaWithOwner, LikeToggle, User, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{IdeaRow, LikeToggleRow, NewIdeaRow, UserRow, idea_with_owner};
use super::pool::DbPool;
use super::schema::{ideas, users};

const LINK_IDEA_SQL: &str = "UPDATE users SET idea_ids = array_append(idea_ids, $1) \
     WHERE id = $2 AND NOT ($1 = ANY(idea_ids))";

const UNLINK_IDEA_SQL: &str =
    "UPDATE users SET idea_ids = array_remove(idea_ids, $1) WHERE id = $2";

const TOGGLE_LIKE_SQL: &str = "UPDATE ideas SET likes = CASE \
         WHEN $2 = ANY(likes) THEN array_remove(likes, $2) \
         ELSE array_append(likes, $2) END \
     WHERE id = $1 \
     RETURNING ($2 = ANY(likes)) AS liked, cardinality(likes)::bigint AS total_likes";

/// Failure inside a write transaction. Any variant rolls the transaction back.
#[derive(Debug, thiserror::Error)]
enum WriteError {
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),
    #[error("owner {0} not found")]
    OwnerNotFound(Uuid),
}

impl From<WriteError> for IdeaRepositoryError {
    fn from(error: WriteError) -> Self {
        match error {
            WriteError::Diesel(err) => map_diesel_error(err),
            WriteError::OwnerNotFound(user_id) => IdeaRepositoryError::owner_not_found(user_id),
        }
    }
}

/// Diesel-backed idea repository.
#[derive(Clone)]
pub struct DieselIdeaRepository {
    pool: DbPool,
}

impl DieselIdeaRepository {
    /// # Examples
    ///
    /// ```rust,no_run
    /// use pitchfeed::outbound::persistence::{DbPool, DieselIdeaRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/pitchfeed")).await?;
    /// let repository = DieselIdeaRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdeaRepository for DieselIdeaRepository {
    async fn create_with_owner_link(&self, idea: &Idea) -> Result<(), IdeaRepositoryError> {
        let row = NewIdeaRow::from(idea);
        let idea_id = row.id;
        let owner_id = row.user_id;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let linked = sql_query(LINK_IDEA_SQL)
                    .bind::<SqlUuid, _>(idea_id)
                    .bind::<SqlUuid, _>(owner_id)
                    .execute(conn)
                    .await?;
                if linked == 0 {
                    return Err(WriteError::OwnerNotFound(owner_id));
                }

                diesel::insert_into(ideas::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok::<_, WriteError>(())
            }
            .scope_boxed()
        })
        .await?;

        debug!(%idea_id, %owner_id, "idea inserted and linked");
        Ok(())
    }

    async fn delete_with_owner_unlink(
        &self,
        idea_id: &IdeaId,
        owner: &UserId,
    ) -> Result<bool, IdeaRepositoryError> {
        let idea_id = *idea_id.as_uuid();
        let owner_id = *owner.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = conn
            .transaction(|conn| {
                async move {
                    let removed = diesel::delete(
                        ideas::table
                            .filter(ideas::id.eq(idea_id))
                            .filter(ideas::user_id.eq(owner_id)),
                    )
                    .execute(conn)
                    .await?;
                    if removed == 0 {
                        return Ok::<_, WriteError>(false);
                    }

                    sql_query(UNLINK_IDEA_SQL)
                        .bind::<SqlUuid, _>(idea_id)
                        .bind::<SqlUuid, _>(owner_id)
                        .execute(conn)
                        .await?;
                    Ok(true)
                }
                .scope_boxed()
            })
            .await?;

        Ok(deleted)
    }

    async fn find_with_owner(
        &self,
        idea_id: &IdeaId,
    ) -> Result<Option<IdeaWithOwner>, IdeaRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ideas::table
            .inner_join(users::table)
            .filter(ideas::id.eq(idea_id.as_uuid()))
            .select((IdeaRow::as_select(), UserRow::as_select()))
            .first::<(IdeaRow, UserRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(idea_with_owner).transpose()
    }

    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>, IdeaRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(user_id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(UserRow::into_domain).transpose()
    }

    async fn list_with_owners(&self) -> Result<Vec<IdeaWithOwner>, IdeaRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = ideas::table
            .inner_join(users::table)
            .order(ideas::created_at.asc())
            .then_order_by(ideas::id.asc())
            .select((IdeaRow::as_select(), UserRow::as_select()))
            .load::<(IdeaRow, UserRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(idea_with_owner).collect()
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<IdeaWithOwner>, IdeaRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = ideas::table
            .inner_join(users::table)
            .filter(ideas::user_id.eq(owner.as_uuid()))
            .order(ideas::created_at.asc())
            .then_order_by(ideas::id.asc())
            .select((IdeaRow::as_select(), UserRow::as_select()))
            .load::<(IdeaRow, UserRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(idea_with_owner).collect()
    }

    async fn toggle_like(
        &self,
        idea_id: &IdeaId,
        user: &UserId,
    ) -> Result<Option<LikeToggle>, IdeaRepositoryError> {
        let idea_id = *idea_id.as_uuid();
        let user_id = *user.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = sql_query(TOGGLE_LIKE_SQL)
            .bind::<SqlUuid, _>(idea_id)
            .bind::<SqlUuid, _>(user_id)
            .get_result::<LikeToggleRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(LikeToggle::from))
    }
}
