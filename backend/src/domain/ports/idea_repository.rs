//! Port for idea persistence and the owner back-reference.
//!
//! Adapters own the unit-of-work boundary: every mutating method is applied
//! completely or not at all.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Idea, IdeaId, IdeaWithOwner, LikeToggle, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by idea repository adapters.
    pub enum IdeaRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "idea repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "idea repository query failed: {message}",
        /// The owner referenced by a new idea does not exist.
        OwnerNotFound { user_id: Uuid } =>
            "idea owner {user_id} does not exist",
    }
}

/// Port for reading and mutating ideas together with their owners.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// Insert `idea` and append its id to the owner's back-reference list in
    /// one unit of work.
    ///
    /// Fails with [`IdeaRepositoryError::OwnerNotFound`] and leaves nothing
    /// behind when the owner is absent.
    async fn create_with_owner_link(&self, idea: &Idea) -> Result<(), IdeaRepositoryError>;

    /// Remove `idea_id` from the owner's back-reference list and delete the
    /// idea in one unit of work. Returns `false` when the idea was absent.
    async fn delete_with_owner_unlink(
        &self,
        idea_id: &IdeaId,
        owner: &UserId,
    ) -> Result<bool, IdeaRepositoryError>;

    /// Find one idea with its owner expanded.
    async fn find_with_owner(
        &self,
        idea_id: &IdeaId,
    ) -> Result<Option<IdeaWithOwner>, IdeaRepositoryError>;

    /// Find a user by id.
    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>, IdeaRepositoryError>;

    /// Every idea with its owner, in natural storage order.
    async fn list_with_owners(&self) -> Result<Vec<IdeaWithOwner>, IdeaRepositoryError>;

    /// Ideas owned by `owner`, in natural storage order.
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<IdeaWithOwner>, IdeaRepositoryError>;

    /// Atomically flip `user`'s membership in the idea's like set.
    ///
    /// Returns `None` when the idea does not exist.
    async fn toggle_like(
        &self,
        idea_id: &IdeaId,
        user: &UserId,
    ) -> Result<Option<LikeToggle>, IdeaRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdeaRepository;

#[async_trait]
impl IdeaRepository for FixtureIdeaRepository {
    async fn create_with_owner_link(&self, _idea: &Idea) -> Result<(), IdeaRepositoryError> {
        Ok(())
    }

    async fn delete_with_owner_unlink(
        &self,
        _idea_id: &IdeaId,
        _owner: &UserId,
    ) -> Result<bool, IdeaRepositoryError> {
        Ok(false)
    }

    async fn find_with_owner(
        &self,
        _idea_id: &IdeaId,
    ) -> Result<Option<IdeaWithOwner>, IdeaRepositoryError> {
        Ok(None)
    }

    async fn find_user(&self, _user_id: &UserId) -> Result<Option<User>, IdeaRepositoryError> {
        Ok(None)
    }

    async fn list_with_owners(&self) -> Result<Vec<IdeaWithOwner>, IdeaRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_owner(
        &self,
        _owner: &UserId,
    ) -> Result<Vec<IdeaWithOwner>, IdeaRepositoryError> {
        Ok(Vec::new())
    }

    async fn toggle_like(
        &self,
        _idea_id: &IdeaId,
        _user: &UserId,
    ) -> Result<Option<LikeToggle>, IdeaRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_lookups_find_nothing() {
        let repo = FixtureIdeaRepository;
        let idea = repo
            .find_with_owner(&IdeaId::random())
            .await
            .expect("fixture lookup succeeds");
        let toggle = repo
            .toggle_like(&IdeaId::random(), &UserId::random())
            .await
            .expect("fixture toggle succeeds");
        assert!(idea.is_none());
        assert!(toggle.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_lists_are_empty() {
        let repo = FixtureIdeaRepository;
        let all = repo.list_with_owners().await.expect("fixture list succeeds");
        assert!(all.is_empty());
    }

    #[rstest]
    fn owner_not_found_names_the_user() {
        let user_id = Uuid::nil();
        let err = IdeaRepositoryError::owner_not_found(user_id);
        assert_eq!(
            err.to_string(),
            "idea owner 00000000-0000-0000-0000-000000000000 does not exist"
        );
    }
}
