//! Process-local `IdeaRepository`.
//!
//! Every mutation works on a copy of the state and swaps it in only when the
//! whole unit of work succeeded, giving the same all-or-nothing behaviour as
//! the PostgreSQL transaction.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{IdeaRepository, IdeaRepositoryError};
use crate::domain::{Idea, IdeaId, IdeaWithOwner, LikeToggle, User, UserId};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    /// Insertion order is the natural storage order.
    ideas: Vec<Idea>,
}

impl MemoryState {
    fn expand(&self, idea: &Idea) -> Result<IdeaWithOwner, IdeaRepositoryError> {
        let owner = self.users.get(idea.owner()).ok_or_else(|| {
            IdeaRepositoryError::query(format!(
                "idea {} references missing owner {}",
                idea.id(),
                idea.owner()
            ))
        })?;
        Ok(IdeaWithOwner::new(idea.clone(), owner.clone()))
    }

    fn position(&self, idea_id: &IdeaId) -> Option<usize> {
        self.ideas.iter().position(|idea| idea.id() == idea_id)
    }
}

/// In-memory repository for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryIdeaRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryIdeaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user, replacing any previous record with the same id.
    ///
    /// # Examples
    /// ```
    /// use pitchfeed::domain::User;
    /// use pitchfeed::outbound::memory::InMemoryIdeaRepository;
    ///
    /// let repository = InMemoryIdeaRepository::new();
    /// let user = User::try_from_strings("3fa85f64-5717-4562-b3fc-2c963f66afa6", "Ada Lovelace")
    ///     .expect("valid user");
    /// repository.seed_user(user).expect("seeded");
    /// ```
    pub fn seed_user(&self, user: User) -> Result<(), IdeaRepositoryError> {
        let mut state = self.lock()?;
        state.users.insert(*user.id(), user);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, IdeaRepositoryError> {
        self.state
            .lock()
            .map_err(|_| IdeaRepositoryError::connection("in-memory store lock poisoned"))
    }

    /// Apply `change` to a copy of the state; commit only on success.
    fn commit<T>(
        &self,
        change: impl FnOnce(&mut MemoryState) -> Result<T, IdeaRepositoryError>,
    ) -> Result<T, IdeaRepositoryError> {
        let mut guard = self.lock()?;
        let mut draft = guard.clone();
        let outcome = change(&mut draft)?;
        *guard = draft;
        Ok(outcome)
    }
}

#[async_trait]
impl IdeaRepository for InMemoryIdeaRepository {
    async fn create_with_owner_link(&self, idea: &Idea) -> Result<(), IdeaRepositoryError> {
        self.commit(|state| {
            if state.position(idea.id()).is_some() {
                return Err(IdeaRepositoryError::query(format!(
                    "idea {} already exists",
                    idea.id()
                )));
            }
            state.ideas.push(idea.clone());
            let owner = state
                .users
                .get_mut(idea.owner())
                .ok_or_else(|| IdeaRepositoryError::owner_not_found(*idea.owner().as_uuid()))?;
            owner.link_idea(*idea.id());
            Ok(())
        })
    }

    async fn delete_with_owner_unlink(
        &self,
        idea_id: &IdeaId,
        owner: &UserId,
    ) -> Result<bool, IdeaRepositoryError> {
        self.commit(|state| {
            let Some(index) = state
                .position(idea_id)
                .filter(|index| state.ideas[*index].is_owned_by(owner))
            else {
                return Ok(false);
            };
            if let Some(user) = state.users.get_mut(owner) {
                user.unlink_idea(idea_id);
            }
            state.ideas.remove(index);
            Ok(true)
        })
    }

    async fn find_with_owner(
        &self,
        idea_id: &IdeaId,
    ) -> Result<Option<IdeaWithOwner>, IdeaRepositoryError> {
        let state = self.lock()?;
        state
            .ideas
            .iter()
            .find(|idea| idea.id() == idea_id)
            .map(|idea| state.expand(idea))
            .transpose()
    }

    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>, IdeaRepositoryError> {
        Ok(self.lock()?.users.get(user_id).cloned())
    }

    async fn list_with_owners(&self) -> Result<Vec<IdeaWithOwner>, IdeaRepositoryError> {
        let state = self.lock()?;
        state.ideas.iter().map(|idea| state.expand(idea)).collect()
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<IdeaWithOwner>, IdeaRepositoryError> {
        let state = self.lock()?;
        state
            .ideas
            .iter()
            .filter(|idea| idea.is_owned_by(owner))
            .map(|idea| state.expand(idea))
            .collect()
    }

    async fn toggle_like(
        &self,
        idea_id: &IdeaId,
        user: &UserId,
    ) -> Result<Option<LikeToggle>, IdeaRepositoryError> {
        let mut state = self.lock()?;
        Ok(state
            .ideas
            .iter_mut()
            .find(|idea| idea.id() == idea_id)
            .map(|idea| idea.toggle_like(*user)))
    }
}

#[cfg(test)]
#[path = "idea_repository_tests.rs"]
mod tests;
