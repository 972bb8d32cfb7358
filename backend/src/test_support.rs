//! Shared helpers for unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and behind the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::{FeedService, IdeaCommandService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryCoverImageStore, InMemoryIdeaRepository};

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => panic!("duration out of range: {error}; delta={delta:?}"),
        };
        *self.lock_clock() += delta;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// The full service stack over in-memory adapters.
pub struct InMemoryStack {
    pub repository: Arc<InMemoryIdeaRepository>,
    pub covers: Arc<InMemoryCoverImageStore>,
    pub clock: Arc<MutableClock>,
    pub ideas: Arc<IdeaCommandService<InMemoryIdeaRepository, InMemoryCoverImageStore>>,
    pub feed: Arc<FeedService<InMemoryIdeaRepository>>,
}

impl InMemoryStack {
    pub fn new(now: DateTime<Utc>) -> Self {
        let clock = Arc::new(MutableClock::new(now));
        let repository = Arc::new(InMemoryIdeaRepository::new());
        let covers = Arc::new(InMemoryCoverImageStore::new(clock.clone()));
        let ideas = Arc::new(IdeaCommandService::new(
            repository.clone(),
            covers.clone(),
            clock.clone(),
        ));
        let feed = Arc::new(FeedService::new(repository.clone()));
        Self {
            repository,
            covers,
            clock,
            ideas,
            feed,
        }
    }

    /// HTTP state wired to this stack.
    pub fn http_state(&self) -> HttpState {
        HttpState::new(self.ideas.clone(), self.feed.clone(), self.feed.clone())
    }
}
