//! Process-local adapters used when no database or object store is
//! configured, and by integration tests.

mod cover_image_store;
mod idea_repository;

pub use cover_image_store::InMemoryCoverImageStore;
pub use idea_repository::InMemoryIdeaRepository;
