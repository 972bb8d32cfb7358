//! PostgreSQL persistence via Diesel, `diesel-async` and bb8.
//!
//! Row structs and table definitions stay private to this module; adapters
//! translate them into domain types and Diesel failures into port errors.

mod diesel_idea_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_idea_repository::DieselIdeaRepository;
pub use migrations::run_pending_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
