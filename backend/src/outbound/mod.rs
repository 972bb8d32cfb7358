//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local repository and object store
//! - **object_storage**: HTTP object storage for cover images
//!
//! Adapters translate between domain types and infrastructure
//! representations; they hold no business rules.

pub mod memory;
pub mod object_storage;
pub mod persistence;
