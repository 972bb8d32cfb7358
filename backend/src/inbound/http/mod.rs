//! HTTP inbound adapter exposing REST endpoints.

pub(crate) mod envelope;
pub mod error;
pub mod health;
pub mod ideas;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
