//! Diesel and pool error translation into `IdeaRepositoryError`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::IdeaRepositoryError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> IdeaRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            IdeaRepositoryError::connection(message)
        }
    }
}

/// Collapse Diesel failures into stable messages; raw driver text only goes
/// to debug logs.
pub(crate) fn map_diesel_error(error: DieselError) -> IdeaRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => IdeaRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => IdeaRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            IdeaRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            IdeaRepositoryError::query("referenced row missing")
        }
        _ => IdeaRepositoryError::query("database error"),
    }
}
