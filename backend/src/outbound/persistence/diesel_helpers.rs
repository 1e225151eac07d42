//! Shared error mapping and column conversions for the Diesel adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Route a pool failure to a repository's connection constructor.
pub(super) fn pool_failure<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Route a Diesel failure to a repository's query or connection constructor.
///
/// Driver detail is logged at `debug` and replaced with a fixed message.
pub(super) fn diesel_failure<E>(
    error: DieselError,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection closed".to_owned())
        }
        DieselError::QueryBuilderError(_) => query("invalid database query".to_owned()),
        _ => query("database error".to_owned()),
    }
}

/// Whether `error` reports a unique constraint violation.
pub(super) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Narrow a domain count to an `INT4` column value.
pub(super) fn to_int4(value: u32, column: &'static str) -> Result<i32, String> {
    i32::try_from(value).map_err(|_| format!("{column} value {value} exceeds INT4 range"))
}

/// Widen an `INT4` column value to a domain count.
pub(super) fn from_int4(value: i32, column: &'static str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("{column} holds negative value {value}"))
}
