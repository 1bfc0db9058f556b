//! Conversions from external infrastructure errors into domain errors.

use bonuspool_domain::BonusPoolError;
use rusqlite::Error as SqlError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BonusPoolError);

impl From<InfraError> for BonusPoolError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BonusPoolError> for InfraError {
    fn from(value: BonusPoolError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoBonusPoolError {
    fn into_bonuspool(self) -> BonusPoolError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → BonusPoolError */
/* -------------------------------------------------------------------------- */

impl IntoBonusPoolError for SqlError {
    fn into_bonuspool(self) -> BonusPoolError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        BonusPoolError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        BonusPoolError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        BonusPoolError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 275) => {
                        BonusPoolError::InvalidInput(format!("check constraint failed: {message}"))
                    }
                    (ErrorCode::CannotOpen, _) => {
                        BonusPoolError::Database(format!("unable to open database: {message}"))
                    }
                    _ => BonusPoolError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => BonusPoolError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                BonusPoolError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                BonusPoolError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                BonusPoolError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidPath(path) => BonusPoolError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => BonusPoolError::Database("invalid SQL query".into()),
            other => BonusPoolError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_bonuspool())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → BonusPoolError */
/* -------------------------------------------------------------------------- */

impl IntoBonusPoolError for r2d2::Error {
    fn into_bonuspool(self) -> BonusPoolError {
        let message = self.to_string();
        if message.to_ascii_lowercase().contains("timed out") {
            BonusPoolError::Timeout(format!("waiting for a database connection: {message}"))
        } else {
            BonusPoolError::Database(format!("connection pool error: {message}"))
        }
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_bonuspool())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio JoinError → BonusPoolError */
/* -------------------------------------------------------------------------- */

/// Map a failed `spawn_blocking` task to a domain error.
pub fn map_join_error(err: JoinError) -> BonusPoolError {
    if err.is_cancelled() {
        BonusPoolError::Internal("blocking task cancelled".into())
    } else {
        BonusPoolError::Internal(format!("blocking task failed: {err}"))
    }
}
