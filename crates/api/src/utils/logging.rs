use std::time::Duration;

use bonuspool_domain::BonusPoolError;
use bonuspool_infra::config::env_bool;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` (default `info`). Set
/// `BONUSPOOL_LOG_JSON=true` for one JSON object per event. Logs go to
/// stderr so report output on stdout stays machine-readable.
///
/// Calling this more than once is harmless; later calls keep the first
/// subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = if env_bool("BONUSPOOL_LOG_JSON", false) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"bonus::compute_all_bonuses"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - Stable label of the failure, `None` on success.
///
/// Callers must avoid forwarding employee data in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&'static str>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => warn!(command, duration_ms, error_type, "command_execution_failure"),
    }
}

/// Convert a `BonusPoolError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &BonusPoolError) -> &'static str {
    match error {
        BonusPoolError::Database(_) => "database",
        BonusPoolError::Config(_) => "config",
        BonusPoolError::Network(_) => "network",
        BonusPoolError::Timeout(_) => "timeout",
        BonusPoolError::NotFound(_) => "not_found",
        BonusPoolError::InvalidInput(_) => "invalid_input",
        BonusPoolError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(error_label(&BonusPoolError::Timeout("pool".into())), "timeout");
        assert_eq!(error_label(&BonusPoolError::InvalidInput("month".into())), "invalid_input");
        assert_eq!(error_label(&BonusPoolError::Database("locked".into())), "database");
    }
}
