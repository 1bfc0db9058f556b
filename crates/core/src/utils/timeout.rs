//! Deadline wrapper for port calls

use std::future::Future;
use std::time::Duration;

use bonuspool_domain::{BonusPoolError, Result};
use tracing::warn;

/// Await `future`, failing with [`BonusPoolError::Timeout`] once `limit`
/// elapses. `label` names the operation in the error and log line.
pub async fn with_timeout<T, F>(label: &str, limit: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation = label, timeout_ms = millis(limit), "port call timed out");
            Err(BonusPoolError::Timeout(format!("{label} exceeded {}ms", limit.as_millis())))
        }
    }
}

/// Whole milliseconds in `limit`, saturating at `u64::MAX`.
fn millis(limit: Duration) -> u64 {
    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_saturates_for_huge_limits() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn passes_through_results_within_deadline() {
        let value = with_timeout("fetch", Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(value, Ok(7));

        let err: Result<()> = with_timeout("fetch", Duration::from_secs(1), async {
            Err(BonusPoolError::Database("locked".into()))
        })
        .await;
        assert_eq!(err, Err(BonusPoolError::Database("locked".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_is_a_timeout_error() {
        let result: Result<()> = with_timeout("fetch_pool", Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        match result {
            Err(BonusPoolError::Timeout(message)) => assert!(message.contains("fetch_pool")),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
