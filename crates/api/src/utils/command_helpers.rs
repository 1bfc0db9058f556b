//! Command execution helpers
//!
//! Provides utilities to reduce boilerplate when implementing commands with
//! execution logging.

use std::future::Future;
use std::time::Instant;

use bonuspool_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command, timing it and logging the outcome.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn my_command(ctx: &AppContext) -> Result<MyResponse> {
///     execute_logged("my_module::my_command", || async {
///         ctx.some_service.do_something().await
///     })
///     .await
/// }
/// ```
pub async fn execute_logged<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));

    result
}
