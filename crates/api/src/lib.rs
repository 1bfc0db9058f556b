//! # Bonuspool API
//!
//! Application layer - commands and the report entry point.
//!
//! This crate contains:
//! - Commands wrapping the bonus and pool services with execution logging
//! - Application context (dependency injection)
//! - Tracing initialisation for the `bonuspool` binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
