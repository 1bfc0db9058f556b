//! Shared helpers for core services

pub mod timeout;

pub use timeout::with_timeout;
