//! Monthly pool administration

pub mod ports;
pub mod service;

pub use service::PoolAdministrationService;
