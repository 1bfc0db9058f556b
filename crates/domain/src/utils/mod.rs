//! Domain utilities

pub mod amount;
pub mod checked;
pub mod format;
