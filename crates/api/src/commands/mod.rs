//! Commands - entry points over the bonus and pool services

mod bonus;
mod pools;

pub use bonus::*;
pub use pools::*;
