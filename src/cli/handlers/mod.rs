//! CLI command handlers.

pub mod interpret;
pub mod recommend;
pub mod sync;
