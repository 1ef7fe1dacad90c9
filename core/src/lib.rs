pub mod action;
pub mod config;
pub mod style;
pub mod testing;
pub mod verdict_log;

pub use crate::config::Config;
pub use crate::verdict_log::VerdictLog;
