//! Logging utilities.
//!
//! Centralizes logger initialization. Everything else logs through the `log`
//! facade; `env_logger` is only the default backend.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
