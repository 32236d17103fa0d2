//! Shared utilities for the electoral workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
