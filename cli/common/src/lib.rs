//! Shared utilities for the ddss-inventory binaries.
//!
//! This crate provides logging setup and summary formatting shared between
//! the `ddss-inventory` CLI and the `ddss-inventory-lambda` function.

pub mod args;
pub mod format;
pub mod logging;

pub use args::{LogFormat, LogLevel};
pub use format::{format_bytes, format_count, format_duration};
pub use logging::init_logging;
