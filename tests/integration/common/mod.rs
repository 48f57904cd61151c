//! Common utilities for integration tests.
//!
//! This module provides shared test infrastructure for LocalStack-based
//! integration testing, including client setup and DDSS key generation.

pub mod localstack;

pub use localstack::{LocalStackTestContext, ddss_journal_key};
