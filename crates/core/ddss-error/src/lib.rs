//! Error types and classification for the DDSS bucket inventory.
//!
//! This crate provides:
//! - [`DdssError`] - Top-level error enum for every stage of an inventory run
//! - [`ErrorCategory`] for deciding whether a run can continue past an error
//! - [`RunStage`] for attaching the failing stage to log output

use thiserror::Error;

/// Top-level error type for the DDSS inventory.
#[derive(Error, Debug)]
pub enum DdssError {
    /// Listing the S3 bucket failed. No partial listing is returned.
    #[error("Unable to retrieve objects from S3 bucket {container}: {message}")]
    ListingFailed { container: String, message: String },

    /// A batch could not be delivered to the Firehose stream.
    #[error("Unable to send records to Firehose stream {stream}: {message}")]
    DeliveryFailed { stream: String, message: String },

    /// A journal key does not follow the DDSS bucket naming convention.
    #[error("Malformed journal key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Event serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DdssError {
    /// Create a [`DdssError::ListingFailed`] for a bucket.
    pub fn listing(container: impl Into<String>, message: impl ToString) -> Self {
        Self::ListingFailed {
            container: container.into(),
            message: message.to_string(),
        }
    }

    /// Create a [`DdssError::DeliveryFailed`] for a delivery stream.
    pub fn delivery(stream: impl Into<String>, message: impl ToString) -> Self {
        Self::DeliveryFailed {
            stream: stream.into(),
            message: message.to_string(),
        }
    }

    /// Create a [`DdssError::MalformedKey`].
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error must abort the run.
    pub fn is_fatal(&self) -> bool {
        classify_error(self) == ErrorCategory::Fatal
    }
}

/// Error classification for run control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Abort the run and surface the error to the invoker.
    ///
    /// Examples: listing failure, delivery failure, missing configuration
    Fatal,

    /// Record the error, skip the offending object and keep going.
    ///
    /// Examples: a journal key outside the DDSS naming convention
    Skippable,
}

/// Stage of an inventory run, used as error context in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    /// Listing the S3 bucket
    Listing,

    /// Parsing a journal key into bucket metadata
    Extraction,

    /// Serializing an event envelope
    Serialization,

    /// Sending a batch to the delivery stream
    Delivery,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listing => write!(f, "Listing"),
            Self::Extraction => write!(f, "Extraction"),
            Self::Serialization => write!(f, "Serialization"),
            Self::Delivery => write!(f, "Delivery"),
        }
    }
}

/// Classifies an error to decide whether a run can continue.
pub fn classify_error(error: &DdssError) -> ErrorCategory {
    match error {
        DdssError::MalformedKey { .. } => ErrorCategory::Skippable,
        DdssError::ListingFailed { .. }
        | DdssError::DeliveryFailed { .. }
        | DdssError::Config(_)
        | DdssError::Serialization(_) => ErrorCategory::Fatal,
    }
}

/// Result type alias using DdssError.
pub type Result<T> = std::result::Result<T, DdssError>;
