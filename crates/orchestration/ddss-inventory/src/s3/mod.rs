//! S3 client and listing functionality.
//!
//! This module provides S3 operations for finding journal files:
//! - Client configuration with LocalStack support
//! - Paginated object listing with streaming
//! - [`ObjectLister`], the seam the inventory run lists through

mod client;
mod list;

pub use client::{S3Config, create_s3_client};
pub use list::{JournalListing, ObjectLister, S3JournalLister, S3Object, list_objects};
