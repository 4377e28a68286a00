//! # Error Types
//!
//! Errors raised by the shared chain primitives.

use thiserror::Error;

/// Errors that can occur while hashing a block header.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// The injected hashing strategy could not interpret the header.
    #[error("Header hash strategy failed for block {number}: {reason}")]
    HashStrategy { number: u64, reason: String },
}
