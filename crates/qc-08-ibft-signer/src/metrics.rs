//! # IBFT Signer Metrics
//!
//! Prometheus metrics for monitoring header sealing.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-08-ibft-signer = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `ibft_seals_written_total` - Counter of proposer seals written
//! - `ibft_committed_seals_written_total` - Counter of committed seals aggregated into headers
//! - `ibft_seal_verifications_total` - Counter of committed-seal verifications (by outcome)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total proposer seals written
    pub static ref SEALS_WRITTEN: IntCounter = register_int_counter!(
        "ibft_seals_written_total",
        "Total number of proposer seals written"
    )
    .expect("Failed to create SEALS_WRITTEN metric");

    /// Total committed seals aggregated into headers
    pub static ref COMMITTED_SEALS_WRITTEN: IntCounter = register_int_counter!(
        "ibft_committed_seals_written_total",
        "Total number of committed seals written into headers"
    )
    .expect("Failed to create COMMITTED_SEALS_WRITTEN metric");

    /// Committed-seal verifications, labeled by outcome
    pub static ref SEAL_VERIFICATIONS: IntCounterVec = register_int_counter_vec!(
        "ibft_seal_verifications_total",
        "Total number of committed seal verifications",
        &["outcome"]
    )
    .expect("Failed to create SEAL_VERIFICATIONS metric");
}

/// Record a proposer seal written
#[cfg(feature = "metrics")]
pub fn record_seal_written() {
    SEALS_WRITTEN.inc();
}

/// Record committed seals written into a header
#[cfg(feature = "metrics")]
pub fn record_committed_seals_written(count: usize) {
    COMMITTED_SEALS_WRITTEN.inc_by(count as u64);
}

/// Record a committed-seal verification with its outcome
#[cfg(feature = "metrics")]
pub fn record_seal_verification(outcome: &str) {
    SEAL_VERIFICATIONS.with_label_values(&[outcome]).inc();
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_seal_written() {}

#[cfg(not(feature = "metrics"))]
pub fn record_committed_seals_written(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_seal_verification(_outcome: &str) {}
