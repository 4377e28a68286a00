//! # Integration Tests
//!
//! Cross-subsystem flows between the IBFT signer (qc-08) and signature
//! primitives (qc-10).

pub mod ibft_flows;
