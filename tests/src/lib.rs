//! # Quantum-Chain IBFT Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Performance tests per subsystem
//! │   ├── qc_08_ibft_signer.rs
//! │   └── qc_10_signature.rs
//! │
//! ├── exploits/         # Attack simulations
//! │   └── architectural/# Consensus-level attacks
//! │
//! ├── fixtures.rs       # Validator keys and sealed header chains
//! │
//! └── integration/      # Cross-subsystem flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::
//! cargo test -p qc-tests exploits::architectural::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
pub mod exploits;
pub mod fixtures;
pub mod integration;
