//! # Quantum-Chain IBFT Benchmarks
//!
//! Performance benchmarks per subsystem, driven by `benches/ibft_benchmarks.rs`.

pub mod qc_10_signature;
