//! # Exploit Simulations
//!
//! Attacks replayed against the real subsystems. Each test documents the
//! attack and asserts that it is detected.

pub mod architectural;
