//! # Architectural Attacks
//!
//! Attacks on how consensus data is laid out and hashed rather than on the
//! cryptography itself.

pub mod qc_08_append_committed_seal;
