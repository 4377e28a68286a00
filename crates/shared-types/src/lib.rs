//! # Shared Types Crate
//!
//! Chain primitives used across the IBFT subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Hash`, `Address` and `Header` are defined
//!   here and nowhere else.
//! - **Injected Hashing**: a header never decides on its own how it is hashed.
//!   Consensus engines supply a [`HeaderHasher`] to [`Header::compute_hash`],
//!   so there is no process-wide hash override to install or restore.

pub mod entities;
pub mod errors;
pub mod hashing;

pub use entities::*;
pub use errors::*;
pub use hashing::*;
