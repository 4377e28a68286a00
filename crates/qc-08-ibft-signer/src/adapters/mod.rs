//! Adapters layer (Hexagonal Architecture)

mod key_manager;

pub use key_manager::*;
