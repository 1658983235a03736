//! Core deterministic primitives.
//!
//! Seeded randomness and state hashing. Everything above this module that
//! needs chance or verification goes through these two types.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash, StateHasher};
