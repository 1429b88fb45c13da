//! Content and identity hashing for sealdoc.
//!
//! Both hashers produce Keccak-256 digests, the format the ledger contract
//! stores as `bytes32` and the backend echoes as `docHashHex`.

pub mod hasher;

pub use hasher::{ContentHasher, IdentityHasher};
