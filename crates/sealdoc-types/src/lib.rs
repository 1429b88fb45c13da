//! Foundation types for sealdoc.
//!
//! This crate provides the identity and record types shared by every other
//! sealdoc crate.
//!
//! # Key Types
//!
//! - [`Digest`] — 32-byte Keccak-256 fingerprint, the value recorded on-chain
//! - [`Address`] — 20-byte ledger account identifier, lowercase hex
//! - [`Category`] — fixed document classification enum
//! - [`DocumentRecord`] — backend-owned metadata for a stored document

pub mod address;
pub mod digest;
pub mod document;
pub mod error;

pub use address::Address;
pub use digest::Digest;
pub use document::{Category, DocumentId, DocumentRecord};
pub use error::TypeError;
