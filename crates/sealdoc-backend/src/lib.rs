//! Storage/delivery backend boundary.
//!
//! The backend stores uploaded documents and performs the steganographic
//! encoding and email dispatch on delivery — both out of scope here; this
//! crate only speaks its HTTP surface. [`DocumentBackend`] is the trait seam
//! the workflows depend on; [`HttpBackend`] is the production client.

pub mod backend;
pub mod error;
pub mod http;
pub mod types;

pub use backend::DocumentBackend;
pub use error::RemoteError;
pub use http::{BackendConfig, HttpBackend};
pub use types::{DeliveryReceipt, DeliveryRequest, NewDocument};
