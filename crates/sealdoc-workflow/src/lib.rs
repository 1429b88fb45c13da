//! Workflow coordinators for sealdoc.
//!
//! The hard part of the system lives here: sequencing a deterministic
//! content hash, a user-authorized ledger write with asynchronous
//! confirmation, and a dependent off-chain call that must only happen after
//! the write is confirmed — and must be retryable without a second ledger
//! write when it fails afterwards.
//!
//! Neither workflow persists state across process restarts. An interrupted
//! run is restarted by the user; stale signatures are never resumed.

pub mod error;
pub mod phase;
pub mod transfer;
pub mod upload;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::WorkflowError;
pub use phase::{TransferPhase, UploadPhase};
pub use transfer::TransferWorkflow;
pub use upload::{UploadReceipt, UploadWorkflow};
