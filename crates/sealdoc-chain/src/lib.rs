//! Ledger transaction coordination for sealdoc.
//!
//! One [`TransactionCoordinator`] drives exactly one ledger write through
//! `Unsubmitted → AwaitingSignature → Submitted → Confirmed` (or a terminal
//! `Rejected`/`Failed`). The coordinator never resubmits; retry policy
//! belongs to the user, not to this crate.

pub mod config;
pub mod contract;
pub mod coordinator;
pub mod error;
pub mod status;

pub use config::ChainConfig;
pub use contract::StoreDocumentCall;
pub use coordinator::{ConfirmedTransaction, TransactionCoordinator};
pub use error::ChainError;
pub use status::TxStatus;
