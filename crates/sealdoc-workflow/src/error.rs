use thiserror::Error;

use sealdoc_backend::RemoteError;
use sealdoc_chain::ChainError;
use sealdoc_wallet::WalletError;

/// Terminal classification of a workflow run.
///
/// Every failure crossing the workflow boundary is one of these kinds; raw
/// transport errors never escape. The kinds carry distinct recovery
/// semantics:
///
/// - `Validation`, `WalletRequired`, `Rejected` — no side effect occurred.
/// - `ChainFailed` — ambiguous: the signature may or may not have been
///   broadcast. Surfaced distinctly from `Rejected` so the caller knows not
///   to assume safety.
/// - `StoreFailed`/`DeliverFailed` — the ledger write is durable but the
///   remote step failed. Explicitly retryable; a retry must not (and does
///   not) trigger a second signing prompt.
///
/// No automatic retries anywhere: retry is always a new explicit call.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("wallet connection required: {0}")]
    WalletRequired(#[source] WalletError),

    #[error("transaction rejected by user")]
    Rejected,

    #[error("ledger write failed: {0}")]
    ChainFailed(String),

    #[error("document stored on-chain but remote store failed: {0}")]
    StoreFailed(#[source] RemoteError),

    #[error("document stored on-chain but delivery failed: {0}")]
    DeliverFailed(#[source] RemoteError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("another workflow is already in flight")]
    WorkflowBusy,
}

impl WorkflowError {
    /// Returns `true` when the ledger write succeeded and only the
    /// dependent remote step remains; the matching retry method will reuse
    /// the confirmed transaction data.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WorkflowError::StoreFailed(_) | WorkflowError::DeliverFailed(_))
    }
}

impl From<ChainError> for WorkflowError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Rejected => WorkflowError::Rejected,
            ChainError::Failed(detail) => WorkflowError::ChainFailed(detail),
        }
    }
}
