use thiserror::Error;

/// Terminal failures of a ledger submission.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The user declined the signing prompt. No side effect occurred.
    #[error("transaction rejected by user")]
    Rejected,

    /// Agent or network error after the signing prompt. The side-effect
    /// status is ambiguous: the transaction may or may not have been
    /// broadcast. Callers must not assume safety and must not blindly
    /// resubmit.
    #[error("ledger write failed: {0}")]
    Failed(String),
}
