use std::fmt;

/// Phase of an upload workflow instance.
///
/// Legal transitions:
/// `Idle → HashingContent → AwaitingSignature → TxConfirmed →
/// StoringRemotely → Completed`, with failure exits `Rejected` and
/// `ChainFailed` from `AwaitingSignature`, and `StoreFailed` only from
/// `StoringRemotely`. `StoreFailed` means the ledger write is durable but
/// the stored copy is not — a retryable terminal state, not a rollback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    HashingContent,
    AwaitingSignature,
    TxConfirmed,
    StoringRemotely,
    Completed,
    Rejected,
    ChainFailed,
    StoreFailed,
}

impl UploadPhase {
    /// Returns `true` while an instance is between start and a terminal
    /// outcome. A second `upload()` during this window is `WorkflowBusy`.
    pub fn in_flight(&self) -> bool {
        matches!(
            self,
            UploadPhase::HashingContent
                | UploadPhase::AwaitingSignature
                | UploadPhase::TxConfirmed
                | UploadPhase::StoringRemotely
        )
    }
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UploadPhase::Idle => "idle",
            UploadPhase::HashingContent => "hashing-content",
            UploadPhase::AwaitingSignature => "awaiting-signature",
            UploadPhase::TxConfirmed => "tx-confirmed",
            UploadPhase::StoringRemotely => "storing-remotely",
            UploadPhase::Completed => "completed",
            UploadPhase::Rejected => "rejected",
            UploadPhase::ChainFailed => "chain-failed",
            UploadPhase::StoreFailed => "store-failed",
        };
        f.write_str(s)
    }
}

/// Phase of a transfer workflow instance; mirrors [`UploadPhase`] with the
/// remote step being delivery instead of storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferPhase {
    Idle,
    Validating,
    AwaitingSignature,
    TxConfirmed,
    Delivering,
    Completed,
    Rejected,
    ChainFailed,
    DeliverFailed,
}

impl TransferPhase {
    /// Returns `true` while an instance is between start and a terminal
    /// outcome. A second `send()` during this window is `WorkflowBusy`.
    pub fn in_flight(&self) -> bool {
        matches!(
            self,
            TransferPhase::Validating
                | TransferPhase::AwaitingSignature
                | TransferPhase::TxConfirmed
                | TransferPhase::Delivering
        )
    }
}

impl fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransferPhase::Idle => "idle",
            TransferPhase::Validating => "validating",
            TransferPhase::AwaitingSignature => "awaiting-signature",
            TransferPhase::TxConfirmed => "tx-confirmed",
            TransferPhase::Delivering => "delivering",
            TransferPhase::Completed => "completed",
            TransferPhase::Rejected => "rejected",
            TransferPhase::ChainFailed => "chain-failed",
            TransferPhase::DeliverFailed => "deliver-failed",
        };
        f.write_str(s)
    }
}
