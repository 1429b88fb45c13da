use std::fmt;

/// Lifecycle of a single ledger write.
///
/// The three terminal states carry different recovery semantics: `Rejected`
/// means the signing prompt was dismissed and no side effect occurred;
/// `Confirmed` means the write is durable; `Failed` means something broke
/// after the prompt and the side-effect status is ambiguous.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxStatus {
    /// No interaction with the agent yet.
    Unsubmitted,
    /// Signing prompt is showing; waiting on the user.
    AwaitingSignature,
    /// Agent accepted and broadcast; waiting on network inclusion.
    Submitted,
    /// Inclusion acknowledged; the write is durable.
    Confirmed,
    /// User declined the prompt. Terminal, no side effect.
    Rejected,
    /// Agent or network error after the prompt. Terminal, ambiguous.
    Failed,
}

impl TxStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStatus::Confirmed | TxStatus::Rejected | TxStatus::Failed)
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxStatus::Unsubmitted => "unsubmitted",
            TxStatus::AwaitingSignature => "awaiting-signature",
            TxStatus::Submitted => "submitted",
            TxStatus::Confirmed => "confirmed",
            TxStatus::Rejected => "rejected",
            TxStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(TxStatus::Confirmed.is_terminal());
        assert!(TxStatus::Rejected.is_terminal());
        assert!(TxStatus::Failed.is_terminal());
        assert!(!TxStatus::Unsubmitted.is_terminal());
        assert!(!TxStatus::AwaitingSignature.is_terminal());
        assert!(!TxStatus::Submitted.is_terminal());
    }
}
