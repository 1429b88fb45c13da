use std::fmt;

use async_trait::async_trait;

use sealdoc_types::Address;

use crate::error::AgentError;

/// Opaque handle to a submitted ledger transaction, as issued by the agent.
#[derive(Clone, PartialEq, Eq)]
pub struct TxHandle(String);

impl TxHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TxHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHandle({})", self.0)
    }
}

impl fmt::Display for TxHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Network inclusion state of a submitted transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InclusionStatus {
    /// Not yet included; keep waiting.
    Pending,
    /// Included and acknowledged; treat the write as durable.
    Included,
    /// The network dropped or reverted the transaction.
    Dropped,
}

/// Boundary to the external signing agent.
///
/// The agent is user-controlled and outside this process: it prompts for
/// account access, shows the signing prompt, broadcasts transactions, and
/// answers inclusion queries. Every method is caller-driven; implementations
/// must not poll in the background.
#[async_trait]
pub trait SigningAgent: Send + Sync {
    /// Request account access. Resolves with the accounts the user granted;
    /// fails with [`AgentError::Declined`] if the user refuses.
    async fn request_accounts(&self) -> Result<Vec<Address>, AgentError>;

    /// Show the signing prompt for a call to `to` with the given call data,
    /// and broadcast on approval. Resolves once the agent has accepted the
    /// transaction (inclusion comes later); the wait is unbounded.
    async fn submit_transaction(
        &self,
        from: &Address,
        to: &Address,
        call_data: &[u8],
    ) -> Result<TxHandle, AgentError>;

    /// Query the inclusion state of a previously submitted transaction.
    async fn transaction_status(&self, handle: &TxHandle) -> Result<InclusionStatus, AgentError>;
}
