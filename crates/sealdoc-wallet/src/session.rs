use std::sync::Arc;

use tracing::{debug, info};

use sealdoc_types::Address;

use crate::agent::{InclusionStatus, SigningAgent, TxHandle};
use crate::error::{AgentError, WalletError};

/// Connection state to the external signing agent.
///
/// A session starts disconnected and becomes connected only through an
/// explicit [`connect`](WalletSession::connect) call. Nothing is persisted;
/// a new process starts over.
pub struct WalletSession {
    agent: Arc<dyn SigningAgent>,
    address: Option<Address>,
}

impl WalletSession {
    pub fn new(agent: Arc<dyn SigningAgent>) -> Self {
        Self {
            agent,
            address: None,
        }
    }

    /// Request account access from the agent and record the active account.
    ///
    /// Fails with [`WalletError::AgentUnavailable`] when no agent is
    /// reachable and [`WalletError::UserDeclined`] when the user refuses.
    pub async fn connect(&mut self) -> Result<Address, WalletError> {
        debug!("requesting account access from signing agent");
        let accounts = match self.agent.request_accounts().await {
            Ok(accounts) => accounts,
            Err(AgentError::Declined) => return Err(WalletError::UserDeclined),
            Err(AgentError::Unavailable(detail)) => {
                return Err(WalletError::AgentUnavailable(detail))
            }
            Err(other) => return Err(other.into()),
        };
        let address = *accounts.first().ok_or(WalletError::NoAccounts)?;
        info!(address = %address.short(), "wallet connected");
        self.address = Some(address);
        Ok(address)
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// The active account, if connected.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Capability to authorize ledger transactions for the active account.
    ///
    /// Fails with [`WalletError::NotConnected`] until a `connect` call has
    /// completed.
    pub fn signer(&self) -> Result<Signer, WalletError> {
        let address = self.address.ok_or(WalletError::NotConnected)?;
        Ok(Signer {
            agent: Arc::clone(&self.agent),
            address,
        })
    }
}

/// Authorization capability bound to one connected account.
///
/// Hands the signing prompt and inclusion queries through to the agent; the
/// transaction coordinator drives it without ever touching the agent
/// directly.
#[derive(Clone)]
pub struct Signer {
    agent: Arc<dyn SigningAgent>,
    address: Address,
}

impl Signer {
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Prompt for a signature on the given call and broadcast on approval.
    pub async fn submit_transaction(
        &self,
        to: &Address,
        call_data: &[u8],
    ) -> Result<TxHandle, AgentError> {
        self.agent
            .submit_transaction(&self.address, to, call_data)
            .await
    }

    /// Query the inclusion state of a submitted transaction.
    pub async fn transaction_status(
        &self,
        handle: &TxHandle,
    ) -> Result<InclusionStatus, AgentError> {
        self.agent.transaction_status(handle).await
    }
}
