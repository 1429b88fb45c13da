use tokio::sync::watch;
use tracing::{debug, info, warn};

use sealdoc_types::Digest;
use sealdoc_wallet::{AgentError, InclusionStatus, Signer, TxHandle};

use crate::config::ChainConfig;
use crate::contract::StoreDocumentCall;
use crate::error::ChainError;
use crate::status::TxStatus;

/// A ledger write that reached `Confirmed`.
///
/// Carries everything a dependent off-chain call needs, so that a retry of
/// that call can reuse the confirmed data without touching the ledger again.
#[derive(Clone, Debug)]
pub struct ConfirmedTransaction {
    pub receiver_tag: Digest,
    pub document_hash: Digest,
    pub handle: TxHandle,
}

/// Drives exactly one ledger write from submission to a terminal status.
///
/// `submit` consumes the coordinator: a terminal transaction is discarded,
/// never reused for a second send. Status transitions are published on a
/// watch channel for observers; subscribe before calling `submit`.
///
/// Both waits — the signing prompt and the confirmation poll — are
/// unbounded. There is no internal timeout; abandonment is the caller
/// dropping the future, which never undoes a submitted transaction.
pub struct TransactionCoordinator {
    config: ChainConfig,
    status: watch::Sender<TxStatus>,
}

impl TransactionCoordinator {
    pub fn new(config: ChainConfig) -> Self {
        let (status, _) = watch::channel(TxStatus::Unsubmitted);
        Self { config, status }
    }

    /// Observe status transitions for this coordinator's single write.
    pub fn subscribe(&self) -> watch::Receiver<TxStatus> {
        self.status.subscribe()
    }

    fn transition(&self, to: TxStatus) {
        debug!(status = %to, "ledger transaction status");
        self.status.send_replace(to);
    }

    /// Submit `storeDocument(receiver_tag, document_hash)` through the
    /// signer and wait for confirmation.
    ///
    /// Exactly one ledger interaction happens per call. `Rejected` means
    /// the prompt was dismissed and nothing was broadcast; `Failed` means
    /// an error after the prompt left the side-effect status ambiguous.
    pub async fn submit(
        self,
        receiver_tag: Digest,
        document_hash: Digest,
        signer: &Signer,
    ) -> Result<ConfirmedTransaction, ChainError> {
        let call = StoreDocumentCall::new(receiver_tag, document_hash);

        self.transition(TxStatus::AwaitingSignature);
        let handle = match signer
            .submit_transaction(&self.config.contract, &call.encode())
            .await
        {
            Ok(handle) => handle,
            Err(AgentError::Declined) => {
                info!("signing prompt declined");
                self.transition(TxStatus::Rejected);
                return Err(ChainError::Rejected);
            }
            Err(err) => {
                warn!(error = %err, "ledger submission failed");
                self.transition(TxStatus::Failed);
                return Err(ChainError::Failed(err.to_string()));
            }
        };

        info!(tx = %handle, "transaction submitted, awaiting confirmation");
        self.transition(TxStatus::Submitted);

        loop {
            match signer.transaction_status(&handle).await {
                Ok(InclusionStatus::Pending) => {
                    tokio::time::sleep(self.config.poll_interval).await;
                }
                Ok(InclusionStatus::Included) => break,
                Ok(InclusionStatus::Dropped) => {
                    warn!(tx = %handle, "transaction dropped by the network");
                    self.transition(TxStatus::Failed);
                    return Err(ChainError::Failed(format!(
                        "transaction {handle} was dropped or reverted"
                    )));
                }
                Err(err) => {
                    warn!(tx = %handle, error = %err, "confirmation query failed");
                    self.transition(TxStatus::Failed);
                    return Err(ChainError::Failed(err.to_string()));
                }
            }
        }

        info!(tx = %handle, "transaction confirmed");
        self.transition(TxStatus::Confirmed);
        Ok(ConfirmedTransaction {
            receiver_tag,
            document_hash,
            handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use sealdoc_types::Address;
    use sealdoc_wallet::{SigningAgent, WalletSession};

    const ADDR: &str = "0x121b48de8be585ffe1a7b4f5a7dfe24bc792a34f";
    const CONTRACT: &str = "0x00000000000000000000000000000000000000cc";

    enum Script {
        ConfirmAfter(usize),
        Decline,
        ErrorOnSubmit,
        Drop,
    }

    struct ScriptedAgent {
        script: Script,
        polls: AtomicUsize,
        prompts: AtomicUsize,
    }

    impl ScriptedAgent {
        fn new(script: Script) -> Self {
            Self {
                script,
                polls: AtomicUsize::new(0),
                prompts: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SigningAgent for ScriptedAgent {
        async fn request_accounts(&self) -> Result<Vec<Address>, AgentError> {
            Ok(vec![ADDR.parse().unwrap()])
        }

        async fn submit_transaction(
            &self,
            _from: &Address,
            to: &Address,
            call_data: &[u8],
        ) -> Result<TxHandle, AgentError> {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            assert_eq!(to.to_hex(), CONTRACT);
            assert_eq!(call_data.len(), 68);
            match self.script {
                Script::Decline => Err(AgentError::Declined),
                Script::ErrorOnSubmit => Err(AgentError::Rpc {
                    code: -32603,
                    message: "insufficient funds".into(),
                }),
                _ => Ok(TxHandle::new("0xabc123")),
            }
        }

        async fn transaction_status(
            &self,
            _handle: &TxHandle,
        ) -> Result<InclusionStatus, AgentError> {
            let n = self.polls.fetch_add(1, Ordering::SeqCst);
            match self.script {
                Script::ConfirmAfter(pending) if n < pending => Ok(InclusionStatus::Pending),
                Script::ConfirmAfter(_) => Ok(InclusionStatus::Included),
                Script::Drop => Ok(InclusionStatus::Dropped),
                _ => Ok(InclusionStatus::Included),
            }
        }
    }

    async fn signer_for_agent<A: SigningAgent + 'static>(agent: Arc<A>) -> Signer {
        let mut session = WalletSession::new(agent);
        session.connect().await.unwrap();
        session.signer().unwrap()
    }

    fn coordinator() -> TransactionCoordinator {
        let mut config = ChainConfig::new(CONTRACT.parse().unwrap());
        config.poll_interval = Duration::from_millis(1);
        TransactionCoordinator::new(config)
    }

    #[tokio::test]
    async fn confirms_after_pending_polls() {
        let agent = Arc::new(ScriptedAgent::new(Script::ConfirmAfter(3)));
        let signer = signer_for_agent(Arc::clone(&agent)).await;
        let coord = coordinator();
        let status = coord.subscribe();

        let tag = Digest::from_hash([1; 32]);
        let hash = Digest::from_hash([2; 32]);
        let confirmed = coord.submit(tag, hash, &signer).await.unwrap();

        assert_eq!(confirmed.receiver_tag, tag);
        assert_eq!(confirmed.document_hash, hash);
        assert_eq!(confirmed.handle.as_str(), "0xabc123");
        assert_eq!(*status.borrow(), TxStatus::Confirmed);
        assert!(agent.polls.load(Ordering::SeqCst) >= 3);
        assert_eq!(agent.prompts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn decline_is_rejected_without_polling() {
        let agent = Arc::new(ScriptedAgent::new(Script::Decline));
        let signer = signer_for_agent(Arc::clone(&agent)).await;
        let coord = coordinator();
        let status = coord.subscribe();

        let err = coord
            .submit(Digest::from_hash([1; 32]), Digest::from_hash([2; 32]), &signer)
            .await
            .unwrap_err();

        assert!(matches!(err, ChainError::Rejected));
        assert_eq!(*status.borrow(), TxStatus::Rejected);
        assert_eq!(agent.polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submit_error_is_failed() {
        let agent = Arc::new(ScriptedAgent::new(Script::ErrorOnSubmit));
        let signer = signer_for_agent(Arc::clone(&agent)).await;
        let coord = coordinator();
        let status = coord.subscribe();

        let err = coord
            .submit(Digest::from_hash([1; 32]), Digest::from_hash([2; 32]), &signer)
            .await
            .unwrap_err();

        assert!(matches!(err, ChainError::Failed(_)));
        assert_eq!(*status.borrow(), TxStatus::Failed);
    }

    #[tokio::test]
    async fn dropped_transaction_is_failed() {
        let agent = Arc::new(ScriptedAgent::new(Script::Drop));
        let signer = signer_for_agent(Arc::clone(&agent)).await;
        let coord = coordinator();

        let err = coord
            .submit(Digest::from_hash([1; 32]), Digest::from_hash([2; 32]), &signer)
            .await
            .unwrap_err();

        assert!(matches!(err, ChainError::Failed(_)));
    }

    /// Agent whose prompt and inclusion answers are gated on semaphores, so
    /// the test can observe each intermediate status deterministically.
    struct GatedAgent {
        prompt_gate: tokio::sync::Semaphore,
        receipt_gate: tokio::sync::Semaphore,
    }

    #[async_trait]
    impl SigningAgent for GatedAgent {
        async fn request_accounts(&self) -> Result<Vec<Address>, AgentError> {
            Ok(vec![ADDR.parse().unwrap()])
        }

        async fn submit_transaction(
            &self,
            _from: &Address,
            _to: &Address,
            _call_data: &[u8],
        ) -> Result<TxHandle, AgentError> {
            let permit = self.prompt_gate.acquire().await.unwrap();
            permit.forget();
            Ok(TxHandle::new("0xgated"))
        }

        async fn transaction_status(
            &self,
            _handle: &TxHandle,
        ) -> Result<InclusionStatus, AgentError> {
            let permit = self.receipt_gate.acquire().await.unwrap();
            permit.forget();
            Ok(InclusionStatus::Included)
        }
    }

    #[tokio::test]
    async fn status_passes_through_intermediate_states() {
        let agent = Arc::new(GatedAgent {
            prompt_gate: tokio::sync::Semaphore::new(0),
            receipt_gate: tokio::sync::Semaphore::new(0),
        });
        let signer = signer_for_agent(Arc::clone(&agent)).await;
        let coord = coordinator();
        let mut status = coord.subscribe();

        let task = tokio::spawn(async move {
            coord
                .submit(Digest::from_hash([1; 32]), Digest::from_hash([2; 32]), &signer)
                .await
        });

        status.changed().await.unwrap();
        assert_eq!(*status.borrow_and_update(), TxStatus::AwaitingSignature);

        agent.prompt_gate.add_permits(1);
        status.changed().await.unwrap();
        assert_eq!(*status.borrow_and_update(), TxStatus::Submitted);

        agent.receipt_gate.add_permits(1);
        let confirmed = task.await.unwrap().unwrap();
        assert_eq!(confirmed.handle.as_str(), "0xgated");
        assert_eq!(*status.borrow_and_update(), TxStatus::Confirmed);
    }
}
