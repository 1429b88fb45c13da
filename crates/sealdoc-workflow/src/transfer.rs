use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use sealdoc_backend::{DeliveryReceipt, DeliveryRequest, DocumentBackend};
use sealdoc_catalog::DocumentCatalog;
use sealdoc_chain::{ChainConfig, TransactionCoordinator};
use sealdoc_crypto::IdentityHasher;
use sealdoc_types::DocumentId;
use sealdoc_wallet::WalletSession;

use crate::error::WorkflowError;
use crate::phase::TransferPhase;

/// Delivery call retained after its ledger write confirmed, so a retry can
/// re-issue it without touching the ledger.
struct PendingDelivery {
    request: DeliveryRequest,
}

/// Coordinates one document transfer: record the recipient-tagged hash of
/// an already-stored document on the ledger, then order its delivery from
/// the backend.
///
/// The document's content hash is reused from the cached catalog record,
/// never recomputed; transfer does not have the bytes. Unlike upload, a
/// transfer requires an already-connected wallet and fails with
/// [`WorkflowError::WalletRequired`] rather than prompting.
pub struct TransferWorkflow {
    backend: Arc<dyn DocumentBackend>,
    catalog: Arc<DocumentCatalog>,
    chain: ChainConfig,
    phase: watch::Sender<TransferPhase>,
    guard: tokio::sync::Mutex<()>,
    pending: Mutex<Option<PendingDelivery>>,
}

impl TransferWorkflow {
    pub fn new(
        backend: Arc<dyn DocumentBackend>,
        catalog: Arc<DocumentCatalog>,
        chain: ChainConfig,
    ) -> Self {
        let (phase, _) = watch::channel(TransferPhase::Idle);
        Self {
            backend,
            catalog,
            chain,
            phase,
            guard: tokio::sync::Mutex::new(()),
            pending: Mutex::new(None),
        }
    }

    /// Observe phase transitions.
    pub fn subscribe(&self) -> watch::Receiver<TransferPhase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> TransferPhase {
        *self.phase.borrow()
    }

    /// Returns `true` when a failed delivery call is retained for retry.
    pub fn has_pending_delivery(&self) -> bool {
        self.pending.lock().expect("pending lock poisoned").is_some()
    }

    fn transition(&self, to: TransferPhase) {
        debug!(phase = %to, "transfer phase");
        self.phase.send_replace(to);
    }

    /// Run the transfer workflow end to end.
    ///
    /// On [`WorkflowError::DeliverFailed`] the ledger write is already
    /// durable; call [`retry_delivery`](TransferWorkflow::retry_delivery)
    /// to re-issue the delivery order alone.
    pub async fn send(
        &self,
        document_id: DocumentId,
        recipient_email: String,
        session: &WalletSession,
    ) -> Result<DeliveryReceipt, WorkflowError> {
        let _guard = self.guard.try_lock().map_err(|_| WorkflowError::WorkflowBusy)?;

        self.transition(TransferPhase::Validating);
        if recipient_email.trim().is_empty() {
            self.transition(TransferPhase::Idle);
            return Err(WorkflowError::Validation("enter a recipient email".into()));
        }
        let record = match self.catalog.get(&document_id) {
            Some(record) => record,
            None => {
                self.transition(TransferPhase::Idle);
                return Err(WorkflowError::Validation(format!(
                    "unknown document id {}",
                    document_id.as_str()
                )));
            }
        };
        let signer = match session.signer() {
            Ok(signer) => signer,
            Err(err) => {
                self.transition(TransferPhase::Idle);
                return Err(WorkflowError::WalletRequired(err));
            }
        };

        // A fresh transfer supersedes any delivery retained from an earlier
        // run.
        self.pending.lock().expect("pending lock poisoned").take();

        let receiver_tag = IdentityHasher::hash_identity(&recipient_email);

        self.transition(TransferPhase::AwaitingSignature);
        let coordinator = TransactionCoordinator::new(self.chain.clone());
        let transaction = match coordinator
            .submit(receiver_tag, record.content_hash, &signer)
            .await
        {
            Ok(tx) => tx,
            Err(err) => {
                let classified = WorkflowError::from(err);
                self.transition(match classified {
                    WorkflowError::Rejected => TransferPhase::Rejected,
                    _ => TransferPhase::ChainFailed,
                });
                return Err(classified);
            }
        };
        self.transition(TransferPhase::TxConfirmed);

        let request = DeliveryRequest {
            document_id,
            recipient_email,
            wallet_address: *signer.address(),
            document_hash: record.content_hash,
            receiver_tag,
        };

        self.transition(TransferPhase::Delivering);
        match self.backend.send_document(&request).await {
            Ok(receipt) => {
                info!(
                    hash = %receipt.document_hash,
                    tx = %transaction.handle,
                    "transfer completed"
                );
                self.transition(TransferPhase::Completed);
                Ok(receipt)
            }
            Err(remote) => {
                warn!(error = %remote, "delivery failed after confirmed ledger write");
                *self.pending.lock().expect("pending lock poisoned") =
                    Some(PendingDelivery { request });
                self.transition(TransferPhase::DeliverFailed);
                Err(WorkflowError::DeliverFailed(remote))
            }
        }
    }

    /// Re-issue the delivery order after a [`WorkflowError::DeliverFailed`]
    /// outcome.
    ///
    /// Reuses the retained request built from the confirmed transaction:
    /// the signing agent is not prompted and the ledger write is not
    /// repeated. Fails with `Validation` when no delivery is pending.
    pub async fn retry_delivery(&self) -> Result<DeliveryReceipt, WorkflowError> {
        let _guard = self.guard.try_lock().map_err(|_| WorkflowError::WorkflowBusy)?;

        let PendingDelivery { request } = self
            .pending
            .lock()
            .expect("pending lock poisoned")
            .take()
            .ok_or_else(|| WorkflowError::Validation("no failed delivery to retry".into()))?;

        self.transition(TransferPhase::Delivering);
        match self.backend.send_document(&request).await {
            Ok(receipt) => {
                info!(hash = %receipt.document_hash, "delivery retry completed");
                self.transition(TransferPhase::Completed);
                Ok(receipt)
            }
            Err(remote) => {
                warn!(error = %remote, "delivery retry failed");
                *self.pending.lock().expect("pending lock poisoned") =
                    Some(PendingDelivery { request });
                self.transition(TransferPhase::DeliverFailed);
                Err(WorkflowError::DeliverFailed(remote))
            }
        }
    }
}
