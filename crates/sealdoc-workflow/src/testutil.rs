//! Shared fakes for workflow tests: a scripted signing agent and an
//! in-memory backend that can be made to fail or stall on demand.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use sealdoc_backend::{DeliveryReceipt, DeliveryRequest, DocumentBackend, NewDocument, RemoteError};
use sealdoc_chain::ChainConfig;
use sealdoc_types::{Address, DocumentId, DocumentRecord};
use sealdoc_wallet::{AgentError, InclusionStatus, SigningAgent, TxHandle, WalletSession};

pub(crate) const ADDR: &str = "0x121b48de8be585ffe1a7b4f5a7dfe24bc792a34f";
pub(crate) const CONTRACT: &str = "0x00000000000000000000000000000000000000cc";

/// How the fake agent answers its signing prompt.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Prompt {
    Approve,
    Decline,
    Error,
    DeclineConnect,
}

pub(crate) struct FakeAgent {
    prompt: Prompt,
    /// Number of signing prompts shown so far.
    pub prompts: AtomicUsize,
}

impl FakeAgent {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            prompt,
            prompts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SigningAgent for FakeAgent {
    async fn request_accounts(&self) -> Result<Vec<Address>, AgentError> {
        match self.prompt {
            Prompt::DeclineConnect => Err(AgentError::Declined),
            _ => Ok(vec![ADDR.parse().unwrap()]),
        }
    }

    async fn submit_transaction(
        &self,
        _from: &Address,
        _to: &Address,
        _call_data: &[u8],
    ) -> Result<TxHandle, AgentError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        match self.prompt {
            Prompt::Decline => Err(AgentError::Declined),
            Prompt::Error => Err(AgentError::Rpc {
                code: -32603,
                message: "internal agent error".into(),
            }),
            _ => Ok(TxHandle::new("0xtx1")),
        }
    }

    async fn transaction_status(&self, _handle: &TxHandle) -> Result<InclusionStatus, AgentError> {
        Ok(InclusionStatus::Included)
    }
}

/// A connected session backed by a fake agent.
pub(crate) async fn session(prompt: Prompt) -> (WalletSession, Arc<FakeAgent>) {
    let (mut session, agent) = disconnected_session(prompt);
    session.connect().await.unwrap();
    (session, agent)
}

/// A fresh, not-yet-connected session backed by a fake agent.
pub(crate) fn disconnected_session(prompt: Prompt) -> (WalletSession, Arc<FakeAgent>) {
    let agent = Arc::new(FakeAgent::new(prompt));
    (WalletSession::new(Arc::clone(&agent) as Arc<dyn SigningAgent>), agent)
}

pub(crate) fn chain_config() -> ChainConfig {
    let mut config = ChainConfig::new(CONTRACT.parse().unwrap());
    config.poll_interval = Duration::from_millis(1);
    config
}

/// In-memory stand-in for the storage/delivery backend.
pub(crate) struct FakeBackend {
    records: Mutex<Vec<DocumentRecord>>,
    next_id: AtomicUsize,
    pub stores: AtomicUsize,
    pub sends: AtomicUsize,
    pub lists: AtomicUsize,
    fail_stores: AtomicUsize,
    fail_sends: AtomicUsize,
    hold: AtomicBool,
    entered: Semaphore,
    gate: Semaphore,
    hold_send: AtomicBool,
    send_entered: Semaphore,
    send_gate: Semaphore,
    /// Last delivery request seen, for asserting on wire values.
    pub last_send: Mutex<Option<DeliveryRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            stores: AtomicUsize::new(0),
            sends: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
            fail_stores: AtomicUsize::new(0),
            fail_sends: AtomicUsize::new(0),
            hold: AtomicBool::new(false),
            entered: Semaphore::new(0),
            gate: Semaphore::new(0),
            hold_send: AtomicBool::new(false),
            send_entered: Semaphore::new(0),
            send_gate: Semaphore::new(0),
            last_send: Mutex::new(None),
        }
    }

    /// Pre-populate the stored records.
    pub fn seed(&self, records: Vec<DocumentRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn records(&self) -> Vec<DocumentRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Fail the next `n` store calls with HTTP 500.
    pub fn fail_next_stores(&self, n: usize) {
        self.fail_stores.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` send calls with HTTP 500.
    pub fn fail_next_sends(&self, n: usize) {
        self.fail_sends.store(n, Ordering::SeqCst);
    }

    /// Make store calls block until [`release_stores`](Self::release_stores).
    pub fn hold_stores(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub fn release_stores(&self) {
        self.hold.store(false, Ordering::SeqCst);
        self.gate.add_permits(1);
    }

    /// Wait until a held store call has been entered.
    pub async fn wait_until_store_entered(&self) {
        let permit = self.entered.acquire().await.unwrap();
        permit.forget();
    }

    /// Make send calls block until [`release_sends`](Self::release_sends).
    pub fn hold_sends(&self) {
        self.hold_send.store(true, Ordering::SeqCst);
    }

    pub fn release_sends(&self) {
        self.hold_send.store(false, Ordering::SeqCst);
        self.send_gate.add_permits(1);
    }

    /// Wait until a held send call has been entered.
    pub async fn wait_until_send_entered(&self) {
        let permit = self.send_entered.acquire().await.unwrap();
        permit.forget();
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn server_error() -> RemoteError {
        RemoteError::Status {
            status: 500,
            snippet: "internal server error".into(),
        }
    }
}

#[async_trait]
impl DocumentBackend for FakeBackend {
    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, RemoteError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        Ok(self.records())
    }

    async fn store_document(
        &self,
        document: &NewDocument,
    ) -> Result<Option<Vec<DocumentRecord>>, RemoteError> {
        self.stores.fetch_add(1, Ordering::SeqCst);
        if self.hold.load(Ordering::SeqCst) {
            self.entered.add_permits(1);
            let permit = self.gate.acquire().await.unwrap();
            permit.forget();
        }
        if Self::take_failure(&self.fail_stores) {
            return Err(Self::server_error());
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = DocumentRecord {
            id: DocumentId::new(format!("doc-{id}")),
            filename: document.filename.clone(),
            category: document.category,
            description: document.description.clone(),
            content_hash: document.document_hash,
        };
        let mut records = self.records.lock().unwrap();
        records.push(record);
        Ok(Some(records.clone()))
    }

    async fn send_document(
        &self,
        request: &DeliveryRequest,
    ) -> Result<DeliveryReceipt, RemoteError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        *self.last_send.lock().unwrap() = Some(request.clone());
        if self.hold_send.load(Ordering::SeqCst) {
            self.send_entered.add_permits(1);
            let permit = self.send_gate.acquire().await.unwrap();
            permit.forget();
        }
        if Self::take_failure(&self.fail_sends) {
            return Err(Self::server_error());
        }
        let records = self.records.lock().unwrap();
        let record = records
            .iter()
            .find(|r| r.id == request.document_id)
            .ok_or_else(|| RemoteError::Backend("unknown document".into()))?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(DeliveryReceipt {
            file_id: format!("file-{id}"),
            email_id: format!("email-{id}"),
            document_hash: record.content_hash,
        })
    }
}
