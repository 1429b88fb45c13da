use std::time::Duration;

use sealdoc_types::Address;

/// Configuration for ledger submission.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    /// Address of the document registry contract.
    pub contract: Address,
    /// Pacing between confirmation polls. This is not a timeout: the
    /// confirmation wait itself is unbounded by design.
    pub poll_interval: Duration,
}

impl ChainConfig {
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            poll_interval: Duration::from_millis(1500),
        }
    }
}
