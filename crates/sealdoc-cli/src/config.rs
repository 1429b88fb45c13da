use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use sealdoc_backend::BackendConfig;
use sealdoc_chain::ChainConfig;
use sealdoc_types::Address;

/// Configuration for the sealdoc CLI.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SealdocConfig {
    /// Base URL of the storage/delivery backend.
    pub backend_url: String,
    /// JSON-RPC endpoint of the signing agent.
    pub agent_url: String,
    /// Address of the document registry contract.
    pub contract: Address,
    /// Receipt poll interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for SealdocConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".into(),
            agent_url: "http://localhost:8545".into(),
            contract: Address::null(),
            poll_interval_ms: 1500,
        }
    }
}

impl SealdocConfig {
    /// Load from a TOML file when given, then apply `SEALDOC_*` environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> anyhow::Result<()> {
        if let Ok(url) = std::env::var("SEALDOC_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Ok(url) = std::env::var("SEALDOC_AGENT_URL") {
            self.agent_url = url;
        }
        if let Ok(contract) = std::env::var("SEALDOC_CONTRACT") {
            self.contract = contract
                .parse()
                .context("parsing SEALDOC_CONTRACT as an address")?;
        }
        Ok(())
    }

    /// The configured contract address, refusing the null placeholder the
    /// defaults ship with.
    pub fn require_contract(&self) -> anyhow::Result<Address> {
        anyhow::ensure!(
            !self.contract.is_null(),
            "no registry contract configured; set `contract` in the config file or SEALDOC_CONTRACT"
        );
        Ok(self.contract)
    }

    pub fn backend(&self) -> BackendConfig {
        BackendConfig::new(self.backend_url.clone())
    }

    pub fn chain(&self) -> ChainConfig {
        let mut chain = ChainConfig::new(self.contract);
        chain.poll_interval = Duration::from_millis(self.poll_interval_ms);
        chain
    }
}
