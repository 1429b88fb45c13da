//! Wallet session management and the external signing agent boundary.
//!
//! The signing agent holds the private key material; sealdoc only consumes
//! it. [`WalletSession`] tracks the connect handshake and hands out a
//! [`Signer`] capability once an account is active. State changes only in
//! direct response to a caller-triggered operation — there is no background
//! polling here.

pub mod agent;
pub mod error;
pub mod rpc;
pub mod session;

pub use agent::{InclusionStatus, SigningAgent, TxHandle};
pub use error::{AgentError, WalletError};
pub use rpc::RpcSigningAgent;
pub use session::{Signer, WalletSession};
