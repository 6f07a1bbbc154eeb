//! Bridge relayer - Library interface
//!
//! Receives authenticated webhook requests describing a transfer observed on
//! the source chain and completes it on this chain's bridge contract.

pub mod config;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod relay;
pub mod replay_cache;
pub mod request;
pub mod server;
pub mod terra_client;

pub use error::RequestError;
pub use executor::BridgeExecutor;
