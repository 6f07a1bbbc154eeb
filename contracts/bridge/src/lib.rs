//! Bridge Contract
//!
//! Holds native tokens locked for transfer to another chain and completes
//! transfers arriving from other chains by minting wrapped tokens through
//! the token factory it instantiates and owns. The reverse direction burns
//! wrapped tokens here and releases locked native tokens on the source chain.
//!
//! The implementation is split into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//!
//! Completing a transfer (mint or release) requires the relayer role; role
//! management lives in `common::access_control`.

pub mod contract;
pub mod error;
pub mod execute;
pub mod msg;
pub mod query;
pub mod state;

pub use crate::error::ContractError;
