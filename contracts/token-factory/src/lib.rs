//! Token Factory Contract
//!
//! Keeps a `symbol => wrapped token` registry and is the owner of every
//! token it deploys, so every mint and burn of a wrapped token goes through
//! here. The factory itself is owned by whoever instantiated it (the bridge).

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
