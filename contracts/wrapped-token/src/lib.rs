//! Wrapped Token Contract
//!
//! A cw20-compatible balance ledger whose supply mirrors value locked on
//! another ledger. Only the owner (the token factory) may mint, and burning
//! always spends an allowance the holder granted to the owner.
//!
//! Holders can grant an allowance without an on-chain approval of their own
//! by signing a permit (see [`permit`]); anyone may submit the signed permit.

pub mod contract;
pub mod error;
pub mod msg;
pub mod permit;
pub mod state;

pub use crate::error::ContractError;
pub use crate::permit::{domain_separator, permit_digest, signer_address};
