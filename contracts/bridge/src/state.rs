//! State definitions for the bridge contract.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:bridge";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Reply IDs
// ============================================================================

pub const INSTANTIATE_FACTORY_REPLY_ID: u64 = 1;
pub const CREATE_WRAPPED_REPLY_ID: u64 = 2;

// ============================================================================
// Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    /// Bridge fee in token base units. Tracked only, never charged.
    pub fee: Uint128,
    /// Chain id this bridge instance runs on
    pub chain_id: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Token factory owned by this contract, set by the instantiate reply
pub const FACTORY: Item<Addr> = Item::new("factory");

// ============================================================================
// Token mappings
// ============================================================================

/// Wrapped counterpart of a native token from another chain
#[cw_serde]
pub struct WrappedToken {
    pub address: Addr,
    /// Symbol the wrapped token is registered under in the factory
    pub symbol: String,
}

/// Native token addresses are foreign-chain identifiers, keyed by
/// [`native_token_key`].
/// Key: native token, Value: wrapped token
pub const NATIVE_TO_WRAPPED: Map<&str, WrappedToken> = Map::new("native_to_wrapped");

/// Canonical spelling of a native token id. `0x` hex addresses are
/// case-insensitive (checksummed and lowercase name the same token), so
/// they are lowercased. Other ids are only trimmed.
pub fn native_token_key(native_token: &str) -> String {
    let id = native_token.trim();
    let is_hex = id.len() > 2
        && id[..2].eq_ignore_ascii_case("0x")
        && id[2..].bytes().all(|b| b.is_ascii_hexdigit());
    if is_hex {
        id.to_ascii_lowercase()
    } else {
        id.to_string()
    }
}

/// Key: wrapped token, Value: native token
pub const WRAPPED_TO_NATIVE: Map<&Addr, String> = Map::new("wrapped_to_native");

/// Wrapped token creation awaiting its reply
#[cw_serde]
pub struct PendingWrap {
    pub native_token: String,
    pub wrapped_symbol: String,
}

pub const PENDING_WRAP: Item<PendingWrap> = Item::new("pending_wrap");

// ============================================================================
// Replay protection
// ============================================================================

/// Nonce stamped on the next outgoing transfer or burn
pub const OUTGOING_NONCE: Item<u64> = Item::new("outgoing_nonce");

/// Completed incoming transfers.
/// Key: transfer id, Value: block height it was processed at
pub const PROCESSED: Map<&str, u64> = Map::new("processed");
