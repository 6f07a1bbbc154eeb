use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:token-factory";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reply id for wrapped token instantiation
pub const CREATE_TOKEN_REPLY_ID: u64 = 1;

/// Decimals of every wrapped token
pub const WRAPPED_DECIMALS: u8 = 18;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// Code id instantiated for each new wrapped token
    pub token_code_id: u64,
    /// Bech32 prefix handed to tokens for permit signer derivation
    pub signer_prefix: String,
}

/// Token being instantiated, registered when the reply arrives
#[cw_serde]
pub struct PendingToken {
    pub name: String,
    pub symbol: String,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const PENDING_TOKEN: Item<PendingToken> = Item::new("pending_token");

/// Registered tokens.
/// Key: symbol, Value: wrapped token contract
pub const TOKENS: Map<&str, Addr> = Map::new("tokens");
