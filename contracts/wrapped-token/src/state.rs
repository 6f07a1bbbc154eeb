use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:wrapped-token";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    /// Only address allowed to mint and burn
    pub owner: Addr,
    /// Bech32 prefix used to derive permit signer addresses
    pub signer_prefix: String,
}

#[cw_serde]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const TOKEN_INFO: Item<TokenInfo> = Item::new("token_info");

/// holder => balance
pub const BALANCES: Map<&Addr, Uint128> = Map::new("balances");

/// (owner, spender) => allowance
pub const ALLOWANCES: Map<(&Addr, &Addr), Uint128> = Map::new("allowances");

/// holder => next permit nonce
pub const NONCES: Map<&Addr, u64> = Map::new("nonces");
