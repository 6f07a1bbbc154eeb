use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// Code id of the wrapped token contract
    pub token_code_id: u64,
    /// Bech32 account prefix, forwarded to each wrapped token
    pub signer_prefix: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deploy a wrapped token and register it under `symbol`
    ///
    /// Authorization: Owner only
    CreateWerc20 { name: String, symbol: String },

    /// Mint `amount` of the token registered under `symbol` to `to`
    ///
    /// Authorization: Owner only
    Mint {
        symbol: String,
        to: String,
        amount: Uint128,
    },

    /// Burn `amount` of `token_address` held by `from`.
    /// `from` must have approved the factory for at least `amount`.
    ///
    /// Authorization: Owner only
    Burn {
        token_address: String,
        from: String,
        amount: Uint128,
    },

    /// Caller's balance of the token under `symbol`, returned as response
    /// data (`cw20::BalanceResponse`)
    MyBalanceOf { symbol: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Token registered under `symbol`, if any
    #[returns(Werc20Response)]
    GetWerc20 { symbol: String },

    #[returns(cw20::BalanceResponse)]
    BalanceOf { symbol: String, holder: String },

    #[returns(OwnerResponse)]
    Owner {},

    /// Registered tokens ordered by symbol
    #[returns(TokensResponse)]
    Tokens {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct Werc20Response {
    pub address: Option<Addr>,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[cw_serde]
pub struct TokenEntry {
    pub symbol: String,
    pub address: Addr,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<TokenEntry>,
}
