//! Message types for the wrapped token contract.
//!
//! `Transfer`, `TransferFrom`, `Mint` and `BurnFrom` share their JSON shape
//! with `cw20::Cw20ExecuteMsg`, and the balance/allowance/token info queries
//! answer with the cw20 response types, so other contracts can drive this
//! token through the plain cw20 interface.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Bech32 prefix of this chain's accounts, used to derive permit signers
    pub signer_prefix: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Move tokens from the sender to `recipient`
    Transfer { recipient: String, amount: Uint128 },

    /// Set the sender's allowance for `spender` to exactly `amount`
    Approve { spender: String, amount: Uint128 },

    /// Move tokens from `owner` to `recipient`, spending the sender's allowance
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },

    /// Set allowance(owner, spender) = value from a message signed by `owner`
    ///
    /// Authorization: Anyone holding a valid signature
    Permit {
        owner: String,
        spender: String,
        value: Uint128,
        /// Unix seconds after which the signature is rejected
        deadline: u64,
        /// Raw 32-byte ed25519 public key of `owner`
        public_key: Binary,
        /// 64-byte ed25519 signature over the permit digest
        signature: Binary,
    },

    /// Create new tokens
    ///
    /// Authorization: Owner only
    Mint { recipient: String, amount: Uint128 },

    /// Destroy tokens held by `owner`, spending the allowance `owner` granted
    /// to the token owner
    ///
    /// Authorization: Owner only
    BurnFrom { owner: String, amount: Uint128 },
}

/// Signed allowance grant carried by callers that submit a permit on a
/// holder's behalf. Owner and spender are fixed by the caller's context.
#[cw_serde]
pub struct PermitSignature {
    pub value: Uint128,
    pub deadline: u64,
    pub public_key: Binary,
    pub signature: Binary,
}

impl PermitSignature {
    /// The `Permit` message granting `spender` an allowance over `owner`'s tokens.
    pub fn into_msg(self, owner: impl Into<String>, spender: impl Into<String>) -> ExecuteMsg {
        ExecuteMsg::Permit {
            owner: owner.into(),
            spender: spender.into(),
            value: self.value,
            deadline: self.deadline,
            public_key: self.public_key,
            signature: self.signature,
        }
    }
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(cw20::BalanceResponse)]
    Balance { address: String },

    #[returns(cw20::AllowanceResponse)]
    Allowance { owner: String, spender: String },

    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},

    /// Next permit nonce of `owner`
    #[returns(NonceResponse)]
    Nonce { owner: String },

    /// Domain separator bound into every permit digest of this token
    #[returns(DomainSeparatorResponse)]
    DomainSeparator {},

    #[returns(OwnerResponse)]
    Owner {},
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct DomainSeparatorResponse {
    pub domain_separator: Binary,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}
