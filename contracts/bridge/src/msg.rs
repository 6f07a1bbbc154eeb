//! Message types for the bridge contract.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use common::Role;
pub use wrapped_token::msg::PermitSignature;

// ============================================================================
// Instantiate
// ============================================================================

#[cw_serde]
pub struct InstantiateMsg {
    /// Initial admin
    pub admin: String,
    /// Initial relayers
    pub relayers: Vec<String>,
    /// Chain id of the chain this bridge runs on
    pub chain_id: u64,
    /// Initial fee
    pub fee: Uint128,
    /// Code id of the token factory to instantiate
    pub factory_code_id: u64,
    /// Code id of the wrapped token, handed to the factory
    pub token_code_id: u64,
    /// Bech32 account prefix, used by wrapped tokens to derive permit signers
    pub signer_prefix: String,
}

// ============================================================================
// Execute
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outgoing
    // ========================================================================
    /// Lock `amount` of `token` held by `user` for transfer to `target_chain_id`.
    ///
    /// Without `permit`, `user` must have approved this contract for at
    /// least `amount`. With `permit`, the signed grant is applied first.
    InitiateTransfer {
        user: String,
        token: String,
        target_chain_id: u64,
        amount: Uint128,
        token_name: String,
        token_symbol: String,
        permit: Option<PermitSignature>,
    },

    /// Burn `amount` of the wrapped token under `symbol` held by `user`,
    /// releasing the native token on its home chain.
    ///
    /// Without `permit`, `user` must have approved the token factory for at
    /// least `amount`. With `permit`, the signed grant (spender = factory)
    /// is applied first.
    BurnWrappedToken {
        symbol: String,
        amount: Uint128,
        user: String,
        permit: Option<PermitSignature>,
    },

    // ========================================================================
    // Incoming
    // ========================================================================
    /// Complete a transfer locked on another chain by minting its wrapped
    /// token to `to`. Creates the wrapped token on first use.
    ///
    /// Authorization: Relayer only
    MintToken {
        symbol: String,
        token_name: String,
        to: String,
        native_token: String,
        amount: Uint128,
        /// Identifier of the source event, accepted once
        transfer_id: String,
    },

    /// Complete a burn on another chain by releasing locked native tokens.
    ///
    /// Authorization: Relayer only
    UnwrapToken {
        to: String,
        token: String,
        amount: Uint128,
        /// Identifier of the source event, accepted once
        transfer_id: String,
    },

    // ========================================================================
    // Admin
    // ========================================================================
    /// Send the whole balance of `token` held by this contract to `to`.
    ///
    /// Authorization: Admin only
    WithdrawToken { token: String, to: String },

    /// Authorization: Admin only
    SetFee { amount: Uint128 },

    // ========================================================================
    // Roles
    // ========================================================================
    /// Authorization: admin role of `role`
    GrantRole { role: Role, account: String },

    /// Authorization: admin role of `role`
    RevokeRole { role: Role, account: String },

    /// Authorization: `account` itself
    RenounceRole { role: Role, account: String },
}

// ============================================================================
// Query
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(FeeResponse)]
    Fee {},

    #[returns(FactoryResponse)]
    Factory {},

    #[returns(HasRoleResponse)]
    HasRole { role: Role, account: String },

    #[returns(RoleAdminResponse)]
    RoleAdmin { role: Role },

    #[returns(RoleMembersResponse)]
    RoleMembers {
        role: Role,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(NativeToWrappedResponse)]
    NativeToWrapped { native_token: String },

    #[returns(WrappedToNativeResponse)]
    WrappedToNative { wrapped_token: String },

    #[returns(IsProcessedResponse)]
    IsProcessed { transfer_id: String },

    /// Nonce the next outgoing transfer or burn will carry
    #[returns(NonceResponse)]
    CurrentNonce {},

    /// Amount of `token` held in custody
    #[returns(LockedBalanceResponse)]
    LockedBalance { token: String },
}

// ============================================================================
// Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub fee: Uint128,
    pub factory: Addr,
    pub chain_id: u64,
}

#[cw_serde]
pub struct FeeResponse {
    pub fee: Uint128,
}

#[cw_serde]
pub struct FactoryResponse {
    pub factory: Addr,
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}

#[cw_serde]
pub struct RoleAdminResponse {
    pub admin_role: Role,
}

#[cw_serde]
pub struct RoleMembersResponse {
    pub members: Vec<Addr>,
}

#[cw_serde]
pub struct NativeToWrappedResponse {
    pub wrapped_token: Option<Addr>,
    pub wrapped_symbol: Option<String>,
}

#[cw_serde]
pub struct WrappedToNativeResponse {
    pub native_token: Option<String>,
}

#[cw_serde]
pub struct IsProcessedResponse {
    pub processed: bool,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct LockedBalanceResponse {
    pub token: String,
    pub amount: Uint128,
}
