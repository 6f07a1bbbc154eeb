//! Query handlers for the bridge contract.

use cosmwasm_std::{Deps, Env, StdResult};

use common::access_control::{has_role, role_admin, role_members};
use common::Role;

use crate::execute::cw20_balance;
use crate::msg::{
    ConfigResponse, FactoryResponse, FeeResponse, HasRoleResponse, IsProcessedResponse,
    LockedBalanceResponse, NativeToWrappedResponse, NonceResponse, RoleAdminResponse,
    RoleMembersResponse, WrappedToNativeResponse,
};
use crate::state::{
    native_token_key, CONFIG, FACTORY, NATIVE_TO_WRAPPED, OUTGOING_NONCE, PROCESSED,
    WRAPPED_TO_NATIVE,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        fee: config.fee,
        factory: FACTORY.load(deps.storage)?,
        chain_id: config.chain_id,
    })
}

pub fn query_fee(deps: Deps) -> StdResult<FeeResponse> {
    Ok(FeeResponse {
        fee: CONFIG.load(deps.storage)?.fee,
    })
}

pub fn query_factory(deps: Deps) -> StdResult<FactoryResponse> {
    Ok(FactoryResponse {
        factory: FACTORY.load(deps.storage)?,
    })
}

// ============================================================================
// Roles
// ============================================================================

pub fn query_has_role(deps: Deps, role: Role, account: String) -> StdResult<HasRoleResponse> {
    let account = deps.api.addr_validate(&account)?;
    Ok(HasRoleResponse {
        has_role: has_role(deps.storage, role, &account),
    })
}

pub fn query_role_admin(deps: Deps, role: Role) -> StdResult<RoleAdminResponse> {
    Ok(RoleAdminResponse {
        admin_role: role_admin(deps.storage, role)?,
    })
}

pub fn query_role_members(
    deps: Deps,
    role: Role,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<RoleMembersResponse> {
    let start = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    Ok(RoleMembersResponse {
        members: role_members(deps.storage, role, start.as_ref(), limit)?,
    })
}

// ============================================================================
// Mappings and replay state
// ============================================================================

pub fn query_native_to_wrapped(
    deps: Deps,
    native_token: String,
) -> StdResult<NativeToWrappedResponse> {
    let wrapped = NATIVE_TO_WRAPPED.may_load(deps.storage, &native_token_key(&native_token))?;
    Ok(NativeToWrappedResponse {
        wrapped_token: wrapped.as_ref().map(|w| w.address.clone()),
        wrapped_symbol: wrapped.map(|w| w.symbol),
    })
}

pub fn query_wrapped_to_native(
    deps: Deps,
    wrapped_token: String,
) -> StdResult<WrappedToNativeResponse> {
    let wrapped_token = deps.api.addr_validate(&wrapped_token)?;
    Ok(WrappedToNativeResponse {
        native_token: WRAPPED_TO_NATIVE.may_load(deps.storage, &wrapped_token)?,
    })
}

pub fn query_is_processed(deps: Deps, transfer_id: String) -> StdResult<IsProcessedResponse> {
    Ok(IsProcessedResponse {
        processed: PROCESSED.has(deps.storage, &transfer_id),
    })
}

pub fn query_current_nonce(deps: Deps) -> StdResult<NonceResponse> {
    Ok(NonceResponse {
        nonce: OUTGOING_NONCE.may_load(deps.storage)?.unwrap_or(0),
    })
}

pub fn query_locked_balance(deps: Deps, env: Env, token: String) -> StdResult<LockedBalanceResponse> {
    let token_addr = deps.api.addr_validate(&token)?;
    let amount = cw20_balance(&deps.querier, &token_addr, &env.contract.address)?;
    Ok(LockedBalanceResponse { token, amount })
}
