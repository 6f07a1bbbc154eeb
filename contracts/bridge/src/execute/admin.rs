//! Admin handlers: fee, emergency withdrawal and role management.

use cosmwasm_std::{to_json_binary, DepsMut, Env, Event, MessageInfo, Response, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use common::access_control::{self, ensure_role};
use common::validation::require_address;
use common::Role;

use super::cw20_balance;
use crate::error::ContractError;
use crate::state::CONFIG;

/// Update the tracked fee.
pub fn execute_set_fee(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, Role::Admin, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    let previous = config.fee;
    config.fee = amount;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_fee")
        .add_attribute("previous_fee", previous)
        .add_attribute("fee", amount))
}

/// Sweep the contract's whole balance of `token` to `to`.
pub fn execute_withdraw_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    to: String,
) -> Result<Response, ContractError> {
    require_address(&token, "token")?;
    require_address(&to, "to")?;
    ensure_role(deps.storage, Role::Admin, &info.sender)?;

    let token_addr = deps.api.addr_validate(&token)?;
    let recipient = deps.api.addr_validate(&to)?;
    let amount = cw20_balance(&deps.querier, &token_addr, &env.contract.address)?;

    let mut response = Response::new();
    if !amount.is_zero() {
        response = response.add_message(WasmMsg::Execute {
            contract_addr: token_addr.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: recipient.to_string(),
                amount,
            })?,
            funds: vec![],
        });
    }

    Ok(response
        .add_event(
            Event::new("withdraw_token")
                .add_attribute("token", &token_addr)
                .add_attribute("to", &recipient)
                .add_attribute("amount", amount),
        )
        .add_attribute("method", "withdraw_token"))
}

// ============================================================================
// Roles
// ============================================================================

pub fn execute_grant_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    account: String,
) -> Result<Response, ContractError> {
    require_address(&account, "account")?;
    let account = deps.api.addr_validate(&account)?;
    let event = access_control::grant_role(deps.storage, &info.sender, role, &account)?;

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "grant_role"))
}

pub fn execute_revoke_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    account: String,
) -> Result<Response, ContractError> {
    require_address(&account, "account")?;
    let account = deps.api.addr_validate(&account)?;
    let event = access_control::revoke_role(deps.storage, &info.sender, role, &account)?;

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "revoke_role"))
}

pub fn execute_renounce_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    account: String,
) -> Result<Response, ContractError> {
    require_address(&account, "account")?;
    let account = deps.api.addr_validate(&account)?;
    let event = access_control::renounce_role(deps.storage, &info.sender, role, &account)?;

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "renounce_role"))
}
