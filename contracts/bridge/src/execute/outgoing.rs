//! Outgoing handlers: lock native tokens and burn wrapped tokens.
//!
//! Either call may be submitted by anyone. The holder's consent is the
//! allowance (or signed permit) they granted, never the message sender.

use cosmwasm_std::{to_json_binary, DepsMut, Env, Event, MessageInfo, Response, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use common::validation::{require_address, require_amount, require_symbol};
use token_factory::msg::{
    ExecuteMsg as FactoryExecuteMsg, QueryMsg as FactoryQueryMsg, Werc20Response,
};

use super::{authorise_spend, ensure_balance, next_nonce, non_empty};
use crate::error::ContractError;
use crate::msg::PermitSignature;
use crate::state::{CONFIG, FACTORY, WRAPPED_TO_NATIVE};

/// Lock `amount` of a native cw20 token in this contract.
#[allow(clippy::too_many_arguments)]
pub fn execute_initiate_transfer(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    user: String,
    token: String,
    target_chain_id: u64,
    amount: Uint128,
    token_name: String,
    token_symbol: String,
    permit: Option<PermitSignature>,
) -> Result<Response, ContractError> {
    require_address(&user, "user")?;
    require_address(&token, "token")?;
    require_amount(amount)?;

    let user_addr = deps.api.addr_validate(&user)?;
    let token_addr = deps.api.addr_validate(&token)?;
    let bridge = env.contract.address;

    ensure_balance(&deps.querier, &token_addr, &user_addr, amount)?;

    let mut messages: Vec<WasmMsg> =
        authorise_spend(&deps.querier, &token_addr, &user_addr, &bridge, amount, permit)?
            .into_iter()
            .collect();
    let via_permit = !messages.is_empty();
    messages.push(WasmMsg::Execute {
        contract_addr: token_addr.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: user_addr.to_string(),
            recipient: bridge.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    let config = CONFIG.load(deps.storage)?;
    let nonce = next_nonce(deps.storage)?;

    let event = Event::new("transfer_initiated")
        .add_attribute("user", &user_addr)
        .add_attribute("token", &token_addr)
        .add_attribute("amount", amount)
        .add_attribute("source_chain_id", config.chain_id.to_string())
        .add_attribute("target_chain_id", target_chain_id.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attributes(non_empty([
            ("token_symbol", token_symbol),
            ("token_name", token_name),
        ]));

    Ok(Response::new()
        .add_messages(messages)
        .add_event(event)
        .add_attribute("method", "initiate_transfer")
        .add_attribute("via_permit", via_permit.to_string()))
}

/// Burn `amount` of a wrapped token through the factory.
pub fn execute_burn_wrapped_token(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    symbol: String,
    amount: Uint128,
    user: String,
    permit: Option<PermitSignature>,
) -> Result<Response, ContractError> {
    require_address(&user, "user")?;
    require_amount(amount)?;
    require_symbol(&symbol)?;

    let user_addr = deps.api.addr_validate(&user)?;
    let factory = FACTORY.load(deps.storage)?;

    let registered: Werc20Response = deps.querier.query_wasm_smart(
        &factory,
        &FactoryQueryMsg::GetWerc20 {
            symbol: symbol.clone(),
        },
    )?;
    let wrapped = registered
        .address
        .ok_or_else(|| ContractError::WrapTokenDoesNotExist {
            symbol: symbol.clone(),
        })?;

    ensure_balance(&deps.querier, &wrapped, &user_addr, amount)?;

    let mut messages: Vec<WasmMsg> =
        authorise_spend(&deps.querier, &wrapped, &user_addr, &factory, amount, permit)?
            .into_iter()
            .collect();
    let via_permit = !messages.is_empty();
    messages.push(WasmMsg::Execute {
        contract_addr: factory.to_string(),
        msg: to_json_binary(&FactoryExecuteMsg::Burn {
            token_address: wrapped.to_string(),
            from: user_addr.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    let native_token = WRAPPED_TO_NATIVE
        .may_load(deps.storage, &wrapped)?
        .unwrap_or_default();
    let config = CONFIG.load(deps.storage)?;
    let nonce = next_nonce(deps.storage)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_event(
            Event::new("burned_token")
                .add_attribute("user", &user_addr)
                .add_attribute("wrapped_token", &wrapped)
                .add_attribute("symbol", symbol)
                .add_attribute("amount", amount)
                .add_attribute("chain_id", config.chain_id.to_string())
                .add_attribute("nonce", nonce.to_string())
                .add_attributes(non_empty([("native_token", native_token)])),
        )
        .add_attribute("method", "burn_wrapped_token")
        .add_attribute("via_permit", via_permit.to_string()))
}
