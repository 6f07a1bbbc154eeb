//! Incoming handlers: complete transfers observed on another chain.
//!
//! Both handlers are relayer-only and accept each `transfer_id` once.

use cosmwasm_std::{
    to_json_binary, DepsMut, Env, Event, MessageInfo, Response, SubMsg, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::access_control::ensure_role;
use common::validation::{
    require_address, require_amount, require_name, require_symbol, require_transfer_id,
};
use common::Role;
use token_factory::msg::{
    ExecuteMsg as FactoryExecuteMsg, QueryMsg as FactoryQueryMsg, Werc20Response,
};

use super::{ensure_balance, mark_processed};
use crate::error::ContractError;
use crate::state::{
    native_token_key, PendingWrap, CONFIG, CREATE_WRAPPED_REPLY_ID, FACTORY, NATIVE_TO_WRAPPED,
    PENDING_WRAP,
};

/// Symbol of the wrapped token created for a native token symbol.
pub fn wrapped_symbol(symbol: &str) -> String {
    format!("W{}", symbol)
}

/// Name of the wrapped token created for a native token name.
pub fn wrapped_name(token_name: &str) -> String {
    format!("Wrapped {}", token_name)
}

/// Mint the wrapped counterpart of `native_token` to `to`.
///
/// The first mint for a native token also creates its wrapped token. The
/// factory instantiates it in a sub-message whose reply records the
/// mapping, and the mint that follows addresses the token by symbol.
/// `0x` hex native ids are matched case-insensitively.
#[allow(clippy::too_many_arguments)]
pub fn execute_mint_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    symbol: String,
    token_name: String,
    to: String,
    native_token: String,
    amount: Uint128,
    transfer_id: String,
) -> Result<Response, ContractError> {
    require_address(&to, "to")?;
    require_address(&native_token, "native_token")?;
    require_amount(amount)?;
    require_symbol(&symbol)?;
    require_name(&token_name)?;
    require_transfer_id(&transfer_id)?;

    ensure_role(deps.storage, Role::Relayer, &info.sender)?;

    let recipient = deps.api.addr_validate(&to)?;
    mark_processed(deps.storage, &transfer_id, env.block.height)?;

    let native_token = native_token_key(&native_token);
    let factory = FACTORY.load(deps.storage)?;
    let mut response = Response::new();

    let wrapped = match NATIVE_TO_WRAPPED.may_load(deps.storage, &native_token)? {
        Some(existing) => existing.symbol,
        None => {
            let new_symbol = wrapped_symbol(&symbol);
            // W{symbol} may already wrap a different native token
            let registered: Werc20Response = deps.querier.query_wasm_smart(
                &factory,
                &FactoryQueryMsg::GetWerc20 {
                    symbol: new_symbol.clone(),
                },
            )?;
            if registered.address.is_some() {
                return Err(ContractError::WrappedSymbolTaken {
                    symbol: new_symbol,
                    native_token,
                });
            }
            PENDING_WRAP.save(
                deps.storage,
                &PendingWrap {
                    native_token: native_token.clone(),
                    wrapped_symbol: new_symbol.clone(),
                },
            )?;
            let create = WasmMsg::Execute {
                contract_addr: factory.to_string(),
                msg: to_json_binary(&FactoryExecuteMsg::CreateWerc20 {
                    name: wrapped_name(&token_name),
                    symbol: new_symbol.clone(),
                })?,
                funds: vec![],
            };
            response =
                response.add_submessage(SubMsg::reply_on_success(create, CREATE_WRAPPED_REPLY_ID));
            new_symbol
        }
    };

    let mint = WasmMsg::Execute {
        contract_addr: factory.to_string(),
        msg: to_json_binary(&FactoryExecuteMsg::Mint {
            symbol: wrapped.clone(),
            to: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    let config = CONFIG.load(deps.storage)?;

    Ok(response
        .add_message(mint)
        .add_event(
            Event::new("transfer_completed")
                .add_attribute("user", &recipient)
                .add_attribute("native_token", native_token)
                .add_attribute("wrapped_symbol", wrapped)
                .add_attribute("amount", amount)
                .add_attribute("chain_id", config.chain_id.to_string())
                .add_attribute("token_symbol", symbol)
                .add_attribute("token_name", token_name)
                .add_attribute("transfer_id", transfer_id),
        )
        .add_attribute("method", "mint_token"))
}

/// Release `amount` of a locked native token to `to`.
pub fn execute_unwrap_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    to: String,
    token: String,
    amount: Uint128,
    transfer_id: String,
) -> Result<Response, ContractError> {
    require_address(&to, "to")?;
    require_address(&token, "token")?;
    require_amount(amount)?;
    require_transfer_id(&transfer_id)?;

    ensure_role(deps.storage, Role::Relayer, &info.sender)?;

    let recipient = deps.api.addr_validate(&to)?;
    let token_addr = deps.api.addr_validate(&token)?;
    mark_processed(deps.storage, &transfer_id, env.block.height)?;

    ensure_balance(&deps.querier, &token_addr, &env.contract.address, amount)?;

    let config = CONFIG.load(deps.storage)?;

    let release = WasmMsg::Execute {
        contract_addr: token_addr.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(release)
        .add_event(
            Event::new("unwrapped_token")
                .add_attribute("user", &recipient)
                .add_attribute("native_token", &token_addr)
                .add_attribute("amount", amount)
                .add_attribute("chain_id", config.chain_id.to_string())
                .add_attribute("transfer_id", transfer_id),
        )
        .add_attribute("method", "unwrap_token"))
}
