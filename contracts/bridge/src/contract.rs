//! Bridge Contract - Entry Points

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply, Response, StdResult,
    SubMsg, WasmMsg,
};
use cw2::set_contract_version;

use common::access_control::{set_role_admin, setup_role};
use common::reply::instantiated_address;
use common::validation::require_address;
use common::Role;
use token_factory::msg::{QueryMsg as FactoryQueryMsg, Werc20Response};

use crate::error::ContractError;
use crate::execute::{
    execute_burn_wrapped_token, execute_grant_role, execute_initiate_transfer,
    execute_mint_token, execute_renounce_role, execute_revoke_role, execute_set_fee,
    execute_unwrap_token, execute_withdraw_token,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query::{
    query_config, query_current_nonce, query_factory, query_fee, query_has_role,
    query_is_processed, query_locked_balance, query_native_to_wrapped, query_role_admin,
    query_role_members, query_wrapped_to_native,
};
use crate::state::{
    Config, WrappedToken, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, CREATE_WRAPPED_REPLY_ID,
    FACTORY, INSTANTIATE_FACTORY_REPLY_ID, NATIVE_TO_WRAPPED, OUTGOING_NONCE, PENDING_WRAP,
    WRAPPED_TO_NATIVE,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    require_address(&msg.admin, "admin")?;
    let admin = deps.api.addr_validate(&msg.admin)?;

    let mut events: Vec<Event> = Role::ALL
        .into_iter()
        .map(|role| set_role_admin(deps.storage, role, Role::Admin))
        .collect::<Result<_, _>>()?;
    events.push(setup_role(deps.storage, Role::Admin, &admin, &info.sender)?);
    for relayer in &msg.relayers {
        require_address(relayer, "relayer")?;
        let relayer = deps.api.addr_validate(relayer)?;
        events.push(setup_role(deps.storage, Role::Relayer, &relayer, &info.sender)?);
    }

    CONFIG.save(
        deps.storage,
        &Config {
            fee: msg.fee,
            chain_id: msg.chain_id,
        },
    )?;
    OUTGOING_NONCE.save(deps.storage, &0u64)?;

    let factory = WasmMsg::Instantiate {
        admin: Some(admin.to_string()),
        code_id: msg.factory_code_id,
        msg: to_json_binary(&token_factory::msg::InstantiateMsg {
            token_code_id: msg.token_code_id,
            signer_prefix: msg.signer_prefix,
        })?,
        funds: vec![],
        label: format!("token-factory-{}", env.contract.address),
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(factory, INSTANTIATE_FACTORY_REPLY_ID))
        .add_events(events)
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("relayer_count", msg.relayers.len().to_string())
        .add_attribute("chain_id", msg.chain_id.to_string())
        .add_attribute("fee", msg.fee))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outgoing
        ExecuteMsg::InitiateTransfer {
            user,
            token,
            target_chain_id,
            amount,
            token_name,
            token_symbol,
            permit,
        } => execute_initiate_transfer(
            deps,
            env,
            info,
            user,
            token,
            target_chain_id,
            amount,
            token_name,
            token_symbol,
            permit,
        ),
        ExecuteMsg::BurnWrappedToken {
            symbol,
            amount,
            user,
            permit,
        } => execute_burn_wrapped_token(deps, env, info, symbol, amount, user, permit),

        // Incoming
        ExecuteMsg::MintToken {
            symbol,
            token_name,
            to,
            native_token,
            amount,
            transfer_id,
        } => execute_mint_token(
            deps,
            env,
            info,
            symbol,
            token_name,
            to,
            native_token,
            amount,
            transfer_id,
        ),
        ExecuteMsg::UnwrapToken {
            to,
            token,
            amount,
            transfer_id,
        } => execute_unwrap_token(deps, env, info, to, token, amount, transfer_id),

        // Admin
        ExecuteMsg::WithdrawToken { token, to } => {
            execute_withdraw_token(deps, env, info, token, to)
        }
        ExecuteMsg::SetFee { amount } => execute_set_fee(deps, info, amount),

        // Roles
        ExecuteMsg::GrantRole { role, account } => execute_grant_role(deps, info, role, account),
        ExecuteMsg::RevokeRole { role, account } => {
            execute_revoke_role(deps, info, role, account)
        }
        ExecuteMsg::RenounceRole { role, account } => {
            execute_renounce_role(deps, info, role, account)
        }
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        INSTANTIATE_FACTORY_REPLY_ID => reply_factory_instantiated(deps, msg),
        CREATE_WRAPPED_REPLY_ID => reply_wrapped_created(deps),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

fn reply_factory_instantiated(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let factory = deps.api.addr_validate(&instantiated_address(msg)?)?;
    FACTORY.save(deps.storage, &factory)?;

    Ok(Response::new()
        .add_attribute("method", "reply_factory_instantiated")
        .add_attribute("factory", factory))
}

/// The factory registered the new token in its own reply before this one
/// runs, so the address is read back from its registry.
fn reply_wrapped_created(deps: DepsMut) -> Result<Response, ContractError> {
    let pending = PENDING_WRAP.load(deps.storage)?;
    PENDING_WRAP.remove(deps.storage);

    let factory = FACTORY.load(deps.storage)?;
    let registered: Werc20Response = deps.querier.query_wasm_smart(
        &factory,
        &FactoryQueryMsg::GetWerc20 {
            symbol: pending.wrapped_symbol.clone(),
        },
    )?;
    let address = registered
        .address
        .ok_or_else(|| ContractError::WrapTokenDoesNotExist {
            symbol: pending.wrapped_symbol.clone(),
        })?;

    NATIVE_TO_WRAPPED.save(
        deps.storage,
        &pending.native_token,
        &WrappedToken {
            address: address.clone(),
            symbol: pending.wrapped_symbol.clone(),
        },
    )?;
    WRAPPED_TO_NATIVE.save(deps.storage, &address, &pending.native_token)?;

    Ok(Response::new()
        .add_event(
            Event::new("token_mapped")
                .add_attribute("native_token", pending.native_token)
                .add_attribute("wrapped_token", &address)
                .add_attribute("wrapped_symbol", pending.wrapped_symbol),
        )
        .add_attribute("method", "reply_wrapped_created"))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Fee {} => to_json_binary(&query_fee(deps)?),
        QueryMsg::Factory {} => to_json_binary(&query_factory(deps)?),
        QueryMsg::HasRole { role, account } => {
            to_json_binary(&query_has_role(deps, role, account)?)
        }
        QueryMsg::RoleAdmin { role } => to_json_binary(&query_role_admin(deps, role)?),
        QueryMsg::RoleMembers {
            role,
            start_after,
            limit,
        } => to_json_binary(&query_role_members(deps, role, start_after, limit)?),
        QueryMsg::NativeToWrapped { native_token } => {
            to_json_binary(&query_native_to_wrapped(deps, native_token)?)
        }
        QueryMsg::WrappedToNative { wrapped_token } => {
            to_json_binary(&query_wrapped_to_native(deps, wrapped_token)?)
        }
        QueryMsg::IsProcessed { transfer_id } => {
            to_json_binary(&query_is_processed(deps, transfer_id)?)
        }
        QueryMsg::CurrentNonce {} => to_json_binary(&query_current_nonce(deps)?),
        QueryMsg::LockedBalance { token } => {
            to_json_binary(&query_locked_balance(deps, env, token)?)
        }
    }
}
