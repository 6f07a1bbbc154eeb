//! Token Factory Contract - Entry Points

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Order, Reply, Response,
    StdError, StdResult, Storage, SubMsg, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::BalanceResponse;
use cw_storage_plus::Bound;

use common::reply::instantiated_address;
use common::validation::{require_address, require_amount, require_name, require_symbol};
use common::ValidationError;

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, OwnerResponse, QueryMsg, TokenEntry, TokensResponse,
    Werc20Response,
};
use crate::state::{
    Config, PendingToken, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, CREATE_TOKEN_REPLY_ID,
    PENDING_TOKEN, TOKENS, WRAPPED_DECIMALS,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        owner: info.sender,
        token_code_id: msg.token_code_id,
        signer_prefix: msg.signer_prefix,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("token_code_id", config.token_code_id.to_string()))
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
        ExecuteMsg::CreateWerc20 { name, symbol } => {
            execute_create_werc20(deps, env, info, name, symbol)
        }
        ExecuteMsg::Mint { symbol, to, amount } => execute_mint(deps, info, symbol, to, amount),
        ExecuteMsg::Burn {
            token_address,
            from,
            amount,
        } => execute_burn(deps, info, token_address, from, amount),
        ExecuteMsg::MyBalanceOf { symbol } => execute_my_balance_of(deps, info, symbol),
    }
}

fn execute_create_werc20(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
    symbol: String,
) -> Result<Response, ContractError> {
    require_name(&name)?;
    require_symbol(&symbol)?;
    let config = ensure_owner(deps.storage, &info.sender)?;

    if TOKENS.has(deps.storage, &symbol) {
        return Err(ContractError::TokenAlreadyExists { symbol });
    }

    PENDING_TOKEN.save(
        deps.storage,
        &PendingToken {
            name: name.clone(),
            symbol: symbol.clone(),
        },
    )?;

    let instantiate = WasmMsg::Instantiate {
        admin: Some(env.contract.address.to_string()),
        code_id: config.token_code_id,
        msg: to_json_binary(&wrapped_token::msg::InstantiateMsg {
            name: name.clone(),
            symbol: symbol.clone(),
            decimals: WRAPPED_DECIMALS,
            signer_prefix: config.signer_prefix,
        })?,
        funds: vec![],
        label: format!("wrapped-{}", symbol),
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(instantiate, CREATE_TOKEN_REPLY_ID))
        .add_attribute("method", "create_werc20")
        .add_attribute("name", name)
        .add_attribute("symbol", symbol))
}

fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    symbol: String,
    to: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    require_address(&to, "to")?;
    require_symbol(&symbol)?;
    require_amount(amount)?;
    ensure_owner(deps.storage, &info.sender)?;

    let token = load_token(deps.storage, &symbol)?;
    let recipient = deps.api.addr_validate(&to)?;

    let mint = WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&wrapped_token::msg::ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(mint)
        .add_attribute("method", "mint")
        .add_attribute("symbol", symbol)
        .add_attribute("token", token)
        .add_attribute("to", recipient)
        .add_attribute("amount", amount))
}

fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    token_address: String,
    from: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    require_address(&token_address, "token_address")?;
    require_address(&from, "from")?;
    require_amount(amount)?;
    ensure_owner(deps.storage, &info.sender)?;

    let token = deps.api.addr_validate(&token_address)?;
    let holder = deps.api.addr_validate(&from)?;

    let burn = WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&wrapped_token::msg::ExecuteMsg::BurnFrom {
            owner: holder.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(burn)
        .add_attribute("method", "burn")
        .add_attribute("token", token)
        .add_attribute("from", holder)
        .add_attribute("amount", amount))
}

fn execute_my_balance_of(
    deps: DepsMut,
    info: MessageInfo,
    symbol: String,
) -> Result<Response, ContractError> {
    require_symbol(&symbol)?;
    let token = load_token(deps.storage, &symbol)?;
    let balance = query_token_balance(deps.as_ref(), &token, &info.sender)?;

    Ok(Response::new()
        .set_data(to_json_binary(&BalanceResponse { balance })?)
        .add_attribute("method", "my_balance_of")
        .add_attribute("symbol", symbol)
        .add_attribute("holder", info.sender)
        .add_attribute("balance", balance))
}

fn ensure_owner(storage: &dyn Storage, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if config.owner != *sender {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

fn load_token(storage: &dyn Storage, symbol: &str) -> Result<Addr, ContractError> {
    TOKENS
        .may_load(storage, symbol)?
        .ok_or_else(|| ContractError::TokenDoesNotExist {
            symbol: symbol.to_string(),
        })
}

fn query_token_balance(deps: Deps, token: &Addr, holder: &Addr) -> StdResult<Uint128> {
    let res: BalanceResponse = deps.querier.query_wasm_smart(
        token,
        &wrapped_token::msg::QueryMsg::Balance {
            address: holder.to_string(),
        },
    )?;
    Ok(res.balance)
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        CREATE_TOKEN_REPLY_ID => reply_token_created(deps, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

fn reply_token_created(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_TOKEN.load(deps.storage)?;
    PENDING_TOKEN.remove(deps.storage);

    let address = deps.api.addr_validate(&instantiated_address(msg)?)?;

    TOKENS.save(deps.storage, &pending.symbol, &address)?;

    Ok(Response::new()
        .add_event(
            Event::new("new_token")
                .add_attribute("name", pending.name)
                .add_attribute("symbol", &pending.symbol)
                .add_attribute("address", &address),
        )
        .add_attribute("method", "reply_token_created")
        .add_attribute("symbol", pending.symbol)
        .add_attribute("token", address))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetWerc20 { symbol } => to_json_binary(&query_get_werc20(deps, symbol)?),
        QueryMsg::BalanceOf { symbol, holder } => {
            to_json_binary(&query_balance_of(deps, symbol, holder)?)
        }
        QueryMsg::Owner {} => to_json_binary(&OwnerResponse {
            owner: CONFIG.load(deps.storage)?.owner,
        }),
        QueryMsg::Tokens { start_after, limit } => {
            to_json_binary(&query_tokens(deps, start_after, limit)?)
        }
    }
}

fn query_get_werc20(deps: Deps, symbol: String) -> StdResult<Werc20Response> {
    if symbol.trim().is_empty() {
        return Err(StdError::generic_err(ValidationError::EmptySymbol.to_string()));
    }
    Ok(Werc20Response {
        address: TOKENS.may_load(deps.storage, &symbol)?,
    })
}

fn query_balance_of(deps: Deps, symbol: String, holder: String) -> StdResult<BalanceResponse> {
    if symbol.trim().is_empty() {
        return Err(StdError::generic_err(ValidationError::EmptySymbol.to_string()));
    }
    let token = load_token(deps.storage, &symbol)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    let holder = deps.api.addr_validate(&holder)?;
    let balance = query_token_balance(deps, &token, &holder)?;
    Ok(BalanceResponse { balance })
}

fn query_tokens(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<TokensResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let tokens = TOKENS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (symbol, address) = item?;
            Ok(TokenEntry { symbol, address })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TokensResponse { tokens })
}
