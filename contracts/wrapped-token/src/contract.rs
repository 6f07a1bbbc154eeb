//! Wrapped Token Contract - Entry Points

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Storage,
    Uint128,
};
use cw2::set_contract_version;
use cw20::{AllowanceResponse, BalanceResponse, Expiration, TokenInfoResponse};

use common::validation::{require_address, require_amount, require_name, require_symbol};

use crate::error::ContractError;
use crate::msg::{
    DomainSeparatorResponse, ExecuteMsg, InstantiateMsg, NonceResponse, OwnerResponse, QueryMsg,
};
use crate::permit::{domain_separator, permit_digest, signer_address};
use crate::state::{
    Config, TokenInfo, ALLOWANCES, BALANCES, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, NONCES,
    TOKEN_INFO,
};

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

    require_name(&msg.name)?;
    require_symbol(&msg.symbol)?;

    let config = Config {
        owner: info.sender,
        signer_prefix: msg.signer_prefix,
    };
    CONFIG.save(deps.storage, &config)?;

    TOKEN_INFO.save(
        deps.storage,
        &TokenInfo {
            name: msg.name.clone(),
            symbol: msg.symbol.clone(),
            decimals: msg.decimals,
            total_supply: Uint128::zero(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("name", msg.name)
        .add_attribute("symbol", msg.symbol))
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
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, info, recipient, amount)
        }
        ExecuteMsg::Approve { spender, amount } => execute_approve(deps, info, spender, amount),
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => execute_transfer_from(deps, info, owner, recipient, amount),
        ExecuteMsg::Permit {
            owner,
            spender,
            value,
            deadline,
            public_key,
            signature,
        } => execute_permit(
            deps, env, owner, spender, value, deadline, public_key, signature,
        ),
        ExecuteMsg::Mint { recipient, amount } => execute_mint(deps, info, recipient, amount),
        ExecuteMsg::BurnFrom { owner, amount } => execute_burn_from(deps, info, owner, amount),
    }
}

fn execute_transfer(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    require_address(&recipient, "recipient")?;
    require_amount(amount)?;
    let recipient_addr = deps.api.addr_validate(&recipient)?;

    debit(deps.storage, &info.sender, amount)?;
    credit(deps.storage, &recipient_addr, amount)?;

    Ok(Response::new()
        .add_attribute("method", "transfer")
        .add_attribute("from", info.sender)
        .add_attribute("to", recipient_addr)
        .add_attribute("amount", amount))
}

fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    require_address(&spender, "spender")?;
    let spender_addr = deps.api.addr_validate(&spender)?;

    ALLOWANCES.save(deps.storage, (&info.sender, &spender_addr), &amount)?;

    Ok(Response::new()
        .add_attribute("method", "approve")
        .add_attribute("owner", info.sender)
        .add_attribute("spender", spender_addr)
        .add_attribute("amount", amount))
}

fn execute_transfer_from(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    require_address(&owner, "owner")?;
    require_address(&recipient, "recipient")?;
    require_amount(amount)?;
    let owner_addr = deps.api.addr_validate(&owner)?;
    let recipient_addr = deps.api.addr_validate(&recipient)?;

    spend_allowance(deps.storage, &owner_addr, &info.sender, amount)?;
    debit(deps.storage, &owner_addr, amount)?;
    credit(deps.storage, &recipient_addr, amount)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_from")
        .add_attribute("from", owner_addr)
        .add_attribute("to", recipient_addr)
        .add_attribute("by", info.sender)
        .add_attribute("amount", amount))
}

/// Grant an allowance from an ed25519 signature by `owner`.
///
/// The key must hash to `owner` under the configured bech32 prefix, the
/// signature must cover the digest built from the owner's current nonce,
/// and the block time must not be past `deadline`. The nonce is consumed
/// on success, so each signature works once.
#[allow(clippy::too_many_arguments)]
fn execute_permit(
    deps: DepsMut,
    env: Env,
    owner: String,
    spender: String,
    value: Uint128,
    deadline: u64,
    public_key: Binary,
    signature: Binary,
) -> Result<Response, ContractError> {
    require_address(&owner, "owner")?;
    require_address(&spender, "spender")?;

    if env.block.time.seconds() > deadline {
        return Err(ContractError::SignatureExpired { deadline });
    }

    let config = CONFIG.load(deps.storage)?;
    let signer = signer_address(&config.signer_prefix, public_key.as_slice())
        .map_err(|_| ContractError::InvalidSignature)?;
    if signer != owner {
        return Err(ContractError::InvalidSignature);
    }

    let owner_addr = deps.api.addr_validate(&owner)?;
    let spender_addr = deps.api.addr_validate(&spender)?;
    let nonce = NONCES.may_load(deps.storage, &owner_addr)?.unwrap_or(0);

    let token = TOKEN_INFO.load(deps.storage)?;
    let domain = domain_separator(&token.name, &env.block.chain_id, env.contract.address.as_str());
    let digest = permit_digest(&domain, &owner, &spender, value, nonce, deadline);

    let verified = deps
        .api
        .ed25519_verify(&digest, signature.as_slice(), public_key.as_slice())
        .unwrap_or(false);
    if !verified {
        return Err(ContractError::InvalidSignature);
    }

    NONCES.save(deps.storage, &owner_addr, &(nonce + 1))?;
    ALLOWANCES.save(deps.storage, (&owner_addr, &spender_addr), &value)?;

    Ok(Response::new()
        .add_attribute("method", "permit")
        .add_attribute("owner", owner_addr)
        .add_attribute("spender", spender_addr)
        .add_attribute("value", value)
        .add_attribute("nonce", nonce.to_string()))
}

fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    require_address(&recipient, "recipient")?;
    require_amount(amount)?;
    ensure_owner(deps.storage, &info.sender)?;
    let recipient_addr = deps.api.addr_validate(&recipient)?;

    TOKEN_INFO.update(deps.storage, |mut token| -> Result<_, ContractError> {
        token.total_supply = token.total_supply.checked_add(amount)?;
        Ok(token)
    })?;
    credit(deps.storage, &recipient_addr, amount)?;

    Ok(Response::new()
        .add_attribute("method", "mint")
        .add_attribute("to", recipient_addr)
        .add_attribute("amount", amount))
}

fn execute_burn_from(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    require_address(&owner, "owner")?;
    require_amount(amount)?;
    ensure_owner(deps.storage, &info.sender)?;
    let owner_addr = deps.api.addr_validate(&owner)?;

    spend_allowance(deps.storage, &owner_addr, &info.sender, amount)?;
    debit(deps.storage, &owner_addr, amount)?;
    TOKEN_INFO.update(deps.storage, |mut token| -> Result<_, ContractError> {
        token.total_supply = token.total_supply.checked_sub(amount)?;
        Ok(token)
    })?;

    Ok(Response::new()
        .add_attribute("method", "burn_from")
        .add_attribute("from", owner_addr)
        .add_attribute("amount", amount))
}

// ============================================================================
// Ledger helpers
// ============================================================================

fn ensure_owner(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if CONFIG.load(storage)?.owner != *sender {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn debit(storage: &mut dyn Storage, holder: &Addr, amount: Uint128) -> Result<(), ContractError> {
    let available = BALANCES.may_load(storage, holder)?.unwrap_or_default();
    if available < amount {
        return Err(ContractError::InsufficientBalance {
            available,
            required: amount,
        });
    }
    BALANCES.save(storage, holder, &(available - amount))?;
    Ok(())
}

fn credit(storage: &mut dyn Storage, holder: &Addr, amount: Uint128) -> Result<(), ContractError> {
    let current = BALANCES.may_load(storage, holder)?.unwrap_or_default();
    BALANCES.save(storage, holder, &current.checked_add(amount)?)?;
    Ok(())
}

fn spend_allowance(
    storage: &mut dyn Storage,
    owner: &Addr,
    spender: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let available = ALLOWANCES
        .may_load(storage, (owner, spender))?
        .unwrap_or_default();
    if available < amount {
        return Err(ContractError::InsufficientAllowance {
            available,
            required: amount,
        });
    }
    ALLOWANCES.save(storage, (owner, spender), &(available - amount))?;
    Ok(())
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        QueryMsg::Allowance { owner, spender } => {
            to_json_binary(&query_allowance(deps, owner, spender)?)
        }
        QueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
        QueryMsg::Nonce { owner } => to_json_binary(&query_nonce(deps, owner)?),
        QueryMsg::DomainSeparator {} => to_json_binary(&query_domain_separator(deps, env)?),
        QueryMsg::Owner {} => to_json_binary(&OwnerResponse {
            owner: CONFIG.load(deps.storage)?.owner,
        }),
    }
}

fn query_balance(deps: Deps, address: String) -> StdResult<BalanceResponse> {
    let address = deps.api.addr_validate(&address)?;
    let balance = BALANCES
        .may_load(deps.storage, &address)?
        .unwrap_or_default();
    Ok(BalanceResponse { balance })
}

fn query_allowance(deps: Deps, owner: String, spender: String) -> StdResult<AllowanceResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let spender = deps.api.addr_validate(&spender)?;
    let allowance = ALLOWANCES
        .may_load(deps.storage, (&owner, &spender))?
        .unwrap_or_default();
    Ok(AllowanceResponse {
        allowance,
        expires: Expiration::Never {},
    })
}

fn query_token_info(deps: Deps) -> StdResult<TokenInfoResponse> {
    let token = TOKEN_INFO.load(deps.storage)?;
    Ok(TokenInfoResponse {
        name: token.name,
        symbol: token.symbol,
        decimals: token.decimals,
        total_supply: token.total_supply,
    })
}

fn query_nonce(deps: Deps, owner: String) -> StdResult<NonceResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let nonce = NONCES.may_load(deps.storage, &owner)?.unwrap_or(0);
    Ok(NonceResponse { nonce })
}

fn query_domain_separator(deps: Deps, env: Env) -> StdResult<DomainSeparatorResponse> {
    let token = TOKEN_INFO.load(deps.storage)?;
    let domain = domain_separator(&token.name, &env.block.chain_id, env.contract.address.as_str());
    Ok(DomainSeparatorResponse {
        domain_separator: Binary::from(domain.to_vec()),
    })
}
