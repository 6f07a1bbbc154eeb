//! Execute handlers for the bridge contract.
//!
//! - `outgoing` - InitiateTransfer and BurnWrappedToken (user side)
//! - `incoming` - MintToken and UnwrapToken (relayer side)
//! - `admin` - Fee, emergency withdrawal and role management

mod admin;
mod incoming;
mod outgoing;

pub use admin::*;
pub use incoming::*;
pub use outgoing::*;

use cosmwasm_std::{to_json_binary, Addr, QuerierWrapper, StdResult, Storage, Uint128, WasmMsg};
use cw20::{AllowanceResponse, BalanceResponse, Cw20QueryMsg};

use crate::error::ContractError;
use crate::msg::PermitSignature;
use crate::state::{OUTGOING_NONCE, PROCESSED};

pub(crate) fn cw20_balance(
    querier: &QuerierWrapper,
    token: &Addr,
    holder: &Addr,
) -> StdResult<Uint128> {
    let res: BalanceResponse = querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Balance {
            address: holder.to_string(),
        },
    )?;
    Ok(res.balance)
}

pub(crate) fn cw20_allowance(
    querier: &QuerierWrapper,
    token: &Addr,
    owner: &Addr,
    spender: &Addr,
) -> StdResult<Uint128> {
    let res: AllowanceResponse = querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Allowance {
            owner: owner.to_string(),
            spender: spender.to_string(),
        },
    )?;
    Ok(res.allowance)
}

pub(crate) fn ensure_balance(
    querier: &QuerierWrapper,
    token: &Addr,
    holder: &Addr,
    required: Uint128,
) -> Result<(), ContractError> {
    let available = cw20_balance(querier, token, holder)?;
    if available < required {
        return Err(ContractError::InsufficientBalance {
            available,
            required,
        });
    }
    Ok(())
}

/// Authorise `spender` to pull `amount` from `owner`.
///
/// An allowance that already covers `amount` is used as is, even when a
/// permit is supplied, so a permit submitted to the token ahead of this
/// call does not make it fail. Otherwise the permit becomes a `Permit`
/// message on `token`; without one the allowance is insufficient.
pub(crate) fn authorise_spend(
    querier: &QuerierWrapper,
    token: &Addr,
    owner: &Addr,
    spender: &Addr,
    amount: Uint128,
    permit: Option<PermitSignature>,
) -> Result<Option<WasmMsg>, ContractError> {
    let available = cw20_allowance(querier, token, owner, spender)?;
    if available >= amount {
        return Ok(None);
    }
    match permit {
        Some(permit) => Ok(Some(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&permit.into_msg(owner, spender))?,
            funds: vec![],
        })),
        None => Err(ContractError::InsufficientAllowance {
            available,
            required: amount,
        }),
    }
}

/// Attributes with an empty value are dropped; the chain rejects them.
pub(crate) fn non_empty<const N: usize>(
    attrs: [(&'static str, String); N],
) -> impl Iterator<Item = (&'static str, String)> {
    attrs.into_iter().filter(|(_, value)| !value.trim().is_empty())
}

/// Return the current outgoing nonce and advance it.
pub(crate) fn next_nonce(storage: &mut dyn Storage) -> StdResult<u64> {
    let nonce = OUTGOING_NONCE.may_load(storage)?.unwrap_or(0);
    OUTGOING_NONCE.save(storage, &(nonce + 1))?;
    Ok(nonce)
}

/// Record `transfer_id` as processed, failing if it already was.
pub(crate) fn mark_processed(
    storage: &mut dyn Storage,
    transfer_id: &str,
    height: u64,
) -> Result<(), ContractError> {
    if PROCESSED.has(storage, transfer_id) {
        return Err(ContractError::TransferAlreadyProcessed {
            transfer_id: transfer_id.to_string(),
        });
    }
    PROCESSED.save(storage, transfer_id, &height)?;
    Ok(())
}
