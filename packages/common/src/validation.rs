//! Input validation shared across contracts.
//!
//! These checks run before any storage access. A CosmWasm address has no
//! "zero" value, so an empty (or whitespace-only) string plays that role.

use cosmwasm_std::Uint128;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Zero address provided for {field}")]
    ZeroAddress { field: String },

    #[error("Amount cannot be zero")]
    ZeroAmount,

    #[error("Token symbol cannot be empty")]
    EmptySymbol,

    #[error("Token name cannot be empty")]
    EmptyName,

    #[error("Transfer id cannot be empty")]
    EmptyTransferId,
}

/// Reject the empty address for `field`.
pub fn require_address(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::ZeroAddress {
            field: field.to_string(),
        });
    }
    Ok(())
}

pub fn require_amount(amount: Uint128) -> Result<(), ValidationError> {
    if amount.is_zero() {
        return Err(ValidationError::ZeroAmount);
    }
    Ok(())
}

pub fn require_symbol(symbol: &str) -> Result<(), ValidationError> {
    if symbol.trim().is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    Ok(())
}

pub fn require_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

pub fn require_transfer_id(transfer_id: &str) -> Result<(), ValidationError> {
    if transfer_id.trim().is_empty() {
        return Err(ValidationError::EmptyTransferId);
    }
    Ok(())
}
