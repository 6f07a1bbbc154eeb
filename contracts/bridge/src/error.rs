//! Error types for the bridge contract.

use common::{AccessError, ValidationError};
use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Access(#[from] AccessError),

    // ========================================================================
    // Token Errors
    // ========================================================================
    #[error("Wrapped token does not exist for symbol {symbol}")]
    WrapTokenDoesNotExist { symbol: String },

    #[error("Wrapped symbol {symbol} is already used by another native token; cannot wrap {native_token}")]
    WrappedSymbolTaken {
        symbol: String,
        native_token: String,
    },

    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance {
        available: Uint128,
        required: Uint128,
    },

    #[error("Insufficient allowance: available {available}, required {required}")]
    InsufficientAllowance {
        available: Uint128,
        required: Uint128,
    },

    // ========================================================================
    // Replay Errors
    // ========================================================================
    #[error("Transfer already processed: {transfer_id}")]
    TransferAlreadyProcessed { transfer_id: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
