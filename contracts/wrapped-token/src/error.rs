use common::ValidationError;
use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Unauthorized: only the token owner can perform this action")]
    Unauthorized,

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

    #[error("Permit signature expired at {deadline}")]
    SignatureExpired { deadline: u64 },

    #[error("Invalid permit signature")]
    InvalidSignature,
}
