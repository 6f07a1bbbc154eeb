use common::ValidationError;
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Unauthorized: only the factory owner can perform this action")]
    Unauthorized,

    #[error("Token already exists: {symbol}")]
    TokenAlreadyExists { symbol: String },

    #[error("Token does not exist: {symbol}")]
    TokenDoesNotExist { symbol: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
