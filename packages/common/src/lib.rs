//! Shared building blocks for the bridge contracts: input validation, the
//! role registry and reply parsing.

pub mod access_control;
pub mod reply;
pub mod validation;

pub use access_control::{AccessError, Role};
pub use validation::ValidationError;
