//! Sub-message reply helpers.

use cosmwasm_std::{Reply, StdError, StdResult};

/// Address of the contract created by an instantiate sub-message, read from
/// the `_contract_address` attribute of its `instantiate` event.
pub fn instantiated_address(msg: Reply) -> StdResult<String> {
    let result = msg.result.into_result().map_err(StdError::generic_err)?;
    result
        .events
        .iter()
        .filter(|e| e.ty == "instantiate")
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == "_contract_address")
        .map(|a| a.value.clone())
        .ok_or_else(|| StdError::generic_err("instantiate reply missing contract address"))
}
