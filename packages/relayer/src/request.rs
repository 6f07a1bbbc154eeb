//! Relay webhook request: parsing, authentication and dispatch mapping
//!
//! A request carries a unix timestamp `t`, the transfer `data` and a `hash`
//! tag. The tag is `hex(sha256(secret || json({"t": t, "content": data})))`,
//! where the JSON keeps the field order of [`RelayPayload`].

use std::str::FromStr;

use bridge::msg::ExecuteMsg;
use cosmwasm_std::Uint128;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::RequestError;

/// Payload `type` that completes a forward transfer by minting
pub const MINT_TYPE: &str = "mint";

/// Raw webhook body. Every field is optional so that absent fields are
/// reported as missing parameters instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayRequest {
    pub t: Option<u64>,
    pub data: Option<RelayPayload>,
    pub hash: Option<String>,
}

/// Transfer description signed by the webhook sender
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelayPayload {
    pub to: String,
    pub amount: String,
    pub token_address: String,
    pub token_name: String,
    pub symbol: String,
    pub contract_address: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub transfer_id: String,
}

#[derive(Serialize)]
struct TaggedContent<'a> {
    t: u64,
    content: &'a RelayPayload,
}

/// Request that passed the presence check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedRequest {
    pub t: u64,
    pub data: RelayPayload,
    pub hash: String,
}

impl RelayRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self, RequestError> {
        serde_json::from_slice(body).map_err(|_| RequestError::MissingParameters)
    }

    /// Presence check. `t = 0` and an empty hash count as absent.
    pub fn require_fields(self) -> Result<CheckedRequest, RequestError> {
        let (t, data, hash) = match (self.t, self.data, self.hash) {
            (Some(t), Some(data), Some(hash)) if t > 0 && !hash.is_empty() => (t, data, hash),
            _ => return Err(RequestError::MissingParameters),
        };
        let required = [
            &data.to,
            &data.amount,
            &data.token_address,
            &data.contract_address,
            &data.transfer_id,
        ];
        if required.iter().any(|field| field.is_empty()) {
            return Err(RequestError::MissingParameters);
        }
        Ok(CheckedRequest { t, data, hash })
    }
}

impl CheckedRequest {
    /// Rejects requests whose timestamp is more than `window_secs` away
    /// from `now`, in either direction.
    pub fn check_freshness(&self, now: u64, window_secs: u64) -> Result<(), RequestError> {
        if now.abs_diff(self.t) > window_secs {
            return Err(RequestError::Expired);
        }
        Ok(())
    }

    /// Recomputes the tag and returns its raw digest on match
    pub fn verify_tag(&self, secret: &str) -> Result<[u8; 32], RequestError> {
        let digest = integrity_digest(secret, self.t, &self.data)?;
        let supplied = hex::decode(&self.hash).map_err(|_| RequestError::InvalidHash)?;
        // Slices of different length compare unequal
        if !bool::from(digest.as_slice().ct_eq(supplied.as_slice())) {
            return Err(RequestError::InvalidHash);
        }
        Ok(digest)
    }
}

/// Canonical JSON of `{t, content}`
pub fn canonical_json(t: u64, data: &RelayPayload) -> Result<String, RequestError> {
    serde_json::to_string(&TaggedContent { t, content: data })
        .map_err(|e| RequestError::Internal(e.to_string()))
}

pub fn integrity_digest(secret: &str, t: u64, data: &RelayPayload) -> Result<[u8; 32], RequestError> {
    let body = canonical_json(t, data)?;
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(body.as_bytes());
    Ok(hasher.finalize().into())
}

/// Hex tag a sender attaches as `hash`
pub fn integrity_tag(secret: &str, t: u64, data: &RelayPayload) -> Result<String, RequestError> {
    integrity_digest(secret, t, data).map(hex::encode)
}

impl RelayPayload {
    pub fn is_mint(&self) -> bool {
        self.kind == MINT_TYPE
    }

    /// Bridge call completing this transfer
    pub fn to_execute_msg(&self) -> Result<ExecuteMsg, RequestError> {
        let amount = Uint128::from_str(&self.amount)
            .map_err(|_| RequestError::InvalidAmount(self.amount.clone()))?;

        let msg = if self.is_mint() {
            ExecuteMsg::MintToken {
                symbol: self.symbol.clone(),
                token_name: self.token_name.clone(),
                to: self.to.clone(),
                native_token: self.token_address.clone(),
                amount,
                transfer_id: self.transfer_id.clone(),
            }
        } else {
            ExecuteMsg::UnwrapToken {
                to: self.to.clone(),
                token: self.token_address.clone(),
                amount,
                transfer_id: self.transfer_id.clone(),
            }
        };
        Ok(msg)
    }
}
