//! Permit digest computation and signer derivation.
//!
//! A permit is an ed25519 signature over
//! `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash)`, where every
//! field is encoded as one 32-byte word:
//!
//! - Domain (160 bytes): `keccak256(DOMAIN_TYPE)`, `keccak256(name)`,
//!   `keccak256(version)`, `keccak256(chainId)`, `keccak256(contract)`
//! - Struct (192 bytes): `keccak256(PERMIT_TYPE)`, `keccak256(owner)`,
//!   `keccak256(spender)`, value, nonce, deadline (big-endian, left-padded)
//!
//! The domain binds a signature to one token contract on one chain; the
//! nonce binds it to a single use.

use bech32::{ToBase32, Variant};
use cosmwasm_std::{StdError, StdResult, Uint128};
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

pub const DOMAIN_TYPE: &str =
    "Domain(string name,string version,string chainId,string verifyingContract)";

pub const PERMIT_TYPE: &str =
    "Permit(string owner,string spender,uint256 value,uint256 nonce,uint256 deadline)";

pub const PERMIT_VERSION: &str = "1";

pub const ED25519_PUBKEY_LEN: usize = 32;

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// uint256 word: big-endian, left-padded
fn word(value: u128) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[16..].copy_from_slice(&value.to_be_bytes());
    out
}

pub fn domain_separator(token_name: &str, chain_id: &str, contract: &str) -> [u8; 32] {
    let mut data = [0u8; 160];
    data[0..32].copy_from_slice(&keccak256(DOMAIN_TYPE.as_bytes()));
    data[32..64].copy_from_slice(&keccak256(token_name.as_bytes()));
    data[64..96].copy_from_slice(&keccak256(PERMIT_VERSION.as_bytes()));
    data[96..128].copy_from_slice(&keccak256(chain_id.as_bytes()));
    data[128..160].copy_from_slice(&keccak256(contract.as_bytes()));
    keccak256(&data)
}

pub fn struct_hash(owner: &str, spender: &str, value: Uint128, nonce: u64, deadline: u64) -> [u8; 32] {
    let mut data = [0u8; 192];
    data[0..32].copy_from_slice(&keccak256(PERMIT_TYPE.as_bytes()));
    data[32..64].copy_from_slice(&keccak256(owner.as_bytes()));
    data[64..96].copy_from_slice(&keccak256(spender.as_bytes()));
    data[96..128].copy_from_slice(&word(value.u128()));
    data[128..160].copy_from_slice(&word(nonce as u128));
    data[160..192].copy_from_slice(&word(deadline as u128));
    keccak256(&data)
}

/// The 32-byte message a holder signs to grant `value` to `spender`.
pub fn permit_digest(
    domain_separator: &[u8; 32],
    owner: &str,
    spender: &str,
    value: Uint128,
    nonce: u64,
    deadline: u64,
) -> [u8; 32] {
    let mut data = [0u8; 66];
    data[0] = 0x19;
    data[1] = 0x01;
    data[2..34].copy_from_slice(domain_separator);
    data[34..66].copy_from_slice(&struct_hash(owner, spender, value, nonce, deadline));
    keccak256(&data)
}

/// Account address controlled by an ed25519 key:
/// `bech32(prefix, sha256(pubkey)[..20])`.
pub fn signer_address(prefix: &str, public_key: &[u8]) -> StdResult<String> {
    if public_key.len() != ED25519_PUBKEY_LEN {
        return Err(StdError::generic_err(format!(
            "public key must be {} bytes, got {}",
            ED25519_PUBKEY_LEN,
            public_key.len()
        )));
    }
    let hash = Sha256::digest(public_key);
    bech32::encode(prefix, (&hash[..20]).to_base32(), Variant::Bech32)
        .map_err(|e| StdError::generic_err(format!("bech32 encoding failed: {e}")))
}
