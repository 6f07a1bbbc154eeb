//! Role registry (capability table).
//!
//! Roles are stored explicitly as `(role, holder) => true` entries, with a
//! separate `role => admin role` table. Every gated handler calls
//! [`ensure_role`] before touching business state; nothing is inherited.
//!
//! Handlers that mutate the registry return the [`Event`] to attach to the
//! response so the caller decides how it is emitted.

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Event, Order, StdError, StdResult, Storage};
use cw_storage_plus::{Bound, Map};
use thiserror::Error;

/// Roles known to the bridge.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Role {
    /// Administers every role and owns configuration.
    Admin,
    /// Completes cross-chain transfers (mint and unlock).
    Relayer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Relayer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Relayer => "relayer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum AccessError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: {account} is missing role {role}")]
    MissingRole { account: String, role: Role },

    #[error("Unauthorized: roles can only be renounced by their holder")]
    RenounceForOther,
}

/// Role holders.
/// Key: (role, holder), Value: always true while held
pub const ROLE_MEMBERS: Map<(&str, &Addr), bool> = Map::new("role_members");

/// Admin role per role. Missing entries mean [`Role::Admin`].
pub const ROLE_ADMINS: Map<&str, Role> = Map::new("role_admins");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

pub fn has_role(storage: &dyn Storage, role: Role, account: &Addr) -> bool {
    ROLE_MEMBERS.has(storage, (role.as_str(), account))
}

/// Fails with [`AccessError::MissingRole`] unless `account` holds `role`.
pub fn ensure_role(storage: &dyn Storage, role: Role, account: &Addr) -> Result<(), AccessError> {
    if !has_role(storage, role, account) {
        return Err(AccessError::MissingRole {
            account: account.to_string(),
            role,
        });
    }
    Ok(())
}

pub fn role_admin(storage: &dyn Storage, role: Role) -> StdResult<Role> {
    Ok(ROLE_ADMINS
        .may_load(storage, role.as_str())?
        .unwrap_or(Role::Admin))
}

/// Set the admin role of `role`. Only called while instantiating.
pub fn set_role_admin(storage: &mut dyn Storage, role: Role, admin_role: Role) -> StdResult<Event> {
    let previous = role_admin(storage, role)?;
    ROLE_ADMINS.save(storage, role.as_str(), &admin_role)?;

    Ok(Event::new("role_admin_changed")
        .add_attribute("role", role.as_str())
        .add_attribute("previous_admin_role", previous.as_str())
        .add_attribute("new_admin_role", admin_role.as_str()))
}

/// Grant without an authority check. Only called while instantiating.
pub fn setup_role(
    storage: &mut dyn Storage,
    role: Role,
    account: &Addr,
    sender: &Addr,
) -> StdResult<Event> {
    let changed = insert_member(storage, role, account)?;
    Ok(role_event("role_granted", role, account, sender, changed))
}

/// Grant `role` to `account`. `sender` must hold the admin role of `role`.
/// Granting a held role succeeds without changing state.
pub fn grant_role(
    storage: &mut dyn Storage,
    sender: &Addr,
    role: Role,
    account: &Addr,
) -> Result<Event, AccessError> {
    ensure_role(storage, role_admin(storage, role)?, sender)?;
    let changed = insert_member(storage, role, account)?;
    Ok(role_event("role_granted", role, account, sender, changed))
}

/// Revoke `role` from `account`. `sender` must hold the admin role of `role`.
pub fn revoke_role(
    storage: &mut dyn Storage,
    sender: &Addr,
    role: Role,
    account: &Addr,
) -> Result<Event, AccessError> {
    ensure_role(storage, role_admin(storage, role)?, sender)?;
    let changed = remove_member(storage, role, account);
    Ok(role_event("role_revoked", role, account, sender, changed))
}

/// Drop `role` from the caller's own account.
pub fn renounce_role(
    storage: &mut dyn Storage,
    sender: &Addr,
    role: Role,
    account: &Addr,
) -> Result<Event, AccessError> {
    if sender != account {
        return Err(AccessError::RenounceForOther);
    }
    let changed = remove_member(storage, role, account);
    Ok(role_event("role_revoked", role, account, sender, changed))
}

/// Paginated holders of `role`, ordered by address.
pub fn role_members(
    storage: &dyn Storage,
    role: Role,
    start_after: Option<&Addr>,
    limit: Option<u32>,
) -> StdResult<Vec<Addr>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    ROLE_MEMBERS
        .prefix(role.as_str())
        .keys(storage, start, None, Order::Ascending)
        .take(limit)
        .collect()
}

fn insert_member(storage: &mut dyn Storage, role: Role, account: &Addr) -> StdResult<bool> {
    if has_role(storage, role, account) {
        return Ok(false);
    }
    ROLE_MEMBERS.save(storage, (role.as_str(), account), &true)?;
    Ok(true)
}

fn remove_member(storage: &mut dyn Storage, role: Role, account: &Addr) -> bool {
    if !has_role(storage, role, account) {
        return false;
    }
    ROLE_MEMBERS.remove(storage, (role.as_str(), account));
    true
}

fn role_event(kind: &str, role: Role, account: &Addr, sender: &Addr, changed: bool) -> Event {
    Event::new(kind)
        .add_attribute("role", role.as_str())
        .add_attribute("account", account)
        .add_attribute("sender", sender)
        .add_attribute("changed", changed.to_string())
}
