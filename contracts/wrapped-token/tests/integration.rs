//! Wrapped token integration tests.
//!
//! Covers owner-gated mint/burn, cw20-style transfers and allowances, and
//! signed allowance grants (nonce consumption, expiry, wrong signer).

use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::{AllowanceResponse, BalanceResponse, TokenInfoResponse};
use cw_multi_test::{App, ContractWrapper, Executor};
use ed25519_dalek::{Signer, SigningKey};

use wrapped_token::msg::{
    DomainSeparatorResponse, ExecuteMsg, InstantiateMsg, NonceResponse, OwnerResponse, QueryMsg,
};
use wrapped_token::{permit_digest, signer_address};

// ============================================================================
// Test Setup
// ============================================================================

fn contract_wrapped_token() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        wrapped_token::contract::execute,
        wrapped_token::contract::instantiate,
        wrapped_token::contract::query,
    );
    Box::new(contract)
}

struct TestEnv {
    app: App,
    token: Addr,
    owner: Addr,
    user: Addr,
}

fn setup() -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1factory");
    let user = Addr::unchecked("terra1user");

    let code_id = app.store_code(contract_wrapped_token());
    let token = app
        .instantiate_contract(
            code_id,
            owner.clone(),
            &InstantiateMsg {
                name: "Wrapped Test".to_string(),
                symbol: "WTST".to_string(),
                decimals: 18,
                signer_prefix: "terra".to_string(),
            },
            &[],
            "wrapped-WTST",
            None,
        )
        .unwrap();

    TestEnv {
        app,
        token,
        owner,
        user,
    }
}

fn mint(env: &mut TestEnv, recipient: &Addr, amount: u128) {
    env.app
        .execute_contract(
            env.owner.clone(),
            env.token.clone(),
            &ExecuteMsg::Mint {
                recipient: recipient.to_string(),
                amount: Uint128::new(amount),
            },
            &[],
        )
        .unwrap();
}

fn balance(env: &TestEnv, address: &Addr) -> Uint128 {
    let res: BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.token,
            &QueryMsg::Balance {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.balance
}

fn allowance(env: &TestEnv, owner: &Addr, spender: &Addr) -> Uint128 {
    let res: AllowanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.token,
            &QueryMsg::Allowance {
                owner: owner.to_string(),
                spender: spender.to_string(),
            },
        )
        .unwrap();
    res.allowance
}

fn nonce(env: &TestEnv, owner: &Addr) -> u64 {
    let res: NonceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.token,
            &QueryMsg::Nonce {
                owner: owner.to_string(),
            },
        )
        .unwrap();
    res.nonce
}

/// A holder whose address is derived from an ed25519 key.
struct Signer25519 {
    key: SigningKey,
    address: Addr,
}

fn signer(seed: u8) -> Signer25519 {
    let key = SigningKey::from_bytes(&[seed; 32]);
    let address = signer_address("terra", key.verifying_key().as_bytes()).unwrap();
    Signer25519 {
        key,
        address: Addr::unchecked(address),
    }
}

fn signed_permit(
    env: &TestEnv,
    holder: &Signer25519,
    spender: &Addr,
    value: u128,
    nonce: u64,
    deadline: u64,
) -> ExecuteMsg {
    let domain: DomainSeparatorResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.token, &QueryMsg::DomainSeparator {})
        .unwrap();
    let domain: [u8; 32] = domain.domain_separator.as_slice().try_into().unwrap();

    let digest = permit_digest(
        &domain,
        holder.address.as_str(),
        spender.as_str(),
        Uint128::new(value),
        nonce,
        deadline,
    );
    let signature = holder.key.sign(&digest);

    ExecuteMsg::Permit {
        owner: holder.address.to_string(),
        spender: spender.to_string(),
        value: Uint128::new(value),
        deadline,
        public_key: Binary::from(holder.key.verifying_key().to_bytes().to_vec()),
        signature: Binary::from(signature.to_bytes().to_vec()),
    }
}

fn future_deadline(env: &TestEnv) -> u64 {
    env.app.block_info().time.seconds() + 3_600
}

// ============================================================================
// Instantiate
// ============================================================================

#[test]
fn test_instantiate_records_metadata_and_owner() {
    let env = setup();

    let info: TokenInfoResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.token, &QueryMsg::TokenInfo {})
        .unwrap();
    assert_eq!(info.name, "Wrapped Test");
    assert_eq!(info.symbol, "WTST");
    assert_eq!(info.decimals, 18);
    assert_eq!(info.total_supply, Uint128::zero());

    let owner: OwnerResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.token, &QueryMsg::Owner {})
        .unwrap();
    assert_eq!(owner.owner, env.owner);
}

#[test]
fn test_instantiate_rejects_empty_symbol() {
    let mut app = App::default();
    let code_id = app.store_code(contract_wrapped_token());
    let res = app.instantiate_contract(
        code_id,
        Addr::unchecked("terra1factory"),
        &InstantiateMsg {
            name: "Wrapped Test".to_string(),
            symbol: "".to_string(),
            decimals: 18,
            signer_prefix: "terra".to_string(),
        },
        &[],
        "wrapped",
        None,
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("symbol cannot be empty"));
}

// ============================================================================
// Mint / Burn
// ============================================================================

#[test]
fn test_owner_mints_to_recipient() {
    let mut env = setup();
    let user = env.user.clone();
    mint(&mut env, &user, 1_000);

    assert_eq!(balance(&env, &user), Uint128::new(1_000));
    let info: TokenInfoResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.token, &QueryMsg::TokenInfo {})
        .unwrap();
    assert_eq!(info.total_supply, Uint128::new(1_000));
}

#[test]
fn test_non_owner_cannot_mint() {
    let mut env = setup();
    let res = env.app.execute_contract(
        env.user.clone(),
        env.token.clone(),
        &ExecuteMsg::Mint {
            recipient: env.user.to_string(),
            amount: Uint128::new(1_000),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Unauthorized"));
}

#[test]
fn test_mint_zero_rejected() {
    let mut env = setup();
    let res = env.app.execute_contract(
        env.owner.clone(),
        env.token.clone(),
        &ExecuteMsg::Mint {
            recipient: env.user.to_string(),
            amount: Uint128::zero(),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Amount cannot be zero"));
}

#[test]
fn test_burn_from_spends_owner_allowance() {
    let mut env = setup();
    let user = env.user.clone();
    mint(&mut env, &user, 1_000);

    // No allowance yet
    let res = env.app.execute_contract(
        env.owner.clone(),
        env.token.clone(),
        &ExecuteMsg::BurnFrom {
            owner: user.to_string(),
            amount: Uint128::new(400),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Insufficient allowance"));

    env.app
        .execute_contract(
            user.clone(),
            env.token.clone(),
            &ExecuteMsg::Approve {
                spender: env.owner.to_string(),
                amount: Uint128::new(500),
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            env.owner.clone(),
            env.token.clone(),
            &ExecuteMsg::BurnFrom {
                owner: user.to_string(),
                amount: Uint128::new(400),
            },
            &[],
        )
        .unwrap();

    assert_eq!(balance(&env, &user), Uint128::new(600));
    let owner = env.owner.clone();
    assert_eq!(allowance(&env, &user, &owner), Uint128::new(100));
    let info: TokenInfoResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.token, &QueryMsg::TokenInfo {})
        .unwrap();
    assert_eq!(info.total_supply, Uint128::new(600));
}

#[test]
fn test_non_owner_cannot_burn() {
    let mut env = setup();
    let user = env.user.clone();
    mint(&mut env, &user, 1_000);

    let res = env.app.execute_contract(
        user.clone(),
        env.token.clone(),
        &ExecuteMsg::BurnFrom {
            owner: user.to_string(),
            amount: Uint128::new(1),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Unauthorized"));
}

// ============================================================================
// Transfers
// ============================================================================

#[test]
fn test_transfer_moves_balance() {
    let mut env = setup();
    let user = env.user.clone();
    let other = Addr::unchecked("terra1other");
    mint(&mut env, &user, 1_000);

    env.app
        .execute_contract(
            user.clone(),
            env.token.clone(),
            &ExecuteMsg::Transfer {
                recipient: other.to_string(),
                amount: Uint128::new(250),
            },
            &[],
        )
        .unwrap();

    assert_eq!(balance(&env, &user), Uint128::new(750));
    assert_eq!(balance(&env, &other), Uint128::new(250));
}

#[test]
fn test_transfer_more_than_balance_fails() {
    let mut env = setup();
    let user = env.user.clone();
    mint(&mut env, &user, 100);

    let res = env.app.execute_contract(
        user.clone(),
        env.token.clone(),
        &ExecuteMsg::Transfer {
            recipient: "terra1other".to_string(),
            amount: Uint128::new(101),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Insufficient balance"));
    assert_eq!(balance(&env, &user), Uint128::new(100));
}

#[test]
fn test_transfer_from_uses_allowance() {
    let mut env = setup();
    let user = env.user.clone();
    let spender = Addr::unchecked("terra1spender");
    let other = Addr::unchecked("terra1other");
    mint(&mut env, &user, 1_000);

    env.app
        .execute_contract(
            user.clone(),
            env.token.clone(),
            &ExecuteMsg::Approve {
                spender: spender.to_string(),
                amount: Uint128::new(300),
            },
            &[],
        )
        .unwrap();

    env.app
        .execute_contract(
            spender.clone(),
            env.token.clone(),
            &ExecuteMsg::TransferFrom {
                owner: user.to_string(),
                recipient: other.to_string(),
                amount: Uint128::new(300),
            },
            &[],
        )
        .unwrap();

    assert_eq!(balance(&env, &other), Uint128::new(300));
    assert_eq!(allowance(&env, &user, &spender), Uint128::zero());

    let res = env.app.execute_contract(
        spender.clone(),
        env.token.clone(),
        &ExecuteMsg::TransferFrom {
            owner: user.to_string(),
            recipient: other.to_string(),
            amount: Uint128::new(1),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Insufficient allowance"));
}

// ============================================================================
// Permit
// ============================================================================

#[test]
fn test_permit_sets_allowance_and_consumes_nonce() {
    let mut env = setup();
    let holder = signer(1);
    let spender = Addr::unchecked("terra1bridge");
    let deadline = future_deadline(&env);

    let msg = signed_permit(&env, &holder, &spender, 500, 0, deadline);
    // Anyone may submit the signed grant
    env.app
        .execute_contract(Addr::unchecked("terra1submitter"), env.token.clone(), &msg, &[])
        .unwrap();

    assert_eq!(allowance(&env, &holder.address, &spender), Uint128::new(500));
    assert_eq!(nonce(&env, &holder.address), 1);
}

#[test]
fn test_permit_replay_rejected() {
    let mut env = setup();
    let holder = signer(2);
    let spender = Addr::unchecked("terra1bridge");
    let deadline = future_deadline(&env);

    let msg = signed_permit(&env, &holder, &spender, 500, 0, deadline);
    env.app
        .execute_contract(env.user.clone(), env.token.clone(), &msg, &[])
        .unwrap();

    let res = env
        .app
        .execute_contract(env.user.clone(), env.token.clone(), &msg, &[]);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Invalid permit signature"));
    assert_eq!(nonce(&env, &holder.address), 1);
}

#[test]
fn test_permit_second_signature_uses_next_nonce() {
    let mut env = setup();
    let holder = signer(3);
    let spender = Addr::unchecked("terra1bridge");
    let deadline = future_deadline(&env);

    let first = signed_permit(&env, &holder, &spender, 500, 0, deadline);
    env.app
        .execute_contract(env.user.clone(), env.token.clone(), &first, &[])
        .unwrap();

    let second = signed_permit(&env, &holder, &spender, 50, 1, deadline);
    env.app
        .execute_contract(env.user.clone(), env.token.clone(), &second, &[])
        .unwrap();

    assert_eq!(allowance(&env, &holder.address, &spender), Uint128::new(50));
    assert_eq!(nonce(&env, &holder.address), 2);
}

#[test]
fn test_permit_expired_deadline_rejected() {
    let mut env = setup();
    let holder = signer(4);
    let spender = Addr::unchecked("terra1bridge");
    let deadline = env.app.block_info().time.seconds() - 1;

    let msg = signed_permit(&env, &holder, &spender, 500, 0, deadline);
    let res = env
        .app
        .execute_contract(env.user.clone(), env.token.clone(), &msg, &[]);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("expired"));
    assert_eq!(nonce(&env, &holder.address), 0);
}

#[test]
fn test_permit_deadline_equal_to_block_time_accepted() {
    let mut env = setup();
    let holder = signer(5);
    let spender = Addr::unchecked("terra1bridge");
    let deadline = env.app.block_info().time.seconds();

    let msg = signed_permit(&env, &holder, &spender, 10, 0, deadline);
    env.app
        .execute_contract(env.user.clone(), env.token.clone(), &msg, &[])
        .unwrap();
    assert_eq!(allowance(&env, &holder.address, &spender), Uint128::new(10));
}

#[test]
fn test_permit_signed_by_other_key_rejected() {
    let mut env = setup();
    let holder = signer(6);
    let impostor = signer(7);
    let spender = Addr::unchecked("terra1bridge");
    let deadline = future_deadline(&env);

    // Impostor signs a grant over the holder's tokens with their own key
    let msg = match signed_permit(&env, &impostor, &spender, 500, 0, deadline) {
        ExecuteMsg::Permit {
            spender,
            value,
            deadline,
            public_key,
            signature,
            ..
        } => ExecuteMsg::Permit {
            owner: holder.address.to_string(),
            spender,
            value,
            deadline,
            public_key,
            signature,
        },
        _ => unreachable!(),
    };

    let res = env
        .app
        .execute_contract(env.user.clone(), env.token.clone(), &msg, &[]);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Invalid permit signature"));
    assert_eq!(allowance(&env, &holder.address, &spender), Uint128::zero());
}

#[test]
fn test_permit_tampered_value_rejected() {
    let mut env = setup();
    let holder = signer(8);
    let spender = Addr::unchecked("terra1bridge");
    let deadline = future_deadline(&env);

    let msg = match signed_permit(&env, &holder, &spender, 500, 0, deadline) {
        ExecuteMsg::Permit {
            owner,
            spender,
            deadline,
            public_key,
            signature,
            ..
        } => ExecuteMsg::Permit {
            owner,
            spender,
            value: Uint128::new(5_000),
            deadline,
            public_key,
            signature,
        },
        _ => unreachable!(),
    };

    let res = env
        .app
        .execute_contract(env.user.clone(), env.token.clone(), &msg, &[]);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Invalid permit signature"));
}
