//! Shared multi-test setup for the bridge integration tests.
#![allow(dead_code)]

use cosmwasm_std::{Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use ed25519_dalek::{Signer, SigningKey};

use bridge::msg::{ExecuteMsg, InstantiateMsg, PermitSignature, QueryMsg};
use common::Role;

pub const CHAIN_ID: u64 = 1;
pub const FOREIGN_CHAIN_ID: u64 = 56;
/// Native token on the foreign chain, as the relayer reports it
pub const FOREIGN_TOKEN: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

/// Execution result with the full error chain rendered to a string
pub type ExecResult = Result<AppResponse, String>;

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_bridge() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridge::contract::execute,
        bridge::contract::instantiate,
        bridge::contract::query,
    )
    .with_reply(bridge::contract::reply);
    Box::new(contract)
}

pub fn contract_factory() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        token_factory::contract::execute,
        token_factory::contract::instantiate,
        token_factory::contract::query,
    )
    .with_reply(token_factory::contract::reply);
    Box::new(contract)
}

pub fn contract_wrapped_token() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        wrapped_token::contract::execute,
        wrapped_token::contract::instantiate,
        wrapped_token::contract::query,
    );
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

// ============================================================================
// Suite
// ============================================================================

pub struct Suite {
    pub app: App,
    pub bridge: Addr,
    pub factory: Addr,
    /// Plain cw20 locked by outgoing transfers
    pub native: Addr,
    pub token_code_id: u64,
    pub admin: Addr,
    pub relayer: Addr,
    pub user: Addr,
}

pub fn setup() -> Suite {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");
    let relayer = Addr::unchecked("terra1relayer");
    let user = Addr::unchecked("terra1user");

    let token_code_id = app.store_code(contract_wrapped_token());
    let factory_code_id = app.store_code(contract_factory());
    let bridge_code_id = app.store_code(contract_bridge());
    let cw20_code_id = app.store_code(contract_cw20());

    let bridge = app
        .instantiate_contract(
            bridge_code_id,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                relayers: vec![relayer.to_string()],
                chain_id: CHAIN_ID,
                fee: Uint128::new(10),
                factory_code_id,
                token_code_id,
                signer_prefix: "terra".to_string(),
            },
            &[],
            "bridge",
            Some(admin.to_string()),
        )
        .unwrap();

    let config: bridge::msg::ConfigResponse = app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::Config {})
        .unwrap();

    let native = app
        .instantiate_contract(
            cw20_code_id,
            admin.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Test Token".to_string(),
                symbol: "TST".to_string(),
                decimals: 18,
                initial_balances: vec![Cw20Coin {
                    address: user.to_string(),
                    amount: Uint128::new(1_000_000),
                }],
                mint: None,
                marketing: None,
            },
            &[],
            "native-tst",
            None,
        )
        .unwrap();

    Suite {
        app,
        bridge,
        factory: config.factory,
        native,
        token_code_id,
        admin,
        relayer,
        user,
    }
}

impl Suite {
    pub fn execute(&mut self, sender: &Addr, msg: &ExecuteMsg) -> ExecResult {
        self.app
            .execute_contract(sender.clone(), self.bridge.clone(), msg, &[])
            .map_err(|e| format!("{:?}", e))
    }

    pub fn approve(&mut self, token: &Addr, owner: &Addr, spender: &Addr, amount: u128) {
        self.app
            .execute_contract(
                owner.clone(),
                token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: spender.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn approve_wrapped(&mut self, token: &Addr, owner: &Addr, spender: &Addr, amount: u128) {
        self.app
            .execute_contract(
                owner.clone(),
                token.clone(),
                &wrapped_token::msg::ExecuteMsg::Approve {
                    spender: spender.to_string(),
                    amount: Uint128::new(amount),
                },
                &[],
            )
            .unwrap();
    }

    pub fn balance(&self, token: &Addr, holder: &Addr) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: holder.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn initiate_msg(&self, amount: u128, permit: Option<PermitSignature>) -> ExecuteMsg {
        ExecuteMsg::InitiateTransfer {
            user: self.user.to_string(),
            token: self.native.to_string(),
            target_chain_id: FOREIGN_CHAIN_ID,
            amount: Uint128::new(amount),
            token_name: "Test Token".to_string(),
            token_symbol: "TST".to_string(),
            permit,
        }
    }

    pub fn mint_msg(&self, to: &Addr, amount: u128, transfer_id: &str) -> ExecuteMsg {
        ExecuteMsg::MintToken {
            symbol: "TST".to_string(),
            token_name: "Test".to_string(),
            to: to.to_string(),
            native_token: FOREIGN_TOKEN.to_string(),
            amount: Uint128::new(amount),
            transfer_id: transfer_id.to_string(),
        }
    }

    /// Relayer mints wrapped TST to `to`.
    pub fn mint_wrapped(&mut self, to: &Addr, amount: u128, transfer_id: &str) -> AppResponse {
        let msg = self.mint_msg(to, amount, transfer_id);
        self.app
            .execute_contract(self.relayer.clone(), self.bridge.clone(), &msg, &[])
            .unwrap()
    }

    /// Wrapped token registered under `symbol` in the factory
    pub fn wrapped(&self, symbol: &str) -> Option<Addr> {
        let res: token_factory::msg::Werc20Response = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.factory,
                &token_factory::msg::QueryMsg::GetWerc20 {
                    symbol: symbol.to_string(),
                },
            )
            .unwrap();
        res.address
    }

    pub fn factory_balance_of(&self, symbol: &str, holder: &Addr) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.factory,
                &token_factory::msg::QueryMsg::BalanceOf {
                    symbol: symbol.to_string(),
                    holder: holder.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn has_role(&self, role: Role, account: &Addr) -> bool {
        let res: bridge::msg::HasRoleResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::HasRole {
                    role,
                    account: account.to_string(),
                },
            )
            .unwrap();
        res.has_role
    }

    pub fn nonce(&self) -> u64 {
        let res: bridge::msg::NonceResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.bridge, &QueryMsg::CurrentNonce {})
            .unwrap();
        res.nonce
    }

    /// Deploy a permit-capable token standing in for a native token.
    /// `minter` owns it and can mint to anyone.
    pub fn deploy_permit_token(&mut self, minter: &Addr) -> Addr {
        self.app
            .instantiate_contract(
                self.token_code_id,
                minter.clone(),
                &wrapped_token::msg::InstantiateMsg {
                    name: "Permit Token".to_string(),
                    symbol: "PTK".to_string(),
                    decimals: 18,
                    signer_prefix: "terra".to_string(),
                },
                &[],
                "native-ptk",
                None,
            )
            .unwrap()
    }
}

pub fn assert_err_contains(res: ExecResult, needle: &str) {
    let err = res.unwrap_err();
    assert!(err.contains(needle), "expected '{}' in '{}'", needle, err);
}

pub fn has_event(res: &AppResponse, ty: &str) -> bool {
    let ty = format!("wasm-{}", ty);
    res.events.iter().any(|e| e.ty == ty)
}

pub fn event_attr(res: &AppResponse, ty: &str, key: &str) -> Option<String> {
    let ty = format!("wasm-{}", ty);
    res.events
        .iter()
        .filter(|e| e.ty == ty)
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

// ============================================================================
// Permit signing
// ============================================================================

/// Holder whose address is derived from an ed25519 key
pub struct KeyHolder {
    pub key: SigningKey,
    pub address: Addr,
}

pub fn key_holder(seed: u8) -> KeyHolder {
    let key = SigningKey::from_bytes(&[seed; 32]);
    let address = wrapped_token::signer_address("terra", key.verifying_key().as_bytes()).unwrap();
    KeyHolder {
        key,
        address: Addr::unchecked(address),
    }
}

/// Sign a grant of `value` on `token` from `holder` to `spender`
pub fn sign_permit(
    app: &App,
    token: &Addr,
    holder: &KeyHolder,
    spender: &Addr,
    value: u128,
    deadline: u64,
) -> PermitSignature {
    let domain: wrapped_token::msg::DomainSeparatorResponse = app
        .wrap()
        .query_wasm_smart(token, &wrapped_token::msg::QueryMsg::DomainSeparator {})
        .unwrap();
    let domain: [u8; 32] = domain.domain_separator.as_slice().try_into().unwrap();

    let nonce: wrapped_token::msg::NonceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &wrapped_token::msg::QueryMsg::Nonce {
                owner: holder.address.to_string(),
            },
        )
        .unwrap();

    let digest = wrapped_token::permit_digest(
        &domain,
        holder.address.as_str(),
        spender.as_str(),
        Uint128::new(value),
        nonce.nonce,
        deadline,
    );

    PermitSignature {
        value: Uint128::new(value),
        deadline,
        public_key: Binary::from(holder.key.verifying_key().to_bytes().to_vec()),
        signature: Binary::from(holder.key.sign(&digest).to_bytes().to_vec()),
    }
}
