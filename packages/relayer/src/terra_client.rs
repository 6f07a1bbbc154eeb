//! Terra client that signs and broadcasts bridge calls through the LCD
//!
//! The LCD reports the committed account sequence, which lags behind
//! transactions still in the mempool. The client therefore fetches the
//! sequence once, advances it locally after every accepted broadcast and
//! signs one transaction at a time.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use bip39::Mnemonic;
use bridge::msg::ExecuteMsg;
use cosmrs::{
    bip32::DerivationPath,
    crypto::secp256k1::SigningKey,
    tx::{self, Fee, Msg, SignDoc, SignerInfo},
    AccountId, Coin,
};
use eyre::{eyre, Result, WrapErr};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::TerraConfig;
use crate::executor::BridgeExecutor;

/// Terra derivation path
const TERRA_DERIVATION_PATH: &str = "m/44'/330'/0'/0/0";

/// Account info from LCD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountInfo {
    pub sequence: u64,
    pub account_number: u64,
}

pub struct TerraClient {
    lcd_url: String,
    chain_id: String,
    gas_limit: u64,
    gas_price: f64,
    fee_denom: String,
    signing_key: SigningKey,
    pub address: AccountId,
    client: Client,
    /// Next sequence to sign with; `None` until fetched or after a failure
    account: Mutex<Option<AccountInfo>>,
}

impl TerraClient {
    pub fn new(config: &TerraConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .wrap_err("Failed to create HTTP client")?;

        let mnemonic =
            Mnemonic::parse(&config.mnemonic).map_err(|e| eyre!("Invalid mnemonic: {}", e))?;
        let seed = mnemonic.to_seed("");
        let path: DerivationPath = TERRA_DERIVATION_PATH
            .parse()
            .map_err(|e| eyre!("Invalid derivation path: {:?}", e))?;
        let signing_key = SigningKey::derive_from_path(seed, &path)
            .map_err(|e| eyre!("Failed to derive signing key: {}", e))?;

        let address = signing_key
            .public_key()
            .account_id(&config.account_prefix)
            .map_err(|e| eyre!("Failed to get account ID: {}", e))?;

        info!(
            relayer_address = %address,
            chain_id = %config.chain_id,
            "Terra client initialized"
        );

        Ok(Self {
            lcd_url: config.lcd_url.trim_end_matches('/').to_string(),
            chain_id: config.chain_id.clone(),
            gas_limit: config.gas_limit,
            gas_price: config.gas_price,
            fee_denom: config.fee_denom.clone(),
            signing_key,
            address,
            client,
            account: Mutex::new(None),
        })
    }

    async fn get_account_info(&self) -> Result<AccountInfo> {
        let url = format!(
            "{}/cosmos/auth/v1beta1/accounts/{}",
            self.lcd_url, self.address
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .wrap_err("Failed to query account info")?;

        if !response.status().is_success() {
            return Err(eyre!(
                "Account query failed: {} - {}",
                response.status(),
                response.text().await.unwrap_or_default()
            ));
        }

        let data: serde_json::Value = response.json().await?;
        parse_account_info(&data)
    }

    async fn broadcast_tx(&self, tx_bytes: &[u8]) -> Result<String> {
        let request = serde_json::json!({
            "tx_bytes": base64::engine::general_purpose::STANDARD.encode(tx_bytes),
            "mode": "BROADCAST_MODE_SYNC"
        });
        let url = format!("{}/cosmos/tx/v1beta1/txs", self.lcd_url);
        debug!(url = %url, "Broadcasting transaction");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| eyre!("Failed to broadcast: {}", e))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({"error": "Failed to parse response"}));

        if !status.is_success() {
            return Err(eyre!("Broadcast failed: {}", body));
        }
        parse_broadcast_response(&body)
    }

    fn fee(&self) -> Result<Fee> {
        let amount = ((self.gas_limit as f64) * self.gas_price).ceil() as u128;
        let denom = self
            .fee_denom
            .parse()
            .map_err(|e| eyre!("Invalid fee denom {}: {}", self.fee_denom, e))?;
        Ok(Fee::from_amount_and_gas(Coin { denom, amount }, self.gas_limit))
    }

    fn sign_execute(
        &self,
        contract: &str,
        msg: &ExecuteMsg,
        account: AccountInfo,
    ) -> Result<Vec<u8>> {
        let execute_msg = cosmrs::cosmwasm::MsgExecuteContract {
            sender: self.address.clone(),
            contract: contract
                .parse()
                .map_err(|e| eyre!("Invalid contract address: {:?}", e))?,
            msg: serde_json::to_vec(msg)?,
            funds: vec![],
        };
        let body = tx::Body::new(
            vec![execute_msg
                .to_any()
                .map_err(|e| eyre!("Failed to convert message: {}", e))?],
            "",
            0u32,
        );

        let signer_info =
            SignerInfo::single_direct(Some(self.signing_key.public_key()), account.sequence);
        let auth_info = signer_info.auth_info(self.fee()?);

        let chain_id = self
            .chain_id
            .parse()
            .map_err(|_| eyre!("Invalid chain ID"))?;
        let sign_doc = SignDoc::new(&body, &auth_info, &chain_id, account.account_number)
            .map_err(|e| eyre!("Failed to create sign doc: {}", e))?;
        let tx_raw = sign_doc
            .sign(&self.signing_key)
            .map_err(|e| eyre!("Failed to sign transaction: {}", e))?;
        tx_raw
            .to_bytes()
            .map_err(|e| eyre!("Failed to serialize transaction: {}", e))
    }
}

#[async_trait]
impl BridgeExecutor for TerraClient {
    async fn execute(&self, contract: &str, msg: &ExecuteMsg) -> Result<String> {
        // Held until the broadcast returns so no two txs share a sequence
        let mut cached = self.account.lock().await;
        let mut retried = false;

        loop {
            let account = match *cached {
                Some(account) => account,
                None => self.get_account_info().await?,
            };
            debug!(
                sequence = account.sequence,
                account_number = account.account_number,
                "Signing bridge transaction"
            );
            let tx_bytes = self.sign_execute(contract, msg, account)?;

            match self.broadcast_tx(&tx_bytes).await {
                Ok(tx_hash) => {
                    *cached = Some(AccountInfo {
                        sequence: account.sequence + 1,
                        ..account
                    });
                    info!(
                        tx_hash = %tx_hash,
                        contract,
                        sequence = account.sequence,
                        "Bridge transaction broadcast"
                    );
                    return Ok(tx_hash);
                }
                Err(e) if !retried && is_sequence_mismatch(&e) => {
                    warn!(error = %e, "Sequence mismatch, resyncing and retrying");
                    retried = true;
                    *cached = expected_sequence(&e.to_string()).map(|sequence| AccountInfo {
                        sequence,
                        ..account
                    });
                }
                Err(e) => {
                    *cached = None;
                    return Err(e);
                }
            }
        }
    }

    fn signer(&self) -> String {
        self.address.to_string()
    }
}

fn is_sequence_mismatch(err: &eyre::Report) -> bool {
    let msg = err.to_string();
    msg.contains("account sequence mismatch")
        || msg.contains("code 32")
        || msg.contains("incorrect account sequence")
}

/// Sequence the node wants, from a log like
/// `account sequence mismatch, expected 7, got 5: incorrect account sequence`
fn expected_sequence(log: &str) -> Option<u64> {
    let (_, rest) = log.split_once("expected ")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Sequence and account number, from either a plain or a vesting account
fn parse_account_info(data: &serde_json::Value) -> Result<AccountInfo> {
    let account = data
        .get("account")
        .ok_or_else(|| eyre!("Missing 'account' field in response"))?;

    let field = |name: &str| -> u64 {
        account
            .get(name)
            .or_else(|| account.get("base_account").and_then(|b| b.get(name)))
            .and_then(|v| v.as_str())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    };

    Ok(AccountInfo {
        sequence: field("sequence"),
        account_number: field("account_number"),
    })
}

fn parse_broadcast_response(body: &serde_json::Value) -> Result<String> {
    let tx_response = body
        .get("tx_response")
        .ok_or_else(|| eyre!("Broadcast failed: {}", body))?;

    let code = tx_response
        .get("code")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    if code != 0 {
        let raw_log = tx_response
            .get("raw_log")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        return Err(eyre!("Transaction failed (code {}): {}", code, raw_log));
    }

    tx_response
        .get("txhash")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| eyre!("Broadcast response without txhash"))
}
