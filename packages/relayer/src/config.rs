//! Relayer configuration, loaded from the environment (and `.env` if present)

use std::env;
use std::fmt;
use std::time::Duration;

use eyre::{eyre, Result, WrapErr};

/// Default request freshness window in seconds
pub const DEFAULT_FRESHNESS_SECS: u64 = 4;

/// Log output selected by `LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read before the rest of the configuration so logging is up first.
    /// Anything other than `json` falls back to text.
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT") {
            Ok(raw) if raw.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    /// Shared secret keying the request tag
    pub hook_secret: String,
    /// Address the webhook server binds to
    pub bind_address: String,
    /// Maximum allowed distance between request timestamp and now
    pub freshness_secs: u64,
    /// Consumed-tag cache capacity
    pub replay_cache_size: usize,
    /// How long a consumed tag is remembered
    pub replay_cache_ttl: Duration,
    pub terra: TerraConfig,
}

#[derive(Clone)]
pub struct TerraConfig {
    pub lcd_url: String,
    pub chain_id: String,
    /// Bridge contract the relayer is allowed to call
    pub bridge_address: String,
    pub mnemonic: String,
    /// Bech32 prefix of the signer account
    pub account_prefix: String,
    pub gas_limit: u64,
    pub gas_price: f64,
    pub fee_denom: String,
}

/// Custom Debug that redacts the hook secret.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("hook_secret", &"<redacted>")
            .field("bind_address", &self.bind_address)
            .field("freshness_secs", &self.freshness_secs)
            .field("replay_cache_size", &self.replay_cache_size)
            .field("replay_cache_ttl", &self.replay_cache_ttl)
            .field("terra", &self.terra)
            .finish()
    }
}

/// Custom Debug that redacts the mnemonic.
impl fmt::Debug for TerraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerraConfig")
            .field("lcd_url", &self.lcd_url)
            .field("chain_id", &self.chain_id)
            .field("bridge_address", &self.bridge_address)
            .field("mnemonic", &"<redacted>")
            .field("account_prefix", &self.account_prefix)
            .field("gas_limit", &self.gas_limit)
            .field("gas_price", &self.gas_price)
            .field("fee_denom", &self.fee_denom)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded .env from {:?}", path);
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        let hook_secret = required("HOOK_SECRET")?;
        if hook_secret.is_empty() {
            return Err(eyre!("HOOK_SECRET must not be empty"));
        }

        Ok(Self {
            hook_secret,
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            freshness_secs: parsed_or("FRESHNESS_SECS", DEFAULT_FRESHNESS_SECS)?,
            replay_cache_size: parsed_or("REPLAY_CACHE_SIZE", 10_000)?,
            replay_cache_ttl: Duration::from_secs(parsed_or("REPLAY_CACHE_TTL_SECS", 3_600)?),
            terra: TerraConfig {
                lcd_url: required("TERRA_LCD_URL")?,
                chain_id: required("TERRA_CHAIN_ID")?,
                bridge_address: required("BRIDGE_ADDRESS")?,
                mnemonic: required("TERRA_MNEMONIC")?,
                account_prefix: env::var("ACCOUNT_PREFIX").unwrap_or_else(|_| "terra".to_string()),
                gas_limit: parsed_or("GAS_LIMIT", 600_000)?,
                gas_price: parsed_or("GAS_PRICE", 0.015)?,
                fee_denom: env::var("FEE_DENOM").unwrap_or_else(|_| "uluna".to_string()),
            },
        })
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).map_err(|_| eyre!("{} required", key))
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().wrap_err_with(|| format!("Invalid {}", key)),
        Err(_) => Ok(default),
    }
}
