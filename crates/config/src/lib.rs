//! Anchor Configuration Module
//!
//! This module provides configuration types for Anchor transaction flows:
//! the target network, the fixed transaction fee, tx-info polling and the
//! contract address map.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Fixed gas charged per transaction, in uusd.
pub const FIXED_GAS_UUSD: u64 = 3_500_000;
/// Gas limit attached to every transaction.
pub const DEFAULT_GAS_LIMIT: u64 = 6_000_000;
/// Gas adjustment multiplier forwarded to the wallet.
pub const DEFAULT_GAS_ADJUSTMENT: f64 = 1.4;

/// Delay between two tx-info lookups while waiting for inclusion.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid url {0}: {1}")]
    InvalidUrl(String, url::ParseError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Terra network the webapp talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    MainNet,
    #[default]
    TestNet,
}

impl NetworkType {
    /// Gets the chain id
    pub fn chain_id(&self) -> &'static str {
        match self {
            NetworkType::MainNet => "columbus-4",
            NetworkType::TestNet => "tequila-0004",
        }
    }

    /// Gets the public LCD endpoint
    pub fn lcd_url(&self) -> &'static str {
        match self {
            NetworkType::MainNet => "https://lcd.terra.dev",
            NetworkType::TestNet => "https://tequila-lcd.terra.dev",
        }
    }

    /// Gets the Anchor API endpoint (market history, collaterals)
    pub fn api_endpoint(&self) -> &'static str {
        match self {
            NetworkType::MainNet => "https://api.anchorprotocol.com/api/v1",
            NetworkType::TestNet => "https://api-tequila.anchorprotocol.com/api/v1",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::MainNet => write!(f, "mainnet"),
            NetworkType::TestNet => write!(f, "testnet"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" | "columbus-4" => Ok(NetworkType::MainNet),
            "testnet" | "test" | "tequila-0004" => Ok(NetworkType::TestNet),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub network: NetworkConfig,
    pub fee: TxFeeConfig,
    pub poll: TxPollConfig,
    /// Filled from `network.network_type` when left out
    #[serde(default)]
    pub contracts: ContractAddresses,
    pub logging: LoggingConfig,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self::for_network(NetworkType::default())
    }
}

impl AnchorConfig {
    /// Loads the configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from TOML text and validates it.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let mut config: AnchorConfig = toml::from_str(content)?;
        if config.contracts.is_empty() {
            config.contracts = ContractAddresses::for_network(config.network.network_type);
        }
        config.validate()?;
        Ok(config)
    }

    /// Builds the default configuration for a network.
    pub fn for_network(network_type: NetworkType) -> Self {
        Self {
            network: NetworkConfig {
                network_type,
                ..NetworkConfig::default()
            },
            fee: TxFeeConfig::default(),
            poll: TxPollConfig::default(),
            contracts: ContractAddresses::for_network(network_type),
            logging: LoggingConfig::default(),
        }
    }

    /// Checks endpoints and fee values.
    pub fn validate(&self) -> ConfigResult<()> {
        self.network.lcd_url()?;
        self.network.api_endpoint()?;
        if self.fee.gas_limit == 0 {
            return Err(ConfigError::Invalid("fee.gas_limit must be positive".into()));
        }
        if !(self.fee.gas_adjustment.is_finite() && self.fee.gas_adjustment >= 1.0) {
            return Err(ConfigError::Invalid(
                "fee.gas_adjustment must be at least 1.0".into(),
            ));
        }
        if self.poll.interval_ms == 0 {
            return Err(ConfigError::Invalid("poll.interval_ms must be positive".into()));
        }
        Ok(())
    }
}

/// Network configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub network_type: NetworkType,
    /// Overrides the chain id implied by `network_type`
    pub chain_id: Option<String>,
    /// Overrides the LCD endpoint implied by `network_type`
    pub lcd_url: Option<String>,
    /// Overrides the Anchor API endpoint implied by `network_type`
    pub api_endpoint: Option<String>,
}

impl NetworkConfig {
    pub fn chain_id(&self) -> &str {
        self.chain_id
            .as_deref()
            .unwrap_or_else(|| self.network_type.chain_id())
    }

    pub fn lcd_url(&self) -> ConfigResult<Url> {
        let raw = self
            .lcd_url
            .as_deref()
            .unwrap_or_else(|| self.network_type.lcd_url());
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e))
    }

    pub fn api_endpoint(&self) -> ConfigResult<Url> {
        let raw = self
            .api_endpoint
            .as_deref()
            .unwrap_or_else(|| self.network_type.api_endpoint());
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e))
    }
}

/// Fixed transaction fee attached to every message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TxFeeConfig {
    pub gas_limit: u64,
    /// Fee amount in uusd
    pub fixed_gas_uusd: u64,
    pub gas_adjustment: f64,
}

impl TxFeeConfig {
    /// Fee coin in chain notation, e.g. `3500000uusd`
    pub fn fee_coin(&self) -> String {
        format!("{}uusd", self.fixed_gas_uusd)
    }
}

impl Default for TxFeeConfig {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_LIMIT,
            fixed_gas_uusd: FIXED_GAS_UUSD,
            gas_adjustment: DEFAULT_GAS_ADJUSTMENT,
        }
    }
}

/// Tx-info polling while waiting for inclusion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TxPollConfig {
    pub interval_ms: u64,
    /// `None` polls until the tx is found
    pub max_attempts: Option<u32>,
}

impl Default for TxPollConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_attempts: None,
        }
    }
}

/// Anchor contract address map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractAddresses {
    pub b_luna_hub: String,
    pub b_luna_token: String,
    pub b_luna_reward: String,
    pub mm_interest_model: String,
    pub mm_oracle: String,
    pub mm_market: String,
    pub mm_overseer: String,
    pub mm_custody: String,
    pub mm_liquidation: String,
    pub a_ust_token: String,
    pub anchor_token: String,
    pub terraswap_factory: String,
}

impl ContractAddresses {
    pub fn for_network(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::MainNet => Self {
                b_luna_hub: "terra1mtwph2juhj0rvjz7dy92gvl6xvukaxu8rfv8ts".into(),
                b_luna_token: "terra1kc87mu460fwkqte29rquh4hc20m54fxwtsx7gp".into(),
                b_luna_reward: "terra17yap3mhph35pcwvhza38c2lkj7gzywzy05h7l0".into(),
                mm_interest_model: "terra1kq8zzq5hufas9t0kjsjc62t2kucfnx8txf547n".into(),
                mm_oracle: "terra1cgg6yef7qcdm070qftghfulaxmllgmvk77nc7t".into(),
                mm_market: "terra1sepfj7s0aeg5967uxnfk4thzlerrsktkpelm5s".into(),
                mm_overseer: "terra1tmnqgvg567ypvsvk6rwsga3srp7e3lg6u0elp8".into(),
                mm_custody: "terra1ptjp2vfjrwh0j0faj9r6katm640kgjxnwwq9kn".into(),
                mm_liquidation: "terra1w9ky73v4g7v98zzdqpqgf3kjmusnx4d4mvnac6".into(),
                a_ust_token: "terra1hzh9vpxhsk8253se0vv5jj6etdvxu3nv8z07zu".into(),
                anchor_token: "terra14z56l0fp2lsf86zy3hty2z47ezkhnthtr9yq76".into(),
                terraswap_factory: "terra1ulgw0td86nvs4wtpsc80thv6xelk76ut7a7apj".into(),
            },
            NetworkType::TestNet => Self {
                b_luna_hub: "terra1kzx23xs8v9yggf6lqpwgerg455e8xzsv0s0glf".into(),
                b_luna_token: "terra12kz7ehjh9m2aexmyumlt29qjuc9j5mjcdp0d5k".into(),
                b_luna_reward: "terra1pjpzktukkd20amfwc0d8mahjg5na2pgu3swdu4".into(),
                mm_interest_model: "terra16f3lv77yu4ga4w8m7jl0xg2xkavqe347dz30v9".into(),
                mm_oracle: "terra1enud48d754pau5rce79xsdx9gfschw2eelwcuj".into(),
                mm_market: "terra1r8vmgf3mf5m5gcp09fnj2ewsyaqppr6ke50mf2".into(),
                mm_overseer: "terra1t6zjqmqjvsfrszr65cppug4gd4xkqm33vugwl2".into(),
                mm_custody: "terra1usycpap7j0mz4ynrgmtv7jc7uwqka345ushknz".into(),
                mm_liquidation: "terra14pdcpx6szzfvhz4g6dfddkx82f5ssf8llmzpw4".into(),
                a_ust_token: "terra1ajt556dpzvjwl0kl5tzku3fc3p3knkg9mkv8jl".into(),
                anchor_token: "terra10c0q6qyk2634tfx2nw9v4gxqlm7a0luk9huhy8".into(),
                terraswap_factory: "terra1mtvsarza55hehpmyjgw7edqwvxpq5qquvttz9n".into(),
            },
        }
    }

    /// True when no address has been configured at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level, overridden by `RUST_LOG`
    pub level: Option<String>,
    /// `text`, `json` or `pretty`
    pub format: Option<String>,
}
