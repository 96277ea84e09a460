// Rust guideline compliant 2026-10-19

//! Configuration management for Rusty Coin.

use crate::difficulty::target_from_compact;
use crate::{ChainParams, Error, HashValue, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Network settings of the HTTP node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Address the node binds. Port 0 picks a free port.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Node pinged on startup. A node without one runs as the root node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_addr: Option<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:0".to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            root_addr: None,
        }
    }
}

/// Configuration for a Rusty Coin data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Message embedded in the genesis block by `rscn init`.
    #[serde(default = "default_genesis_message")]
    pub genesis_message: String,

    /// Default log filter (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Address credited by `rscn mine` when `--to` is not given.
    /// Falls back to the local wallet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mining_address: Option<HashValue>,

    /// Consensus parameters.
    #[serde(default)]
    pub chain: ChainParams,

    /// Node settings.
    #[serde(default)]
    pub node: NodeConfig,
}

fn default_genesis_message() -> String {
    "Rusty Coin genesis".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genesis_message: default_genesis_message(),
            log_level: default_log_level(),
            mining_address: None,
            chain: ChainParams::default(),
            node: NodeConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `.rscn/config.toml`
    /// 3. Environment variables with `RSCN_` prefix
    ///
    /// # Arguments
    ///
    /// * `rscn_dir` - Path to the `.rscn` directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(rscn_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = rscn_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Applies overrides read through `lookup`.
    ///
    /// Supported variables:
    /// - `RSCN_LOG_LEVEL` - Log filter
    /// - `RSCN_LISTEN_ADDR` - Node bind address
    /// - `RSCN_ROOT_ADDR` - Root node address
    /// - `RSCN_MINING_ADDRESS` - Default coinbase address (hex)
    /// - `RSCN_INITIAL_DIFFICULTY` - Compact difficulty (`0x` hex or decimal)
    /// - `RSCN_COINBASE_MATURITY` - Confirmations needed by coinbase outputs
    /// - `RSCN_CONFIRMATIONS` - Confirmations needed by other outputs
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("RSCN_LOG_LEVEL") {
            self.log_level = val;
        }

        if let Some(val) = lookup("RSCN_LISTEN_ADDR") {
            self.node.listen_addr = val;
        }

        if let Some(val) = lookup("RSCN_ROOT_ADDR") {
            self.node.root_addr = Some(val).filter(|addr| !addr.is_empty());
        }

        if let Some(val) = lookup("RSCN_MINING_ADDRESS") {
            let address = val.parse::<HashValue>().map_err(|_| {
                Error::Config("RSCN_MINING_ADDRESS must be a 32-byte hex address".to_string())
            })?;
            self.mining_address = Some(address);
        }

        if let Some(val) = lookup("RSCN_INITIAL_DIFFICULTY") {
            self.chain.initial_difficulty = parse_compact(&val).ok_or_else(|| {
                Error::Config("RSCN_INITIAL_DIFFICULTY must be a 32-bit number".to_string())
            })?;
        }

        if let Some(val) = lookup("RSCN_COINBASE_MATURITY") {
            self.chain.coinbase_maturity = val.parse().map_err(|_| {
                Error::Config("RSCN_COINBASE_MATURITY must be a number".to_string())
            })?;
        }

        if let Some(val) = lookup("RSCN_CONFIRMATIONS") {
            self.chain.confirmations = val
                .parse()
                .map_err(|_| Error::Config("RSCN_CONFIRMATIONS must be a number".to_string()))?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - log_level is not a known level
    /// - node.listen_addr is not a socket address
    /// - chain.target_block_secs is zero
    /// - chain.initial_difficulty expands to a zero target
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::Config(format!(
                "log_level must be one of {}, got {}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        if self.node.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(Error::Config(format!(
                "node.listen_addr is not a socket address: {}",
                self.node.listen_addr
            )));
        }

        if self.chain.target_block_secs == 0 {
            return Err(Error::Config(
                "chain.target_block_secs must be greater than 0".to_string(),
            ));
        }

        if target_from_compact(self.chain.initial_difficulty) == HashValue::zero() {
            return Err(Error::Config(format!(
                "chain.initial_difficulty {:#010x} has an empty target",
                self.chain.initial_difficulty
            )));
        }

        Ok(())
    }

    /// Saves the configuration to `config.toml` in `rscn_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, rscn_dir: &Path) -> Result<()> {
        let config_path = rscn_dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn parse_compact(value: &str) -> Option<u32> {
    match value.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}
