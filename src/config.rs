//! Client configuration

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Program id the on-chain program declares.
pub const DEFAULT_PROGRAM_ID: &str = "B1hw4bqgqEsu7okvd6efKg2oKudtw4yNCRbV2qYWkUp9";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC URL for Solana cluster
    pub rpc_url: String,

    /// Deployed pool program id
    pub program_id: Pubkey,

    /// Wallet keypair path
    pub keypair_path: String,
}

impl Config {
    /// Load configuration from TOML file
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("LUCIFER_CONFIG")
            .unwrap_or_else(|_| "lucifer-client.toml".to_string());

        let config_str = std::fs::read_to_string(&config_path).map_err(|e| {
            ClientError::Config(format!("failed to read config file {}: {}", config_path, e))
        })?;

        toml::from_str(&config_str)
            .map_err(|e| ClientError::Config(format!("failed to parse config TOML: {}", e)))
    }

    /// Create default configuration
    pub fn default_devnet() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            program_id: Pubkey::from_str(DEFAULT_PROGRAM_ID).unwrap(),
            keypair_path: "~/.config/solana/id.json".to_string(),
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_devnet();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| ClientError::Config(format!("failed to write config to {}: {}", path, e)))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }

    /// Load the wallet keypair, accepting JSON-array and raw binary files.
    pub fn load_keypair(&self) -> Result<Keypair> {
        let expanded = shellexpand::tilde(&self.keypair_path);
        let keypair_err = |reason: String| ClientError::Keypair {
            path: self.keypair_path.clone(),
            reason,
        };

        let bytes = std::fs::read(expanded.as_ref()).map_err(|e| keypair_err(e.to_string()))?;

        if bytes.first() == Some(&b'[') {
            let json_data: Vec<u8> =
                serde_json::from_slice(&bytes).map_err(|e| keypair_err(e.to_string()))?;
            Keypair::try_from(&json_data[..]).map_err(|e| keypair_err(e.to_string()))
        } else {
            Keypair::try_from(&bytes[..]).map_err(|e| keypair_err(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = Config::default_devnet();
        assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(config.program_id.to_string(), DEFAULT_PROGRAM_ID);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default_devnet();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.rpc_url, config.rpc_url);
        assert_eq!(parsed.program_id, config.program_id);
        assert_eq!(parsed.keypair_path, config.keypair_path);
    }

    #[test]
    fn test_load_keypair_json_format() {
        let keypair = Keypair::new();
        let json = format!(
            "[{}]",
            keypair
                .to_bytes()
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(",")
        );
        let path = std::env::temp_dir().join("lucifer-client-test-keypair.json");
        std::fs::write(&path, json).unwrap();

        let config = Config {
            keypair_path: path.to_str().unwrap().to_string(),
            ..Config::default_devnet()
        };
        let loaded = config.load_keypair().unwrap();
        assert_eq!(loaded.to_bytes(), keypair.to_bytes());

        let _ = std::fs::remove_file(&path);
    }
}
