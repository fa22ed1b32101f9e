//! Runtime configuration, read from flags and the environment.

use clap::Args;
use ethkit::{chain, Account};

use crate::error::CliError;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Chain id used for EIP-155 replay protection
    #[arg(long, env = "CHAIN_ID", default_value_t = chain::MAINNET, global = true)]
    pub chain_id: u64,

    /// Network label shown in output
    #[arg(long, env = "NETWORK_NAME", default_value = "mainnet", global = true)]
    pub network: String,

    /// Private key (hex) for commands that sign
    #[arg(long, env = "ETHKIT_PRIVATE_KEY", hide_env_values = true, global = true)]
    pub private_key: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl Config {
    /// Default `env_logger` filter.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    /// The account for the configured private key.
    pub fn account(&self) -> Result<Account, CliError> {
        let key = self
            .private_key
            .as_deref()
            .ok_or(CliError::MissingPrivateKey)?;
        Ok(Account::from_private_key_hex(key.trim())?)
    }

    /// Warns when the network label names a chain other than `chain_id`.
    pub fn check_network(&self) {
        if let Some(expected) = known_chain_id(&self.network) {
            if expected != self.chain_id {
                log::warn!(
                    "network '{}' is chain {} but --chain-id is {}",
                    self.network,
                    expected,
                    self.chain_id
                );
            }
        }
    }
}

/// Chain id of a well-known network name.
pub fn known_chain_id(network: &str) -> Option<u64> {
    match network.to_ascii_lowercase().as_str() {
        "mainnet" | "ethereum" => Some(chain::MAINNET),
        "goerli" => Some(chain::GOERLI),
        "sepolia" => Some(chain::SEPOLIA),
        "optimism" => Some(chain::OPTIMISM),
        "bsc" => Some(chain::BSC),
        "polygon" => Some(chain::POLYGON),
        "arbitrum" => Some(chain::ARBITRUM),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chain_ids() {
        assert_eq!(known_chain_id("mainnet"), Some(1));
        assert_eq!(known_chain_id("Sepolia"), Some(11155111));
        assert_eq!(known_chain_id("devnet"), None);
    }

    #[test]
    fn test_account_requires_key() {
        let config = Config {
            chain_id: 1,
            network: "mainnet".into(),
            private_key: None,
            verbose: false,
            json: false,
        };
        assert!(matches!(config.account(), Err(CliError::MissingPrivateKey)));
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_account_from_key() {
        let config = Config {
            chain_id: 1,
            network: "mainnet".into(),
            private_key: Some(
                " 0x4646464646464646464646464646464646464646464646464646464646464646\n".into(),
            ),
            verbose: true,
            json: false,
        };
        let account = config.account().unwrap();
        assert_eq!(
            account.address().to_checksummed(),
            "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F"
        );
        assert_eq!(config.log_filter(), "debug");
    }
}
