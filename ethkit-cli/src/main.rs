//! ethkit command-line front end.
//!
//! Offline access to the account core: key generation, EIP-55 checks,
//! message and transaction signing, and transaction decoding. Nothing
//! here talks to a node.
//!
//! # Usage
//!
//! ```bash
//! # Generate a fresh account
//! ethkit new-account
//!
//! # Sign a transfer on Sepolia with a key from the environment
//! ETHKIT_PRIVATE_KEY=0x... ethkit --chain-id 11155111 --network sepolia \
//!     sign-tx --to 0x... --value 1000 --gas-price 1000000000 --nonce 0
//!
//! # Decode a raw transaction as JSON
//! ethkit --json decode-tx 0xf86c...
//! ```

use clap::Parser;

mod commands;
mod config;
mod error;

use commands::CliCommand;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "ethkit", version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: CliCommand,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.config.log_filter()),
    )
    .init();
    log::debug!(
        "ethkit: network={} chain_id={}",
        cli.config.network,
        cli.config.chain_id
    );

    let report = commands::run(&cli.command, &cli.config)?;
    if cli.config.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.to_plain());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ethkit",
            "sign-message",
            "hello",
            "--raw",
            "--chain-id",
            "137",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.config.chain_id, 137);
        assert!(cli.config.json);
        assert!(matches!(
            cli.command,
            CliCommand::SignMessage { raw: true, .. }
        ));
    }

    #[test]
    fn test_sign_tx_defaults() {
        let cli = Cli::try_parse_from([
            "ethkit",
            "sign-tx",
            "--to",
            "0x3535353535353535353535353535353535353535",
            "--gas-price",
            "1",
            "--nonce",
            "0",
        ])
        .unwrap();
        match cli.command {
            CliCommand::SignTx {
                gas_limit, value, data, ..
            } => {
                assert_eq!(gas_limit, 21_000);
                assert_eq!(value, 0);
                assert!(data.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_flag_is_rejected() {
        assert!(Cli::try_parse_from(["ethkit", "sign-tx", "--to", "0x00"]).is_err());
        assert!(Cli::try_parse_from(["ethkit"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
