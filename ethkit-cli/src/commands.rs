//! Subcommands and their handlers.
//!
//! Handlers return a [`Report`] instead of printing, so `main` decides
//! between plain and JSON output and tests can inspect the fields.

use clap::Subcommand;
use ethkit::{
    hexutil, signing, Account, Address, Balance, LogObserver, Signature, SignedTransaction,
    UnsignedTransaction,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::CliError;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate a fresh account
    NewAccount,
    /// Show the public key and address of the configured private key
    InspectKey,
    /// Print the EIP-55 form of an address and check its casing
    Checksum {
        address: String,
    },
    /// Sign a message with the configured private key
    SignMessage {
        message: String,
        /// Sign keccak256(message) without the EIP-191 prefix
        #[arg(long)]
        raw: bool,
    },
    /// Recover the signer of a message
    Recover {
        message: String,
        /// 65-byte signature (r || s || v) in hex
        #[arg(long)]
        signature: String,
        /// The message was signed without the EIP-191 prefix
        #[arg(long)]
        raw: bool,
    },
    /// Sign a legacy transaction for the configured chain
    SignTx {
        #[arg(long)]
        to: String,
        /// Value in wei
        #[arg(long, default_value_t = 0)]
        value: u64,
        /// Gas price in wei
        #[arg(long)]
        gas_price: u64,
        #[arg(long, default_value_t = ethkit::DEFAULT_GAS_LIMIT)]
        gas_limit: u64,
        #[arg(long)]
        nonce: u64,
        /// Call data in hex
        #[arg(long)]
        data: Option<String>,
    },
    /// Decode a signed legacy transaction and recover its sender
    DecodeTx {
        raw: String,
    },
    /// Convert a hex wei quantity to decimal and ether
    Balance {
        quantity: String,
        /// Fraction digits in the ether display
        #[arg(long, default_value_t = 4)]
        decimals: usize,
    },
}

// =============================================================================
// Report
// =============================================================================

/// Ordered key/value output of a command.
#[derive(Debug, Default)]
pub struct Report {
    fields: Vec<(&'static str, Value)>,
}

impl Report {
    pub fn field(mut self, key: &'static str, value: impl Serialize) -> Result<Self, CliError> {
        self.fields.push((key, serde_json::to_value(value)?));
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// One `key: value` line per field.
    pub fn to_plain(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{}: {}", key, s),
                other => format!("{}: {}", key, other),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Ok(serde_json::to_string_pretty(&Value::Object(map))?)
    }
}

// =============================================================================
// Handlers
// =============================================================================

pub fn run(command: &CliCommand, config: &Config) -> Result<Report, CliError> {
    match command {
        CliCommand::NewAccount => {
            let account = Account::generate()?;
            log::info!("generated account {}", account.address());
            account_report(&account)?.field("private_key", account.private_key().expose_hex())
        }
        CliCommand::InspectKey => account_report(&config.account()?),
        CliCommand::Checksum { address } => {
            let parsed = Address::from_hex(address)?;
            let casing_ok = Address::from_checksummed(address).is_ok();
            Report::default()
                .field("address", parsed)?
                .field("checksum_valid", casing_ok)
        }
        CliCommand::SignMessage { message, raw } => {
            let account = config.account()?;
            let signature = if *raw {
                account.sign_message(message.as_bytes())?
            } else {
                account.sign_personal_message(message.as_bytes())?
            };
            signature_report(&signature)?.field("signer", account.address())
        }
        CliCommand::Recover {
            message,
            signature,
            raw,
        } => {
            let signature = Signature::from_slice(&hexutil::decode(signature)?)?;
            let signer = if *raw {
                signing::recover_address(&signing::hash_message(message.as_bytes()), &signature)?
            } else {
                signing::recover_personal_message_signer(message.as_bytes(), &signature)?
            };
            Report::default().field("signer", signer)
        }
        CliCommand::SignTx {
            to,
            value,
            gas_price,
            gas_limit,
            nonce,
            data,
        } => {
            config.check_network();
            let account = config.account()?;
            let to = Address::from_checksummed(to)?;
            let data = match data {
                Some(hex) => hexutil::decode(hex)?,
                None => Vec::new(),
            };
            let tx = UnsignedTransaction::new(*nonce, *gas_price, *gas_limit, to, *value)
                .with_data(data)
                .with_chain_id(config.chain_id);

            let signed = account.sign_transaction_observed(&tx, &LogObserver)?;
            transaction_report(&signed, &config.network)?.field("from", account.address())
        }
        CliCommand::DecodeTx { raw } => {
            let signed = SignedTransaction::decode_hex(raw)?;
            let sender = signed.recover_sender()?;
            transaction_report(&signed, &config.network)?
                .field("nonce", signed.transaction().nonce)?
                .field("gas_price", signed.transaction().gas_price)?
                .field("gas_limit", signed.transaction().gas_limit)?
                .field("to", signed.transaction().to)?
                .field("value", signed.transaction().value)?
                .field("data", hexutil::encode_prefixed(&signed.transaction().data))?
                .field("from", sender)
        }
        CliCommand::Balance { quantity, decimals } => {
            let balance = Balance::from_hex(quantity)?;
            Report::default()
                .field("raw", balance.raw())?
                .field("wei", balance.to_wei_decimal())?
                .field("ether", balance.to_ether_exact())?
                .field("display", balance.formatted(*decimals))
        }
    }
}

fn account_report(account: &Account) -> Result<Report, CliError> {
    Report::default()
        .field("address", account.address())?
        .field("public_key", account.public_key().to_hex_prefixed())
}

fn signature_report(signature: &Signature) -> Result<Report, CliError> {
    Report::default()
        .field("signature", signature.to_hex_prefixed())?
        .field("r", hexutil::encode_prefixed(signature.r))?
        .field("s", hexutil::encode_prefixed(signature.s))?
        .field("v", signature.v())
}

fn transaction_report(signed: &SignedTransaction, network: &str) -> Result<Report, CliError> {
    Report::default()
        .field("network", network)?
        .field("chain_id", signed.chain_id())?
        .field("raw", signed.encode_hex())?
        .field("hash", hexutil::encode_prefixed(signed.hash()))?
        .field("v", signed.v())?
        .field("r", hexutil::encode_prefixed(signed.signature().r))?
        .field("s", hexutil::encode_prefixed(signed.signature().s))
}
