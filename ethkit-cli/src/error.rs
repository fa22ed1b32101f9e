use core::fmt;

use ethkit::EthKitError;

/// Errors reported by the command-line front end.
#[derive(Debug)]
pub enum CliError {
    /// The core rejected an input or operation.
    EthKit(EthKitError),
    /// A command needs a key and none was configured.
    MissingPrivateKey,
    /// Output serialization failed.
    Json(serde_json::Error),
}

impl From<EthKitError> for CliError {
    fn from(e: EthKitError) -> Self {
        Self::EthKit(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EthKit(e) => write!(f, "{} (code {})", e, e.code()),
            Self::MissingPrivateKey => {
                f.write_str("no private key: pass --private-key or set ETHKIT_PRIVATE_KEY")
            }
            Self::Json(e) => write!(f, "JSON output failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {}
