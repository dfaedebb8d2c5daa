use solana_sdk::signature::Signature;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Bad input detected before any network activity.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to derive keypair for account {index}: {reason}")]
    Derivation { index: usize, reason: String },

    #[error("network error: {0}")]
    Network(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

/// Outcome of a single failed transfer. Never aborts a run.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("send error: {0}")]
    Send(String),

    #[error("transaction error: {0}")]
    Rejected(String),

    #[error("timeout while confirming transaction {0}")]
    Timeout(Signature),
}

pub type Result<T> = std::result::Result<T, Error>;
