//! Source-account secrets: loading the credential lists and deriving keypairs.

use crate::error::{Error, Result};
use crate::types::InputMethod;
use bip39::{Language, Mnemonic, Seed};
use serde::Deserialize;
use solana_sdk::{
    derivation_path::DerivationPath,
    signer::keypair::{Keypair, keypair_from_seed_and_derivation_path},
};
use std::path::Path;
use tracing::debug;

const KEYPAIR_LENGTH: usize = 64;

/// A secret for one funded account, as read from the credential file.
#[derive(Clone, PartialEq, Eq)]
pub enum SourceCredential {
    Mnemonic(String),
    PrivateKey(Vec<u8>),
}

// Secrets stay out of logs and error output.
impl std::fmt::Debug for SourceCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceCredential::Mnemonic(_) => f.write_str("Mnemonic(..)"),
            SourceCredential::PrivateKey(_) => f.write_str("PrivateKey(..)"),
        }
    }
}

/// Private keys may be a base58 string or a JSON byte array as written by
/// `solana-keygen`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Text(String),
    Bytes(Vec<u8>),
}

pub fn load_credentials<P: AsRef<Path>>(
    method: InputMethod,
    path: P,
) -> Result<Vec<SourceCredential>> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("failed to read {}: {e}", path.display())))?;
    let credentials = parse_credentials(method, &data)
        .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
    debug!(
        "Loaded {} {} credentials from {}",
        credentials.len(),
        method,
        path.display()
    );
    Ok(credentials)
}

pub fn parse_credentials(
    method: InputMethod,
    data: &str,
) -> std::result::Result<Vec<SourceCredential>, String> {
    let entries: Vec<RawEntry> = serde_json::from_str(data)
        .map_err(|e| format!("is not set correctly: expected a JSON list ({e})"))?;
    if entries.is_empty() {
        return Err("is not set correctly or is empty".to_string());
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| match (method, entry) {
            (_, RawEntry::Text(text)) if text.trim().is_empty() => {
                Err(format!("entry {} is blank", i + 1))
            }
            (InputMethod::Mnemonic, RawEntry::Text(phrase)) => Ok(SourceCredential::Mnemonic(
                phrase.split_whitespace().collect::<Vec<_>>().join(" "),
            )),
            (InputMethod::Mnemonic, RawEntry::Bytes(_)) => {
                Err(format!("entry {} is not a seed phrase", i + 1))
            }
            (InputMethod::RawKey, RawEntry::Text(key)) => bs58::decode(key.trim())
                .into_vec()
                .map(SourceCredential::PrivateKey)
                .map_err(|e| format!("entry {} is not valid base58: {e}", i + 1)),
            (InputMethod::RawKey, RawEntry::Bytes(bytes)) => {
                Ok(SourceCredential::PrivateKey(bytes))
            }
        })
        .collect()
}

impl SourceCredential {
    /// Derives the signing keypair. `index` is the 1-based position in the
    /// credential file and only used for error context.
    pub fn derive(&self, index: usize) -> Result<Keypair> {
        let derivation = |reason: String| Error::Derivation { index, reason };
        match self {
            SourceCredential::Mnemonic(phrase) => {
                let mnemonic = Mnemonic::from_phrase(phrase, Language::English)
                    .map_err(|e| derivation(format!("invalid seed phrase: {e}")))?;
                let seed = Seed::new(&mnemonic, "");
                keypair_from_seed_and_derivation_path(
                    seed.as_bytes(),
                    Some(DerivationPath::new_bip44(Some(0), Some(0))),
                )
                .map_err(|e| derivation(e.to_string()))
            }
            SourceCredential::PrivateKey(bytes) => {
                if bytes.len() != KEYPAIR_LENGTH {
                    return Err(derivation(format!(
                        "private key must be {KEYPAIR_LENGTH} bytes, got {}",
                        bytes.len()
                    )));
                }
                Keypair::from_bytes(bytes).map_err(|e| derivation(e.to_string()))
            }
        }
    }
}
