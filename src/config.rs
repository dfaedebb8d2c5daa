use crate::error::Error;
use crate::randomizer::{AmountRange, PacingPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_mnemonic_file")]
    pub mnemonic_file: PathBuf,
    #[serde(default = "default_private_key_file")]
    pub private_key_file: PathBuf,
    #[serde(default = "default_address_count")]
    pub default_address_count: usize,
    #[serde(default = "default_min_amount")]
    pub min_amount: f64,
    #[serde(default = "default_max_amount")]
    pub max_amount: f64,
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_rpc_timeout_secs")]
    pub rpc_timeout_secs: u64,
    #[serde(default = "default_confirm_timeout_secs")]
    pub confirm_timeout_secs: u64,
    /// Fixed RNG seed; random per run when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_rpc_url() -> String {
    "https://api.mainnet-beta.solana.com".to_string()
}

fn default_mnemonic_file() -> PathBuf {
    PathBuf::from("accounts.json")
}

fn default_private_key_file() -> PathBuf {
    PathBuf::from("privateKeys.json")
}

fn default_address_count() -> usize {
    100
}

fn default_min_amount() -> f64 {
    0.001
}

fn default_max_amount() -> f64 {
    0.009
}

fn default_min_delay_ms() -> u64 {
    60_000
}

fn default_max_delay_ms() -> u64 {
    120_000
}

fn default_rpc_timeout_secs() -> u64 {
    30
}

fn default_confirm_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            mnemonic_file: default_mnemonic_file(),
            private_key_file: default_private_key_file(),
            default_address_count: default_address_count(),
            min_amount: default_min_amount(),
            max_amount: default_max_amount(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            rpc_timeout_secs: default_rpc_timeout_secs(),
            confirm_timeout_secs: default_confirm_timeout_secs(),
            seed: None,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).context("Failed to open config file")?;
        let config: Config =
            serde_yaml::from_reader(file).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists. An explicitly requested file must exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P, explicit: bool) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() || explicit {
            return Self::load(path)
                .with_context(|| format!("Failed to load config from {:?}", path));
        }
        info!("No config file at {:?}, using built-in defaults", path);
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.amount_range()?;
        self.pacing()?;
        if self.default_address_count == 0 {
            return Err(Error::config("default_address_count must be positive"));
        }
        Ok(())
    }

    pub fn amount_range(&self) -> Result<AmountRange, Error> {
        AmountRange::new(self.min_amount, self.max_amount)
    }

    pub fn pacing(&self) -> Result<PacingPolicy, Error> {
        PacingPolicy::new(self.min_delay_ms, self.max_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rpc_url: \"http://127.0.0.1:8899\"\nmin_delay_ms: 0\nmax_delay_ms: 10").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.rpc_url, "http://127.0.0.1:8899");
        assert_eq!(config.max_delay_ms, 10);
        assert_eq!(config.mnemonic_file, PathBuf::from("accounts.json"));
        assert_eq!(config.default_address_count, 100);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_amount: 0.5\nmax_amount: 0.1").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn missing_default_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let config = Config::load_or_default(&path, false).unwrap();
        assert_eq!(config.min_delay_ms, 60_000);
        assert!(Config::load_or_default(&path, true).is_err());
    }
}
