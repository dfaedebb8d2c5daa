use crate::error::{Error, TransferError};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::{fmt, str::FromStr};

/// How source credentials are supplied for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMethod {
    Mnemonic,
    RawKey,
}

impl FromStr for InputMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" | "mnemonic" | "seed" => Ok(InputMethod::Mnemonic),
            "1" | "raw-key" | "private-key" => Ok(InputMethod::RawKey),
            other => Err(Error::config(format!(
                "invalid input method selected: {other:?} (expected 0 for seed phrase, 1 for private key)"
            ))),
        }
    }
}

impl fmt::Display for InputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMethod::Mnemonic => write!(f, "seed phrase"),
            InputMethod::RawKey => write!(f, "private key"),
        }
    }
}

/// One (source, destination, amount) submission and its outcome.
#[derive(Debug)]
pub struct TransferAttempt {
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: f64,
    pub duration_ms: u64,
    pub status: TransferStatus,
}

#[derive(Debug)]
pub enum TransferStatus {
    Success(Signature),
    Failed(TransferError),
}

impl TransferStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferStatus::Success(_))
    }
}

/// Running totals for a distribution run.
///
/// `succeeded` only counts confirmed transfers, so it may finish below
/// `expected`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunCounters {
    pub expected: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_duration_ms: u64,
}

impl RunCounters {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            ..Default::default()
        }
    }

    pub fn record(&mut self, attempt: &TransferAttempt) {
        self.attempted += 1;
        self.total_duration_ms += attempt.duration_ms;
        if attempt.status.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn average_duration_ms(&self) -> u64 {
        if self.attempted == 0 {
            0
        } else {
            self.total_duration_ms / self.attempted as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_method_selectors() {
        assert_eq!("0".parse::<InputMethod>().unwrap(), InputMethod::Mnemonic);
        assert_eq!(" 1\n".parse::<InputMethod>().unwrap(), InputMethod::RawKey);
        assert_eq!(
            "raw-key".parse::<InputMethod>().unwrap(),
            InputMethod::RawKey
        );
    }

    #[test]
    fn rejects_unknown_method() {
        let err = "2".parse::<InputMethod>().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(matches!("".parse::<InputMethod>(), Err(Error::Config(_))));
    }

    #[test]
    fn counters_track_outcomes() {
        let mut counters = RunCounters::new(2);
        counters.record(&TransferAttempt {
            from: Pubkey::new_unique(),
            to: Pubkey::new_unique(),
            amount: 0.002,
            duration_ms: 30,
            status: TransferStatus::Success(Signature::default()),
        });
        counters.record(&TransferAttempt {
            from: Pubkey::new_unique(),
            to: Pubkey::new_unique(),
            amount: 0.004,
            duration_ms: 10,
            status: TransferStatus::Failed(TransferError::Send("dropped".into())),
        });

        assert_eq!(counters.attempted, 2);
        assert_eq!(counters.succeeded, 1);
        assert_eq!(counters.failed, 1);
        assert_eq!(counters.average_duration_ms(), 20);
    }
}
