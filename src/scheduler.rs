//! The distribution loop: every source account sends to every destination,
//! one transfer at a time, with a randomized pause between attempts.

use crate::credentials::SourceCredential;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::pacer::Pacer;
use crate::randomizer::{Randomizer, sol_to_lamports};
use crate::types::{RunCounters, TransferAttempt, TransferStatus};
use rand::Rng;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use std::time::Instant;
use tracing::{error, info};

pub struct Distributor<L, P, R> {
    ledger: L,
    pacer: P,
    randomizer: Randomizer<R>,
}

impl<L: Ledger, P: Pacer, R: Rng> Distributor<L, P, R> {
    pub fn new(ledger: L, pacer: P, randomizer: Randomizer<R>) -> Self {
        Self {
            ledger,
            pacer,
            randomizer,
        }
    }

    /// Sends from each credential, in file order, to each destination, in
    /// generated order.
    ///
    /// A failed transfer is logged and skipped. A credential that cannot be
    /// derived aborts the run.
    pub async fn run(
        &mut self,
        credentials: &[SourceCredential],
        destinations: &[Pubkey],
    ) -> Result<RunCounters> {
        let mut counters = RunCounters::new(credentials.len() * destinations.len());

        for (index, credential) in credentials.iter().enumerate() {
            let from = credential.derive(index + 1)?;
            info!("Sending SOL from account {}: {}", index + 1, from.pubkey());

            for to in destinations {
                self.send_one(&from, to, &mut counters).await;

                let delay = self.randomizer.next_delay();
                info!("Waiting {} seconds", delay.as_secs_f64());
                self.pacer.pause(delay).await;
            }
        }

        info!(
            "Distribution finished: {}/{} transfers succeeded",
            counters.succeeded, counters.expected
        );
        Ok(counters)
    }

    async fn send_one(&mut self, from: &Keypair, to: &Pubkey, counters: &mut RunCounters) {
        let amount = self.randomizer.next_amount();
        let start = Instant::now();

        let status = match self
            .ledger
            .submit_transfer(from, to, sol_to_lamports(amount))
            .await
        {
            Ok(signature) => TransferStatus::Success(signature),
            Err(e) => TransferStatus::Failed(e),
        };

        let attempt = TransferAttempt {
            from: from.pubkey(),
            to: *to,
            amount,
            duration_ms: start.elapsed().as_millis() as u64,
            status,
        };
        counters.record(&attempt);

        match &attempt.status {
            TransferStatus::Success(signature) => {
                info!(
                    "Successfully sent {:.3} SOL to {} ({})",
                    attempt.amount, attempt.to, signature
                );
                info!(
                    "Transaction {}/{} done",
                    counters.succeeded, counters.expected
                );
            }
            TransferStatus::Failed(e) => {
                error!(
                    "Failed to send {:.3} SOL from {} to {}: {}",
                    attempt.amount, attempt.from, attempt.to, e
                );
            }
        }
    }
}
