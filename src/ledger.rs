//! Network-facing operations the distributor depends on.

use crate::error::{Error, Result, TransferError};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
    transaction::Transaction,
};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub trait Ledger {
    /// Minimum lamports an account of `data_len` bytes must hold to be rent exempt.
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;

    /// Builds, signs, submits and confirms a single system transfer.
    async fn submit_transfer(
        &self,
        from: &Keypair,
        to: &Pubkey,
        lamports: u64,
    ) -> std::result::Result<Signature, TransferError>;
}

pub struct RpcLedger {
    rpc_client: RpcClient,
    confirm_timeout: Duration,
}

impl RpcLedger {
    pub fn new(rpc_url: &str, rpc_timeout: Duration, confirm_timeout: Duration) -> Self {
        let rpc_client = RpcClient::new_with_timeout_and_commitment(
            rpc_url.to_string(),
            rpc_timeout,
            CommitmentConfig::confirmed(),
        );
        Self {
            rpc_client,
            confirm_timeout,
        }
    }

    async fn await_confirmation(
        &self,
        signature: &Signature,
    ) -> std::result::Result<(), TransferError> {
        let end_time = Instant::now() + self.confirm_timeout;

        while Instant::now() < end_time {
            match self.rpc_client.get_signature_status(signature).await {
                Ok(Some(Ok(()))) => return Ok(()),
                Ok(Some(Err(e))) => return Err(TransferError::Rejected(e.to_string())),
                Ok(None) => sleep(Duration::from_millis(500)).await,
                Err(e) => {
                    warn!("Error checking signature status: {}", e);
                    sleep(Duration::from_millis(1000)).await;
                }
            }
        }

        Err(TransferError::Timeout(*signature))
    }
}

impl Ledger for RpcLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        self.rpc_client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }

    async fn submit_transfer(
        &self,
        from: &Keypair,
        to: &Pubkey,
        lamports: u64,
    ) -> std::result::Result<Signature, TransferError> {
        let from_pubkey = from.pubkey();
        debug!("Creating transaction from {} to {}", from_pubkey, to);

        let recent_blockhash = self
            .rpc_client
            .get_latest_blockhash()
            .await
            .map_err(|e| TransferError::Send(format!("failed to get recent blockhash: {e}")))?;

        let instruction = system_instruction::transfer(&from_pubkey, to, lamports);
        let tx = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&from_pubkey),
            &[from],
            recent_blockhash,
        );

        let signature = self
            .rpc_client
            .send_transaction_with_config(&tx, RpcSendTransactionConfig {
                skip_preflight: false,
                preflight_commitment: Some(CommitmentConfig::confirmed().commitment),
                max_retries: Some(5),
                ..Default::default()
            })
            .await
            .map_err(|e| TransferError::Send(e.to_string()))?;

        info!("Confirming transaction: {}", signature);
        self.await_confirmation(&signature).await?;
        Ok(signature)
    }
}
