use crate::ledger::Ledger;
use crate::randomizer::lamports_to_sol;
use tracing::{info, warn};

/// Floor reported when the rent query fails, in SOL.
pub const FALLBACK_TRANSFER_FLOOR: f64 = 0.001;

/// Resolves the rent-exempt minimum for a zero-data account, in SOL.
///
/// Informational only: failures fall back to [`FALLBACK_TRANSFER_FLOOR`] and
/// the value does not constrain transfer amounts.
pub async fn resolve_transfer_floor<L: Ledger>(ledger: &L) -> f64 {
    match ledger.minimum_balance_for_rent_exemption(0).await {
        Ok(lamports) => {
            let floor = lamports_to_sol(lamports);
            info!("Minimum balance required for rent exemption: {} SOL", floor);
            floor
        }
        Err(e) => {
            warn!(
                "Failed to fetch minimum balance for rent exemption ({}). Using default value {} SOL",
                e, FALLBACK_TRANSFER_FLOOR
            );
            FALLBACK_TRANSFER_FLOOR
        }
    }
}
