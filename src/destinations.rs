use crate::error::{Error, Result};
use rand::Rng;
use solana_sdk::{
    pubkey::Pubkey,
    signer::{Signer, keypair::keypair_from_seed},
};

/// Parses the requested address count. Blank input selects `default`.
pub fn parse_address_count(input: &str, default: usize) -> Result<usize> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    match input.parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n)
            .map_err(|_| Error::config(format!("address count {n} is too large"))),
        _ => Err(Error::config(format!(
            "invalid number of addresses specified: {input:?}"
        ))),
    }
}

/// Generates `count` unrelated receive-only addresses.
///
/// Each address is the public half of a fresh ed25519 keypair seeded from
/// `rng`; the secret half is dropped immediately.
pub fn generate_addresses<R: Rng>(count: usize, rng: &mut R) -> Result<Vec<Pubkey>> {
    if count == 0 {
        return Err(Error::config("address count must be positive"));
    }
    (0..count)
        .map(|_| {
            let mut seed = [0u8; 32];
            rng.fill(&mut seed);
            keypair_from_seed(&seed)
                .map(|keypair| keypair.pubkey())
                .map_err(|e| Error::config(format!("failed to generate address: {e}")))
        })
        .collect()
}
