//! Bounded random transfer amounts and inter-transfer delays.

use crate::error::{Error, Result};
use rand::Rng;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use std::time::Duration;

/// Amounts are drawn on a 0.001 SOL grid.
const AMOUNT_SCALE: f64 = 1_000.0;

/// Closed SOL interval for transfer amounts, held as 0.001 SOL steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange {
    min_step: u64,
    max_step: u64,
}

impl AmountRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 {
            return Err(Error::config(format!(
                "transfer amounts must be finite and positive (got {min}..{max})"
            )));
        }
        if min > max {
            return Err(Error::config(format!(
                "min_amount {min} is greater than max_amount {max}"
            )));
        }
        let (Some(min_step), Some(max_step)) = (grid_step(min), grid_step(max)) else {
            return Err(Error::config(format!(
                "amount bounds {min}..{max} must be multiples of 0.001 SOL"
            )));
        };
        Ok(Self { min_step, max_step })
    }
}

/// Bounds for the randomized pause taken between transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl PacingPolicy {
    pub fn new(min_delay_ms: u64, max_delay_ms: u64) -> Result<Self> {
        if min_delay_ms > max_delay_ms {
            return Err(Error::config(format!(
                "min_delay_ms {min_delay_ms} is greater than max_delay_ms {max_delay_ms}"
            )));
        }
        Ok(Self {
            min_delay_ms,
            max_delay_ms,
        })
    }

    #[cfg(test)]
    pub fn immediate() -> Self {
        Self {
            min_delay_ms: 0,
            max_delay_ms: 0,
        }
    }
}

// Exact grid position of `sol`, or None when it lies between steps.
fn grid_step(sol: f64) -> Option<u64> {
    let scaled = sol * AMOUNT_SCALE;
    let step = scaled.round();
    ((scaled - step).abs() <= 1e-9 && step >= 1.0).then_some(step as u64)
}

pub struct Randomizer<R> {
    rng: R,
    amounts: AmountRange,
    pacing: PacingPolicy,
}

impl<R: Rng> Randomizer<R> {
    pub fn new(rng: R, amounts: AmountRange, pacing: PacingPolicy) -> Self {
        Self {
            rng,
            amounts,
            pacing,
        }
    }

    /// Uniform amount in SOL at 3-decimal precision, inside the range.
    pub fn next_amount(&mut self) -> f64 {
        let step = self
            .rng
            .gen_range(self.amounts.min_step..=self.amounts.max_step);
        step as f64 / AMOUNT_SCALE
    }

    pub fn next_delay(&mut self) -> Duration {
        Duration::from_millis(
            self.rng
                .gen_range(self.pacing.min_delay_ms..=self.pacing.max_delay_ms),
        )
    }

    /// Shared with address generation so one seed reproduces a whole run.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64).round() as u64
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn randomizer(seed: u64) -> Randomizer<StdRng> {
        Randomizer::new(
            StdRng::seed_from_u64(seed),
            AmountRange::new(0.001, 0.009).unwrap(),
            PacingPolicy::new(60_000, 120_000).unwrap(),
        )
    }

    #[test]
    fn amounts_stay_in_range_at_three_decimals() {
        let mut r = randomizer(7);
        for _ in 0..1_000 {
            let amount = r.next_amount();
            assert!((0.001..=0.009).contains(&amount), "{amount}");
            let scaled = amount * 1_000.0;
            assert!((scaled - scaled.round()).abs() < 1e-9, "{amount}");
        }
    }

    #[test]
    fn delays_stay_in_range() {
        let mut r = randomizer(11);
        for _ in 0..1_000 {
            let delay = r.next_delay().as_millis() as u64;
            assert!((60_000..=120_000).contains(&delay), "{delay}");
        }
    }

    #[test]
    fn seeded_sequences_repeat() {
        let mut a = randomizer(42);
        let mut b = randomizer(42);
        for _ in 0..20 {
            assert_eq!(a.next_amount(), b.next_amount());
            assert_eq!(a.next_delay(), b.next_delay());
        }
    }

    #[test]
    fn successive_amounts_vary() {
        let mut r = randomizer(3);
        let first = r.next_amount();
        assert!((0..50).any(|_| r.next_amount() != first));
    }

    #[test]
    fn immediate_policy_never_waits() {
        let mut r = Randomizer::new(
            StdRng::seed_from_u64(0),
            AmountRange::new(0.001, 0.009).unwrap(),
            PacingPolicy::immediate(),
        );
        assert_eq!(r.next_delay(), Duration::ZERO);
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(AmountRange::new(0.009, 0.001).is_err());
        assert!(AmountRange::new(0.0, 0.001).is_err());
        assert!(AmountRange::new(0.0011, 0.0019).is_err());
        assert!(AmountRange::new(f64::NAN, 0.001).is_err());
        assert!(AmountRange::new(1e-9, 0.009).is_err());
        assert!(PacingPolicy::new(10, 5).is_err());
    }

    #[test]
    fn off_grid_bounds_are_rejected_not_widened() {
        let err = AmountRange::new(0.0010000001, 0.009).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{err}");
        assert!(AmountRange::new(0.001, 0.0089999999).is_err());
    }

    #[test]
    fn single_step_range_always_draws_that_step() {
        let mut r = Randomizer::new(
            StdRng::seed_from_u64(1),
            AmountRange::new(0.005, 0.005).unwrap(),
            PacingPolicy::new(0, 0).unwrap(),
        );
        for _ in 0..100 {
            assert_eq!(r.next_amount(), 0.005);
        }
    }

    #[test]
    fn draws_never_leave_configured_bounds() {
        let (min, max) = (0.002, 0.004);
        let mut r = Randomizer::new(
            StdRng::seed_from_u64(99),
            AmountRange::new(min, max).unwrap(),
            PacingPolicy::new(0, 0).unwrap(),
        );
        let draws: Vec<f64> = (0..5_000).map(|_| r.next_amount()).collect();
        assert!(draws.iter().all(|a| (min..=max).contains(a)));
        assert!(draws.contains(&min));
        assert!(draws.contains(&max));
    }

    #[test]
    fn converts_lamports() {
        assert_eq!(sol_to_lamports(0.007), 7_000_000);
        assert_eq!(sol_to_lamports(0.009), 9_000_000);
        assert_eq!(lamports_to_sol(890_880), 0.00089088);
    }
}
