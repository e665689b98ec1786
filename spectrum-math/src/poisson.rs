//! Guarded Poisson sampling.
//!
//! Both the total yield of a source contribution and the per-channel counts of
//! the bin-wise strategy are Poisson draws. The distribution in `rand_distr`
//! rejects a zero mean, but a zero mean is a perfectly ordinary input here
//! (zero dose, empty channel), so the guard lives in one place.

use rand::Rng;
use rand_distr::{Distribution, Poisson};

/// Draw a Poisson-distributed count with the given mean.
///
/// A mean that is zero, negative or not finite yields zero without consuming
/// any random numbers. Callers validate their inputs before this point, so a
/// non-finite mean only arrives here from a degenerate contribution.
///
/// # Arguments
/// * `mean` - Expected number of counts
/// * `rng` - Random number generator to draw from
///
/// # Returns
/// The sampled number of counts
pub fn sample_poisson<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> u64 {
    if !mean.is_finite() || mean <= 0.0 {
        return 0;
    }

    match Poisson::new(mean) {
        Ok(poisson) => {
            let draw: f64 = poisson.sample(rng);
            draw as u64
        }
        Err(_) => 0,
    }
}
