//! Poisson bin-wise re-sampling.
//!
//! The reference spectrum is scaled so its channels sum to the expected
//! yield, then each channel is replaced by an independent Poisson draw with
//! that channel's scaled value as its mean. Cost is one draw per channel
//! regardless of the yield.
//!
//! Channels are sampled independently, so the total count is itself Poisson
//! with the expected yield as its mean.

use ndarray::Array1;
use spectrum_math::sample_poisson;

use super::SynthesisRng;
use crate::error::SynthesisError;
use crate::spectrum::BaseSpectrumContribution;

/// Sample one contribution with per-channel Poisson draws.
///
/// A contribution with no density (all clamped counts zero) returns zeros
/// without drawing. Channels with a zero mean are zero and consume no draws.
pub fn sample_contribution(
    contribution: &BaseSpectrumContribution,
    expected_yield: f64,
    rng: &mut SynthesisRng,
) -> Result<Array1<u64>, SynthesisError> {
    let Some(density) = contribution.density() else {
        return Ok(Array1::zeros(contribution.channel_count()));
    };

    let means = Array1::from(density.expected_counts(expected_yield));
    Ok(means.mapv(|mean| sample_poisson(mean, rng)))
}
