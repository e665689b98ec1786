//! Inverse transform sampling of channel placements.
//!
//! Like rejection sampling, the total number of counts is one Poisson draw
//! with the expected yield as its mean. The counts are then placed in a
//! single batched categorical draw: each count takes one uniform number and
//! inverts the cumulative channel density, so no proposal is ever wasted.

use ndarray::Array1;
use spectrum_math::{sample_poisson, CategoricalSampler};

use super::SynthesisRng;
use crate::error::SynthesisError;
use crate::spectrum::BaseSpectrumContribution;

/// Sample one contribution by inverting its cumulative density.
///
/// # Errors
/// * `SynthesisError::Categorical` - The density could not be turned into
///   cumulative weights
pub fn sample_contribution(
    contribution: &BaseSpectrumContribution,
    expected_yield: f64,
    rng: &mut SynthesisRng,
) -> Result<Array1<u64>, SynthesisError> {
    let channels = contribution.channel_count();

    let Some(density) = contribution.density() else {
        return Ok(Array1::zeros(channels));
    };

    let integral = sample_poisson(expected_yield, rng);
    if integral == 0 {
        return Ok(Array1::zeros(channels));
    }

    let sampler = CategoricalSampler::new(&density)?;
    let mut placed = vec![0u64; channels];
    sampler.sample_into(integral, rng, &mut placed);

    Ok(Array1::from(placed))
}
