//! Rejection sampling of channel placements.
//!
//! The total number of counts is drawn once from a Poisson distribution with
//! the expected yield as its mean. Each count is then placed by proposing a
//! channel uniformly at random and accepting it with probability equal to the
//! channel's density relative to the peak channel. Proposals come in batches
//! sized at [`OVERSAMPLE_FACTOR`] times the counts still to be placed, and
//! never fewer than [`OVERSAMPLE_FACTOR`] times the proposals one count needs
//! on average; a short batch is followed by another one until every count is
//! placed.
//!
//! Placement is exact: every count lands independently according to the
//! density. The price is the rejected proposals, `channels × peak` per
//! accepted count on average, with `peak` the largest channel probability.

use log::trace;
use ndarray::Array1;
use rand::Rng;
use spectrum_math::{sample_poisson, ChannelDensity};

use super::SynthesisRng;
use crate::error::SynthesisError;
use crate::spectrum::BaseSpectrumContribution;

/// Proposals per outstanding count in each batch
pub const OVERSAMPLE_FACTOR: u64 = 10;

/// Upper bound on proposal batches for a single contribution.
///
/// Every batch is expected to place at least [`OVERSAMPLE_FACTOR`] counts
/// (or all that remain), so a valid density finishes in roughly
/// `integral / OVERSAMPLE_FACTOR` batches. Running out of batches means the
/// generator is misbehaving, not that the density is sparse.
pub const MAX_BATCHES: usize = 100_000;

/// Smallest batch worth drawing for `density`: enough proposals to place
/// [`OVERSAMPLE_FACTOR`] counts on average.
///
/// A count is accepted with probability `1 / (channels × peak)`, where
/// `peak` is the largest channel probability.
fn min_batch_size(density: &ChannelDensity) -> u64 {
    let proposals_per_count = (density.len() as f64 * density.peak()).ceil().max(1.0);
    OVERSAMPLE_FACTOR.saturating_mul(proposals_per_count as u64)
}

/// Sample one contribution by rejection against its density.
///
/// # Errors
/// * `SynthesisError::RejectionBudgetExhausted` - [`MAX_BATCHES`] batches
///   did not place every count
pub fn sample_contribution(
    contribution: &BaseSpectrumContribution,
    expected_yield: f64,
    rng: &mut SynthesisRng,
) -> Result<Array1<u64>, SynthesisError> {
    let channels = contribution.channel_count();
    let mut counts = Array1::<u64>::zeros(channels);

    let Some(density) = contribution.density() else {
        return Ok(counts);
    };

    let integral = sample_poisson(expected_yield, rng);
    let min_batch = min_batch_size(&density);
    let mut accepted = 0u64;
    let mut batches = 0usize;

    while accepted < integral {
        if batches == MAX_BATCHES {
            return Err(SynthesisError::RejectionBudgetExhausted {
                accepted,
                target: integral,
                batches,
            });
        }
        batches += 1;

        let batch_size = (integral - accepted)
            .saturating_mul(OVERSAMPLE_FACTOR)
            .max(min_batch);
        for _ in 0..batch_size {
            let channel = rng.gen_range(0..channels);
            let threshold: f64 = rng.gen();

            // Strict comparison keeps zero-density channels from ever accepting
            if threshold < density.relative_to_peak(channel) {
                counts[channel] += 1;
                accepted += 1;
                if accepted == integral {
                    break;
                }
            }
        }
    }

    trace!(
        "Rejection sampling placed {} counts in {} batches",
        integral,
        batches
    );

    Ok(counts)
}
