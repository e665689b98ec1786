//! Replicate generation for one scenario and detector pair.
//!
//! A replicate batch synthesizes the same contributions many times. Each
//! replicate gets its own generator seeded from the base seed plus its index,
//! so the batch is reproducible and independent of how the work is scheduled.

use log::info;
use rand::{thread_rng, RngCore};
use rayon::prelude::*;

use crate::error::SynthesisError;
use crate::sampling::SamplingStrategy;
use crate::spectrum::{AcquisitionContext, BaseSpectrumContribution, SyntheticSpectrum};
use crate::synthesizer::SpectrumSynthesizer;

/// Seed used for replicate `index` of a batch started from `base_seed`
pub fn replicate_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64)
}

/// Spectra produced by one replicate run, in replicate order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicateBatch {
    pub base_seed: u64,
    pub strategy: SamplingStrategy,
    pub spectra: Vec<SyntheticSpectrum>,
}

impl ReplicateBatch {
    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }

    /// Total counts of each replicate, as floats for summary statistics
    pub fn totals(&self) -> Vec<f64> {
        self.spectra
            .iter()
            .map(|spectrum| spectrum.total_counts() as f64)
            .collect()
    }

    /// Per-channel mean over all replicates.
    ///
    /// Returns an empty vector for an empty batch.
    pub fn mean_spectrum(&self) -> Vec<f64> {
        let Some(first) = self.spectra.first() else {
            return Vec::new();
        };

        let mut sums = vec![0.0; first.len()];
        for spectrum in &self.spectra {
            for (sum, count) in sums.iter_mut().zip(spectrum.counts().iter()) {
                *sum += *count as f64;
            }
        }

        let n = self.spectra.len() as f64;
        sums.into_iter().map(|sum| sum / n).collect()
    }
}

/// Generate a batch of replicate spectra.
///
/// Replicate `i` is synthesized with seed `replicate_seed(base_seed, i)`, so
/// the result is the same whether the batch runs in parallel or serially.
///
/// # Arguments
/// * `synthesizer` - Synthesizer carrying the sampling strategy
/// * `context` - Acquisition time and channel count shared by all replicates
/// * `contributions` - Base spectrum contributions, sampled in order
/// * `base_seed` - Seed of replicate 0; `None` draws one from thread-local entropy
/// * `replicates` - Number of spectra to generate
/// * `parallel` - Spread replicates over the rayon thread pool
///
/// # Errors
/// The first synthesis error encountered, if any replicate fails
pub fn generate_replicates(
    synthesizer: &SpectrumSynthesizer,
    context: &AcquisitionContext,
    contributions: &[BaseSpectrumContribution],
    base_seed: Option<u64>,
    replicates: usize,
    parallel: bool,
) -> Result<ReplicateBatch, SynthesisError> {
    let base_seed = base_seed.unwrap_or_else(|| thread_rng().next_u64());

    info!(
        "Generating {} replicates with {} from base seed {}",
        replicates,
        synthesizer.strategy(),
        base_seed
    );

    let synthesize_one = |index: usize| {
        synthesizer.synthesize(
            context,
            contributions,
            Some(replicate_seed(base_seed, index)),
        )
    };

    let spectra = if parallel {
        (0..replicates)
            .into_par_iter()
            .map(synthesize_one)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        (0..replicates)
            .map(synthesize_one)
            .collect::<Result<Vec<_>, _>>()?
    };

    info!("Finished {} replicates", spectra.len());

    Ok(ReplicateBatch {
        base_seed,
        strategy: synthesizer.strategy(),
        spectra,
    })
}
