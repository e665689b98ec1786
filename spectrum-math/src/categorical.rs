//! Inverse-transform sampling of channel indices.
//!
//! [`CategoricalSampler`] draws channel indices from a [`ChannelDensity`] by
//! inverting its cumulative distribution: each draw takes one uniform number
//! and binary-searches the cumulative weights, so every draw lands in a
//! channel and no work is wasted on rejections.

use crate::density::ChannelDensity;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::Rng;
use thiserror::Error;

/// Errors raised while building a categorical sampler.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CategoricalError {
    #[error("Density weights are not usable for sampling: {0}")]
    InvalidWeights(#[from] WeightedError),
}

/// Draws channel indices according to a channel density.
#[derive(Debug, Clone)]
pub struct CategoricalSampler {
    index: WeightedIndex<f64>,
    channels: usize,
}

impl CategoricalSampler {
    /// Build a sampler for the given density.
    ///
    /// # Errors
    /// * `CategoricalError::InvalidWeights` - The cumulative weights could not
    ///   be built (e.g. the density has no channels)
    pub fn new(density: &ChannelDensity) -> Result<Self, CategoricalError> {
        let index = WeightedIndex::new(density.probabilities())?;
        Ok(Self {
            index,
            channels: density.len(),
        })
    }

    /// Number of channels indices are drawn from
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Draw a single channel index
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.index.sample(rng)
    }

    /// Draw `n` channel indices and increment the matching entries of
    /// `accumulator`.
    ///
    /// # Panics
    /// If `accumulator` is shorter than the number of channels.
    pub fn sample_into<R: Rng + ?Sized>(&self, n: u64, rng: &mut R, accumulator: &mut [u64]) {
        assert!(
            accumulator.len() >= self.channels,
            "Accumulator has {} channels, sampler needs {}",
            accumulator.len(),
            self.channels
        );

        for _ in 0..n {
            accumulator[self.index.sample(rng)] += 1;
        }
    }
}
