//! Channel densities built from reference spectra.
//!
//! A base spectrum is a histogram of counts per detector channel. Background
//! subtraction and rebinning can leave negative or non-finite entries behind,
//! so counts are clamped to zero before they are interpreted as a density.
//! A spectrum whose clamped counts sum to zero has no density at all, and
//! [`ChannelDensity::from_counts`] reports that as `None` instead of dividing
//! by zero.

/// Replace negative and non-finite counts with zero.
///
/// # Arguments
/// * `counts` - Raw counts per channel
///
/// # Returns
/// A new vector of the same length with every entry finite and non-negative
pub fn clamp_counts(counts: &[f64]) -> Vec<f64> {
    counts
        .iter()
        .map(|&c| if c.is_finite() && c > 0.0 { c } else { 0.0 })
        .collect()
}

/// Normalized probability density over detector channels.
///
/// Holds the clamped counts normalized to unit sum, together with the largest
/// normalized value so rejection sampling can scale acceptance to the peak.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDensity {
    /// Probability of each channel, summing to one
    probabilities: Vec<f64>,
    /// Largest entry of `probabilities`
    peak: f64,
    /// Sum of the clamped counts the density was built from
    total_counts: f64,
}

impl ChannelDensity {
    /// Build a density from raw counts.
    ///
    /// Counts are clamped with [`clamp_counts`] first.
    ///
    /// # Returns
    /// * `Some(density)` - When the clamped counts have a positive sum
    /// * `None` - When every clamped count is zero (or `counts` is empty)
    pub fn from_counts(counts: &[f64]) -> Option<Self> {
        let clamped = clamp_counts(counts);
        let total_counts: f64 = clamped.iter().sum();

        if !(total_counts > 0.0) || !total_counts.is_finite() {
            return None;
        }

        let probabilities: Vec<f64> = clamped.iter().map(|&c| c / total_counts).collect();
        let peak = probabilities.iter().copied().fold(0.0_f64, f64::max);

        Some(Self {
            probabilities,
            peak,
            total_counts,
        })
    }

    /// Number of channels covered by the density
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// True when the density has no channels. Never true for a density
    /// returned by [`ChannelDensity::from_counts`].
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Per-channel probabilities, summing to one
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Largest per-channel probability
    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Sum of the clamped counts the density was built from
    pub fn total_counts(&self) -> f64 {
        self.total_counts
    }

    /// Probability of a channel relative to the peak channel, in [0, 1].
    ///
    /// This is the acceptance probability for rejection sampling with a
    /// uniform proposal over channels.
    pub fn relative_to_peak(&self, channel: usize) -> f64 {
        self.probabilities[channel] / self.peak
    }

    /// Expected counts per channel when `total_yield` counts are spread
    /// according to the density.
    pub fn expected_counts(&self, total_yield: f64) -> Vec<f64> {
        self.probabilities.iter().map(|&p| p * total_yield).collect()
    }
}
