//! Inputs and outputs of spectrum synthesis.
//!
//! - [`BaseSpectrumContribution`]: one material's noiseless reference spectrum
//!   together with the dose and detector sensitivity that scale it
//! - [`AcquisitionContext`]: acquisition time and detector channel count for
//!   one synthesized spectrum
//! - [`SyntheticSpectrum`]: the sampled integer counts per channel
//!
//! The expected number of counts a contribution delivers is
//! `acquisition_time × dose × sensitivity`. A synthetic spectrum is the
//! elementwise sum of the independently sampled contributions.

use std::time::Duration;

use ndarray::{Array1, ArrayView1};
use spectrum_math::{clamp_counts, ChannelDensity};

use crate::error::SynthesisError;

/// Acquisition parameters shared by every contribution of one synthesis call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcquisitionContext {
    acquisition_time: Duration,
    channel_count: usize,
}

impl AcquisitionContext {
    /// Create a context from an acquisition time and a channel count.
    ///
    /// # Errors
    /// * `SynthesisError::InvalidAcquisitionTime` - Zero acquisition time
    /// * `SynthesisError::ZeroChannels` - Zero channel count
    pub fn new(acquisition_time: Duration, channel_count: usize) -> Result<Self, SynthesisError> {
        if acquisition_time.is_zero() {
            return Err(SynthesisError::InvalidAcquisitionTime(0.0));
        }
        if channel_count == 0 {
            return Err(SynthesisError::ZeroChannels);
        }
        Ok(Self {
            acquisition_time,
            channel_count,
        })
    }

    /// Create a context from an acquisition time in seconds.
    ///
    /// # Errors
    /// * `SynthesisError::InvalidAcquisitionTime` - Time is not a positive,
    ///   finite number of seconds
    /// * `SynthesisError::ZeroChannels` - Zero channel count
    pub fn from_secs_f64(seconds: f64, channel_count: usize) -> Result<Self, SynthesisError> {
        let acquisition_time = Duration::try_from_secs_f64(seconds)
            .map_err(|_| SynthesisError::InvalidAcquisitionTime(seconds))?;
        if acquisition_time.is_zero() {
            return Err(SynthesisError::InvalidAcquisitionTime(seconds));
        }
        Self::new(acquisition_time, channel_count)
    }

    /// Acquisition (live) time
    pub fn acquisition_time(&self) -> Duration {
        self.acquisition_time
    }

    /// Number of detector channels
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }
}

/// One material's reference spectrum scaled by dose and sensitivity.
///
/// Counts are kept exactly as supplied; negative and non-finite entries are
/// clamped to zero whenever a density is built from them.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseSpectrumContribution {
    counts: Vec<f64>,
    dose: f64,
    sensitivity: f64,
}

impl BaseSpectrumContribution {
    /// Create a contribution from per-channel counts.
    ///
    /// # Arguments
    /// * `counts` - Reference counts per channel (may contain negatives)
    /// * `dose` - Source dose for the scenario
    /// * `sensitivity` - Detector sensitivity to this material
    ///
    /// # Errors
    /// * `SynthesisError::InvalidDose` - Negative or non-finite dose
    /// * `SynthesisError::InvalidSensitivity` - Negative or non-finite sensitivity
    pub fn new(counts: Vec<f64>, dose: f64, sensitivity: f64) -> Result<Self, SynthesisError> {
        if !dose.is_finite() || dose < 0.0 {
            return Err(SynthesisError::InvalidDose(dose));
        }
        if !sensitivity.is_finite() || sensitivity < 0.0 {
            return Err(SynthesisError::InvalidSensitivity(sensitivity));
        }
        Ok(Self {
            counts,
            dose,
            sensitivity,
        })
    }

    /// Create a contribution from an integer histogram.
    pub fn from_integer_counts(
        counts: &[i64],
        dose: f64,
        sensitivity: f64,
    ) -> Result<Self, SynthesisError> {
        Self::new(counts.iter().map(|&c| c as f64).collect(), dose, sensitivity)
    }

    /// Create the contribution of a detector's internal calibration source.
    ///
    /// The calibration spectrum is scaled by time only: the dose is fixed at
    /// one and the sensitivity is the source's count rate, i.e. the sum of its
    /// clamped counts divided by the live time it was recorded over.
    ///
    /// # Errors
    /// * `SynthesisError::InvalidLiveTime` - Zero live time
    pub fn internal_calibration(
        counts: Vec<f64>,
        live_time: Duration,
    ) -> Result<Self, SynthesisError> {
        if live_time.is_zero() {
            return Err(SynthesisError::InvalidLiveTime(0.0));
        }
        let total: f64 = clamp_counts(&counts).iter().sum();
        let counts_per_second = total / live_time.as_secs_f64();
        Self::new(counts, 1.0, counts_per_second)
    }

    /// Reference counts as supplied
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    pub fn dose(&self) -> f64 {
        self.dose
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Number of channels in the reference spectrum
    pub fn channel_count(&self) -> usize {
        self.counts.len()
    }

    /// Expected total counts over the acquisition:
    /// `acquisition_time × dose × sensitivity`.
    pub fn expected_yield(&self, context: &AcquisitionContext) -> f64 {
        context.acquisition_time().as_secs_f64() * self.dose * self.sensitivity
    }

    /// Whether any channel holds a finite, positive count
    pub fn has_positive_counts(&self) -> bool {
        self.counts.iter().any(|&c| c.is_finite() && c > 0.0)
    }

    /// Normalized channel density, or `None` when the clamped counts sum to zero.
    pub fn density(&self) -> Option<ChannelDensity> {
        ChannelDensity::from_counts(&self.counts)
    }
}

/// Sampled detector counts per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticSpectrum {
    counts: Array1<u64>,
}

impl SyntheticSpectrum {
    /// An all-zero spectrum with the given number of channels
    pub fn zeros(channel_count: usize) -> Self {
        Self {
            counts: Array1::zeros(channel_count),
        }
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counts in one channel, or `None` past the last channel
    pub fn get(&self, channel: usize) -> Option<u64> {
        self.counts.get(channel).copied()
    }

    /// Sum of counts over all channels
    pub fn total_counts(&self) -> u64 {
        self.counts.sum()
    }

    /// View of the per-channel counts
    pub fn counts(&self) -> ArrayView1<'_, u64> {
        self.counts.view()
    }

    /// Per-channel counts as an owned vector
    pub fn to_vec(&self) -> Vec<u64> {
        self.counts.to_vec()
    }

    /// Add one independently sampled contribution into the spectrum.
    pub(crate) fn accumulate(&mut self, contribution: &Array1<u64>) {
        self.counts += contribution;
    }
}

impl From<SyntheticSpectrum> for Vec<u64> {
    fn from(spectrum: SyntheticSpectrum) -> Self {
        spectrum.counts.into_raw_vec()
    }
}
