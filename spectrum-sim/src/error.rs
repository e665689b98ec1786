//! Error types for spectrum synthesis.

use spectrum_math::CategoricalError;
use thiserror::Error;

/// Errors raised while validating synthesis inputs or sampling a spectrum.
///
/// Degenerate contributions (all-zero or fully negative counts, zero dose)
/// are not errors; they contribute nothing to the output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    #[error("Detector channel count must be positive")]
    ZeroChannels,

    #[error("Acquisition time must be positive and finite, got {0} s")]
    InvalidAcquisitionTime(f64),

    #[error("Contribution {index} has {actual} channels, detector has {expected}")]
    ChannelCountMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Dose must be non-negative and finite, got {0}")]
    InvalidDose(f64),

    #[error("Sensitivity must be non-negative and finite, got {0}")]
    InvalidSensitivity(f64),

    #[error("Calibration live time must be positive, got {0} s")]
    InvalidLiveTime(f64),

    #[error(
        "Rejection sampling accepted {accepted} of {target} counts after {batches} batches"
    )]
    RejectionBudgetExhausted {
        accepted: u64,
        target: u64,
        batches: usize,
    },

    #[error(transparent)]
    Categorical(#[from] CategoricalError),
}
