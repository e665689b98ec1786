use clap::Parser;

use crate::error::SynthesisError;
use crate::spectrum::{AcquisitionContext, BaseSpectrumContribution};

/// Common arguments shared across synthesis binaries
#[derive(Parser, Debug, Clone)]
pub struct SharedSynthesisArgs {
    /// Acquisition time in seconds
    #[arg(long, default_value_t = 120.0)]
    pub acquisition_time: f64,

    /// Number of detector channels
    #[arg(long, default_value_t = 1024)]
    pub channels: usize,

    /// Source dose applied to the base spectrum
    #[arg(long, default_value_t = 0.13)]
    pub dose: f64,

    /// Detector sensitivity in counts per second per unit dose
    #[arg(long, default_value_t = 17377.0)]
    pub sensitivity: f64,

    /// Base random seed; drawn from system entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SharedSynthesisArgs {
    pub fn context(&self) -> Result<AcquisitionContext, SynthesisError> {
        AcquisitionContext::from_secs_f64(self.acquisition_time, self.channels)
    }

    /// Wrap a base spectrum with the dose and sensitivity from the command line
    pub fn contribution(&self, counts: Vec<f64>) -> Result<BaseSpectrumContribution, SynthesisError> {
        BaseSpectrumContribution::new(counts, self.dose, self.sensitivity)
    }
}
