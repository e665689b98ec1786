//! spectrum-sim - Stochastic synthesis of detector count spectra
//!
//! Turns noiseless reference ("base") spectra, each scaled by a source dose
//! and a detector sensitivity, into a sampled integer count spectrum for a
//! requested acquisition time. Counting statistics are Poisson and a fixed
//! seed reproduces the output bit for bit.
//!
//! # Modules
//!
//! - **spectrum** - Contributions, acquisition context and the synthetic spectrum
//! - **sampling** - The three sampling strategies and their registry
//! - **synthesizer** - Seeds the generator and combines sampled contributions
//! - **replicates** - Reproducible batches of replicate spectra, serial or parallel
//! - **settings** - Persisted strategy and seed configuration
//! - **reference_spectra** - Reference shapes for benchmarks and the CLI
//!
//! # Example
//!
//! ```
//! use spectrum_sim::{AcquisitionContext, BaseSpectrumContribution, SamplingStrategy};
//!
//! let context = AcquisitionContext::from_secs_f64(60.0, 256).unwrap();
//! let background = BaseSpectrumContribution::new(vec![10.0; 256], 0.5, 40.0).unwrap();
//!
//! let spectrum = SamplingStrategy::InverseTransform
//!     .synthesize(&context, &[background], Some(1))
//!     .unwrap();
//! assert_eq!(spectrum.len(), 256);
//! ```

pub mod error;
pub mod reference_spectra;
pub mod replicates;
pub mod sampling;
pub mod settings;
pub mod shared_args;
pub mod spectrum;
pub mod synthesizer;

pub use error::SynthesisError;
pub use replicates::{generate_replicates, replicate_seed, ReplicateBatch};
pub use sampling::{SamplingStrategy, SynthesisRng, STRATEGY_TABLE};
pub use settings::{SettingsError, SynthesisSettings};
pub use spectrum::{AcquisitionContext, BaseSpectrumContribution, SyntheticSpectrum};
pub use synthesizer::SpectrumSynthesizer;
