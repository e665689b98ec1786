//! spectrum-math - Sampling primitives for detector spectrum synthesis
//!
//! This crate provides the numeric building blocks used to turn noiseless
//! reference spectra into statistically sampled count spectra:
//!
//! - **Poisson** - Guarded Poisson draws for total yields and per-channel means
//! - **Density** - Zero-clamped, normalized channel densities
//! - **Categorical** - Inverse-transform sampling of channel indices
//! - **Statistics** - Summary statistics for validating sampled spectra
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use spectrum_math::{sample_poisson, CategoricalSampler, ChannelDensity};
//!
//! let density = ChannelDensity::from_counts(&[0.0, 10.0, 30.0, -5.0]).unwrap();
//! let sampler = CategoricalSampler::new(&density).unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let integral = sample_poisson(250.0, &mut rng);
//!
//! let mut channels = vec![0u64; density.len()];
//! sampler.sample_into(integral, &mut rng, &mut channels);
//! assert_eq!(channels.iter().sum::<u64>(), integral);
//! assert_eq!(channels[3], 0);
//! ```

pub mod categorical;
pub mod density;
pub mod poisson;
pub mod stats;

pub use categorical::{CategoricalError, CategoricalSampler};
pub use density::{clamp_counts, ChannelDensity};
pub use poisson::sample_poisson;
pub use stats::{mean, median, variance};
