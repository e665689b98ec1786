//! Sampling strategies for spectrum synthesis.
//!
//! Three interchangeable algorithms turn one [`BaseSpectrumContribution`] into
//! sampled channel counts:
//!
//! - **Rejection Sampling** ([`rejection`]): exact placement of a Poisson
//!   total by accepting uniformly proposed channels against the density
//! - **Poisson Re-sampling** ([`poisson`]): one independent Poisson draw per
//!   channel, fastest
//! - **Inverse Transform Sampling** ([`inversion`]): exact placement of a
//!   Poisson total by inverting the cumulative density, no wasted draws
//!
//! The active algorithm is a [`SamplingStrategy`] value. Each variant maps
//! through [`STRATEGY_TABLE`] to its implementation, a stable key used when
//! the choice is persisted, and a readable label for display.

pub mod inversion;
pub mod poisson;
pub mod rejection;

use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::SynthesisError;
use crate::spectrum::BaseSpectrumContribution;

/// Random number generator threaded through one synthesis call.
///
/// ChaCha streams are stable across platforms and crate releases, so a seed
/// reproduces the same spectrum wherever it is replayed.
pub type SynthesisRng = ChaCha8Rng;

/// Samples one contribution given its expected yield.
///
/// Returns the sampled counts per channel, with the contribution's channel count.
pub type ContributionSampler = fn(
    &BaseSpectrumContribution,
    f64,
    &mut SynthesisRng,
) -> Result<Array1<u64>, SynthesisError>;

/// Algorithm used to sample a synthetic spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SamplingStrategy {
    /// Exact placement by uniform proposal and acceptance against the density
    #[serde(rename = "rejection")]
    Rejection,
    /// Independent Poisson draw per channel
    #[serde(rename = "poisson")]
    Poisson,
    /// Exact placement by inverting the cumulative density
    #[serde(rename = "inversion")]
    InverseTransform,
}

/// Registry entry tying a strategy to its implementation and names.
pub struct StrategyEntry {
    pub strategy: SamplingStrategy,
    /// Stable identity used when persisting the choice
    pub key: &'static str,
    /// Readable name for configuration surfaces
    pub label: &'static str,
    /// One-line description of the algorithm
    pub description: &'static str,
    pub sampler: ContributionSampler,
}

/// Every available strategy, in presentation order.
pub const STRATEGY_TABLE: [StrategyEntry; 3] = [
    StrategyEntry {
        strategy: SamplingStrategy::Rejection,
        key: "rejection",
        label: "Rejection Sampling",
        description: "Places a Poisson total by accepting uniformly proposed channels \
                      against the normalized density",
        sampler: rejection::sample_contribution,
    },
    StrategyEntry {
        strategy: SamplingStrategy::Poisson,
        key: "poisson",
        label: "Poisson Re-sampling",
        description: "Very quick bin-by-bin Poisson re-sampling of the scaled spectrum",
        sampler: poisson::sample_contribution,
    },
    StrategyEntry {
        strategy: SamplingStrategy::InverseTransform,
        key: "inversion",
        label: "Inverse Transform Sampling",
        description: "Places a Poisson total by inverting the cumulative density, \
                      one draw per count",
        sampler: inversion::sample_contribution,
    },
];

impl SamplingStrategy {
    /// All strategies, in presentation order
    pub const ALL: [SamplingStrategy; 3] = [
        SamplingStrategy::Rejection,
        SamplingStrategy::Poisson,
        SamplingStrategy::InverseTransform,
    ];

    /// Registry entry for this strategy
    pub fn entry(self) -> &'static StrategyEntry {
        match self {
            SamplingStrategy::Rejection => &STRATEGY_TABLE[0],
            SamplingStrategy::Poisson => &STRATEGY_TABLE[1],
            SamplingStrategy::InverseTransform => &STRATEGY_TABLE[2],
        }
    }

    /// Stable identity key, e.g. `"inversion"`
    pub fn key(self) -> &'static str {
        self.entry().key
    }

    /// Readable name, e.g. `"Inverse Transform Sampling"`
    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn description(self) -> &'static str {
        self.entry().description
    }

    /// Sample one contribution with this strategy
    pub fn sample_contribution(
        self,
        contribution: &BaseSpectrumContribution,
        expected_yield: f64,
        rng: &mut SynthesisRng,
    ) -> Result<Array1<u64>, SynthesisError> {
        (self.entry().sampler)(contribution, expected_yield, rng)
    }
}

impl Default for SamplingStrategy {
    fn default() -> Self {
        SamplingStrategy::InverseTransform
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SamplingStrategy {
    type Err = String;

    /// Parse a strategy from its key or its label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        STRATEGY_TABLE
            .iter()
            .find(|entry| {
                entry.key.eq_ignore_ascii_case(wanted) || entry.label.eq_ignore_ascii_case(wanted)
            })
            .map(|entry| entry.strategy)
            .ok_or_else(|| {
                let keys: Vec<&str> = STRATEGY_TABLE.iter().map(|entry| entry.key).collect();
                format!(
                    "Unknown sampling strategy: {}. Valid options: {}",
                    s,
                    keys.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_variants() {
        for strategy in SamplingStrategy::ALL {
            assert_eq!(strategy.entry().strategy, strategy);
        }
    }

    #[test]
    fn test_parse_key_and_label() {
        assert_eq!(
            "poisson".parse::<SamplingStrategy>().unwrap(),
            SamplingStrategy::Poisson
        );
        assert_eq!(
            "Rejection Sampling".parse::<SamplingStrategy>().unwrap(),
            SamplingStrategy::Rejection
        );
        assert_eq!(
            " INVERSION ".parse::<SamplingStrategy>().unwrap(),
            SamplingStrategy::InverseTransform
        );

        let err = "gibbs".parse::<SamplingStrategy>().unwrap_err();
        assert!(err.contains("rejection, poisson, inversion"));
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(
            SamplingStrategy::InverseTransform.to_string(),
            "Inverse Transform Sampling"
        );
        assert_eq!(SamplingStrategy::Poisson.to_string(), "Poisson Re-sampling");
    }

    #[test]
    fn test_default_is_inverse_transform() {
        assert_eq!(SamplingStrategy::default(), SamplingStrategy::InverseTransform);
    }

    #[test]
    fn test_serialized_as_key() {
        for strategy in SamplingStrategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.key()));
            let back: SamplingStrategy = serde_json::from_str(&json).unwrap();
            assert_eq!(back, strategy);
        }
    }
}
