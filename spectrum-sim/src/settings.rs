//! Persisted synthesis settings: sampling strategy and random seed.
//!
//! The seed is either fixed, in which case every run reuses it, or free, in
//! which case each run draws a fresh one. Manually entered seeds are limited
//! to `[MIN_SEED, MAX_SEED]`.

use std::path::Path;

use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sampling::SamplingStrategy;
use crate::synthesizer::SpectrumSynthesizer;

/// Smallest seed accepted from the user
pub const MIN_SEED: u64 = 1;

/// Largest seed accepted from the user (2^30)
pub const MAX_SEED: u64 = 1 << 30;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("seed value must be numeric between 1 and 1,073,741,824 (got {0})")]
    SeedOutOfRange(u64),

    #[error("seed value must be numeric between 1 and 1,073,741,824 (got {0:?})")]
    InvalidSeedText(String),

    #[error("{0}")]
    UnknownStrategy(String),

    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Strategy and seed configuration for synthesis runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    pub sampling_strategy: SamplingStrategy,
    pub random_seed: u64,
    /// Reuse `random_seed` for every run instead of drawing a fresh one
    pub random_seed_fixed: bool,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            sampling_strategy: SamplingStrategy::default(),
            random_seed: MIN_SEED,
            random_seed_fixed: false,
        }
    }
}

/// Check a seed lies in `[MIN_SEED, MAX_SEED]`.
pub fn validate_seed(seed: u64) -> Result<u64, SettingsError> {
    if (MIN_SEED..=MAX_SEED).contains(&seed) {
        Ok(seed)
    } else {
        Err(SettingsError::SeedOutOfRange(seed))
    }
}

/// Parse a seed typed by the user.
///
/// Accepts integers and decimal notation such as `"12.0"`, truncating any
/// fractional part, then applies the same range check as [`validate_seed`].
pub fn parse_seed(text: &str) -> Result<u64, SettingsError> {
    let trimmed = text.trim();

    if let Ok(seed) = trimmed.parse::<u64>() {
        return validate_seed(seed);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| SettingsError::InvalidSeedText(text.to_string()))?;
    if !value.is_finite() || value < MIN_SEED as f64 || value > MAX_SEED as f64 {
        return Err(SettingsError::InvalidSeedText(text.to_string()));
    }

    validate_seed(value.trunc() as u64)
}

/// Draw a fresh seed uniformly from `[0, MAX_SEED)`.
pub fn fresh_seed() -> u64 {
    thread_rng().gen_range(0..MAX_SEED)
}

impl SynthesisSettings {
    /// Settings that pin every run to `seed`
    pub fn with_fixed_seed(strategy: SamplingStrategy, seed: u64) -> Result<Self, SettingsError> {
        Ok(Self {
            sampling_strategy: strategy,
            random_seed: validate_seed(seed)?,
            random_seed_fixed: true,
        })
    }

    /// Seed for the next run: the fixed seed, or a fresh one.
    pub fn run_seed(&self) -> u64 {
        if self.random_seed_fixed {
            self.random_seed
        } else {
            fresh_seed()
        }
    }

    pub fn synthesizer(&self) -> SpectrumSynthesizer {
        SpectrumSynthesizer::new(self.sampling_strategy)
    }

    /// Select the strategy by key or label
    pub fn set_strategy_by_name(&mut self, name: &str) -> Result<(), SettingsError> {
        self.sampling_strategy = name.parse().map_err(SettingsError::UnknownStrategy)?;
        Ok(())
    }

    /// Set the seed from user-entered text and pin it.
    pub fn set_fixed_seed_text(&mut self, text: &str) -> Result<(), SettingsError> {
        self.random_seed = parse_seed(text)?;
        self.random_seed_fixed = true;
        Ok(())
    }

    /// Load settings from a JSON file.
    ///
    /// A seed outside the accepted range is rejected even when read from disk.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        validate_seed(settings.random_seed)?;
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_bounds() {
        assert!(validate_seed(MIN_SEED).is_ok());
        assert!(validate_seed(MAX_SEED).is_ok());
        assert!(matches!(
            validate_seed(0),
            Err(SettingsError::SeedOutOfRange(0))
        ));
        assert!(validate_seed(MAX_SEED + 1).is_err());
    }

    #[test]
    fn test_out_of_range_message() {
        let message = validate_seed(0).unwrap_err().to_string();
        assert!(message.starts_with("seed value must be numeric between 1 and 1,073,741,824"));
    }

    #[test]
    fn test_parse_seed_text() {
        assert_eq!(parse_seed("42").unwrap(), 42);
        assert_eq!(parse_seed(" 12.0 ").unwrap(), 12);
        assert_eq!(parse_seed("7.9").unwrap(), 7);
        assert_eq!(parse_seed("1073741824").unwrap(), MAX_SEED);

        assert!(parse_seed("").is_err());
        assert!(parse_seed("abc").is_err());
        assert!(parse_seed("0").is_err());
        assert!(parse_seed("0.5").is_err());
        assert!(parse_seed("-3").is_err());
        assert!(parse_seed("1073741825").is_err());
        assert!(parse_seed("1073741824.5").is_err());
        assert!(parse_seed("NaN").is_err());
        assert!(parse_seed("inf").is_err());
    }

    #[test]
    fn test_fixed_seed_is_reused() {
        let settings = SynthesisSettings::with_fixed_seed(SamplingStrategy::Poisson, 99).unwrap();
        assert_eq!(settings.run_seed(), 99);
        assert_eq!(settings.run_seed(), 99);
        assert_eq!(settings.synthesizer().strategy(), SamplingStrategy::Poisson);
    }

    #[test]
    fn test_fresh_seed_range() {
        let settings = SynthesisSettings::default();
        for _ in 0..1_000 {
            assert!(settings.run_seed() < MAX_SEED);
        }
    }

    #[test]
    fn test_set_strategy_by_name() {
        let mut settings = SynthesisSettings::default();
        settings.set_strategy_by_name("Rejection Sampling").unwrap();
        assert_eq!(settings.sampling_strategy, SamplingStrategy::Rejection);

        let err = settings.set_strategy_by_name("metropolis").unwrap_err();
        assert!(matches!(err, SettingsError::UnknownStrategy(_)));
        assert_eq!(settings.sampling_strategy, SamplingStrategy::Rejection);
    }

    #[test]
    fn test_set_fixed_seed_text() {
        let mut settings = SynthesisSettings::default();
        settings.set_fixed_seed_text("250.0").unwrap();
        assert!(settings.random_seed_fixed);
        assert_eq!(settings.random_seed, 250);

        assert!(settings.set_fixed_seed_text("zero").is_err());
        assert_eq!(settings.random_seed, 250);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: SynthesisSettings =
            serde_json::from_str(r#"{"sampling_strategy": "rejection"}"#).unwrap();
        assert_eq!(settings.sampling_strategy, SamplingStrategy::Rejection);
        assert_eq!(settings.random_seed, MIN_SEED);
        assert!(!settings.random_seed_fixed);
    }
}
