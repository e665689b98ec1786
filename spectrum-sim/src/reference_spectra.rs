//! Noiseless reference base spectra for benchmarks and command line runs.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Shape of a generated reference spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceShape {
    /// Every channel holds the same count
    Flat,
    /// Gaussian photopeak over a falling exponential continuum
    Photopeak,
}

impl fmt::Display for ReferenceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceShape::Flat => write!(f, "flat"),
            ReferenceShape::Photopeak => write!(f, "photopeak"),
        }
    }
}

impl FromStr for ReferenceShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(ReferenceShape::Flat),
            "photopeak" | "peak" => Ok(ReferenceShape::Photopeak),
            _ => Err(format!(
                "Unknown reference shape: {s}. Valid options: flat, photopeak"
            )),
        }
    }
}

impl ReferenceShape {
    /// Build a reference spectrum of this shape with `channels` channels
    pub fn build(self, channels: usize) -> Vec<f64> {
        match self {
            ReferenceShape::Flat => flat_spectrum(channels, 4093.0),
            ReferenceShape::Photopeak => photopeak_spectrum(
                channels,
                PhotopeakParams {
                    centroid: channels as f64 * 0.4,
                    fwhm: (channels as f64 * 0.02).max(1.0),
                    peak_area: 2.0e5,
                    continuum_level: 800.0,
                    continuum_decay: channels as f64 * 0.25,
                },
            ),
        }
    }
}

/// Spectrum with `level` counts in every channel
pub fn flat_spectrum(channels: usize, level: f64) -> Vec<f64> {
    vec![level; channels]
}

/// Parameters of a single photopeak on an exponential continuum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotopeakParams {
    /// Peak center in channels
    pub centroid: f64,
    /// Full width at half maximum in channels
    pub fwhm: f64,
    /// Total counts under the peak
    pub peak_area: f64,
    /// Continuum height at channel zero
    pub continuum_level: f64,
    /// Channels over which the continuum falls by a factor of e
    pub continuum_decay: f64,
}

/// Gaussian photopeak on top of an exponentially falling continuum.
///
/// The Gaussian is evaluated at each channel center and normalized so its
/// sum over an unbounded channel range equals `peak_area`.
pub fn photopeak_spectrum(channels: usize, params: PhotopeakParams) -> Vec<f64> {
    let sigma = params.fwhm / (2.0 * (2.0 * 2.0_f64.ln()).sqrt());
    let norm = params.peak_area / (sigma * (2.0 * PI).sqrt());

    (0..channels)
        .map(|channel| {
            let x = channel as f64;
            let continuum = params.continuum_level * (-x / params.continuum_decay).exp();
            let z = (x - params.centroid) / sigma;
            continuum + norm * (-0.5 * z * z).exp()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat() {
        let spectrum = flat_spectrum(16, 3.0);
        assert_eq!(spectrum.len(), 16);
        assert!(spectrum.iter().all(|&c| c == 3.0));
    }

    #[test]
    fn test_photopeak_area_and_maximum() {
        let params = PhotopeakParams {
            centroid: 200.0,
            fwhm: 10.0,
            peak_area: 5_000.0,
            continuum_level: 0.0,
            continuum_decay: 100.0,
        };
        let spectrum = photopeak_spectrum(512, params);

        let total: f64 = spectrum.iter().sum();
        assert_relative_eq!(total, 5_000.0, max_relative = 1e-6);

        let (argmax, _) = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        assert_eq!(argmax, 200);
    }

    #[test]
    fn test_continuum_falls() {
        let spectrum = ReferenceShape::Photopeak.build(1024);
        assert!(spectrum[0] > spectrum[1000]);
        assert!(spectrum.iter().all(|&c| c > 0.0));
    }

    #[test]
    fn test_parse_shape() {
        assert_eq!("FLAT".parse::<ReferenceShape>().unwrap(), ReferenceShape::Flat);
        assert_eq!(
            "peak".parse::<ReferenceShape>().unwrap(),
            ReferenceShape::Photopeak
        );
        assert!("triangle".parse::<ReferenceShape>().is_err());
    }
}
