//! Statistical functions for validating sampled spectra

/// Arithmetic mean of a sample.
///
/// Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (n - 1 denominator).
///
/// Returns NaN when fewer than two values are supplied.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Middle value of a sample, averaging the two central values for even lengths.
///
/// NaN entries are ignored; a sample with nothing else left is an error.
pub fn median(values: &[f64]) -> Result<f64, String> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return Err(format!("Cannot take the median of {} non-numeric values", values.len()));
    }
    sorted.sort_unstable_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok(0.5 * (sorted[mid - 1] + sorted[mid]))
    }
}
