//! Peak normalization and decibel conversion.

use crate::error::AnalysisError;
use crate::models::DecibelProfile;

use super::PEAK_EPSILON;

/// Normalize a profile to its peak and convert to dB.
///
/// Samples whose normalized value is at or below [`PEAK_EPSILON`] are dropped
/// (a logarithm there would be undefined or noise-dominated); the returned
/// index set records which source positions survived, so callers can re-align
/// the dB values with their position array. The peak itself always survives
/// and maps to exactly 0 dB.
pub fn decibel_profile(profile: &[f64]) -> Result<DecibelProfile, AnalysisError> {
    if profile.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let peak = profile.iter().cloned().fold(f64::MIN, f64::max);
    if !(peak > PEAK_EPSILON) {
        return Err(AnalysisError::DegeneratePeak { peak });
    }

    let mut values = Vec::with_capacity(profile.len());
    let mut indices = Vec::with_capacity(profile.len());
    for (i, &sample) in profile.iter().enumerate() {
        let normalized = sample / peak;
        if normalized > PEAK_EPSILON {
            values.push(10.0 * normalized.log10());
            indices.push(i);
        }
    }

    if indices.is_empty() {
        return Err(AnalysisError::NoPositiveSamples);
    }

    Ok(DecibelProfile { values, indices })
}
