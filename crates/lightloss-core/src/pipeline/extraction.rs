//! Intensity profile extraction and smoothing.
//!
//! The extractor collapses the 2-D ROI into a 1-D profile by summing each
//! pixel column; the smoother is a centered box filter used only for
//! visualization downstream.

use crate::error::AnalysisError;
use crate::models::RoiImage;

/// Sum pixel intensities down each column of the ROI.
///
/// Output length equals the ROI width; sums are accumulated in f64 so even
/// tall regions of bright pixels cannot overflow.
pub fn intensity_profile(roi: &RoiImage) -> Result<Vec<f64>, AnalysisError> {
    if roi.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let width = roi.width as usize;
    let mut profile = vec![0.0f64; width];
    for row in roi.data.chunks_exact(width) {
        for (sum, &value) in profile.iter_mut().zip(row) {
            *sum += value;
        }
    }

    Ok(profile)
}

/// Apply a centered moving-average filter.
///
/// The window must be odd and >= 1; 1 returns the input unchanged. An even or
/// zero window is an invalid configuration but not a fatal one: the input is
/// returned unchanged and a warning is recorded. Inputs shorter than the
/// window are likewise passed through untouched.
pub fn moving_average(data: &[f64], window_size: usize, warnings: &mut Vec<String>) -> Vec<f64> {
    if window_size < 1 || window_size % 2 == 0 {
        if window_size != 1 {
            let message = format!(
                "Invalid smoothing window {}. Must be odd and >= 1. Smoothing disabled.",
                window_size
            );
            log::warn!("{}", message);
            warnings.push(message);
        }
        return data.to_vec();
    }
    if window_size == 1 || data.len() < window_size {
        return data.to_vec();
    }

    // Replicate edge values so the valid convolution keeps the input length
    let pad = window_size / 2;
    let mut padded = Vec::with_capacity(data.len() + 2 * pad);
    padded.extend(std::iter::repeat(data[0]).take(pad));
    padded.extend_from_slice(data);
    padded.extend(std::iter::repeat(data[data.len() - 1]).take(pad));

    let scale = 1.0 / window_size as f64;
    padded
        .windows(window_size)
        .map(|w| w.iter().sum::<f64>() * scale)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // intensity_profile Tests
    // ========================================================================

    #[test]
    fn test_intensity_profile_column_sums() {
        // 2x3 region: rows [1,2,3] and [4,5,6]
        let roi = RoiImage {
            width: 3,
            height: 2,
            data: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        };
        let profile = intensity_profile(&roi).unwrap();
        assert_eq!(profile, vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_intensity_profile_single_row() {
        let roi = RoiImage {
            width: 4,
            height: 1,
            data: vec![1.0, 2.0, 3.0, 4.0],
        };
        let profile = intensity_profile(&roi).unwrap();
        assert_eq!(profile, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_intensity_profile_empty_region() {
        let roi = RoiImage {
            width: 0,
            height: 3,
            data: vec![],
        };
        assert_eq!(intensity_profile(&roi), Err(AnalysisError::EmptyInput));

        let roi = RoiImage {
            width: 3,
            height: 0,
            data: vec![],
        };
        assert_eq!(intensity_profile(&roi), Err(AnalysisError::EmptyInput));
    }

    // ========================================================================
    // moving_average Tests
    // ========================================================================

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let data = vec![3.0, 1.0, 4.0, 1.0, 5.0];
        let mut warnings = Vec::new();
        let smoothed = moving_average(&data, 1, &mut warnings);
        assert_eq!(smoothed, data);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_moving_average_even_window_is_noop_with_warning() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let mut warnings = Vec::new();
        let smoothed = moving_average(&data, 4, &mut warnings);
        assert_eq!(smoothed, data, "even window must not alter the data");
        assert_eq!(warnings.len(), 1);
        assert!(
            warnings[0].contains("Invalid smoothing window 4"),
            "unexpected warning text: {}",
            warnings[0]
        );
    }

    #[test]
    fn test_moving_average_zero_window_is_noop_with_warning() {
        let data = vec![1.0, 2.0, 3.0];
        let mut warnings = Vec::new();
        let smoothed = moving_average(&data, 0, &mut warnings);
        assert_eq!(smoothed, data);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_moving_average_short_input_is_silent_noop() {
        let data = vec![1.0, 2.0];
        let mut warnings = Vec::new();
        let smoothed = moving_average(&data, 5, &mut warnings);
        assert_eq!(smoothed, data);
        assert!(warnings.is_empty(), "short input is valid, no warning expected");
    }

    #[test]
    fn test_moving_average_edge_padding() {
        // Window 3 over [1,3,5,7,9] with edge replication:
        // [(1+1+3)/3, (1+3+5)/3, (3+5+7)/3, (5+7+9)/3, (7+9+9)/3]
        let data = vec![1.0, 3.0, 5.0, 7.0, 9.0];
        let mut warnings = Vec::new();
        let smoothed = moving_average(&data, 3, &mut warnings);
        let expected = [5.0 / 3.0, 3.0, 5.0, 7.0, 25.0 / 3.0];

        assert_eq!(smoothed.len(), data.len());
        for (i, (&got, &want)) in smoothed.iter().zip(expected.iter()).enumerate() {
            assert!(
                (got - want).abs() < 1e-12,
                "mismatch at index {}: got {}, want {}",
                i,
                got,
                want
            );
        }
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_moving_average_preserves_constant_signal() {
        let data = vec![2.5; 10];
        let mut warnings = Vec::new();
        let smoothed = moving_average(&data, 5, &mut warnings);
        for &value in &smoothed {
            assert!((value - 2.5).abs() < 1e-12);
        }
    }
}
