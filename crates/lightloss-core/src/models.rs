//! Data models for Lightloss
//!
//! Core data structures for ROI image data, fit parameters, and the full
//! analysis result handed back to the caller.

use serde::Serialize;

/// Grayscale pixel data for a user-selected rectangular region.
///
/// Row-major: `data[row * width + col]`. Sample values are raw intensities
/// (e.g. 0-255 for an 8-bit source); the pipeline only assumes they are
/// non-negative.
#[derive(Debug, Clone)]
pub struct RoiImage {
    /// Region width in pixels (profile axis)
    pub width: u32,

    /// Region height in pixels (summing axis)
    pub height: u32,

    /// Row-major intensity samples, `width * height` values
    pub data: Vec<f64>,
}

impl RoiImage {
    /// True when the region holds no samples at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }
}

/// A peak-normalized profile converted to decibels.
///
/// `values` and `indices` always have equal length; `indices` is a strictly
/// increasing subsequence of the source profile's positions and maps each dB
/// sample back to the position array used for fitting and plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecibelProfile {
    /// dB relative to the profile peak (0 = peak, negative = attenuation)
    pub values: Vec<f64>,

    /// Source-profile index of each retained sample
    pub indices: Vec<usize>,
}

/// Least-squares line through (position, dB) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    /// dB per unit length (negative = loss, positive = gain)
    pub slope: f64,

    /// dB value at position 0
    pub intercept: f64,
}

/// Fit parameters plus goodness of fit, as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitSummary {
    /// dB per unit length (negative = loss, positive = gain)
    pub slope: f64,

    /// dB value at position 0
    pub intercept: f64,

    /// Coefficient of determination in [0, 1]; `None` when it could not be
    /// computed (explicitly "undefined", never conflated with 0.0)
    pub r_squared: Option<f64>,
}

/// Complete result of one analysis run.
///
/// Besides the fit itself, every intermediate array is retained so the caller
/// can visualize the pipeline stages. All fields are recomputed from scratch
/// on each run; nothing is shared between runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileAnalysis {
    /// Fitted slope/intercept and R²
    pub fit: FitSummary,

    /// Column sums of the ROI, one per pixel column
    pub intensity_profile: Vec<f64>,

    /// dB conversion of the raw profile, with its valid-index mapping
    pub db_profile: DecibelProfile,

    /// Physical positions, linearly spaced from 0 to the supplied length;
    /// same length as `intensity_profile`
    pub positions: Vec<f64>,

    /// Moving-average smoothed profile (visualization only; the fit always
    /// uses the unsmoothed data). Absent when smoothing is disabled.
    pub smoothed_profile: Option<Vec<f64>>,

    /// dB conversion of the smoothed profile, normalized to its own peak.
    /// Absent when smoothing is disabled or its conversion failed.
    pub smoothed_db_profile: Option<DecibelProfile>,

    /// Diagnostic messages from the feedback rules, in evaluation order
    pub diagnostics: Vec<crate::pipeline::Diagnostic>,

    /// The diagnostics rendered as a single report string
    pub report: String,

    /// Non-fatal warnings accumulated during the run (invalid smoothing
    /// window, failed smoothed-dB conversion, ...)
    pub warnings: Vec<String>,
}
