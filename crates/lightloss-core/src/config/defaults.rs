//! Default analysis parameter values and their validation/sanitization.

use serde::{Deserialize, Serialize};

/// Tunable parameters for one analysis run.
///
/// Passed by reference into the pipeline; the pipeline never reads
/// process-wide state, so two runs with different configs cannot interfere.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Moving-average window for the visualization profile. Must be odd and
    /// >= 1; 1 disables smoothing. An even or zero value degrades to no
    /// smoothing with a warning rather than failing the run.
    pub smoothing_window: usize,

    /// R² below this flags the fit as poor
    pub r2_threshold: f64,

    /// |slope| below this (dB/unit) flags the slope as negligible
    pub slope_zero_threshold: f64,

    /// Maximum summed intensity at/above which saturation is flagged.
    /// A heuristic ceiling independent of ROI height or bit depth.
    pub saturation_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 5,
            r2_threshold: 0.5,
            slope_zero_threshold: 1e-2,
            saturation_threshold: 60_000.0,
        }
    }
}

impl AnalysisConfig {
    /// Clamp out-of-range values back to something usable. Invalid smoothing
    /// windows are left alone: the smoother itself degrades gracefully and
    /// reports the problem as a warning.
    pub fn sanitize(&mut self) {
        if !self.r2_threshold.is_finite() {
            self.r2_threshold = Self::default().r2_threshold;
        }
        self.r2_threshold = self.r2_threshold.clamp(0.0, 1.0);

        if !self.slope_zero_threshold.is_finite() || self.slope_zero_threshold < 0.0 {
            self.slope_zero_threshold = Self::default().slope_zero_threshold;
        }

        if !self.saturation_threshold.is_finite() {
            self.saturation_threshold = Self::default().saturation_threshold;
        }
    }

    /// Config with smoothing disabled, otherwise defaults.
    pub fn without_smoothing() -> Self {
        Self {
            smoothing_window: 1,
            ..Self::default()
        }
    }
}
