//! Analysis pipeline
//!
//! Extraction → (optional) smoothing → dB normalization → linear fit →
//! goodness of fit → feedback.
//!
//! This module is organized into submodules:
//! - `extraction`: intensity profile extraction and moving-average smoothing
//! - `decibel`: peak normalization and dB conversion
//! - `fitting`: least-squares line fit and R²
//! - `feedback`: threshold-based diagnostic messages
//! - `helpers`: small shared numeric utilities

mod decibel;
mod extraction;
mod feedback;
mod fitting;
mod helpers;


// Re-export public items from submodules
pub use decibel::decibel_profile;
pub use extraction::{intensity_profile, moving_average};
pub use feedback::{generate_feedback, render_report, Diagnostic, DiagnosticCategory};
pub use fitting::{fit_linear, r_squared};
pub use helpers::linspace;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::models::{FitSummary, ProfileAnalysis, RoiImage};
use crate::verbose_println;

/// Intensities at or below this are treated as zero during normalization.
pub const PEAK_EPSILON: f64 = 1e-9;

/// Sums of squares at or below this count as zero variance.
pub const VARIANCE_EPSILON: f64 = 1e-15;

/// Run the full analysis pipeline on one ROI.
///
/// `length` is the physical span of the ROI width, in whatever unit the
/// caller works in; the fitted slope comes back in dB per that unit. The
/// pipeline is a pure function of its inputs: it performs no I/O, touches no
/// shared state, and recomputes everything from scratch on every call.
///
/// Smoothing (when `config.smoothing_window > 1`) only affects the
/// visualization outputs; the fit always runs on the unsmoothed dB profile.
pub fn analyze(
    roi: &RoiImage,
    length: f64,
    config: &AnalysisConfig,
) -> Result<ProfileAnalysis, AnalysisError> {
    if !length.is_finite() || length <= 0.0 {
        return Err(AnalysisError::InvalidLength { length });
    }

    let mut warnings = Vec::new();

    let intensity = intensity_profile(roi)?;
    if intensity.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            positions: intensity.len(),
            samples: intensity.len(),
        });
    }

    let positions = linspace(0.0, length, intensity.len());

    let db_profile = decibel_profile(&intensity)?;
    // Re-align positions with the samples that survived dB conversion; this
    // correspondence is what makes the fitted slope physically meaningful.
    let fit_positions: Vec<f64> = db_profile.indices.iter().map(|&i| positions[i]).collect();

    // Smoothed variants are for visualization only. The smoothed dB profile
    // is normalized to its own peak, and a failure here never aborts the run.
    let (smoothed_profile, smoothed_db_profile) = if config.smoothing_window > 1 {
        let smoothed = moving_average(&intensity, config.smoothing_window, &mut warnings);
        let smoothed_db = match decibel_profile(&smoothed) {
            Ok(db) => Some(db),
            Err(err) => {
                let message = format!("Smoothed profile dB conversion failed: {}", err);
                log::warn!("{}", message);
                warnings.push(message);
                None
            }
        };
        (Some(smoothed), smoothed_db)
    } else {
        (None, None)
    };

    let fit = fit_linear(&fit_positions, &db_profile.values)?;
    let fit_r_squared = r_squared(&fit_positions, &db_profile.values, &fit);
    verbose_println!(
        "[lightloss] Linear dB fit: slope={:.4} dB/unit, intercept={:.2} dB",
        fit.slope,
        fit.intercept
    );

    let summary = FitSummary {
        slope: fit.slope,
        intercept: fit.intercept,
        r_squared: fit_r_squared,
    };

    let diagnostics = generate_feedback(&summary, &intensity, &positions, config);
    let report = render_report(&diagnostics);

    Ok(ProfileAnalysis {
        fit: summary,
        intensity_profile: intensity,
        db_profile,
        positions,
        smoothed_profile,
        smoothed_db_profile,
        diagnostics,
        report,
        warnings,
    })
}
