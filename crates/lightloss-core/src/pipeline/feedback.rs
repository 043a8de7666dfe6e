//! Threshold-based diagnostic feedback on a completed fit.
//!
//! Each rule is evaluated independently against the configured thresholds and
//! every applicable one fires, in a fixed order: fit quality, slope trend,
//! noise, saturation.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::models::FitSummary;

use super::helpers::{peak_to_peak, population_std_dev};
use super::PEAK_EPSILON;

/// Which rule produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    /// R² against the configured threshold
    FitQuality,

    /// Slope magnitude and sign
    Trend,

    /// First-difference noise relative to the signal range
    Noise,

    /// Summed intensity near the heuristic saturation ceiling
    Saturation,
}

/// One diagnostic message from the feedback rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub message: String,
}

impl Diagnostic {
    fn new(category: DiagnosticCategory, message: String) -> Self {
        Self { category, message }
    }
}

/// Relative noise level above which the profile is flagged as noisy.
const NOISE_TO_RANGE_LIMIT: f64 = 0.5;

/// Evaluate every feedback rule against the fit and the raw intensity
/// profile (pre-smoothing, pre-dB).
///
/// The position array supplies the physical span quoted in the near-zero
/// slope suggestion.
pub fn generate_feedback(
    fit: &FitSummary,
    intensity_profile: &[f64],
    positions: &[f64],
    config: &AnalysisConfig,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    // 1. Fit quality
    match fit.r_squared {
        None => diagnostics.push(Diagnostic::new(
            DiagnosticCategory::FitQuality,
            "* R² Unavailable:\n  \
             Goodness of fit could not be computed for this run; the slope below \
             is reported without a quality estimate."
                .to_string(),
        )),
        Some(r_squared) if r_squared < config.r2_threshold => {
            diagnostics.push(Diagnostic::new(
                DiagnosticCategory::FitQuality,
                format!(
                    "* Poor Linear Fit Quality (R² = {:.3} < {}):\n  \
                     The linear model doesn't fit the dB-scaled data well.\n  \
                     Suggestions:\n  \
                     - Check ROI selection: the region should show consistent exponential \
                     behavior (linear in dB); avoid saturation, sharp peaks/dips, or reflections.\n  \
                     - Noise: high noise can obscure the linear trend in dB space.\n  \
                     - Verify length: ensure the entered physical length matches the ROI width.",
                    r_squared, config.r2_threshold
                ),
            ));
        }
        Some(r_squared) => diagnostics.push(Diagnostic::new(
            DiagnosticCategory::FitQuality,
            format!("* Good Linear Fit Quality (R² = {:.3}).", r_squared),
        )),
    }

    // 2. Slope trend
    let span = match (positions.first(), positions.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    };
    if fit.slope.abs() < config.slope_zero_threshold {
        diagnostics.push(Diagnostic::new(
            DiagnosticCategory::Trend,
            format!(
                "* Near-Zero Slope (|m| ≈ {:.2e} dB/unit):\n  \
                 The fitted change in dB across the analyzed span ({:.3} units) is very small.\n  \
                 Suggestions:\n  \
                 - Check ROI: little actual gain/loss, or the region is dominated by noise.\n  \
                 - Analyze a longer section or an image with clearer gain/loss.",
                fit.slope.abs(),
                span
            ),
        ));
    } else if fit.slope > 0.0 {
        diagnostics.push(Diagnostic::new(
            DiagnosticCategory::Trend,
            format!(
                "* Increasing Trend / Gain Fitted (Slope = {:.4} dB/unit):\n  \
                 The fit indicates increasing signal strength.\n  \
                 Suggestions:\n  \
                 - Verify that gain is expected; if loss is expected, check the ROI for \
                 reflections, scattering sources, or detector non-linearities.",
                fit.slope
            ),
        ));
    } else {
        // Loss is reported as a positive coefficient
        diagnostics.push(Diagnostic::new(
            DiagnosticCategory::Trend,
            format!(
                "* Decreasing Trend / Loss Fitted (Slope = {:.4} dB/unit):\n  \
                 The fit indicates signal loss (α = {:.4} dB/unit).\n  \
                 Suggestions:\n  \
                 - Consider fit quality (R²): if R² is low, the loss value may not be reliable.",
                fit.slope, -fit.slope
            ),
        ));
    }

    // 3. Noise: std dev of first differences relative to peak-to-peak range
    if intensity_profile.len() > 1 {
        let differences: Vec<f64> = intensity_profile
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect();
        let noise = population_std_dev(&differences);
        let signal_range = peak_to_peak(intensity_profile);
        if signal_range > PEAK_EPSILON && noise / signal_range > NOISE_TO_RANGE_LIMIT {
            diagnostics.push(Diagnostic::new(
                DiagnosticCategory::Noise,
                "* High Noise Detected:\n  \
                 The intensity profile appears noisy relative to the overall signal change.\n  \
                 Suggestions:\n  \
                 - Use higher quality captures (less camera noise, better contrast).\n  \
                 - Make the ROI taller so more pixels average out noise vertically.\n  \
                 - Consider smoothing for visualization, or stronger preprocessing upstream."
                    .to_string(),
            ));
        }
    }

    // 4. Saturation on the summed profile
    let max_intensity = intensity_profile.iter().cloned().fold(f64::MIN, f64::max);
    if !intensity_profile.is_empty() && max_intensity >= config.saturation_threshold {
        diagnostics.push(Diagnostic::new(
            DiagnosticCategory::Saturation,
            format!(
                "* Potential Saturation (High Summed Value):\n  \
                 Maximum summed intensity ({:.0}) is at or above the configured ceiling \
                 ({:.0}). Saturation may affect results.\n  \
                 Suggestions:\n  \
                 - Adjust exposure/gain during capture.\n  \
                 - Avoid regions that appear fully saturated.\n  \
                 - The analysis assumes a linear detector response; saturation breaks this.",
                max_intensity, config.saturation_threshold
            ),
        ));
    }

    diagnostics
}

/// Join diagnostics into the report string shown to the user.
pub fn render_report(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "Analysis complete. Fit appears reasonable based on R² and slope.".to_string();
    }
    diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(slope: f64, r_squared: Option<f64>) -> FitSummary {
        FitSummary {
            slope,
            intercept: 0.0,
            r_squared,
        }
    }

    fn flat_profile() -> Vec<f64> {
        vec![100.0, 99.0, 98.0, 97.0]
    }

    fn positions() -> Vec<f64> {
        vec![0.0, 0.5, 1.0, 1.5]
    }

    fn category_messages(diags: &[Diagnostic], category: DiagnosticCategory) -> Vec<&str> {
        diags
            .iter()
            .filter(|d| d.category == category)
            .map(|d| d.message.as_str())
            .collect()
    }

    #[test]
    fn test_poor_fit_flagged_below_threshold() {
        let config = AnalysisConfig::default(); // r2_threshold = 0.5
        let diags = generate_feedback(&summary(-2.0, Some(0.3)), &flat_profile(), &positions(), &config);
        let fit_msgs = category_messages(&diags, DiagnosticCategory::FitQuality);
        assert_eq!(fit_msgs.len(), 1);
        assert!(fit_msgs[0].contains("Poor Linear Fit Quality"), "{}", fit_msgs[0]);
    }

    #[test]
    fn test_good_fit_flagged_above_threshold() {
        let config = AnalysisConfig::default();
        let diags = generate_feedback(&summary(-2.0, Some(0.9)), &flat_profile(), &positions(), &config);
        let fit_msgs = category_messages(&diags, DiagnosticCategory::FitQuality);
        assert_eq!(fit_msgs.len(), 1);
        assert!(fit_msgs[0].contains("Good Linear Fit Quality"), "{}", fit_msgs[0]);
    }

    #[test]
    fn test_undefined_r_squared_is_not_misread() {
        let config = AnalysisConfig::default();
        let diags = generate_feedback(&summary(-2.0, None), &flat_profile(), &positions(), &config);
        let fit_msgs = category_messages(&diags, DiagnosticCategory::FitQuality);
        assert_eq!(fit_msgs.len(), 1);
        assert!(
            fit_msgs[0].contains("R² Unavailable"),
            "undefined R² must not be reported as good or poor: {}",
            fit_msgs[0]
        );
    }

    #[test]
    fn test_near_zero_slope() {
        let config = AnalysisConfig::default(); // slope_zero_threshold = 1e-2
        let diags = generate_feedback(&summary(0.0001, Some(0.9)), &flat_profile(), &positions(), &config);
        let trend = category_messages(&diags, DiagnosticCategory::Trend);
        assert_eq!(trend.len(), 1);
        assert!(trend[0].contains("Near-Zero Slope"), "{}", trend[0]);
    }

    #[test]
    fn test_gain_and_loss_messages() {
        let config = AnalysisConfig::default();

        let diags = generate_feedback(&summary(1.5, Some(0.9)), &flat_profile(), &positions(), &config);
        let trend = category_messages(&diags, DiagnosticCategory::Trend);
        assert!(trend[0].contains("Gain Fitted"));

        let diags = generate_feedback(&summary(-1.5, Some(0.9)), &flat_profile(), &positions(), &config);
        let trend = category_messages(&diags, DiagnosticCategory::Trend);
        assert!(trend[0].contains("Loss Fitted"));
        assert!(
            trend[0].contains("α = 1.5000 dB/unit"),
            "loss must be quoted as a positive coefficient: {}",
            trend[0]
        );
    }

    #[test]
    fn test_high_noise_detected() {
        let config = AnalysisConfig::default();
        // Alternating profile: first differences swing +-80 around a range of 80
        let noisy = vec![100.0, 20.0, 100.0, 20.0, 100.0, 20.0];
        let diags = generate_feedback(&summary(-2.0, Some(0.9)), &noisy, &positions(), &config);
        assert_eq!(category_messages(&diags, DiagnosticCategory::Noise).len(), 1);
    }

    #[test]
    fn test_smooth_profile_has_no_noise_diagnostic() {
        let config = AnalysisConfig::default();
        let smooth: Vec<f64> = (0..20).map(|i| 1000.0 - 10.0 * i as f64).collect();
        let diags = generate_feedback(&summary(-2.0, Some(0.9)), &smooth, &positions(), &config);
        assert!(category_messages(&diags, DiagnosticCategory::Noise).is_empty());
    }

    #[test]
    fn test_saturation_flagged_at_threshold() {
        let config = AnalysisConfig::default(); // saturation_threshold = 60000
        let saturated = vec![10.0, 60_000.0, 10.0];
        let diags = generate_feedback(&summary(-2.0, Some(0.9)), &saturated, &positions(), &config);
        assert_eq!(category_messages(&diags, DiagnosticCategory::Saturation).len(), 1);

        let unsaturated = vec![10.0, 59_999.0, 10.0];
        let diags = generate_feedback(&summary(-2.0, Some(0.9)), &unsaturated, &positions(), &config);
        assert!(category_messages(&diags, DiagnosticCategory::Saturation).is_empty());
    }

    #[test]
    fn test_rule_order_is_stable() {
        let config = AnalysisConfig::default();
        let noisy_saturated = vec![70_000.0, 100.0, 70_000.0, 100.0, 70_000.0];
        let diags = generate_feedback(&summary(0.0, Some(0.1)), &noisy_saturated, &positions(), &config);
        let order: Vec<DiagnosticCategory> = diags.iter().map(|d| d.category).collect();
        assert_eq!(
            order,
            vec![
                DiagnosticCategory::FitQuality,
                DiagnosticCategory::Trend,
                DiagnosticCategory::Noise,
                DiagnosticCategory::Saturation,
            ]
        );
    }

    #[test]
    fn test_render_report_joins_messages() {
        let diags = vec![
            Diagnostic::new(DiagnosticCategory::FitQuality, "first".to_string()),
            Diagnostic::new(DiagnosticCategory::Trend, "second".to_string()),
        ];
        assert_eq!(render_report(&diags), "first\n\nsecond");
        assert!(render_report(&[]).contains("appears reasonable"));
    }
}
