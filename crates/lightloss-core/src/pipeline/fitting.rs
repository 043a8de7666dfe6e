//! Least-squares linear fit and goodness of fit.

use crate::error::AnalysisError;
use crate::models::LinearFit;

use super::helpers::mean;
use super::VARIANCE_EPSILON;

/// Ordinary least-squares fit of `y = slope * x + intercept`.
///
/// Uses the centered normal equations, which are closed-form and numerically
/// stable for a degree-1 fit. Mismatched or too-short inputs are
/// `InsufficientData`; a numerically degenerate system (all positions equal,
/// or a non-finite coefficient) is a distinct `FittingError`.
pub fn fit_linear(x_data: &[f64], y_data: &[f64]) -> Result<LinearFit, AnalysisError> {
    if x_data.len() != y_data.len() || x_data.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            positions: x_data.len(),
            samples: y_data.len(),
        });
    }

    let mean_x = mean(x_data);
    let mean_y = mean(y_data);

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in x_data.iter().zip(y_data) {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    if sxx <= VARIANCE_EPSILON {
        return Err(AnalysisError::FittingError {
            reason: "zero variance in position data".to_string(),
        });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(AnalysisError::FittingError {
            reason: format!("non-finite fit coefficients (slope={slope}, intercept={intercept})"),
        });
    }

    Ok(LinearFit { slope, intercept })
}

/// Coefficient of determination for a fitted line.
///
/// Returns `None` (explicitly "undefined", distinct from 0.0) when the inputs
/// are empty or mismatched. Zero-variance observations are degenerate: the
/// result is 1.0 for a perfect trivial fit and 0.0 otherwise.
pub fn r_squared(x_data: &[f64], y_data: &[f64], fit: &LinearFit) -> Option<f64> {
    if x_data.is_empty() || x_data.len() != y_data.len() {
        return None;
    }

    let mean_y = mean(y_data);
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&x, &y) in x_data.iter().zip(y_data) {
        let residual = y - (fit.slope * x + fit.intercept);
        ss_res += residual * residual;
        let dy = y - mean_y;
        ss_tot += dy * dy;
    }

    if ss_tot <= VARIANCE_EPSILON {
        return Some(if ss_res < VARIANCE_EPSILON { 1.0 } else { 0.0 });
    }

    Some(1.0 - ss_res / ss_tot)
}
