//! Error conditions for the analysis pipeline.
//!
//! Every failure mode a caller can encounter is a distinct variant, so the
//! surrounding application can render a specific message and decide whether
//! to retry with corrected inputs. All variants abort only the current
//! analysis run; none leave any state behind.

use thiserror::Error;

/// Errors produced by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The ROI contained no pixels, or the profile derived from it was empty.
    #[error("no intensity data in the selected region")]
    EmptyInput,

    /// The profile's peak intensity is too close to zero to normalize against.
    #[error("peak intensity {peak:.3e} is near zero; cannot convert profile to dB")]
    DegeneratePeak { peak: f64 },

    /// Normalization left no samples above the validity threshold.
    #[error("no positive intensity values after normalization")]
    NoPositiveSamples,

    /// Fewer than 2 paired (position, dB) samples, or mismatched array
    /// lengths. The linear fit is not attempted.
    #[error("insufficient data for linear fit: {positions} positions vs {samples} dB samples")]
    InsufficientData { positions: usize, samples: usize },

    /// The regression itself failed numerically (e.g. zero variance in
    /// positions, or a non-finite coefficient). Distinct from
    /// `InsufficientData` so callers can tell "too little data" from
    /// "degenerate data".
    #[error("linear fit failed: {reason}")]
    FittingError { reason: String },

    /// The physical length supplied for the ROI span must be finite and > 0.
    #[error("invalid physical length {length}; must be a positive finite value")]
    InvalidLength { length: f64 },
}
