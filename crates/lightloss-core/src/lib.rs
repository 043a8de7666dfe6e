//! Lightloss Core Library
//!
//! Core functionality for fitting a loss/gain coefficient to the intensity
//! profile of an image region. The pipeline collapses a grayscale ROI into a
//! 1-D profile, normalizes it to decibel scale relative to its peak, fits a
//! straight line against physical position, and produces threshold-based
//! diagnostic feedback.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use models::{DecibelProfile, FitSummary, LinearFit, ProfileAnalysis, RoiImage};
pub use pipeline::{
    analyze, decibel_profile, fit_linear, generate_feedback, intensity_profile, moving_average,
    r_squared, render_report, Diagnostic, DiagnosticCategory,
};
