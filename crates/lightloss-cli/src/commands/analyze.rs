//! The `analyze` command: decode an image, crop the ROI, run the core
//! pipeline, and render the fit results.

use std::path::PathBuf;

use serde::Serialize;

use lightloss_core::config::{self, AnalysisConfig};
use lightloss_core::{analyze, ProfileAnalysis, RoiImage};

use crate::parse_roi;

/// Analysis result structure for JSON output.
///
/// Holds the fit, the diagnostic report, and enough metadata to reproduce the
/// run; the bulky intermediate arrays stay out of the machine-readable
/// summary.
#[derive(Serialize)]
pub struct AnalysisReport {
    pub file: String,
    pub dimensions: [u32; 2],
    pub roi: (u32, u32, u32, u32),
    pub length: f64,
    pub slope_db_per_unit: f64,
    pub intercept_db: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r_squared: Option<f64>,
    pub profile_samples: usize,
    pub valid_db_samples: usize,
    pub report: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Extract a grayscale ROI from an image file.
///
/// The crop rectangle must lie fully inside the image; pixel intensities come
/// back in the 0-255 range the saturation heuristic expects.
fn load_roi(input: &PathBuf, roi: Option<&str>) -> Result<(RoiImage, [u32; 2], (u32, u32, u32, u32)), String> {
    let decoded = image::open(input)
        .map_err(|e| format!("Failed to decode {}: {}", input.display(), e))?
        .to_luma8();
    let (img_width, img_height) = decoded.dimensions();

    let rect = match roi {
        Some(roi_str) => parse_roi(roi_str)?,
        None => (0, 0, img_width, img_height),
    };
    let (x, y, width, height) = rect;
    if x.checked_add(width).map_or(true, |r| r > img_width)
        || y.checked_add(height).map_or(true, |b| b > img_height)
    {
        return Err(format!(
            "ROI {},{},{},{} exceeds image bounds {}x{}",
            x, y, width, height, img_width, img_height
        ));
    }

    let cropped = image::imageops::crop_imm(&decoded, x, y, width, height).to_image();
    let data: Vec<f64> = cropped.as_raw().iter().map(|&p| p as f64).collect();

    Ok((
        RoiImage {
            width,
            height,
            data,
        },
        [img_width, img_height],
        rect,
    ))
}

/// Execute the analyze command on a single image region.
#[allow(clippy::too_many_arguments)]
pub fn cmd_analyze(
    input: PathBuf,
    roi: Option<String>,
    length: f64,
    window: Option<usize>,
    config_path: Option<PathBuf>,
    json_output: bool,
    save: Option<PathBuf>,
    verbose: bool,
) -> Result<(), String> {
    // Resolve configuration: explicit file beats the process-wide handle
    let mut analysis_config: AnalysisConfig = match &config_path {
        Some(path) => {
            let handle = config::load_analysis_config(Some(path));
            if verbose {
                for warning in &handle.warnings {
                    eprintln!("[lightloss] Config warning: {}", warning);
                }
            }
            handle.config
        }
        None => {
            config::log_config_usage();
            config::analysis_config_handle().config.clone()
        }
    };
    if let Some(window) = window {
        analysis_config.smoothing_window = window;
    }

    let (roi_image, dimensions, rect) = load_roi(&input, roi.as_deref())?;

    let analysis = analyze(&roi_image, length, &analysis_config).map_err(|e| e.to_string())?;

    for warning in &analysis.warnings {
        log::warn!("{}", warning);
    }

    let result = build_report(&input, dimensions, rect, length, &analysis);

    if let Some(save_path) = &save {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| format!("Failed to serialize analysis: {}", e))?;
        std::fs::write(save_path, json)
            .map_err(|e| format!("Failed to write {}: {}", save_path.display(), e))?;
        if !json_output {
            println!("Saved analysis to {}", save_path.display());
        }
    }

    if json_output {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| format!("Failed to serialize analysis: {}", e))?;
        println!("{}", json);
    } else {
        print_human_readable(&result, &analysis, verbose);
    }

    Ok(())
}

fn build_report(
    input: &PathBuf,
    dimensions: [u32; 2],
    rect: (u32, u32, u32, u32),
    length: f64,
    analysis: &ProfileAnalysis,
) -> AnalysisReport {
    AnalysisReport {
        file: input.display().to_string(),
        dimensions,
        roi: rect,
        length,
        slope_db_per_unit: analysis.fit.slope,
        intercept_db: analysis.fit.intercept,
        r_squared: analysis.fit.r_squared,
        profile_samples: analysis.intensity_profile.len(),
        valid_db_samples: analysis.db_profile.values.len(),
        report: analysis.report.clone(),
        warnings: analysis.warnings.clone(),
    }
}

fn print_human_readable(result: &AnalysisReport, analysis: &ProfileAnalysis, verbose: bool) {
    println!("Analyzing: {}\n", result.file);

    println!("Image Info:");
    println!("  Dimensions: {}x{}", result.dimensions[0], result.dimensions[1]);
    println!(
        "  ROI: ({}, {}, {}, {})",
        result.roi.0, result.roi.1, result.roi.2, result.roi.3
    );
    println!("  Physical length: {} units", result.length);

    println!("\nFit Results:");
    println!("  Loss/Gain (α_dB): {:.4} dB/unit", result.slope_db_per_unit);
    println!("  Intercept: {:.2} dB", result.intercept_db);
    match result.r_squared {
        Some(rsq) => println!("  R² (linear fit): {:.3}", rsq),
        None => println!("  R² (linear fit): undefined"),
    }

    if verbose {
        println!("\nProfile:");
        println!("  Samples: {}", result.profile_samples);
        println!("  Valid dB samples: {}", result.valid_db_samples);
        if let Some(smoothed) = &analysis.smoothed_profile {
            println!("  Smoothed samples: {}", smoothed.len());
        }
    }

    for warning in &result.warnings {
        println!("\nWarning: {}", warning);
    }

    println!("\n--- Feedback & Suggestions ---\n{}", result.report);
}
