//! Analysis configuration management.
//!
//! Provides configuration loading from YAML files, a global verbose flag,
//! and the threshold/window parameters consumed by the pipeline.

mod defaults;

pub use defaults::AnalysisConfig;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, OnceLock};

// Global verbose flag for controlling debug output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["analysis.yml", "analysis.yaml"];

/// Loaded configuration together with its source path and any warnings
/// produced while locating or parsing it.
pub struct AnalysisConfigHandle {
    pub config: AnalysisConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl AnalysisConfigHandle {
    fn with_config(config: AnalysisConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Load configuration from disk, optionally forcing a specific path.
///
/// Falls back to built-in defaults when no candidate file exists or parses;
/// every skipped candidate leaves a warning on the returned handle.
pub fn load_analysis_config(custom_path: Option<&Path>) -> AnalysisConfigHandle {
    let mut warnings = Vec::new();
    let candidates = get_config_candidates(custom_path);

    for candidate in candidates {
        if !candidate.exists() || !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<AnalysisConfig>(&contents) {
                Ok(mut config) => {
                    config.sanitize();
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return AnalysisConfigHandle::with_config(config, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse analysis config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read analysis config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No analysis config found; using built-in defaults.".to_string());
    AnalysisConfigHandle::with_config(AnalysisConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var("LIGHTLOSS_CONFIG") {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("lightloss").join(name));
        }
    }

    candidates
}

static ANALYSIS_CONFIG_HANDLE: OnceLock<AnalysisConfigHandle> = OnceLock::new();
static PRINT_CONFIG_ONCE: Once = Once::new();

/// Access the global analysis configuration (loaded once per process).
pub fn analysis_config_handle() -> &'static AnalysisConfigHandle {
    ANALYSIS_CONFIG_HANDLE.get_or_init(|| load_analysis_config(None))
}

/// Print config source and warnings the first time it is requested (only in verbose mode).
pub fn log_config_usage() {
    PRINT_CONFIG_ONCE.call_once(|| {
        if !is_verbose() {
            return;
        }
        let handle = analysis_config_handle();
        if let Some(source) = &handle.source {
            eprintln!("[lightloss] Loaded analysis config from {}", source.display());
        } else {
            eprintln!("[lightloss] Using built-in analysis defaults");
        }

        for warning in &handle.warnings {
            eprintln!("[lightloss] Config warning: {}", warning);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_path_falls_back_to_defaults() {
        let handle = load_analysis_config(Some(Path::new("/nonexistent/analysis.yml")));
        assert!(handle.source.is_none());
        assert_eq!(
            handle.config.smoothing_window,
            AnalysisConfig::default().smoothing_window
        );
        assert!(
            handle.warnings.iter().any(|w| w.contains("built-in")),
            "expected a fallback warning, got {:?}",
            handle.warnings
        );
    }

    #[test]
    fn test_parse_yaml_overrides() {
        let yaml = "smoothing_window: 7\nr2_threshold: 0.8\n";
        let config: AnalysisConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.smoothing_window, 7);
        assert!((config.r2_threshold - 0.8).abs() < 1e-12);
        // Unspecified fields keep their defaults
        assert!((config.slope_zero_threshold - 1e-2).abs() < 1e-12);
    }
}
