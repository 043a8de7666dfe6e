use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lightloss_cli::commands::cmd_analyze;

#[derive(Parser)]
#[command(name = "lightloss")]
#[command(version, about = "Optical attenuation analyzer for image intensity profiles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a loss/gain coefficient to an image region's intensity profile
    Analyze {
        /// Input image file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Region of interest (x,y,width,height); whole image when omitted
        #[arg(long, value_name = "X,Y,W,H")]
        roi: Option<String>,

        /// Physical length of the region's span, in your unit of choice
        #[arg(short, long, value_name = "UNITS", default_value = "1.0")]
        length: f64,

        /// Smoothing window override (odd, >= 1; 1 disables smoothing)
        #[arg(short, long, value_name = "N")]
        window: Option<usize>,

        /// Analysis config file (YAML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output as JSON instead of human-readable text
        #[arg(long)]
        json: bool,

        /// Save the JSON analysis report to a file
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Analyze { verbose, .. } => *verbose,
    };
    // The handle must outlive the command; dropping it shuts the logger down.
    let _logger = init_logging(verbose);
    lightloss_core::config::set_verbose(verbose);

    let result = match cli.command {
        Commands::Analyze {
            input,
            roi,
            length,
            window,
            config,
            json,
            save,
            verbose,
        } => cmd_analyze(input, roi, length, window, config, json, save, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) -> Option<flexi_logger::LoggerHandle> {
    let default_level = if verbose { "debug" } else { "warn" };
    flexi_logger::Logger::try_with_env_or_str(default_level)
        .ok()?
        .start()
        .ok()
}
