//! Command-line argument parsing for the vantage controller.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Vantage controller command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "vantage", about = "Adaptive render-quality controller")]
pub struct CliArgs {
    /// Enable/disable automatic supersampling control.
    #[arg(long)]
    pub auto_quality: Option<bool>,

    /// Enable/disable automatic hires view distance control.
    #[arg(long)]
    pub auto_hires: Option<bool>,

    /// Enable/disable automatic lowres view distance control.
    #[arg(long)]
    pub auto_lowres: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log a stats line after every closed sample window.
    #[arg(long)]
    pub log_samples: Option<bool>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(quality) = args.auto_quality {
            self.auto.quality = quality;
        }
        if let Some(hires) = args.auto_hires {
            self.auto.hires = hires;
        }
        if let Some(lowres) = args.auto_lowres {
            self.auto.lowres = lowres;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(log_samples) = args.log_samples {
            self.debug.log_samples = log_samples;
        }
    }
}
