//! Configuration system for the vantage quality controller.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap and hot-reload detection, which is how
//! toggle flips made outside the control loop reach it.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AutoConfig, Config, DebugConfig};
pub use error::ConfigError;
