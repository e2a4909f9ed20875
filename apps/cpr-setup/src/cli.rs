//! Command line interface definition

use clap::Parser;
use cpr_types::ColorChoice;
use std::path::PathBuf;

/// cpr-setup - install the cpr command globally
#[derive(Parser)]
#[command(name = "cpr-setup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Install the cpr command into the global binary directory")]
#[command(long_about = None)]
pub struct Cli {
    /// Script to install (defaults to `cpr` next to this executable)
    #[arg(long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Install into this directory instead of the platform default
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Never retry with sudo; print the manual steps instead
    #[arg(long)]
    pub no_elevate: bool,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments
#[derive(Parser)]
pub struct GlobalArgs {
    /// Print the install report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Color output control
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
