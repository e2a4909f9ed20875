//! cpr-setup - install the cpr command globally
//!
//! Copies the `cpr` script into the host's global binary directory and
//! reports the outcome on the console.

mod cli;
mod display;
mod error;

use crate::cli::Cli;
use crate::display::OutputRenderer;
use crate::error::CliError;
use clap::Parser;
use cpr_config::Config;
use cpr_install::{default_source_path, InstallConfig, Installer};
use std::process;
use tracing::{debug, info};

fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    let renderer = OutputRenderer::new(json_mode, cli.global.color.unwrap_or_default());

    if let Err(e) = run(cli, renderer) {
        debug!(error = %e, "application error");
        process::exit(1);
    }
}

/// Main application logic
fn run(cli: Cli, mut renderer: OutputRenderer) -> Result<(), CliError> {
    info!("Starting cpr-setup v{}", env!("CARGO_PKG_VERSION"));

    let result = install(&cli, &mut renderer);
    if let Err(e) = &result {
        renderer.render_error(e);
    }
    result
}

fn install(cli: &Cli, renderer: &mut OutputRenderer) -> Result<(), CliError> {
    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref())?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, cli);

    if cli.global.color.is_none() {
        *renderer = OutputRenderer::new(cli.global.json, config.general.color);
    }

    let source = match &config.paths.source {
        Some(path) => path.clone(),
        None => default_source_path(&config.install.script_name)?,
    };

    let installer = Installer::for_current_host(InstallConfig::from_settings(&config, source));
    let report = installer.install(&*renderer)?;

    renderer.render_report(&report)?;

    info!(destination = %report.destination.display(), "install completed");
    Ok(())
}

/// Apply CLI configuration overrides (CLI flags have highest precedence)
fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if let Some(source) = &cli.source {
        config.paths.source = Some(source.clone());
    }
    if let Some(dir) = &cli.install_dir {
        config.paths.install_dir = Some(dir.clone());
    }
    if cli.no_elevate {
        config.install.allow_elevation = false;
    }
    if let Some(color) = cli.global.color {
        config.general.color = color;
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if json_mode {
        // JSON mode: keep the console clean for the report
        if debug_enabled {
            // Debug logs still go somewhere, as JSON lines in a file
            let log_file = std::env::temp_dir().join(format!(
                "cpr-setup-{}.log",
                chrono::Utc::now().format("%Y%m%d-%H%M%S")
            ));
            if let Ok(file) = std::fs::File::create(&log_file) {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(debug_filter())
                    .init();
                return;
            }
        }
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_env_filter(debug_filter())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_env_filter("warn")
            .init();
    }
}

fn debug_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,cpr_setup=debug,cpr_install=debug")
    })
}
