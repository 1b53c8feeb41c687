//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use planetoid_cubesphere::ProjectionKind;

use crate::Config;

/// Planetoid tile addressing command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "planetoid", about = "Planetoid cube-sphere tile addressing")]
pub struct CliArgs {
    /// Cube projection strategy (qsc, tangential).
    #[arg(long)]
    pub projection: Option<ProjectionKind>,

    /// Highest zoom level to accept.
    #[arg(long)]
    pub max_zoom: Option<i16>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// The `--config` directory, else the platform default.
    #[must_use]
    pub fn config_dir(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::default_dir)
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(projection) = args.projection {
            self.mapping.projection = projection;
        }
        if let Some(max_zoom) = args.max_zoom {
            self.mapping.max_zoom = max_zoom;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
