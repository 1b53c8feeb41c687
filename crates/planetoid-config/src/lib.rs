//! Runtime configuration for planetoid tile addressing.
//!
//! Settings persist to disk as RON, can be overridden from the command line
//! via clap, and select the projection strategy and zoom ceiling used to
//! build a [`planetoid_cubesphere::CoordinateMapping`].

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, MappingConfig};
pub use error::ConfigError;
