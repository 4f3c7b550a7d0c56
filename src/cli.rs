//! Command-line arguments.

use crate::config::{Config, RECURSIVE_MAX_DEPTH};
use crate::error::Result;
use crate::logging::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for debserver
#[derive(Debug, Parser)]
#[command(
    name = "debserver",
    version,
    about = "Index a folder of Debian packages and serve it over HTTP"
)]
pub struct Args {
    /// Folder containing the packages
    pub folder: Option<PathBuf>,

    /// Watch the folder and re-index when it changes
    #[arg(short, long, env = "DEBSERVER_WATCH")]
    pub watch: bool,

    /// Address to listen on [default: localhost:8080]
    #[arg(short, long, env = "DEBSERVER_LISTEN")]
    pub listen: Option<String>,

    /// Only log errors
    #[arg(short, long)]
    pub silent: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Search for packages in child folders
    #[arg(short, long)]
    pub recursive: bool,

    /// Deepest folder level to search, overrides --recursive
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Path to a JSON configuration file
    #[arg(long, env = "DEBSERVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Write the index once and exit without serving
    #[arg(long)]
    pub index_only: bool,
}

impl Args {
    /// Build the configuration: the config file if given, overridden by arguments.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Override `config` with the values given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(folder) = &self.folder {
            config.folder = folder.clone();
        }
        if let Some(listen) = &self.listen {
            config.listen = listen.clone();
        }
        if self.watch {
            config.watch = true;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        } else if self.recursive {
            config.max_depth = RECURSIVE_MAX_DEPTH;
        }
        if self.verbose {
            config.logging.level = LogLevel::Debug;
        } else if self.silent {
            config.logging.level = LogLevel::Error;
        }
        if self.json_logs {
            config.logging.json_format = true;
        }
    }
}
