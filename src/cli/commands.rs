use std::path::PathBuf;

use clap::Parser;

use crate::model::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "tp", about = concat!("taskpad v", env!("CARGO_PKG_VERSION"), " - a sortable task table for the terminal"), version)]
pub struct Cli {
    /// Read settings from a TOML file
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write log files to this directory
    #[arg(long = "log-dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Flags win over the config file
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.log_dir {
            config.log.dir = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
    }
}
