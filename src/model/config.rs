use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from the optional `--config` TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// How long the status cell stays highlighted after a status change
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
    /// Hex overrides for theme slots, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            highlight_ms: default_highlight_ms(),
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for log files. No directory means no logging.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_highlight_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}
