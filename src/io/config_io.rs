use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load the config file, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text)
}

pub fn parse_config(text: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.highlight_ms, 1000);
        assert_eq!(config.log.level, "info");
        assert!(config.log.dir.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("taskpad.toml");
        fs::write(
            &path,
            r##"[ui]
show_key_hints = false
highlight_ms = 400

[ui.colors]
highlight = "#FB4196"

[log]
level = "debug"
dir = "/tmp/taskpad-logs"
"##,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.ui.show_key_hints);
        assert_eq!(config.ui.highlight_ms, 400);
        assert_eq!(
            config.ui.colors.get("highlight").map(String::as_str),
            Some("#FB4196")
        );
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.dir, Some(PathBuf::from("/tmp/taskpad-logs")));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[ui]\nhighlight_ms = 50\n").unwrap();
        assert_eq!(config.ui.highlight_ms, 50);
        assert!(config.ui.show_key_hints);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("could not read"));
    }

    #[test]
    fn test_bad_toml() {
        let err = parse_config("[ui\nshow_key_hints = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = parse_config("[ui]\nhighlight_ms = \"soon\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
