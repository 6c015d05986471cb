//! Configuration loading for ChordTile
//!
//! A small optional TOML file; every field has a default so a missing file or
//! a partial file both work. The file never stores placements, since nothing
//! persists across restarts.

use crate::logging::{LogFormat, LogLevel};
use crate::{ChordTileError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

const CONFIG_DIR: &str = "chordtile";
const CONFIG_FILE: &str = "config.toml";

/// User-facing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Double-tap escalation window in milliseconds.
    pub escalation_window_ms: u64,
    /// Log level override (trace, debug, info, warn, error).
    pub log_level: Option<String>,
    /// Log format override (pretty, compact, json).
    pub log_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            escalation_window_ms: 2000,
            log_level: None,
            log_format: None,
        }
    }
}

impl Config {
    /// Load configuration. An explicit path must exist and parse; the default
    /// path (`~/.config/chordtile/config.toml`) falls back to defaults when
    /// the file is absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            ChordTileError::ConfigurationError(format!(
                "failed to read {}: {err}",
                path.display()
            ))
        })?;
        let config: Config = toml::from_str(&contents).map_err(|err| {
            ChordTileError::ConfigurationError(format!(
                "failed to parse {}: {err}",
                path.display()
            ))
        })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    fn validate(&self) -> Result<()> {
        if self.escalation_window_ms == 0 {
            return Err(ChordTileError::ConfigurationError(
                "escalation_window_ms must be positive".into(),
            )
            .into());
        }
        if let Some(level) = &self.log_level {
            LogLevel::from_str(level).map_err(ChordTileError::ConfigurationError)?;
        }
        if let Some(format) = &self.log_format {
            LogFormat::from_str(format).map_err(ChordTileError::ConfigurationError)?;
        }
        Ok(())
    }

    /// The escalation window as a duration.
    pub fn escalation_window(&self) -> Duration {
        Duration::from_millis(self.escalation_window_ms)
    }

    /// Parsed log level override, if configured.
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level
            .as_deref()
            .and_then(|level| LogLevel::from_str(level).ok())
    }

    /// Parsed log format override, if configured.
    pub fn log_format(&self) -> Option<LogFormat> {
        self.log_format
            .as_deref()
            .and_then(|format| LogFormat::from_str(format).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_when_no_file() {
        let config = Config::default();
        assert_eq!(config.escalation_window(), Duration::from_secs(2));
        assert_eq!(config.log_level(), None);
    }

    #[test]
    fn loads_explicit_file() {
        let file = write_config(
            r#"
            escalation_window_ms = 1500
            log_level = "debug"
            "#,
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.escalation_window(), Duration::from_millis(1500));
        assert_eq!(config.log_level(), Some(LogLevel::Debug));
        assert_eq!(config.log_format(), None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(r#"log_format = "json""#);
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.escalation_window_ms, 2000);
        assert_eq!(config.log_format(), Some(LogFormat::Json));
    }

    #[test]
    fn rejects_zero_escalation_window() {
        let file = write_config("escalation_window_ms = 0");
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        let file = write_config("unknown_option = true");
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn rejects_invalid_log_level() {
        let file = write_config(r#"log_level = "loud""#);
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/chordtile.toml")));
        assert!(result.is_err());
    }
}
