//! User configuration for critique.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/critique/config.toml`. Every key
//! is optional and a missing or unparsable file means defaults; config errors
//! are logged, never fatal.
//!
//! ```toml
//! endpoint = "http://localhost:3000/ai/get-review"
//! language = "rs"
//! connect_timeout_secs = 5
//! ```

use std::path::{Path, PathBuf};

use critique_core::DEFAULT_ENDPOINT;
use serde::Deserialize;

/// Environment variable that overrides `endpoint` from the config file.
pub const ENDPOINT_ENV: &str = "CRITIQUE_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the assessment service.
    pub endpoint: String,
    /// File extension used to pick the editor's syntax, e.g. `"js"` or `"rs"`.
    pub language: String,
    /// Connection-phase timeout for the HTTP client.
    pub connect_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            language: "js".to_owned(),
            connect_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Loads the config file, then applies the environment override.
    pub fn load() -> Self {
        Self::load_from_path(&config_path()).with_endpoint_override(std::env::var(ENDPOINT_ENV).ok())
    }

    /// Loads `path`, falling back to defaults if it is absent or malformed.
    pub fn load_from_path(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config parse error, using defaults");
                Self::default()
            }
        }
    }

    /// Replaces `endpoint` when `endpoint` is a non-empty override.
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        self
    }
}

/// Resolves an XDG base directory, falling back to `$HOME/<home_suffix>`.
fn xdg_dir(var: &str, home_suffix: &str) -> PathBuf {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(home_suffix))
        })
        .unwrap_or_else(|| PathBuf::from(home_suffix))
}

/// Returns the path to the critique config file.
///
/// Prefers `$XDG_CONFIG_HOME/critique/config.toml`; falls back to
/// `~/.config/critique/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config").join("critique").join("config.toml")
}

/// Directory holding the preference database and the log file.
///
/// Prefers `$XDG_DATA_HOME/critique`; falls back to `~/.local/share/critique`.
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share").join("critique")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_from_path(&dir.path().join("nope.toml"));
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "language = \"rs\"").unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config.language, "rs");
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = [").unwrap();
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn endpoint_override_ignores_blank_values() {
        let config = Config::default().with_endpoint_override(Some("  ".to_owned()));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        let config = Config::default().with_endpoint_override(Some("http://localhost:3000/r".to_owned()));
        assert_eq!(config.endpoint, "http://localhost:3000/r");
    }
}
