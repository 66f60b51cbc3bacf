//! Configuration file parser for ~/.config/bulletin/config.toml.
//!
//! The file is optional; a missing or blank file yields the defaults. The
//! API base URL resolves in precedence order: CLI flag, then the
//! `BULLETIN_API_URL` environment variable, then the config file, then the
//! documented local default.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default base URL for a locally running posts/categories service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9000";

/// Environment variable overriding the config-file base URL.
pub const API_URL_ENV: &str = "BULLETIN_API_URL";

/// Keys `load` recognizes; anything else in the file draws a warning.
const KNOWN_KEYS: [&str; 3] = ["api_base_url", "default_link", "show_sidebar"];

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level application configuration.
///
/// Every field is `#[serde(default)]` so the file may specify any subset
/// of keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the posts/categories API.
    pub api_base_url: String,

    /// Location to open when none is given on the command line, e.g.
    /// `/posts?category=abc`.
    pub default_link: String,

    /// Whether the category sidebar starts visible.
    pub show_sidebar: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_link: "/posts".to_string(),
            show_sidebar: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A missing or whitespace-only file is not an error; it simply means
    /// defaults. Invalid TOML is reported with line information via
    /// [`ConfigError::Parse`]. Unknown keys parse fine but are logged, to
    /// catch typos.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::warn_unknown_keys(&content);

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            api_base_url = %config.api_base_url,
            "Loaded configuration"
        );
        Ok(config)
    }

    fn warn_unknown_keys(content: &str) {
        let Ok(table) = content.parse::<toml::Table>() else {
            return; // the typed parse below reports the real error
        };
        for key in table.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                tracing::warn!(key = %key, "Unknown key in config file, ignoring");
            }
        }
    }

    /// Resolve the effective base URL: CLI flag > env var > config file.
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> String {
        if let Some(url) = cli_override {
            return url.to_string();
        }
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.api_base_url.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Write `content` into a throwaway config file and load it.
    fn load_str(label: &str, content: &str) -> Result<Config, ConfigError> {
        let dir = std::env::temp_dir().join(format!("bulletin_config_{}", label));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        let result = Config::load(&path);
        std::fs::remove_dir_all(&dir).ok();
        result
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.default_link, "/posts");
        assert!(config.show_sidebar);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/bulletin_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_blank_file_returns_default() {
        let config = load_str("blank", "   \n\t\n").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.show_sidebar);
    }

    #[test]
    fn test_partial_config_fills_in_defaults() {
        let config = load_str("partial", "show_sidebar = false\n").unwrap();
        assert!(!config.show_sidebar);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.default_link, "/posts");
    }

    #[test]
    fn test_full_config() {
        let config = load_str(
            "full",
            concat!(
                "api_base_url = \"https://posts.example.com\"\n",
                "default_link = \"/posts?category=rust\"\n",
                "show_sidebar = false\n",
            ),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://posts.example.com");
        assert_eq!(config.default_link, "/posts?category=rust");
        assert!(!config.show_sidebar);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = load_str("invalid", "this is not [valid toml");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let result = load_str("wrongtype", "show_sidebar = \"yes\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = load_str("unknown", "api_base_url = \"http://x\"\nextra = 1\n").unwrap();
        assert_eq!(config.api_base_url, "http://x");
    }

    #[test]
    fn test_cli_override_beats_config() {
        let config = Config {
            api_base_url: "http://from-config".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_base_url(Some("http://from-cli")),
            "http://from-cli"
        );
        // Env var precedence is not exercised here: tests run in parallel
        // and process-wide env mutation would race.
        assert_eq!(config.resolve_base_url(None), "http://from-config");
    }
}
