//! Configuration types for the translation service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use kotoba_translate::TranslateConfig;

use crate::error::{AppError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "KOTOBA_CONFIG";

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener and cache settings.
    pub server: ServerConfig,
    /// Translation lookup settings passed straight to the core.
    pub translate: TranslateConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Port to listen on (use `0` for auto-assign).
    pub port: u16,
    /// How long a successful lookup is served from memory. `0` disables
    /// the cache.
    pub cache_ttl_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8787,
            cache_ttl_seconds: 600,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// translate section fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;
        config.translate.validate()?;
        Ok(config)
    }

    /// Load configuration from `$KOTOBA_CONFIG`, else the default path if
    /// it exists, else built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is found but cannot be loaded. A
    /// `$KOTOBA_CONFIG` pointing at a missing file is an error.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            tracing::info!(path = %path.display(), "loading config from {CONFIG_ENV}");
            return Self::from_file(&path);
        }
        let path = Self::default_config_path();
        if path.exists() {
            tracing::info!(path = %path.display(), "loading config");
            return Self::from_file(&path);
        }
        tracing::info!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Returns the default config file path: `<config_dir>/kotoba/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("kotoba"))
            .unwrap_or_else(|| PathBuf::from("/tmp/kotoba-config"))
            .join("config.toml")
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kotoba_translate::SourceId;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.cache_ttl_seconds, 600);
        assert!(config.translate.validate().is_ok());
        assert_eq!(config.bind_addr(), "127.0.0.1:8787");
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9000

[translate]
sources = ["jisho", "libre_translate"]
"#,
        )
        .expect("write config");

        let config = AppConfig::from_file(&path).expect("load");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.translate.sources,
            vec![SourceId::Jisho, SourceId::LibreTranslate]
        );
        assert_eq!(config.translate.timeout_seconds, 6);
    }

    #[test]
    fn endpoint_override_parsed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[translate.endpoints]
jisho = "http://localhost:9999/api"
"#,
        )
        .expect("write config");

        let config = AppConfig::from_file(&path).expect("load");
        assert_eq!(config.translate.endpoints.jisho, "http://localhost:9999/api");
        assert!(!config.translate.endpoints.weblio.is_empty());
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = AppConfig::from_file(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").expect("write");
        assert!(matches!(AppConfig::from_file(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn from_file_rejects_invalid_translate_section() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[translate]\ntimeout_seconds = 0\n").expect("write");
        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn default_config_path_ends_with_config_toml() {
        let path = AppConfig::default_config_path();
        let path_str = path.to_string_lossy();
        assert!(path_str.ends_with("config.toml"));
        assert!(path_str.contains("kotoba"));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).expect("serialize");
        assert!(text.contains("cache_ttl_seconds"));
        let parsed: AppConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }
}
