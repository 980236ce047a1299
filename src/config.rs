use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7310".to_string()
}

/// Shared-secret gate for the admin endpoints.
///
/// When `api_key` is unset the gate is disabled and admin routes are open.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ValidationConfig {
    #[serde(default = "default_min_name_chars")]
    pub min_name_chars: usize,
    #[serde(default = "default_min_message_chars")]
    pub min_message_chars: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_name_chars: default_min_name_chars(),
            min_message_chars: default_min_message_chars(),
        }
    }
}

fn default_min_name_chars() -> usize {
    2
}
fn default_min_message_chars() -> usize {
    5
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        warn!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    if config.validation.min_name_chars == 0 {
        anyhow::bail!("validation.min_name_chars must be >= 1");
    }

    if config.validation.min_message_chars == 0 {
        anyhow::bail!("validation.min_message_chars must be >= 1");
    }

    if let Some(ref key) = config.auth.api_key {
        if key.is_empty() {
            anyhow::bail!("auth.api_key must not be empty when set");
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pinwall.toml");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:7310");
        assert_eq!(config.validation.min_name_chars, 2);
        assert_eq!(config.validation.min_message_chars, 5);
        assert!(config.auth.api_key.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let (_tmp, path) = write_config("[server]\nbind = \"0.0.0.0:8080\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.validation.min_message_chars, 5);
    }

    #[test]
    fn test_rejects_zero_minimum() {
        let (_tmp, path) = write_config("[validation]\nmin_name_chars = 0\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_rejects_empty_api_key() {
        let (_tmp, path) = write_config("[auth]\napi_key = \"\"\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_full_config() {
        let (_tmp, path) = write_config(
            "[server]\nbind = \"127.0.0.1:9000\"\n\
             [auth]\napi_key = \"sekrit\"\n\
             [validation]\nmin_name_chars = 3\nmin_message_chars = 10\n",
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.auth.api_key.as_deref(), Some("sekrit"));
        assert_eq!(config.validation.min_name_chars, 3);
        assert_eq!(config.validation.min_message_chars, 10);
    }
}
