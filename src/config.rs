use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data/chef.sqlite")
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_base_url")]
    pub base_url: String,
    #[serde(default = "default_gateway_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_base_url(),
            timeout_secs: default_gateway_timeout_secs(),
        }
    }
}

fn default_gateway_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}
fn default_gateway_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
    #[serde(default = "default_ai_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: default_ai_base_url(),
            model: default_ai_model(),
            timeout_secs: default_ai_timeout_secs(),
        }
    }
}

fn default_ai_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}
fn default_ai_model() -> String {
    "llama-3.1-8b-instant".to_string()
}
fn default_ai_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

/// Load configuration from a TOML file, falling back to built-in defaults
/// when the file does not exist. The `PORT` environment variable, if set,
/// overrides `[server] port`.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")?
    } else {
        Config::default()
    };

    // Validate gateway
    if config.gateway.base_url.trim().is_empty() {
        anyhow::bail!("gateway.base_url must not be empty");
    }
    if config.gateway.timeout_secs == 0 {
        anyhow::bail!("gateway.timeout_secs must be > 0");
    }

    // Validate AI forwarder
    if config.ai.base_url.trim().is_empty() {
        anyhow::bail!("ai.base_url must not be empty");
    }
    if config.ai.model.trim().is_empty() {
        anyhow::bail!("ai.model must not be empty");
    }
    if config.ai.timeout_secs == 0 {
        anyhow::bail!("ai.timeout_secs must be > 0");
    }

    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ai.model, "llama-3.1-8b-instant");
        assert!(config.gateway.base_url.contains("themealdb"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("chef.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 8080

[gateway]
base_url = "http://127.0.0.1:9999"
"#,
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gateway.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.gateway.timeout_secs, 10);
        assert_eq!(config.ai.timeout_secs, 30);
    }

    #[test]
    fn test_rejects_blank_model() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("chef.toml");
        std::fs::write(&path, "[ai]\nmodel = \"\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
