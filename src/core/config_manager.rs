// src/core/config_manager.rs
//! Unified configuration: config.yaml sections per environment plus env overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::utils;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigManager {
    pub database_path: PathBuf,
    pub port: u16,
    pub llm: LlmConfig,
    pub job_board: JobBoardConfig,
    pub smtp: SmtpConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobBoardConfig {
    pub listing_url: String,
    pub base_url: String,
    pub path_pattern: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
}

/// Limits for the API server's in-memory sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub idle_timeout_minutes: i64,
    pub max_sessions: usize,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: Option<ConfigManager>,
    production: Option<ConfigManager>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/portfolio.db"),
            port: 8000,
            llm: LlmConfig::default(),
            job_board: JobBoardConfig::default(),
            smtp: SmtpConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-70b-versatile".to_string(),
            timeout_seconds: 120,
            api_key: None,
        }
    }
}

impl Default for JobBoardConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://arc.dev/remote-jobs".to_string(),
            base_url: "https://arc.dev".to_string(),
            path_pattern: "remote-jobs/details".to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_minutes: 60,
            max_sessions: 1000,
        }
    }
}

impl ConfigManager {
    /// Load configuration for the current environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = Self::environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = std::env::var("COLDREACH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.yaml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_yaml_str(&content, &environment)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            info!(
                "{} not found, using built-in defaults",
                config_path.display()
            );
            Self::default()
        };

        config.apply_env_overrides()?;
        config.database_path = Self::resolve_path(&config.database_path)?;
        Ok(config)
    }

    /// Active environment name (`local` unless overridden)
    pub fn environment() -> String {
        std::env::var("COLDREACH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Pick the section for `environment`; a missing section falls back to defaults
    pub fn from_yaml_str(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Invalid configuration YAML")?;

        let section = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(section.unwrap_or_default())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Ok(port) = std::env::var("ROCKET_PORT") {
            self.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }
        Ok(())
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    /// Ensure the database directory exists
    pub async fn ensure_directories(&self) -> Result<()> {
        if let Some(db_parent) = self.database_path.parent() {
            utils::ensure_dir_exists(db_parent).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
local:
  database_path: data/local.db
  llm:
    model: llama-3.1-8b-instant
production:
  database_path: /app/data/portfolio.db
  port: 9000
  smtp:
    host: smtp.example.com
    port: 2525
"#;

    #[test]
    fn test_defaults() {
        let config = ConfigManager::default();
        assert_eq!(config.llm.model, "llama-3.1-70b-versatile");
        assert_eq!(config.job_board.path_pattern, "remote-jobs/details");
        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.session.idle_timeout_minutes, 60);
        assert_eq!(config.session.max_sessions, 1000);
    }

    #[test]
    fn test_local_section_keeps_unset_defaults() {
        let config = ConfigManager::from_yaml_str(SAMPLE, "local").unwrap();
        assert_eq!(config.database_path, PathBuf::from("data/local.db"));
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.llm.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_production_section() {
        let config = ConfigManager::from_yaml_str(SAMPLE, "production").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.smtp.host, "smtp.example.com");
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.job_board.listing_url, "https://arc.dev/remote-jobs");
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let config = ConfigManager::from_yaml_str("local:\n  port: 7000\n", "production").unwrap();
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        assert!(ConfigManager::from_yaml_str("local: [", "local").is_err());
    }
}
