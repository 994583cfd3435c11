use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::error::{ConfigError, Result};

/// Desktop browser identity; some sites reject default client user agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Hard limit on the whole request, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub log_to_file: bool,

    #[serde(default = "default_log_file")]
    pub log_file: String,

    #[serde(default)]
    pub json_format: bool,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::NotFound(path.as_ref().display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config file, or the default location if it exists,
    /// falling back to built-in defaults. Environment overrides always apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_with_env(path);
        }

        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_with_env(path),
            _ => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Config(e.to_string()))?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout == 0 {
            return Err(ConfigError::Config("Fetch timeout must be greater than 0".to_string()));
        }

        if self.fetch.user_agent.trim().is_empty() {
            return Err(ConfigError::Config("User agent cannot be empty".to_string()));
        }

        tracing_subscriber::EnvFilter::try_new(&self.logging.level)
            .map_err(|e| ConfigError::Config(format!("Invalid log level '{}': {}", self.logging.level, e)))?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(user_agent) = std::env::var("PAGE_EXTRACT_USER_AGENT") {
            self.fetch.user_agent = user_agent;
        }

        if let Ok(timeout) = std::env::var("PAGE_EXTRACT_TIMEOUT") {
            if let Ok(val) = timeout.parse() {
                self.fetch.timeout = val;
            }
        }

        if let Ok(level) = std::env::var("PAGE_EXTRACT_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    pub fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("page-extract"))
            .ok_or_else(|| ConfigError::Config("Could not determine config directory".to_string()))
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

impl FetchSettings {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_to_file: false,
            log_file: default_log_file(),
            json_format: false,
        }
    }
}

fn default_user_agent() -> String { BROWSER_USER_AGENT.to_string() }
fn default_timeout() -> u64 { 15 }
fn default_max_redirects() -> usize { 10 }

fn default_log_level() -> String { "info".to_string() }
fn default_log_file() -> String { "logs/page-extract.log".to_string() }
