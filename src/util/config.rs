// src/util/config.rs

use std::path::{Path, PathBuf};
use std::time::Duration;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "docqa.yaml";

/// Runtime settings. Every field has a default so a partial YAML file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where `/upload`, `/query`, `/documents` and `/health` live.
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub health_interval_secs: u64,
    pub toast_duration_ms: u64,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 120,
            health_interval_secs: 15,
            toast_duration_ms: 4000,
            log_dir: PathBuf::from("./logs"),
        }
    }
}

impl AppConfig {
    /// `$DOCQA_CONFIG`, then `./docqa.yaml`, then defaults; environment
    /// overrides are applied last.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var("DOCQA_CONFIG").ok().map(PathBuf::from);

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?,
            None => Self::default(),
        };

        config.apply_overrides(
            std::env::var("DOCQA_BACKEND_URL").ok(),
            std::env::var("DOCQA_LOG_DIR").ok(),
        );
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&raw).wrap_err_with(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, backend_url: Option<String>, log_dir: Option<String>) {
        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url;
        }
        if let Some(dir) = log_dir.filter(|d| !d.trim().is_empty()) {
            self.log_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend_url.trim().is_empty() {
            return Err(eyre!("backend_url must not be empty"));
        }
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(eyre!("backend_url must start with http:// or https://, got '{}'", self.backend_url));
        }
        if self.request_timeout_secs == 0 {
            return Err(eyre!("request_timeout_secs must be greater than zero"));
        }
        if self.health_interval_secs == 0 {
            return Err(eyre!("health_interval_secs must be greater than zero"));
        }
        if self.toast_duration_ms == 0 {
            return Err(eyre!("toast_duration_ms must be greater than zero"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}
