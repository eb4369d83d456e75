// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::constants::{DEFAULT_SEARCH_BASE_URL, DEFAULT_SEARCH_TIMEOUT_SECS};
use crate::error::AdError;
use crate::text::FontLibrary;

pub mod job;
pub mod retry;

pub use job::{BannerJob, FranchiseJob, ProductJob, StoryJob};
pub use retry::RetryConfig;

/// Application settings shared by every command
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fonts: FontsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

/// Font override directory
///
/// Files are looked up by face stem (`display-bold.ttf`, `text-italic.otf`, ...).
/// Faces without an override keep the embedded defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_SEARCH_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_SEARCH_TIMEOUT_SECS
}

/// Search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Subscription token; searches return nothing when empty
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Logging settings; `RUST_LOG` overrides `level` when set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn env_var_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .expect("Invalid env var regex - this is a compile-time bug")
    })
}

/// Replace `${VAR_NAME}` with environment variable values.
///
/// Fails if any referenced variable is unset.
pub fn substitute_env(yaml: &str) -> Result<String, AdError> {
    let re = env_var_regex();

    for caps in re.captures_iter(yaml) {
        let var_name = &caps[1];
        std::env::var(var_name).map_err(|_| {
            AdError::Config(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            ))
        })?;
    }

    let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_default()
    });
    Ok(substituted.into_owned())
}

impl AppConfig {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, AdError> {
        let substituted = substitute_env(yaml)?;
        if substituted.trim().is_empty() {
            return Ok(AppConfig::default());
        }
        serde_yaml::from_str(&substituted).map_err(|e| AdError::Config(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AdError> {
        let yaml = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AdError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), AdError> {
        if self.search.timeout_secs == 0 {
            return Err(AdError::Config(
                "search.timeout_secs must be greater than 0".to_string(),
            ));
        }

        let base_url = &self.search.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AdError::Config(format!(
                "search.base_url '{}' must start with http:// or https://",
                base_url
            )));
        }

        self.search.retry.validate()?;

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(AdError::Config(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        if let Some(dir) = &self.fonts.dir {
            if !dir.is_dir() {
                return Err(AdError::Config(format!(
                    "fonts.dir '{}' is not a directory",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Register font overrides with the global library; returns faces loaded.
    pub fn apply_fonts(&self) -> Result<usize, AdError> {
        match &self.fonts.dir {
            Some(dir) => FontLibrary::global().load_overrides(dir),
            None => Ok(0),
        }
    }
}
