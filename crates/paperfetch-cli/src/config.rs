//! Configuration loading from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use paperfetch_pubmed::ClassifierPolicy;
use serde::Deserialize;

/// File configuration for paperfetch
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub eutils: EutilsConfig,
    pub report: ReportConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EutilsConfig {
    pub base_url: String,
    pub max_results: usize,
    #[serde(deserialize_with = "deserialize_env_var")]
    pub api_key: Option<String>,
    pub tool: Option<String>,
    pub email: Option<String>,
    pub timeout_secs: u64,
}

impl Default for EutilsConfig {
    fn default() -> Self {
        let pipeline = paperfetch_pubmed::Config::default();
        Self {
            base_url: pipeline.base_url,
            max_results: pipeline.max_results,
            api_key: std::env::var("NCBI_API_KEY").ok(),
            tool: pipeline.tool,
            email: None,
            timeout_secs: pipeline.timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title_placeholder: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title_placeholder: paperfetch_pubmed::extract::UNKNOWN_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(default)]
pub struct ClassifierConfig {
    #[serde(deserialize_with = "deserialize_policy")]
    pub policy: ClassifierPolicy,
}

/// Deserialize a string that may contain environment variable reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

fn deserialize_policy<'de, D>(deserializer: D) -> Result<ClassifierPolicy, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./paperfetch.toml (current directory)
    /// 2. ~/.config/paperfetch/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("paperfetch.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "paperfetch") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Pipeline settings for `query`, before command-line overrides.
    pub fn to_pipeline_config(&self, query: &str) -> paperfetch_pubmed::Config {
        paperfetch_pubmed::Config {
            query: query.to_string(),
            base_url: self.eutils.base_url.clone(),
            max_results: self.eutils.max_results,
            api_key: self.eutils.api_key.clone(),
            tool: self.eutils.tool.clone(),
            email: self.eutils.email.clone(),
            timeout: Duration::from_secs(self.eutils.timeout_secs),
            title_placeholder: self.report.title_placeholder.clone(),
            policy: self.classifier.policy,
        }
    }
}
