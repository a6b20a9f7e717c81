//! Configuration from defaults, bungo.yml, environment variables and CLI flags.
//!
//! ```yaml
//! server:
//!   host: "127.0.0.1"
//!   port: 8000
//! upstream:
//!   base_url: "https://api.openai.com"
//!   model: "gpt-4-turbo-preview"
//!   request_timeout_secs: 120
//! telemetry:
//!   level: "debug"
//!   json_output: true
//! ```
//!
//! **Environment variables** (override the file):
//! - `OPENAI_API_KEY`: upstream API key (required)
//! - `OPENAI_BASE_URL`: upstream base URL without `/v1`
//! - `OPENAI_MODEL`: model sent with every completion request
//! - `REQUEST_TIMEOUT_SECS`: upstream request timeout
//! - `HOST`, `PORT`: listen address

use anyhow::{bail, Context, Result};
use bungo_providers::{
    ProviderConfig, SecretString, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::telemetry::TelemetryConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Files looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["bungo.yml", "bungo.yaml"];

pub const API_KEY_MISSING: &str =
    "OpenAI API key not found. Make sure the environment variable OPENAI_API_KEY is set.";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Default, Deserialize)]
struct BungoYamlConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    upstream: UpstreamSection,
    #[serde(default)]
    telemetry: TelemetrySection,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamSection {
    base_url: Option<String>,
    model: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct TelemetrySection {
    level: Option<String>,
    json_output: Option<bool>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Defaults, then the config file (explicit or discovered), then the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => match discover_config_file() {
                Some(found) => Self::from_yaml_file(found)?,
                None => Self::default(),
            },
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::from_yaml_str(&content).with_context(|| format!("Failed to parse {:?}", path))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        if content.trim().is_empty() {
            return Ok(config);
        }
        // A file holding only comments parses as YAML null.
        let yaml: Option<BungoYamlConfig> = serde_yaml_ng::from_str(content)?;
        config.apply_yaml(yaml.unwrap_or_default());
        Ok(config)
    }

    fn apply_yaml(&mut self, yaml: BungoYamlConfig) {
        if let Some(host) = yaml.server.host {
            self.host = host;
        }
        if let Some(port) = yaml.server.port {
            self.port = port;
        }
        if let Some(base_url) = yaml.upstream.base_url {
            self.base_url = base_url;
        }
        if let Some(model) = yaml.upstream.model {
            self.model = model;
        }
        if let Some(secs) = yaml.upstream.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(level) = yaml.telemetry.level {
            self.telemetry.level = level;
        }
        if let Some(json_output) = yaml.telemetry.json_output {
            self.telemetry.json_output = json_output;
        }
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup`; blank values are treated as unset.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = var("OPENAI_API_KEY") {
            self.api_key = Some(SecretString::from(key.trim().to_string()));
        }
        if let Some(base_url) = var("OPENAI_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(model) = var("OPENAI_MODEL") {
            self.model = model;
        }
        if let Some(secs) = var("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", &secs)?;
        }
        if let Some(host) = var("HOST") {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            self.port = parse_var("PORT", &port)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_none() {
            bail!(API_KEY_MISSING);
        }
        if self.model.trim().is_empty() {
            bail!("upstream model must not be empty");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Settings for the upstream client.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.api_key.clone(),
            base_url: Some(self.base_url_trimmed().to_string()),
            model: self.model.clone(),
            timeout_seconds: Some(self.request_timeout_secs),
        }
    }
}

fn discover_config_file() -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.is_file())
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid {key} value {value:?}"))
}
