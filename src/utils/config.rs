use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use config::{Config as ConfigLib, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use url::Url;

use crate::api::request::AbsentFaces;
use crate::core::identity::biometric::DEFAULT_MAX_FACE_BYTES;
use crate::utils::error::{Result, NodeError};

pub const DEFAULT_BASE_URL: &str = "https://api.biopassid.com/";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub node: NodeConfig,
    pub api: ApiConfig,
    pub enrollment: EnrollmentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub log_level: String,
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub subscription_key: SubscriptionKey,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentConfig {
    pub timeout_secs: Option<u64>,
    pub absent_faces: AbsentFaces,
    pub require_faces: bool,
    pub max_face_bytes: usize,
}

/// Gateway credential sent as `Ocp-Apim-Subscription-Key`. Never printed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionKey(String);

impl SubscriptionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for SubscriptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SubscriptionKey(<redacted>)")
    }
}

impl ApiConfig {
    /// Base URL with a trailing `/`, so relative endpoint paths resolve
    /// beneath it instead of replacing its last segment.
    pub fn base_url(&self) -> std::result::Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl Config {
    /// Loads defaults, `config/default`, `config/local`, an optional explicit
    /// file and `BIOPASS_*` environment variables, in that order.
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        // e.g. BIOPASS_API__SUBSCRIPTION_KEY
        let config = builder
            .add_source(
                Environment::with_prefix("BIOPASS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Self::finish(config)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config = Self::defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;

        Self::finish(config)
    }

    fn defaults() -> std::result::Result<ConfigBuilder<DefaultState>, ConfigError> {
        ConfigLib::builder()
            .set_default("node.log_level", "info")?
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.connect_timeout_secs", 10)?
            .set_default(
                "api.user_agent",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("enrollment.absent_faces", "omit")?
            .set_default("enrollment.require_faces", true)?
            .set_default("enrollment.max_face_bytes", DEFAULT_MAX_FACE_BYTES as u64)
    }

    fn finish(config: ConfigLib) -> Result<Self> {
        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api.subscription_key.is_empty() {
            return Err(NodeError::Config("api.subscription_key must be set".into()));
        }

        let url = self
            .api
            .base_url()
            .map_err(|e| NodeError::Config(format!("Invalid api.base_url: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(NodeError::Config(format!(
                "api.base_url must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.enrollment.max_face_bytes == 0 {
            return Err(NodeError::Config("enrollment.max_face_bytes must be greater than 0".into()));
        }
        if self.enrollment.timeout_secs == Some(0) {
            return Err(NodeError::Config("enrollment.timeout_secs must be greater than 0".into()));
        }

        Ok(())
    }
}

impl EnrollmentConfig {
    /// Caller-side deadline for one enrollment call, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl From<ConfigError> for NodeError {
    fn from(error: ConfigError) -> Self {
        NodeError::Config(error.to_string())
    }
}
