use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the model service credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub harness: HarnessConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Credential for the model service. Left empty here, it is taken from
    /// `GEMINI_API_KEY` by [`SystemConfig::load_config`].
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_request_timeout() -> u64 {
    300
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ModelConfig {
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// How generated benchmark programs are run: `program args... <source_file>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default = "default_source_file")]
    pub source_file: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub scratch_root: Option<PathBuf>,
    #[serde(default = "default_output_limit")]
    pub output_limit_bytes: usize,
}

fn default_program() -> String {
    "go".to_string()
}

fn default_args() -> Vec<String> {
    vec!["run".to_string()]
}

fn default_source_file() -> String {
    "main.go".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_output_limit() -> usize {
    1024 * 1024
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            source_file: default_source_file(),
            timeout_secs: default_timeout_secs(),
            scratch_root: None,
            output_limit_bytes: default_output_limit(),
        }
    }
}

impl HarnessConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SystemConfig {
    /// Parse and validate a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: SystemConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when it exists, defaults otherwise, then fill the model
    /// credential from the environment if the file did not provide one.
    pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            Self::default()
        };
        Ok(config.with_api_key_from_env())
    }

    pub fn with_api_key_from_env(mut self) -> Self {
        if !self.model.has_credential() {
            self.model.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }
        if self.server.body_limit_bytes == 0 {
            anyhow::bail!("server.body_limit_bytes must be non-zero");
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            anyhow::bail!(
                "model.temperature must be between 0.0 and 2.0, got {}",
                self.model.temperature
            );
        }
        if self.model.model.trim().is_empty() {
            anyhow::bail!("model.model must not be empty");
        }
        if self.model.request_timeout_secs == 0 {
            anyhow::bail!("model.request_timeout_secs must be non-zero");
        }
        if self.harness.program.trim().is_empty() {
            anyhow::bail!("harness.program must not be empty");
        }
        if self.harness.timeout_secs == 0 {
            anyhow::bail!("harness.timeout_secs must be non-zero");
        }
        let source = Path::new(&self.harness.source_file);
        if self.harness.source_file.is_empty() || source.file_name() != Some(source.as_os_str()) {
            anyhow::bail!(
                "harness.source_file must be a bare file name, got {:?}",
                self.harness.source_file
            );
        }
        Ok(())
    }
}
