use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProcessorError, ProcessorResult};

/// Environment variable overriding [`ProcessorConfig::validator_url`].
pub const VALIDATOR_URL_ENV: &str = "VALIDATOR_URL";
/// Environment variable overriding [`ProcessorConfig::state_path`].
pub const STATE_PATH_ENV: &str = "COOKIEJAR_STATE";

/// Processor configuration, loadable from TOML.
///
/// Missing keys fall back to [`Default`], so an empty file is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Validator endpoint the processor registers with.
    pub validator_url: String,
    /// JSON state file used by the local runtime.
    pub state_path: PathBuf,
    /// Reject transactions whose payload does not match `payload_sha512`.
    pub verify_payload_hash: bool,
    /// Restrict reads to header inputs and writes to header outputs.
    pub enforce_header_addresses: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            validator_url: "tcp://validator:4004".into(),
            state_path: PathBuf::from("cookiejar-state.json"),
            verify_payload_hash: true,
            enforce_header_addresses: true,
        }
    }
}

impl ProcessorConfig {
    /// Parse a TOML document.
    pub fn from_toml(raw: &str) -> ProcessorResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ProcessorResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Apply `VALIDATOR_URL` and `COOKIEJAR_STATE` from the process environment.
    pub fn apply_env_overrides(self) -> ProcessorResult<Self> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in production).
    pub fn apply_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ProcessorResult<Self> {
        if let Some(url) = lookup(VALIDATOR_URL_ENV).filter(|v| !v.is_empty()) {
            self.validator_url = url;
        }
        if let Some(path) = lookup(STATE_PATH_ENV).filter(|v| !v.is_empty()) {
            self.state_path = PathBuf::from(path);
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> ProcessorResult<()> {
        if self.validator_url.trim().is_empty() {
            return Err(ProcessorError::Config("validator_url must not be empty".into()));
        }
        if self.state_path.as_os_str().is_empty() {
            return Err(ProcessorError::Config("state_path must not be empty".into()));
        }
        Ok(())
    }
}
