//! Configuration for the execution service.
//!
//! Supports YAML configuration files and programmatic construction, with
//! environment variable overrides resolved at load time. The timeout ceiling
//! is administrative: requests above it are silently served at the ceiling,
//! never rejected.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::errors::ExecError;

/// Timeout applied when a request does not carry one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Administrative ceiling on any single execution's wall-clock time.
pub const DEFAULT_TIMEOUT_CEILING_SECS: u64 = 10;

/// An administrator-added language binding.
///
/// Resolves to the fixed argument vector `[program, <script path>]`; there is
/// no shell involved and no templating of request content into the command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingConfig {
    pub language: String,
    pub program: String,
    /// Script filename extension, without the leading dot.
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    pub default_timeout_secs: u64,
    pub timeout_ceiling_secs: u64,
    /// Parent directory for per-execution scratch directories. The system
    /// temp dir is used when unset.
    pub scratch_dir: Option<PathBuf>,
    /// Extra language bindings layered over the built-in table.
    pub bindings: Vec<BindingConfig>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
            timeout_ceiling_secs: DEFAULT_TIMEOUT_CEILING_SECS,
            scratch_dir: None,
            bindings: Vec::new(),
        }
    }
}

impl ExecutorConfig {
    /// Load configuration from an optional YAML file, then apply environment
    /// overrides and validate.
    pub async fn load(path: Option<&Path>) -> Result<Self, ExecError> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExecError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            ExecError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self, ExecError> {
        serde_yaml::from_str(content)
            .map_err(|e| ExecError::Config(format!("Failed to parse YAML config: {}", e)))
    }

    /// Apply `RUNLET_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ExecError> {
        if let Ok(raw) = env::var("RUNLET_DEFAULT_TIMEOUT_SECS") {
            self.default_timeout_secs = raw.parse().map_err(|_| {
                ExecError::Config(format!("Invalid RUNLET_DEFAULT_TIMEOUT_SECS: {}", raw))
            })?;
        }
        if let Ok(raw) = env::var("RUNLET_TIMEOUT_CEILING_SECS") {
            self.timeout_ceiling_secs = raw.parse().map_err(|_| {
                ExecError::Config(format!("Invalid RUNLET_TIMEOUT_CEILING_SECS: {}", raw))
            })?;
        }
        if let Ok(raw) = env::var("RUNLET_SCRATCH_DIR") {
            if !raw.trim().is_empty() {
                self.scratch_dir = Some(PathBuf::from(raw));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ExecError> {
        if self.timeout_ceiling_secs == 0 {
            return Err(ExecError::Config(
                "timeout_ceiling_secs must be at least 1".to_string(),
            ));
        }
        if self.default_timeout_secs == 0 {
            return Err(ExecError::Config(
                "default_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.default_timeout_secs > self.timeout_ceiling_secs {
            return Err(ExecError::Config(format!(
                "default_timeout_secs ({}) exceeds timeout_ceiling_secs ({})",
                self.default_timeout_secs, self.timeout_ceiling_secs
            )));
        }
        for binding in &self.bindings {
            if binding.language.trim().is_empty() || binding.program.trim().is_empty() {
                return Err(ExecError::Config(
                    "bindings entries require a language and a program".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// The timeout actually enforced for a request: missing values use the
    /// default, everything is clamped to `[1, ceiling]`.
    pub fn effective_timeout(&self, requested: Option<u64>) -> Duration {
        let ceiling = self.timeout_ceiling_secs.max(1);
        let requested = requested.unwrap_or(self.default_timeout_secs);
        Duration::from_secs(requested.clamp(1, ceiling))
    }
}
