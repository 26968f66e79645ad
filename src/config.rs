//! Configuration loading and merging
//!
//! Configuration comes from an optional YAML/JSON file (`.koseirc.yaml` and
//! friends in the working directory, then the home directory), merged with
//! command-line overrides. CLI always wins.

use crate::annotation::Severity;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Configuration and rule-file loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable annotated report
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// One line per annotation (editor integration)
    Compact,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(ConfigError::Invalid(format!("Unknown output format: {}", s))),
        }
    }
}

/// Color handling for text output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Which checker families run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    pub lexical: bool,
    pub expression: bool,
    pub context: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            lexical: true,
            expression: true,
            context: true,
        }
    }
}

/// Rule-level overrides
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Subtype ids that must not report
    pub disabled: Vec<String>,
    /// Per-subtype severity overrides
    pub severity: HashMap<String, Severity>,
    /// Directory holding the family rule files; embedded defaults when absent
    pub rules_dir: Option<PathBuf>,
}

/// Output settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: ColorMode,
    /// Only report at or above this severity
    pub min_severity: Option<Severity>,
    /// Print the statistics block in text output
    pub stats: bool,
}

/// Full engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Run checker families on a thread pool
    pub parallel: bool,
    /// Worker threads; 0 means one per logical CPU
    pub jobs: usize,
    pub checks: ChecksConfig,
    pub rules: RulesConfig,
    pub output: OutputConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
            checks: ChecksConfig::default(),
            rules: RulesConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// File names probed, in order, in each search directory
const CONFIG_NAMES: &[&str] = &[
    ".koseirc.yaml",
    ".koseirc.yml",
    ".koseirc.json",
    "kosei.yaml",
    "kosei.yml",
    "kosei.json",
];

impl EngineConfig {
    /// Load configuration from an explicit file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
            "json" => Ok(serde_json::from_str(&content)?),
            _ => Err(ConfigError::Invalid(format!(
                "Unknown config file format: {}",
                ext
            ))),
        }
    }

    /// Find and load the nearest config file, falling back to defaults
    ///
    /// Probes the working directory first, then the home directory. A file
    /// that exists but fails to parse is an error, not a silent default.
    pub fn load_default() -> Result<Self, ConfigError> {
        let mut dirs: Vec<PathBuf> = vec![PathBuf::from(".")];
        if let Some(home) = dirs::home_dir() {
            dirs.push(home);
        }

        for dir in dirs {
            for name in CONFIG_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Self::load(&candidate);
                }
            }
        }

        Ok(Self::default())
    }

    /// Check if a rule subtype is enabled
    pub fn is_rule_enabled(&self, subtype: &str) -> bool {
        !self.rules.disabled.iter().any(|d| d == subtype)
    }

    /// Configured severity override for a subtype, if any
    pub fn severity_override(&self, subtype: &str) -> Option<Severity> {
        self.rules.severity.get(subtype).copied()
    }
}
