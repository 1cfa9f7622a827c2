//! Decode policy for deserialized containers.
//!
//! The policy travels with each `deserialize` call. Changing the options a
//! caller passes never affects containers that were already decoded.

use super::Config;
use crate::error::{PrimapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How records read from the wire become a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Insert each record into the bucket table as it is read
    #[default]
    Eager,
    /// Append records to raw key/value arrays; build the table on first use
    Lazy,
}

impl fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager => f.write_str("eager"),
            Self::Lazy => f.write_str("lazy"),
        }
    }
}

impl FromStr for DecodePolicy {
    type Err = PrimapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" => Ok(Self::Eager),
            "lazy" => Ok(Self::Lazy),
            other => Err(PrimapError::configuration(format!(
                "unknown decode policy '{}', expected 'eager' or 'lazy'",
                other
            ))),
        }
    }
}

/// Options threaded through every deserialize call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Materialization policy for the decoded container
    pub policy: DecodePolicy,
}

impl DecodeOptions {
    /// Options that materialize while reading
    pub const fn eager() -> Self {
        Self {
            policy: DecodePolicy::Eager,
        }
    }

    /// Options that defer materialization until first use
    pub const fn lazy() -> Self {
        Self {
            policy: DecodePolicy::Lazy,
        }
    }

    /// Whether these options defer materialization
    pub fn is_lazy(&self) -> bool {
        self.policy == DecodePolicy::Lazy
    }
}

impl Config for DecodeOptions {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let var = format!("{}DECODE_POLICY", prefix);
        let policy = match std::env::var(&var) {
            Ok(value) => value.parse()?,
            Err(_) => DecodePolicy::default(),
        };
        log::debug!("Decode policy from {}: {}", var, policy);
        Ok(Self { policy })
    }

    fn performance_preset() -> Self {
        Self::lazy()
    }

    fn memory_preset() -> Self {
        Self::eager()
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            PrimapError::configuration(format!("Failed to serialize decode options: {}", e))
        })?;
        std::fs::write(path, serialized).map_err(|e| {
            PrimapError::configuration(format!("Failed to write decode options file: {}", e))
        })?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PrimapError::configuration(format!("Failed to read decode options file: {}", e))
        })?;
        let options: Self = serde_json::from_str(&content).map_err(|e| {
            PrimapError::configuration(format!("Failed to parse decode options file: {}", e))
        })?;
        options.validate()?;
        Ok(options)
    }
}
