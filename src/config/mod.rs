//! Configuration APIs for primap
//!
//! Two configuration values drive the containers:
//!
//! - [`MapConfig`]: bucket table sizing (initial capacity, load factor, growth)
//! - [`DecodeOptions`]: how `deserialize` materializes a container
//!
//! Both implement [`Config`], which provides validation, environment
//! initialization, presets and JSON persistence.
//!
//! ```rust
//! use primap::config::{Config, DecodeOptions, DecodePolicy, MapConfig};
//!
//! let sizing = MapConfig::performance_preset();
//! assert!(sizing.validate().is_ok());
//!
//! let lazy = DecodeOptions::lazy();
//! assert_eq!(lazy.policy, DecodePolicy::Lazy);
//! ```
//!
//! Environment variables use the `PRIMAP_` prefix, for example
//! `PRIMAP_MAP_LOAD_FACTOR=0.6` or `PRIMAP_DECODE_POLICY=lazy`.

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod decode;
pub mod map;

pub use decode::{DecodeOptions, DecodePolicy};
pub use map::MapConfig;

/// Default environment variable prefix
pub const ENV_PREFIX: &str = "PRIMAP_";

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables with the `PRIMAP_`
    /// prefix, falling back to defaults for unset variables.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset tuned for throughput at the cost of memory.
    fn performance_preset() -> Self;

    /// Preset tuned for a small footprint.
    fn memory_preset() -> Self;

    /// Balanced preset, the default.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or unparsable.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
