//! Bucket table sizing.

use super::{parse_env_var, Config};
use crate::error::{PrimapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sizing parameters for the chained hash table behind every container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Number of buckets allocated up front
    pub initial_capacity: usize,
    /// Live entries per bucket that triggers a resize, in (0, 1]
    pub load_factor: f32,
    /// Multiplier applied to the bucket count on resize, > 1
    pub growth_factor: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            load_factor: 0.75,
            growth_factor: 1.5,
        }
    }
}

impl MapConfig {
    /// Default sizing with room for `capacity` entries before the first resize
    pub fn with_capacity(capacity: usize) -> Self {
        let defaults = Self::default();
        let buckets = (capacity as f64 / defaults.load_factor as f64).ceil() as usize;
        Self {
            initial_capacity: buckets.max(1),
            ..defaults
        }
    }

    /// Entry count at which a table of `buckets` buckets must grow
    pub(crate) fn max_load(&self, buckets: usize) -> usize {
        ((buckets as f64 * self.load_factor as f64) as usize).max(1)
    }

    /// Bucket count after one growth step from `buckets`
    pub(crate) fn grown(&self, buckets: usize) -> usize {
        let next = (buckets as f64 * self.growth_factor as f64).ceil() as usize;
        next.max(buckets + 1)
    }
}

impl Config for MapConfig {
    fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(PrimapError::configuration(
                "initial_capacity must be greater than 0",
            ));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 || self.load_factor > 1.0 {
            return Err(PrimapError::configuration(format!(
                "load_factor must be in (0, 1], got {}",
                self.load_factor
            )));
        }
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(PrimapError::configuration(format!(
                "growth_factor must be greater than 1, got {}",
                self.growth_factor
            )));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.initial_capacity = parse_env_var(
            &format!("{}MAP_INITIAL_CAPACITY", prefix),
            config.initial_capacity,
        );
        config.load_factor =
            parse_env_var(&format!("{}MAP_LOAD_FACTOR", prefix), config.load_factor);
        config.growth_factor =
            parse_env_var(&format!("{}MAP_GROWTH_FACTOR", prefix), config.growth_factor);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            initial_capacity: 1024,
            load_factor: 0.5,
            growth_factor: 2.0,
        }
    }

    fn memory_preset() -> Self {
        Self {
            initial_capacity: 4,
            load_factor: 0.9,
            growth_factor: 1.25,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            PrimapError::configuration(format!("Failed to serialize map config: {}", e))
        })?;
        std::fs::write(path, serialized).map_err(|e| {
            PrimapError::configuration(format!("Failed to write map config file: {}", e))
        })?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PrimapError::configuration(format!("Failed to read map config file: {}", e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            PrimapError::configuration(format!("Failed to parse map config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
