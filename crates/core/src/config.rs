//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline geometry used when a field is omitted.
//! 2. **Structures:** Cache geometry parameters and general run options.
//! 3. **Loading:** JSON deserialization from a string or a file.
//!
//! Command-line flags override whatever a JSON file supplies; see the `csim` binary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{ConfigError, Geometry, GeometryError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default set-index bits (16 sets).
    pub const SET_INDEX_BITS: u32 = 4;

    /// Default associativity (1 way = direct-mapped).
    pub const ASSOCIATIVITY: usize = 1;

    /// Default block-offset bits (16-byte blocks).
    pub const BLOCK_OFFSET_BITS: u32 = 4;
}

/// Root configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Run-wide options.
    pub general: GeneralConfig,
    /// Cache geometry parameters.
    pub cache: CacheConfig,
}

/// Run-wide options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Print each trace record followed by its access classifications.
    pub verbose: bool,
}

/// Unvalidated cache geometry parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Set-index bits (`s`); the cache has `2^s` sets.
    pub set_index_bits: u32,
    /// Lines per set (`E`).
    pub associativity: usize,
    /// Block-offset bits (`b`); blocks are `2^b` bytes.
    pub block_offset_bits: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            set_index_bits: defaults::SET_INDEX_BITS,
            associativity: defaults::ASSOCIATIVITY,
            block_offset_bits: defaults::BLOCK_OFFSET_BITS,
        }
    }
}

impl CacheConfig {
    /// Validates the parameters into an immutable [`Geometry`].
    ///
    /// # Errors
    ///
    /// Propagates any [`GeometryError`] from [`Geometry::new`].
    pub fn geometry(&self) -> Result<Geometry, GeometryError> {
        Geometry::new(
            self.set_index_bits,
            self.associativity,
            self.block_offset_bits,
        )
    }
}

impl Config {
    /// Parses a configuration from JSON text. Omitted fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Inline`] if the text is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Inline)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are not a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
