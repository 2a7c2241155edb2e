//! # Registry Configuration
//!
//! Capacity hints loaded once at startup, usually from a TOML file:
//!
//! ```toml
//! type_capacity = 64
//! store_capacity = 4096
//! ```
//!
//! Missing keys fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Largest per-store reservation accepted from configuration.
pub const MAX_STORE_CAPACITY: usize = 1 << 24;

/// Largest component-type reservation accepted from configuration.
pub const MAX_TYPE_CAPACITY: usize = 1 << 16;

/// Capacity hints for a [`Registry`](crate::Registry).
///
/// These only pre-reserve memory. Stores still grow past them on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Number of component types to reserve room for.
    pub type_capacity: usize,
    /// Number of entities each newly created store reserves room for.
    pub store_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            type_capacity: 32,
            store_capacity: 256,
        }
    }
}

impl RegistryConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidConfig`] if the text is not valid TOML
    /// for this structure or a value is out of range.
    pub fn from_toml_str(text: &str) -> RegistryResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| RegistryError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ConfigIo`] if the file cannot be read, or
    /// [`RegistryError::InvalidConfig`] if its contents are rejected.
    pub fn load(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::ConfigIo(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks that all values are within accepted limits.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.type_capacity > MAX_TYPE_CAPACITY {
            return Err(RegistryError::InvalidConfig(format!(
                "type_capacity {} exceeds maximum {MAX_TYPE_CAPACITY}",
                self.type_capacity
            )));
        }
        if self.store_capacity > MAX_STORE_CAPACITY {
            return Err(RegistryError::InvalidConfig(format!(
                "store_capacity {} exceeds maximum {MAX_STORE_CAPACITY}",
                self.store_capacity
            )));
        }
        Ok(())
    }
}
