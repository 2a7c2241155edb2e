//! # Registry Error Types
//!
//! Only the strict single-component lookup can fail at runtime. Every bulk
//! query and every removal reports absence as an empty result instead.

use thiserror::Error;

use crate::ecs::EntityId;

/// Errors that can occur in the component registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The entity does not possess a component of the requested type.
    ///
    /// Callers that expect absence should check `has_component` first or use
    /// `find_component`.
    #[error("entity {entity} does not possess the component: {component}")]
    NotFound {
        /// The entity that was queried.
        entity: EntityId,
        /// Short name of the requested component type.
        component: &'static str,
    },

    /// Invalid configuration text or values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
