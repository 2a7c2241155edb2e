//! # Component Registry
//!
//! Thread-safe component storage for entity-component architectures:
//! - Typed lookups keyed by `(EntityId, component type)`
//! - Bulk queries by component type and by entity
//! - One coarse lock for all mutations
//!
//! ## Error Rules
//!
//! 1. **Single lookups are strict** - `get_component` fails with `NotFound`
//! 2. **Bulk queries are tolerant** - absence is an empty result
//! 3. **Removals never fail** - removing something absent is a no-op
//!
//! ## Example
//!
//! ```rust
//! use component_registry::{Component, EntityId, Registry};
//!
//! #[derive(Debug, PartialEq)]
//! struct Position { x: f32, y: f32 }
//! impl Component for Position {}
//!
//! #[derive(Debug, PartialEq)]
//! struct Velocity { dx: f32, dy: f32 }
//! impl Component for Velocity {}
//!
//! let registry = Registry::new();
//! let ship = EntityId::new(1);
//!
//! registry.add_component(ship, Position { x: 0.0, y: 0.0 });
//! registry.add_component(ship, Velocity { dx: 1.0, dy: 1.0 });
//!
//! assert_eq!(registry.get_all_entities_with::<Position>(), vec![ship]);
//! assert_eq!(registry.get_all_components_on(ship).len(), 2);
//!
//! registry.remove_component::<Position>(ship);
//! assert!(!registry.has_component::<Position>(ship));
//! assert!(registry.has_component::<Velocity>(ship));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;

pub use config::{RegistryConfig, MAX_STORE_CAPACITY, MAX_TYPE_CAPACITY};
pub use ecs::{
    AnyComponent, Component, ComponentStore, ComponentType, EntityComponents, EntityId,
    ErasedStore, Registry,
};
pub use error::{RegistryError, RegistryResult};
