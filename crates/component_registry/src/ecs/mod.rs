//! # Entity Component Storage
//!
//! A two-level registry mapping component types to per-type stores, and
//! entity ids to component instances inside each store.
//!
//! ## Design Philosophy
//!
//! - Stores are created lazily on first insert and never removed
//! - Instances are shared through `Arc`, so query results never alias the
//!   live maps
//! - One coarse lock serializes every mutation across all types

mod component;
mod entity;
mod registry;
mod snapshot;
mod storage;

pub use component::{Component, ComponentType};
pub use entity::EntityId;
pub use registry::Registry;
pub use snapshot::EntityComponents;
pub use storage::{AnyComponent, ComponentStore, ErasedStore};
