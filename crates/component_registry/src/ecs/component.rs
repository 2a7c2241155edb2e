//! # Component Types
//!
//! Components are plain data owned by the registry. Each Rust type that
//! implements [`Component`] gets its own store, keyed by a [`ComponentType`]
//! tag derived from the type itself.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker trait for ECS components.
///
/// Components must be:
/// - `'static`: identified at runtime by their `TypeId`
/// - `Send + Sync`: shared between threads through the registry
///
/// # Example
///
/// ```rust
/// use component_registry::Component;
///
/// #[derive(Debug, PartialEq)]
/// struct Position {
///     x: f32,
///     y: f32,
/// }
///
/// impl Component for Position {}
/// ```
pub trait Component: Any + Send + Sync {}

/// Stable tag identifying one component type.
///
/// Equality and hashing only consider the `TypeId`. The name is kept for
/// error messages and debug output.
#[derive(Clone, Copy)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
}

impl ComponentType {
    /// Returns the tag for component type `C`.
    #[inline]
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: short_type_name(std::any::type_name::<C>()),
        }
    }

    /// Returns the tag for the type of `component`.
    #[inline]
    #[must_use]
    pub fn of_val<C: Component>(_component: &C) -> Self {
        Self::of::<C>()
    }

    /// Returns the underlying `TypeId`.
    #[inline]
    #[must_use]
    pub const fn type_id(self) -> TypeId {
        self.id
    }

    /// Returns the short type name (without module path).
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentType {}

impl Hash for ComponentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentType({})", self.name)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Strips the module path from a type name, keeping generic arguments intact.
///
/// `game::components::Position` becomes `Position`, and
/// `game::Tagged<game::Team>` becomes `Tagged<game::Team>`. Only the leading
/// path is stripped: tuples, arrays and references are returned unchanged.
fn short_type_name(full: &'static str) -> &'static str {
    let path_end = full
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == ':'))
        .unwrap_or(full.len());
    full[..path_end]
        .rfind("::")
        .map_or(full, |sep| &full[sep + 2..])
}
