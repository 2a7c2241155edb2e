//! # Entity Snapshots
//!
//! Result of collecting every component attached to one entity.

use std::collections::hash_map;
use std::collections::HashMap;
use std::sync::Arc;

use super::component::{Component, ComponentType};
use super::entity::EntityId;
use super::storage::AnyComponent;

/// Every component found on one entity at the time of the query.
///
/// The map is a fresh collection: later registry mutations do not change it.
/// Values are shared handles to the stored instances, not deep copies.
#[derive(Clone)]
pub struct EntityComponents {
    entity: EntityId,
    components: HashMap<ComponentType, AnyComponent>,
}

impl EntityComponents {
    pub(crate) fn with_capacity(entity: EntityId, capacity: usize) -> Self {
        Self {
            entity,
            components: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, component_type: ComponentType, component: AnyComponent) {
        self.components.insert(component_type, component);
    }

    /// The entity this snapshot was taken for.
    #[inline]
    #[must_use]
    pub const fn entity(&self) -> EntityId {
        self.entity
    }

    /// Number of component types found.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the entity had no components.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Whether a component of type `C` was found.
    #[inline]
    #[must_use]
    pub fn contains<C: Component>(&self) -> bool {
        self.components.contains_key(&ComponentType::of::<C>())
    }

    /// Whether a component with the given tag was found.
    #[inline]
    #[must_use]
    pub fn contains_type(&self, component_type: ComponentType) -> bool {
        self.components.contains_key(&component_type)
    }

    /// Typed handle to the component of type `C`, if found.
    #[must_use]
    pub fn get<C: Component>(&self) -> Option<Arc<C>> {
        self.components
            .get(&ComponentType::of::<C>())
            .and_then(|component| Arc::clone(component).downcast::<C>().ok())
    }

    /// Type-erased handle to the component with the given tag, if found.
    #[must_use]
    pub fn get_erased(&self, component_type: ComponentType) -> Option<&AnyComponent> {
        self.components.get(&component_type)
    }

    /// Tags of every component found, in unspecified order.
    #[must_use]
    pub fn types(&self) -> Vec<ComponentType> {
        self.components.keys().copied().collect()
    }

    /// Iterates over `(tag, handle)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentType, &AnyComponent)> {
        self.components.iter().map(|(&ty, component)| (ty, component))
    }
}

impl IntoIterator for EntityComponents {
    type Item = (ComponentType, AnyComponent);
    type IntoIter = hash_map::IntoIter<ComponentType, AnyComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl std::fmt::Debug for EntityComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityComponents")
            .field("entity", &self.entity)
            .field("types", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}
