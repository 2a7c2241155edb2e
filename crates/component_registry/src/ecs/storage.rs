//! # Component Storage
//!
//! One store per component type, mapping entity ids to shared instances.
//!
//! The registry keeps stores of many different types in a single map, so each
//! store is also reachable through the object-safe [`ErasedStore`] trait.
//! Typed access downcasts once at the boundary back to [`ComponentStore<C>`].

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use super::component::Component;
use super::entity::EntityId;

/// Type-erased handle to a single component instance.
pub type AnyComponent = Arc<dyn Any + Send + Sync>;

/// Storage for a single component type.
///
/// Instances are held behind `Arc` so that lookups hand out cheap shared
/// handles. Removing or overwriting an entry only unlinks it: handles already
/// given out stay valid.
///
/// # Type Parameters
///
/// * `C` - The component type to store
///
/// # Example
///
/// ```rust,ignore
/// let mut store: ComponentStore<Position> = ComponentStore::with_capacity(64);
/// store.insert(EntityId::new(0), Position { x: 1.0, y: 2.0 });
/// ```
pub struct ComponentStore<C: Component> {
    /// Entity -> instance map.
    data: HashMap<EntityId, Arc<C>>,
}

impl<C: Component> ComponentStore<C> {
    /// Creates an empty store with room for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entities in this store.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the store holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets the instance stored for `entity`.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&Arc<C>> {
        self.data.get(&entity)
    }

    /// Checks whether `entity` has an entry.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.data.contains_key(&entity)
    }

    /// Inserts or overwrites the instance for `entity`.
    ///
    /// # Returns
    ///
    /// The previous instance, if one was replaced.
    #[inline]
    pub fn insert(&mut self, entity: EntityId, component: Arc<C>) -> Option<Arc<C>> {
        self.data.insert(entity, component)
    }

    /// Removes the instance for `entity`, if any.
    #[inline]
    pub fn remove(&mut self, entity: EntityId) -> Option<Arc<C>> {
        self.data.remove(&entity)
    }

    /// Iterates over all entries.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Arc<C>)> {
        self.data.iter().map(|(&entity, component)| (entity, component))
    }

    /// Returns a fresh vector of handles to every stored instance.
    #[must_use]
    pub fn values(&self) -> Vec<Arc<C>> {
        self.data.values().cloned().collect()
    }

    /// Returns a fresh vector of every entity in the store.
    #[must_use]
    pub fn entities(&self) -> Vec<EntityId> {
        self.data.keys().copied().collect()
    }
}

impl<C: Component> Default for ComponentStore<C> {
    fn default() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

/// Object-safe view of a [`ComponentStore`] of unknown type.
///
/// Covers everything the registry needs to do across all stores at once
/// (entity scans and removals) without knowing the concrete component type.
pub trait ErasedStore: Send + Sync {
    /// Number of entries in the store.
    fn len(&self) -> usize;

    /// Whether `entity` has an entry.
    fn contains(&self, entity: EntityId) -> bool;

    /// Type-erased handle to the instance for `entity`.
    fn get_erased(&self, entity: EntityId) -> Option<AnyComponent>;

    /// Removes the entry for `entity`. Returns `true` if one existed.
    fn remove_entity(&mut self, entity: EntityId) -> bool;

    /// Upcast for typed downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> ErasedStore for ComponentStore<C> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.data.contains_key(&entity)
    }

    fn get_erased(&self, entity: EntityId) -> Option<AnyComponent> {
        self.data
            .get(&entity)
            .map(|component| Arc::clone(component) as AnyComponent)
    }

    fn remove_entity(&mut self, entity: EntityId) -> bool {
        self.data.remove(&entity).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
