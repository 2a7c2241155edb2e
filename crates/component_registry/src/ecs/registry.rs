//! # Component Registry
//!
//! The single authoritative store of entity <-> component associations.
//!
//! ## Layout
//!
//! ```text
//! Registry
//!   └── RwLock
//!         └── ComponentType ──► ComponentStore<C>
//!                                  └── EntityId ──► Arc<C>
//! ```
//!
//! "All components of type X" is one map lookup plus a walk over that store.
//! "All components on entity E" scans every store, which stays cheap because
//! the number of component types is small and fixed.
//!
//! ## Locking
//!
//! One `RwLock` guards the whole store-of-stores. Every mutation holds the
//! write lock for its full duration, so at most one mutation runs at a time
//! across all types. Queries share the read lock and always see every store in
//! a consistent state, including cross-type scans.
//!
//! ## Failure model
//!
//! [`Registry::get_component`] is strict and returns
//! [`RegistryError::NotFound`] on a miss. Every other query reports absence
//! as `false`, `None` or an empty collection, and removals of absent entries
//! are no-ops.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use super::component::{Component, ComponentType};
use super::entity::EntityId;
use super::snapshot::EntityComponents;
use super::storage::{ComponentStore, ErasedStore};
use crate::config::{RegistryConfig, MAX_STORE_CAPACITY, MAX_TYPE_CAPACITY};
use crate::error::{RegistryError, RegistryResult};

type StoreMap = HashMap<ComponentType, Box<dyn ErasedStore>>;

/// Thread-safe two-level component store.
///
/// Share it by reference or wrap it in an `Arc`. All methods take `&self`.
///
/// # Example
///
/// ```rust
/// use component_registry::{Component, EntityId, Registry};
///
/// #[derive(Debug, PartialEq)]
/// struct Position { x: f32, y: f32 }
/// impl Component for Position {}
///
/// let registry = Registry::new();
/// let player = EntityId::new(1);
///
/// registry.add_component(player, Position { x: 0.0, y: 0.0 });
/// assert!(registry.has_component::<Position>(player));
/// assert_eq!(*registry.get_component::<Position>(player).unwrap(), Position { x: 0.0, y: 0.0 });
/// ```
pub struct Registry {
    /// Component type -> store. Stores are never removed once created.
    stores: RwLock<StoreMap>,
    /// Reservation for each newly created store.
    store_capacity: usize,
}

impl Registry {
    /// Creates an empty registry with default capacity hints.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    /// Creates an empty registry using the given capacity hints.
    ///
    /// Hints above [`MAX_TYPE_CAPACITY`] / [`MAX_STORE_CAPACITY`] are clamped,
    /// so a config built by hand without `validate` cannot overflow the maps.
    #[must_use]
    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            stores: RwLock::new(HashMap::with_capacity(
                config.type_capacity.min(MAX_TYPE_CAPACITY),
            )),
            store_capacity: config.store_capacity.min(MAX_STORE_CAPACITY),
        }
    }

    /// Returns the process-wide registry.
    ///
    /// Created with default settings on first access and never torn down.
    /// Prefer an explicitly constructed [`Registry`] passed to the systems
    /// that need it; this exists for code that cannot be handed one.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            tracing::debug!("initializing global component registry");
            Self::new()
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the component of type `C` attached to `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no store exists for `C` or the
    /// store has no entry for `entity`.
    pub fn get_component<C: Component>(&self, entity: EntityId) -> RegistryResult<Arc<C>> {
        self.find_component::<C>(entity)
            .ok_or_else(|| RegistryError::NotFound {
                entity,
                component: ComponentType::of::<C>().name(),
            })
    }

    /// Returns the component of type `C` attached to `entity`, or `None`.
    #[must_use]
    pub fn find_component<C: Component>(&self, entity: EntityId) -> Option<Arc<C>> {
        let stores = self.stores.read();
        typed::<C>(&stores)?.get(entity).cloned()
    }

    /// Returns every instance of type `C`, in unspecified order.
    ///
    /// The vector is freshly allocated and holds shared handles, so later
    /// mutations of the registry never change what was returned. Empty if no
    /// component of type `C` was ever added.
    #[must_use]
    pub fn get_all_of_type<C: Component>(&self) -> Vec<Arc<C>> {
        let stores = self.stores.read();
        typed::<C>(&stores).map_or_else(Vec::new, ComponentStore::values)
    }

    /// Returns every entity that has a component of type `C`.
    #[must_use]
    pub fn get_all_entities_with<C: Component>(&self) -> Vec<EntityId> {
        let stores = self.stores.read();
        typed::<C>(&stores).map_or_else(Vec::new, ComponentStore::entities)
    }

    /// Collects every component attached to `entity` across all stores.
    ///
    /// Never fails: an entity without components yields an empty result.
    #[must_use]
    pub fn get_all_components_on(&self, entity: EntityId) -> EntityComponents {
        let stores = self.stores.read();
        let mut found = EntityComponents::with_capacity(entity, stores.len());
        for (&component_type, store) in stores.iter() {
            if let Some(component) = store.get_erased(entity) {
                found.insert(component_type, component);
            }
        }
        found
    }

    /// Checks whether `entity` has a component of type `C`.
    #[must_use]
    pub fn has_component<C: Component>(&self, entity: EntityId) -> bool {
        self.has_component_type(entity, ComponentType::of::<C>())
    }

    /// Checks whether `entity` has a component with the given tag.
    #[must_use]
    pub fn has_component_type(&self, entity: EntityId, component_type: ComponentType) -> bool {
        self.stores
            .read()
            .get(&component_type)
            .is_some_and(|store| store.contains(entity))
    }

    /// Number of component instances of type `C`.
    #[must_use]
    pub fn count_of_type<C: Component>(&self) -> usize {
        let stores = self.stores.read();
        typed::<C>(&stores).map_or(0, ComponentStore::len)
    }

    /// Tags of every type that owns a store, including emptied stores.
    #[must_use]
    pub fn registered_types(&self) -> Vec<ComponentType> {
        self.stores.read().keys().copied().collect()
    }

    /// Number of component types that own a store.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.stores.read().len()
    }

    // =========================================================================
    // Mutations - all under the write lock
    // =========================================================================

    /// Attaches `component` to `entity`.
    ///
    /// Creates the store for `C` on first use. An existing component of the
    /// same type on the same entity is silently replaced.
    pub fn add_component<C: Component>(&self, entity: EntityId, component: C) {
        self.add_shared(entity, Arc::new(component));
    }

    /// Attaches an already shared `component` to `entity`.
    ///
    /// Same semantics as [`add_component`](Self::add_component).
    pub fn add_shared<C: Component>(&self, entity: EntityId, component: Arc<C>) {
        let component_type = ComponentType::of::<C>();
        let mut stores = self.stores.write();

        let store = stores.entry(component_type).or_insert_with(|| {
            tracing::debug!(component = component_type.name(), "creating component store");
            let created: Box<dyn ErasedStore> =
                Box::new(ComponentStore::<C>::with_capacity(self.store_capacity));
            created
        });

        let Some(store) = store.as_any_mut().downcast_mut::<ComponentStore<C>>() else {
            tracing::error!(
                entity = entity.raw(),
                component = component_type.name(),
                "component store type mismatch, write dropped"
            );
            debug_assert!(false, "component store type mismatch for {component_type}");
            return;
        };

        if store.insert(entity, component).is_some() {
            tracing::trace!(
                entity = entity.raw(),
                component = component_type.name(),
                "replaced component"
            );
        }
    }

    /// Detaches the component of type `C` from `entity`, if present.
    pub fn remove_component<C: Component>(&self, entity: EntityId) {
        self.remove_component_by_type(entity, ComponentType::of::<C>());
    }

    /// Detaches the component of the same type as `component` from `entity`.
    ///
    /// Only the type of `component` matters. Whatever instance is stored for
    /// `entity` is removed, even if it is a different value.
    pub fn remove_component_like<C: Component>(&self, entity: EntityId, component: &C) {
        self.remove_component_by_type(entity, ComponentType::of_val(component));
    }

    /// Detaches the component with the given tag from `entity`, if present.
    pub fn remove_component_by_type(&self, entity: EntityId, component_type: ComponentType) {
        if let Some(store) = self.stores.write().get_mut(&component_type) {
            store.remove_entity(entity);
        }
    }

    /// Detaches every component from `entity`.
    ///
    /// Stores that become empty are kept.
    pub fn remove_all_on(&self, entity: EntityId) {
        let mut stores = self.stores.write();
        let mut removed = 0_usize;
        for store in stores.values_mut() {
            if store.remove_entity(entity) {
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::debug!(entity = entity.raw(), removed, "removed all components on entity");
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Downcasts the store for `C`, if one exists.
fn typed<C: Component>(stores: &StoreMap) -> Option<&ComponentStore<C>> {
    stores
        .get(&ComponentType::of::<C>())?
        .as_any()
        .downcast_ref::<ComponentStore<C>>()
}

/// Store sizes sorted by type name.
fn store_sizes(stores: &StoreMap) -> Vec<(&'static str, usize)> {
    let mut sizes: Vec<_> = stores
        .iter()
        .map(|(component_type, store)| (component_type.name(), store.len()))
        .collect();
    sizes.sort_unstable();
    sizes
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stores = self.stores.read();
        f.debug_struct("Registry")
            .field("stores", &store_sizes(&stores))
            .field("store_capacity", &self.store_capacity)
            .finish()
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stores = self.stores.read();
        f.write_str("Registry {")?;
        for (i, (name, len)) in store_sizes(&stores).into_iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{name}: {len}")?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }
    impl Component for Position {}

    #[derive(Debug, Clone, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }
    impl Component for Velocity {}

    #[derive(Debug, PartialEq)]
    struct Marker;
    impl Component for Marker {}

    fn e(raw: u64) -> EntityId {
        EntityId::new(raw)
    }

    #[test]
    fn test_add_then_get() {
        let registry = Registry::new();
        registry.add_component(e(1), Position { x: 1.0, y: 2.0 });

        let pos = registry.get_component::<Position>(e(1)).unwrap();
        assert_eq!(*pos, Position { x: 1.0, y: 2.0 });
        assert!(registry.has_component::<Position>(e(1)));
    }

    #[test]
    fn test_get_missing_store_is_not_found() {
        let registry = Registry::new();
        let err = registry.get_component::<Velocity>(e(3)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotFound {
                entity: e(3),
                component: "Velocity",
            }
        );
    }

    #[test]
    fn test_get_missing_entity_is_not_found() {
        let registry = Registry::new();
        registry.add_component(e(1), Marker);
        assert!(matches!(
            registry.get_component::<Marker>(e(2)),
            Err(RegistryError::NotFound { .. })
        ));
        assert!(registry.find_component::<Marker>(e(2)).is_none());
        assert_eq!(registry.find_component::<Marker>(e(1)).as_deref(), Some(&Marker));
    }

    #[test]
    fn test_not_found_message() {
        let err = RegistryError::NotFound {
            entity: e(42),
            component: "Position",
        };
        assert_eq!(
            err.to_string(),
            "entity 42 does not possess the component: Position"
        );
    }

    #[test]
    fn test_overwrite_last_write_wins() {
        let registry = Registry::new();
        registry.add_component(e(1), Position { x: 0.0, y: 0.0 });
        registry.add_component(e(1), Position { x: 9.0, y: 9.0 });

        assert_eq!(
            *registry.get_component::<Position>(e(1)).unwrap(),
            Position { x: 9.0, y: 9.0 }
        );
        assert_eq!(registry.count_of_type::<Position>(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = Registry::new();
        registry.add_component(e(1), Position { x: 0.0, y: 0.0 });

        registry.remove_component::<Position>(e(1));
        registry.remove_component::<Position>(e(1));
        registry.remove_component::<Velocity>(e(1));

        assert!(!registry.has_component::<Position>(e(1)));
        assert!(registry.get_component::<Position>(e(1)).is_err());
    }

    #[test]
    fn test_remove_like_uses_type_only() {
        let registry = Registry::new();
        registry.add_component(e(5), Velocity { dx: 1.0, dy: 1.0 });
        registry.add_component(e(5), Marker);
        registry.remove_component_like(e(5), &Velocity { dx: -3.0, dy: 0.5 });

        assert!(!registry.has_component::<Velocity>(e(5)));
        assert!(registry.has_component::<Marker>(e(5)));
    }

    #[test]
    fn test_remove_by_type_tag() {
        let registry = Registry::new();
        registry.add_component(e(5), Marker);
        registry.remove_component_by_type(e(5), ComponentType::of::<Marker>());
        assert!(!registry.has_component_type(e(5), ComponentType::of::<Marker>()));
    }

    #[test]
    fn test_bulk_queries_on_unregistered_type_are_empty() {
        let registry = Registry::new();
        assert!(registry.get_all_of_type::<Position>().is_empty());
        assert!(registry.get_all_entities_with::<Position>().is_empty());
        assert!(registry.get_all_components_on(e(1)).is_empty());
        assert_eq!(registry.count_of_type::<Position>(), 0);
        assert!(!registry.has_component::<Position>(e(1)));
    }

    #[test]
    fn test_emptied_store_persists() {
        let registry = Registry::new();
        registry.add_component(e(1), Marker);
        registry.remove_all_on(e(1));

        assert_eq!(registry.type_count(), 1);
        assert_eq!(registry.registered_types(), vec![ComponentType::of::<Marker>()]);
        assert_eq!(registry.count_of_type::<Marker>(), 0);
    }

    #[test]
    fn test_components_on_entity() {
        let registry = Registry::new();
        registry.add_component(e(1), Position { x: 0.0, y: 0.0 });
        registry.add_component(e(1), Velocity { dx: 1.0, dy: 1.0 });
        registry.add_component(e(2), Marker);

        let on_one = registry.get_all_components_on(e(1));
        assert_eq!(on_one.len(), 2);
        assert!(on_one.contains::<Position>());
        assert!(on_one.contains::<Velocity>());
        assert!(!on_one.contains::<Marker>());
        assert_eq!(
            on_one.get::<Velocity>().as_deref(),
            Some(&Velocity { dx: 1.0, dy: 1.0 })
        );

        registry.remove_all_on(e(1));
        assert!(registry.get_all_components_on(e(1)).is_empty());
        assert!(registry.has_component::<Marker>(e(2)));
    }

    #[test]
    fn test_results_do_not_alias_live_store() {
        let registry = Registry::new();
        registry.add_component(e(1), Position { x: 1.0, y: 1.0 });

        let before = registry.get_all_of_type::<Position>();
        let on_entity = registry.get_all_components_on(e(1));

        registry.add_component(e(1), Position { x: 2.0, y: 2.0 });
        registry.add_component(e(2), Position { x: 3.0, y: 3.0 });
        registry.remove_all_on(e(1));

        assert_eq!(before.len(), 1);
        assert_eq!(*before[0], Position { x: 1.0, y: 1.0 });
        assert_eq!(
            on_entity.get::<Position>().as_deref(),
            Some(&Position { x: 1.0, y: 1.0 })
        );
    }

    #[test]
    fn test_with_config_capacity() {
        let config = RegistryConfig {
            type_capacity: 2,
            store_capacity: 4,
        };
        let registry = Registry::with_config(&config);
        for i in 0..16 {
            registry.add_component(e(i), Marker);
        }
        assert_eq!(registry.count_of_type::<Marker>(), 16);
    }

    #[test]
    fn test_with_config_clamps_oversized_hints() {
        let config = RegistryConfig {
            type_capacity: usize::MAX,
            store_capacity: usize::MAX,
        };
        assert!(config.validate().is_err());

        let registry = Registry::with_config(&config);
        assert_eq!(registry.store_capacity, MAX_STORE_CAPACITY);
        assert!(registry.stores.read().capacity() >= MAX_TYPE_CAPACITY);
        assert_eq!(registry.type_count(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "component store type mismatch")]
    fn test_mismatched_store_is_reported() {
        let registry = Registry::new();
        let wrong: Box<dyn ErasedStore> = Box::new(ComponentStore::<Velocity>::default());
        let previous = registry
            .stores
            .write()
            .insert(ComponentType::of::<Position>(), wrong);
        assert!(previous.is_none());

        registry.add_component(e(1), Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_display_and_debug() {
        let registry = Registry::new();
        assert_eq!(registry.to_string(), "Registry { }");

        registry.add_component(e(1), Velocity { dx: 0.0, dy: 0.0 });
        registry.add_component(e(1), Position { x: 0.0, y: 0.0 });
        registry.add_component(e(2), Position { x: 0.0, y: 0.0 });

        assert_eq!(registry.to_string(), "Registry { Position: 2, Velocity: 1 }");
        assert!(format!("{registry:?}").contains("store_capacity"));
    }

    #[test]
    fn test_global_is_shared() {
        struct GlobalOnly(u8);
        impl Component for GlobalOnly {}

        let first = Registry::global();
        let second = Registry::global();
        assert!(std::ptr::eq(first, second));

        first.add_component(e(77), GlobalOnly(7));
        assert_eq!(second.get_component::<GlobalOnly>(e(77)).unwrap().0, 7);
        second.remove_component::<GlobalOnly>(e(77));
        assert!(!first.has_component::<GlobalOnly>(e(77)));
    }
}
