//! # Entity Identifiers
//!
//! Entities are opaque integer handles allocated outside the registry.
//! The registry never validates liveness: any value is a usable key.

use std::fmt;

/// Opaque identifier for an entity.
///
/// Allocation, recycling and generation tracking belong to whoever hands out
/// these ids. The registry only uses them as map keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Wraps a raw integer handle.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer handle.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<u32> for EntityId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self(u64::from(raw))
    }
}

impl From<EntityId> for u64 {
    #[inline]
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
