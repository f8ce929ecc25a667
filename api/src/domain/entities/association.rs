//! Explicit association state
//!
//! An association is either a foreign key that has not been fetched yet or the
//! fetched value itself. Reading an unloaded association is an error, so the
//! number of store round trips is decided by whoever builds the aggregate and
//! never by whoever reads it.

use serde::{Serialize, Serializer};

use crate::error::NotFetched;

/// A reference to `T` that is either unloaded (only the key `K` is known) or loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association<K, T> {
    Unloaded(K),
    Loaded(T),
}

impl<K, T> Association<K, T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Association::Loaded(_))
    }

    /// Borrow the loaded value, or fail naming the association.
    pub fn get(&self, name: &'static str) -> Result<&T, NotFetched> {
        match self {
            Association::Loaded(value) => Ok(value),
            Association::Unloaded(_) => Err(NotFetched(name)),
        }
    }

    /// Replace the association with its fetched value.
    pub fn resolve(&mut self, value: T) {
        *self = Association::Loaded(value);
    }
}

impl<K: Copy, T> Association<K, T> {
    /// The key still waiting to be fetched, if any.
    pub fn pending(&self) -> Option<K> {
        match self {
            Association::Unloaded(key) => Some(*key),
            Association::Loaded(_) => None,
        }
    }
}

/// Unloaded associations serialize as `null`.
impl<K, T: Serialize> Serialize for Association<K, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Association::Loaded(value) => value.serialize(serializer),
            Association::Unloaded(_) => serializer.serialize_none(),
        }
    }
}
