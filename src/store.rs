//! The ordered property store.
//!
//! A [`PropertyStore`] owns a sequence of [`PropertyEntry`] values, and each
//! entry owns its payload. Several entries may share an ID; their relative
//! order gives the 0-based index used by the indexed accessors.

use crate::config::PropertyListConfig;
use crate::debug::{Assertions, spew};
use crate::error::{PropertyError, Result};
use crate::integration::HandleTable;
use crate::property_id::PropertyId;
use crate::property_value::{Handle, PropertyType, PropertyValue};

/// A single typed (ID, value) pair in a property list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    id: PropertyId,
    value: PropertyValue,
    dirty: bool,
}

impl PropertyEntry {
    /// Creates an entry that has not been acknowledged by a peer yet.
    pub(crate) fn new(id: PropertyId, value: PropertyValue) -> Self {
        Self {
            id,
            value,
            dirty: true,
        }
    }

    /// Creates an entry mirroring state a peer already holds.
    pub(crate) fn clean(id: PropertyId, value: PropertyValue) -> Self {
        Self {
            id,
            value,
            dirty: false,
        }
    }

    /// Returns the property ID.
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Returns the type of the stored value.
    pub fn property_type(&self) -> PropertyType {
        self.value.property_type()
    }

    /// Returns the stored value.
    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    /// Returns true if the entry changed since the last acknowledged partial
    /// serialization.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the payload, dropping the previous one, and marks the entry dirty.
    pub(crate) fn replace(&mut self, value: PropertyValue) {
        debug_assert_eq!(value.property_type(), self.property_type());
        self.value = value;
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// An ordered, typed property list.
///
/// The store is not internally synchronized. An owner that shares it between
/// threads must serialize access itself, e.g. behind its own lock.
///
/// # Example
///
/// ```rust
/// use proplist::{PropertyStore, PropertyType, property_id};
///
/// let mut store = PropertyStore::new();
/// store.set_string(property_id::GUEST_TOOLS_VERSION, "10.0.1").unwrap();
/// store.set_integer(property_id::GUEST_OS_FAMILY, 2).unwrap();
///
/// assert!(store.exists(property_id::GUEST_OS_FAMILY, PropertyType::Integer));
/// assert_eq!(store.count(property_id::GUEST_TOOLS_VERSION), 1);
/// ```
///
/// A store is not `Clone`. Handle values are released when the list is
/// cleared, and a copy would release each of them a second time.
///
/// ```compile_fail
/// let store = proplist::PropertyStore::new();
/// let copy = store.clone();
/// ```
#[derive(Debug, Default)]
pub struct PropertyStore {
    pub(crate) entries: Vec<PropertyEntry>,
    config: PropertyListConfig,
}

impl PropertyStore {
    /// Creates an empty store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given configuration.
    pub fn with_config(config: PropertyListConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    /// Returns the configuration this store was built with.
    pub fn config(&self) -> &PropertyListConfig {
        &self.config
    }

    pub(crate) fn assertions(&self) -> Assertions {
        Assertions::new(self.config.debug)
    }

    /// Re-establishes an empty store.
    ///
    /// Only valid on a store that is already empty; a populated store must be
    /// cleared first so its handle values are accounted for.
    pub fn initialize(&mut self) -> Result<()> {
        if !self.assertions().check(self.entries.is_empty(), "initialize on empty list") {
            return Err(PropertyError::InvalidArgument(format!(
                "cannot initialize a list holding {} properties",
                self.entries.len()
            )));
        }
        self.entries = Vec::new();
        Ok(())
    }

    /// Drops every entry and its owned payload without releasing handle values.
    ///
    /// The valid handles that were stored are returned, in order, so the owner
    /// can release them through its handle table once it is safe to do so.
    /// [`Handle::INVALID`] refers to nothing and is not returned.
    pub fn clear_without_handles(&mut self) -> Vec<Handle> {
        let handles: Vec<Handle> = self
            .entries
            .iter()
            .filter_map(|entry| entry.value.as_handle())
            .filter(|handle| handle.is_valid())
            .collect();

        spew!(
            self.config.debug,
            2,
            "clearing {} properties ({} handles deferred)",
            self.entries.len(),
            handles.len()
        );

        self.entries.clear();
        handles
    }

    /// Drops every entry, releasing each stored handle through `handles`.
    pub fn clear<H: HandleTable>(&mut self, handles: &mut H) {
        handles.release_all(self.clear_without_handles());
    }

    /// Locates the position of the `index`-th entry with this ID and type.
    ///
    /// Fails with [`PropertyError::TypeMismatch`] as soon as an entry with the
    /// same ID but another type is seen.
    fn position(&self, id: PropertyId, ty: PropertyType, index: usize) -> Result<Option<usize>> {
        let mut remaining = index;
        for (pos, entry) in self.entries.iter().enumerate() {
            if entry.id != id {
                continue;
            }
            let found = entry.property_type();
            if found != ty {
                return Err(PropertyError::TypeMismatch {
                    id,
                    expected: ty,
                    found,
                });
            }
            if remaining == 0 {
                return Ok(Some(pos));
            }
            remaining -= 1;
        }
        Ok(None)
    }

    /// Returns the `index`-th entry with this ID and type.
    pub fn find(&self, id: PropertyId, ty: PropertyType, index: usize) -> Result<&PropertyEntry> {
        match self.position(id, ty, index)? {
            Some(pos) => Ok(&self.entries[pos]),
            None => Err(PropertyError::PropertyNotFound { id, index }),
        }
    }

    /// Returns the `index`-th entry with this ID and type for modification.
    ///
    /// If no such entry exists and `create_if_missing` is set, a zero-valued
    /// entry of that type is appended at the tail and returned. A type
    /// mismatch is reported either way.
    pub fn find_mut(
        &mut self,
        id: PropertyId,
        ty: PropertyType,
        index: usize,
        create_if_missing: bool,
    ) -> Result<&mut PropertyEntry> {
        match self.position(id, ty, index)? {
            Some(pos) => Ok(&mut self.entries[pos]),
            None if create_if_missing => self.push(PropertyEntry::new(id, ty.zero_value())),
            None => Err(PropertyError::PropertyNotFound { id, index }),
        }
    }

    /// Returns true if an entry with this ID exists under this type.
    pub fn exists(&self, id: PropertyId, ty: PropertyType) -> bool {
        matches!(self.position(id, ty, 0), Ok(Some(_)))
    }

    /// Returns the number of entries with this ID, across all types.
    pub fn count(&self, id: PropertyId) -> usize {
        self.entries.iter().filter(|entry| entry.id == id).count()
    }

    /// Returns the total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries not yet acknowledged.
    pub fn dirty_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.dirty).count()
    }

    /// Compares the ordered (ID, type, value) sequences of two stores,
    /// ignoring dirty flags and configuration.
    pub fn entries_equal(&self, other: &PropertyStore) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.id == b.id && a.value == b.value)
    }

    pub(crate) fn push(&mut self, entry: PropertyEntry) -> Result<&mut PropertyEntry> {
        self.entries
            .try_reserve(1)
            .map_err(|_| PropertyError::OutOfMemory(std::mem::size_of::<PropertyEntry>()))?;
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        Ok(&mut self.entries[last])
    }
}

impl<'a> IntoIterator for &'a PropertyStore {
    type Item = &'a PropertyEntry;
    type IntoIter = std::slice::Iter<'a, PropertyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
