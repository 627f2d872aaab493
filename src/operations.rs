//! Bulk operations over ordered (ID, value) sequences.
//!
//! These helpers are expressed purely in terms of the typed accessors:
//! - [`append_properties`]: apply `set` to each pair, stopping at the first failure
//! - [`get_optional_properties`]: read what is present, keep defaults for the rest
//! - [`get_indexed_properties`]: read (ID, index) pairs, optionally skipping gaps
//!
//! Reads go through [`Slot`], a typed mutable reference to the caller's
//! destination, so a request cannot name one type and receive another.

use crate::error::{PropertyError, Result, try_copy, try_copy_str};
use crate::property_id::PropertyId;
use crate::property_value::{Handle, LocalPointer, PropertyType, PropertyValue};
use crate::store::PropertyStore;

/// A typed destination for a bulk read.
#[derive(Debug)]
pub enum Slot<'a> {
    Bool(&'a mut bool),
    Integer(&'a mut i32),
    Int64(&'a mut i64),
    String(&'a mut String),
    Handle(&'a mut Handle),
    Blob(&'a mut Vec<u8>),
    Pointer(&'a mut LocalPointer),
}

impl Slot<'_> {
    /// Returns the property type this slot accepts.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Slot::Bool(_) => PropertyType::Bool,
            Slot::Integer(_) => PropertyType::Integer,
            Slot::Int64(_) => PropertyType::Int64,
            Slot::String(_) => PropertyType::String,
            Slot::Handle(_) => PropertyType::Handle,
            Slot::Blob(_) => PropertyType::Blob,
            Slot::Pointer(_) => PropertyType::Pointer,
        }
    }

    /// Copies `value` into the destination.
    fn fill(&mut self, id: PropertyId, value: &PropertyValue) -> Result<()> {
        match (self, value) {
            (Slot::Bool(out), PropertyValue::Bool(v)) => **out = *v,
            (Slot::Integer(out), PropertyValue::Integer(v)) => **out = *v,
            (Slot::Int64(out), PropertyValue::Int64(v)) => **out = *v,
            (Slot::String(out), PropertyValue::String(v)) => **out = try_copy_str(v)?,
            (Slot::Handle(out), PropertyValue::Handle(v)) => **out = *v,
            (Slot::Blob(out), PropertyValue::Blob(v)) => **out = try_copy(v)?,
            (Slot::Pointer(out), PropertyValue::Pointer(v)) => **out = *v,
            (slot, value) => {
                return Err(PropertyError::TypeMismatch {
                    id,
                    expected: slot.property_type(),
                    found: value.property_type(),
                });
            }
        }
        Ok(())
    }
}

/// Applies [`PropertyStore::set`] to each pair in order.
///
/// Stops at the first failure and returns it. Pairs applied before the failure
/// stay applied.
pub fn append_properties<I, V>(store: &mut PropertyStore, properties: I) -> Result<()>
where
    I: IntoIterator<Item = (PropertyId, V)>,
    V: Into<PropertyValue>,
{
    for (id, value) in properties {
        store.set(id, value)?;
    }
    Ok(())
}

/// Reads the first entry for each listed ID into its slot.
///
/// Absent properties leave the slot's current value untouched. A property
/// stored under a different type than its slot is still an error.
pub fn get_optional_properties(
    store: &PropertyStore,
    requests: &mut [(PropertyId, Slot<'_>)],
) -> Result<()> {
    for (id, slot) in requests.iter_mut() {
        match store.find(*id, slot.property_type(), 0) {
            Ok(entry) => slot.fill(*id, entry.value())?,
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Reads the `index`-th entry for each listed ID into its slot.
///
/// A missing (ID, index) aborts the remaining reads with
/// [`PropertyError::PropertyNotFound`] unless `ignore_missing` is set, in
/// which case that slot is skipped.
pub fn get_indexed_properties(
    store: &PropertyStore,
    ignore_missing: bool,
    requests: &mut [(PropertyId, usize, Slot<'_>)],
) -> Result<()> {
    for (id, index, slot) in requests.iter_mut() {
        match store.find(*id, slot.property_type(), *index) {
            Ok(entry) => slot.fill(*id, entry.value())?,
            Err(err) if ignore_missing && err.is_not_found() => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Ordered list of (ID, value) pairs to be applied to a store in one call.
///
/// # Example
///
/// ```rust
/// use proplist::{PropertyBatch, PropertyStore, property_id};
///
/// let mut store = PropertyStore::new();
/// PropertyBatch::new()
///     .string(property_id::GUEST_TOOLS_VERSION, "10.0.1")
///     .integer(property_id::GUEST_OS_FAMILY, 2)
///     .apply(&mut store)
///     .unwrap();
///
/// assert_eq!(store.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBatch {
    properties: Vec<(PropertyId, PropertyValue)>,
}

impl PropertyBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds any value.
    #[must_use]
    pub fn value(mut self, id: PropertyId, value: impl Into<PropertyValue>) -> Self {
        self.properties.push((id, value.into()));
        self
    }

    /// Adds a Bool value.
    #[must_use]
    pub fn bool(self, id: PropertyId, value: bool) -> Self {
        self.value(id, value)
    }

    /// Adds an Integer value.
    #[must_use]
    pub fn integer(self, id: PropertyId, value: i32) -> Self {
        self.value(id, value)
    }

    /// Adds an Int64 value.
    #[must_use]
    pub fn int64(self, id: PropertyId, value: i64) -> Self {
        self.value(id, value)
    }

    /// Adds a String value.
    #[must_use]
    pub fn string(self, id: PropertyId, value: &str) -> Self {
        self.value(id, value)
    }

    /// Adds a Handle value.
    #[must_use]
    pub fn handle(self, id: PropertyId, value: Handle) -> Self {
        self.value(id, value)
    }

    /// Adds a Blob value.
    #[must_use]
    pub fn blob(self, id: PropertyId, value: &[u8]) -> Self {
        self.value(id, value)
    }

    /// Returns the number of pairs in the batch.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the batch holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Applies the batch with [`append_properties`].
    pub fn apply(self, store: &mut PropertyStore) -> Result<()> {
        append_properties(store, self.properties)
    }
}

impl IntoIterator for PropertyBatch {
    type Item = (PropertyId, PropertyValue);
    type IntoIter = std::vec::IntoIter<(PropertyId, PropertyValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_properties_in_order() {
        let mut store = PropertyStore::new();
        append_properties(
            &mut store,
            [
                (1, PropertyValue::from("one")),
                (2, PropertyValue::Integer(2)),
                (3, PropertyValue::Bool(true)),
            ],
        )
        .unwrap();
        let ids: Vec<_> = store.iter().map(|entry| entry.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_append_properties_partial_application() {
        let mut store = PropertyStore::new();
        let batch = PropertyBatch::new()
            .integer(1, 1)
            .string(1, "conflict")
            .integer(2, 2);
        let err = batch.apply(&mut store).unwrap_err();
        assert!(matches!(err, PropertyError::TypeMismatch { id: 1, .. }));
        // The first pair stays, the third was never applied.
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_integer(1, 0).unwrap(), 1);
    }

    #[test]
    fn test_get_optional_keeps_defaults() {
        let mut store = PropertyStore::new();
        store.set_string(1, "present").unwrap();

        let mut name = String::from("default");
        let mut count = 42;
        get_optional_properties(
            &store,
            &mut [(1, Slot::String(&mut name)), (2, Slot::Integer(&mut count))],
        )
        .unwrap();

        assert_eq!(name, "present");
        assert_eq!(count, 42);
    }

    #[test]
    fn test_slot_fill_replaces_with_owned_copy() {
        let mut store = PropertyStore::new();
        store.set_string(1, "short").unwrap();
        store.set_blob(2, &[7, 8]).unwrap();

        let mut name = String::from("a much longer previous value");
        let mut blob = vec![0u8; 16];
        get_optional_properties(
            &store,
            &mut [(1, Slot::String(&mut name)), (2, Slot::Blob(&mut blob))],
        )
        .unwrap();
        assert_eq!(name, "short");
        assert_eq!(blob, vec![7, 8]);

        store.set_string(1, "changed").unwrap();
        assert_eq!(name, "short");
    }

    #[test]
    fn test_get_optional_reports_type_mismatch() {
        let mut store = PropertyStore::new();
        store.set_string(1, "text").unwrap();
        let mut count = 0;
        let err = get_optional_properties(&store, &mut [(1, Slot::Integer(&mut count))])
            .unwrap_err();
        assert!(matches!(err, PropertyError::TypeMismatch { .. }));
    }

    #[test]
    fn test_get_indexed_strict_aborts() {
        let mut store = PropertyStore::new();
        store.append(10, "a").unwrap();
        store.append(10, "b").unwrap();
        store.set_bool(11, true).unwrap();

        let mut first = String::new();
        let mut third = String::from("unset");
        let mut flag = false;
        let err = get_indexed_properties(
            &store,
            false,
            &mut [
                (10, 0, Slot::String(&mut first)),
                (10, 2, Slot::String(&mut third)),
                (11, 0, Slot::Bool(&mut flag)),
            ],
        )
        .unwrap_err();

        assert_eq!(err, PropertyError::PropertyNotFound { id: 10, index: 2 });
        assert_eq!(first, "a");
        assert_eq!(third, "unset");
        assert!(!flag);
    }

    #[test]
    fn test_get_indexed_ignore_missing_continues() {
        let mut store = PropertyStore::new();
        store.append(10, "a").unwrap();
        store.append(10, "b").unwrap();
        store.set_bool(11, true).unwrap();

        let mut second = String::new();
        let mut third = String::from("unset");
        let mut flag = false;
        get_indexed_properties(
            &store,
            true,
            &mut [
                (10, 1, Slot::String(&mut second)),
                (10, 2, Slot::String(&mut third)),
                (11, 0, Slot::Bool(&mut flag)),
            ],
        )
        .unwrap();

        assert_eq!(second, "b");
        assert_eq!(third, "unset");
        assert!(flag);
    }

    #[test]
    fn test_batch_builder() {
        let batch = PropertyBatch::new()
            .bool(1, true)
            .int64(2, 5)
            .handle(3, Handle(8))
            .blob(4, &[1, 2]);
        assert_eq!(batch.len(), 4);
        assert!(!batch.is_empty());
        let types: Vec<_> = batch
            .into_iter()
            .map(|(_, value)| value.property_type())
            .collect();
        assert_eq!(
            types,
            vec![
                PropertyType::Bool,
                PropertyType::Int64,
                PropertyType::Handle,
                PropertyType::Blob,
            ]
        );
    }
}
