//! Type-checked get, set, append and remove operations.
//!
//! Getters return owned copies of string and blob payloads, so a later
//! mutation of the store never invalidates a value already handed out.
//! Setters always copy caller bytes into memory owned by the entry.

use crate::error::{PropertyError, Result, try_copy, try_copy_str};
use crate::property_id::PropertyId;
use crate::property_value::{Handle, LocalPointer, PropertyType, PropertyValue};
use crate::store::{PropertyEntry, PropertyStore};

/// Largest string or blob that fits a wire length prefix.
const MAX_OWNED_LEN: usize = u32::MAX as usize;

fn check_owned_len(id: PropertyId, value: &PropertyValue) -> Result<()> {
    let len = value.owned_len();
    if len > MAX_OWNED_LEN {
        return Err(PropertyError::InvalidArgument(format!(
            "property {id}: {} of {len} bytes exceeds the {MAX_OWNED_LEN} byte limit",
            value.type_name()
        )));
    }
    Ok(())
}

impl PropertyStore {
    /// Returns a copy of the `index`-th value with this ID and type.
    pub fn get(&self, id: PropertyId, ty: PropertyType, index: usize) -> Result<PropertyValue> {
        Ok(self.find(id, ty, index)?.value().clone())
    }

    /// Writes `value` to the first entry with this ID, creating it if missing.
    ///
    /// The previous payload is dropped and the entry is marked dirty.
    pub fn set(&mut self, id: PropertyId, value: impl Into<PropertyValue>) -> Result<()> {
        let value = value.into();
        check_owned_len(id, &value)?;
        self.find_mut(id, value.property_type(), 0, true)?
            .replace(value);
        Ok(())
    }

    /// Appends a new entry at the tail, even if the ID is already present.
    ///
    /// Repeated appends build an indexed property. The ID must not already be
    /// present under another type.
    pub fn append(&mut self, id: PropertyId, value: impl Into<PropertyValue>) -> Result<()> {
        let value = value.into();
        check_owned_len(id, &value)?;
        let ty = value.property_type();
        if let Some(found) = self
            .iter()
            .find(|entry| entry.id() == id)
            .map(PropertyEntry::property_type)
            .filter(|found| *found != ty)
        {
            return Err(PropertyError::TypeMismatch {
                id,
                expected: ty,
                found,
            });
        }
        self.push(PropertyEntry::new(id, value))?;
        Ok(())
    }

    /// Removes every entry with this ID and returns how many were removed.
    ///
    /// Removing an absent ID is not an error.
    pub fn remove(&mut self, id: PropertyId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        before - self.entries.len()
    }

    /// Reads a Bool property.
    pub fn get_bool(&self, id: PropertyId, index: usize) -> Result<bool> {
        let value = self.find(id, PropertyType::Bool, index)?.value();
        value.as_bool().ok_or_else(|| unexpected(id, value))
    }

    /// Writes a Bool property.
    pub fn set_bool(&mut self, id: PropertyId, value: bool) -> Result<()> {
        self.set(id, PropertyValue::Bool(value))
    }

    /// Reads an Integer property.
    pub fn get_integer(&self, id: PropertyId, index: usize) -> Result<i32> {
        let value = self.find(id, PropertyType::Integer, index)?.value();
        value.as_integer().ok_or_else(|| unexpected(id, value))
    }

    /// Writes an Integer property.
    pub fn set_integer(&mut self, id: PropertyId, value: i32) -> Result<()> {
        self.set(id, PropertyValue::Integer(value))
    }

    /// Reads an Int64 property.
    pub fn get_int64(&self, id: PropertyId, index: usize) -> Result<i64> {
        let value = self.find(id, PropertyType::Int64, index)?.value();
        value.as_int64().ok_or_else(|| unexpected(id, value))
    }

    /// Writes an Int64 property.
    pub fn set_int64(&mut self, id: PropertyId, value: i64) -> Result<()> {
        self.set(id, PropertyValue::Int64(value))
    }

    /// Reads a copy of a String property.
    pub fn get_string(&self, id: PropertyId, index: usize) -> Result<String> {
        let value = self.find(id, PropertyType::String, index)?.value();
        try_copy_str(value.as_str().ok_or_else(|| unexpected(id, value))?)
    }

    /// Writes a String property from a copy of `value`.
    pub fn set_string(&mut self, id: PropertyId, value: &str) -> Result<()> {
        self.set(id, PropertyValue::String(try_copy_str(value)?))
    }

    /// Reads a Handle property.
    pub fn get_handle(&self, id: PropertyId, index: usize) -> Result<Handle> {
        let value = self.find(id, PropertyType::Handle, index)?.value();
        value.as_handle().ok_or_else(|| unexpected(id, value))
    }

    /// Writes a Handle property. The referenced object is not retained.
    pub fn set_handle(&mut self, id: PropertyId, value: Handle) -> Result<()> {
        self.set(id, PropertyValue::Handle(value))
    }

    /// Reads a copy of a Blob property.
    pub fn get_blob(&self, id: PropertyId, index: usize) -> Result<Vec<u8>> {
        let value = self.find(id, PropertyType::Blob, index)?.value();
        try_copy(value.as_blob().ok_or_else(|| unexpected(id, value))?)
    }

    /// Writes a Blob property from a copy of `value`.
    pub fn set_blob(&mut self, id: PropertyId, value: &[u8]) -> Result<()> {
        if value.len() > MAX_OWNED_LEN {
            return Err(PropertyError::InvalidArgument(format!(
                "property {id}: blob of {} bytes exceeds the {MAX_OWNED_LEN} byte limit",
                value.len()
            )));
        }
        self.set(id, PropertyValue::Blob(try_copy(value)?))
    }

    /// Reads a process-local Pointer property.
    pub fn get_pointer(&self, id: PropertyId, index: usize) -> Result<LocalPointer> {
        let value = self.find(id, PropertyType::Pointer, index)?.value();
        value.as_pointer().ok_or_else(|| unexpected(id, value))
    }

    /// Writes a process-local Pointer property.
    ///
    /// Pointer entries are never serialized.
    pub fn set_pointer(&mut self, id: PropertyId, value: LocalPointer) -> Result<()> {
        self.set(id, PropertyValue::Pointer(value))
    }
}

// `find` already matched the type, so this only fires if the entry and its
// reported type disagree.
fn unexpected(id: PropertyId, value: &PropertyValue) -> PropertyError {
    PropertyError::InternalConsistency(format!(
        "property {id} returned a {} payload for a typed read",
        value.type_name()
    ))
}
