//! Wire codec for property lists.
//!
//! A serialized list is a plain sequence of records, with no header:
//!
//! - `property_id`: i32 (4 bytes)
//! - `type_tag`: u32 (4 bytes, see [`PropertyType::tag`])
//! - payload:
//!   - Bool: u8 (0 or 1)
//!   - Integer, Handle: i32 (4 bytes)
//!   - Int64: i64 (8 bytes)
//!   - String, Blob: `len`: u32 (4 bytes) followed by `len` raw bytes
//!
//! All integers are little-endian. Strings carry no terminator. Pointer
//! entries are process-local and never written.

use std::collections::HashMap;

use crate::config::{DecodeLimits, PropertyListConfig};
use crate::debug::spew;
use crate::error::{PropertyError, Result, try_copy};
use crate::property_id::PropertyId;
use crate::property_value::{Handle, PropertyType, PropertyValue};
use crate::store::{PropertyEntry, PropertyStore};

/// Size of the fixed record header: property ID plus type tag.
pub const RECORD_HEADER_SIZE: usize = 8;

/// Appends one record for `entry` to `buf`.
///
/// Returns an error for Pointer entries, which have no wire form.
fn encode_entry(entry: &PropertyEntry, buf: &mut Vec<u8>) -> Result<()> {
    if let PropertyValue::Pointer(_) = entry.value() {
        return Err(PropertyError::InternalConsistency(format!(
            "property {} holds a process-local Pointer value",
            entry.id()
        )));
    }

    buf.extend_from_slice(&entry.id().to_le_bytes());
    buf.extend_from_slice(&entry.property_type().tag().to_le_bytes());

    match entry.value() {
        PropertyValue::Bool(value) => buf.push(u8::from(*value)),
        PropertyValue::Integer(value) => buf.extend_from_slice(&value.to_le_bytes()),
        PropertyValue::Int64(value) => buf.extend_from_slice(&value.to_le_bytes()),
        PropertyValue::Handle(value) => buf.extend_from_slice(&value.0.to_le_bytes()),
        PropertyValue::String(value) => encode_bytes(entry.id(), value.as_bytes(), buf)?,
        PropertyValue::Blob(value) => encode_bytes(entry.id(), value, buf)?,
        PropertyValue::Pointer(_) => {}
    }
    Ok(())
}

fn encode_bytes(id: PropertyId, bytes: &[u8], buf: &mut Vec<u8>) -> Result<()> {
    let len = u32::try_from(bytes.len()).map_err(|_| {
        PropertyError::InternalConsistency(format!(
            "property {id}: payload of {} bytes cannot be length-prefixed",
            bytes.len()
        ))
    })?;
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Cursor over a received buffer. Every read is bounds-checked before any
/// bytes are copied out.
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn is_done(&self) -> bool {
        self.offset == self.data.len()
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(PropertyError::corrupt(format!(
                "truncated {what} at offset {}: need {len} bytes, have {}",
                self.offset,
                self.remaining()
            )));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let bytes = self.take(N, what)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    fn read_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take_array::<1>(what)?[0])
    }

    fn read_i32(&mut self, what: &str) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take_array(what)?))
    }

    fn read_u32(&mut self, what: &str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_array(what)?))
    }

    fn read_i64(&mut self, what: &str) -> Result<i64> {
        Ok(i64::from_le_bytes(self.take_array(what)?))
    }

    /// Reads a length prefix and the payload it declares.
    fn read_prefixed(&mut self, id: PropertyId, limits: &DecodeLimits) -> Result<&'a [u8]> {
        let len = self.read_u32("payload length")? as usize;
        if len > limits.max_payload_size {
            return Err(PropertyError::corrupt(format!(
                "property {id} declares {len} bytes, above the {} byte limit",
                limits.max_payload_size
            )));
        }
        self.take(len, "payload")
    }
}

/// Decodes one record, returning the entry it describes.
fn decode_record(reader: &mut Reader<'_>, limits: &DecodeLimits) -> Result<PropertyEntry> {
    let id = reader.read_i32("property id")?;
    let tag = reader.read_u32("type tag")?;
    let ty = PropertyType::from_tag(tag)
        .ok_or_else(|| PropertyError::corrupt(format!("property {id} has unknown type tag {tag}")))?;

    let value = match ty {
        PropertyType::Bool => match reader.read_u8("bool")? {
            0 => PropertyValue::Bool(false),
            1 => PropertyValue::Bool(true),
            other => {
                return Err(PropertyError::corrupt(format!(
                    "property {id} has invalid bool value {other}"
                )));
            }
        },
        PropertyType::Integer => PropertyValue::Integer(reader.read_i32("integer")?),
        PropertyType::Int64 => PropertyValue::Int64(reader.read_i64("int64")?),
        PropertyType::Handle => PropertyValue::Handle(Handle(reader.read_i32("handle")?)),
        PropertyType::String => {
            let bytes = try_copy(reader.read_prefixed(id, limits)?)?;
            let value = String::from_utf8(bytes).map_err(|e| {
                PropertyError::corrupt(format!("property {id} has invalid UTF-8: {e}"))
            })?;
            PropertyValue::String(value)
        }
        PropertyType::Blob => PropertyValue::Blob(try_copy(reader.read_prefixed(id, limits)?)?),
        PropertyType::Pointer => {
            return Err(PropertyError::corrupt(format!(
                "property {id} carries a process-local Pointer value"
            )));
        }
    };

    Ok(PropertyEntry::clean(id, value))
}

/// Decodes a whole buffer into a list of entries, enforcing `limits`.
///
/// The entries are only returned if every byte was consumed by well-formed
/// records and no ID appears under two different types.
pub fn decode_entries(data: &[u8], limits: &DecodeLimits) -> Result<Vec<PropertyEntry>> {
    let mut reader = Reader::new(data);
    let mut entries = Vec::new();
    let mut types: HashMap<PropertyId, PropertyType> = HashMap::new();

    while !reader.is_done() {
        if entries.len() >= limits.max_records {
            return Err(PropertyError::corrupt(format!(
                "buffer holds more than {} records",
                limits.max_records
            )));
        }

        let entry = decode_record(&mut reader, limits)?;
        let ty = entry.property_type();
        if let Some(previous) = types.insert(entry.id(), ty).filter(|prev| *prev != ty) {
            return Err(PropertyError::corrupt(format!(
                "property {} appears as both {previous} and {ty}",
                entry.id()
            )));
        }

        entries
            .try_reserve(1)
            .map_err(|_| PropertyError::OutOfMemory(std::mem::size_of::<PropertyEntry>()))?;
        entries.push(entry);
    }

    Ok(entries)
}

impl PropertyStore {
    /// Serializes the list in stored order.
    ///
    /// With `dirty_only`, entries that are not dirty are skipped, and on
    /// success every emitted entry is marked clean so unchanged values are not
    /// resent by the next partial sync. On failure the store is untouched.
    ///
    /// Pointer entries are never emitted. A partial pass skips them and leaves
    /// their dirty flags alone. A full pass fails with
    /// [`PropertyError::InternalConsistency`] unless the store was configured
    /// with `omit_local_values`, in which case they are left out.
    pub fn serialize(&mut self, dirty_only: bool) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut emitted = Vec::new();

        for (pos, entry) in self.entries.iter().enumerate() {
            if dirty_only && !entry.is_dirty() {
                continue;
            }
            if !entry.property_type().is_transportable() {
                if dirty_only || self.config().omit_local_values {
                    continue;
                }
                self.assertions()
                    .check(false, "no process-local values in a serialized list");
            }
            encode_entry(entry, &mut buf)?;
            emitted.push(pos);
        }

        if dirty_only {
            for pos in &emitted {
                self.entries[*pos].mark_clean();
            }
        }

        spew!(
            self.config().debug,
            1,
            "serialized {} of {} properties into {} bytes (dirty_only = {})",
            emitted.len(),
            self.entries.len(),
            buf.len(),
            dirty_only
        );

        Ok(buf)
    }

    /// Rebuilds the list from a buffer produced by [`PropertyStore::serialize`].
    ///
    /// The store must be empty. Decoded entries are appended in buffer order
    /// with their dirty flags cleared. If the buffer is malformed the store is
    /// left empty.
    pub fn deserialize(&mut self, data: &[u8]) -> Result<()> {
        if !self
            .assertions()
            .check(self.is_empty(), "deserialize into an empty list")
        {
            return Err(PropertyError::InternalConsistency(format!(
                "cannot deserialize into a list holding {} properties",
                self.len()
            )));
        }

        let entries = match decode_entries(data, &self.config().limits) {
            Ok(entries) => entries,
            Err(err) => {
                #[cfg(feature = "logging")]
                log::warn!("Vix: rejected serialized property list: {err}");
                return Err(err);
            }
        };

        spew!(
            self.config().debug,
            1,
            "deserialized {} properties from {} bytes",
            entries.len(),
            data.len()
        );

        self.entries = entries;
        Ok(())
    }

    /// Builds a new store from a serialized buffer.
    pub fn from_bytes(
        data: &[u8],
        config: PropertyListConfig,
    ) -> Result<PropertyStore> {
        let mut store = PropertyStore::with_config(config);
        store.deserialize(data)?;
        Ok(store)
    }
}
