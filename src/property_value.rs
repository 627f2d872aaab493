//! Property types and the tagged value they carry.
//!
//! Every entry holds exactly one [`PropertyValue`]; its variant is the entry's
//! [`PropertyType`]. Accessors match on the variant, so a value stored as one
//! type can never be read back as another.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminant of a property value.
///
/// The numeric values double as the wire tags written by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum PropertyType {
    /// 32-bit signed integer.
    Integer = 1,
    /// Owned UTF-8 string.
    String = 2,
    /// Boolean.
    Bool = 3,
    /// Identifier into an external handle table.
    Handle = 4,
    /// 64-bit signed integer.
    Int64 = 5,
    /// Owned byte buffer.
    Blob = 6,
    /// Process-local address. Never serialized.
    Pointer = 7,
}

impl PropertyType {
    /// All types, in tag order.
    pub const ALL: [PropertyType; 7] = [
        PropertyType::Integer,
        PropertyType::String,
        PropertyType::Bool,
        PropertyType::Handle,
        PropertyType::Int64,
        PropertyType::Blob,
        PropertyType::Pointer,
    ];

    /// Returns the wire tag for this type.
    pub fn tag(self) -> u32 {
        self as u32
    }

    /// Looks up a type by wire tag.
    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.tag() == tag)
    }

    /// Returns the type name of this property type.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::String => "String",
            Self::Bool => "Bool",
            Self::Handle => "Handle",
            Self::Int64 => "Int64",
            Self::Blob => "Blob",
            Self::Pointer => "Pointer",
        }
    }

    /// Returns true if values of this type may cross a process boundary.
    pub fn is_transportable(self) -> bool {
        !matches!(self, Self::Pointer)
    }

    /// Returns the zero value of this type, used when an entry is created on
    /// first write.
    pub fn zero_value(self) -> PropertyValue {
        match self {
            Self::Integer => PropertyValue::Integer(0),
            Self::String => PropertyValue::String(String::new()),
            Self::Bool => PropertyValue::Bool(false),
            Self::Handle => PropertyValue::Handle(Handle::INVALID),
            Self::Int64 => PropertyValue::Int64(0),
            Self::Blob => PropertyValue::Blob(Vec::new()),
            Self::Pointer => PropertyValue::Pointer(LocalPointer::NULL),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Opaque identifier of an object in an external handle table.
///
/// The property list stores the identifier only; it never resolves it and does
/// not own the referenced object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(pub i32);

impl Handle {
    /// The handle value that refers to nothing.
    pub const INVALID: Handle = Handle(0);

    /// Returns true unless this is [`Handle::INVALID`].
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// A process-local address.
///
/// Meaningful only inside the process that stored it, so it is rejected by the
/// codec rather than written to a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LocalPointer(pub usize);

impl LocalPointer {
    /// The null address.
    pub const NULL: LocalPointer = LocalPointer(0);

    /// Captures the address of `value`.
    pub fn from_ref<T>(value: &T) -> Self {
        Self(std::ptr::from_ref(value) as usize)
    }

    /// Returns true for the null address.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Payload of a property entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Boolean value
    Bool(bool),
    /// 32-bit signed integer value
    Integer(i32),
    /// 64-bit signed integer value
    Int64(i64),
    /// Owned string value
    String(String),
    /// External handle identifier
    Handle(Handle),
    /// Owned byte buffer
    Blob(Vec<u8>),
    /// Process-local address
    Pointer(LocalPointer),
}

impl PropertyValue {
    /// Returns the type of this value.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Bool(_) => PropertyType::Bool,
            Self::Integer(_) => PropertyType::Integer,
            Self::Int64(_) => PropertyType::Int64,
            Self::String(_) => PropertyType::String,
            Self::Handle(_) => PropertyType::Handle,
            Self::Blob(_) => PropertyType::Blob,
            Self::Pointer(_) => PropertyType::Pointer,
        }
    }

    /// Returns the type name of this property value.
    pub fn type_name(&self) -> &'static str {
        self.property_type().type_name()
    }

    /// Returns the value as a bool if this is a Bool variant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as an i32 if this is an Integer variant.
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as an i64 if this is an Int64 variant.
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Self::Int64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as a string slice if this is a String variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the handle if this is a Handle variant.
    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            Self::Handle(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the bytes if this is a Blob variant.
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the address if this is a Pointer variant.
    pub fn as_pointer(&self) -> Option<LocalPointer> {
        match self {
            Self::Pointer(value) => Some(*value),
            _ => None,
        }
    }

    /// Number of payload bytes owned by this value.
    pub fn owned_len(&self) -> usize {
        match self {
            Self::String(value) => value.len(),
            Self::Blob(value) => value.len(),
            _ => 0,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Handle> for PropertyValue {
    fn from(value: Handle) -> Self {
        Self::Handle(value)
    }
}

impl From<&[u8]> for PropertyValue {
    fn from(value: &[u8]) -> Self {
        Self::Blob(value.to_vec())
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}

impl From<LocalPointer> for PropertyValue {
    fn from(value: LocalPointer) -> Self {
        Self::Pointer(value)
    }
}
