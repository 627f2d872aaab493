use std::fmt;

use crate::property_id::PropertyId;
use crate::property_value::PropertyType;

/// Numeric error code shared with the other error translators of the client,
/// host and guest agent.
///
/// Codes never exceed `u16::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Success.
    pub const OK: ErrorCode = ErrorCode(0);
    /// Unspecified failure.
    pub const FAIL: ErrorCode = ErrorCode(1);
    /// An allocation could not be satisfied.
    pub const OUT_OF_MEMORY: ErrorCode = ErrorCode(2);
    /// A caller supplied an argument the operation cannot accept.
    pub const INVALID_ARG: ErrorCode = ErrorCode(3);
    /// The operation requires a VMware virtual machine.
    pub const OP_NOT_SUPPORTED_ON_NON_VMWARE_VM: ErrorCode = ErrorCode(3038);
    /// The requested property is not present.
    pub const UNRECOGNIZED_PROPERTY: ErrorCode = ErrorCode(6000);
    /// A serialized property list could not be decoded.
    pub const INVALID_SERIALIZED_DATA: ErrorCode = ErrorCode(6004);
    /// The property exists under a different type.
    pub const PROPERTY_TYPE_MISMATCH: ErrorCode = ErrorCode(6005);

    /// Wraps a raw code.
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the raw numeric value.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Returns true for [`ErrorCode::OK`].
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for ErrorCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

/// Errors reported by property list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// No entry with this ID (and type) exists at the requested index.
    PropertyNotFound { id: PropertyId, index: usize },
    /// The ID is present, but stored under a different type.
    TypeMismatch {
        id: PropertyId,
        expected: PropertyType,
        found: PropertyType,
    },
    /// A caller supplied a malformed request.
    InvalidArgument(String),
    /// A serialized buffer violated the wire framing.
    CorruptData(String),
    /// Copying a payload of this many bytes could not be allocated.
    OutOfMemory(usize),
    /// A programming contract was broken.
    InternalConsistency(String),
}

impl PropertyError {
    /// Maps this error into the shared error-code space.
    pub fn code(&self) -> ErrorCode {
        match self {
            PropertyError::PropertyNotFound { .. } => ErrorCode::UNRECOGNIZED_PROPERTY,
            PropertyError::TypeMismatch { .. } => ErrorCode::PROPERTY_TYPE_MISMATCH,
            PropertyError::InvalidArgument(_) => ErrorCode::INVALID_ARG,
            PropertyError::CorruptData(_) => ErrorCode::INVALID_SERIALIZED_DATA,
            PropertyError::OutOfMemory(_) => ErrorCode::OUT_OF_MEMORY,
            PropertyError::InternalConsistency(_) => ErrorCode::FAIL,
        }
    }

    /// Returns true for the routine "not present" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PropertyError::PropertyNotFound { .. })
    }

    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        PropertyError::CorruptData(msg.into())
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyError::PropertyNotFound { id, index } => {
                write!(f, "property {id} not found at index {index}")
            }
            PropertyError::TypeMismatch {
                id,
                expected,
                found,
            } => write!(
                f,
                "property {id} has type {found}, but {expected} was requested"
            ),
            PropertyError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            PropertyError::CorruptData(msg) => write!(f, "corrupt serialized data: {msg}"),
            PropertyError::OutOfMemory(size) => {
                write!(f, "out of memory allocating {size} bytes")
            }
            PropertyError::InternalConsistency(msg) => {
                write!(f, "internal consistency error: {msg}")
            }
        }
    }
}

impl std::error::Error for PropertyError {}

impl From<PropertyError> for ErrorCode {
    fn from(err: PropertyError) -> Self {
        err.code()
    }
}

/// Result type used throughout this crate.
pub type Result<T, E = PropertyError> = std::result::Result<T, E>;

/// Copies `bytes` into freshly allocated memory, reporting allocation failure.
pub(crate) fn try_copy(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut owned = Vec::new();
    owned
        .try_reserve_exact(bytes.len())
        .map_err(|_| PropertyError::OutOfMemory(bytes.len()))?;
    owned.extend_from_slice(bytes);
    Ok(owned)
}

/// Copies `value` into a freshly allocated string, reporting allocation failure.
pub(crate) fn try_copy_str(value: &str) -> Result<String> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(value.len())
        .map_err(|_| PropertyError::OutOfMemory(value.len()))?;
    owned.push_str(value);
    Ok(owned)
}
