//! # vix-proplist
//!
//! Typed, dynamically extensible property lists exchanged between an
//! automation client, a virtual machine host process, and an in-guest agent.
//!
//! A [`PropertyStore`] is an ordered list of typed (ID, value) entries. Several
//! entries may share an ID, and their stored order gives each one an index.
//! Accessors are type-checked: an ID stored as one type can never be read or
//! written as another. The codec turns a store into a flat little-endian
//! buffer for transport and rebuilds a store from a received buffer.
//!
//! ## Features
//!
//! - **Tagged values**: Bool, Integer, Int64, String, Handle, Blob and
//!   process-local Pointer variants
//! - **Indexed properties**: repeated IDs addressed by 0-based stored order
//! - **Incremental sync**: dirty flags let a partial serialization send only
//!   what changed since the last acknowledged pass
//! - **Hardened decoding**: every length is bounds-checked before copying, and
//!   record count and payload size are capped by [`DecodeLimits`]
//! - **Bulk helpers**: ordered batches, optional reads, and indexed reads
//!
//! ## Quick Start
//!
//! ```rust
//! use proplist::{PropertyError, PropertyListConfig, PropertyStore, property_id};
//!
//! # fn main() -> Result<(), PropertyError> {
//! let mut guest = PropertyStore::new();
//! guest.set_string(property_id::GUEST_TOOLS_VERSION, "10.0.1")?;
//! guest.set_integer(property_id::GUEST_OS_FAMILY, 2)?;
//!
//! let buffer = guest.serialize(false)?;
//!
//! let host = PropertyStore::from_bytes(&buffer, PropertyListConfig::default())?;
//! assert_eq!(host.get_string(property_id::GUEST_TOOLS_VERSION, 0)?, "10.0.1");
//! assert_eq!(host.get_integer(property_id::GUEST_OS_FAMILY, 0)?, 2);
//! assert!(host.get_string(property_id::GUEST_OS_FAMILY, 0).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! ## Scope
//!
//! The crate does not move buffers between processes, and it does not own the
//! objects that Handle values refer to. Handle release is delegated to a
//! [`HandleTable`] supplied by the owner.

mod accessors;
pub mod config;
pub mod debug;
pub mod encoding;
pub mod error;
pub mod integration;
pub mod operations;
pub mod property_id;
pub mod property_value;
pub mod store;

pub use config::{DebugConfig, DecodeLimits, PropertyListConfig};
pub use error::{ErrorCode, PropertyError, Result};
pub use integration::HandleTable;
pub use operations::{
    PropertyBatch, Slot, append_properties, get_indexed_properties, get_optional_properties,
};
pub use property_id::PropertyId;
pub use property_value::{Handle, LocalPointer, PropertyType, PropertyValue};
pub use store::{PropertyEntry, PropertyStore};
