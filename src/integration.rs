//! Integration traits for the external handle table.

use crate::property_value::Handle;

/// Trait for the table that owns the objects Handle-typed properties refer to.
///
/// A property list only stores handle identifiers. When a list is cleared with
/// [`PropertyStore::clear`](crate::PropertyStore::clear), each valid stored handle is
/// passed back here so the owning table can drop its reference.
///
/// # Example
///
/// ```rust
/// use proplist::{Handle, HandleTable, PropertyStore};
///
/// struct Released(Vec<Handle>);
///
/// impl HandleTable for Released {
///     fn release(&mut self, handle: Handle) {
///         self.0.push(handle);
///     }
/// }
///
/// let mut store = PropertyStore::new();
/// store.set_handle(7, Handle(42)).unwrap();
///
/// let mut table = Released(Vec::new());
/// store.clear(&mut table);
/// assert_eq!(table.0, vec![Handle(42)]);
/// assert!(store.is_empty());
/// ```
pub trait HandleTable {
    /// Drops one reference to the object behind `handle`.
    fn release(&mut self, handle: Handle);

    /// Drops one reference for every handle in `handles`, in order.
    fn release_all(&mut self, handles: impl IntoIterator<Item = Handle>)
    where
        Self: Sized,
    {
        for handle in handles {
            self.release(handle);
        }
    }
}
