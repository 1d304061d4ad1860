//! Per-session object identity.
//!
//! The [`IdentityTable`] is what turns a graph walk into a finite token
//! stream: the first time an object is visited it gets the next [`Handle`],
//! every later visit is written as `# <handle>`.

use std::num::NonZeroU64;

use bimap::BiHashMap;

use crate::object::ObjectID;

/// A small positive integer identifying an object within one session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
)]
#[display(fmt = "{}", _0)]
pub struct Handle(NonZeroU64);

impl Handle {
    /// The first handle assigned in every session.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Creates a handle from its numeric value; `0` is never a handle.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Returns the numeric value of the handle.
    #[must_use]
    pub const fn get(self) -> u64 { self.0.get() }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self { handle.get() }
}

/// A bijection between the objects visited in one session and their handles.
///
/// Handles are assigned sequentially starting at [`Handle::FIRST`]; no object
/// is ever bound twice and no handle is ever reused until [`reset`].
///
/// [`reset`]: IdentityTable::reset
#[derive(Debug, Clone)]
pub struct IdentityTable {
    bindings: BiHashMap<Handle, ObjectID>,
    next: Handle,
}

impl Default for IdentityTable {
    fn default() -> Self {
        Self { bindings: BiHashMap::new(), next: Handle::FIRST }
    }
}

impl IdentityTable {
    /// Creates a new empty [`IdentityTable`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Binds `object` to the next sequential handle and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `object` already has a handle in this session. Callers must
    /// check [`IdentityTable::lookup_by_object`] first.
    pub fn assign(&mut self, object: ObjectID) -> Handle {
        let handle = self.next;

        if let Err((_, object)) =
            self.bindings.insert_no_overwrite(handle, object)
        {
            panic!("{object:?} already has a handle in this session");
        }

        self.next = Handle(handle.0.saturating_add(1));

        log::debug!("assigned handle {handle} to {object:?}");

        handle
    }

    /// Returns the object bound to `handle`, if any.
    #[must_use]
    pub fn lookup_by_handle(&self, handle: Handle) -> Option<ObjectID> {
        self.bindings.get_by_left(&handle).copied()
    }

    /// Returns the handle bound to `object`, if any.
    #[must_use]
    pub fn lookup_by_object(&self, object: ObjectID) -> Option<Handle> {
        self.bindings.get_by_right(&object).copied()
    }

    /// Clears every binding; the next assigned handle is [`Handle::FIRST`]
    /// again.
    pub fn reset(&mut self) {
        self.bindings.clear();
        self.next = Handle::FIRST;
    }

    /// Returns the number of bound objects.
    #[must_use]
    pub fn len(&self) -> usize { self.bindings.len() }

    /// Returns `true` if nothing has been bound yet.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }

    /// Returns every binding in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, ObjectID)> {
        let mut bindings = self
            .bindings
            .iter()
            .map(|(handle, object)| (*handle, *object))
            .collect::<Vec<_>>();
        bindings.sort_unstable_by_key(|(handle, _)| *handle);

        bindings.into_iter()
    }
}
