//! Slot storage addressed by typed IDs.
//!
//! An [`Arena`] never hands out the same [`ID`] twice. A value can be taken
//! out of its slot and put back later under the same ID; while it is out,
//! the ID stays reserved so that other values may already refer to it.

use std::{
    collections::hash_map::{Entry, Keys},
    fmt::Debug,
    iter::Copied,
    marker::PhantomData,
    ops::Index,
};

use fxhash::FxHashMap;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;

/// A typed slot number in an [`Arena`] of `T`.
///
/// Only the slot number is stored; the type parameter keeps IDs of different
/// arenas apart.
pub struct ID<T: ?Sized> {
    index: u64,
    _marker: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized> ID<T> {
    /// Creates an [`ID`] for the given slot number.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self { index, _marker: PhantomData }
    }

    /// Returns the slot number.
    #[must_use]
    pub const fn index(&self) -> u64 { self.index }
}

impl<T: ?Sized> Debug for ID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID({})", self.index)
    }
}

impl<T: ?Sized> Clone for ID<T> {
    fn clone(&self) -> Self { *self }
}

impl<T: ?Sized> Copy for ID<T> {}

impl<T: ?Sized> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool { self.index == other.index }
}

impl<T: ?Sized> Eq for ID<T> {}

impl<T: ?Sized> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T: ?Sized> std::hash::Hash for ID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

/// Owns values of type `T`, each in a slot addressed by an [`ID`].
pub struct Arena<T> {
    slots: FxHashMap<ID<T>, T>,
    issued: u64,
}

impl<T: Debug> Debug for Arena<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut slots = self.slots.iter().collect::<Vec<_>>();
        slots.sort_by_key(|(id, _)| **id);

        f.debug_map().entries(slots).finish()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self { Self { slots: FxHashMap::default(), issued: 0 } }
}

impl<T> Arena<T> {
    /// Creates an empty [`Arena`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns the number of values currently in their slots.
    #[must_use]
    pub fn len(&self) -> usize { self.slots.len() }

    /// Returns `true` if no slot is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    fn issue(&mut self) -> ID<T> {
        let id = ID::new(self.issued);
        self.issued += 1;

        id
    }

    /// Stores `value` in a fresh slot.
    pub fn insert(&mut self, value: T) -> ID<T> {
        self.insert_with(|_| value)
    }

    /// Stores the value built by `f`, which already knows its own ID.
    pub fn insert_with(&mut self, f: impl FnOnce(ID<T>) -> T) -> ID<T> {
        let id = self.issue();
        self.slots.insert(id, f(id));

        id
    }

    /// Takes the value out of its slot. The ID stays reserved and can be
    /// filled again with [`Arena::put_back`].
    #[must_use]
    pub fn take(&mut self, id: ID<T>) -> Option<T> { self.slots.remove(&id) }

    /// Fills the empty slot `id` with `value`.
    ///
    /// An ID that was never issued is reserved as well, so later inserts
    /// skip past it.
    ///
    /// # Errors
    ///
    /// Gives `value` back if the slot is already filled.
    pub fn put_back(&mut self, id: ID<T>, value: T) -> Result<(), T> {
        let Entry::Vacant(slot) = self.slots.entry(id) else {
            return Err(value);
        };

        slot.insert(value);
        self.issued = self.issued.max(id.index.saturating_add(1));

        Ok(())
    }

    /// Returns the value in slot `id`, if it is filled.
    #[must_use]
    pub fn get(&self, id: ID<T>) -> Option<&T> { self.slots.get(&id) }

    /// Returns the value in slot `id` mutably, if it is filled.
    #[must_use]
    pub fn get_mut(&mut self, id: ID<T>) -> Option<&mut T> {
        self.slots.get_mut(&id)
    }

    /// Checks if slot `id` is filled.
    #[must_use]
    pub fn contains(&self, id: ID<T>) -> bool { self.slots.contains_key(&id) }

    /// Checks if `id` has been handed out, filled or not.
    #[must_use]
    pub const fn is_issued(&self, id: ID<T>) -> bool { id.index < self.issued }

    /// Returns the IDs of every filled slot, in no particular order.
    pub fn ids(&self) -> Copied<Keys<'_, ID<T>, T>> {
        self.slots.keys().copied()
    }
}

impl<T> Index<ID<T>> for Arena<T> {
    type Output = T;

    fn index(&self, id: ID<T>) -> &Self::Output {
        self.get(id).unwrap_or_else(|| panic!("{id:?} is not filled"))
    }
}
