//! The polymorphic [`Object`] contract and the [`Graph`] arena that owns
//! every object.

use std::{any::Any, fmt::Debug};

use objgraph_arena::{Arena, ID};

use crate::{
    codec::{Reader, Writer},
    Error,
};

/// Identifies an object stored in a [`Graph`].
///
/// Fields that refer to other objects store an `ObjectID` (usually an
/// `Option<ObjectID>`), never a reference, so cyclic graphs need no shared
/// ownership.
pub type ObjectID = ID<Box<dyn Object>>;

/// The capability every persistable type implements.
///
/// # Example
///
/// ```rust
/// use objgraph::{
///     codec::{Reader, Writer},
///     Error, Object, ObjectID,
/// };
///
/// #[derive(Debug, Default)]
/// struct Link {
///     next: Option<ObjectID>,
///     weight: i32,
/// }
///
/// impl Object for Link {
///     fn type_name(&self) -> &'static str { "Link" }
///
///     fn write_fields(&self, writer: &mut Writer<'_>) -> Result<(), Error> {
///         writer.write_object(self.next)?;
///         writer.write_field(&self.weight)
///     }
///
///     fn read_fields(&mut self, reader: &mut Reader<'_>) -> Result<(), Error> {
///         self.next = reader.read_object()?;
///         self.weight = reader.read_field()?;
///         Ok(())
///     }
/// }
/// ```
pub trait Object: Any + Debug {
    /// The tag written in front of this object's block and the key under
    /// which its constructor is registered. Must be constant per type and a
    /// single whitespace-free token.
    fn type_name(&self) -> &'static str;

    /// Writes this type's own fields, in order.
    ///
    /// A type built on top of another persistable part writes that part
    /// first. The default writes nothing.
    ///
    /// # Errors
    ///
    /// Returns any error produced while writing nested objects or scalars.
    fn write_fields(&self, _writer: &mut Writer<'_>) -> Result<(), Error> {
        Ok(())
    }

    /// Reads back exactly what [`Object::write_fields`] wrote, in the same
    /// order. The enclosing `{` and `}` are handled by the codec.
    ///
    /// # Errors
    ///
    /// Returns any error produced while reading nested objects or scalars.
    fn read_fields(&mut self, _reader: &mut Reader<'_>) -> Result<(), Error> {
        Ok(())
    }

    /// Invoked once after a freshly constructed instance has been completely
    /// read. Never invoked for an object resolved through a back-reference.
    fn after_read(&mut self) {}
}

impl dyn Object {
    /// Returns `true` if the concrete type of this object is `T`.
    #[must_use]
    pub fn is<T: Object>(&self) -> bool { (self as &dyn Any).is::<T>() }

    /// Returns a reference to the concrete `T`, if that is what this is.
    #[must_use]
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Returns a mutable reference to the concrete `T`, if that is what this
    /// is.
    #[must_use]
    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

/// Owns every object of an object graph.
///
/// Objects are never removed individually; the whole graph is dropped at
/// once, so an [`ObjectID`] obtained from a graph stays valid as long as the
/// graph lives.
#[derive(Debug, Default)]
pub struct Graph {
    arena: Arena<Box<dyn Object>>,
}

impl Graph {
    /// Creates a new empty [`Graph`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns the number of objects in the graph.
    #[must_use]
    pub fn len(&self) -> usize { self.arena.len() }

    /// Returns `true` if the graph contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.arena.is_empty() }

    /// Moves `object` into the graph and returns its ID.
    pub fn insert<T: Object>(&mut self, object: T) -> ObjectID {
        self.arena.insert(Box::new(object))
    }

    /// Moves an already boxed object into the graph and returns its ID.
    pub fn insert_boxed(&mut self, object: Box<dyn Object>) -> ObjectID {
        self.arena.insert(object)
    }

    /// Returns the object with the given ID.
    ///
    /// An object that is currently being read is temporarily absent.
    #[must_use]
    pub fn get(&self, id: ObjectID) -> Option<&(dyn Object + 'static)> {
        self.arena.get(id).map(|object| &**object)
    }

    /// Returns the object with the given ID mutably.
    #[must_use]
    pub fn get_mut(
        &mut self,
        id: ObjectID,
    ) -> Option<&mut (dyn Object + 'static)> {
        self.arena.get_mut(id).map(|object| &mut **object)
    }

    /// Returns the object with the given ID if its concrete type is `T`.
    #[must_use]
    pub fn get_as<T: Object>(&self, id: ObjectID) -> Option<&T> {
        self.get(id)?.downcast_ref()
    }

    /// Returns the object with the given ID mutably if its concrete type is
    /// `T`.
    #[must_use]
    pub fn get_as_mut<T: Object>(&mut self, id: ObjectID) -> Option<&mut T> {
        self.get_mut(id)?.downcast_mut()
    }

    /// Checks if the graph currently holds an object with the given ID.
    #[must_use]
    pub fn contains(&self, id: ObjectID) -> bool { self.arena.contains(id) }

    /// Returns an iterator over the IDs of every object in the graph.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = ObjectID> + '_ {
        self.arena.ids()
    }

    /// Takes an object out while its fields are being read; its ID remains
    /// issued and is filled again by [`Graph::restore`].
    pub(crate) fn take(&mut self, id: ObjectID) -> Option<Box<dyn Object>> {
        self.arena.take(id)
    }

    pub(crate) fn restore(&mut self, id: ObjectID, object: Box<dyn Object>) {
        let restored = self.arena.put_back(id, object);
        debug_assert!(restored.is_ok(), "{id:?} was refilled while taken out");
    }
}
