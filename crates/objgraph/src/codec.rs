//! The identity-aware codec.
//!
//! A graph is written as a self-describing token stream:
//!
//! - `(null)` for an absent reference,
//! - `# <handle>` for an object already written in this session,
//! - `<type name> { <fields> }` for an object seen for the first time.
//!
//! The handle of a fresh object is assigned *before* its fields are visited,
//! both when writing and when reading. A field that leads back to the object
//! being processed therefore becomes a back-reference instead of an endless
//! recursion, and on the read side resolves to the object that is still
//! under construction.
//!
//! Every nested block costs one level of recursion on both sides. The nesting
//! is capped at [`DEFAULT_MAX_DEPTH`] unless raised with `with_max_depth`;
//! exceeding the cap is reported as [`Error::DepthLimit`] instead of
//! exhausting the stack. A raised cap must fit the stack of the calling
//! thread.

use std::fmt::Debug;

use objgraph_serialize::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, Serializer},
    CLOSE_BLOCK, OPEN_BLOCK,
};

use crate::{
    identity::{Handle, IdentityTable},
    object::{Graph, ObjectID},
    registry::{validate_type_name, TypeRegistry},
    Error,
};

/// The token written for an absent reference.
pub const NULL_TOKEN: &str = "(null)";

/// The token that precedes the handle of a back-reference.
pub const BACK_REFERENCE: &str = "#";

/// The number of nested blocks a [`Writer`] or [`Reader`] accepts by
/// default.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Writes objects of one [`Graph`] within one session.
///
/// Handed to [`Object::write_fields`](crate::Object::write_fields) so that a
/// type can write its scalar fields and recurse into its references.
pub struct Writer<'a> {
    graph: &'a Graph,
    identities: &'a mut IdentityTable,
    serializer: &'a mut dyn Serializer,
    depth: usize,
    max_depth: usize,
}

impl Debug for Writer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writer")
            .field("identities", &self.identities)
            .field("depth", &self.depth)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl<'a> Writer<'a> {
    /// Creates a writer over `graph` that records identities in
    /// `identities`.
    pub fn new(
        graph: &'a Graph,
        identities: &'a mut IdentityTable,
        serializer: &'a mut dyn Serializer,
    ) -> Self {
        Self {
            graph,
            identities,
            serializer,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the number of nested blocks this writer accepts.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the graph being written.
    #[must_use]
    pub const fn graph(&self) -> &'a Graph { self.graph }

    /// Returns the underlying token sink.
    pub fn serializer(&mut self) -> &mut dyn Serializer {
        &mut *self.serializer
    }

    /// Writes a reference: `(null)`, a back-reference, or the full block of
    /// an object not yet written in this session.
    ///
    /// # Errors
    ///
    /// - [`Error::DanglingObject`] if `object` is not in the graph.
    /// - [`Error::InvalidTypeName`] if the object's type name could not be
    ///   read back as a block tag.
    /// - [`Error::DepthLimit`] if blocks nest deeper than the limit.
    /// - Any error of the underlying sink.
    pub fn write_object(
        &mut self,
        object: Option<ObjectID>,
    ) -> Result<(), Error> {
        let Some(id) = object else {
            self.serializer.emit_token(NULL_TOKEN)?;
            self.serializer.end_line()?;

            return Ok(());
        };

        if let Some(handle) = self.identities.lookup_by_object(id) {
            self.serializer.emit_token(BACK_REFERENCE)?;
            self.serializer.emit_u64(handle.get())?;
            self.serializer.end_line()?;

            return Ok(());
        }

        let graph = self.graph;
        let target = graph.get(id).ok_or(Error::DanglingObject(id))?;
        validate_type_name(target.type_name())?;

        if self.depth == self.max_depth {
            return Err(Error::DepthLimit(self.max_depth));
        }

        // must happen before the fields are visited, cycles depend on it
        self.identities.assign(id);

        self.serializer.begin_block(target.type_name())?;

        self.depth += 1;
        let result = target.write_fields(self);
        self.depth -= 1;

        result?;
        self.serializer.end_block()?;

        Ok(())
    }

    /// Writes a scalar field on its own line.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying sink.
    pub fn write_field<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), Error> {
        value.serialize(&mut *self.serializer)?;
        self.serializer.end_line()?;

        Ok(())
    }
}

/// Reads objects into one [`Graph`] within one session.
///
/// Handed to [`Object::read_fields`](crate::Object::read_fields) so that a
/// type can read its scalar fields and recurse into its references.
pub struct Reader<'a> {
    graph: &'a mut Graph,
    identities: &'a mut IdentityTable,
    registry: &'a TypeRegistry,
    deserializer: &'a mut dyn Deserializer,
    depth: usize,
    max_depth: usize,
}

impl Debug for Reader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("identities", &self.identities)
            .field("registry", &self.registry)
            .field("depth", &self.depth)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl<'a> Reader<'a> {
    /// Creates a reader that instantiates objects through `registry` into
    /// `graph`.
    pub fn new(
        graph: &'a mut Graph,
        identities: &'a mut IdentityTable,
        registry: &'a TypeRegistry,
        deserializer: &'a mut dyn Deserializer,
    ) -> Self {
        Self {
            graph,
            identities,
            registry,
            deserializer,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the number of nested blocks this reader accepts.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the graph being populated.
    ///
    /// Objects whose fields are still being read are absent from it.
    #[must_use]
    pub fn graph(&self) -> &Graph { &*self.graph }

    /// Returns the underlying token source.
    pub fn deserializer(&mut self) -> &mut dyn Deserializer {
        &mut *self.deserializer
    }

    /// Reads a reference written by [`Writer::write_object`].
    ///
    /// A back-reference may resolve to an object whose fields are still being
    /// read; its ID is valid but [`Graph::get`] returns `None` for it until
    /// the outermost read of that object finishes.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownType`] for a type name missing from the registry.
    /// - [`Error::UnresolvedReference`] for a handle not assigned in this
    ///   session.
    /// - [`Error::Delimiter`] if a block is not enclosed in `{` and `}`.
    /// - [`Error::DepthLimit`] if blocks nest deeper than the limit.
    /// - [`Error::Syntax`] for malformed or missing tokens.
    pub fn read_object(&mut self) -> Result<Option<ObjectID>, Error> {
        let token = self.deserializer.expect_token()?;

        if token == NULL_TOKEN {
            Ok(None)
        } else if token == BACK_REFERENCE {
            let handle = self.read_handle()?;

            self.identities
                .lookup_by_handle(handle)
                .map(Some)
                .ok_or(Error::UnresolvedReference(handle))
        } else {
            self.read_fresh(&token).map(Some)
        }
    }

    /// Reads a scalar field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] if the next token is not a valid `T`.
    pub fn read_field<T: Deserialize>(&mut self) -> Result<T, Error> {
        Ok(T::deserialize(&mut *self.deserializer)?)
    }

    fn read_handle(&mut self) -> Result<Handle, Error> {
        let value = self.deserializer.expect_u64()?;

        Handle::new(value).ok_or_else(|| {
            objgraph_serialize::Error::InvalidToken {
                expected: "a positive handle",
                found: value.to_string(),
            }
            .into()
        })
    }

    fn read_fresh(&mut self, type_name: &str) -> Result<ObjectID, Error> {
        if self.depth == self.max_depth {
            return Err(Error::DepthLimit(self.max_depth));
        }

        let object = self.registry.create(type_name)?;
        let id = self.graph.insert_boxed(object);

        // must happen before the fields are read, cycles depend on it
        let handle = self.identities.assign(id);
        log::debug!("reading `{type_name}` as handle {handle}");

        self.expect_delimiter(OPEN_BLOCK)?;

        // the object stays out of the graph while its own fields are read
        let mut object =
            self.graph.take(id).ok_or(Error::DanglingObject(id))?;
        self.depth += 1;
        let result = object.read_fields(self);
        self.depth -= 1;

        let result = result.and_then(|()| self.expect_delimiter(CLOSE_BLOCK));

        if result.is_ok() {
            object.after_read();
        }

        self.graph.restore(id, object);

        result.map(|()| id)
    }

    fn expect_delimiter(
        &mut self,
        expected: &'static str,
    ) -> Result<(), Error> {
        let found = self.deserializer.expect_token()?;

        if found == expected {
            Ok(())
        } else {
            Err(Error::Delimiter { expected, found })
        }
    }
}
