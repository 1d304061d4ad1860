//! Long-lived codec sessions.

use getset::{CopyGetters, Getters};
use objgraph_serialize::{de::Deserializer, ser::Serializer};

use crate::{
    codec::{Reader, Writer, DEFAULT_MAX_DEPTH},
    identity::IdentityTable,
    object::{Graph, ObjectID},
    registry::TypeRegistry,
    Error,
};

/// Carries identity across several top-level reads or writes.
///
/// Objects written by one [`Session::write_object`] call are written as
/// back-references by every later call until [`Session::reset`]. The same
/// holds for reading. A session is used either for writing or for reading;
/// mixing both in one session makes the handles meaningless.
#[derive(Debug, Getters, CopyGetters)]
pub struct Session<'r> {
    /// The registry used to instantiate objects while reading.
    #[get_copy = "pub"]
    registry: &'r TypeRegistry,

    /// The handles assigned so far in this session.
    #[get = "pub"]
    identities: IdentityTable,

    /// The number of nested blocks every call accepts.
    #[get_copy = "pub"]
    max_depth: usize,
}

impl<'r> Session<'r> {
    /// Creates a new session with an empty [`IdentityTable`].
    #[must_use]
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            identities: IdentityTable::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the number of nested blocks every later call accepts.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Writes `root` and everything reachable from it to `serializer`.
    ///
    /// # Errors
    ///
    /// See [`Writer::write_object`].
    pub fn write_object(
        &mut self,
        graph: &Graph,
        serializer: &mut dyn Serializer,
        root: Option<ObjectID>,
    ) -> Result<(), Error> {
        Writer::new(graph, &mut self.identities, serializer)
            .with_max_depth(self.max_depth)
            .write_object(root)
    }

    /// Reads one top-level reference from `deserializer` into `graph`.
    ///
    /// On failure every object constructed so far stays in `graph` and keeps
    /// its handle in this session.
    ///
    /// # Errors
    ///
    /// See [`Reader::read_object`].
    pub fn read_object(
        &mut self,
        graph: &mut Graph,
        deserializer: &mut dyn Deserializer,
    ) -> Result<Option<ObjectID>, Error> {
        Reader::new(graph, &mut self.identities, self.registry, deserializer)
            .with_max_depth(self.max_depth)
            .read_object()
    }

    /// Forgets every handle; the next object gets handle `1` again.
    pub fn reset(&mut self) {
        log::debug!(
            "resetting session with {} bound objects",
            self.identities.len()
        );
        self.identities.reset();
    }
}

#[cfg(test)]
mod test;
