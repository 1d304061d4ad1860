//! Persists arbitrary object graphs, shared and cyclic references included,
//! to a whitespace-delimited token stream and reconstructs them with the
//! same topology.
//!
//! Every object lives in a [`Graph`] and is referred to by its [`ObjectID`].
//! A type becomes persistable by implementing [`Object`] and submitting
//! itself with [`register!`]; reading instantiates types by name through a
//! [`TypeRegistry`].
//!
//! # Example
//!
//! ```rust
//! use objgraph::{
//!     codec::{Reader, Writer},
//!     Error, Graph, Object, ObjectID, Style, TypeRegistry,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Ring {
//!     next: Option<ObjectID>,
//! }
//!
//! impl Object for Ring {
//!     fn type_name(&self) -> &'static str { "Ring" }
//!
//!     fn write_fields(&self, writer: &mut Writer<'_>) -> Result<(), Error> {
//!         writer.write_object(self.next)
//!     }
//!
//!     fn read_fields(&mut self, reader: &mut Reader<'_>) -> Result<(), Error> {
//!         self.next = reader.read_object()?;
//!         Ok(())
//!     }
//! }
//!
//! let mut graph = Graph::new();
//! let ring = graph.insert(Ring::default());
//! graph.get_as_mut::<Ring>(ring).unwrap().next = Some(ring);
//!
//! let text = objgraph::to_string(&graph, Some(ring), Style::Compact).unwrap();
//! assert_eq!(text, "Ring { # 1 }\n");
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_type::<Ring>().unwrap();
//!
//! let mut copy = Graph::new();
//! let root = objgraph::from_str(&registry, &mut copy, &text).unwrap().unwrap();
//! assert_eq!(copy.get_as::<Ring>(root).unwrap().next, Some(root));
//! ```

pub use error::Error;
pub use identity::{Handle, IdentityTable};
#[doc(hidden)]
pub use inventory::submit;
pub use object::{Graph, Object, ObjectID};
pub use objgraph_serialize::text::ser::Style;
pub use registry::{Constructor, Registration, TypeRegistry};
pub use session::Session;

use objgraph_serialize::text::{de::TextDeserializer, ser::TextSerializer};

pub mod codec;
pub mod error;
pub mod identity;
pub mod object;
pub mod registry;
pub mod session;

#[cfg(test)]
mod fixture;

/// Submits a persistable type to the set collected by
/// [`TypeRegistry::with_registered`].
///
/// The type must implement [`Object`] and [`Default`]. The macro is used at
/// item level.
///
/// ```ignore
/// objgraph::register!(Beacon);
/// ```
#[macro_export]
macro_rules! register {
    ($ty:ty) => {
        $crate::submit! {
            $crate::Registration::of::<$ty>()
        }
    };
}

/// Writes `root` and everything reachable from it in a fresh session and
/// returns the text.
///
/// # Errors
///
/// See [`codec::Writer::write_object`].
pub fn to_string(
    graph: &Graph,
    root: Option<ObjectID>,
    style: Style,
) -> Result<String, Error> {
    let mut identities = IdentityTable::new();
    let mut serializer = TextSerializer::new(Vec::new(), style);

    codec::Writer::new(graph, &mut identities, &mut serializer)
        .write_object(root)?;

    let buffer = serializer.finish()?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Reads one top-level reference from `text` into `graph` in a fresh
/// session.
///
/// # Errors
///
/// See [`codec::Reader::read_object`].
pub fn from_str(
    registry: &TypeRegistry,
    graph: &mut Graph,
    text: &str,
) -> Result<Option<ObjectID>, Error> {
    let mut identities = IdentityTable::new();
    let mut deserializer = TextDeserializer::new(text.as_bytes());

    codec::Reader::new(graph, &mut identities, registry, &mut deserializer)
        .read_object()
}
