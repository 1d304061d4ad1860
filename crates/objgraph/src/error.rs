//! Contains the [`Error`] type of the object-graph codec.

use crate::{identity::Handle, object::ObjectID};

/// Every failure the registry and the codec can report.
///
/// Errors are reported at the point of occurrence and propagate through every
/// nested [`Reader::read_object`](crate::codec::Reader::read_object) call.
/// The position of the token stream past an error is unspecified, so the
/// session that produced one should not be used for further reads.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("no constructor is registered for type `{0}`")]
    UnknownType(String),

    #[error(
        "back-reference `# {0}` does not resolve to any object read in this \
         session"
    )]
    UnresolvedReference(Handle),

    #[error("type `{0}` is already registered")]
    DuplicateRegistration(String),

    #[error(
        "`{0}` cannot be a type name; it must be a single token distinct \
         from `(null)`, `#`, `{{` and `}}`"
    )]
    InvalidTypeName(String),

    #[error("expected `{expected}`, found `{found}`")]
    Delimiter { expected: &'static str, found: String },

    #[error("objects are nested deeper than the limit of {0} blocks")]
    DepthLimit(usize),

    #[error("object {0:?} is not present in the graph")]
    DanglingObject(ObjectID),

    #[error(transparent)]
    Syntax(#[from] objgraph_serialize::Error),
}
