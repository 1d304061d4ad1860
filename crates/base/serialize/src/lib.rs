//! The whitespace-delimited token layer used to persist object graphs.
//!
//! A [`Serializer`] is a sink that appends tokens in order; a
//! [`Deserializer`] is a source that yields them back one at a time. Neither
//! knows anything about objects: the block structure (`name { ... }`) is the
//! only grammar this crate is aware of. Scalar field values go through the
//! [`Serialize`] and [`Deserialize`] traits.
//!
//! # Example
//!
//! ```rust
//! use objgraph_serialize::{
//!     de::Deserializer,
//!     ser::Serializer,
//!     text::{de::TextDeserializer, ser::{Style, TextSerializer}},
//! };
//!
//! let mut serializer = TextSerializer::new(Vec::new(), Style::Compact);
//! serializer.begin_block("Point").unwrap();
//! serializer.emit_i64(-3).unwrap();
//! serializer.emit_str("a b").unwrap();
//! serializer.end_block().unwrap();
//!
//! let buffer = serializer.finish().unwrap();
//! assert_eq!(buffer, b"Point { -3 \"a\\sb }\n");
//!
//! let mut deserializer = TextDeserializer::new(buffer.as_slice());
//! assert_eq!(deserializer.expect_token().unwrap(), "Point");
//! assert_eq!(deserializer.expect_token().unwrap(), "{");
//! assert_eq!(deserializer.expect_i64().unwrap(), -3);
//! assert_eq!(deserializer.expect_str().unwrap(), "a b");
//! assert_eq!(deserializer.expect_token().unwrap(), "}");
//! assert!(deserializer.next_token().unwrap().is_none());
//! ```

pub use de::Deserialize;
pub use ser::Serialize;

pub mod de;
pub mod ser;
pub mod text;

/// The token that opens a block of fields.
pub const OPEN_BLOCK: &str = "{";

/// The token that closes a block of fields.
pub const CLOSE_BLOCK: &str = "}";

/// The error type shared by every [`Serializer`](ser::Serializer) and
/// [`Deserializer`](de::Deserializer) of this crate.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("I/O error on the token stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("token is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unexpected end of the token stream")]
    UnexpectedEof,

    #[error("expected {expected}, found `{found}`")]
    InvalidToken { expected: &'static str, found: String },

    #[error("value `{value}` is out of range for `{ty}`")]
    OutOfRange { ty: &'static str, value: String },
}
