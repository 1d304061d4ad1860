//! Human-readable text encoding of the token layer.
//!
//! The serializer writes every token separated by whitespace, optionally
//! laying out blocks one structural unit per line with indentation. The
//! deserializer ignores the layout entirely and only looks at the tokens.

pub mod de;
pub mod ser;
