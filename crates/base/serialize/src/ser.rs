//! The sink side of the token layer.
//!
//! - [`Serializer`] - appends tokens and structural markers in order
//! - [`Serialize`] - implemented by every scalar that can be a field value
//!
//! Both traits are object safe so that polymorphic objects can write
//! themselves through a `&mut dyn Serializer` without knowing the concrete
//! output format.

use crate::{Error, CLOSE_BLOCK, OPEN_BLOCK};

/// The main serializer trait: a sink of whitespace-delimited tokens.
pub trait Serializer {
    /// Appends a single token.
    ///
    /// The token must be non-empty and must not contain ASCII whitespace;
    /// use [`Serializer::emit_str`] for arbitrary text.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn emit_token(&mut self, token: &str) -> Result<(), Error>;

    /// Marks the end of a logical line. Layout only; it never changes the
    /// token sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn end_line(&mut self) -> Result<(), Error>;

    /// Opens a block of fields tagged with `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn begin_block(&mut self, name: &str) -> Result<(), Error> {
        self.emit_token(name)?;
        self.emit_token(OPEN_BLOCK)?;
        self.end_line()
    }

    /// Closes the innermost block opened by [`Serializer::begin_block`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn end_block(&mut self) -> Result<(), Error> {
        self.emit_token(CLOSE_BLOCK)?;
        self.end_line()
    }

    /// Serialize an i64 value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn emit_i64(&mut self, value: i64) -> Result<(), Error> {
        self.emit_token(&value.to_string())
    }

    /// Serialize a u64 value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn emit_u64(&mut self, value: u64) -> Result<(), Error> {
        self.emit_token(&value.to_string())
    }

    /// Serialize a boolean value as `true` or `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn emit_bool(&mut self, value: bool) -> Result<(), Error> {
        self.emit_token(if value { "true" } else { "false" })
    }

    /// Serialize a string slice as a single escaped token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn emit_str(&mut self, value: &str) -> Result<(), Error> {
        self.emit_token(&escape(value))
    }
}

/// A trait for values that can be written as a field through a
/// [`Serializer`].
pub trait Serialize {
    /// Serialize this value using the provided serializer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    fn serialize(&self, serializer: &mut dyn Serializer) -> Result<(), Error>;
}

/// The first character of every string token.
pub const STRING_PREFIX: char = '"';

/// Turns arbitrary text into one whitespace-free token.
///
/// The token starts with [`STRING_PREFIX`] so that the empty string still
/// occupies a token.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut token = String::with_capacity(value.len() + 1);
    token.push(STRING_PREFIX);

    for character in value.chars() {
        match character {
            '\\' => token.push_str("\\\\"),
            ' ' => token.push_str("\\s"),
            '\t' => token.push_str("\\t"),
            '\n' => token.push_str("\\n"),
            '\r' => token.push_str("\\r"),
            '\x0c' => token.push_str("\\f"),
            other => token.push(other),
        }
    }

    token
}

// =============================================================================
// Primitive Type Implementations
// =============================================================================

macro_rules! impl_serialize_signed {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize(
                    &self,
                    serializer: &mut dyn Serializer,
                ) -> Result<(), Error> {
                    serializer.emit_i64(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! impl_serialize_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize(
                    &self,
                    serializer: &mut dyn Serializer,
                ) -> Result<(), Error> {
                    serializer.emit_u64(u64::from(*self))
                }
            }
        )*
    };
}

impl_serialize_signed!(i8, i16, i32, i64);
impl_serialize_unsigned!(u8, u16, u32, u64);

impl Serialize for isize {
    fn serialize(&self, serializer: &mut dyn Serializer) -> Result<(), Error> {
        serializer.emit_token(&self.to_string())
    }
}

impl Serialize for usize {
    fn serialize(&self, serializer: &mut dyn Serializer) -> Result<(), Error> {
        serializer.emit_token(&self.to_string())
    }
}

impl Serialize for bool {
    fn serialize(&self, serializer: &mut dyn Serializer) -> Result<(), Error> {
        serializer.emit_bool(*self)
    }
}

impl Serialize for str {
    fn serialize(&self, serializer: &mut dyn Serializer) -> Result<(), Error> {
        serializer.emit_str(self)
    }
}

impl Serialize for String {
    fn serialize(&self, serializer: &mut dyn Serializer) -> Result<(), Error> {
        serializer.emit_str(self)
    }
}

impl<T: Serialize + ?Sized> Serialize for &T {
    fn serialize(&self, serializer: &mut dyn Serializer) -> Result<(), Error> {
        (**self).serialize(serializer)
    }
}
