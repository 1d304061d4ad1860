//! The source side of the token layer.
//!
//! - [`Deserializer`] - yields whitespace-delimited tokens on demand
//! - [`Deserialize`] - implemented by every scalar that can be a field value

use std::str::FromStr;

use crate::{ser::STRING_PREFIX, Error};

/// The main deserializer trait: a source of whitespace-delimited tokens.
pub trait Deserializer {
    /// Yields the next token, or `None` at the end of the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails or the token is not
    /// valid UTF-8.
    fn next_token(&mut self) -> Result<Option<String>, Error>;

    /// Yields the next token, treating the end of the stream as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEof`] if the stream is exhausted.
    fn expect_token(&mut self) -> Result<String, Error> {
        self.next_token()?.ok_or(Error::UnexpectedEof)
    }

    /// Reads the next token as an i64 value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] if the token is not a decimal integer.
    fn expect_i64(&mut self) -> Result<i64, Error> {
        parse_token(self.expect_token()?, "an integer")
    }

    /// Reads the next token as a u64 value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] if the token is not a decimal unsigned
    /// integer.
    fn expect_u64(&mut self) -> Result<u64, Error> {
        parse_token(self.expect_token()?, "an unsigned integer")
    }

    /// Reads the next token as `true` or `false`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] for any other token.
    fn expect_bool(&mut self) -> Result<bool, Error> {
        let token = self.expect_token()?;

        match token.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => {
                Err(Error::InvalidToken { expected: "a boolean", found: token })
            }
        }
    }

    /// Reads the next token as an escaped string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] if the token is not a string token or
    /// contains an unknown escape.
    fn expect_str(&mut self) -> Result<String, Error> {
        unescape(self.expect_token()?)
    }
}

/// A trait for values that can be read back as a field from a
/// [`Deserializer`].
pub trait Deserialize: Sized {
    /// Deserialize a value from the provided deserializer.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokens do not describe a value of this type.
    fn deserialize(deserializer: &mut dyn Deserializer) -> Result<Self, Error>;
}

fn parse_token<T: FromStr>(
    token: String,
    expected: &'static str,
) -> Result<T, Error> {
    match token.parse() {
        Ok(value) => Ok(value),
        Err(_) => Err(Error::InvalidToken { expected, found: token }),
    }
}

/// Inverse of [`crate::ser::escape`].
///
/// # Errors
///
/// Returns [`Error::InvalidToken`] if the token lacks the string prefix,
/// contains an unknown escape, or ends in the middle of one.
pub fn unescape(token: String) -> Result<String, Error> {
    let Some(body) = token.strip_prefix(STRING_PREFIX) else {
        return Err(Error::InvalidToken { expected: "a string", found: token });
    };

    let mut value = String::with_capacity(body.len());
    let mut characters = body.chars();

    while let Some(character) = characters.next() {
        if character != '\\' {
            value.push(character);
            continue;
        }

        let unescaped = match characters.next() {
            Some('\\') => '\\',
            Some('s') => ' ',
            Some('t') => '\t',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\x0c',
            _ => {
                return Err(Error::InvalidToken {
                    expected: "a valid string escape",
                    found: token,
                })
            }
        };

        value.push(unescaped);
    }

    Ok(value)
}

// =============================================================================
// Primitive Type Implementations
// =============================================================================

macro_rules! impl_deserialize_integer {
    ($($ty:ty => $method:ident),*) => {
        $(
            impl Deserialize for $ty {
                fn deserialize(
                    deserializer: &mut dyn Deserializer,
                ) -> Result<Self, Error> {
                    let value = deserializer.$method()?;

                    <$ty>::try_from(value).map_err(|_| Error::OutOfRange {
                        ty: stringify!($ty),
                        value: value.to_string(),
                    })
                }
            }
        )*
    };
}

impl_deserialize_integer!(
    i8 => expect_i64,
    i16 => expect_i64,
    i32 => expect_i64,
    isize => expect_i64,
    u8 => expect_u64,
    u16 => expect_u64,
    u32 => expect_u64,
    usize => expect_u64
);

impl Deserialize for i64 {
    fn deserialize(deserializer: &mut dyn Deserializer) -> Result<Self, Error> {
        deserializer.expect_i64()
    }
}

impl Deserialize for u64 {
    fn deserialize(deserializer: &mut dyn Deserializer) -> Result<Self, Error> {
        deserializer.expect_u64()
    }
}

impl Deserialize for bool {
    fn deserialize(deserializer: &mut dyn Deserializer) -> Result<Self, Error> {
        deserializer.expect_bool()
    }
}

impl Deserialize for String {
    fn deserialize(deserializer: &mut dyn Deserializer) -> Result<Self, Error> {
        deserializer.expect_str()
    }
}
