//! Text deserializer implementation.
//!
//! [`TextDeserializer`] reads whitespace-delimited tokens lazily from any
//! type implementing `std::io::BufRead`; nothing beyond the current token is
//! buffered by the deserializer itself.

use std::io::{self, BufRead};

use crate::{de::Deserializer, Error};

/// A text deserializer that reads from any `BufRead` implementation.
#[derive(Debug)]
pub struct TextDeserializer<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> TextDeserializer<R> {
    /// Create a new text deserializer that reads from the given reader.
    pub const fn new(reader: R) -> Self { Self { reader, line: 1 } }

    /// Returns the 1-based line the deserializer is currently positioned at.
    pub const fn line(&self) -> usize { self.line }

    /// Consume the deserializer and return the underlying reader.
    pub fn into_inner(self) -> R { self.reader }

    fn fill_buf(&mut self) -> Result<&[u8], Error> {
        // the buffer is only borrowed once the retries are over
        loop {
            match self.reader.fill_buf() {
                Ok(_) => break,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error.into()),
            }
        }

        Ok(self.reader.fill_buf()?)
    }
}

impl<R: BufRead> Deserializer for TextDeserializer<R> {
    fn next_token(&mut self) -> Result<Option<String>, Error> {
        let mut token = Vec::new();

        loop {
            let mut newlines = 0;
            let mut consumed = 0;
            let mut complete = false;

            let buffer = self.fill_buf()?;
            if buffer.is_empty() {
                break;
            }

            for byte in buffer {
                consumed += 1;

                if byte.is_ascii_whitespace() {
                    if *byte == b'\n' {
                        newlines += 1;
                    }

                    if !token.is_empty() {
                        complete = true;
                        break;
                    }
                } else {
                    token.push(*byte);
                }
            }

            self.reader.consume(consumed);
            self.line += newlines;

            if complete {
                break;
            }
        }

        if token.is_empty() {
            return Ok(None);
        }

        let token = String::from_utf8(token).map_err(|x| x.utf8_error())?;
        log::trace!("read token `{token}` (line {})", self.line);

        Ok(Some(token))
    }
}
