//! Text serializer implementation.
//!
//! [`TextSerializer`] writes tokens to any type implementing
//! `std::io::Write`.
//!
//! # Layout
//!
//! With [`Style::Pretty`] every call to [`Serializer::end_line`] starts a new
//! line and block contents are indented:
//!
//! ```text
//! Chain {
//!   # 1
//!   3
//! }
//! ```
//!
//! With [`Style::Compact`] everything is joined by single spaces and a single
//! newline is written by [`TextSerializer::finish`]:
//!
//! ```text
//! Chain { # 1 3 }
//! ```

use std::io::Write;

use crate::{ser::Serializer, Error, CLOSE_BLOCK, OPEN_BLOCK};

/// How the text is laid out. Both styles produce the same token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// One structural unit per line, nested blocks indented by `indent`
    /// spaces per level.
    Pretty {
        /// The number of spaces per nesting level.
        indent: usize,
    },

    /// All tokens on a single line.
    Compact,
}

impl Default for Style {
    fn default() -> Self { Self::Pretty { indent: 2 } }
}

/// A text serializer that writes to any `Write` implementation.
#[derive(Debug)]
pub struct TextSerializer<W> {
    writer: W,
    style: Style,
    depth: usize,
    at_line_start: bool,
}

impl<W: Write> TextSerializer<W> {
    /// Create a new text serializer that writes to the given writer.
    pub const fn new(writer: W, style: Style) -> Self {
        Self { writer, style, depth: 0, at_line_start: true }
    }

    /// Returns the layout style of this serializer.
    pub const fn style(&self) -> Style { self.style }

    /// Returns the current block nesting depth.
    pub const fn depth(&self) -> usize { self.depth }

    /// Get a reference to the underlying writer.
    pub const fn writer(&self) -> &W { &self.writer }

    /// Consume the serializer and return the underlying writer without
    /// terminating the last line.
    pub fn into_inner(self) -> W { self.writer }

    /// Terminates the output with a newline if needed, flushes, and returns
    /// the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn finish(mut self) -> Result<W, Error> {
        if !self.at_line_start {
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;

        Ok(self.writer)
    }

    fn write_separator(&mut self) -> Result<(), Error> {
        if !self.at_line_start {
            self.writer.write_all(b" ")?;
        } else if let Style::Pretty { indent } = self.style {
            let width = indent * self.depth;
            write!(self.writer, "{:width$}", "")?;
        }

        Ok(())
    }
}

impl<W: Write> Serializer for TextSerializer<W> {
    fn emit_token(&mut self, token: &str) -> Result<(), Error> {
        debug_assert!(
            !token.is_empty()
                && !token.bytes().any(|x| x.is_ascii_whitespace()),
            "`{token}` is not a single token"
        );

        log::trace!("emitting token `{token}`");

        self.write_separator()?;
        self.writer.write_all(token.as_bytes())?;

        self.at_line_start = false;

        Ok(())
    }

    fn end_line(&mut self) -> Result<(), Error> {
        match self.style {
            Style::Pretty { .. } => {
                if !self.at_line_start {
                    self.writer.write_all(b"\n")?;
                    self.at_line_start = true;
                }
            }

            // the next token is separated by a space anyway
            Style::Compact => {}
        }

        Ok(())
    }

    fn begin_block(&mut self, name: &str) -> Result<(), Error> {
        self.emit_token(name)?;
        self.emit_token(OPEN_BLOCK)?;
        self.end_line()?;
        self.depth += 1;

        Ok(())
    }

    fn end_block(&mut self) -> Result<(), Error> {
        self.depth = self.depth.saturating_sub(1);
        self.emit_token(CLOSE_BLOCK)?;
        self.end_line()
    }
}

#[cfg(test)]
mod test;
