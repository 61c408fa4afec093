use core::fmt;
use std::io;

use bstr::BString;
use thiserror::Error;

/// Result alias used by every [`TokenReader`](crate::TokenReader) read.
pub type Result<T, E = ReadError> = core::result::Result<T, E>;

/// The shape of token a read was expecting when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A 32-bit signed integer.
    Int,
    /// A 64-bit signed integer.
    Long,
    /// A floating-point literal.
    Double,
    /// A line of text.
    Line,
    /// Any whitespace-delimited token.
    Text,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Int => "int",
            TokenKind::Long => "long",
            TokenKind::Double => "double",
            TokenKind::Line => "line",
            TokenKind::Text => "text",
        })
    }
}

/// Errors produced while reading tokens.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadError {
    /// A byte was required but the stream has no more data.
    #[error("unexpected end of input")]
    EndOfInput,
    /// The token text does not match the expected lexical grammar.
    #[error("invalid {expected} token \"{token}\"")]
    InvalidToken {
        /// The offending token text, as far as it was read.
        token: BString,
        /// What the read was expecting.
        expected: TokenKind,
    },
    /// The underlying stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// A buffer of zero bytes was requested.
    #[error("buffer capacity must be positive")]
    InvalidCapacity,
}

impl ReadError {
    pub(crate) fn invalid(token: impl Into<BString>, expected: TokenKind) -> Self {
        ReadError::InvalidToken {
            token: token.into(),
            expected,
        }
    }

    /// Returns `true` for [`ReadError::EndOfInput`].
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ReadError::EndOfInput)
    }
}
