//! A buffered tokenizer for whitespace-delimited numeric and text input.
//!
//! [`TokenReader`] wraps any [`std::io::Read`], pulls input in fixed-size
//! batches into a buffer it owns, and hands out typed tokens: `i32`, `i64`,
//! `f64`, lines, and arrays or matrices of those. Space, tab, carriage return
//! and line feed separate tokens; carriage return and line feed also end
//! lines.
//!
//! ```rust
//! use tokread::TokenReader;
//!
//! let input: &[u8] = b"1\n3 10\n1 2 5\n";
//! let mut reader = TokenReader::new(input)?;
//!
//! let cases = reader.next_int()?;
//! let (n, k) = (reader.next_int()?, reader.next_int()?);
//! let coins = reader.next_int_array(n as usize)?;
//!
//! assert_eq!((cases, k), (1, 10));
//! assert_eq!(coins, [1, 2, 5]);
//! assert!(reader.at_end()?);
//! # Ok::<(), tokread::ReadError>(())
//! ```
//!
//! Reads fail fast with [`ReadError`]; nothing is retried and no partial
//! token is returned.

mod bytes;
mod error;
mod numbers;
mod options;
mod output;
mod reader;

#[cfg(test)]
mod tests;

pub use error::{ReadError, Result, TokenKind};
pub use options::{DEFAULT_BUFFER_CAPACITY, IntegerOverflow, ReaderOptions};
pub use output::{Printer, measure};
pub use reader::{TokenReader, TokenReaderBuilder};
