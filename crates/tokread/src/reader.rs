//! `TokenReader`: a fixed buffer over a byte stream, refilled on demand.
//!
//! Invariants
//! - `0 <= pos <= len <= buf.len()`; bytes in `buf[pos..len]` are the
//!   unconsumed lookahead.
//! - A refill only happens once `pos == len`, and always overwrites the buffer
//!   from index 0.
//! - A token read also consumes the delimiter that ended it, with `"\r\n"`
//!   counting as one delimiter. Input whose last token is followed by a
//!   single line terminator is at end-of-input once that token has been read.
//! - Release runs at most once. After it, the buffer is freed and every refill
//!   reports end-of-input.
//! - The stream's destructor runs only when `close_on_drop` is set, or after
//!   the caller takes it back with `into_inner`.

use std::{
    fmt,
    fs::File,
    io::{self, Read, Stdin},
    path::Path,
};

use tracing::{debug, trace};

use crate::{
    IntegerOverflow, ReadError, ReaderOptions, Result, TokenKind,
    bytes::{is_line_break, is_whitespace},
    numbers::{Accumulator, Integer},
};

/// Buffered tokenizer over any [`Read`] implementation.
///
/// See the [crate documentation](crate) for an overview.
pub struct TokenReader<R> {
    buf: Box<[u8]>,
    len: usize,
    pos: usize,
    /// Token text under construction, reused across reads.
    scratch: Vec<u8>,
    options: ReaderOptions,
    source: Option<R>,
    released: bool,
}

impl<R: Read> TokenReader<R> {
    /// Creates a reader with [`ReaderOptions::default`] and performs the
    /// initial fill.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Io`] if the initial read fails.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_options(reader, ReaderOptions::default())
    }

    /// Returns a [`TokenReaderBuilder`] for configuring a new reader.
    pub fn builder(reader: R) -> TokenReaderBuilder<R> {
        TokenReaderBuilder {
            reader,
            options: ReaderOptions::default(),
        }
    }

    /// Creates a reader with explicit options and performs the initial fill.
    ///
    /// An empty stream is not an error here; the first typed read reports it.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::InvalidCapacity`] for a zero
    /// [`buffer_capacity`](ReaderOptions::buffer_capacity) and
    /// [`ReadError::Io`] if the initial read fails.
    pub fn with_options(reader: R, options: ReaderOptions) -> Result<Self> {
        if options.buffer_capacity == 0 {
            return Err(ReadError::InvalidCapacity);
        }
        debug!(
            capacity = options.buffer_capacity,
            close_on_drop = options.close_on_drop,
            overflow = ?options.integer_overflow,
            "creating token reader"
        );
        let mut this = Self {
            buf: vec![0; options.buffer_capacity].into_boxed_slice(),
            len: 0,
            pos: 0,
            scratch: Vec::new(),
            options,
            source: Some(reader),
            released: false,
        };
        this.try_refill()?;
        Ok(this)
    }

    /// Whether unconsumed bytes remain in the buffer. Never touches the
    /// stream.
    #[inline]
    #[must_use]
    pub fn has_buffered(&self) -> bool {
        self.pos < self.len
    }

    /// Refills the buffer if it is exhausted and reports whether any byte is
    /// now available.
    ///
    /// This is the only place the reader blocks on the stream. While bytes
    /// are still buffered it returns `Ok(true)` without reading.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Io`] if the stream fails. Interrupted reads are
    /// retried.
    pub fn try_refill(&mut self) -> Result<bool> {
        if self.has_buffered() {
            return Ok(true);
        }
        self.pos = 0;
        self.len = 0;
        if self.released {
            return Ok(false);
        }
        let Some(source) = self.source.as_mut() else {
            return Ok(false);
        };
        let read = loop {
            match source.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        };
        trace!(bytes = read, "refilled token buffer");
        self.len = read;
        Ok(read > 0)
    }

    /// `true` when nothing is buffered and a refill yields no bytes.
    ///
    /// Unlike [`has_buffered`](Self::has_buffered) this may read from the
    /// stream.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Io`] if the refill fails.
    pub fn at_end(&mut self) -> Result<bool> {
        Ok(!self.try_refill()?)
    }

    /// The byte under the cursor, or `None` at end-of-input.
    #[inline]
    fn current(&mut self) -> Result<Option<u8>> {
        if self.try_refill()? {
            Ok(Some(self.buf[self.pos]))
        } else {
            Ok(None)
        }
    }

    /// Returns the byte under the cursor without consuming it.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfInput`] if the stream is exhausted.
    pub fn peek(&mut self) -> Result<u8> {
        self.current()?.ok_or(ReadError::EndOfInput)
    }

    /// Returns the byte under the cursor and moves past it.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfInput`] if the stream is exhausted.
    pub fn advance(&mut self) -> Result<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Ok(b)
    }

    /// Consumes bytes while `pred` holds, across refills. Stops silently at
    /// end-of-input.
    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) -> Result<()> {
        while self.try_refill()? {
            let run = self.buf[self.pos..self.len]
                .iter()
                .take_while(|&&b| pred(b))
                .count();
            self.pos += run;
            if self.has_buffered() {
                break;
            }
        }
        Ok(())
    }

    /// Moves bytes into `scratch` while `pred` holds, across refills. Returns
    /// the number of bytes taken.
    fn collect_while(&mut self, pred: impl Fn(u8) -> bool) -> Result<usize> {
        let mut taken = 0;
        while self.try_refill()? {
            let run = self.buf[self.pos..self.len]
                .iter()
                .take_while(|&&b| pred(b))
                .count();
            self.scratch
                .extend_from_slice(&self.buf[self.pos..self.pos + run]);
            self.pos += run;
            taken += run;
            if self.has_buffered() {
                break;
            }
        }
        Ok(taken)
    }

    /// Consumes the delimiter that stopped the last [`collect_while`], if
    /// any.
    ///
    /// [`collect_while`]: Self::collect_while
    fn consume_delimiter(&mut self) -> Result<()> {
        if !self.has_buffered() {
            return Ok(());
        }
        let delimiter = self.buf[self.pos];
        self.pos += 1;
        self.consume_crlf_tail(delimiter)
    }

    /// After a consumed `\r`, also consumes a following `\n`, refilling if
    /// the pair straddles two reads.
    fn consume_crlf_tail(&mut self, delimiter: u8) -> Result<()> {
        if delimiter == b'\r' && self.current()? == Some(b'\n') {
            self.pos += 1;
        }
        Ok(())
    }

    /// Skips spaces, tabs, carriage returns and line feeds. Reaching
    /// end-of-input is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Io`] if a refill fails.
    pub fn skip_whitespace(&mut self) -> Result<()> {
        self.skip_while(is_whitespace)
    }

    /// Skips carriage returns and line feeds only.
    ///
    /// This skips *leading* line breaks; it does not jump to the end of the
    /// current line.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Io`] if a refill fails.
    pub fn skip_line_breaks(&mut self) -> Result<()> {
        self.skip_while(is_line_break)
    }

    fn next_integer<T: Integer>(&mut self) -> Result<T> {
        self.skip_whitespace()?;
        self.scratch.clear();
        let negative = match self.current()? {
            None => return Err(ReadError::EndOfInput),
            Some(b'-') => {
                self.pos += 1;
                self.scratch.push(b'-');
                true
            }
            Some(_) => false,
        };

        let mut acc = Accumulator::<T>::new(negative, self.options.integer_overflow);
        let mut digits = 0usize;
        while let Some(b) = self.current()? {
            self.pos += 1;
            if is_whitespace(b) {
                self.consume_crlf_tail(b)?;
                break;
            }
            self.scratch.push(b);
            if !b.is_ascii_digit() || !acc.push(b - b'0') {
                return Err(ReadError::invalid(self.scratch.as_slice(), T::KIND));
            }
            digits += 1;
        }

        if digits == 0 {
            return Err(ReadError::invalid(self.scratch.as_slice(), T::KIND));
        }
        acc.finish()
            .ok_or_else(|| ReadError::invalid(self.scratch.as_slice(), T::KIND))
    }

    /// Reads the next token as an `i32`.
    ///
    /// The token is an optional `-` followed by ASCII digits; the delimiter
    /// after it (a whole `\r\n` pair) is consumed too. Values outside the `i32` range wrap unless
    /// [`IntegerOverflow::Reject`] is configured.
    ///
    /// # Errors
    ///
    /// - [`ReadError::EndOfInput`] if only whitespace remains.
    /// - [`ReadError::InvalidToken`] on a non-digit, a bare `-`, or a
    ///   rejected overflow.
    pub fn next_int(&mut self) -> Result<i32> {
        self.next_integer()
    }

    /// Reads the next token as an `i64`. Same grammar as
    /// [`next_int`](Self::next_int).
    ///
    /// # Errors
    ///
    /// As for [`next_int`](Self::next_int).
    pub fn next_long(&mut self) -> Result<i64> {
        self.next_integer()
    }

    /// Accumulates the next whitespace-delimited token into `scratch`.
    fn scan_token(&mut self) -> Result<()> {
        self.skip_whitespace()?;
        self.scratch.clear();
        if self.collect_while(|b| !is_whitespace(b))? == 0 {
            return Err(ReadError::EndOfInput);
        }
        self.consume_delimiter()
    }

    /// Reads the next token as an `f64`.
    ///
    /// Parsing is locale independent: `.` is the only decimal separator.
    /// Exponents and the other literals accepted by [`str::parse`] for `f64`
    /// are allowed.
    ///
    /// # Errors
    ///
    /// - [`ReadError::EndOfInput`] if only whitespace remains.
    /// - [`ReadError::InvalidToken`] if the token is not a float literal.
    pub fn next_double(&mut self) -> Result<f64> {
        self.scan_token()?;
        core::str::from_utf8(&self.scratch)
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .ok_or_else(|| ReadError::invalid(self.scratch.as_slice(), TokenKind::Double))
    }

    /// Reads the next whitespace-delimited token as text.
    ///
    /// # Errors
    ///
    /// - [`ReadError::EndOfInput`] if only whitespace remains.
    /// - [`ReadError::InvalidToken`] if the token is not valid UTF-8.
    pub fn next_token(&mut self) -> Result<String> {
        self.scan_token()?;
        self.scratch_to_string(TokenKind::Text)
    }

    /// Reads the next line, without its terminator.
    ///
    /// Leading line breaks are skipped first, so blank lines are never
    /// returned. At end-of-input this returns an empty string instead of
    /// failing.
    ///
    /// # Errors
    ///
    /// - [`ReadError::InvalidToken`] if the line is not valid UTF-8.
    /// - [`ReadError::Io`] if a refill fails.
    pub fn next_line(&mut self) -> Result<String> {
        self.skip_line_breaks()?;
        if self.at_end()? {
            return Ok(String::new());
        }
        self.scratch.clear();
        self.collect_while(|b| !is_line_break(b))?;
        self.consume_delimiter()?;
        self.scratch_to_string(TokenKind::Line)
    }

    fn scratch_to_string(&self, kind: TokenKind) -> Result<String> {
        core::str::from_utf8(&self.scratch)
            .map(str::to_owned)
            .map_err(|_| ReadError::invalid(self.scratch.as_slice(), kind))
    }

    /// Reads `size` integers with [`next_int`](Self::next_int).
    ///
    /// # Errors
    ///
    /// The first error from an element read.
    pub fn next_int_array(&mut self, size: usize) -> Result<Vec<i32>> {
        (0..size).map(|_| self.next_int()).collect()
    }

    /// Reads `size` integers with [`next_long`](Self::next_long).
    ///
    /// # Errors
    ///
    /// The first error from an element read.
    pub fn next_long_array(&mut self, size: usize) -> Result<Vec<i64>> {
        (0..size).map(|_| self.next_long()).collect()
    }

    /// Reads `size` floats with [`next_double`](Self::next_double).
    ///
    /// # Errors
    ///
    /// The first error from an element read.
    pub fn next_double_array(&mut self, size: usize) -> Result<Vec<f64>> {
        (0..size).map(|_| self.next_double()).collect()
    }

    /// Reads a `rows` x `cols` matrix of `i32`, row by row.
    ///
    /// # Errors
    ///
    /// The first error from an element read.
    pub fn next_int_matrix(&mut self, rows: usize, cols: usize) -> Result<Vec<Vec<i32>>> {
        (0..rows).map(|_| self.next_int_array(cols)).collect()
    }

    /// Reads a `rows` x `cols` matrix of `i64`, row by row.
    ///
    /// # Errors
    ///
    /// The first error from an element read.
    pub fn next_long_matrix(&mut self, rows: usize, cols: usize) -> Result<Vec<Vec<i64>>> {
        (0..rows).map(|_| self.next_long_array(cols)).collect()
    }
}

impl<R> TokenReader<R> {
    /// The options this reader was built with.
    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Capacity of the refill buffer in bytes (zero after release).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Whether [`close`](Self::close) has run, explicitly or not.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// A reference to the stream, if it has not been closed.
    #[must_use]
    pub fn get_ref(&self) -> Option<&R> {
        self.source.as_ref()
    }

    /// Releases the reader now instead of at drop.
    ///
    /// The buffer is freed, and the stream is dropped if
    /// [`close_on_drop`](ReaderOptions::close_on_drop) is set. Otherwise it
    /// stays untouched until [`into_inner`](Self::into_inner). Calling it
    /// again does nothing. Later reads see end-of-input.
    pub fn close(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.buf = Box::default();
        self.len = 0;
        self.pos = 0;
        if self.options.close_on_drop {
            drop(self.source.take());
            debug!("token reader released, stream closed");
        } else {
            debug!("token reader released, stream left open");
        }
    }

    /// Unwraps the reader and returns the stream, discarding any buffered
    /// bytes.
    ///
    /// Returns `None` if the stream was already closed by
    /// [`close`](Self::close).
    pub fn into_inner(mut self) -> Option<R> {
        self.released = true;
        self.source.take()
    }
}

impl<R> fmt::Debug for TokenReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenReader")
            .field("capacity", &self.buf.len())
            .field("len", &self.len)
            .field("pos", &self.pos)
            .field("options", &self.options)
            .field("open", &self.source.is_some())
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

impl<R> Drop for TokenReader<R> {
    fn drop(&mut self) {
        self.close();
        // Still here only when `close_on_drop` is unset: never close it.
        if let Some(source) = self.source.take() {
            std::mem::forget(source);
        }
    }
}

impl TokenReader<File> {
    /// Opens `path` for reading. The file is closed when the reader is
    /// released.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Io`] if the file cannot be opened or read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening token input");
        let file = File::open(path)?;
        Self::with_options(file, ReaderOptions::default())
    }
}

impl TokenReader<Stdin> {
    /// Reads from the process's standard input, which is never closed by
    /// the reader. Standard input is locked only for the duration of each
    /// refill.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Io`] if the initial read fails.
    pub fn stdin() -> Result<Self> {
        Self::with_options(
            io::stdin(),
            ReaderOptions {
                close_on_drop: false,
                ..ReaderOptions::default()
            },
        )
    }
}

/// A builder for a [`TokenReader`] with custom options.
#[must_use]
#[derive(Debug)]
pub struct TokenReaderBuilder<R> {
    reader: R,
    options: ReaderOptions,
}

impl<R: Read> TokenReaderBuilder<R> {
    /// Sets the refill buffer capacity in bytes.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.options.buffer_capacity = capacity;
        self
    }

    /// Sets whether releasing the reader closes the stream.
    pub fn close_on_drop(mut self, close: bool) -> Self {
        self.options.close_on_drop = close;
        self
    }

    /// Sets the overflow policy for integer reads.
    pub fn integer_overflow(mut self, policy: IntegerOverflow) -> Self {
        self.options.integer_overflow = policy;
        self
    }

    /// Replaces every option at once.
    pub fn options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the reader and performs the initial fill.
    ///
    /// # Errors
    ///
    /// As for [`TokenReader::with_options`].
    pub fn build(self) -> Result<TokenReader<R>> {
        TokenReader::with_options(self.reader, self.options)
    }
}
