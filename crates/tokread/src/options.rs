/// Default buffer capacity in bytes (64 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 1 << 16;

/// How integer reads treat values that do not fit the target width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IntegerOverflow {
    /// Accumulate with two's-complement wraparound and never fail.
    ///
    /// `"4294967297"` read as an `i32` yields `1`.
    #[default]
    Wrap,
    /// Fail with [`ReadError::InvalidToken`](crate::ReadError::InvalidToken)
    /// as soon as the value leaves the target range.
    Reject,
}

/// Configuration options for [`TokenReader`](crate::TokenReader).
///
/// # Examples
///
/// ```rust
/// use tokread::{IntegerOverflow, ReaderOptions, TokenReader};
///
/// let options = ReaderOptions {
///     buffer_capacity: 4096,
///     integer_overflow: IntegerOverflow::Reject,
///     ..Default::default()
/// };
/// let mut reader = TokenReader::with_options(&b"2147483648"[..], options)?;
/// assert!(reader.next_int().is_err());
/// # Ok::<(), tokread::ReadError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderOptions {
    /// Size of the refill buffer, and therefore the largest batch requested
    /// from the stream in a single read. Must be positive.
    ///
    /// # Default
    ///
    /// [`DEFAULT_BUFFER_CAPACITY`]
    pub buffer_capacity: usize,

    /// Whether releasing the reader also closes (drops) the stream.
    ///
    /// When `false` the reader never runs the stream's destructor, not even
    /// when it is dropped. Take the stream back with
    /// [`TokenReader::into_inner`](crate::TokenReader::into_inner), or pass
    /// `&mut stream` so the caller keeps ownership; an owned stream that is
    /// never taken back is leaked rather than closed.
    ///
    /// # Default
    ///
    /// `true`
    pub close_on_drop: bool,

    /// Overflow behaviour of [`next_int`](crate::TokenReader::next_int) and
    /// [`next_long`](crate::TokenReader::next_long).
    ///
    /// # Default
    ///
    /// [`IntegerOverflow::Wrap`]
    pub integer_overflow: IntegerOverflow,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            close_on_drop: true,
            integer_overflow: IntegerOverflow::Wrap,
        }
    }
}
