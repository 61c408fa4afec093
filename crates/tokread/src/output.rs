//! Output helpers for programs driven by a [`TokenReader`](crate::TokenReader).

use std::{
    fmt::Display,
    io::{self, BufWriter, Stdout, Write},
    time::Instant,
};

/// A line-oriented sink: each [`print`](Printer::print) writes one value and
/// a newline.
///
/// Output is buffered; it is flushed by [`flush`](Printer::flush) or when
/// the printer is dropped.
///
/// ```rust
/// use tokread::Printer;
///
/// let mut out = Printer::new(Vec::new());
/// out.print(42)?;
/// out.print("done")?;
/// assert_eq!(out.into_inner()?, b"42\ndone\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct Printer<W: Write> {
    out: BufWriter<W>,
}

impl Printer<Stdout> {
    /// A printer over the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Printer<W> {
    /// Wraps `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }

    /// Writes `value` followed by a line feed.
    ///
    /// # Errors
    ///
    /// Propagates write errors from the underlying writer.
    pub fn print(&mut self, value: impl Display) -> io::Result<()> {
        writeln!(self.out, "{value}")
    }

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Propagates write errors from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns the flush error, if any.
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(io::IntoInnerError::into_error)
    }
}

/// Runs `action`, then writes `Solve problem in : <seconds>s` to `out` and
/// returns the action's result.
///
/// Seconds are printed with millisecond resolution.
///
/// # Errors
///
/// Fails only if writing the timing line fails.
pub fn measure<T>(out: &mut impl Write, action: impl FnOnce() -> T) -> io::Result<T> {
    let start = Instant::now();
    let result = action();
    let millis = start.elapsed().as_millis();
    writeln!(out, "Solve problem in : {}s", format_seconds(millis))?;
    Ok(result)
}

fn format_seconds(millis: u128) -> String {
    let (secs, rem) = (millis / 1000, millis % 1000);
    if rem == 0 {
        return secs.to_string();
    }
    format!("{secs}.{rem:03}").trim_end_matches('0').to_owned()
}
