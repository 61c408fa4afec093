use std::{
    cell::Cell,
    io::{self, Read},
    rc::Rc,
};

use crate::{ReaderOptions, TokenReader};

/// Serves at most `step` bytes per `read` call, so that tokens straddle
/// refills regardless of buffer capacity.
#[derive(Debug)]
pub struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
    pub reads: usize,
}

impl<'a> Trickle<'a> {
    pub fn new(data: &'a [u8], step: usize) -> Self {
        assert!(step > 0);
        Self {
            data,
            step,
            reads: 0,
        }
    }
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Fails with `Interrupted` before every successful read.
#[derive(Debug)]
pub struct Interrupting<'a> {
    data: &'a [u8],
    interrupt_next: bool,
}

impl<'a> Interrupting<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            interrupt_next: true,
        }
    }
}

impl Read for Interrupting<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let next = !self.interrupt_next;
        if std::mem::replace(&mut self.interrupt_next, next) {
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.data.read(buf)
    }
}

/// Serves `data`, then fails every later read.
#[derive(Debug)]
pub struct Broken<'a> {
    pub data: &'a [u8],
}

impl Read for Broken<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::other("stream broke"));
        }
        self.data.read(buf)
    }
}

/// Counts how many times it has been dropped.
#[derive(Debug)]
pub struct DropCounter<'a> {
    pub data: &'a [u8],
    pub drops: Rc<Cell<usize>>,
}

impl Read for DropCounter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl Drop for DropCounter<'_> {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

pub fn reader(input: &str) -> TokenReader<&[u8]> {
    TokenReader::new(input.as_bytes()).unwrap()
}

pub fn small_reader(input: &str, capacity: usize) -> TokenReader<&[u8]> {
    TokenReader::with_options(
        input.as_bytes(),
        ReaderOptions {
            buffer_capacity: capacity,
            ..Default::default()
        },
    )
    .unwrap()
}

/// Number of quickcheck iterations, scaled up on CI.
pub fn quickcheck_tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}
