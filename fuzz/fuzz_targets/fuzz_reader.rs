#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tokread::{IntegerOverflow, ReadError, TokenReader};

#[derive(Debug, Arbitrary)]
enum Op {
    Int,
    Long,
    Double,
    Token,
    Line,
    IntArray(u8),
    IntMatrix(u8, u8),
    SkipWhitespace,
    SkipLineBreaks,
    Advance,
    AtEnd,
}

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    capacity: u8,
    step: u8,
    reject_overflow: bool,
    ops: Vec<Op>,
    data: &'a [u8],
}

/// Serves at most `step` bytes per read.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Outcome of one op, with errors reduced to something comparable.
#[derive(Debug, PartialEq)]
enum Outcome {
    Ints(Vec<Vec<i64>>),
    Double(u64),
    Text(String),
    Byte(u8),
    Bool(bool),
    Unit,
    Eof,
    Invalid(Vec<u8>),
}

fn outcome<T>(res: Result<T, ReadError>, f: impl FnOnce(T) -> Outcome) -> Outcome {
    match res {
        Ok(v) => f(v),
        Err(ReadError::EndOfInput) => Outcome::Eof,
        Err(ReadError::InvalidToken { token, .. }) => Outcome::Invalid(token.into()),
        Err(e) => panic!("unexpected error from an in-memory source: {e}"),
    }
}

fn run<R: Read>(reader: &mut TokenReader<R>, ops: &[Op]) -> Vec<Outcome> {
    let mut out = Vec::with_capacity(ops.len());
    for op in ops {
        let o = match op {
            Op::Int => outcome(reader.next_int(), |v| Outcome::Ints(vec![vec![v.into()]])),
            Op::Long => outcome(reader.next_long(), |v| Outcome::Ints(vec![vec![v]])),
            Op::Double => outcome(reader.next_double(), |v| Outcome::Double(v.to_bits())),
            Op::Token => outcome(reader.next_token(), Outcome::Text),
            Op::Line => outcome(reader.next_line(), Outcome::Text),
            Op::IntArray(n) => outcome(reader.next_int_array(usize::from(*n % 16)), |v| {
                Outcome::Ints(vec![v.into_iter().map(i64::from).collect()])
            }),
            Op::IntMatrix(r, c) => outcome(
                reader.next_int_matrix(usize::from(*r % 8), usize::from(*c % 8)),
                |m| {
                    Outcome::Ints(
                        m.into_iter()
                            .map(|row| row.into_iter().map(i64::from).collect())
                            .collect(),
                    )
                },
            ),
            Op::SkipWhitespace => outcome(reader.skip_whitespace(), |()| Outcome::Unit),
            Op::SkipLineBreaks => outcome(reader.skip_line_breaks(), |()| Outcome::Unit),
            Op::Advance => outcome(reader.advance(), Outcome::Byte),
            Op::AtEnd => outcome(reader.at_end(), Outcome::Bool),
        };
        let stop = matches!(o, Outcome::Invalid(_));
        out.push(o);
        // Cursor position after a failed read is unspecified.
        if stop {
            break;
        }
    }
    out
}

fuzz_target!(|input: Input<'_>| {
    let overflow = if input.reject_overflow {
        IntegerOverflow::Reject
    } else {
        IntegerOverflow::Wrap
    };

    let mut reference = TokenReader::builder(input.data)
        .integer_overflow(overflow)
        .build()
        .unwrap();
    let expected = run(&mut reference, &input.ops);

    let mut small = TokenReader::builder(Trickle {
        data: input.data,
        step: 1 + usize::from(input.step % 13),
    })
    .buffer_capacity(1 + usize::from(input.capacity % 32))
    .integer_overflow(overflow)
    .build()
    .unwrap();
    let got = run(&mut small, &input.ops);

    assert_eq!(expected, got);
});
