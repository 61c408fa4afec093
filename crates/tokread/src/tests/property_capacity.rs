use quickcheck::{Arbitrary, Gen, QuickCheck};

use super::utils::{Trickle, quickcheck_tests};
use crate::{ReaderOptions, TokenReader};

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Int(i32),
    Long(i64),
    Double(f64),
    Line(String),
}

impl Arbitrary for Item {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 4 {
            0 => Item::Int(i32::arbitrary(g)),
            1 => Item::Long(i64::arbitrary(g)),
            2 => {
                let v = f64::arbitrary(g);
                Item::Double(if v.is_finite() { v } else { 0.5 })
            }
            _ => {
                let words = Vec::<u16>::arbitrary(g);
                let line = words
                    .iter()
                    .map(|w| format!("w{w}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                Item::Line(format!("#{line}"))
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Document {
    items: Vec<Item>,
    separators: Vec<u8>,
}

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        Document {
            items: Vec::arbitrary(g),
            separators: Vec::arbitrary(g),
        }
    }
}

impl Document {
    /// Renders every item followed by a separator. Lines always end in a
    /// line break; other tokens use any whitespace.
    fn render(&self) -> String {
        const SEPARATORS: [&str; 6] = [" ", "\t", "\n", "\r\n", "  \n ", "\n\n"];
        let mut out = String::new();
        for (i, item) in self.items.iter().enumerate() {
            let sep = self
                .separators
                .get(i)
                .map_or(" ", |s| SEPARATORS[usize::from(*s) % SEPARATORS.len()]);
            match item {
                Item::Int(v) => out.push_str(&v.to_string()),
                Item::Long(v) => out.push_str(&v.to_string()),
                Item::Double(v) => out.push_str(&v.to_string()),
                Item::Line(v) => {
                    out.push('\n');
                    out.push_str(v);
                    out.push('\n');
                    continue;
                }
            }
            out.push_str(sep);
        }
        out
    }

    fn read_back<R: std::io::Read>(&self, r: &mut TokenReader<R>) -> Vec<Item> {
        self.items
            .iter()
            .map(|item| match item {
                Item::Int(_) => Item::Int(r.next_int().unwrap()),
                Item::Long(_) => Item::Long(r.next_long().unwrap()),
                Item::Double(_) => Item::Double(r.next_double().unwrap()),
                Item::Line(_) => {
                    r.skip_whitespace().unwrap();
                    Item::Line(r.next_line().unwrap())
                }
            })
            .collect()
    }
}

/// Property: the same document reads back identically for every buffer
/// capacity and every stream chunking, including tokens split across
/// refills.
#[test]
fn capacity_independence_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, capacity: u8, step: u8) -> bool {
        let text = doc.render();
        let capacity = 1 + usize::from(capacity % 16);
        let step = 1 + usize::from(step % 7);

        let mut reference = TokenReader::new(text.as_bytes()).unwrap();
        let expected = doc.read_back(&mut reference);
        if expected != doc.items {
            return false;
        }

        let mut small = TokenReader::with_options(
            Trickle::new(text.as_bytes(), step),
            ReaderOptions {
                buffer_capacity: capacity,
                ..Default::default()
            },
        )
        .unwrap();
        let got = doc.read_back(&mut small);
        small.skip_whitespace().unwrap();
        got == expected && small.at_end().unwrap()
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Document, u8, u8) -> bool);
}

#[test]
fn every_capacity_reads_the_same() {
    let text = "17 -4000000000 2.5\nfirst line\n  -99\n\nlast line";
    for capacity in 1..=text.len() + 1 {
        let mut r = TokenReader::builder(text.as_bytes())
            .buffer_capacity(capacity)
            .build()
            .unwrap();
        assert_eq!(r.next_int().unwrap(), 17, "capacity {capacity}");
        assert_eq!(r.next_long().unwrap(), -4_000_000_000, "capacity {capacity}");
        assert!((r.next_double().unwrap() - 2.5).abs() < f64::EPSILON);
        assert_eq!(r.next_line().unwrap(), "first line", "capacity {capacity}");
        assert_eq!(r.next_int().unwrap(), -99, "capacity {capacity}");
        assert_eq!(r.next_line().unwrap(), "last line", "capacity {capacity}");
        assert!(r.at_end().unwrap());
    }
}
