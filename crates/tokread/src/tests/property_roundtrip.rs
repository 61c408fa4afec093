use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::utils::{quickcheck_tests, reader};

/// Property: the canonical decimal text of any `i32` reads back unchanged.
#[test]
fn int_roundtrip_quickcheck() {
    fn prop(value: i32) -> bool {
        reader(&value.to_string()).next_int().unwrap() == value
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(i32) -> bool);
}

/// Property: the canonical decimal text of any `i64` reads back unchanged.
#[test]
fn long_roundtrip_quickcheck() {
    fn prop(value: i64) -> bool {
        reader(&value.to_string()).next_long().unwrap() == value
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(i64) -> bool);
}

/// Property: finite floats survive `Display` followed by `next_double`.
#[quickcheck]
fn double_roundtrip(value: f64) -> bool {
    if !value.is_finite() {
        return true;
    }
    let got = reader(&value.to_string()).next_double().unwrap();
    got == value || (got == 0.0 && value == 0.0)
}

/// Property: a second `skip_whitespace` is a no-op.
#[quickcheck]
fn skip_whitespace_idempotent(prefix: Vec<u8>, tail: u8) -> bool {
    const WS: [u8; 4] = [b' ', b'\t', b'\r', b'\n'];
    let mut input: Vec<u8> = prefix.iter().map(|b| WS[usize::from(b % 4)]).collect();
    input.push(b'a' + tail % 26);
    let input = String::from_utf8(input).unwrap();

    let mut r = reader(&input);
    r.skip_whitespace().unwrap();
    let once = r.peek().unwrap();
    r.skip_whitespace().unwrap();
    once == r.peek().unwrap() && once == input.as_bytes()[input.len() - 1]
}

/// Property: arrays read exactly the values that were written, in order.
#[quickcheck]
fn int_array_roundtrip(values: Vec<i32>) -> bool {
    let text = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    let mut r = reader(&text);
    r.next_int_array(values.len()).unwrap() == values && r.at_end().unwrap()
}
