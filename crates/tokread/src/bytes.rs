//! Delimiter classification.
//!
//! Only the four ASCII separators count; Unicode whitespace is token text.

#[inline]
pub(crate) const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
pub(crate) const fn is_line_break(b: u8) -> bool {
    matches!(b, b'\n' | b'\r')
}
