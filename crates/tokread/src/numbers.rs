//! Decimal digit accumulation for fixed-width integers.

use crate::{IntegerOverflow, TokenKind};

/// Fixed-width signed integer that a token can be read into.
pub(crate) trait Integer: Copy {
    const ZERO: Self;
    const KIND: TokenKind;

    /// `self * 10 + digit`, wrapping.
    fn wrapping_shift_add(self, digit: u8) -> Self;
    /// `self * 10 - digit`, or `None` on overflow.
    fn checked_shift_sub(self, digit: u8) -> Option<Self>;
    fn wrapping_neg(self) -> Self;
    fn checked_neg(self) -> Option<Self>;
}

macro_rules! impl_integer {
    ($($ty:ty => $kind:expr),* $(,)?) => {$(
        impl Integer for $ty {
            const ZERO: Self = 0;
            const KIND: TokenKind = $kind;

            #[inline]
            fn wrapping_shift_add(self, digit: u8) -> Self {
                self.wrapping_mul(10).wrapping_add(<$ty>::from(digit))
            }

            #[inline]
            fn checked_shift_sub(self, digit: u8) -> Option<Self> {
                self.checked_mul(10)?.checked_sub(<$ty>::from(digit))
            }

            #[inline]
            fn wrapping_neg(self) -> Self {
                <$ty>::wrapping_neg(self)
            }

            #[inline]
            fn checked_neg(self) -> Option<Self> {
                <$ty>::checked_neg(self)
            }
        }
    )*};
}

impl_integer! {
    i32 => TokenKind::Int,
    i64 => TokenKind::Long,
}

/// Running value of an integer token.
///
/// In [`IntegerOverflow::Reject`] mode the magnitude is accumulated as a
/// negative number so that `MIN` is reachable without overflowing.
pub(crate) struct Accumulator<T> {
    value: T,
    negative: bool,
    policy: IntegerOverflow,
    overflowed: bool,
}

impl<T: Integer> Accumulator<T> {
    pub(crate) fn new(negative: bool, policy: IntegerOverflow) -> Self {
        Self {
            value: T::ZERO,
            negative,
            policy,
            overflowed: false,
        }
    }

    /// Appends one decimal digit (`0..=9`). Returns `false` once the value
    /// has overflowed under [`IntegerOverflow::Reject`].
    #[inline]
    pub(crate) fn push(&mut self, digit: u8) -> bool {
        debug_assert!(digit < 10);
        match self.policy {
            IntegerOverflow::Wrap => {
                self.value = self.value.wrapping_shift_add(digit);
            }
            IntegerOverflow::Reject => match self.value.checked_shift_sub(digit) {
                Some(v) => self.value = v,
                None => self.overflowed = true,
            },
        }
        !self.overflowed
    }

    /// The signed result, or `None` if the value does not fit.
    pub(crate) fn finish(self) -> Option<T> {
        if self.overflowed {
            return None;
        }
        match (self.policy, self.negative) {
            (IntegerOverflow::Wrap, false) => Some(self.value),
            (IntegerOverflow::Wrap, true) => Some(self.value.wrapping_neg()),
            (IntegerOverflow::Reject, true) => Some(self.value),
            (IntegerOverflow::Reject, false) => self.value.checked_neg(),
        }
    }
}
