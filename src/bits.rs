use std::fmt;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, Not};

// A fixed-width unsigned word. Every buffer routine in this crate is generic over it,
// so the same engine runs on 8, 16, 32 and 64-bit words.
pub trait Word:
    Copy + Default + Eq + Ord + Hash + fmt::Debug + fmt::LowerHex + fmt::UpperHex
    + Not<Output = Self> + BitAnd<Output = Self> + BitOr<Output = Self> + BitXor<Output = Self>
    + Send + Sync + 'static
{
    // the signed integer of the same width
    type Signed: Copy + fmt::Debug + fmt::Display + Eq + Ord;

    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    fn overflowing_add(self, rhs: Self) -> (Self, bool);
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    // shifts by BITS or more produce zero instead of overflowing
    fn lsh(self, n: u32) -> Self;
    fn rsh(self, n: u32) -> Self;
    fn from_u8(v: u8) -> Self;
    // keeps the low BITS bits of v
    fn from_u128_truncated(v: u128) -> Self;
    fn to_u128(self) -> u128;
    fn to_signed(self) -> Self::Signed;
}

macro_rules! impl_word {
    ($($t:ty => $s:ty),* $(,)?) => {$(
        impl Word for $t {
            type Signed = $s;

            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                <$t>::overflowing_add(self, rhs)
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn lsh(self, n: u32) -> Self {
                self.checked_shl(n).unwrap_or(0)
            }

            #[inline]
            fn rsh(self, n: u32) -> Self {
                self.checked_shr(n).unwrap_or(0)
            }

            #[inline]
            fn from_u8(v: u8) -> Self {
                v as $t
            }

            #[inline]
            fn from_u128_truncated(v: u128) -> Self {
                v as $t
            }

            #[inline]
            fn to_u128(self) -> u128 {
                self as u128
            }

            #[inline]
            fn to_signed(self) -> $s {
                self as $s
            }
        }
    )*};
}

impl_word!(u8 => i8, u16 => i16, u32 => i32, u64 => i64);

// The sign bit (most significant bit) of a word.
#[inline]
pub fn hi_bit<W: Word>(w: W) -> bool {
    w.rsh(W::BITS - 1) == W::ONE
}

// The word that sign-extends a value whose sign bit is 'negative'.
#[inline]
pub fn sign_word<W: Word>(negative: bool) -> W {
    if negative {
        W::MAX
    } else {
        W::ZERO
    }
}

// The 'n' most significant bits of a word, moved down to the bottom. n == 0 yields zero.
#[inline]
pub fn hi_n_bits<W: Word>(w: W, n: u32) -> W {
    w.rsh(W::BITS - n)
}

// A mask of the 'n' least significant bits.
#[inline]
pub fn low_mask<W: Word>(n: u32) -> W {
    W::MAX.rsh(W::BITS - n)
}

// add_with_carry calculates: sum = x + y + carry.
// Unlike a two-operand add, the carry_in may be any word, so the carry_out is 0, 1 or 2.
pub fn add_with_carry<W: Word>(x: W, y: W, carry: W) -> (/* sum */ W, /* carry_out */ W) {
    let (xy, o1) = x.overflowing_add(y);
    let (sum, o2) = xy.overflowing_add(carry);
    (sum, W::from_u8(o1 as u8 + o2 as u8))
}

// mul_with_carry adds the double-word product x * y into 'acc' and returns the high word
// together with the carry out of that addition.
// The product is assembled from half-word pieces (FOIL), so no double-width type is needed:
// (xh + xl)(yh + yl) = xh*yh + xh*yl + xl*yh + xl*yl
pub fn mul_with_carry<W: Word>(x: W, y: W, acc: &mut W) -> W {
    let half = W::BITS / 2;
    let mask = low_mask::<W>(half);
    let (x_hi, x_lo) = (x.rsh(half), x & mask);
    let (y_hi, y_lo) = (y.rsh(half), y & mask);

    // half-word products always fit in a word
    let mut carry = x_hi.wrapping_mul(y_hi);
    for cross in [x_hi.wrapping_mul(y_lo), x_lo.wrapping_mul(y_hi)] {
        carry = carry.wrapping_add(cross.rsh(half));
        let (sum, c) = add_with_carry(*acc, cross.lsh(half), W::ZERO);
        *acc = sum;
        carry = carry.wrapping_add(c);
    }
    let (sum, c) = add_with_carry(*acc, x_lo.wrapping_mul(y_lo), W::ZERO);
    *acc = sum;
    carry.wrapping_add(c)
}
