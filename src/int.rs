use std::cmp::{max, Ordering};
use std::convert::Infallible;
use std::fmt::{self, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitAnd, BitOr, BitXor, Mul, Neg, Not, Shl, Shr, Sub};
use std::str::FromStr;

use crate::add::{add_buffers, negate_buffers};
use crate::allocator::{Global, WordAllocator};
use crate::bits::{hi_bit, Word};
use crate::bitwise::{bitwise_buffers, complement_buffers, BitOp};
use crate::buf::{minimal_len, sign_of, Operand};
use crate::cmp::{cmp_buffers, eq_buffers};
use crate::dec::{decimal_capacity, from_decimal_to_buf, to_decimal, to_decimal_buf};
use crate::div::{div_buffers, DivLens};
use crate::errors::Error;
use crate::mul::mul_buffers;
use crate::shift::{shift_left_buffers, shift_right_buffers};
use crate::{hex, BigInt, IntStrCase, IntStrPadding};

// the operations backed by the global allocator cannot fail
fn infallible<T>(r: Result<T, Infallible>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => match e {},
    }
}

impl<W: Word> fmt::Display for BigInt<W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dec_str())
    }
}

impl<W: Word> fmt::Debug for BigInt<W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt{{width:{};sign:{:+};hex:{}}}", self.width(), self.signum(), self.hex_str(&IntStrCase::Upper, &IntStrPadding::Full))
    }
}

impl<W: Word> BigInt<W> {
    fn valid(&self) {
        #[cfg(any(debug_assertions, release_test))]
        {
            assert!(!self.words.is_empty(), "BigInt::valid - no words");
            assert_eq!(minimal_len(&self.words, sign_of(&self.words)), self.words.len(),
                       "BigInt::valid - redundant sign extension word");
        }
    }

    fn from_trimmed(words: Vec<W>) -> Self {
        let n = BigInt { words };
        n.valid();
        n
    }

    pub fn zero() -> Self {
        BigInt::from_trimmed(vec![W::ZERO])
    }

    pub fn one() -> Self {
        BigInt::from_trimmed(vec![W::ONE])
    }

    // reads any two's complement word buffer, least significant word first.
    // redundant sign words are dropped; an empty buffer is zero.
    pub fn from_le_words(mut words: Vec<W>) -> Self {
        if words.is_empty() {
            return BigInt::zero();
        }
        let len = minimal_len(&words, sign_of(&words));
        words.truncate(len);
        BigInt::from_trimmed(words)
    }

    pub fn words(&self) -> &[W] {
        &self.words
    }

    pub fn into_words(self) -> Vec<W> {
        self.words
    }

    // number of words
    pub fn width(&self) -> usize {
        self.valid();
        self.words.len()
    }

    pub fn is_zero(&self) -> bool {
        self.words.len() == 1 && self.words[0] == W::ZERO
    }

    pub fn is_negative(&self) -> bool {
        hi_bit(self.words[self.words.len() - 1])
    }

    pub fn signum(&self) -> i32 {
        match (self.is_negative(), self.is_zero()) {
            (true, _) => -1,
            (false, true) => 0,
            (false, false) => 1,
        }
    }

    fn operand(&self) -> Operand<'_, W> {
        Operand::Words(&self.words)
    }

    // Hands 'used' words of a buffer filled by a primitive over to a new BigInt, shrinking
    // the buffer first.
    fn finish<A: WordAllocator<W>>(alloc: &A, mut words: Vec<W>, used: usize) -> Result<Self, A::Error> {
        if used < words.len() {
            log::trace!("BigInt::finish - shrink {} words to {used}", words.len());
            if let Err(e) = alloc.resize(&mut words, used) {
                alloc.release(words);
                return Err(e);
            }
        }
        Ok(BigInt::from_trimmed(words))
    }

    // Every allocating operation: allocate 'len' words, which must be enough for the exact
    // result, let the primitive fill them, and keep the minimal part.
    fn build<A, F>(alloc: &A, len: usize, op: F) -> Result<Self, A::Error>
    where
        A: WordAllocator<W>,
        F: FnOnce(&mut [W]) -> usize,
    {
        let mut words = alloc.allocate(len)?;
        let used = op(&mut words);
        BigInt::finish(alloc, words, used)
    }

    pub fn add_in<A: WordAllocator<W>>(&self, rhs: &Self, alloc: &A) -> Result<Self, A::Error> {
        let len = max(self.words.len(), rhs.words.len()) + 1;
        BigInt::build(alloc, len, |out| add_buffers(self.operand(), rhs.operand(), false, out))
    }

    pub fn sub_in<A: WordAllocator<W>>(&self, rhs: &Self, alloc: &A) -> Result<Self, A::Error> {
        let len = max(self.words.len(), rhs.words.len()) + 1;
        BigInt::build(alloc, len, |out| add_buffers(self.operand(), rhs.operand(), true, out))
    }

    pub fn mul_in<A: WordAllocator<W>>(&self, rhs: &Self, alloc: &A) -> Result<Self, A::Error> {
        let len = self.words.len() + rhs.words.len();
        BigInt::build(alloc, len, |out| mul_buffers(self.operand(), rhs.operand(), out))
    }

    pub fn negate_in<A: WordAllocator<W>>(&self, alloc: &A) -> Result<Self, A::Error> {
        BigInt::build(alloc, self.words.len() + 1, |out| negate_buffers(self.operand(), out))
    }

    pub fn negate(&self) -> Self {
        infallible(self.negate_in(&Global))
    }

    pub fn complement_in<A: WordAllocator<W>>(&self, alloc: &A) -> Result<Self, A::Error> {
        BigInt::build(alloc, self.words.len(), |out| complement_buffers(self.operand(), out))
    }

    pub fn complement(&self) -> Self {
        infallible(self.complement_in(&Global))
    }

    pub fn bitwise_in<A: WordAllocator<W>>(&self, rhs: &Self, op: BitOp, alloc: &A) -> Result<Self, A::Error> {
        let len = max(self.words.len(), rhs.words.len());
        BigInt::build(alloc, len, |out| bitwise_buffers(self.operand(), rhs.operand(), op, out))
    }

    pub fn and_in<A: WordAllocator<W>>(&self, rhs: &Self, alloc: &A) -> Result<Self, A::Error> {
        self.bitwise_in(rhs, BitOp::And, alloc)
    }

    pub fn or_in<A: WordAllocator<W>>(&self, rhs: &Self, alloc: &A) -> Result<Self, A::Error> {
        self.bitwise_in(rhs, BitOp::Or, alloc)
    }

    pub fn xor_in<A: WordAllocator<W>>(&self, rhs: &Self, alloc: &A) -> Result<Self, A::Error> {
        self.bitwise_in(rhs, BitOp::Xor, alloc)
    }

    pub fn and(&self, rhs: &Self) -> Self {
        infallible(self.and_in(rhs, &Global))
    }

    pub fn or(&self, rhs: &Self) -> Self {
        infallible(self.or_in(rhs, &Global))
    }

    pub fn xor(&self, rhs: &Self) -> Self {
        infallible(self.xor_in(rhs, &Global))
    }

    pub fn shift_left_in<A: WordAllocator<W>>(&self, count: usize, alloc: &A) -> Result<Self, A::Error> {
        let len = self.words.len() + count / W::BITS as usize + 1;
        BigInt::build(alloc, len, |out| shift_left_buffers(self.operand(), count, out))
    }

    pub fn shift_left(&self, count: usize) -> Self {
        infallible(self.shift_left_in(count, &Global))
    }

    pub fn shift_right_in<A: WordAllocator<W>>(&self, count: usize, alloc: &A) -> Result<Self, A::Error> {
        BigInt::build(alloc, self.words.len(), |out| shift_right_buffers(self.operand(), count, out, true))
    }

    pub fn shift_right(&self, count: usize) -> Self {
        infallible(self.shift_right_in(count, &Global))
    }

    // Truncating division: the quotient rounds toward zero and the remainder takes the sign
    // of the dividend.
    pub fn div_rem_in<A: WordAllocator<W>>(&self, divisor: &Self, alloc: &A) -> Result<(Self, Self), Error> {
        // |q| <= |a| needs one word more than a (-128 / -1); |r| < |b| but the division
        // runs in the remainder buffer, which needs room for a shifted-in word and a sign word
        let mut q = alloc.allocate(self.words.len() + 1).map_err(Into::<Error>::into)?;
        let mut r = match alloc.allocate(divisor.words.len() + 2) {
            Ok(r) => r,
            Err(e) => {
                alloc.release(q);
                return Err(e.into());
            }
        };
        let DivLens { quotient, remainder } = match div_buffers(&self.words, &divisor.words, &mut q, &mut r) {
            Ok(lens) => lens,
            Err(e) => {
                alloc.release(q);
                alloc.release(r);
                return Err(e);
            }
        };
        let quotient = match BigInt::finish(alloc, q, quotient) {
            Ok(quotient) => quotient,
            Err(e) => {
                alloc.release(r);
                return Err(e.into());
            }
        };
        match BigInt::finish(alloc, r, remainder) {
            Ok(remainder) => Ok((quotient, remainder)),
            Err(e) => {
                alloc.release(quotient.into_words());
                Err(e.into())
            }
        }
    }

    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), Error> {
        self.div_rem_in(divisor, &Global)
    }

    pub fn div(&self, divisor: &Self) -> Result<Self, Error> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    pub fn rem(&self, divisor: &Self) -> Result<Self, Error> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    pub fn from_decimal_in<A: WordAllocator<W>>(text: &str, alloc: &A) -> Result<Self, Error> {
        let mut words = alloc.allocate(decimal_capacity::<W>(text.len())).map_err(Into::<Error>::into)?;
        let used = match from_decimal_to_buf(text, &mut words) {
            Ok(used) => used,
            Err(e) => {
                alloc.release(words);
                return Err(e);
            }
        };
        BigInt::finish(alloc, words, used).map_err(Into::<Error>::into)
    }

    pub fn from_decimal(text: &str) -> Result<Self, Error> {
        BigInt::from_decimal_in(text, &Global)
    }

    pub fn dec_str(&self) -> String {
        self.valid();
        to_decimal(&self.words)
    }

    // reads a word dump as produced by hex_str: "0x" and the two's complement words, most
    // significant first. The top hex digit is the sign only when the dump fills whole words.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        hex::le_words(s).map(BigInt::from_le_words)
    }

    pub fn hex_str(&self, fc: &IntStrCase, pad: &IntStrPadding) -> String {
        self.valid();
        let full = (W::BITS / 4) as usize;
        let mut s = "0x".to_string();
        for (i, &v) in self.words.iter().rev().enumerate() {
            let width = if i == 0 && *pad == IntStrPadding::Minimal { 0 } else { full };
            let digits = match fc {
                IntStrCase::Lower => format!("{v:0width$x}"),
                IntStrCase::Upper => format!("{v:0width$X}"),
            };
            s.push_str(&digits);
        }
        s
    }

    // the low word
    pub fn to_word(&self) -> W {
        self.words[0]
    }

    // the low word read as a signed integer
    pub fn to_signed_word(&self) -> W::Signed {
        self.words[0].to_signed()
    }

    // the low 128 bits in two's complement
    pub fn to_i128(&self) -> i128 {
        let sign = sign_of(&self.words);
        let mut v: u128 = 0;
        for i in (0..(128 / W::BITS) as usize).rev() {
            let w = self.words.get(i).copied().unwrap_or(sign);
            v = (v << W::BITS) | w.to_u128();
        }
        v as i128
    }

    // the low usize bits in two's complement
    pub fn to_usize(&self) -> usize {
        self.to_i128() as usize
    }

    // ToBuf forms: the exact result is sign-extended, or truncated, to out.len() words.
    // Each returns the minimal length of what it wrote.

    pub fn add_to_buf(&self, rhs: &Self, out: &mut [W]) -> usize {
        add_buffers(self.operand(), rhs.operand(), false, out)
    }

    pub fn sub_to_buf(&self, rhs: &Self, out: &mut [W]) -> usize {
        add_buffers(self.operand(), rhs.operand(), true, out)
    }

    pub fn mul_to_buf(&self, rhs: &Self, out: &mut [W]) -> usize {
        mul_buffers(self.operand(), rhs.operand(), out)
    }

    pub fn div_to_buf(&self, divisor: &Self, q: &mut [W], r: &mut [W]) -> Result<DivLens, Error> {
        div_buffers(&self.words, &divisor.words, q, r)
    }

    pub fn negate_to_buf(&self, out: &mut [W]) -> usize {
        negate_buffers(self.operand(), out)
    }

    pub fn complement_to_buf(&self, out: &mut [W]) -> usize {
        complement_buffers(self.operand(), out)
    }

    pub fn bitwise_to_buf(&self, rhs: &Self, op: BitOp, out: &mut [W]) -> usize {
        bitwise_buffers(self.operand(), rhs.operand(), op, out)
    }

    pub fn shift_left_to_buf(&self, count: usize, out: &mut [W]) -> usize {
        shift_left_buffers(self.operand(), count, out)
    }

    pub fn shift_right_to_buf(&self, count: usize, out: &mut [W]) -> usize {
        shift_right_buffers(self.operand(), count, out, true)
    }

    // decimal text as ASCII; a short buffer keeps the sign and the low digits
    pub fn dec_to_buf(&self, out: &mut [u8]) -> usize {
        to_decimal_buf(&self.words, out)
    }
}

impl<W: Word> Default for BigInt<W> {
    fn default() -> Self {
        BigInt::zero()
    }
}

impl<W: Word> PartialEq for BigInt<W> {
    fn eq(&self, n2: &Self) -> bool {
        eq_buffers(&self.words, &n2.words)
    }
}

impl<W: Word> Eq for BigInt<W> {}

impl<W: Word> Hash for BigInt<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.hash(state)
    }
}

impl<W: Word> PartialOrd for BigInt<W> {
    fn partial_cmp(&self, n2: &Self) -> Option<Ordering> {
        Some(self.cmp(n2))
    }
}

impl<W: Word> Ord for BigInt<W> {
    fn cmp(&self, n2: &Self) -> Ordering {
        cmp_buffers(&self.words, &n2.words, true)
    }
}

impl<W: Word> FromStr for BigInt<W> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        BigInt::from_decimal(s)
    }
}

impl<W: Word> From<i128> for BigInt<W> {
    fn from(v: i128) -> Self {
        let words = (0..128 / W::BITS)
            .map(|i| W::from_u128_truncated((v as u128) >> (i * W::BITS)))
            .collect();
        BigInt::from_le_words(words)
    }
}

impl<W: Word> From<u128> for BigInt<W> {
    fn from(v: u128) -> Self {
        let mut words: Vec<W> = (0..128 / W::BITS)
            .map(|i| W::from_u128_truncated(v >> (i * W::BITS)))
            .collect();
        // keeps the top bit of v from reading as a sign
        words.push(W::ZERO);
        BigInt::from_le_words(words)
    }
}

macro_rules! impl_from_native {
    ($($t:ty),*) => {$(
        impl<W: Word> From<$t> for BigInt<W> {
            fn from(v: $t) -> Self {
                BigInt::from(v as i128)
            }
        }
    )*};
}

impl_from_native!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_binary_op {
    ($($tr:ident, $method:ident, $with:ident);* $(;)?) => {$(
        impl<W: Word> $tr<&BigInt<W>> for &BigInt<W> {
            type Output = BigInt<W>;

            fn $method(self, rhs: &BigInt<W>) -> BigInt<W> {
                infallible(self.$with(rhs, &Global))
            }
        }

        impl<W: Word> $tr for BigInt<W> {
            type Output = BigInt<W>;

            fn $method(self, rhs: BigInt<W>) -> BigInt<W> {
                infallible(self.$with(&rhs, &Global))
            }
        }
    )*};
}

impl_binary_op!(
    Add, add, add_in;
    Sub, sub, sub_in;
    Mul, mul, mul_in;
    BitAnd, bitand, and_in;
    BitOr, bitor, or_in;
    BitXor, bitxor, xor_in;
);

impl<W: Word> Neg for &BigInt<W> {
    type Output = BigInt<W>;

    fn neg(self) -> BigInt<W> {
        self.negate()
    }
}

impl<W: Word> Neg for BigInt<W> {
    type Output = BigInt<W>;

    fn neg(self) -> BigInt<W> {
        self.negate()
    }
}

impl<W: Word> Not for &BigInt<W> {
    type Output = BigInt<W>;

    fn not(self) -> BigInt<W> {
        self.complement()
    }
}

impl<W: Word> Not for BigInt<W> {
    type Output = BigInt<W>;

    fn not(self) -> BigInt<W> {
        self.complement()
    }
}

impl<W: Word> Shl<usize> for &BigInt<W> {
    type Output = BigInt<W>;

    fn shl(self, count: usize) -> BigInt<W> {
        self.shift_left(count)
    }
}

impl<W: Word> Shl<usize> for BigInt<W> {
    type Output = BigInt<W>;

    fn shl(self, count: usize) -> BigInt<W> {
        self.shift_left(count)
    }
}

impl<W: Word> Shr<usize> for &BigInt<W> {
    type Output = BigInt<W>;

    fn shr(self, count: usize) -> BigInt<W> {
        self.shift_right(count)
    }
}

impl<W: Word> Shr<usize> for BigInt<W> {
    type Output = BigInt<W>;

    fn shr(self, count: usize) -> BigInt<W> {
        self.shift_right(count)
    }
}


#[cfg(not(debug_assertions))]
#[cfg(test)]
mod release {
    use crate::BigInt8;

    #[test]
    fn factorial_100() {
        let mut f = BigInt8::one();
        for i in 1..=100u32 {
            f = &f * &BigInt8::from(i);
        }
        let s = f.dec_str();
        assert_eq!(s.len(), 158);
        assert!(s.starts_with("93326215443944152681699238856266700490715968264381621468592963895217599993229915608941463976156518286253697920827223758251185210916864"));
        let mut g = f.clone();
        for i in (1..=100u32).rev() {
            g = g.div(&BigInt8::from(i)).unwrap();
        }
        assert_eq!(g, BigInt8::one());
    }
}
