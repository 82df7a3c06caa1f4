use std::cmp::Ordering;

use crate::add::{add_buffers, negate_buffers};
use crate::bits::{hi_bit, low_mask, Word};
use crate::buf::{is_zero, minimal_len, negate_in_place, sign_of, unsigned_len, Operand};
use crate::cmp::cmp_buffers;
use crate::errors::Error;
use crate::shift::{shift_left_buffers, shift_right_buffers};

/// Significant lengths of the quotient and remainder buffers after a division.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivLens {
    pub quotient: usize,
    pub remainder: usize,
}

// |words| as a non-negative buffer, one word longer than the input so that the magnitude of
// the most negative value still has a clear sign bit.
fn magnitude<W: Word>(words: &[W]) -> Vec<W> {
    let mut mag = vec![W::ZERO; words.len() + 1];
    if hi_bit(words[words.len() - 1]) {
        negate_buffers(Operand::Words(words), &mut mag);
    } else {
        mag[..words.len()].copy_from_slice(words);
    }
    mag
}

// Finds the largest digit d with d * divisor <= rem, and leaves rem - d * divisor in 'rem'.
// Walks the powers of two from the top: rem >> s is compared with the divisor, and a match
// subtracts divisor << s. The s bits shifted out are put back afterwards.
// rem < divisor << BITS on entry, so the digit fits in one word.
fn divide_step<W: Word>(rem: &mut [W], divisor: &[W]) -> W {
    if cmp_buffers(rem, divisor, false) == Ordering::Less {
        return W::ZERO;
    }
    let len = rem.len();
    let mut digit = W::ZERO;
    for s in (0..W::BITS).rev() {
        let low = rem[0] & low_mask(s);
        shift_right_buffers(Operand::InPlace(len), s as usize, rem, false);
        if cmp_buffers(rem, divisor, false) != Ordering::Less {
            add_buffers(Operand::InPlace(len), Operand::Words(divisor), true, rem);
            digit = digit | W::ONE.lsh(s);
        }
        shift_left_buffers(Operand::InPlace(len), s as usize, rem);
        rem[0] = rem[0] | low;
    }
    digit
}

// Unsigned long division, one dividend word at a time from the top. The accumulator 'rem'
// is shifted up a word, takes the next dividend word at the bottom, and yields one quotient
// digit. Digits above q.len() are dropped.
fn long_divide<W: Word>(dividend: &[W], divisor: &[W], q: &mut [W], rem: &mut [W]) {
    let len = rem.len();
    for i in (0..unsigned_len(dividend)).rev() {
        rem.copy_within(..len - 1, 1);
        rem[0] = dividend[i];
        let digit = divide_step(rem, divisor);
        if i < q.len() {
            q[i] = digit;
        }
    }
}

// a / b and a % b, truncating toward zero: the remainder takes the sign of the dividend.
// Both results follow the ToBuf contract and are cut to the length of their buffers. A
// remainder buffer too short to run the division in is backed by a temporary one.
pub fn div_buffers<W: Word>(a: &[W], b: &[W], q: &mut [W], r: &mut [W]) -> Result<DivLens, Error> {
    assert!(!a.is_empty() && !b.is_empty(), "div_buffers - empty operand");
    if is_zero(b) {
        log::warn!("div_buffers - division by zero (dividend of {} words)", a.len());
        return Err(Error::DivisionByZero);
    }
    let a_neg = hi_bit(a[a.len() - 1]);
    let b_neg = hi_bit(b[b.len() - 1]);
    let dividend = magnitude(a);
    let divisor = magnitude(b);
    let divisor = &divisor[..unsigned_len(&divisor) + 1];
    // the accumulator stays below divisor << BITS, plus a clear sign word
    let need = divisor.len() + 1;

    q.fill(W::ZERO);
    if r.len() >= need {
        r.fill(W::ZERO);
        long_divide(&dividend, divisor, q, &mut r[..need]);
    } else {
        let mut tmp = vec![W::ZERO; need];
        long_divide(&dividend, divisor, q, &mut tmp);
        let r_len = r.len();
        r.copy_from_slice(&tmp[..r_len]);
    }

    if a_neg != b_neg {
        negate_in_place(q);
    }
    if a_neg {
        negate_in_place(r);
    }
    Ok(DivLens {
        quotient: result_len(q),
        remainder: result_len(r),
    })
}

// an empty result buffer holds no words
fn result_len<W: Word>(words: &[W]) -> usize {
    if words.is_empty() {
        0
    } else {
        minimal_len(words, sign_of(words))
    }
}
