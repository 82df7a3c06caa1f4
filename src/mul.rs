use std::cmp::min;

use crate::add::add_buffers;
use crate::bits::{add_with_carry, hi_bit, mul_with_carry, sign_word, Word};
use crate::buf::{fit, Operand};

#[inline]
fn extended_word<W: Word>(op: &Operand<'_, W>, out: &[W], i: usize, ext: W) -> W {
    if i < op.len() {
        op.word(out, i)
    } else {
        ext
    }
}

// adds the scratch value into the window of the output that starts at its position.
// The scratch is unsigned; a zero word above it keeps its top bit from reading as a sign.
#[inline]
fn accumulate<W: Word>(window: &mut [W], scratch: &mut [W; 3]) {
    let len = window.len();
    let value = [scratch[0], scratch[1], scratch[2], W::ZERO];
    add_buffers(Operand::InPlace(len), Operand::Words(&value), false, window);
    *scratch = [W::ZERO; 3];
}

// a * b, written into 'out'.
// Grade school multiplication over the sign-extended operands: the product is exact modulo
// 2^(len * BITS), and a.len() + b.len() words always hold it in full.
// Output positions are resolved from the top down. Position 'idx' needs operand words at
// indices <= idx only, so the operands may live in the low words of 'out'.
pub fn mul_buffers<W: Word>(a: Operand<'_, W>, b: Operand<'_, W>, out: &mut [W]) -> usize {
    let len = out.len();
    if len == 0 {
        return 0;
    }
    a.check(out);
    b.check(out);

    let stop = min(a.len() + b.len(), len);
    let a_ext: W = sign_word(a.negative_at(out, a.len()));
    let b_ext: W = sign_word(b.negative_at(out, b.len()));

    for idx in (0..stop).rev() {
        // the only operand words at this index; read them before the slot is cleared
        let a_top = extended_word(&a, out, idx, a_ext);
        let b_top = extended_word(&b, out, idx, b_ext);
        out[idx] = W::ZERO;

        // [low, high, carries] of the column sum
        let mut scratch = [W::ZERO; 3];
        for j in 0..=idx {
            let x = if j == idx { a_top } else { extended_word(&a, out, j, a_ext) };
            let y = if j == 0 { b_top } else { extended_word(&b, out, idx - j, b_ext) };
            let hi = mul_with_carry(x, y, &mut scratch[0]);
            let (sum, c) = add_with_carry(scratch[1], hi, W::ZERO);
            scratch[1] = sum;
            scratch[2] = scratch[2].wrapping_add(c);
            // flush before the carry word can wrap
            if hi_bit(scratch[2]) {
                accumulate(&mut out[idx..stop], &mut scratch);
            }
        }
        accumulate(&mut out[idx..stop], &mut scratch);
    }
    fit(out, stop)
}
