use std::cmp::{max, min};

use crate::bits::{sign_word, Word};
use crate::buf::{fit, Operand};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitOp {
    And,
    Or,
    Xor,
}

impl BitOp {
    #[inline]
    pub fn apply<W: Word>(self, x: W, y: W) -> W {
        match self {
            BitOp::And => x & y,
            BitOp::Or => x | y,
            BitOp::Xor => x ^ y,
        }
    }
}

// Applies 'op' word by word to the sign-extended operands.
// No overflow is possible, but the result may still need fewer words (e.g. 0x00_80 & 0x7f).
pub fn bitwise_buffers<W: Word>(a: Operand<'_, W>, b: Operand<'_, W>, op: BitOp, out: &mut [W]) -> usize {
    let len = out.len();
    if len == 0 {
        return 0;
    }
    a.check(out);
    b.check(out);

    let stop = min(max(a.len(), b.len()), len);
    let a_len = min(a.len(), stop);
    let b_len = min(b.len(), stop);
    let a_ext: W = sign_word(a.negative_at(out, a_len));
    let b_ext: W = sign_word(b.negative_at(out, b_len));
    for i in 0..stop {
        let x = if i < a_len { a.word(out, i) } else { a_ext };
        let y = if i < b_len { b.word(out, i) } else { b_ext };
        out[i] = op.apply(x, y);
    }
    fit(out, stop)
}

// ~a, sign-extended over the whole buffer.
pub fn complement_buffers<W: Word>(a: Operand<'_, W>, out: &mut [W]) -> usize {
    if out.is_empty() {
        return 0;
    }
    a.check(out);
    let stop = min(a.len(), out.len());
    for i in 0..stop {
        out[i] = !a.word(out, i);
    }
    fit(out, stop)
}
