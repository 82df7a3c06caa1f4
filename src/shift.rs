use std::cmp::min;

use crate::bits::{hi_n_bits, sign_word, Word};
use crate::buf::{fit, sign_extend_and_trim, Operand};

// a << amt, written into 'out'.
// The shift splits into whole words (low words of the result are zero) and a sub-word
// remainder, where each word receives the bits shifted out of the word below it.
// One word above the operand catches the bits that leave its top word; it stays only when it
// differs from plain sign extension. If the whole-word part alone reaches past 'out', the
// truncated result is zero.
pub fn shift_left_buffers<W: Word>(a: Operand<'_, W>, amt: usize, out: &mut [W]) -> usize {
    let len = out.len();
    if len == 0 {
        return 0;
    }
    a.check(out);
    let a_len = a.len();

    let sw = amt / W::BITS as usize;
    if sw >= len || (a_len == 1 && a.word(out, 0) == W::ZERO) {
        out.fill(W::ZERO);
        return 1;
    }
    let rem = (amt % W::BITS as usize) as u32;
    let sign: W = sign_word(a.negative_at(out, a_len));

    // index a_len + sw holds the overflow word
    let stop = min(a_len + sw + 1, len);
    // top down, so an in-place operand is read before its words are overwritten
    for i in (sw..stop).rev() {
        let j = i - sw;
        let cur = if j < a_len { a.word(out, j) } else { sign };
        let below = if j > 0 { hi_n_bits(a.word(out, j - 1), rem) } else { W::ZERO };
        out[i] = cur.lsh(rem) | below;
    }
    out[..sw].fill(W::ZERO);
    fit(out, stop)
}

// a >> amt, written into 'out'.
// signed: arithmetic shift, the vacated high bits copy the sign.
// unsigned: 'a' is a magnitude and zeroes are shifted in.
// When the whole-word part consumes the operand the result is the fill word alone.
pub fn shift_right_buffers<W: Word>(a: Operand<'_, W>, amt: usize, out: &mut [W], signed: bool) -> usize {
    let len = out.len();
    if len == 0 {
        return 0;
    }
    a.check(out);
    let a_len = a.len();

    let fill: W = sign_word(signed && a.negative_at(out, a_len));
    let sw = amt / W::BITS as usize;
    if sw >= a_len {
        out.fill(fill);
        return 1;
    }
    let rem = (amt % W::BITS as usize) as u32;

    let stop = min(a_len - sw, len);
    // bottom up: out[i] reads a[i + sw] and a[i + sw + 1], never a word already written
    for i in 0..stop {
        let j = i + sw;
        let next = if j + 1 < a_len { a.word(out, j + 1) } else { fill };
        out[i] = a.word(out, j).rsh(rem) | next.lsh(W::BITS - rem);
    }
    if signed {
        fit(out, stop)
    } else {
        sign_extend_and_trim(out, stop, W::ZERO)
    }
}
