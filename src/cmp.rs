use std::cmp::Ordering;

use crate::bits::{hi_bit, sign_word, Word};
use crate::buf::{minimal_len, unsigned_len};

// Compares two buffers as values.
// signed: two's complement; operands of different sign are ordered by sign alone.
// unsigned: both buffers are plain magnitudes.
// After the sign check, redundant top words are ignored, so the buffers need not be minimal
// and need not have the same length.
pub fn cmp_buffers<W: Word>(a: &[W], b: &[W], signed: bool) -> Ordering {
    assert!(!a.is_empty() && !b.is_empty(), "cmp_buffers - empty operand");
    let a_neg = signed && hi_bit(a[a.len() - 1]);
    let b_neg = signed && hi_bit(b[b.len() - 1]);
    match (a_neg, b_neg) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    let (a_len, b_len) = if signed {
        (minimal_len(a, sign_word(a_neg)), minimal_len(b, sign_word(b_neg)))
    } else {
        (unsigned_len(a), unsigned_len(b))
    };
    if a_len != b_len {
        // a longer negative number has the larger magnitude
        let by_len = a_len.cmp(&b_len);
        return if a_neg { by_len.reverse() } else { by_len };
    }
    // same sign, same length: two's complement words order like unsigned words
    for i in (0..a_len).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

// Minimal buffers are equal exactly when they are identical.
pub fn eq_buffers<W: Word>(a: &[W], b: &[W]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
}
