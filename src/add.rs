use std::cmp::{max, min};

use crate::bits::{add_with_carry, hi_bit, sign_word, Word};
use crate::bitwise::complement_buffers;
use crate::buf::{fit, Operand};

// Two's complement addition (or subtraction, when 'negate_b' is set) of two buffers of any
// length, written into 'out'.
//
// The operands behave as if sign-extended (or truncated) to out.len() words. When the
// operands do not overflow their own width the sum is exact; when they do and 'out' has room,
// one more word is produced from the two sign extensions and the final carry. When 'out' is
// too short the result is the two's complement truncation and the full length is returned.
// Returns the minimal number of words that represent the result.
pub fn add_buffers<W: Word>(a: Operand<'_, W>, b: Operand<'_, W>, negate_b: bool, out: &mut [W]) -> usize {
    let len = out.len();
    if len == 0 {
        return 0;
    }
    a.check(out);
    b.check(out);

    // when to stop storing the result, assuming no overflow
    let mut stop = min(max(a.len(), b.len()), len);
    // when to start sign extending the shorter operand
    let up_to = min(min(a.len(), b.len()), len);
    let a_len = min(a.len(), stop);
    let b_len = min(b.len(), stop);
    let a_neg = a.negative_at(out, a_len);
    let b_neg = b.negative_at(out, b_len);

    // -b = ~b + 1: complement every word of b and start with a carry of one
    let flip = |w: W| if negate_b { !w } else { w };
    let a_ext: W = sign_word(a_neg);
    let b_ext: W = flip(sign_word(b_neg));
    let mut carry = if negate_b { W::ONE } else { W::ZERO };

    for i in 0..up_to {
        let (sum, c) = add_with_carry(a.word(out, i), flip(b.word(out, i)), carry);
        out[i] = sum;
        carry = c;
    }
    // leftovers from a with the sign extension of b
    for i in up_to..a_len {
        let (sum, c) = add_with_carry(a.word(out, i), b_ext, carry);
        out[i] = sum;
        carry = c;
    }
    // leftovers from b with the sign extension of a
    for i in max(up_to, a_len)..b_len {
        let (sum, c) = add_with_carry(a_ext, flip(b.word(out, i)), carry);
        out[i] = sum;
        carry = c;
    }

    // Overflow occurs iff the two addends have the same sign and the sign of the sum differs.
    // The sign of -b is the flipped sign of b.
    let addend_neg = b_neg != negate_b;
    let overflowed = a_neg == addend_neg && a_neg != hi_bit(out[stop - 1]);
    if overflowed && stop < len {
        // keep the carry that two's complement arithmetic normally drops
        out[stop] = add_with_carry(a_ext, b_ext, carry).0;
        stop += 1;
    }
    // e.g. 128 + -1 = 0x00_80 + 0xff = 0x00_7f = 0x7f
    fit(out, stop)
}

// -a = ~a + 1
pub fn negate_buffers<W: Word>(a: Operand<'_, W>, out: &mut [W]) -> usize {
    complement_buffers(a, out);
    let len = out.len();
    add_buffers(Operand::InPlace(len), Operand::Words(&[W::ONE]), false, out)
}

#[cfg(test)]
mod add_test {
    use crate::add::{add_buffers, negate_buffers};
    use crate::buf::Operand::{InPlace, Words};

    fn init() {
        crate::init_logger(true)
    }

    #[test]
    fn add_overflow_extends() {
        init();
        // 127 + 1
        let mut out = [0u8; 2];
        let n = add_buffers(Words(&[0x7F]), Words(&[0x01]), false, &mut out);
        assert_eq!((n, out), (2, [0x80, 0x00]));
        // truncated to a single word it wraps around like i8
        let mut out = [0u8; 1];
        let n = add_buffers(Words(&[0x7F]), Words(&[0x01]), false, &mut out);
        assert_eq!((n, out), (1, [0x80]));
        // -128 + -1
        let mut out = [0u8; 3];
        let n = add_buffers(Words(&[0x80]), Words(&[0xFF]), false, &mut out);
        assert_eq!(n, 2);
        assert_eq!(out, [0x7F, 0xFF, 0xFF]);
    }

    #[test]
    fn add_trims_result() {
        init();
        // 128 + -1 = 127
        let mut out = [0xAAu8; 3];
        let n = add_buffers(Words(&[0x80, 0x00]), Words(&[0xFF]), false, &mut out);
        assert_eq!(n, 1);
        assert_eq!(out, [0x7F, 0x00, 0x00]);
        // 5 + -5
        let mut out = [0u16; 2];
        let n = add_buffers(Words(&[5]), Words(&[0xFFFB]), false, &mut out);
        assert_eq!((n, out), (1, [0, 0]));
        // mismatched lengths, b longer: 1 + 0x0100
        let mut out = [0u8; 3];
        let n = add_buffers(Words(&[0x01]), Words(&[0x00, 0x01]), false, &mut out);
        assert_eq!((n, out), (2, [0x01, 0x01, 0x00]));
    }

    #[test]
    fn sub_buffers() {
        init();
        // 0 - (-128) = 128
        let mut out = [0u8; 2];
        let n = add_buffers(Words(&[0x00]), Words(&[0x80]), true, &mut out);
        assert_eq!((n, out), (2, [0x80, 0x00]));
        // -128 - 0
        let mut out = [0u8; 2];
        let n = add_buffers(Words(&[0x80]), Words(&[0x00]), true, &mut out);
        assert_eq!((n, out), (1, [0x80, 0xFF]));
        // 3 - 0x0100 = -253
        let mut out = [0u8; 3];
        let n = add_buffers(Words(&[0x03]), Words(&[0x00, 0x01]), true, &mut out);
        assert_eq!((n, out), (2, [0x03, 0xFF, 0xFF]));
        // 1000 - 1000
        let mut out = [7u32; 2];
        let n = add_buffers(Words(&[1000]), Words(&[1000]), true, &mut out);
        assert_eq!((n, out), (1, [0, 0]));
    }

    #[test]
    fn add_in_place() {
        init();
        // the output buffer holds a on entry
        let mut buf = [0x05u8, 0x00, 0x00];
        let n = add_buffers(InPlace(1), Words(&[0x7E]), false, &mut buf);
        assert_eq!((n, buf), (2, [0x83, 0x00, 0x00]));
        // both operands alias the output: x + x
        let mut buf = [0x40u8, 0x00];
        let n = add_buffers(InPlace(1), InPlace(1), false, &mut buf);
        assert_eq!((n, buf), (2, [0x80, 0x00]));
        // x - x
        let mut buf = [0x12u8, 0x34, 0x00];
        let n = add_buffers(InPlace(2), InPlace(2), true, &mut buf);
        assert_eq!((n, buf), (1, [0, 0, 0]));
    }

    #[test]
    fn negate() {
        init();
        let mut out = [0u8; 2];
        let n = negate_buffers(Words(&[0x80]), &mut out);
        assert_eq!((n, out), (2, [0x80, 0x00]));
        let mut out = [0u8; 1];
        let n = negate_buffers(Words(&[0x80]), &mut out);
        assert_eq!((n, out), (1, [0x80]));
        let mut out = [0u8; 2];
        let n = negate_buffers(Words(&[0x00]), &mut out);
        assert_eq!((n, out), (1, [0x00, 0x00]));
        let mut out = [0x01u16, 0x00];
        let n = negate_buffers(InPlace(1), &mut out);
        assert_eq!((n, out), (1, [0xFFFF, 0xFFFF]));
    }

    #[test]
    fn add_empty_output() {
        init();
        assert_eq!(add_buffers(Words(&[0x7Fu8]), Words(&[0x01]), false, &mut []), 0);
        assert_eq!(add_buffers(Words(&[0x7Fu8]), Words(&[0x01]), true, &mut []), 0);
        assert_eq!(negate_buffers(Words(&[0x80u16]), &mut []), 0);
    }

    #[test]
    #[should_panic(expected = "Operand - empty operand")]
    fn add_empty_operand() {
        init();
        let mut out = [0u8; 2];
        add_buffers(Words(&[]), Words(&[0x01]), false, &mut out);
    }
}
