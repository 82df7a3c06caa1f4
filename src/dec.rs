use std::cmp::min;

use crate::add::negate_buffers;
use crate::bits::{add_with_carry, hi_bit, hi_n_bits, Word};
use crate::buf::{fit, Operand};
use crate::errors::Error;

// Splits decimal text into its sign and digits, rejecting anything but an optional leading
// '-' followed by at least one ASCII digit.
fn decimal_digits(text: &str) -> Result<(bool, &[u8]), Error> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() {
        log::error!("dec - reject empty number {text:?}");
        return Err(Error::Empty);
    }
    if let Some(pos) = digits.bytes().position(|c| !c.is_ascii_digit()) {
        let offset = pos + negative as usize;
        // every byte before 'offset' is ASCII, so it is a char boundary
        let ch = text[offset..].chars().next().unwrap_or_default();
        log::error!("dec - reject {ch:?} at offset {offset} in {text:?}");
        return Err(Error::InvalidDigit { ch, offset });
    }
    Ok((negative, digits.as_bytes()))
}

// Words needed for a number of 'digits' decimal digits:
// ceil(log2(10) * digits / BITS) plus one word for the sign.
pub fn decimal_capacity<W: Word>(digits: usize) -> usize {
    (digits * 3322).div_ceil(1000 * W::BITS as usize) + 1
}

// Parses decimal text into 'out' and returns the minimal length.
// The magnitude is built as value = value * 10 + digit with 10x = 8x + 2x, carrying across
// every word. A negative value is negated at the end. Like every other ToBuf primitive the
// result is truncated to out.len() words.
pub fn from_decimal_to_buf<W: Word>(text: &str, out: &mut [W]) -> Result<usize, Error> {
    let (negative, digits) = decimal_digits(text)?;
    if out.is_empty() {
        return Ok(0);
    }
    out.fill(W::ZERO);
    for &d in digits {
        let mut carry = W::from_u8(d - b'0');
        for w in out.iter_mut() {
            // bits pushed out of the word by x << 3 and x << 1
            let spill = hi_n_bits(*w, 3).wrapping_add(hi_n_bits(*w, 1));
            let (sum, c) = add_with_carry(w.lsh(3), w.lsh(1), carry);
            *w = sum;
            carry = spill.wrapping_add(c);
        }
    }
    let len = out.len();
    if negative {
        Ok(negate_buffers(Operand::InPlace(len), out))
    } else {
        Ok(fit(out, len))
    }
}

// Double dabble. The BCD digits are kept one per byte, least significant first.
// Before every shift each digit >= 5 gets 3 added, so that doubling it carries into the next
// digit exactly when the decimal digit overflows.
fn double_dabble<W: Word>(words: impl Iterator<Item = W>) -> Vec<u8> {
    let mut bcd: Vec<u8> = vec![0];
    for w in words {
        for bit in (0..W::BITS).rev() {
            let mut carry = (w.rsh(bit) & W::ONE) == W::ONE;
            for d in bcd.iter_mut() {
                if *d >= 5 {
                    *d += 3;
                }
                let shifted = (*d << 1) | carry as u8;
                carry = shifted > 0x0F;
                *d = shifted & 0x0F;
            }
            if carry {
                bcd.push(1);
            }
        }
    }
    bcd
}

// The sign and the decimal digits (least significant first) of a two's complement buffer.
// A negative value is converted through its complement, ~x = -x - 1, and the missing one is
// added back in decimal. An empty buffer is zero.
fn decimal_of<W: Word>(words: &[W]) -> (bool, Vec<u8>) {
    let negative = words.last().is_some_and(|&w| hi_bit(w));
    let flip = |w: W| if negative { !w } else { w };
    let mut bcd = double_dabble(words.iter().rev().map(|&w| flip(w)));
    if negative {
        let mut carry = true;
        for d in bcd.iter_mut() {
            *d += 1;
            if *d < 10 {
                carry = false;
                break;
            }
            *d = 0;
        }
        if carry {
            bcd.push(1);
        }
    }
    while bcd.len() > 1 && bcd[bcd.len() - 1] == 0 {
        bcd.pop();
    }
    (negative, bcd)
}

pub fn to_decimal<W: Word>(words: &[W]) -> String {
    let (negative, bcd) = decimal_of(words);
    let mut s = String::with_capacity(bcd.len() + 1);
    if negative {
        s.push('-');
    }
    s.extend(bcd.iter().rev().map(|&d| char::from(b'0' + d)));
    s
}

// Writes the decimal text of 'words' as ASCII into 'out' and returns the number of bytes
// written. A '-' comes first for a negative value. When 'out' is too short the most
// significant digits are dropped and the low ones kept, the way the word buffers truncate.
pub fn to_decimal_buf<W: Word>(words: &[W], out: &mut [u8]) -> usize {
    if out.is_empty() {
        return 0;
    }
    let (negative, bcd) = decimal_of(words);
    let mut pos = 0;
    if negative {
        out[0] = b'-';
        pos = 1;
    }
    let count = min(bcd.len(), out.len() - pos);
    for &d in bcd[..count].iter().rev() {
        out[pos] = b'0' + d;
        pos += 1;
    }
    pos
}
