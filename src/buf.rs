use crate::bits::{hi_bit, sign_word, Word};

/// One input of a buffer primitive.
///
/// The primitives write their result into a caller-supplied `&mut [W]`. An input may be a
/// separate slice, or it may be the output buffer itself: `InPlace(n)` names the first `n`
/// words of the output. Each primitive reads every input word it still needs before it
/// overwrites that index, so `InPlace` operands are always safe. Offset aliasing (an input
/// starting somewhere inside the output) cannot be expressed.
///
/// An operand holds at least one word; the primitives panic on an empty one. An empty output
/// buffer is fine: nothing is written and the returned length is 0.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a, W: Word> {
    Words(&'a [W]),
    InPlace(usize),
}

impl<'a, W: Word> Operand<'a, W> {
    pub fn len(&self) -> usize {
        match self {
            Operand::Words(words) => words.len(),
            Operand::InPlace(len) => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub(crate) fn word(&self, out: &[W], i: usize) -> W {
        match self {
            Operand::Words(words) => words[i],
            Operand::InPlace(_) => out[i],
        }
    }

    // sign bit of the operand viewed as 'len' words (len <= self.len())
    #[inline]
    pub(crate) fn negative_at(&self, out: &[W], len: usize) -> bool {
        hi_bit(self.word(out, len - 1))
    }

    pub(crate) fn check(&self, out: &[W]) {
        assert!(!self.is_empty(), "Operand - empty operand");
        if let Operand::InPlace(len) = self {
            assert!(*len <= out.len(), "Operand - in-place length {len} exceeds buffer {}", out.len());
        }
    }
}

impl<'a, W: Word> From<&'a [W]> for Operand<'a, W> {
    fn from(words: &'a [W]) -> Self {
        Operand::Words(words)
    }
}

impl<'a, W: Word> From<&'a Vec<W>> for Operand<'a, W> {
    fn from(words: &'a Vec<W>) -> Self {
        Operand::Words(words.as_slice())
    }
}

// Number of words needed to represent the value in 'words' when every word above the buffer
// is 'sign'. Redundant top words equal to 'sign' are dropped; if that went one word too far
// (the new top word has the wrong sign bit) one word is put back.
pub fn minimal_len<W: Word>(words: &[W], sign: W) -> usize {
    let mut len = words.len();
    while len > 1 && words[len - 1] == sign {
        len -= 1;
    }
    if len < words.len() && hi_bit(words[len - 1]) != hi_bit(sign) {
        len += 1;
    }
    len
}

// Number of significant words of an unsigned value (at least one).
pub fn unsigned_len<W: Word>(words: &[W]) -> usize {
    let mut len = words.len();
    while len > 1 && words[len - 1] == W::ZERO {
        len -= 1;
    }
    len
}

// The sign-extension word of a two's complement buffer.
#[inline]
pub fn sign_of<W: Word>(words: &[W]) -> W {
    sign_word(hi_bit(words[words.len() - 1]))
}

pub fn is_zero<W: Word>(words: &[W]) -> bool {
    words.iter().all(|&w| w == W::ZERO)
}

// Fills out[stop..] with 'sign' and returns the minimal length of the whole buffer.
pub(crate) fn sign_extend_and_trim<W: Word>(out: &mut [W], stop: usize, sign: W) -> usize {
    out[stop..].fill(sign);
    minimal_len(out, sign)
}

// The common tail of every primitive: the first 'stop' words hold the (possibly truncated)
// result; extend its sign over the rest of the buffer and report the minimal length.
pub(crate) fn fit<W: Word>(out: &mut [W], stop: usize) -> usize {
    let sign = sign_of(&out[..stop]);
    sign_extend_and_trim(out, stop, sign)
}

// In-place two's complement negation: the lowest non-zero word is negated and every word
// above it is complemented. Zero stays zero.
pub(crate) fn negate_in_place<W: Word>(words: &mut [W]) {
    if let Some(low) = words.iter().position(|&w| w != W::ZERO) {
        words[low] = (!words[low]).wrapping_add(W::ONE);
        for w in words[low + 1..].iter_mut() {
            *w = !*w;
        }
    }
}
