/*
    Copyright 2024 M. Devi Prasad (dp@web3pleb.org)

    Licensed under the Apache License, Version 2.0 (the "License");
    you may not use this file except in compliance with the License.
    You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

use crate::bits::Word;
use crate::errors::Error;

pub fn val(c: u8) -> Result<u8, char> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(10 + c - b'a'),
        b'A'..=b'F' => Ok(10 + c - b'A'),
        _ => Err(c as char),
    }
}

// the hex digits of 's' as nibble values, most significant first
fn nibbles(s: &str) -> Result<Vec<u8>, Error> {
    let Some(digits) = s.strip_prefix("0x") else {
        log::error!("hex - reject {s:?}; hex string must start with '0x'");
        return Err(Error::MissingHexPrefix);
    };
    if digits.is_empty() {
        log::error!("hex - reject {s:?}; no digits");
        return Err(Error::Empty);
    }
    digits
        .bytes()
        .enumerate()
        .map(|(i, c)| {
            val(c).map_err(|_| {
                let offset = i + 2;
                // all bytes before 'offset' are ASCII hex digits
                let ch = s[offset..].chars().next().unwrap_or_default();
                log::error!("hex - reject {ch:?} at offset {offset}");
                Error::InvalidDigit { ch, offset }
            })
        })
        .collect()
}

// obtains the value of at most BITS/4 nibbles, most significant first
fn to_word<W: Word>(hc: &[u8]) -> W {
    debug_assert!(!hc.is_empty() && hc.len() <= (W::BITS / 4) as usize);
    hc.iter().fold(W::ZERO, |n, &v| n.lsh(4) | W::from_u8(v))
}

// creates a 'big-endian' vector of words.
// the hex str is treated as if prefixed with enough zeroes to make its length a multiple of
// the digits in a word.
pub fn be_words<W: Word>(s: &str) -> Result<Vec<W>, Error> {
    let per_word = (W::BITS / 4) as usize;
    let hex = nibbles(s)?;
    let pad = (per_word - hex.len() % per_word) % per_word;
    let mut padded = vec![0u8; pad];
    padded.extend_from_slice(&hex);
    Ok(padded.chunks(per_word).map(to_word).collect())
}

pub fn le_words<W: Word>(s: &str) -> Result<Vec<W>, Error> {
    let mut v = be_words(s)?;
    v.reverse();
    Ok(v)
}
