use std::io::Write;
use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;

pub fn init_logger(is_test: bool) {
    let _ = Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                     "{} [{}] - {}",
                     Local::now().format("%Y-%m-%dT%H:%M:%S"),
                     record.level(),
                     record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .is_test(is_test)
        .format_timestamp_secs()
        .try_init();
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IntStrPadding {
    // the leading word is printed without leading zeroes
    Minimal,
    // every word is printed at its full width
    Full,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IntStrCase {
    Lower,
    Upper,
}

// An arbitrary-precision integer.
// The value is held in two's complement, as a sequence of words stored in little-endian order.
// The sign is the top bit of the most significant word.
// Invariant: 'words' is never empty and is minimal; dropping the most significant word
// would change the value. All operations maintain this invariant.
#[derive(Clone)]
pub struct BigInt<W: Word = u64> {
    words: Vec<W>,
}

pub type BigInt8 = BigInt<u8>;
pub type BigInt16 = BigInt<u16>;
pub type BigInt32 = BigInt<u32>;
pub type BigInt64 = BigInt<u64>;

pub mod bits;
pub mod buf;
pub mod cmp;
pub mod add;
pub mod bitwise;
pub mod shift;
pub mod mul;
pub mod div;
pub mod dec;
pub mod hex;
pub mod allocator;
pub mod errors;
pub mod int;

pub use crate::allocator::{Global, Limited, WordAllocator};
pub use crate::bits::Word;
pub use crate::bitwise::BitOp;
pub use crate::buf::Operand;
pub use crate::div::DivLens;
pub use crate::errors::{AllocError, Error};
