use std::convert::Infallible;

use crate::bits::Word;
use crate::errors::{AllocError, Error};

/// Supplies the word storage behind every allocating `BigInt` operation.
///
/// `allocate` hands out `len` zeroed words, `resize` grows or shrinks a buffer it handed out
/// (new words are zero), and `release` takes a buffer back. An operation that fails after
/// allocating releases what it holds before it returns the error.
pub trait WordAllocator<W: Word> {
    type Error: Into<Error>;

    fn allocate(&self, len: usize) -> Result<Vec<W>, Self::Error>;

    fn resize(&self, words: &mut Vec<W>, len: usize) -> Result<(), Self::Error>;

    fn release(&self, words: Vec<W>) {
        drop(words)
    }
}

/// The process heap, through `Vec`. Never fails; an exhausted heap aborts as it does for
/// any other `Vec`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Global;

impl<W: Word> WordAllocator<W> for Global {
    type Error = Infallible;

    fn allocate(&self, len: usize) -> Result<Vec<W>, Infallible> {
        Ok(vec![W::ZERO; len])
    }

    fn resize(&self, words: &mut Vec<W>, len: usize) -> Result<(), Infallible> {
        words.resize(len, W::ZERO);
        words.shrink_to_fit();
        Ok(())
    }
}

/// Refuses any buffer longer than `limit` words, and reports a failed heap allocation
/// instead of aborting.
#[derive(Clone, Copy, Debug)]
pub struct Limited {
    pub limit: usize,
}

impl Limited {
    pub fn new(limit: usize) -> Self {
        Limited { limit }
    }

    fn check(&self, requested: usize) -> Result<(), AllocError> {
        if requested > self.limit {
            log::error!("allocator - refuse {requested} words (limit {})", self.limit);
            return Err(AllocError { requested, limit: self.limit });
        }
        Ok(())
    }
}

impl<W: Word> WordAllocator<W> for Limited {
    type Error = AllocError;

    fn allocate(&self, len: usize) -> Result<Vec<W>, AllocError> {
        self.check(len)?;
        let mut words = Vec::new();
        words
            .try_reserve_exact(len)
            .map_err(|_| AllocError { requested: len, limit: self.limit })?;
        words.resize(len, W::ZERO);
        Ok(words)
    }

    fn resize(&self, words: &mut Vec<W>, len: usize) -> Result<(), AllocError> {
        self.check(len)?;
        if len > words.len() {
            words
                .try_reserve_exact(len - words.len())
                .map_err(|_| AllocError { requested: len, limit: self.limit })?;
        }
        words.resize(len, W::ZERO);
        words.shrink_to_fit();
        Ok(())
    }
}
