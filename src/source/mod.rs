//! Sources that hand out bytes in chunks of unpredictable size.

use std::io;

mod reader;
mod slow;

pub use reader::ReaderSource;
pub use slow::SlowSource;

/// Outcome of a single successful read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk {
    /// `n` bytes were written at the start of the caller's region. More data
    /// may follow even if `n` is smaller than the region.
    More(usize),
    /// Nothing left. Written bytes: none.
    EndOfData,
}

/// A capability yielding data in possibly short chunks, terminated by an
/// explicit [Chunk::EndOfData].
///
/// Callers must pass a non-empty `buf`. While data remains, an implementation
/// writes at least one byte into `buf` and reports how many; once exhausted it
/// keeps reporting [Chunk::EndOfData]. Anything else that stops it from
/// producing data is reported as an `Err`, a fault.
pub trait ChunkedSource {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk>;

    /// Number of bytes still expected, if known. Only used to pre-size buffers.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

impl<S: ChunkedSource + ?Sized> ChunkedSource for &mut S {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        (**self).read_chunk(buf)
    }

    fn size_hint(&self) -> Option<usize> {
        (**self).size_hint()
    }
}

impl<S: ChunkedSource + ?Sized> ChunkedSource for Box<S> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        (**self).read_chunk(buf)
    }

    fn size_hint(&self) -> Option<usize> {
        (**self).size_hint()
    }
}
