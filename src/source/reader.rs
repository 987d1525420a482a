use std::io::{self, ErrorKind, Read};

use super::{Chunk, ChunkedSource};

/// Adapts any [Read] into a [ChunkedSource].
///
/// `Ok(0)` on a non-empty region is end of data. An interrupted read is
/// reported as a zero-progress chunk and left to the drain's stall policy.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    size_hint: Option<usize>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            size_hint: None,
        }
    }

    /// Attach the number of bytes the reader is expected to yield.
    pub fn with_size_hint(mut self, size: usize) -> Self {
        self.size_hint = Some(size);
        self
    }
}

impl<R: Read> ChunkedSource for ReaderSource<R> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        if buf.is_empty() {
            return Ok(Chunk::More(0));
        }
        match self.inner.read(buf) {
            Ok(0) => Ok(Chunk::EndOfData),
            Ok(n) => {
                if let Some(hint) = self.size_hint.as_mut() {
                    *hint = hint.saturating_sub(n);
                }
                Ok(Chunk::More(n))
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => Ok(Chunk::More(0)),
            Err(e) => Err(e),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.size_hint
    }
}
