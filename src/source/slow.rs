use std::io::{self, Read};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Chunk, ChunkedSource};

/// In-memory source that fragments its content on purpose.
///
/// The first byte is always handed out on its own; every read after that
/// hands out as much of the remaining tail as the caller's region holds. A
/// consumer therefore has to cope with a one-byte chunk followed by a large
/// one within the same run.
///
/// Each read runs as a single critical section over the position, so an
/// instance can be shared by reference (`&SlowSource` is a source as well):
/// every byte is handed out exactly once across all readers.
#[derive(Debug)]
pub struct SlowSource {
    contents: Vec<u8>,
    position: Mutex<usize>,
}

impl SlowSource {
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: contents.into(),
            position: Mutex::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Bytes handed out so far.
    pub fn position(&self) -> usize {
        *self.lock()
    }

    pub fn is_exhausted(&self) -> bool {
        self.position() == self.contents.len()
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // The guarded offset is only written once a copy has succeeded, so
        // a panicking reader cannot leave it inconsistent.
        self.position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read_shared(&self, buf: &mut [u8]) -> Chunk {
        let mut position = self.lock();
        let remaining = &self.contents[*position..];
        if remaining.is_empty() {
            return Chunk::EndOfData;
        }

        let want = if *position == 0 { 1 } else { remaining.len() };
        let n = want.min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        *position += n;
        log::trace!("slow source handed out {} bytes, now at {}", n, *position);
        Chunk::More(n)
    }
}

impl ChunkedSource for SlowSource {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        Ok(self.read_shared(buf))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.contents.len() - self.position())
    }
}

impl ChunkedSource for &SlowSource {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        Ok(self.read_shared(buf))
    }

    fn size_hint(&self) -> Option<usize> {
        (**self).size_hint()
    }
}

impl Read for &SlowSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_shared(buf) {
            Chunk::More(n) => Ok(n),
            Chunk::EndOfData => Ok(0),
        }
    }
}

impl Read for SlowSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (&*self).read(buf)
    }
}
