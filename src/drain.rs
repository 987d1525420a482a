use std::num::NonZeroUsize;

use crate::buffer::GrowableBuffer;
use crate::errors::DrainError;
use crate::source::{Chunk, ChunkedSource};

pub const DEFAULT_SCRATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(512) {
    Some(size) => size,
    None => panic!("scratch size must be non-zero"),
};
pub const DEFAULT_MAX_STALLS: usize = 16;

/// Largest size hint honoured when pre-sizing the result.
const MAX_PREALLOCATION: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainConfig {
    /// Size of the region offered to the source on every read.
    pub scratch_size: NonZeroUsize,
    /// Consecutive zero-progress reads tolerated before giving up.
    pub max_stalls: usize,
    /// Upper bound on the assembled content, if any.
    pub max_len: Option<usize>,
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            scratch_size: DEFAULT_SCRATCH_SIZE,
            max_stalls: DEFAULT_MAX_STALLS,
            max_len: None,
        }
    }
}

/// Content assembled by a drain together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drained {
    pub bytes: Vec<u8>,
    /// Number of `read_chunk` calls issued, the final one included.
    pub reads: usize,
    /// Number of times the result buffer had to grow.
    pub reallocations: usize,
}

/// Reads a [ChunkedSource] to exhaustion.
#[derive(Debug, Clone, Default)]
pub struct Drainer {
    config: DrainConfig,
}

impl Drainer {
    pub fn new(config: DrainConfig) -> Self {
        Self { config }
    }

    /// Pull chunks from `source` until it reports end of data.
    ///
    /// Faults abort the drain: whatever was collected is dropped and only the
    /// error is returned. A run of more than `max_stalls` zero-progress reads
    /// is reported as [DrainError::Stalled].
    pub fn drain<S>(&self, source: &mut S) -> Result<Drained, DrainError>
    where
        S: ChunkedSource + ?Sized,
    {
        let mut scratch = vec![0u8; self.config.scratch_size.get()];
        let mut buffer = match source.size_hint() {
            Some(hint) => {
                let hint = self
                    .config
                    .max_len
                    .map_or(hint, |limit| hint.min(limit));
                GrowableBuffer::with_capacity(hint.min(MAX_PREALLOCATION))
            }
            None => GrowableBuffer::new(),
        };
        let mut reads = 0;
        let mut stalls = 0;

        loop {
            reads += 1;
            match source.read_chunk(&mut scratch)? {
                Chunk::EndOfData => break,
                Chunk::More(0) => {
                    stalls += 1;
                    log::trace!("read {} made no progress ({} in a row)", reads, stalls);
                    if stalls > self.config.max_stalls {
                        return Err(DrainError::Stalled { attempts: stalls });
                    }
                }
                Chunk::More(n) if n > scratch.len() => {
                    return Err(DrainError::ProtocolViolation {
                        written: n,
                        requested: scratch.len(),
                    });
                }
                Chunk::More(n) => {
                    stalls = 0;
                    if let Some(limit) = self.config.max_len {
                        if buffer.len() + n > limit {
                            return Err(DrainError::TooLarge { limit });
                        }
                    }
                    buffer.extend_from_slice(&scratch[..n]);
                    log::trace!("read {} got {} bytes, {} total", reads, n, buffer.len());
                }
            }
        }

        log::debug!(
            "drained {} bytes in {} reads ({} reallocations)",
            buffer.len(),
            reads,
            buffer.reallocations()
        );
        let reallocations = buffer.reallocations();
        Ok(Drained {
            bytes: buffer.into_inner(),
            reads,
            reallocations,
        })
    }
}

/// Drain `source` with the default configuration and return its content.
pub fn drain_all<S>(source: &mut S) -> Result<Vec<u8>, DrainError>
where
    S: ChunkedSource + ?Sized,
{
    Drainer::default()
        .drain(source)
        .map(|drained| drained.bytes)
}
