#![allow(dead_code)]

use std::io;

use chunkdrain::{Chunk, ChunkedSource};
use rand::prelude::*;

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}

/// Hands out at most `chunk` bytes per read.
pub struct FixedChunks {
    contents: Vec<u8>,
    position: usize,
    chunk: usize,
}

impl FixedChunks {
    pub fn new(contents: &[u8], chunk: usize) -> Self {
        assert!(chunk > 0);
        Self {
            contents: contents.to_vec(),
            position: 0,
            chunk,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl ChunkedSource for FixedChunks {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        let remaining = &self.contents[self.position..];
        if remaining.is_empty() {
            return Ok(Chunk::EndOfData);
        }
        let n = remaining.len().min(self.chunk).min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(Chunk::More(n))
    }
}

/// Hands out chunks of random length between 1 and the region size.
pub struct RandomChunks {
    contents: Vec<u8>,
    position: usize,
    rng: StdRng,
}

impl RandomChunks {
    pub fn new(contents: &[u8], seed: u64) -> Self {
        Self {
            contents: contents.to_vec(),
            position: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ChunkedSource for RandomChunks {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        let remaining = &self.contents[self.position..];
        if remaining.is_empty() {
            return Ok(Chunk::EndOfData);
        }
        let most = remaining.len().min(buf.len());
        let n = self.rng.gen_range(1..=most);
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(Chunk::More(n))
    }
}

/// Wraps a source and fails once `fail_after` bytes went through.
pub struct FaultAfter<S> {
    inner: S,
    delivered: usize,
    fail_after: usize,
}

impl<S> FaultAfter<S> {
    pub fn new(inner: S, fail_after: usize) -> Self {
        Self {
            inner,
            delivered: 0,
            fail_after,
        }
    }
}

impl<S: ChunkedSource> ChunkedSource for FaultAfter<S> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        if self.delivered >= self.fail_after {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "backing medium failed",
            ));
        }
        let chunk = self.inner.read_chunk(buf)?;
        if let Chunk::More(n) = chunk {
            self.delivered += n;
        }
        Ok(chunk)
    }
}

/// Reports `stalls` zero-progress reads before every real one.
pub struct Stuttering<S> {
    inner: S,
    stalls: usize,
    pending: usize,
}

impl<S> Stuttering<S> {
    pub fn new(inner: S, stalls: usize) -> Self {
        Self {
            inner,
            stalls,
            pending: stalls,
        }
    }
}

impl<S: ChunkedSource> ChunkedSource for Stuttering<S> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        if self.pending > 0 {
            self.pending -= 1;
            return Ok(Chunk::More(0));
        }
        self.pending = self.stalls;
        self.inner.read_chunk(buf)
    }
}

/// Records every chunk a source hands out.
pub struct Recording<S> {
    inner: S,
    pub chunks: Vec<Vec<u8>>,
    pub reads: usize,
}

impl<S> Recording<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            chunks: vec![],
            reads: 0,
        }
    }
}

impl<S: ChunkedSource> ChunkedSource for Recording<S> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        self.reads += 1;
        let chunk = self.inner.read_chunk(buf)?;
        if let Chunk::More(n) = chunk {
            self.chunks.push(buf[..n].to_vec());
        }
        Ok(chunk)
    }

    fn size_hint(&self) -> Option<usize> {
        self.inner.size_hint()
    }
}
