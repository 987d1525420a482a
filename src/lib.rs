//! Assemble data that arrives in unpredictable chunks.
//!
//! A [ChunkedSource] hands out bytes a few at a time; [drain_all] (or a
//! configured [Drainer]) keeps asking until the source reports end of data
//! and returns everything as one buffer. The [fetch] module puts an HTTP
//! response body behind the same interface.
//!
//! ```
//! use chunkdrain::{drain_all, SlowSource};
//!
//! let mut source = SlowSource::new("Hello, World!");
//! assert_eq!(drain_all(&mut source).unwrap(), b"Hello, World!");
//! ```

pub mod buffer;
pub mod drain;
mod errors;
pub mod fetch;
pub mod httpbin;
pub mod source;

pub use buffer::GrowableBuffer;
pub use drain::{drain_all, DrainConfig, Drained, Drainer};
pub use errors::{ChunkdrainError, DrainError, Result};
pub use source::{Chunk, ChunkedSource, ReaderSource, SlowSource};
