/// Smallest capacity a growing buffer jumps to.
pub const MIN_CAPACITY: usize = 64;

/// Byte accumulator that grows its capacity geometrically.
///
/// Capacity is managed explicitly: whenever an append would not fit, the
/// backing allocation is replaced by one sized to the next power of two that
/// holds the new length (never less than [MIN_CAPACITY]). The number of
/// growths is therefore logarithmic in the final length, no matter how many
/// chunks were appended.
#[derive(Debug, Default)]
pub struct GrowableBuffer {
    data: Vec<u8>,
    reallocations: usize,
}

impl GrowableBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with room for at least `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buffer = Self::new();
        buffer.reserve(capacity);
        buffer
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// How many times the backing allocation was grown.
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Append `chunk`, growing the allocation first if it does not fit.
    pub fn extend_from_slice(&mut self, chunk: &[u8]) {
        self.reserve(chunk.len());
        self.data.extend_from_slice(chunk);
    }

    /// Make room for `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.data.len().saturating_add(additional);
        if needed <= self.data.capacity() {
            return;
        }

        let target = needed
            .checked_next_power_of_two()
            .unwrap_or(needed)
            .max(MIN_CAPACITY);
        log::trace!(
            "growing buffer from {} to {} bytes",
            self.data.capacity(),
            target
        );
        self.data.reserve_exact(target - self.data.len());
        self.reallocations += 1;
    }

    /// Hand the accumulated bytes over to the caller.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}
