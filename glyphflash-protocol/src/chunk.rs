//! Chunk planning
//!
//! A payload is split front to back into slices of at most [`CHUNK_SIZE`]
//! bytes. Only the final chunk may be short.

use crate::wire::CHUNK_SIZE;

/// Length of the next chunk when `remaining` bytes are still unsent
pub const fn chunk_len(remaining: usize) -> usize {
    if remaining < CHUNK_SIZE {
        remaining
    } else {
        CHUNK_SIZE
    }
}

/// Number of chunks needed for a payload of `len` bytes
pub const fn chunk_count(len: usize) -> usize {
    len.div_ceil(CHUNK_SIZE)
}

/// Iterator over the chunks of a payload, in transfer order
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> Chunks<'a> {
    /// Plan the chunks of `payload`
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0 }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.payload.len() - self.offset;
        if remaining == 0 {
            return None;
        }
        let start = self.offset;
        self.offset += chunk_len(remaining);
        Some(&self.payload[start..self.offset])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = chunk_count(self.payload.len() - self.offset);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Chunks<'_> {}
