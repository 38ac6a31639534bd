use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// A view into immutable, shared byte storage.
///
/// Slicing a chunk never copies: both halves point at the same allocation.
#[derive(Clone)]
pub(crate) struct Chunk {
    bytes: Rc<[u8]>,
    range: Range<usize>,
}

impl Chunk {
    pub(crate) fn new(bytes: Rc<[u8]>) -> Self {
        let range = 0..bytes.len();
        Self { bytes, range }
    }

    pub(crate) fn empty() -> Self {
        Self::new(Rc::from(&[][..]))
    }

    pub(crate) fn len(&self) -> usize {
        self.range.len()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[self.range.clone()]
    }

    /// Sub-view relative to this chunk. `range` must lie within `0..len()`.
    pub(crate) fn slice(&self, range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end && range.end <= self.len());

        let start = self.range.start + range.start;
        let end = self.range.start + range.end;
        Self {
            bytes: Rc::clone(&self.bytes),
            range: start..end,
        }
    }

    pub(crate) fn split_at(&self, pos: usize) -> (Self, Self) {
        (self.slice(0..pos), self.slice(pos..self.len()))
    }

    #[cfg(test)]
    pub(crate) fn shares_storage(&self, other: &Chunk) -> bool {
        Rc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}
