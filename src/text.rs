use crate::error::{Result, SuffixTreeError};

/// A half-open range `[start, end)` into the text buffer. Edge labels are
/// stored this way so a node never copies the characters it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// The immutable indexed text with its sentinel appended.
#[derive(Debug, Clone)]
pub struct Text {
    bytes: Vec<u8>,
    sentinel: u8,
}

// Never empty: the sentinel is present even for an empty source.
#[allow(clippy::len_without_is_empty)]
impl Text {
    /// Copy `source` and terminate it with `sentinel`.
    pub fn new(source: &[u8], sentinel: u8) -> Result<Self> {
        if let Some(position) = source.iter().position(|&ch| ch == sentinel) {
            return Err(SuffixTreeError::SentinelCollision { sentinel: sentinel as char, position });
        }
        let mut bytes = Vec::with_capacity(source.len() + 1);
        bytes.extend_from_slice(source);
        bytes.push(sentinel);
        Ok(Self { bytes, sentinel })
    }

    /// Length including the sentinel.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn sentinel(&self) -> u8 {
        self.sentinel
    }

    /// The text as supplied by the caller, without the sentinel.
    pub fn source(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    #[inline]
    pub fn at(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    #[inline]
    pub fn label(&self, span: Span) -> &[u8] {
        &self.bytes[span.start..span.end]
    }

    pub fn is_sentinel_at(&self, offset: usize) -> bool {
        offset + 1 == self.bytes.len()
    }
}
