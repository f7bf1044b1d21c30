use crate::error::{Result, SuffixTreeError};

/// Sentinel reserved by default, matching the classic `text + '$'` layout.
pub const DEFAULT_SENTINEL: u8 = b'$';

/// Construction options for a [`SuffixTree`](crate::SuffixTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    pub sentinel: u8,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { sentinel: DEFAULT_SENTINEL }
    }
}

impl TreeConfig {
    /// Use `sentinel` as the terminator appended to the text.
    pub fn with_sentinel(mut self, sentinel: char) -> Result<Self> {
        if !sentinel.is_ascii() {
            return Err(SuffixTreeError::InvalidSentinel(sentinel));
        }
        self.sentinel = sentinel as u8;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sentinel() {
        assert_eq!(TreeConfig::default().sentinel, b'$');
    }

    #[test]
    fn test_with_sentinel() {
        let config = TreeConfig::default().with_sentinel('#').unwrap();
        assert_eq!(config.sentinel, b'#');
        assert!(matches!(
            TreeConfig::default().with_sentinel('é'),
            Err(SuffixTreeError::InvalidSentinel('é'))
        ));
    }
}
