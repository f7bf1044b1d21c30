//! Line-oriented query session: the first input line is the text to index,
//! every following line is a pattern. Matched patterns are reported as
//! `<line>: <offset>, <offset>, ...` with 1-based offsets.
//!
//! Lines are raw bytes; input that is not valid UTF-8 is indexed and queried
//! as-is.

use std::fmt;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::TreeConfig;
use crate::error::Result;
use crate::SuffixTree;

/// The answer to one query line that had at least one occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMatch {
    /// 1-based index of the query among all query lines.
    pub line: usize,
    /// 1-based occurrence offsets, ascending.
    pub offsets: Vec<usize>,
}

impl fmt::Display for QueryMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.line)?;
        for (i, offset) in self.offsets.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Query lines read, empty ones included.
    pub queries: usize,
    /// Query lines that produced an output line.
    pub answered: usize,
    pub nodes: usize,
}

pub struct Session<R> {
    tree: SuffixTree,
    reader: R,
    line: Vec<u8>,
}

impl<R: BufRead> Session<R> {
    /// Read the text line from `reader` and index it. A missing first line
    /// indexes the empty text.
    pub fn open(mut reader: R, config: &TreeConfig) -> Result<Self> {
        let mut line = Vec::new();
        read_line(&mut reader, &mut line)?;
        let tree = SuffixTree::with_config(&line, config)?;
        Ok(Self { tree, reader, line })
    }

    pub fn tree(&self) -> &SuffixTree {
        &self.tree
    }

    /// Write the tree built from the text line.
    pub fn dump_tree<W: Write>(&self, mut out: W) -> Result<()> {
        write!(out, "{}", self.tree.dump())?;
        out.flush()?;
        Ok(())
    }

    /// Answer the query on `line`. Empty patterns and patterns without
    /// occurrences produce nothing.
    pub fn answer(&self, line: usize, pattern: impl AsRef<[u8]>) -> Option<QueryMatch> {
        let offsets = self.tree.search(pattern);
        if offsets.is_empty() {
            return None;
        }
        Some(QueryMatch { line, offsets: offsets.into_iter().map(|o| o + 1).collect() })
    }

    /// Answer every remaining input line, writing one line per match.
    pub fn run<W: Write>(mut self, mut out: W) -> Result<SessionSummary> {
        let mut summary = SessionSummary { nodes: self.tree.node_count(), ..Default::default() };
        let mut pattern = std::mem::take(&mut self.line);
        while read_line(&mut self.reader, &mut pattern)? {
            summary.queries += 1;
            if let Some(found) = self.answer(summary.queries, &pattern) {
                writeln!(out, "{found}")?;
                summary.answered += 1;
            }
        }
        out.flush()?;
        debug!(
            queries = summary.queries,
            answered = summary.answered,
            nodes = summary.nodes,
            "session finished"
        );
        Ok(summary)
    }
}

/// Read one line into `buf` without its `\n` or `\r\n` terminator.
/// Returns `false` at end of input.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_session(input: &[u8]) -> (String, SessionSummary) {
        let session = Session::open(input, &TreeConfig::default()).unwrap();
        let mut out = Vec::new();
        let summary = session.run(&mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_query_match_display() {
        let found = QueryMatch { line: 3, offsets: vec![2, 4, 10] };
        assert_eq!(found.to_string(), "3: 2, 4, 10");
        let single = QueryMatch { line: 1, offsets: vec![1] };
        assert_eq!(single.to_string(), "1: 1");
    }

    #[test]
    fn test_answer_is_one_based() {
        let session = Session::open("banana\n".as_bytes(), &TreeConfig::default()).unwrap();
        assert_eq!(
            session.answer(1, "ana"),
            Some(QueryMatch { line: 1, offsets: vec![2, 4] })
        );
        assert_eq!(session.answer(2, ""), None);
        assert_eq!(session.answer(3, "xyz"), None);
    }

    #[test]
    fn test_run_counts_every_line() {
        let (out, summary) = run_session(b"banana\nana\n\nna\nxyz\nbanana\n");
        assert_eq!(out, "1: 2, 4\n3: 3, 5\n5: 1\n");
        assert_eq!(summary.queries, 5);
        assert_eq!(summary.answered, 3);
    }

    #[test]
    fn test_last_line_without_newline() {
        let (out, summary) = run_session(b"banana\nna");
        assert_eq!(out, "1: 3, 5\n");
        assert_eq!(summary.queries, 1);
    }

    #[test]
    fn test_non_utf8_query_does_not_stop_session() {
        let (out, summary) = run_session(b"banana\n\xe9a\nana\n");
        assert_eq!(out, "2: 2, 4\n");
        assert_eq!(summary.queries, 2);
    }

    #[test]
    fn test_non_utf8_text_is_indexed() {
        let (out, _) = run_session(b"b\xe9nana\nana\n\xe9n\n");
        assert_eq!(out, "1: 4\n2: 2\n");
    }

    #[test]
    fn test_crlf_terminators_are_stripped() {
        let (out, summary) = run_session(b"banana\r\nana\r\nbanana\r\n");
        assert_eq!(out, "1: 2, 4\n2: 1\n");
        assert_eq!(summary.queries, 2);
    }

    #[test]
    fn test_dump_tree() {
        let session = Session::open("aa\nignored\n".as_bytes(), &TreeConfig::default()).unwrap();
        let mut out = Vec::new();
        session.dump_tree(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "$ [2]\na\n    $ [1]\n    a$ [0]\n");
    }

    #[test]
    fn test_empty_input() {
        let (out, summary) = run_session(b"");
        assert!(out.is_empty());
        assert_eq!(summary.queries, 0);
        assert_eq!(summary.nodes, 2);
    }
}
