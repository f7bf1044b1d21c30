//! A suffix tree over a single immutable text, answering "where does this
//! pattern occur" without rescanning the text.
//!
//! The tree is built once by inserting every suffix of the sentinel-terminated
//! text in increasing start order, splitting an edge whenever a new suffix
//! diverges partway through its label. Queries walk the finished tree and
//! gather the occurrence offsets stored at the leaves under the match point.
//!
//! # Examples
//!
//! ```
//! use suffix_tree::SuffixTree;
//! let tree = SuffixTree::new("banana").unwrap();
//! assert_eq!(tree.search("ana"), vec![1, 3]);
//! assert!(tree.search("xyz").is_empty());
//! ```
pub mod arena;
pub mod config;
pub mod error;
pub mod session;
pub mod text;

use std::fmt;

use tracing::{debug, trace};

use crate::arena::{NodeArena, NodeId, ROOT};
pub use crate::config::TreeConfig;
pub use crate::error::{Result, SuffixTreeError};
pub use crate::session::{QueryMatch, Session, SessionSummary};
use crate::text::{Span, Text};

/// A position reached while walking the tree: `depth` characters of the edge
/// leading into `node` have been consumed.
#[derive(Debug, Clone, Copy)]
struct Locus {
    node: NodeId,
    depth: usize,
}

/// Suffix tree built with the plain incremental method: every suffix is
/// inserted from the root, so construction is quadratic in the worst case.
/// The tree is read-only once built.
#[derive(Debug, Clone)]
pub struct SuffixTree {
    text: Text,
    arena: NodeArena,
}

impl SuffixTree {
    /// Build a tree over `text` using the default `$` sentinel.
    pub fn new(text: impl AsRef<[u8]>) -> Result<Self> {
        Self::with_config(text, &TreeConfig::default())
    }

    pub fn with_config(text: impl AsRef<[u8]>, config: &TreeConfig) -> Result<Self> {
        let text = Text::new(text.as_ref(), config.sentinel)?;
        let mut tree = Self { text, arena: NodeArena::new() };
        for start in 0..tree.text.len() {
            tree.insert_suffix(start);
        }
        debug!(text_len = tree.text.len(), nodes = tree.arena.len(), "suffix tree built");
        Ok(tree)
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Sorted 0-based offsets of every occurrence of `pattern` in the text.
    /// The empty pattern and patterns containing the sentinel never match.
    #[must_use]
    pub fn search(&self, pattern: impl AsRef<[u8]>) -> Vec<usize> {
        let mut offsets = match self.find_anchor(pattern.as_ref()) {
            Some(anchor) => self.collect_leaves(anchor),
            None => Vec::new(),
        };
        offsets.sort_unstable();
        offsets
    }

    #[must_use]
    pub fn contains(&self, pattern: impl AsRef<[u8]>) -> bool {
        self.find_anchor(pattern.as_ref()).is_some()
    }

    /// Number of occurrences of `pattern`, without materialising the offsets.
    #[must_use]
    pub fn count(&self, pattern: impl AsRef<[u8]>) -> usize {
        let Some(anchor) = self.find_anchor(pattern.as_ref()) else {
            return 0;
        };
        let mut total = 0;
        let mut stack = vec![anchor];
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            if node.is_leaf() {
                total += 1;
            } else {
                stack.extend(node.children.values().copied());
            }
        }
        total
    }

    /// Checks whether `pattern` is a suffix of the text. The empty pattern is
    /// the suffix that consists of the sentinel alone.
    #[must_use]
    pub fn is_suffix(&self, pattern: impl AsRef<[u8]>) -> bool {
        let Some(locus) = self.locate(pattern.as_ref()) else {
            return false;
        };
        let span = self.arena[locus.node].span;
        if locus.depth < span.len() {
            self.text.is_sentinel_at(span.start + locus.depth)
        } else {
            self.arena.child(locus.node, self.text.sentinel()).is_some()
        }
    }

    /// Render the tree, one edge label per line, children in key order.
    pub fn dump(&self) -> TreeDump<'_> {
        TreeDump { tree: self }
    }

    /// Add the suffix starting at `suffix_start` to the tree.
    fn insert_suffix(&mut self, suffix_start: usize) {
        let end = self.text.len();
        let mut cursor = suffix_start;
        let mut parent = ROOT;
        loop {
            let ch = self.text.at(cursor);
            let Some(child) = self.arena.child(parent, ch) else {
                let leaf = self.arena.allocate(Span::new(cursor, end), Some(suffix_start));
                self.arena.attach(parent, ch, leaf);
                return;
            };

            let span = self.arena[child].span;
            let matched = self.common_prefix_len(span, Span::new(cursor, end));
            if matched < span.len() {
                if cursor + matched == end {
                    // Suffix ends inside an existing edge; the sentinel rules
                    // this out, and the tree is left untouched if it happens.
                    return;
                }
                self.split_edge(child, matched);
                let tail = cursor + matched;
                let leaf = self.arena.allocate(Span::new(tail, end), Some(suffix_start));
                self.arena.attach(child, self.text.at(tail), leaf);
                return;
            }

            cursor += matched;
            if cursor == end {
                return;
            }
            parent = child;
        }
    }

    /// Shorten the edge into `node` to its first `at` characters. The rest of
    /// the edge, together with the old children, moves to a new successor.
    fn split_edge(&mut self, node: NodeId, at: usize) {
        let old_span = self.arena[node].span;
        let successor_span = Span::new(old_span.start + at, old_span.end);

        let split = &mut self.arena[node];
        split.span.end = successor_span.start;
        let old_appear = split.appear.take();
        let children = std::mem::take(&mut split.children);

        // Only an edge that ran up to the sentinel hands its offset over.
        let carried = if self.text.is_sentinel_at(old_span.end - 1) { old_appear } else { None };

        let successor = self.arena.allocate(successor_span, carried);
        self.arena[successor].children = children;
        self.arena.attach(node, self.text.at(successor_span.start), successor);
        trace!(node, successor, at, "split edge");
    }

    fn common_prefix_len(&self, a: Span, b: Span) -> usize {
        self.text
            .label(a)
            .iter()
            .zip(self.text.label(b))
            .take_while(|(x, y)| x == y)
            .count()
    }

    /// Walk `pattern` down from the root. Returns `None` as soon as a
    /// character has no matching edge or mismatches inside an edge.
    fn locate(&self, pattern: &[u8]) -> Option<Locus> {
        if pattern.contains(&self.text.sentinel()) {
            return None;
        }
        let mut locus = Locus { node: ROOT, depth: 0 };
        let mut matched = 0;
        while matched < pattern.len() {
            let child = self.arena.child(locus.node, pattern[matched])?;
            let label = self.text.label(self.arena[child].span);
            let rest = &pattern[matched..];
            let n = label.len().min(rest.len());
            if label[..n] != rest[..n] {
                return None;
            }
            matched += n;
            locus = Locus { node: child, depth: n };
        }
        Some(locus)
    }

    /// The node whose subtree holds every occurrence of a non-empty pattern.
    fn find_anchor(&self, pattern: &[u8]) -> Option<NodeId> {
        if pattern.is_empty() {
            return None;
        }
        self.locate(pattern).map(|locus| locus.node)
    }

    /// Gather the occurrence offsets of every leaf under `anchor`, in no
    /// particular order.
    fn collect_leaves(&self, anchor: NodeId) -> Vec<usize> {
        let mut offsets = Vec::new();
        let mut stack = vec![anchor];
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            if node.is_leaf() {
                offsets.extend(node.appear);
            } else {
                stack.extend(node.children.values().copied());
            }
        }
        offsets
    }
}

/// Display adapter returned by [`SuffixTree::dump`].
pub struct TreeDump<'a> {
    tree: &'a SuffixTree,
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = &self.tree.arena;
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        push_children_sorted(arena, ROOT, 0, &mut stack);
        while let Some((id, depth)) = stack.pop() {
            let node = &arena[id];
            let label = String::from_utf8_lossy(self.tree.text.label(node.span));
            write!(f, "{:indent$}{}", "", label, indent = depth * 4)?;
            match node.appear {
                Some(appear) if node.is_leaf() => writeln!(f, " [{appear}]")?,
                _ => writeln!(f)?,
            }
            push_children_sorted(arena, id, depth + 1, &mut stack);
        }
        Ok(())
    }
}

fn push_children_sorted(
    arena: &NodeArena,
    id: NodeId,
    depth: usize,
    stack: &mut Vec<(NodeId, usize)>,
) {
    let mut children: Vec<(u8, NodeId)> =
        arena[id].children.iter().map(|(&ch, &child)| (ch, child)).collect();
    // Reverse order so the smallest key is popped first.
    children.sort_unstable_by(|a, b| b.0.cmp(&a.0));
    stack.extend(children.into_iter().map(|(_, child)| (child, depth)));
}
