use std::ops::{Index, IndexMut};

use rustc_hash::FxHashMap;

use crate::text::Span;

pub type NodeId = usize;

pub const ROOT: NodeId = 0;

/// A node in the tree. `span` is the label of the edge leading into this
/// node, `children` is keyed by the first character of each outgoing edge
/// label, and `appear` holds the start offset of the suffix whose path ends
/// here. `appear` is only meaningful once the node is a leaf.
#[derive(Debug, Clone)]
pub struct Node {
    pub span: Span,
    pub appear: Option<usize>,
    pub children: FxHashMap<u8, NodeId>,
}

impl Node {
    fn new(span: Span, appear: Option<usize>) -> Self {
        Self { span, appear, children: FxHashMap::default() }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Flat node store. Nodes are only ever appended; splitting an edge shrinks
/// an existing node and hands its children to a fresh one.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self { nodes: vec![Node::new(Span::EMPTY, None)] }
    }
}

#[allow(clippy::len_without_is_empty)]
impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, span: Span, appear: Option<usize>) -> NodeId {
        self.nodes.push(Node::new(span, appear));
        self.nodes.len() - 1
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn child(&self, id: NodeId, ch: u8) -> Option<NodeId> {
        self.nodes[id].children.get(&ch).copied()
    }

    pub fn attach(&mut self, parent: NodeId, ch: u8, child: NodeId) {
        self.nodes[parent].children.insert(ch, child);
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_preallocated() {
        let arena = NodeArena::new();
        assert_eq!(arena.len(), 1);
        assert!(arena[ROOT].span.is_empty());
        assert!(arena[ROOT].appear.is_none());
        assert!(arena[ROOT].is_leaf());
    }

    #[test]
    fn test_allocate_and_attach() {
        let mut arena = NodeArena::new();
        let leaf = arena.allocate(Span::new(0, 4), Some(0));
        assert_eq!(leaf, 1);
        arena.attach(ROOT, b'a', leaf);
        assert_eq!(arena.child(ROOT, b'a'), Some(leaf));
        assert_eq!(arena.child(ROOT, b'b'), None);
        assert_eq!(arena[leaf].appear, Some(0));

        arena[leaf].span.end = 2;
        assert_eq!(arena.get(leaf).span, Span::new(0, 2));
    }
}
