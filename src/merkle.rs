use std::fmt;

use crate::hash::{Digest, HashAlgorithm};
use crate::node::{Node, NodeId, NodeKind};

/// Merkle Tree.
///
/// All leafs and nodes are stored in a linear arena (vec): leafs first in
/// input order, then every reduced level from the bottom up, so the root
/// is always the last node.
///
/// ```text
///     [h1 h2 h3 h4 h12 h34 root]
/// ```
///
/// Trees are built by [`TreeBuilder`](crate::TreeBuilder) and are read only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) leaves: Vec<NodeId>,
    pub(crate) root: NodeId,
    pub(crate) height: usize,
    pub(crate) algorithm: HashAlgorithm,
}

impl MerkleTree {
    /// Returns merkle root digest.
    pub fn root_digest(&self) -> &Digest {
        &self.nodes[self.root.0].digest
    }

    /// Root node.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root.0]
    }

    /// Id of the root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Node behind `id`, if `id` belongs to this tree.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Leaf built from the `i`-th input block.
    pub fn leaf(&self, i: usize) -> Option<&Node> {
        self.leaves.get(i).and_then(|id| self.node(*id))
    }

    /// Leaves in input order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.leaves.iter().filter_map(move |id| self.node(*id))
    }

    /// Algorithm the tree was built with.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Returns original number of blocks the tree was built upon.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Returns number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a tree holds at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns number of levels, the leaf level included.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Walks parent links from `id` up to the root, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.node(id).and_then(Node::parent),
        }
    }

    /// Pre-order walk from the root, left subtree first, yielding each node
    /// with its depth (root = 0).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: self,
            stack: vec![(0, self.root)],
        }
    }
}

/// Iterator over the ancestors of a node, see [`MerkleTree::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    tree: &'a MerkleTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.node(id).and_then(Node::parent);
        Some(id)
    }
}

/// Pre-order iterator over the nodes of a tree, see [`MerkleTree::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    tree: &'a MerkleTree,
    stack: Vec<(usize, NodeId)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, id)) = self.stack.pop() {
            let node = match self.tree.node(id) {
                Some(node) => node,
                None => continue,
            };
            if let NodeKind::Internal { left, right } = node.kind {
                if let Some(right) = right {
                    self.stack.push((depth + 1, right));
                }
                self.stack.push((depth + 1, left));
            }
            return Some((depth, node));
        }
        None
    }
}

impl<'a> IntoIterator for &'a MerkleTree {
    type Item = (usize, &'a Node);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// One line per node, indented by depth:
///
/// ```text
/// Node 1a2b..
///   Node 3c4d..
///     Leaf 5e6f.. (7 bytes)
/// ```
impl fmt::Display for MerkleTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (depth, node) in self.iter() {
            write!(f, "{:indent$}", "", indent = depth * 2)?;
            match &node.kind {
                NodeKind::Leaf { data } => {
                    writeln!(f, "Leaf {} ({} bytes)", node.digest, data.len())?
                }
                NodeKind::Internal { right: None, .. } => writeln!(f, "Node {} (single)", node.digest)?,
                NodeKind::Internal { .. } => writeln!(f, "Node {}", node.digest)?,
            }
        }
        Ok(())
    }
}
