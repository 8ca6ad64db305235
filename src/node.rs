use std::fmt;

use crate::hash::Digest;

/// Handle of a node inside the arena of its [`MerkleTree`](crate::MerkleTree).
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An original data block.
    Leaf {
        /// The block, as given to the builder.
        data: Vec<u8>,
    },
    /// A parent of one or two nodes of the level below.
    Internal {
        /// Left child.
        left: NodeId,
        /// Right child, `None` when the left child was the odd one out of
        /// its level.
        right: Option<NodeId>,
    },
}

/// Tree node.
///
/// Nodes are created by [`TreeBuilder`](crate::TreeBuilder) and never
/// change afterwards. The parent link is a back-reference into the same
/// arena; ownership stays with the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) digest: Digest,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn leaf(data: Vec<u8>, digest: Digest) -> Node {
        Node {
            digest,
            parent: None,
            kind: NodeKind::Leaf { data },
        }
    }

    pub(crate) fn internal(left: NodeId, right: Option<NodeId>, digest: Digest) -> Node {
        Node {
            digest,
            parent: None,
            kind: NodeKind::Internal { left, right },
        }
    }

    /// Stored digest.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Node contents.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Returns `true` for internal nodes built from a single orphan child.
    pub fn is_single(&self) -> bool {
        matches!(self.kind, NodeKind::Internal { right: None, .. })
    }

    /// Original block of a leaf.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.kind {
            NodeKind::Leaf { data } => Some(data.as_slice()),
            NodeKind::Internal { .. } => None,
        }
    }

    /// Left child of an internal node.
    pub fn left(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Internal { left, .. } => Some(left),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Right child of a paired internal node.
    pub fn right(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Internal { right, .. } => right,
            NodeKind::Leaf { .. } => None,
        }
    }
}
