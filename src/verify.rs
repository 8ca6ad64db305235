//! Membership query and full recomputation of a built tree.
//!
//! Recomputation applies exactly the rules the builder uses: `H(data)` for
//! leaves, `H(left || right)` for paired nodes and `H(child)` for single
//! nodes. Every recomputed digest is compared with the stored one, so a
//! damaged digest anywhere in the tree is reported, not only at the root.

use log::debug;

use crate::error::{Error, Result};
use crate::hash::{Algorithm, Digest};
use crate::merkle::MerkleTree;
use crate::node::{NodeId, NodeKind};

impl MerkleTree {
    /// Returns `true` if some leaf digest equals the digest of `data`.
    ///
    /// This is a linear scan over the leaves. Membership is digest
    /// equality, so it is only as strong as the tree's algorithm.
    pub fn contains_leaf_data(&self, data: &[u8]) -> bool {
        self.leaf_index_of(data).is_some()
    }

    /// Position of the first leaf whose digest equals the digest of `data`.
    pub fn leaf_index_of(&self, data: &[u8]) -> Option<usize> {
        let digest = self.algorithm.digest(data);
        self.leaves
            .iter()
            .position(|id| self.node(*id).map_or(false, |leaf| leaf.digest == digest))
    }

    /// Recomputes every digest from the leaf data up and checks it against
    /// the stored digests and the stored root.
    ///
    /// A mismatch is `Ok(false)`. An error means the node graph itself is
    /// malformed (dangling ids, broken parent links) and cannot be walked.
    pub fn verify(&self) -> Result<bool> {
        for (i, id) in self.leaves.iter().enumerate() {
            match self.node(*id) {
                Some(node) if node.is_leaf() => {}
                Some(_) => return Err(malformed(*id, format!("leaf {} is an internal node", i))),
                None => return Err(malformed(*id, format!("leaf {} is not in the tree", i))),
            }
        }

        let root = self
            .node(self.root)
            .ok_or_else(|| malformed(self.root, "root is not in the tree".to_owned()))?;
        if let Some(parent) = root.parent {
            return Err(malformed(self.root, format!("root has parent {}", parent)));
        }

        let mut a = self.algorithm.algorithm();
        let (computed, consistent) = self.recompute(self.root, &mut a)?;

        Ok(consistent && computed == root.digest)
    }

    /// Returns the recomputed digest of `id` and whether every stored digest
    /// in its subtree matched.
    fn recompute(&self, id: NodeId, a: &mut Algorithm) -> Result<(Digest, bool)> {
        let node = self
            .node(id)
            .ok_or_else(|| malformed(id, "node is not in the tree".to_owned()))?;

        let (computed, children_consistent) = match &node.kind {
            NodeKind::Leaf { data } => (a.leaf(data), true),
            NodeKind::Internal { left, right } => {
                self.check_child(id, *left)?;
                let (left_digest, left_ok) = self.recompute(*left, a)?;
                match right {
                    Some(right) => {
                        self.check_child(id, *right)?;
                        let (right_digest, right_ok) = self.recompute(*right, a)?;
                        (a.node(&left_digest, &right_digest), left_ok && right_ok)
                    }
                    None => (a.single(&left_digest), left_ok),
                }
            }
        };

        let matches = computed == node.digest;
        if !matches {
            debug!(
                "digest mismatch at node {}: stored {}, computed {}",
                id, node.digest, computed
            );
        }
        Ok((computed, children_consistent && matches))
    }

    fn check_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let node = self
            .node(child)
            .ok_or_else(|| malformed(parent, format!("child {} is not in the tree", child)))?;
        if node.parent != Some(parent) {
            return Err(malformed(
                child,
                format!("parent link {:?} does not point back to {}", node.parent, parent),
            ));
        }
        Ok(())
    }
}

fn malformed(node: NodeId, reason: String) -> Error {
    Error::VerificationCompute { node, reason }
}
