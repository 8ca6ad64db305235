use log::{debug, trace};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::hash::{Algorithm, Digest, HashAlgorithm};
use crate::merkle::MerkleTree;
use crate::node::{Node, NodeId};

/// Level width (number of nodes) from which hashing of a level is spread
/// over the rayon thread pool. Narrower levels are hashed on the calling
/// thread with a single reused hashing state.
pub const SMALL_TREE_BUILD: usize = 1024;

/// Builds [`MerkleTree`]s.
///
/// ```
/// use merkle_blocks::{HashAlgorithm, TreeBuilder};
///
/// let tree = TreeBuilder::new(HashAlgorithm::Sha512)
///     .with_parallel_threshold(64)
///     .build(vec!["x", "y", "z"])
///     .unwrap();
/// assert_eq!(tree.leaf_count(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeBuilder {
    algorithm: HashAlgorithm,
    parallel_threshold: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        TreeBuilder::new(HashAlgorithm::default())
    }
}

impl TreeBuilder {
    /// Builder hashing with `algorithm`.
    pub fn new(algorithm: HashAlgorithm) -> TreeBuilder {
        TreeBuilder {
            algorithm,
            parallel_threshold: SMALL_TREE_BUILD,
        }
    }

    /// Builder hashing with the algorithm called `name`, see
    /// [`HashAlgorithm::from_name`].
    pub fn from_name(name: &str) -> TreeBuilder {
        TreeBuilder::new(HashAlgorithm::from_name(name))
    }

    /// Sets the level width from which hashing runs in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> TreeBuilder {
        self.parallel_threshold = threshold;
        self
    }

    /// Configured algorithm.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Configured parallel threshold.
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Builds a tree over `blocks`, in order.
    ///
    /// Each block becomes a leaf; then every level of `n` nodes is reduced
    /// to `ceil(n / 2)` parents until one node, the root, is left. The last
    /// node of an odd level gets a single parent hashing its digest alone.
    pub fn build<I, B>(&self, blocks: I) -> Result<MerkleTree>
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        let blocks: Vec<Vec<u8>> = blocks.into_iter().map(Into::into).collect();
        if blocks.is_empty() {
            return Err(Error::EmptyInput);
        }

        let leafs = blocks.len();
        let mut nodes: Vec<Node> = Vec::with_capacity(2 * leafs);

        let digests = self.hash_leafs(&blocks);
        for (data, digest) in blocks.into_iter().zip(digests) {
            nodes.push(Node::leaf(data, digest));
        }

        let leaves: Vec<NodeId> = (0..leafs).map(NodeId).collect();
        let mut level = leaves.clone();
        let mut height = 1;

        while level.len() > 1 {
            let digests = self.reduce_level(&nodes, &level);

            let mut next = Vec::with_capacity(digests.len());
            for (pair, digest) in level.chunks(2).zip(digests) {
                let id = NodeId(nodes.len());
                let left = pair[0];
                let right = pair.get(1).copied();

                nodes[left.0].parent = Some(id);
                if let Some(right) = right {
                    nodes[right.0].parent = Some(id);
                }
                nodes.push(Node::internal(left, right, digest));
                next.push(id);
            }

            trace!(
                "level {}: {} nodes reduced to {}{}",
                height - 1,
                level.len(),
                next.len(),
                if level.len() & 1 == 1 { " (single tail)" } else { "" }
            );

            level = next;
            height += 1;
        }

        let root = level[0];
        debug!(
            "built {} tree: leafs {}, nodes {}, height {}",
            self.algorithm,
            leafs,
            nodes.len(),
            height
        );

        Ok(MerkleTree {
            nodes,
            leaves,
            root,
            height,
            algorithm: self.algorithm,
        })
    }

    fn hash_leafs(&self, blocks: &[Vec<u8>]) -> Vec<Digest> {
        let algorithm = self.algorithm;
        if blocks.len() >= self.parallel_threshold {
            blocks
                .par_iter()
                .map_init(|| algorithm.algorithm(), |a, data| a.leaf(data))
                .collect()
        } else {
            let mut a = algorithm.algorithm();
            blocks.iter().map(|data| a.leaf(data)).collect()
        }
    }

    /// Digests of the parents of `level`, in level order.
    fn reduce_level(&self, nodes: &[Node], level: &[NodeId]) -> Vec<Digest> {
        let algorithm = self.algorithm;
        if level.len() >= self.parallel_threshold {
            level
                .par_chunks(2)
                .map_init(|| algorithm.algorithm(), |a, pair| combine(a, nodes, pair))
                .collect()
        } else {
            let mut a = algorithm.algorithm();
            level.chunks(2).map(|pair| combine(&mut a, nodes, pair)).collect()
        }
    }
}

/// Parent digest of a chunk of one or two sibling nodes.
fn combine(a: &mut Algorithm, nodes: &[Node], pair: &[NodeId]) -> Digest {
    let left = &nodes[pair[0].0].digest;
    match pair.get(1) {
        Some(right) => a.node(left, &nodes[right.0].digest),
        None => a.single(left),
    }
}
