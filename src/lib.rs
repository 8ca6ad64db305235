//! Binary _Merkle Tree_ over opaque data blocks.
//!
//! The tree is built once from an ordered list of byte blocks and is
//! immutable afterwards. Every block becomes a leaf holding the block and
//! its digest; leaves are then paired level by level until a single root
//! remains:
//!
//! ```text
//!         root = h1234 = h(h12 + h34)
//!        /                           \
//!  h12 = h(h1 + h2)            h34 = h(h3 + h4)
//!   /            \              /            \
//! h1 = h(tx1)  h2 = h(tx2)    h3 = h(tx3)  h4 = h(tx4)
//! ```
//!
//! When a level has an odd number of nodes the last one has no sibling.
//! It is lifted into a _single_ parent whose digest is the hash of the lone
//! child digest:
//!
//! ```text
//!            root = h(h12 + h3')
//!           /                 \
//!     h12 = h(h1 + h2)     h3' = h(h3)
//!      /          \             |
//!     h1          h2            h3
//! ```
//!
//! Nodes live in an arena owned by [`MerkleTree`]; children and the parent
//! back-reference of each node are [`NodeId`] indices into it.
//!
//! Digests come from one of the classic algorithms, resolved by name:
//! `md5`, `sha1`, `sha256` or `sha512`. Any other name falls back to `sha1`
//! (see [`HashAlgorithm::from_name`]); parse with `str::parse` to reject
//! unknown names instead.
//!
//! # Interface
//!
//! ```text
//! - build (algorithm name, blocks) -> tree
//! - root_digest -> digest
//! - contains_leaf_data (block) -> bool
//! - verify -> bool
//! ```
//!
//! # Quick start
//!
//! ```
//! let tree = merkle_blocks::build("sha256", vec![b"a", b"b", b"c", b"d"]).unwrap();
//!
//! assert!(tree.contains_leaf_data(b"b"));
//! assert!(!tree.contains_leaf_data(b"z"));
//! assert!(tree.verify().unwrap());
//! println!("{}", tree.root_digest());
//! ```

#![deny(
    missing_docs, unused_qualifications,
    missing_debug_implementations,
    trivial_casts, trivial_numeric_casts,
    unsafe_code, unstable_features,
    unused_import_braces
)]

/// Error type shared by construction and verification.
mod error;

/// Hash infrastructure for nodes in the Merkle tree.
pub mod hash;

/// Tree nodes and their arena handles.
pub mod node;

/// Level-by-level tree construction.
pub mod builder;

/// Merkle tree aggregate, queries and traversal.
pub mod merkle;

/// Membership and full recomputation checks.
mod verify;

#[cfg(test)]
mod test_common;


pub use builder::{TreeBuilder, SMALL_TREE_BUILD};
pub use error::{Error, Result};
pub use hash::{Algorithm, Digest, HashAlgorithm};
pub use merkle::MerkleTree;
pub use node::{Node, NodeId, NodeKind};

/// Builds a tree over `blocks` hashed with the algorithm called `name`.
///
/// Unknown names fall back to `sha1`. Fails with [`Error::EmptyInput`] when
/// `blocks` yields nothing.
pub fn build<I, B>(name: &str, blocks: I) -> Result<MerkleTree>
where
    I: IntoIterator<Item = B>,
    B: Into<Vec<u8>>,
{
    TreeBuilder::from_name(name).build(blocks)
}
