use thiserror::Error;

use crate::node::NodeId;

/// Errors from Merkle tree construction and verification.
#[derive(Debug, Error)]
pub enum Error {
    /// `build` was given no blocks.
    #[error("cannot build a merkle tree from empty data")]
    EmptyInput,
    /// The node graph is malformed and digests cannot be recomputed.
    #[error("cannot recompute node {node}: {reason}")]
    VerificationCompute {
        /// Node at which recomputation stopped.
        node: NodeId,
        /// What was wrong with it.
        reason: String,
    },
    /// Strict parsing rejected a hash algorithm name.
    #[error("unknown hash algorithm {0:?}")]
    UnknownAlgorithm(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
