//! Digest algorithms and the hashing state used to build tree nodes.

use std::fmt;
use std::str::FromStr;

use crypto::digest::Digest as CryptoDigest;
use crypto::md5::Md5;
use crypto::sha1::Sha1;
use crypto::sha2::{Sha256, Sha512};
use log::warn;

use crate::error::Error;

/// Named digest algorithm a tree is built with.
///
/// Names are case sensitive: `md5`, `sha1`, `sha256`, `sha512`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// MD5, 16 byte digests.
    Md5,
    /// SHA-1, 20 byte digests. Also the fallback for unknown names.
    #[default]
    Sha1,
    /// SHA-256, 32 byte digests.
    Sha256,
    /// SHA-512, 64 byte digests.
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
    ];

    /// Resolves `name`, falling back to [`HashAlgorithm::Sha1`] for any
    /// name that is not recognised, the empty string included.
    pub fn from_name(name: &str) -> HashAlgorithm {
        name.parse().unwrap_or_else(|_| {
            warn!("unknown hash algorithm {:?}, falling back to sha1", name);
            HashAlgorithm::Sha1
        })
    }

    /// Canonical name of the algorithm.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Length in bytes of the digests this algorithm produces.
    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Fresh hashing state for this algorithm.
    pub fn algorithm(self) -> Algorithm {
        Algorithm::new(self)
    }

    /// One-shot digest of `data`.
    pub fn digest(self, data: &[u8]) -> Digest {
        self.algorithm().leaf(data)
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(Error::UnknownAlgorithm(name.to_owned())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Digest of a leaf block or of an internal node.
///
/// Formats as lowercase hex with `{}` and `{:x}`, uppercase with `{:X}`;
/// the alternate flag adds a `0x` prefix.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest(Vec<u8>);

impl Digest {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Digest length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the zero length digest.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Consumes the digest, returning its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Digest(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for Digest {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Digest").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode_upper(&self.0))
    }
}

/// Hashing state.
///
/// Follows a `reset-write-hash` lifecycle; `hash` finalizes the state, so
/// the tree helpers [`leaf`](Algorithm::leaf), [`node`](Algorithm::node)
/// and [`single`](Algorithm::single) reset before every use and the same
/// state can be reused for a whole level.
pub struct Algorithm {
    kind: HashAlgorithm,
    state: Box<dyn CryptoDigest + Send>,
}

impl Algorithm {
    /// Creates a hashing state for `kind`.
    pub fn new(kind: HashAlgorithm) -> Algorithm {
        let state: Box<dyn CryptoDigest + Send> = match kind {
            HashAlgorithm::Md5 => Box::new(Md5::new()),
            HashAlgorithm::Sha1 => Box::new(Sha1::new()),
            HashAlgorithm::Sha256 => Box::new(Sha256::new()),
            HashAlgorithm::Sha512 => Box::new(Sha512::new()),
        };
        Algorithm { kind, state }
    }

    /// Algorithm this state hashes with.
    pub fn kind(&self) -> HashAlgorithm {
        self.kind
    }

    /// Feeds `msg` into the state.
    #[inline]
    pub fn write(&mut self, msg: &[u8]) {
        self.state.input(msg)
    }

    /// Returns the digest of the data written since the last reset.
    pub fn hash(&mut self) -> Digest {
        let mut h = vec![0u8; self.state.output_bytes()];
        self.state.result(&mut h);
        Digest(h)
    }

    /// Resets the state.
    #[inline]
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Digest of a leaf: `H(data)`.
    pub fn leaf(&mut self, data: &[u8]) -> Digest {
        self.reset();
        self.write(data);
        self.hash()
    }

    /// Digest of a paired internal node: `H(left || right)`.
    pub fn node(&mut self, left: &Digest, right: &Digest) -> Digest {
        self.reset();
        self.write(left.as_bytes());
        self.write(right.as_bytes());
        self.hash()
    }

    /// Digest of an internal node lifted from a lone child: `H(child)`.
    pub fn single(&mut self, child: &Digest) -> Digest {
        self.reset();
        self.write(child.as_bytes());
        self.hash()
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Algorithm").field("kind", &self.kind).finish_non_exhaustive()
    }
}
