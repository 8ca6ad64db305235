use crypto::digest::Digest as CryptoDigest;
use crypto::md5::Md5;
use crypto::sha1::Sha1;
use crypto::sha2::{Sha256, Sha512};

use crate::hash::HashAlgorithm;

/// Blocks shaped like quoted strings: `"test data 0"`, `"test data 1"`, ...
pub fn test_blocks(n: usize) -> Vec<Vec<u8>> {
    (0..n)
        .map(|i| format!("\"test data {}\"", i).into_bytes())
        .collect()
}

/// Digest computed straight through `rust-crypto`, bypassing the crate.
pub fn raw_hash(alg: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    let mut d: Box<dyn CryptoDigest> = match alg {
        HashAlgorithm::Md5 => Box::new(Md5::new()),
        HashAlgorithm::Sha1 => Box::new(Sha1::new()),
        HashAlgorithm::Sha256 => Box::new(Sha256::new()),
        HashAlgorithm::Sha512 => Box::new(Sha512::new()),
    };
    d.input(data);
    let mut out = vec![0u8; d.output_bytes()];
    d.result(&mut out);
    out
}

/// Root digest by plain pairwise reduction of byte vectors.
pub fn reference_root(alg: HashAlgorithm, blocks: &[Vec<u8>]) -> Vec<u8> {
    let mut level: Vec<Vec<u8>> = blocks.iter().map(|b| raw_hash(alg, b)).collect();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let joined: Vec<u8> = pair.concat();
                raw_hash(alg, &joined)
            })
            .collect();
    }
    level.remove(0)
}

/// Smallest `h` with `2^h >= n`.
pub fn ceil_log2(n: usize) -> usize {
    let mut h = 0;
    while (1usize << h) < n {
        h += 1;
    }
    h
}
