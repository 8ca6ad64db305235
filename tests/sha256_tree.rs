use crypto::digest::Digest;
use crypto::sha2::Sha256;
use merkle_blocks::{build, HashAlgorithm, TreeBuilder};

fn sha256(data: &[u8]) -> Vec<u8> {
    sha256_pair(data, &[])
}

fn sha256_pair(left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut h = Sha256::new();
    h.input(left);
    h.input(right);
    let mut out = vec![0u8; 32];
    h.result(&mut out);
    out
}

#[test]
fn test_four_blocks() {
    let t = build("sha256", vec![b"a", b"b", b"c", b"d"]).unwrap();

    let hab = sha256_pair(&sha256(b"a"), &sha256(b"b"));
    let hcd = sha256_pair(&sha256(b"c"), &sha256(b"d"));
    let root = sha256_pair(&hab, &hcd);

    assert_eq!(t.root_digest().as_bytes(), &root[..]);
    assert!(t.verify().unwrap());
    assert!(t.contains_leaf_data(b"b"));
    assert!(!t.contains_leaf_data(b"z"));
}

#[test]
fn test_three_blocks() {
    let t = build("sha256", vec![b"a", b"b", b"c"]).unwrap();

    let hab = sha256_pair(&sha256(b"a"), &sha256(b"b"));
    let hc = sha256(&sha256(b"c"));
    let root = sha256_pair(&hab, &hc);

    assert_eq!(t.root_digest().as_bytes(), &root[..]);
    assert!(t.verify().unwrap());
}

#[test]
fn test_single_block() {
    let t = build("sha256", vec![b"a"]).unwrap();

    assert_eq!(
        t.root_digest().to_hex(),
        "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb"
    );
    assert!(t.contains_leaf_data(b"a"));
    assert!(t.verify().unwrap());
}

#[test]
fn test_deterministic() {
    let blocks: Vec<Vec<u8>> = (0u32..100).map(|i| i.to_le_bytes().to_vec()).collect();
    let builder = TreeBuilder::new(HashAlgorithm::Sha256);

    let first = builder.build(blocks.clone()).unwrap();
    for _ in 0..3 {
        assert_eq!(builder.build(blocks.clone()).unwrap().root_digest(), first.root_digest());
    }
}

#[test]
fn test_large_parallel_tree() {
    let blocks: Vec<Vec<u8>> = (0u32..5000).map(|i| format!("block-{}", i).into_bytes()).collect();
    let t = TreeBuilder::new(HashAlgorithm::Sha256).build(blocks.clone()).unwrap();
    let serial = TreeBuilder::new(HashAlgorithm::Sha256)
        .with_parallel_threshold(usize::MAX)
        .build(blocks)
        .unwrap();

    assert_eq!(t.leaf_count(), 5000);
    assert_eq!(t.height(), 14);
    assert_eq!(t.root_digest(), serial.root_digest());
    assert!(t.verify().unwrap());
    assert!(t.contains_leaf_data(b"block-4999"));
    assert!(!t.contains_leaf_data(b"block-5000"));
}
