use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, RngCore, SeedableRng};

use merkle_blocks::{HashAlgorithm, TreeBuilder, SMALL_TREE_BUILD};

fn random_blocks(n: usize, size: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(n as u64);
    (0..n)
        .map(|_| {
            let mut block = vec![0u8; size];
            rng.fill_bytes(&mut block);
            block
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for n in [256usize, 4096, 65536].iter() {
        let blocks = random_blocks(*n, 64);
        for alg in HashAlgorithm::ALL.iter() {
            group.bench_with_input(BenchmarkId::new(alg.name(), n), &blocks, |b, blocks| {
                b.iter(|| TreeBuilder::new(*alg).build(black_box(blocks.clone())).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_build_serial_vs_parallel(c: &mut Criterion) {
    let blocks = random_blocks(4 * SMALL_TREE_BUILD, 64);
    let mut group = c.benchmark_group("sha256_threshold");
    for threshold in [usize::MAX, SMALL_TREE_BUILD, 64].iter() {
        let builder = TreeBuilder::new(HashAlgorithm::Sha256).with_parallel_threshold(*threshold);
        group.bench_with_input(BenchmarkId::from_parameter(threshold), &blocks, |b, blocks| {
            b.iter(|| builder.build(black_box(blocks.clone())).unwrap())
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let blocks = random_blocks(4096, 64);
    let tree = TreeBuilder::new(HashAlgorithm::Sha256).build(blocks.clone()).unwrap();
    let last = blocks[blocks.len() - 1].clone();

    c.bench_function("sha256 verify 4096", |b| b.iter(|| tree.verify().unwrap()));
    c.bench_function("sha256 contains last of 4096", |b| {
        b.iter(|| tree.contains_leaf_data(black_box(&last)))
    });
}

criterion_group!(benches, bench_build, bench_build_serial_vs_parallel, bench_queries);
criterion_main!(benches);
