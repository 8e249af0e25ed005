//! # Groestl-Chain Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | PoW hash | single header, batch per backend |
//! | Compact codec | decode + encode |
//! | Difficulty | DGWv1 (120 blocks), DGWv3 (24 blocks) |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gc_difficulty::{decode_compact, encode_compact, DifficultyVerifier, NetworkParams};
use gc_pow_hash::{create_backend, pow_hash, Backend};
use gc_tests::fixtures::{candidate, linked_chain};
use rand::Rng;
use std::time::Duration;

fn bench_pow_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("pow-hash");
    group.measurement_time(Duration::from_secs(5));

    let header = [0x5au8; 80];
    group.throughput(Throughput::Bytes(80));
    group.bench_function("header", |b| b.iter(|| pow_hash(black_box(&header))));

    let mut rng = rand::thread_rng();
    for size in [64usize, 1024] {
        let inputs: Vec<Vec<u8>> = (0..size)
            .map(|_| (0..80).map(|_| rng.gen()).collect())
            .collect();
        group.throughput(Throughput::Elements(size as u64));

        for backend in [Backend::Portable, Backend::Parallel] {
            let Ok(hasher) = create_backend(backend) else {
                continue;
            };
            group.bench_with_input(
                BenchmarkId::new(backend.to_string(), size),
                &inputs,
                |b, inputs| b.iter(|| hasher.hash_batch(black_box(inputs))),
            );
        }
    }
    group.finish();
}

fn bench_compact(c: &mut Criterion) {
    c.bench_function("compact-roundtrip", |b| {
        b.iter(|| {
            let target = decode_compact(black_box(0x1c00_ffff)).unwrap();
            encode_compact(&target)
        })
    });
}

fn bench_retarget(c: &mut Criterion) {
    let mut group = c.benchmark_group("difficulty");
    let verifier = DifficultyVerifier::new(NetworkParams::mainnet()).unwrap();

    let (store, tip) = linked_chain(1_000, 1_200, 0x1e0f_ffff, |_| 60);
    let header = candidate(&tip, 0x1e0f_ffff, 60);
    group.bench_function("dgw-v1", |b| {
        b.iter(|| verifier.check_difficulty(&tip, black_box(&header), &store))
    });

    let (store, tip) = linked_chain(99_950, 100_100, 0x1c00_ffff, |_| 60);
    let header = candidate(&tip, 0x1c00_ffff, 60);
    group.bench_function("dgw-v3", |b| {
        b.iter(|| verifier.check_difficulty(&tip, black_box(&header), &store))
    });
    group.finish();
}

criterion_group!(benches, bench_pow_hash, bench_compact, bench_retarget);
criterion_main!(benches);
