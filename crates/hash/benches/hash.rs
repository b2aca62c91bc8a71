// Copyright 2024-2025 Irreducible Inc.

use blake2s_hash::{digest::VariableOutput, Blake2s, Blake2sVar, Config};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use digest::Update;
use rand::{thread_rng, RngCore};

fn bench_blake2s(c: &mut Criterion) {
	blake2s_utils::tracing::init_tracing();

	let mut group = c.benchmark_group("BLAKE2s");

	let mut rng = thread_rng();

	const N: usize = 1 << 16;
	let mut data = vec![0u8; N];
	rng.fill_bytes(&mut data);
	group.throughput(Throughput::Bytes(N as u64));

	group.bench_function("Blake2s", |bench| {
		bench.iter(|| {
			let mut hasher = Blake2s::default();
			hasher.update(&data).unwrap();
			hasher.digest().to_vec()
		})
	});

	let config = Config::new()
		.key([0x42u8; 32])
		.salt([1u8; 8])
		.personalization([2u8; 8]);
	group.bench_function("Blake2s keyed", |bench| {
		bench.iter(|| {
			let mut hasher = Blake2s::with_config(32, &config).unwrap();
			hasher.update(&data).unwrap();
			hasher.digest().to_vec()
		})
	});

	group.bench_function("Blake2sVar", |bench| {
		bench.iter(|| {
			Blake2sVar::new(32)
				.unwrap()
				.chain(&data)
				.finalize_boxed()
		})
	});

	group.bench_function("Blake2s-RustCrypto", |bench| {
		bench.iter(|| <blake2::Blake2s256 as blake2::Digest>::digest(&data))
	});

	group.finish()
}

fn bench_blake2s_small_updates(c: &mut Criterion) {
	let mut group = c.benchmark_group("BLAKE2s small updates");

	const N: usize = 1 << 12;
	let data = [0x5au8; N];

	for chunk_size in [1, 7, 64, 65] {
		group.throughput(Throughput::Bytes(N as u64));
		group.bench_function(format!("chunk {chunk_size}"), |bench| {
			bench.iter(|| {
				let mut hasher = Blake2s::default();
				for chunk in data.chunks(chunk_size) {
					hasher.update(chunk).unwrap();
				}
				hasher.digest().to_vec()
			})
		});
	}

	group.finish()
}

criterion_group!(hash, bench_blake2s, bench_blake2s_small_updates);
criterion_main!(hash);
