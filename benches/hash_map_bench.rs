use base_collections::{BuildHasherProvider, DefaultComparer, HashMap, MapOptions, MultiHashMap};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_add_fresh_100k(c: &mut Criterion) {
    c.bench_function("hash_map::add_fresh_100k", |b| {
        b.iter_batched(
            HashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.add(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });

    // Presized table: no rehash on the way up.
    c.bench_function("hash_map::add_presized_100k", |b| {
        b.iter_batched(
            || {
                HashMap::<String, u64>::with_options(MapOptions::default().with_capacity(1 << 18))
                    .unwrap()
            },
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.add(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("hash_map::add_fresh_100k_build_hasher", |b| {
        b.iter_batched(
            || {
                HashMap::with_providers(
                    MapOptions::default(),
                    BuildHasherProvider::<hashbrown::hash_map::DefaultHashBuilder>::default(),
                    DefaultComparer,
                )
                .unwrap()
            },
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.add(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_miss(c: &mut Criterion) {
    let mut m: HashMap<String, u64> = HashMap::new();
    let keys: Vec<String> = lcg(11).take(100_000).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.add(k.clone(), i as u64).unwrap();
    }
    let misses: Vec<String> = lcg(12).take(10_000).map(key).collect();

    c.bench_function("hash_map::get_hit_10k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for k in keys.iter().take(10_000) {
                sum = sum.wrapping_add(*m.get_value(k).unwrap());
            }
            black_box(sum)
        })
    });

    c.bench_function("hash_map::get_miss_10k", |b| {
        b.iter(|| {
            let mut found = 0usize;
            for k in &misses {
                found += m.contains_key(k).unwrap() as usize;
            }
            black_box(found)
        })
    });
}

fn bench_multi_add(c: &mut Criterion) {
    c.bench_function("multi_hash_map::add_10k_keys_x8", |b| {
        b.iter_batched(
            MultiHashMap::<u64, u64>::new,
            |mut m| {
                for x in lcg(21).take(10_000) {
                    for v in 0..8u64 {
                        m.add(x, v).unwrap();
                    }
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_add_fresh_100k, bench_get_hit_miss, bench_multi_add
}
criterion_main!(benches);
