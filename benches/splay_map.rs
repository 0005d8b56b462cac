use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng, XorShiftRng};
use splay_collections::SplayMap;
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 100;
const HOT_KEYS: usize = 8;

fn gen_pairs() -> Vec<(u32, u32)> {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    (0..NUM_OF_OPERATIONS)
        .map(|_| (rng.next_u32(), rng.next_u32()))
        .collect()
}

fn bench_btreemap_insert(c: &mut Criterion) {
    let pairs = gen_pairs();
    c.bench_function("bench btreemap insert", move |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &(key, val) in &pairs {
                map.insert(key, val);
            }
        })
    });
}

fn bench_btreemap_get(c: &mut Criterion) {
    let pairs = gen_pairs();
    let map: BTreeMap<u32, u32> = pairs.iter().cloned().collect();

    c.bench_function("bench btreemap get", move |b| {
        b.iter(|| {
            for (key, _) in &pairs {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_splay_map_insert(c: &mut Criterion) {
    let pairs = gen_pairs();
    c.bench_function("bench splay map insert", move |b| {
        b.iter(|| {
            let mut map = SplayMap::new();
            for &(key, val) in &pairs {
                map.insert(key, val);
            }
        })
    });
}

fn bench_splay_map_get(c: &mut Criterion) {
    let pairs = gen_pairs();
    let mut map: SplayMap<u32, u32> = pairs.iter().cloned().collect();

    c.bench_function("bench splay map get", move |b| {
        b.iter(|| {
            for (key, _) in &pairs {
                black_box(map.try_get(key));
            }
        })
    });
}

fn bench_splay_map_peek(c: &mut Criterion) {
    let pairs = gen_pairs();
    let map: SplayMap<u32, u32> = pairs.iter().cloned().collect();

    c.bench_function("bench splay map peek", move |b| {
        b.iter(|| {
            for (key, _) in &pairs {
                black_box(map.peek(key));
            }
        })
    });
}

fn bench_splay_map_hot_keys(c: &mut Criterion) {
    let pairs = gen_pairs();
    let mut map: SplayMap<u32, u32> = pairs.iter().cloned().collect();
    let hot_keys: Vec<u32> = pairs.iter().take(HOT_KEYS).map(|pair| pair.0).collect();

    c.bench_function("bench splay map hot keys", move |b| {
        b.iter(|| {
            for _ in 0..NUM_OF_OPERATIONS / HOT_KEYS {
                for key in &hot_keys {
                    black_box(map.try_get(key));
                }
            }
        })
    });
}

criterion_group!(
    benches,
    bench_btreemap_insert,
    bench_btreemap_get,
    bench_splay_map_insert,
    bench_splay_map_get,
    bench_splay_map_peek,
    bench_splay_map_hot_keys,
);
criterion_main!(benches);
