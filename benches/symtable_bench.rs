use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use symtable::{ListSymTable, SymTable};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_put_fresh_50k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(1).take(50_000).map(key).collect();
    c.bench_function("symtable::put_fresh_50k", |b| {
        b.iter_batched(
            SymTable::<u64>::new,
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    let _ = t.put(k, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_put_presized_50k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(3).take(50_000).map(key).collect();
    c.bench_function("symtable::put_presized_50k", |b| {
        b.iter_batched(
            || SymTable::<u64>::with_min_buckets(50_000),
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    let _ = t.put(k, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_random_5k(c: &mut Criterion) {
    c.bench_function("symtable::remove_random_5k_of_50k", |b| {
        b.iter_batched(
            || {
                let mut t = SymTable::new();
                let keys: Vec<String> = lcg(5).take(50_000).map(key).collect();
                for (i, k) in keys.iter().enumerate() {
                    let _ = t.put(k, i as u64);
                }
                // Precompute 5k unique indices via LCG
                let n = keys.len();
                let mut sel = std::collections::HashSet::with_capacity(5_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 5_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert((s as usize) % n);
                }
                let to_remove: Vec<String> = sel.into_iter().map(|i| keys[i].clone()).collect();
                (t, to_remove)
            },
            |(mut t, to_remove)| {
                for k in &to_remove {
                    black_box(t.remove(k));
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_and_miss(c: &mut Criterion) {
    let mut t = SymTable::new();
    let keys: Vec<String> = lcg(7).take(50_000).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        let _ = t.put(k, i as u64);
    }
    let n = keys.len();
    let mut s = 0x9e3779b97f4a7c15u64;
    let hits: Vec<&String> = (0..10_000)
        .map(|_| {
            s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
            &keys[(s as usize) % n]
        })
        .collect();
    let misses: Vec<String> = lcg(0xdead_beef).take(10_000).map(key).collect();

    c.bench_function("symtable::get_hit_10k_on_50k", |b| {
        b.iter(|| {
            for k in &hits {
                black_box(t.get(k));
            }
        })
    });
    c.bench_function("symtable::get_miss_10k_on_50k", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(t.get(k));
            }
        })
    });
}

fn bench_map_all(c: &mut Criterion) {
    let mut t = SymTable::new();
    for (i, x) in lcg(999).take(50_000).enumerate() {
        let _ = t.put(&key(x), i as u64);
    }
    c.bench_function("symtable::map_all_50k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            t.map(|_, v| sum = sum.wrapping_add(*v));
            black_box(sum)
        })
    });
}

fn bench_list_baseline(c: &mut Criterion) {
    let keys: Vec<String> = lcg(13).take(2_000).map(key).collect();
    c.bench_function("list::put_then_get_2k", |b| {
        b.iter_batched(
            ListSymTable::<u64>::new,
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    let _ = t.put(k, i as u64);
                }
                for k in &keys {
                    black_box(t.get(k));
                }
                black_box(t)
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
    name = benches_put;
    config = bench_config();
    targets = bench_put_fresh_50k, bench_put_presized_50k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_remove_random_5k,
              bench_get_hit_and_miss,
              bench_map_all,
              bench_list_baseline
}
criterion_main!(benches_put, benches_ops);
