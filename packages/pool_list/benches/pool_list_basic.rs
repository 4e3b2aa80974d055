//! Basic benchmarks for the `pool_list` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::Instant;

use criterion::{Criterion, criterion_group, criterion_main};
use pool_list::PoolList;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

type TestItem = Vec<u8>;
const ITEM_SIZE: usize = 1024;
const SCOPE_COUNT: usize = 64;

fn new_list() -> PoolList<TestItem> {
    PoolList::new(|| vec![0; ITEM_SIZE])
}

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_list_basic");

    group.bench_function("build_empty", |b| {
        b.iter(|| drop(black_box(new_list())));
    });

    group.bench_function("acquire_new", |b| {
        b.iter_custom(|iters| {
            let mut lists = iter::repeat_with(new_list)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let start = Instant::now();

            for list in &mut lists {
                _ = black_box(list.acquire().unwrap());
            }

            start.elapsed()
        });
    });

    group.bench_function("acquire_reused", |b| {
        b.iter_custom(|iters| {
            let mut lists = iter::repeat_with(new_list)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            // Pre-warm each list with one inactive item.
            for list in &mut lists {
                list.scope(1).unwrap();
                list.clear();
            }

            let start = Instant::now();

            for list in &mut lists {
                _ = black_box(list.acquire().unwrap());
            }

            start.elapsed()
        });
    });

    group.bench_function("scope_cycle_warm", |b| {
        let mut list = new_list();
        list.scope(SCOPE_COUNT).unwrap();

        b.iter(|| {
            black_box(list.scope(black_box(0_usize)).unwrap());
            black_box(list.scope(black_box(SCOPE_COUNT)).unwrap());
        });
    });

    group.bench_function("apply_with_warm", |b| {
        let others = (0..SCOPE_COUNT)
            .map(|i| u8::try_from(i % 256).unwrap())
            .collect::<Vec<_>>();

        let mut list = new_list();
        list.scope(SCOPE_COUNT).unwrap();

        b.iter(|| {
            black_box(
                list.apply_with(black_box(&others), |value, item| {
                    if let Some(first) = item.first_mut() {
                        *first = *value;
                    }
                })
                .unwrap(),
            );
        });
    });

    group.finish();
}
