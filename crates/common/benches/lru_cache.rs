// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Benchmarks for the LRU cache hit, miss and eviction paths.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nodekit_common::cache::LruCache;

const CAPACITIES: [usize; 3] = [128, 4_096, 65_536];

fn filled(capacity: usize) -> LruCache<u64, [u8; 32]> {
    let cache = LruCache::try_new(capacity).unwrap();
    for key in 0..capacity as u64 {
        cache.add(key, [0; 32]).unwrap();
    }
    cache
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_get_hit");

    for capacity in CAPACITIES {
        let cache = filled(capacity);
        let mut key = 0u64;
        group.bench_function(BenchmarkId::from_parameter(capacity), |b| {
            b.iter(|| {
                key = (key + 1) % capacity as u64;
                black_box(cache.get(black_box(&key)).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_get_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_get_miss");

    for capacity in CAPACITIES {
        let cache = filled(capacity);
        let key = u64::MAX;
        group.bench_function(BenchmarkId::from_parameter(capacity), |b| {
            b.iter(|| black_box(cache.get(black_box(&key)).unwrap()));
        });
    }

    group.finish();
}

fn bench_add_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_add_evicting");

    for capacity in CAPACITIES {
        let cache = filled(capacity);
        let mut key = capacity as u64;
        group.bench_function(BenchmarkId::from_parameter(capacity), |b| {
            b.iter(|| {
                key += 1;
                black_box(cache.add(black_box(key), [0; 32]).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_get_miss, bench_add_evicting);
criterion_main!(benches);
