//! Compares `VlVec` against `Vec` and `SmallVec` on the operations that can
//! move storage: push, pop, insert and remove, plus plain indexing.

use core::hint;
use criterion::{BatchSize, Bencher, Criterion, criterion_group, criterion_main};
use smallvec::SmallVec;
use std::sync::OnceLock;
use vlvec::VlVec;

use rand::Rng;

const INLINE: usize = 16;

/// A function used to generate a random amount of data.
///
/// Random sizes keep the compiler from specializing the loops on a known length.
#[inline(never)]
fn gen_one(start: usize, end: usize) -> usize {
    let mut rng = rand::rng();
    rng.random_range(start..end)
}

/// Just below the inline threshold, so `VlVec` and `SmallVec` stay inline.
static SMALL_BOUND: OnceLock<usize> = OnceLock::new();

/// Crosses the threshold and several reallocations.
static LARGE_BOUND: OnceLock<usize> = OnceLock::new();

#[inline(never)]
fn gen_rand(len: usize, start: u64, end: u64) -> Box<[u64]> {
    let mut rng = rand::rng();
    let mut vec: Vec<u64> = Vec::with_capacity(len);
    for _ in 0..len {
        vec.push(rng.random_range(start..end));
    }
    vec.into_boxed_slice()
}

/// The operations every benchmarked container shares.
trait VecLike: Clone + FromIterator<u64> {
    fn new_empty() -> Self;
    fn push(&mut self, value: u64);
    fn pop(&mut self) -> Option<u64>;
    fn insert(&mut self, index: usize, value: u64);
    fn remove(&mut self, index: usize) -> u64;
    fn get_mut(&mut self, index: usize) -> &mut u64;
}

macro_rules! impl_vec_like {
    ($name:ty) => {
        impl VecLike for $name {
            #[inline(always)]
            fn new_empty() -> Self {
                Self::new()
            }
            #[inline(always)]
            fn push(&mut self, value: u64) {
                <$name>::push(self, value)
            }
            #[inline(always)]
            fn pop(&mut self) -> Option<u64> {
                <$name>::pop(self)
            }
            #[inline(always)]
            fn insert(&mut self, index: usize, value: u64) {
                <$name>::insert(self, index, value);
            }
            #[inline(always)]
            fn remove(&mut self, index: usize) -> u64 {
                <$name>::remove(self, index)
            }
            #[inline(always)]
            fn get_mut(&mut self, index: usize) -> &mut u64 {
                &mut self[index]
            }
        }
    };
}

impl_vec_like!(Vec<u64>);
impl_vec_like!(SmallVec<u64, INLINE>);
impl_vec_like!(VlVec<u64, INLINE>);

macro_rules! gen_bench_group {
    ($c:ident => $fn_name:ident) => {{
        let mut group = $c.benchmark_group(stringify!($fn_name));
        group.bench_function("Vec", |b| $fn_name::<Vec<u64>>(b));
        group.bench_function("SmallVec", |b| $fn_name::<SmallVec<u64, INLINE>>(b));
        group.bench_function("VlVec", |b| $fn_name::<VlVec<u64, INLINE>>(b));
    }};
}

fn bench_vec(c: &mut Criterion) {
    SMALL_BOUND.get_or_init(|| gen_one(12, 15));
    LARGE_BOUND.get_or_init(|| gen_one(4000, 4003));
    gen_bench_group!(c => new_empty);
    gen_bench_group!(c => push_small);
    gen_bench_group!(c => push_large);
    gen_bench_group!(c => push_pop_threshold);
    gen_bench_group!(c => pop_large);
    gen_bench_group!(c => insert_small);
    gen_bench_group!(c => insert_large);
    gen_bench_group!(c => remove_small);
    gen_bench_group!(c => remove_large);
    gen_bench_group!(c => index_small);
}

#[inline(never)]
fn new_empty<T: VecLike>(b: &mut Bencher) {
    b.iter(|| hint::black_box(T::new_empty()));
}

/// Fills an empty vector below the inline threshold.
#[inline(never)]
fn push_small<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*SMALL_BOUND.get().unwrap(), 0, 9999);
    let index = gen_one(0, data.len());

    b.iter(|| {
        let mut vec = T::new_empty();
        for item in &data {
            vec.push(*item);
        }
        hint::black_box(*vec.get_mut(index))
    });
}

/// Fills an empty vector far past the threshold, through every reallocation.
#[inline(never)]
fn push_large<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*LARGE_BOUND.get().unwrap(), 0, 9999);
    let index = gen_rand(10, 0, data.len() as u64);

    b.iter(|| {
        let mut vec = T::new_empty();
        let mut counter = 0u64;
        for item in &data {
            vec.push(*item);
        }
        for item in &index {
            counter += *vec.get_mut(*item as usize);
        }
        hint::black_box(counter)
    });
}

/// Pushes and pops across the inline threshold.
///
/// `VlVec` spills on the way up and moves back inline on the way down.
#[inline(never)]
fn push_pop_threshold<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(INLINE + gen_one(2, 4), 0, 9999);

    b.iter(|| {
        let mut vec = T::new_empty();
        let mut counter = 0u64;
        for item in &data {
            vec.push(*item);
        }
        while let Some(item) = vec.pop() {
            counter += item;
        }
        hint::black_box(counter)
    });
}

#[inline(never)]
fn pop_large<T: VecLike>(b: &mut Bencher) {
    let data: T = gen_rand(*LARGE_BOUND.get().unwrap(), 0, 9999)
        .iter()
        .copied()
        .collect();

    b.iter_batched(
        || data.clone(),
        |mut vec| {
            let mut counter = 0u64;
            while let Some(item) = vec.pop() {
                counter += item;
            }
            hint::black_box(counter)
        },
        BatchSize::SmallInput,
    );
}

#[inline(never)]
fn insert_small<T: VecLike>(b: &mut Bencher) {
    let data: T = gen_rand(10, 0, 9999).iter().copied().collect();
    let num = *SMALL_BOUND.get().unwrap();

    b.iter_batched(
        || data.clone(),
        |mut vec| {
            vec.insert((num + 4) % 10, 6);
            vec.insert((num + 7) % 11, 7);
            vec.insert((num + 9) % 12, 8);
            vec.insert((num + 14) % 13, 11);
            hint::black_box(*vec.get_mut(num % 14))
        },
        BatchSize::SmallInput,
    );
}

#[inline(never)]
fn insert_large<T: VecLike>(b: &mut Bencher) {
    let num = *LARGE_BOUND.get().unwrap();
    let data: T = gen_rand(num, 0, 9999).iter().copied().collect();

    b.iter_batched(
        || data.clone(),
        |mut vec| {
            vec.insert(num % 12 + 3500, 6);
            vec.insert(num % 20 + 2000, 7);
            vec.insert(num % 16 + 1000, 8);
            vec.insert(num % 13, 11);
            hint::black_box(*vec.get_mut(num % 4000))
        },
        BatchSize::SmallInput,
    );
}

/// Removes from a vector just past the threshold.
///
/// `VlVec` moves back inline during the batch.
#[inline(never)]
fn remove_small<T: VecLike>(b: &mut Bencher) {
    let data: T = gen_rand(INLINE + 2, 0, 9999).iter().copied().collect();
    let num = *SMALL_BOUND.get().unwrap();

    b.iter_batched(
        || data.clone(),
        |mut vec| {
            let mut counter = 0u64;
            counter += vec.remove((num + 14) % 18);
            counter += vec.remove((num + 9) % 17);
            counter += vec.remove((num + 7) % 16);
            counter += vec.remove((num + 4) % 15);
            hint::black_box(counter)
        },
        BatchSize::SmallInput,
    );
}

#[inline(never)]
fn remove_large<T: VecLike>(b: &mut Bencher) {
    let num = *LARGE_BOUND.get().unwrap();
    let data: T = gen_rand(num, 0, 9999).iter().copied().collect();

    b.iter_batched(
        || data.clone(),
        |mut vec| {
            let mut counter = 0u64;
            counter += vec.remove(num % 12 + 3500);
            counter += vec.remove(num % 20 + 2000);
            counter += vec.remove(num % 16 + 1000);
            counter += vec.remove(num % 13);
            hint::black_box(counter)
        },
        BatchSize::SmallInput,
    );
}

#[inline(never)]
fn index_small<T: VecLike>(b: &mut Bencher) {
    let mut vec: T = gen_rand(INLINE, 0, 9999).iter().copied().collect();
    let range = gen_rand(10, 0, INLINE as u64);

    b.iter(|| {
        let mut counter = 0u64;
        for item in &range {
            *vec.get_mut(*item as usize) += *item;
            counter += *vec.get_mut(*item as usize);
        }
        hint::black_box(counter)
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(200)
        .warm_up_time(core::time::Duration::from_secs(3))
        .measurement_time(core::time::Duration::from_secs(8))
        .confidence_level(0.96)
        .noise_threshold(0.04);
    targets = bench_vec,
}
criterion_main!(benches);
