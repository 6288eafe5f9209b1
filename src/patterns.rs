//! Provides record and key patterns useful for testing and benchmarking the ordering utility.
//!
//! All patterns derive from one seed per process. Set `OVERRIDE_SEED` to reproduce a failure.

use std::env;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;
use rand::prelude::*;
use serde_json::{json, Map, Value};

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    random_vec(len)
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // :.:.:.::
    let mut rng = new_seed();

    // Abstracting over ranges in Rust :(
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    (0..len).map(|_| 66).collect::<Vec<_>>()
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect::<Vec<_>>()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect::<Vec<_>>()
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random_vec(len);
    let chunks_size = (len / saw_count.max(1)).max(1);
    let saw_directions = random_uniform((len / chunks_size) + 1, 0..=1);

    for (i, chunk) in vals.chunks_mut(chunks_size).enumerate() {
        if saw_directions[i] == 0 {
            chunk.sort();
        } else {
            chunk.sort_by_key(|&e| std::cmp::Reverse(e));
        }
    }

    vals
}

/// Priority keys as the display layer produces them: small positive integers, with roughly
/// `falsy_percent` percent of them set to 0, which the ordering utility treats as unset.
pub fn priorities(len: usize, falsy_percent: f64) -> Vec<i32> {
    let mut rng = new_seed();
    let max_priority = ((len as f64).sqrt().round() as i32).max(2);

    (0..len)
        .map(|_| {
            if rng.gen_bool((falsy_percent / 100.0).clamp(0.0, 1.0)) {
                0
            } else {
                rng.gen_range(1..=max_priority)
            }
        })
        .collect()
}

/// JSON records `{"id": i, <field>: key}` built from `keys`. A key of 0 leaves the field out of
/// every other record and stores an explicit `0` or `null` in the rest.
pub fn records(field: &str, keys: &[i32]) -> Vec<Value> {
    keys.iter()
        .enumerate()
        .map(|(id, &key)| {
            let mut fields = Map::new();
            fields.insert("id".to_owned(), json!(id));

            if key != 0 {
                fields.insert(field.to_owned(), json!(key));
            } else if id % 2 == 0 {
                fields.insert(field.to_owned(), if id % 4 == 0 { json!(0) } else { Value::Null });
            }

            Value::Object(fields)
        })
        .collect()
}

/// Overwrites the default behavior so that each call to a random derived pattern yields new random
/// values.
///
/// By default `patterns::random(4)` will yield the same values per process invocation.
/// For benchmarks it's advised to use call this function.
pub fn disable_fixed_seed() {
    USE_FIXED_SEED.store(false, Ordering::Release);
}

pub fn random_init_seed() -> u64 {
    if USE_FIXED_SEED.load(Ordering::Acquire) {
        static SEED: OnceCell<u64> = OnceCell::new();
        *SEED.get_or_init(|| {
            env::var("OVERRIDE_SEED")
                .ok()
                .and_then(|seed| u64::from_str(&seed).ok())
                .unwrap_or_else(|| thread_rng().gen())
        })
    } else {
        thread_rng().gen()
    }
}

// --- Private ---

static USE_FIXED_SEED: AtomicBool = AtomicBool::new(true);

fn new_seed() -> StdRng {
    // Fixed for the whole process unless `disable_fixed_seed` was called.
    rand::SeedableRng::seed_from_u64(random_init_seed())
}

fn random_vec(len: usize) -> Vec<i32> {
    let mut rng = new_seed();

    (0..len).map(|_| rng.gen::<i32>()).collect()
}
