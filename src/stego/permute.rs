// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Seed-keyed pixel ordering.
//!
//! Both embedding algorithms visit pixels in a pseudo-random order derived
//! from the user's seed string: a Fisher-Yates shuffle driven by a ChaCha20
//! PRNG whose 32-byte key comes from Argon2id over the seed. Identical seed
//! + identical pixel count reproduce the identical order on encode and
//! decode — this is part of the wire contract, so any change here breaks
//! compatibility with previously encoded images.
//!
//! # Cross-platform portability
//!
//! The Fisher-Yates shuffle uses `u32` for `gen_range` (not `usize`) to
//! ensure identical permutations on all platforms. `usize` is 32-bit on
//! WASM but 64-bit on native, which causes `rand::Rng::gen_range` to
//! consume different amounts of PRNG entropy per step — producing
//! completely different shuffles.

use argon2::Argon2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Fixed salt for deriving the permutation key from the seed string.
/// Intentionally constant so encode and decode derive the same key from the
/// seed alone. Domain-separated from the encryption key salt.
const PERMUTATION_SALT: &[u8; 16] = b"stegomat-perm-v1";

/// Derive the 32-byte permutation key from the seed string.
///
/// Deterministic given the seed, so both encoder and decoder agree.
pub fn derive_permutation_key(seed: &str) -> [u8; 32] {
    let mut output = [0u8; 32];
    Argon2::default()
        .hash_password_into(seed.as_bytes(), PERMUTATION_SALT, &mut output)
        .expect("Argon2 permutation key derivation should not fail");
    output
}

/// Apply Fisher-Yates shuffle using `u32` for portable cross-platform behavior.
fn shuffle_portable(order: &mut [usize], key: &[u8; 32]) {
    let mut rng = ChaCha20Rng::from_seed(*key);
    let n = order.len();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=(i as u32)) as usize;
        order.swap(i, j);
    }
}

/// Produce the seeded visiting order over `n` pixel slots.
///
/// Returns a permutation of `0..n`. The LSB algorithm consumes one slot per
/// payload bit; the graph algorithm chunks consecutive slots into vertices.
///
/// # Panics
/// Debug-asserts `n <= u32::MAX` — the dimension guard in `stego::mod`
/// rejects such carriers long before this point.
pub fn pixel_order(seed: &str, n: usize) -> Vec<usize> {
    debug_assert!(n <= u32::MAX as usize, "pixel count exceeds portable shuffle range");
    let key = derive_permutation_key(seed);
    let mut order: Vec<usize> = (0..n).collect();
    shuffle_portable(&mut order, &key);
    order
}
