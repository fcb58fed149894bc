// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Combined capacity estimation.
//!
//! Delegates to the selected algorithm's raw capacity and folds in the
//! compression stage's size estimate when compression is enabled. Pure
//! function of its arguments so a UI can live-update a capacity indicator
//! without touching any other engine state.

use crate::stego::compress;
use crate::stego::Algorithm;

/// Maximum payload size (bytes) a carrier of the given dimensions can hold
/// under the given settings.
///
/// With `compress` set this is an estimate assuming typical text
/// compressibility; `encode_message` still enforces the actual
/// post-compression fit and raises `CapacityExceeded` on overflow.
pub fn calculate_image_capacity(algorithm: Algorithm, width: u32, height: u32, compress: bool) -> usize {
    let raw = algorithm.method().capacity(width, height);
    if compress {
        compress::approx_size_after_compression(raw)
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_algorithm_capacity_without_compression() {
        assert_eq!(
            calculate_image_capacity(Algorithm::Lsb, 64, 64, false),
            Algorithm::Lsb.method().capacity(64, 64)
        );
        assert_eq!(
            calculate_image_capacity(Algorithm::GraphTheory, 64, 64, false),
            Algorithm::GraphTheory.method().capacity(64, 64)
        );
    }

    #[test]
    fn compression_raises_the_estimate() {
        for algorithm in [Algorithm::Lsb, Algorithm::GraphTheory] {
            let plain = calculate_image_capacity(algorithm, 64, 64, false);
            let compressed = calculate_image_capacity(algorithm, 64, 64, true);
            assert!(compressed >= plain, "{compressed} < {plain}");
        }
    }

    #[test]
    fn tiny_image_has_zero_capacity() {
        assert_eq!(calculate_image_capacity(Algorithm::Lsb, 4, 4, false), 0);
        assert_eq!(calculate_image_capacity(Algorithm::GraphTheory, 4, 4, true), 0);
    }
}
