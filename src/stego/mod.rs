// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Steganographic encoding and decoding.
//!
//! Two embedding algorithms share one contract ([`StegoAlgorithm`]):
//!
//! - **LSB** ([`lsb::LsbEmbedding`]): one payload bit per pixel, written
//!   into sample LSBs in seed-keyed order. Maximum capacity, but every
//!   payload bit lands as an independent ±1 sample change.
//! - **Graph** ([`graph::GraphEmbedding`]): groups pixels into vertices of
//!   four samples each encoding one nibble as a sum modulo 16, then solves
//!   a minimum-spanning cost graph to spread adjustments into many small,
//!   drift-cancelling sample changes.
//!
//! Both algorithms derive their pixel visiting order from the same seeded
//! permutation ([`permute`]) and embed the same length + CRC frame
//! ([`frame`]), so decode can validate structure instead of trusting it.
//! The pipeline ([`pipeline`]) composes compression and encryption around
//! the algorithms.

pub mod capacity;
pub mod compress;
pub mod crypto;
pub mod error;
pub mod frame;
pub mod graph;
pub mod lsb;
pub mod permute;
mod pipeline;

pub use error::StegoError;

use crate::image::CoverImage;

/// Maximum total pixel count for a carrier (width × height).
pub const MAX_PIXELS: u64 = 16_000_000;

/// Common contract for embedding algorithms.
///
/// All operations are pure functions of their inputs: no shared mutable
/// state, safe to invoke concurrently from independent calls. `encode`
/// returns a new image and never mutates the caller's carrier.
pub trait StegoAlgorithm {
    /// Maximum payload size (bytes) a carrier of the given dimensions can
    /// hold, net of the fixed frame overhead.
    fn capacity(&self, width: u32, height: u32) -> usize;

    /// Embed `payload` into a copy of `cover` using the seed-keyed order.
    fn encode(&self, cover: &CoverImage, seed: &str, payload: &[u8]) -> Result<CoverImage, StegoError>;

    /// Recover the payload embedded by [`StegoAlgorithm::encode`] with the
    /// same seed.
    fn decode(&self, stego: &CoverImage, seed: &str) -> Result<Vec<u8>, StegoError>;
}

/// Selects which embedding algorithm the pipeline uses.
///
/// Must match between encode and decode of the same artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// Least-significant-bit embedding, one bit per pixel.
    Lsb,
    /// Graph-theoretic embedding, one nibble per four-pixel vertex.
    GraphTheory,
}

impl Algorithm {
    /// The algorithm implementation behind this selector.
    pub fn method(self) -> &'static dyn StegoAlgorithm {
        match self {
            Self::Lsb => &lsb::LsbEmbedding,
            Self::GraphTheory => &graph::GraphEmbedding,
        }
    }
}

/// Validate carrier dimensions before any embedding work.
///
/// # Errors
/// [`StegoError::AlgorithmInternal`] for an empty or oversized carrier.
pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<(), StegoError> {
    if width == 0 || height == 0 {
        return Err(StegoError::AlgorithmInternal("carrier image has no pixels"));
    }
    if width as u64 * height as u64 > MAX_PIXELS {
        return Err(StegoError::AlgorithmInternal("carrier image exceeds 16 megapixels"));
    }
    Ok(())
}

pub use capacity::calculate_image_capacity;
pub use pipeline::{decode_message, encode_message, StegoConfig};

#[cfg(test)]
mod dimension_tests {
    use super::*;

    #[test]
    fn valid_dimensions() {
        assert!(validate_dimensions(64, 64).is_ok());
        assert!(validate_dimensions(4000, 4000).is_ok());
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(validate_dimensions(0, 64).is_err());
        assert!(validate_dimensions(64, 0).is_err());
    }

    #[test]
    fn too_many_pixels_rejected() {
        // 4001 * 4000 = 16_004_000 > 16M
        assert!(validate_dimensions(4001, 4000).is_err());
        // 4000 * 4000 = 16M exactly — OK
        assert!(validate_dimensions(4000, 4000).is_ok());
    }

    #[test]
    fn both_selectors_resolve() {
        assert!(Algorithm::Lsb.method().capacity(64, 64) > 0);
        assert!(Algorithm::GraphTheory.method().capacity(64, 64) > 0);
    }
}
