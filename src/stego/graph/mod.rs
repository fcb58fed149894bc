// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Graph-theoretic embedding.
//!
//! The seeded pixel order is chunked into vertices of four samples; each
//! vertex encodes one payload nibble as its sample sum modulo 16. Encoding
//! adjusts sample groups so every aggregate matches its nibble, using the
//! cost graph in [`cost`] to spread the changes into many small,
//! drift-cancelling steps. Decoding needs no graph: regrouping from the
//! same seed and recomputing the aggregates recovers the nibble stream,
//! which is exactly why the planning policy is free to change *how* a
//! target is reached but never *what* the final aggregate is.

pub mod cost;
pub mod vertex;

use log::debug;

pub use vertex::{MODULO, SAMPLES_VERTEX_RATIO};

use crate::image::CoverImage;
use crate::stego::error::StegoError;
use crate::stego::frame::{self, FRAME_OVERHEAD};
use crate::stego::permute;
use crate::stego::{validate_dimensions, StegoAlgorithm};
use vertex::{vertex_value_of, Vertex};

/// Payload units (nibbles) per byte.
pub const UNITS_PER_BYTE: usize = 2;

/// Graph-theoretic embedding algorithm. Stateless; vertices live per call.
pub struct GraphEmbedding;

impl StegoAlgorithm for GraphEmbedding {
    /// `floor(pixels / SAMPLES_VERTEX_RATIO)` vertices, two nibbles per
    /// byte, minus the frame overhead.
    fn capacity(&self, width: u32, height: u32) -> usize {
        let pixels = width as usize * height as usize;
        ((pixels / SAMPLES_VERTEX_RATIO) / UNITS_PER_BYTE).saturating_sub(FRAME_OVERHEAD)
    }

    fn encode(&self, cover: &CoverImage, seed: &str, payload: &[u8]) -> Result<CoverImage, StegoError> {
        validate_dimensions(cover.width(), cover.height())?;
        let pixels = cover.pixel_count();
        if pixels < SAMPLES_VERTEX_RATIO {
            return Err(StegoError::AlgorithmInternal("fewer pixels than one vertex needs"));
        }

        let nibbles = bytes_to_nibbles(&frame::build_frame(payload));
        let vertex_slots = pixels / SAMPLES_VERTEX_RATIO;
        if nibbles.len() > vertex_slots {
            return Err(StegoError::CapacityExceeded {
                required: payload.len(),
                available: self.capacity(cover.width(), cover.height()),
            });
        }

        debug!("graph encode: {} units into {} vertex slots", nibbles.len(), vertex_slots);

        let order = permute::pixel_order(seed, pixels);
        let mut vertices = Vec::with_capacity(nibbles.len());
        for (id, &unit) in nibbles.iter().enumerate() {
            let group = &order[id * SAMPLES_VERTEX_RATIO..(id + 1) * SAMPLES_VERTEX_RATIO];
            let group: [usize; SAMPLES_VERTEX_RATIO] = group.try_into().expect("chunk size is exact");
            let values = group.map(|idx| cover.sample(idx));
            vertices.push(Vertex::new(id, group, values, unit)?);
        }

        cost::plan_adjustments(&mut vertices)?;

        let mut stego = cover.clone();
        for v in &vertices {
            for (k, &idx) in v.pixels.iter().enumerate() {
                stego.set_sample(idx, v.target_values[k]);
            }
        }

        // Round-trip contract: re-deriving every aggregate from the written
        // samples must equal the intended unit.
        debug_assert!(vertices.iter().all(|v| {
            let written = v.pixels.map(|idx| stego.sample(idx));
            vertex_value_of(&written) == v.target
        }));

        Ok(stego)
    }

    fn decode(&self, stego: &CoverImage, seed: &str) -> Result<Vec<u8>, StegoError> {
        validate_dimensions(stego.width(), stego.height())?;
        let pixels = stego.pixel_count();
        if pixels < SAMPLES_VERTEX_RATIO {
            return Err(StegoError::AlgorithmInternal("fewer pixels than one vertex needs"));
        }

        let order = permute::pixel_order(seed, pixels);
        let vertex_slots = pixels / SAMPLES_VERTEX_RATIO;

        let mut nibbles = Vec::with_capacity(vertex_slots);
        for group in order.chunks_exact(SAMPLES_VERTEX_RATIO).take(vertex_slots) {
            let sum: u32 = group.iter().map(|&idx| stego.sample(idx) as u32).sum();
            nibbles.push((sum % MODULO as u32) as u8);
        }

        frame::parse_frame(&nibbles_to_bytes(&nibbles))
    }
}

/// Split bytes into nibbles, high nibble first.
fn bytes_to_nibbles(bytes: &[u8]) -> Vec<u8> {
    let mut nibbles = Vec::with_capacity(bytes.len() * UNITS_PER_BYTE);
    for &byte in bytes {
        nibbles.push(byte >> 4);
        nibbles.push(byte & 0x0F);
    }
    nibbles
}

/// Reassemble nibble pairs into bytes, high nibble first. A trailing
/// unpaired nibble (odd vertex count) is dropped — it can never belong to
/// the frame.
fn nibbles_to_bytes(nibbles: &[u8]) -> Vec<u8> {
    nibbles
        .chunks_exact(UNITS_PER_BYTE)
        .map(|pair| (pair[0] << 4) | (pair[1] & 0x0F))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textured_image(width: u32, height: u32) -> CoverImage {
        let samples: Vec<u8> = (0..width as usize * height as usize)
            .map(|i| (i.wrapping_mul(31) % 200 + 20) as u8)
            .collect();
        CoverImage::from_samples(width, height, samples).unwrap()
    }

    #[test]
    fn nibble_conversion_roundtrip() {
        let bytes = vec![0x00, 0xFF, 0xA5, 0x3C];
        let nibbles = bytes_to_nibbles(&bytes);
        assert_eq!(nibbles, vec![0x0, 0x0, 0xF, 0xF, 0xA, 0x5, 0x3, 0xC]);
        assert_eq!(nibbles_to_bytes(&nibbles), bytes);
    }

    #[test]
    fn trailing_nibble_dropped() {
        assert_eq!(nibbles_to_bytes(&[0xA, 0x5, 0x3]), vec![0xA5]);
    }

    #[test]
    fn capacity_formula() {
        // 64*64 = 4096 pixels → 1024 vertices → 512 bytes, minus 8 overhead.
        assert_eq!(GraphEmbedding.capacity(64, 64), 504);
        // 8*8 = 64 pixels → 16 vertices → 8 bytes — exactly eaten by the frame.
        assert_eq!(GraphEmbedding.capacity(8, 8), 0);
    }

    #[test]
    fn roundtrip() {
        let cover = textured_image(32, 32);
        let payload = b"graph payload".to_vec();
        let stego = GraphEmbedding.encode(&cover, "seed", &payload).unwrap();
        assert_eq!(GraphEmbedding.decode(&stego, "seed").unwrap(), payload);
    }

    #[test]
    fn roundtrip_empty_payload() {
        let cover = textured_image(16, 16);
        let stego = GraphEmbedding.encode(&cover, "s", &[]).unwrap();
        assert_eq!(GraphEmbedding.decode(&stego, "s").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn roundtrip_all_byte_values() {
        let cover = textured_image(64, 64);
        let payload: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
        let stego = GraphEmbedding.encode(&cover, "bytes", &payload).unwrap();
        assert_eq!(GraphEmbedding.decode(&stego, "bytes").unwrap(), payload);
    }

    #[test]
    fn exact_capacity_fits_one_more_fails() {
        let cover = textured_image(64, 64);
        let cap = GraphEmbedding.capacity(64, 64);

        let payload = vec![0xA7; cap];
        let stego = GraphEmbedding.encode(&cover, "s", &payload).unwrap();
        assert_eq!(GraphEmbedding.decode(&stego, "s").unwrap(), payload);

        let payload = vec![0xA7; cap + 1];
        assert!(matches!(
            GraphEmbedding.encode(&cover, "s", &payload),
            Err(StegoError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn wrong_seed_rejected() {
        let cover = textured_image(32, 32);
        let stego = GraphEmbedding.encode(&cover, "s1", b"original").unwrap();
        match GraphEmbedding.decode(&stego, "s2") {
            Err(StegoError::MalformedPayload) => {}
            Ok(bytes) => assert_ne!(bytes, b"original"),
            Err(e) => panic!("unexpected error {e:?}"),
        }
    }

    #[test]
    fn deterministic_output() {
        let cover = textured_image(32, 32);
        let a = GraphEmbedding.encode(&cover, "seed", b"abc").unwrap();
        let b = GraphEmbedding.encode(&cover, "seed", b"abc").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn distortion_is_bounded() {
        // No single sample should move far: the largest planned delta is 10
        // sample units (a flipped residue-6 vertex) spread over 4 pixels.
        let cover = textured_image(32, 32);
        let stego = GraphEmbedding.encode(&cover, "seed", b"bounded distortion").unwrap();
        for (a, b) in cover.samples().iter().zip(stego.samples().iter()) {
            assert!(a.abs_diff(*b) <= 4, "sample moved by {}", a.abs_diff(*b));
        }
    }

    #[test]
    fn saturated_carrier_roundtrip() {
        // All-white carrier: every positive adjustment must fall back to
        // the negative direction, and the round trip must still hold.
        let cover = CoverImage::from_samples(16, 16, vec![255; 256]).unwrap();
        let stego = GraphEmbedding.encode(&cover, "sat", b"x").unwrap();
        assert_eq!(GraphEmbedding.decode(&stego, "sat").unwrap(), b"x");
    }

    #[test]
    fn all_black_carrier_roundtrip() {
        let cover = CoverImage::from_samples(16, 16, vec![0; 256]).unwrap();
        let stego = GraphEmbedding.encode(&cover, "sat", b"y").unwrap();
        assert_eq!(GraphEmbedding.decode(&stego, "sat").unwrap(), b"y");
    }

    #[test]
    fn image_smaller_than_one_vertex_rejected() {
        let cover = CoverImage::from_samples(3, 1, vec![0; 3]).unwrap();
        assert!(matches!(
            GraphEmbedding.encode(&cover, "s", b""),
            Err(StegoError::AlgorithmInternal(_))
        ));
        assert!(matches!(
            GraphEmbedding.decode(&cover, "s"),
            Err(StegoError::AlgorithmInternal(_))
        ));
    }

    #[test]
    fn cover_is_not_mutated() {
        let cover = textured_image(16, 16);
        let before = cover.clone();
        let _ = GraphEmbedding.encode(&cover, "seed", b"x").unwrap();
        assert_eq!(cover, before);
    }
}
