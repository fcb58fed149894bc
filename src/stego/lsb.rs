// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Least-significant-bit embedding.
//!
//! One payload bit per pixel: the framed payload is serialized MSB-first
//! and written into sample LSBs following the seeded visiting order. The
//! decoder regenerates the identical order, reads the 32-bit length prefix
//! first, and validates the declared length against the slot count before
//! sizing the remaining read.

use log::debug;

use crate::image::CoverImage;
use crate::stego::error::StegoError;
use crate::stego::frame::{self, FRAME_OVERHEAD, LENGTH_BITS};
use crate::stego::permute;
use crate::stego::{validate_dimensions, StegoAlgorithm};

/// LSB embedding algorithm. Stateless; all per-call state lives on the stack.
pub struct LsbEmbedding;

impl StegoAlgorithm for LsbEmbedding {
    /// One bit slot per pixel: `(width * height) / 8` bytes, minus the
    /// frame overhead reserved for the length prefix and CRC.
    fn capacity(&self, width: u32, height: u32) -> usize {
        let slots = width as usize * height as usize;
        (slots / 8).saturating_sub(FRAME_OVERHEAD)
    }

    fn encode(&self, cover: &CoverImage, seed: &str, payload: &[u8]) -> Result<CoverImage, StegoError> {
        validate_dimensions(cover.width(), cover.height())?;

        let bits = frame::bytes_to_bits(&frame::build_frame(payload));
        let slots = cover.pixel_count();
        if bits.len() > slots {
            return Err(StegoError::CapacityExceeded {
                required: payload.len(),
                available: self.capacity(cover.width(), cover.height()),
            });
        }

        debug!("lsb encode: {} frame bits into {} slots", bits.len(), slots);

        let order = permute::pixel_order(seed, slots);
        let mut stego = cover.clone();
        for (&slot, &bit) in order.iter().zip(bits.iter()) {
            let sample = stego.sample(slot);
            stego.set_sample(slot, (sample & 0xFE) | bit);
        }
        Ok(stego)
    }

    fn decode(&self, stego: &CoverImage, seed: &str) -> Result<Vec<u8>, StegoError> {
        validate_dimensions(stego.width(), stego.height())?;

        let slots = stego.pixel_count();
        if slots < LENGTH_BITS {
            return Err(StegoError::MalformedPayload);
        }

        let order = permute::pixel_order(seed, slots);

        // Read the length prefix first and validate it before sizing the
        // payload read — a wrong seed yields a pseudo-random length here.
        let header_bits: Vec<u8> = order[..LENGTH_BITS].iter().map(|&slot| stego.sample(slot) & 1).collect();
        let payload_len = frame::declared_length(&frame::bits_to_bytes(&header_bits))?;

        let frame_bits = payload_len
            .checked_add(FRAME_OVERHEAD)
            .and_then(|bytes| bytes.checked_mul(8))
            .ok_or(StegoError::MalformedPayload)?;
        if frame_bits > slots {
            return Err(StegoError::MalformedPayload);
        }

        debug!("lsb decode: declared payload {payload_len} bytes, reading {frame_bits} slots");

        let bits: Vec<u8> = order[..frame_bits].iter().map(|&slot| stego.sample(slot) & 1).collect();
        frame::parse_frame(&frame::bits_to_bytes(&bits))
    }
}
