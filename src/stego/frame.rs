// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Payload frame construction and parsing.
//!
//! The frame is the binary container both embedding algorithms write into
//! the carrier. It lets the decoder validate structure before trusting it:
//!
//! ```text
//! [4 bytes] payload length N (big-endian u32)
//! [N bytes] payload
//! [4 bytes] CRC-32 of length + payload
//! ```
//!
//! Total frame size = 8 + N bytes. A decode with the wrong seed reads
//! pseudo-random samples; the length check and CRC make that fail loudly
//! as `MalformedPayload` instead of returning garbage.

use crate::stego::error::StegoError;

/// Fixed frame overhead: length(4) + crc(4) = 8 bytes.
pub const FRAME_OVERHEAD: usize = 8;

/// Number of bits in the length prefix. The LSB decoder reads exactly this
/// many slots before sizing the rest of the read.
pub const LENGTH_BITS: usize = 32;

/// Wrap a payload in a frame.
pub fn build_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(FRAME_OVERHEAD + payload.len());

    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(payload);

    let crc = crc32fast::hash(&frame);
    frame.extend_from_slice(&crc.to_be_bytes());

    frame
}

/// Read the declared payload length from the first 4 frame bytes.
///
/// # Errors
/// [`StegoError::MalformedPayload`] if fewer than 4 bytes are present.
pub fn declared_length(data: &[u8]) -> Result<usize, StegoError> {
    if data.len() < 4 {
        return Err(StegoError::MalformedPayload);
    }
    Ok(u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize)
}

/// Parse a frame, validating the declared length and verifying the CRC.
///
/// The input may be longer than the actual frame (e.g. the graph decoder
/// hands in every vertex value); the frame length is derived from the
/// embedded length field and validated against the available bytes before
/// any read is sized from it.
///
/// # Errors
/// [`StegoError::MalformedPayload`] if the frame is truncated, the declared
/// length exceeds the available bytes, or the CRC check fails.
pub fn parse_frame(data: &[u8]) -> Result<Vec<u8>, StegoError> {
    let payload_len = declared_length(data)?;

    // Validate before trusting: the declared length must fit the data we
    // actually have.
    let total_frame_len = payload_len
        .checked_add(FRAME_OVERHEAD)
        .ok_or(StegoError::MalformedPayload)?;
    if data.len() < total_frame_len {
        return Err(StegoError::MalformedPayload);
    }

    let covered = &data[..4 + payload_len];
    let crc_bytes = &data[4 + payload_len..total_frame_len];
    let stored_crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
    if crc32fast::hash(covered) != stored_crc {
        return Err(StegoError::MalformedPayload);
    }

    Ok(covered[4..].to_vec())
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}
