// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Lossless payload compression stage.
//!
//! Output format is `[flags byte][inner]`. The inner data is either raw or
//! Brotli-compressed: compression is used only when it produces a strictly
//! smaller result, so the stage never expands the payload by more than the
//! one flags byte. Compression is deterministic for identical input, which
//! the encode determinism contract depends on.

use std::io::{Read, Write};

use crate::stego::error::StegoError;

/// Compression algorithm flags (bits 0-1 of flags byte).
const COMPRESS_NONE: u8 = 0b00;
const COMPRESS_BROTLI: u8 = 0b01;
const COMPRESS_MASK: u8 = 0b11;

/// Brotli compression quality (0-11). 11 = max compression. Payloads are
/// bounded by image capacity, so even max quality compresses in milliseconds.
const BROTLI_QUALITY: u32 = 11;

/// Brotli LG_WINDOW_SIZE. 22 is the default (4 MB window).
const BROTLI_LG_WINDOW_SIZE: u32 = 22;

/// Decompressed size limit to defuse decompression bombs. Far above any
/// payload a supported carrier can hold.
const MAX_DECOMPRESSED_BYTES: u64 = 16 * 1024 * 1024;

/// Assumed typical compression ratio for text payloads, as a fraction
/// (numerator / denominator). Deliberately conservative versus Brotli's
/// usual 2-3x on prose. Used only by [`approx_size_after_compression`].
const ESTIMATE_RATIO_NUM: usize = 3;
const ESTIMATE_RATIO_DEN: usize = 2;

/// Compress a payload. Returns `[flags][data]` using whichever of raw or
/// Brotli is smaller.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let compressed = compress_brotli(data);

    // Keep the raw bytes unless Brotli strictly shrinks them.
    let (flag, inner): (u8, &[u8]) = if compressed.len() < data.len() {
        (COMPRESS_BROTLI, &compressed)
    } else {
        (COMPRESS_NONE, data)
    };

    let mut result = Vec::with_capacity(1 + inner.len());
    result.push(flag);
    result.extend_from_slice(inner);
    result
}

/// Reverse [`compress`].
///
/// # Errors
/// [`StegoError::MalformedPayload`] on empty input, an unknown flags byte,
/// or an invalid Brotli stream — all symptoms of corrupted data or a
/// decode with mismatched seed/flags.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, StegoError> {
    if data.is_empty() {
        return Err(StegoError::MalformedPayload);
    }

    let flags = data[0];
    let inner = &data[1..];

    match flags & COMPRESS_MASK {
        COMPRESS_NONE => Ok(inner.to_vec()),
        COMPRESS_BROTLI => decompress_brotli(inner),
        _ => Err(StegoError::MalformedPayload),
    }
}

/// Estimate the largest message (in bytes) likely to fit in `raw_capacity`
/// embeddable bytes once this stage has run.
///
/// The estimate assumes typical text compressibility and is advisory: it
/// feeds the caller's capacity indicator, while `encode` always re-checks
/// the actual post-compression size against the carrier and raises
/// `CapacityExceeded` on overflow — an optimistic estimate can never cause
/// silent truncation.
///
/// Guaranteed never below `raw_capacity`: enabling compression must not make
/// the reported capacity shrink.
pub fn approx_size_after_compression(raw_capacity: usize) -> usize {
    // One flags byte of fixed overhead, then scale by the assumed ratio.
    let scaled = raw_capacity.saturating_sub(1) * ESTIMATE_RATIO_NUM / ESTIMATE_RATIO_DEN;
    scaled.max(raw_capacity)
}

/// Compress data with Brotli into a fresh buffer.
fn compress_brotli(data: &[u8]) -> Vec<u8> {
    let mut writer =
        brotli::CompressorWriter::new(Vec::new(), 4096, BROTLI_QUALITY, BROTLI_LG_WINDOW_SIZE);
    writer.write_all(data).expect("Brotli compression should not fail");
    // into_inner flushes the stream before handing back the buffer.
    writer.into_inner()
}

/// Decompress Brotli data, bounded by [`MAX_DECOMPRESSED_BYTES`].
fn decompress_brotli(data: &[u8]) -> Result<Vec<u8>, StegoError> {
    let mut output = Vec::new();
    let decompressor = brotli::Decompressor::new(data, 4096);
    decompressor
        .take(MAX_DECOMPRESSED_BYTES)
        .read_to_end(&mut output)
        .map_err(|_| StegoError::MalformedPayload)?;
    Ok(output)
}
