// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from capacity checks through
//! encryption, embedding, and payload extraction. Every variant is terminal
//! for the call that raised it — the engine never retries internally.

use core::fmt;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// The payload (plus frame overhead) does not fit the carrier image.
    CapacityExceeded {
        /// Payload size the caller asked to embed, in bytes.
        required: usize,
        /// Maximum payload size the carrier supports, in bytes.
        available: usize,
    },
    /// Encryption was requested with an empty key.
    InvalidKey,
    /// Structural failure on the decode side: declared length out of range,
    /// CRC mismatch, decryption failure, or an invalid compressed stream.
    /// Also raised when decoding with a different seed or flags than the
    /// ones used to encode.
    MalformedPayload,
    /// The decoded bytes are not valid UTF-8 text.
    InvalidEncoding,
    /// Pixel grouping or graph construction is impossible for the given
    /// image, e.g. fewer pixels than one vertex needs.
    AlgorithmInternal(&'static str),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { required, available } => {
                write!(f, "capacity exceeded: payload needs {required} bytes but carrier holds {available}")
            }
            Self::InvalidKey => write!(f, "encryption requested with an empty key"),
            Self::MalformedPayload => write!(f, "malformed payload (wrong seed, wrong flags, or corrupted data)"),
            Self::InvalidEncoding => write!(f, "decoded bytes are not valid UTF-8"),
            Self::AlgorithmInternal(reason) => write!(f, "algorithm error: {reason}"),
        }
    }
}

impl std::error::Error for StegoError {}
