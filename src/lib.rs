// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! # stegomat-core
//!
//! Pure-Rust steganography engine for hiding text messages in images.
//! The carrier is an in-memory grid of 8-bit samples ([`CoverImage`]);
//! file container formats, UI, and threading are caller concerns.
//!
//! Two embedding algorithms behind one contract:
//!
//! - **LSB** ([`Algorithm::Lsb`]): one payload bit per pixel LSB, in
//!   seed-keyed pseudo-random order. Maximum capacity.
//! - **Graph** ([`Algorithm::GraphTheory`]): four-pixel vertices encode one
//!   nibble each as a sum modulo 16; a minimum-spanning cost graph spreads
//!   the adjustments into many small, drift-cancelling sample changes.
//!   Lower capacity, lower visual distortion.
//!
//! The pipeline optionally compresses (Brotli) and encrypts
//! (AES-256-GCM-SIV, Argon2id-derived key) the payload before embedding.
//! All operations are deterministic pure functions: the same carrier,
//! message, key, and seed always produce a byte-identical stego image.
//!
//! # Quick start
//!
//! ```rust
//! use stegomat_core::{encode_message, decode_message, CoverImage, StegoConfig};
//!
//! let samples: Vec<u8> = (0..64 * 64).map(|i| (i % 251) as u8).collect();
//! let cover = CoverImage::from_samples(64, 64, samples).unwrap();
//!
//! let config = StegoConfig::default();
//! let stego = encode_message(&cover, "hi", "", "s1", &config).unwrap();
//! let text = decode_message(&stego, "", "s1", &config).unwrap();
//! assert_eq!(text, "hi");
//! ```

pub mod image;
pub mod stego;

pub use image::CoverImage;
pub use stego::error::StegoError;
pub use stego::{calculate_image_capacity, decode_message, encode_message};
pub use stego::{Algorithm, StegoAlgorithm, StegoConfig, MAX_PIXELS};
