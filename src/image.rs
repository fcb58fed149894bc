// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! In-memory carrier image and pixel sample access.
//!
//! The engine treats a carrier as an opaque 2-D grid of 8-bit intensity
//! samples — one embedded value per pixel. File container formats are a
//! caller concern: callers with multi-channel images hand in the channel
//! they embed into and merge the result back themselves.
//!
//! # Write policy
//!
//! Samples are `u8`, so written values are inherently in `0..=255`. The
//! embedding algorithms never compute an out-of-range target: saturation is
//! avoided by choosing a different adjustment direction, never by clamping.
//! Clamping a written value would silently corrupt the aggregate statistic
//! that decode recomputes.

use crate::stego::error::StegoError;

/// A carrier image: a row-major grid of 8-bit embedding samples.
///
/// Owned exclusively by the caller for the duration of a call; the engine
/// clones it on encode and never retains a reference past the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverImage {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl CoverImage {
    /// Build a carrier from a row-major sample buffer.
    ///
    /// # Errors
    /// [`StegoError::AlgorithmInternal`] if `samples.len()` does not equal
    /// `width * height`.
    pub fn from_samples(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, StegoError> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(StegoError::AlgorithmInternal(
                "sample buffer length does not match image dimensions",
            ));
        }
        Ok(Self { width, height, samples })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of embedding samples (width × height).
    pub fn pixel_count(&self) -> usize {
        self.samples.len()
    }

    /// Read the embedded value at pixel (x, y).
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds (programmer error).
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.samples[y as usize * self.width as usize + x as usize]
    }

    /// Write the embedded value at pixel (x, y).
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds (programmer error).
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.samples[y as usize * self.width as usize + x as usize] = value;
    }

    /// Read a sample by flat row-major index. Used by the embedding
    /// algorithms, which address pixels through seeded permutations of
    /// `0..pixel_count()`.
    pub(crate) fn sample(&self, idx: usize) -> u8 {
        self.samples[idx]
    }

    /// Write a sample by flat row-major index.
    pub(crate) fn set_sample(&mut self, idx: usize, value: u8) {
        self.samples[idx] = value;
    }

    /// Borrow the raw sample buffer (row-major).
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_validates_length() {
        assert!(CoverImage::from_samples(4, 4, vec![0; 16]).is_ok());
        assert!(CoverImage::from_samples(4, 4, vec![0; 15]).is_err());
        assert!(CoverImage::from_samples(4, 4, vec![0; 17]).is_err());
    }

    #[test]
    fn get_set_roundtrip() {
        let mut img = CoverImage::from_samples(3, 2, vec![0; 6]).unwrap();
        img.set(2, 1, 200);
        assert_eq!(img.get(2, 1), 200);
        assert_eq!(img.get(0, 0), 0);
    }

    #[test]
    fn row_major_layout() {
        let img = CoverImage::from_samples(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.get(0, 0), 1);
        assert_eq!(img.get(2, 0), 3);
        assert_eq!(img.get(0, 1), 4);
        assert_eq!(img.get(2, 1), 6);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_read_panics() {
        let img = CoverImage::from_samples(2, 2, vec![0; 4]).unwrap();
        img.get(2, 0);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_write_panics() {
        let mut img = CoverImage::from_samples(2, 2, vec![0; 4]).unwrap();
        img.set(0, 2, 1);
    }
}
