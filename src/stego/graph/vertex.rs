// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Vertex model for the graph-theoretic algorithm.
//!
//! A vertex is a group of [`SAMPLES_VERTEX_RATIO`] pixels jointly encoding
//! one payload nibble as the sum of their embedded values modulo
//! [`MODULO`]. The vertex id is the payload-unit index within the current
//! call — assigned positionally, never from shared state, so independent
//! encode/decode calls cannot interfere.
//!
//! Adjusting the aggregate: a residue `r = (target − vertex_value) mod 16`
//! can be reached by raising the sum by `r` or lowering it by `16 − r`.
//! The chosen signed delta is distributed in ±1 steps round-robin across
//! the group's samples, skipping saturated samples, so no single pixel
//! moves by more than a few intensity levels. `target_values` holds the
//! resulting per-pixel plan; applying it makes the recomputed aggregate
//! equal the payload unit, which is the round-trip contract decode
//! depends on.

use crate::stego::error::StegoError;

/// Number of pixel samples grouped into one vertex.
pub const SAMPLES_VERTEX_RATIO: usize = 4;

/// Modulus of the aggregate statistic. One payload unit is a nibble.
pub const MODULO: u16 = 16;

/// One pixel group carrying one payload unit.
#[derive(Clone, Debug)]
pub struct Vertex {
    /// Payload-unit index within this call, in creation order.
    pub id: usize,
    /// Flat sample indices of the group's pixels, in seeded order.
    pub pixels: [usize; SAMPLES_VERTEX_RATIO],
    /// Embedded values read from the carrier.
    pub values: [u8; SAMPLES_VERTEX_RATIO],
    /// The payload unit this vertex must encode (0..16).
    pub target: u8,
    /// Aggregate statistic of `values`: sum mod [`MODULO`].
    pub vertex_value: u8,
    /// Planned per-pixel values; applying them satisfies the target.
    pub target_values: [u8; SAMPLES_VERTEX_RATIO],
    /// Weight of the cheapest spanning-forest edge incident to this vertex.
    pub lowest_edge_weight: u8,
    /// Number of spanning-forest edges incident to this vertex.
    pub number_of_edges: u16,
}

impl Vertex {
    /// Build a vertex and plan its cheapest independent adjustment.
    ///
    /// The cost graph may later re-plan the direction; the final plan in
    /// `target_values` always satisfies the aggregate invariant.
    pub fn new(
        id: usize,
        pixels: [usize; SAMPLES_VERTEX_RATIO],
        values: [u8; SAMPLES_VERTEX_RATIO],
        target: u8,
    ) -> Result<Self, StegoError> {
        debug_assert!((target as u16) < MODULO, "target unit out of range");
        let mut vertex = Self {
            id,
            pixels,
            values,
            target,
            vertex_value: vertex_value_of(&values),
            target_values: values,
            lowest_edge_weight: u8::MAX,
            number_of_edges: 0,
        };
        let cheapest = vertex.cheapest_delta();
        vertex.plan(cheapest)?;
        Ok(vertex)
    }

    /// Residue the aggregate must move by, in `0..16`.
    pub fn required_residue(&self) -> u8 {
        ((self.target as u16 + MODULO - self.vertex_value as u16) % MODULO) as u8
    }

    /// The signed aggregate change with the smaller magnitude (`<= 8`).
    /// Ties at half the modulus resolve to the positive direction.
    pub fn cheapest_delta(&self) -> i16 {
        let r = self.required_residue() as i16;
        if r == 0 {
            0
        } else if r <= MODULO as i16 / 2 {
            r
        } else {
            r - MODULO as i16
        }
    }

    /// The signed aggregate change in the opposite direction.
    pub fn alternate_delta(&self) -> i16 {
        let r = self.required_residue() as i16;
        if r == 0 {
            0
        } else if r <= MODULO as i16 / 2 {
            r - MODULO as i16
        } else {
            r
        }
    }

    /// Plan `target_values` for the given signed aggregate delta.
    ///
    /// Falls back to the complementary direction when the group is
    /// saturated the chosen way (e.g. all samples at 255 cannot move up).
    /// Returns the delta actually applied.
    ///
    /// # Errors
    /// [`StegoError::AlgorithmInternal`] if the group is saturated in both
    /// directions, which cannot happen for a non-empty group of `u8`
    /// samples unless the delta magnitude exceeds what four samples span.
    pub fn plan(&mut self, delta: i16) -> Result<i16, StegoError> {
        if let Some(planned) = distribute(&self.values, delta) {
            self.target_values = planned;
            return Ok(delta);
        }
        let complement = if delta > 0 {
            delta - MODULO as i16
        } else {
            delta + MODULO as i16
        };
        if let Some(planned) = distribute(&self.values, complement) {
            self.target_values = planned;
            return Ok(complement);
        }
        Err(StegoError::AlgorithmInternal("vertex samples saturated in both directions"))
    }

    /// True when applying `target_values` yields the target unit.
    pub fn plan_satisfies_target(&self) -> bool {
        vertex_value_of(&self.target_values) == self.target
    }
}

/// Aggregate statistic of a sample group: sum mod [`MODULO`].
pub fn vertex_value_of(values: &[u8; SAMPLES_VERTEX_RATIO]) -> u8 {
    let sum: u16 = values.iter().map(|&v| v as u16).sum();
    (sum % MODULO) as u8
}

/// Spread `delta` over the group in ±1 unit steps, round-robin, skipping
/// samples that cannot move in the needed direction. Returns `None` when
/// every sample is saturated before the delta is exhausted.
fn distribute(
    values: &[u8; SAMPLES_VERTEX_RATIO],
    delta: i16,
) -> Option<[u8; SAMPLES_VERTEX_RATIO]> {
    let mut out = *values;
    if delta == 0 {
        return Some(out);
    }
    let step: i16 = if delta > 0 { 1 } else { -1 };
    let mut remaining = delta.unsigned_abs();
    let mut idx = 0;
    let mut skipped = 0;
    while remaining > 0 {
        let v = out[idx];
        let movable = (step > 0 && v < u8::MAX) || (step < 0 && v > 0);
        if movable {
            out[idx] = (v as i16 + step) as u8;
            remaining -= 1;
            skipped = 0;
        } else {
            skipped += 1;
            if skipped == SAMPLES_VERTEX_RATIO {
                return None;
            }
        }
        idx = (idx + 1) % SAMPLES_VERTEX_RATIO;
    }
    Some(out)
}
