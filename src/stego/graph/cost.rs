// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegomat

//! Cost graph over vertices and the cooperative adjustment policy.
//!
//! Independently, every vertex would take its cheapest signed delta. When
//! many neighboring vertices happen to pick the same direction, the
//! carrier drifts brighter or darker as a whole — a few large correlated
//! jumps instead of many small cancelling ones. The cost graph spreads
//! that distortion:
//!
//! - Nodes are vertices that need a non-zero adjustment.
//! - Candidate edges connect each node to its neighbors within a fixed id
//!   window; the edge weight is `|delta(u) + delta(v)|` for the cheapest
//!   deltas — weight 0 means the pair cancels perfectly.
//! - Kruskal's algorithm selects a minimum spanning forest with
//!   deterministic `(weight, a, b)` tie-breaks.
//! - Each tree is walked breadth-first from its best-connected vertex;
//!   a child flips its adjustment direction against its parent whenever
//!   the extra per-vertex cost stays within [`DIRECTION_SLACK`].
//!
//! The policy is part of no wire contract: it only changes *how* each
//! vertex reaches its target aggregate, never the final vertex value, so
//! the decoder needs no graph at all.

use std::collections::VecDeque;

use crate::stego::error::StegoError;
use crate::stego::graph::vertex::Vertex;

/// How many following vertices (in id order) each vertex offers edges to.
/// Bounds edge count at `n * NEIGHBOR_WINDOW` while still giving every
/// vertex nearby cooperation partners.
const NEIGHBOR_WINDOW: usize = 8;

/// Maximum extra aggregate cost (in sample units) a vertex accepts to flip
/// its direction against its parent's. Flipping costs `16 − 2r` for residue
/// `r`, so only vertices already near the break-even point flip.
const DIRECTION_SLACK: i16 = 4;

/// A candidate edge between two active vertices, by index into the active
/// list.
#[derive(Clone, Copy, Debug)]
struct Edge {
    weight: u8,
    a: usize,
    b: usize,
}

/// Union-find over active-list indices, with path halving.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`; returns false when already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        // Deterministic: smaller root wins.
        if ra < rb {
            self.parent[rb] = ra;
        } else {
            self.parent[ra] = rb;
        }
        true
    }
}

/// Plan the per-pixel adjustments for every vertex.
///
/// Vertices with residue 0 keep their current samples. The rest are wired
/// into the cost graph, a minimum spanning forest is chosen, and each tree
/// is walked assigning alternating adjustment directions. Also fills each
/// active vertex's `lowest_edge_weight` / `number_of_edges` connectivity
/// metadata from the chosen forest.
///
/// # Errors
/// Propagates [`StegoError::AlgorithmInternal`] from vertex planning; with
/// `u8` samples and nibble residues this cannot trigger in practice.
pub fn plan_adjustments(vertices: &mut [Vertex]) -> Result<(), StegoError> {
    let active: Vec<usize> = (0..vertices.len())
        .filter(|&i| vertices[i].required_residue() != 0)
        .collect();
    if active.is_empty() {
        return Ok(());
    }

    // Candidate edges within the neighbor window, weighted by how badly the
    // pair's cheapest deltas fail to cancel.
    let mut edges: Vec<Edge> = Vec::with_capacity(active.len() * NEIGHBOR_WINDOW);
    for a in 0..active.len() {
        let upper = (a + 1 + NEIGHBOR_WINDOW).min(active.len());
        for b in (a + 1)..upper {
            let sum = vertices[active[a]].cheapest_delta() + vertices[active[b]].cheapest_delta();
            edges.push(Edge { weight: sum.unsigned_abs() as u8, a, b });
        }
    }
    edges.sort_by_key(|e| (e.weight, e.a, e.b));

    // Kruskal minimum spanning forest.
    let mut dsu = DisjointSet::new(active.len());
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); active.len()];
    for edge in &edges {
        if dsu.union(edge.a, edge.b) {
            adjacency[edge.a].push(edge.b);
            adjacency[edge.b].push(edge.a);
            for &end in &[edge.a, edge.b] {
                let v = &mut vertices[active[end]];
                v.lowest_edge_weight = v.lowest_edge_weight.min(edge.weight);
                v.number_of_edges += 1;
            }
        }
    }

    // Group active indices into forest components.
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut component_of = vec![usize::MAX; active.len()];
    for i in 0..active.len() {
        let root = dsu.find(i);
        if component_of[root] == usize::MAX {
            component_of[root] = components.len();
            components.push(Vec::new());
        }
        components[component_of[root]].push(i);
    }

    // Walk each tree from its best-connected vertex, alternating signs.
    let mut visited = vec![false; active.len()];
    for members in &components {
        let root = *members
            .iter()
            .max_by_key(|&&i| (vertices[active[i]].number_of_edges, std::cmp::Reverse(i)))
            .expect("component is never empty");

        let cheapest = vertices[active[root]].cheapest_delta();
        let applied = vertices[active[root]].plan(cheapest)?;
        visited[root] = true;

        let mut queue = VecDeque::new();
        queue.push_back((root, applied));
        while let Some((node, parent_delta)) = queue.pop_front() {
            for &child in &adjacency[node] {
                if visited[child] {
                    continue;
                }
                visited[child] = true;
                let v = &mut vertices[active[child]];
                let chosen = choose_direction(v, parent_delta);
                let applied = v.plan(chosen)?;
                queue.push_back((child, applied));
            }
        }
    }

    debug_assert!(vertices.iter().all(Vertex::plan_satisfies_target));
    Ok(())
}

/// Pick a child's signed delta given the delta its parent applied.
///
/// Prefers the direction opposing the parent's sign; falls back to the
/// cheapest direction when opposing would cost more than
/// [`DIRECTION_SLACK`] extra sample units.
fn choose_direction(vertex: &Vertex, parent_delta: i16) -> i16 {
    let cheap = vertex.cheapest_delta();
    if parent_delta == 0 {
        return cheap;
    }
    let opposing_sign = -parent_delta.signum();
    if cheap.signum() == opposing_sign {
        return cheap;
    }
    let alternate = vertex.alternate_delta();
    if alternate.abs() - cheap.abs() <= DIRECTION_SLACK {
        alternate
    } else {
        cheap
    }
}
