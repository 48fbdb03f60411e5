//! Coincident edge merging.
//!
//! Cells sharing a mesh edge emit that edge once each. After sorting the
//! edge array by `(v0, v1, eid)`, identical edges sit next to each other;
//! every run becomes one output point.

use crate::cutter::edges::{EdgeId, MergeTuple};

/// Edges grouped by identity.
#[derive(Debug, Clone)]
pub struct MergedEdges<I: EdgeId> {
    /// All edges, sorted so that identical edges are contiguous.
    pub tuples: Vec<MergeTuple<I>>,
    /// `offsets[k]..offsets[k + 1]` is group `k` inside `tuples`; one trailing sentinel.
    pub offsets: Vec<usize>,
    /// Group (output point) of every raw edge, indexed by `eid`.
    pub point_ids: Vec<I>,
}

impl<I: EdgeId> MergedEdges<I> {
    /// Group edges already sorted by [`MergeTuple::key`].
    pub fn from_sorted(tuples: Vec<MergeTuple<I>>) -> Self {
        debug_assert!(tuples.windows(2).all(|w| w[0].key() < w[1].key()));

        let mut offsets = Vec::new();
        for (i, tuple) in tuples.iter().enumerate() {
            let starts_group = i == 0 || {
                let previous = &tuples[i - 1];
                previous.v0 != tuple.v0 || previous.v1 != tuple.v1
            };
            if starts_group {
                offsets.push(i);
            }
        }
        offsets.push(tuples.len());

        let mut point_ids = vec![I::default(); tuples.len()];
        for (group, bounds) in offsets.windows(2).enumerate() {
            for tuple in &tuples[bounds[0]..bounds[1]] {
                point_ids[tuple.eid.index()] = I::from_index(group);
            }
        }

        MergedEdges {
            tuples,
            offsets,
            point_ids,
        }
    }

    /// Number of distinct edges, i.e. of merged output points.
    pub fn num_points(&self) -> usize {
        self.offsets.len() - 1
    }

    /// The edge used to place merged point `point`.
    #[inline]
    pub fn representative(&self, point: usize) -> &MergeTuple<I> {
        &self.tuples[self.offsets[point]]
    }
}
