//! Parallel implementation of the cutting stages.
//!
//! Every stage splits its index range into fixed chunks of the configured
//! grain size, so chunk boundaries (and hence the output) never depend on
//! scheduling.

use crate::config::{chunk_ranges, grain_size};
use crate::cutter::attributes::interpolate_tuple;
use crate::cutter::edges::{
    EdgeId, EdgeTuple, ExtractInput, LOCAL_EDGE_CAPACITY, MergeTuple, classify_range,
    extract_range, interpolate_point, write_point,
};
use crate::cutter::traits::{CutterOps, ExtractedEdges};
use crate::data::Element;
use crate::float_types::Float;
use crate::plane::Plane;
use rayon::prelude::*;

/// Parallel implementation of `CutterOps`.
#[derive(Debug, Clone, Copy)]
pub struct ParallelCutterOps {
    grain: usize,
}

impl Default for ParallelCutterOps {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelCutterOps {
    /// Uses the crate-wide [`grain_size`].
    pub fn new() -> Self {
        Self::with_grain_size(grain_size())
    }

    pub fn with_grain_size(grain: usize) -> Self {
        Self {
            grain: grain.max(1),
        }
    }

    /// Concatenate the local buffers in chunk order: a serial offset scan,
    /// then a parallel copy into disjoint slices of the global array.
    fn reduce<I: EdgeId>(locals: Vec<Vec<EdgeTuple<I>>>) -> Vec<MergeTuple<I>> {
        let mut firsts = Vec::with_capacity(locals.len());
        let mut total = 0;
        for local in &locals {
            firsts.push(total);
            total += local.len();
        }

        let mut tuples = vec![MergeTuple::default(); total];
        let mut slots: Vec<&mut [MergeTuple<I>]> = Vec::with_capacity(locals.len());
        let mut rest = tuples.as_mut_slice();
        for local in &locals {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(local.len());
            slots.push(head);
            rest = tail;
        }

        slots
            .into_par_iter()
            .zip(locals.par_iter())
            .zip(firsts.par_iter())
            .for_each(|((slot, local), &first)| {
                for (i, (dst, edge)) in slot.iter_mut().zip(local).enumerate() {
                    *dst = MergeTuple::from_edge(edge, first + i);
                }
            });

        tuples
    }
}

impl CutterOps for ParallelCutterOps {
    fn classify_points<T: Float>(&self, points: &[T], plane: &Plane) -> Vec<u8> {
        let mut inout = vec![0u8; points.len() / 3];
        inout
            .par_chunks_mut(self.grain)
            .enumerate()
            .for_each(|(chunk, out)| classify_range(points, plane, chunk * self.grain, out));
        inout
    }

    fn extract_edges<I: EdgeId, T: Float>(&self, input: &ExtractInput<'_, T>) -> ExtractedEdges<I> {
        let ranges = chunk_ranges(input.cells.num_cells(), self.grain);
        let threads_used = ranges.len().min(rayon::current_num_threads());

        let locals: Vec<Vec<EdgeTuple<I>>> = ranges
            .into_par_iter()
            .map(|range| {
                let mut local = Vec::with_capacity(LOCAL_EDGE_CAPACITY.min(3 * range.len()));
                extract_range(input, range, &mut local);
                local
            })
            .collect();

        ExtractedEdges {
            tuples: Self::reduce(locals),
            threads_used,
        }
    }

    fn sort_edges<I: EdgeId>(&self, tuples: &mut [MergeTuple<I>]) {
        tuples.par_sort_unstable_by_key(MergeTuple::key);
    }

    fn produce_points<TI, TO, F>(&self, edge_at: F, input: &[TI], output: &mut [TO])
    where
        TI: Float,
        TO: Float,
        F: Fn(usize) -> (usize, usize, f32) + Sync,
    {
        output
            .par_chunks_mut(3)
            .enumerate()
            .with_min_len(self.grain)
            .for_each(|(point_id, x)| {
                let (v0, v1, t) = edge_at(point_id);
                write_point(x, interpolate_point(input, v0, v1, t));
            });
    }

    fn interpolate_array<E, F>(&self, edge_at: F, components: usize, input: &[E], output: &mut [E])
    where
        E: Element,
        F: Fn(usize) -> (usize, usize, f32) + Sync,
    {
        output
            .par_chunks_mut(components)
            .enumerate()
            .with_min_len(self.grain)
            .for_each(|(point_id, tuple)| {
                let (v0, v1, t) = edge_at(point_id);
                interpolate_tuple(input, v0, v1, t, tuple);
            });
    }

    fn fill_normals(&self, normal: [f32; 3], output: &mut [f32]) {
        output
            .par_chunks_mut(3)
            .with_min_len(self.grain)
            .for_each(|n| n.copy_from_slice(&normal));
    }
}
