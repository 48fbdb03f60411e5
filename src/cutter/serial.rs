//! Serial implementation of the cutting stages

use crate::cutter::attributes::interpolate_tuple;
use crate::cutter::edges::{
    EdgeId, ExtractInput, LOCAL_EDGE_CAPACITY, MergeTuple, classify_range, extract_range,
    interpolate_point, write_point,
};
use crate::cutter::traits::{CutterOps, ExtractedEdges};
use crate::data::Element;
use crate::float_types::Float;
use crate::plane::Plane;

/// Serial implementation of `CutterOps`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialCutterOps;

impl SerialCutterOps {
    pub const fn new() -> Self {
        Self
    }
}

impl CutterOps for SerialCutterOps {
    fn classify_points<T: Float>(&self, points: &[T], plane: &Plane) -> Vec<u8> {
        let mut inout = vec![0u8; points.len() / 3];
        classify_range(points, plane, 0, &mut inout);
        inout
    }

    fn extract_edges<I: EdgeId, T: Float>(&self, input: &ExtractInput<'_, T>) -> ExtractedEdges<I> {
        let mut local = Vec::with_capacity(LOCAL_EDGE_CAPACITY);
        extract_range(input, 0..input.cells.num_cells(), &mut local);

        let tuples = local
            .iter()
            .enumerate()
            .map(|(eid, edge)| MergeTuple::from_edge(edge, eid))
            .collect();

        ExtractedEdges {
            tuples,
            threads_used: 1,
        }
    }

    fn sort_edges<I: EdgeId>(&self, tuples: &mut [MergeTuple<I>]) {
        tuples.sort_unstable_by_key(MergeTuple::key);
    }

    fn produce_points<TI, TO, F>(&self, edge_at: F, input: &[TI], output: &mut [TO])
    where
        TI: Float,
        TO: Float,
        F: Fn(usize) -> (usize, usize, f32) + Sync,
    {
        for (point_id, x) in output.chunks_exact_mut(3).enumerate() {
            let (v0, v1, t) = edge_at(point_id);
            write_point(x, interpolate_point(input, v0, v1, t));
        }
    }

    fn interpolate_array<E, F>(&self, edge_at: F, components: usize, input: &[E], output: &mut [E])
    where
        E: Element,
        F: Fn(usize) -> (usize, usize, f32) + Sync,
    {
        for (point_id, tuple) in output.chunks_exact_mut(components).enumerate() {
            let (v0, v1, t) = edge_at(point_id);
            interpolate_tuple(input, v0, v1, t, tuple);
        }
    }

    fn fill_normals(&self, normal: [f32; 3], output: &mut [f32]) {
        for n in output.chunks_exact_mut(3) {
            n.copy_from_slice(&normal);
        }
    }
}
