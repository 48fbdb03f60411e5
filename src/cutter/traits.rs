//! Traits defining the data-parallel stages of a cut for dependency inversion

use crate::cutter::edges::{EdgeId, ExtractInput, MergeTuple};
use crate::data::Element;
use crate::float_types::Float;
use crate::plane::Plane;

/// Intersected edges of a whole grid, three per triangle, in cell order.
#[derive(Debug, Clone)]
pub struct ExtractedEdges<I: EdgeId> {
    /// `tuples[eid].eid == eid`
    pub tuples: Vec<MergeTuple<I>>,
    /// Number of local edge buffers that were filled and reduced.
    pub threads_used: usize,
}

/// Core cutting stages - each works on disjoint index ranges so it can run
/// on one thread or many with identical results.
///
/// `edge_at(p)` returns `(v0, v1, t)` of the edge that places output point `p`.
pub trait CutterOps {
    /// Classify every point as above, below or on the plane.
    fn classify_points<T: Float>(&self, points: &[T], plane: &Plane) -> Vec<u8>;

    /// Extract the intersected edges of every cell and reduce the local buffers
    /// into one array, assigning edge ids.
    fn extract_edges<I: EdgeId, T: Float>(&self, input: &ExtractInput<'_, T>) -> ExtractedEdges<I>;

    /// Sort edges by [`MergeTuple::key`].
    fn sort_edges<I: EdgeId>(&self, tuples: &mut [MergeTuple<I>]);

    /// Interpolate one output point per `xyz` slot of `output`.
    fn produce_points<TI, TO, F>(&self, edge_at: F, input: &[TI], output: &mut [TO])
    where
        TI: Float,
        TO: Float,
        F: Fn(usize) -> (usize, usize, f32) + Sync;

    /// Interpolate one output tuple per `components` slots of `output`.
    fn interpolate_array<E, F>(&self, edge_at: F, components: usize, input: &[E], output: &mut [E])
    where
        E: Element,
        F: Fn(usize) -> (usize, usize, f32) + Sync;

    /// Write `normal` into every `xyz` slot of `output`.
    fn fill_normals(&self, normal: [f32; 3], output: &mut [f32]);
}
