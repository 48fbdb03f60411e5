//! Edge records and the per-range kernels shared by the serial and parallel cutters.

use crate::cutter::cases::{MAX_CELL_VERTS, Shape};
use crate::data::{CellArray, CellType};
use crate::float_types::{Float, Real, point};
use crate::plane::Plane;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Range;

/// Integer type used for point and edge ids inside edge buffers.
///
/// `u32` halves the memory of the edge buffers and of the sort that merges
/// them; `usize` is used once a grid has `i32::MAX` points or cells.
pub trait EdgeId: Copy + Default + Ord + Hash + Send + Sync + Debug + 'static {
    fn from_index(index: usize) -> Self;

    fn index(self) -> usize;
}

impl EdgeId for u32 {
    #[inline]
    fn from_index(index: usize) -> Self {
        index as u32
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl EdgeId for usize {
    #[inline]
    fn from_index(index: usize) -> Self {
        index
    }

    #[inline]
    fn index(self) -> usize {
        self
    }
}

/// An intersected edge in canonical orientation (`v0 < v1`); the cut point is
/// at `x(v0) + t * (x(v1) - x(v0))`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeTuple<I: EdgeId> {
    pub v0: I,
    pub v1: I,
    pub t: f32,
}

impl<I: EdgeId> EdgeTuple<I> {
    /// Build the canonical tuple for the edge `(a, b)` with parameter `t`
    /// measured from `a`. The flip happens before narrowing to `f32`.
    #[inline]
    pub fn new(a: usize, b: usize, t: Real) -> Self {
        if a < b {
            EdgeTuple {
                v0: I::from_index(a),
                v1: I::from_index(b),
                t: t as f32,
            }
        } else {
            EdgeTuple {
                v0: I::from_index(b),
                v1: I::from_index(a),
                t: (1.0 - t) as f32,
            }
        }
    }
}

/// An [`EdgeTuple`] tagged with its position in the global edge array.
/// Edge `eid` is corner `eid % 3` of triangle `eid / 3`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MergeTuple<I: EdgeId> {
    pub v0: I,
    pub v1: I,
    pub t: f32,
    pub eid: I,
}

impl<I: EdgeId> MergeTuple<I> {
    #[inline]
    pub fn from_edge(edge: &EdgeTuple<I>, eid: usize) -> Self {
        MergeTuple {
            v0: edge.v0,
            v1: edge.v1,
            t: edge.t,
            eid: I::from_index(eid),
        }
    }

    /// Sort key grouping identical edges, made unique by the edge id.
    #[inline]
    pub fn key(&self) -> (I, I, I) {
        (self.v0, self.v1, self.eid)
    }

    /// `(v0, v1, t)` with the ids widened.
    #[inline]
    pub fn parts(&self) -> (usize, usize, f32) {
        (self.v0.index(), self.v1.index(), self.t)
    }
}

/// Everything the edge extraction kernel reads.
pub struct ExtractInput<'a, T: Float> {
    pub cells: &'a CellArray,
    pub cell_types: &'a [CellType],
    pub points: &'a [T],
    pub inout: &'a [u8],
    pub plane: &'a Plane,
}

// Workers start with room for this many edges.
pub(crate) const LOCAL_EDGE_CAPACITY: usize = 2048;

/// Classify the points `first..first + out.len()` into `out`.
pub(crate) fn classify_range<T: Float>(points: &[T], plane: &Plane, first: usize, out: &mut [u8]) {
    for (offset, slot) in out.iter_mut().enumerate() {
        *slot = plane.classify(&point(points, first + offset));
    }
}

/// `true` unless every point of the cell lies strictly on one side of the plane.
#[inline]
pub(crate) fn plane_intersects(inout: &[u8], ids: &[usize]) -> bool {
    let mut one_side = inout[ids[0]];
    for &id in &ids[1..] {
        if one_side == 0 {
            break;
        }
        one_side &= inout[id];
    }
    one_side == 0
}

/// Append the intersected edges of the cells in `range` to `out`.
pub(crate) fn extract_range<I: EdgeId, T: Float>(
    input: &ExtractInput<'_, T>,
    range: Range<usize>,
    out: &mut Vec<EdgeTuple<I>>,
) {
    let mut s: [Real; MAX_CELL_VERTS] = [0.0; MAX_CELL_VERTS];
    for cell_id in range {
        let Some(shape) = Shape::from_cell_type(input.cell_types[cell_id]) else {
            continue;
        };
        let ids = input.cells.cell(cell_id);
        if ids.len() != shape.num_verts() || !plane_intersects(input.inout, ids) {
            continue;
        }

        let mut iso_case = 0usize;
        for (i, &id) in ids.iter().enumerate() {
            s[i] = input.plane.evaluate(&point(input.points, id));
            if s[i] >= 0.0 {
                iso_case |= 1 << i;
            }
        }

        for &[a, b] in shape.cases().case(iso_case) {
            let (a, b) = (a as usize, b as usize);
            // `t` is measured from the lower point id, so every cell sharing
            // the edge computes the same bits.
            let (lo, hi) = if ids[a] < ids[b] { (a, b) } else { (b, a) };
            let delta_scalar = s[hi] - s[lo];
            let t = if delta_scalar == 0.0 {
                0.0
            } else {
                -s[lo] / delta_scalar
            };
            out.push(EdgeTuple::new(ids[lo], ids[hi], t));
        }
    }
}

/// Interpolate a point between the endpoints of an edge, in working precision.
#[inline]
pub(crate) fn interpolate_point<T: Float>(points: &[T], v0: usize, v1: usize, t: f32) -> [Real; 3] {
    let x0 = point(points, v0);
    let x1 = point(points, v1);
    let t = t as Real;
    [
        x0[0] + t * (x1[0] - x0[0]),
        x0[1] + t * (x1[1] - x0[1]),
        x0[2] + t * (x1[2] - x0[2]),
    ]
}

/// Store a working-precision point into one `xyz` slot.
#[inline]
pub(crate) fn write_point<T: Float>(x: &mut [T], value: [Real; 3]) {
    x[0] = T::from_real(value[0]);
    x[1] = T::from_real(value[1]);
    x[2] = T::from_real(value[2]);
}
