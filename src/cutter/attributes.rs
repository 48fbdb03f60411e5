//! Point attribute interpolation onto cut points.

use crate::cutter::traits::CutterOps;
use crate::data::{ArrayValues, DataArray, Element, PointData, with_values};
use log::warn;

/// Blend one tuple between input tuples `v0` and `v1`; `output.len()` is the
/// number of components.
#[inline]
pub(crate) fn interpolate_tuple<E: Element>(
    input: &[E],
    v0: usize,
    v1: usize,
    t: f32,
    output: &mut [E],
) {
    let components = output.len();
    let t = t as f64;
    let (x0, x1) = (v0 * components, v1 * components);
    for (j, out) in output.iter_mut().enumerate() {
        let a = input[x0 + j].to_f64();
        let b = input[x1 + j].to_f64();
        *out = E::from_f64(a + t * (b - a));
    }
}

/// Interpolate every point array of `input` onto `num_points` cut points.
///
/// Arrays whose tuple count differs from `num_input_points` are skipped.
/// The active normals designation carries over.
pub(crate) fn interpolate_point_data<O, F>(
    ops: &O,
    input: &PointData,
    num_input_points: usize,
    num_points: usize,
    edge_at: F,
) -> PointData
where
    O: CutterOps,
    F: Fn(usize) -> (usize, usize, f32) + Sync,
{
    let mut output = PointData::new();
    for array in input.arrays() {
        if array.num_tuples() != num_input_points {
            warn!(
                "skipping point array '{}': {} tuples for {} points",
                array.name(),
                array.num_tuples(),
                num_input_points
            );
            continue;
        }

        let components = array.components();
        let values = with_values!(array.values(), v => {
            interpolate_values(ops, &edge_at, components, v.as_slice(), num_points)
        });
        let interpolated = DataArray::from_raw(array.name(), components, values);
        if input.normals_name() == Some(array.name()) {
            output.set_normals(interpolated);
        } else {
            output.add_array(interpolated);
        }
    }
    output
}

fn interpolate_values<O, E, F>(
    ops: &O,
    edge_at: &F,
    components: usize,
    input: &[E],
    num_points: usize,
) -> ArrayValues
where
    O: CutterOps,
    E: Element,
    F: Fn(usize) -> (usize, usize, f32) + Sync,
{
    let mut output = vec![E::default(); num_points * components];
    ops.interpolate_array(edge_at, components, input, &mut output);
    E::into_values(output)
}
