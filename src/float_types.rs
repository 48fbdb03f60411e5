// Working precision of plane evaluation and interpolation:
// coordinates of either width are widened to this before any arithmetic.
pub type Real = f64;

use crate::data::{DataType, Element};

/// Real coordinate types the cutter accepts as input and produces as output.
pub trait Float: Element {
    /// Narrow a working-precision value to this type.
    fn from_real(value: Real) -> Self;
}

impl Float for f32 {
    #[inline]
    fn from_real(value: Real) -> Self {
        value as f32
    }
}

impl Float for f64 {
    #[inline]
    fn from_real(value: Real) -> Self {
        value
    }
}

/// Returns `true` for the element types usable as point coordinates.
pub const fn is_real(data_type: DataType) -> bool {
    matches!(data_type, DataType::Float32 | DataType::Float64)
}

/// Read point `id` of a flat `xyz` coordinate slice in working precision.
#[inline]
pub fn point<T: Float>(coords: &[T], id: usize) -> [Real; 3] {
    let x = &coords[3 * id..3 * id + 3];
    [x[0].to_f64(), x[1].to_f64(), x[2].to_f64()]
}
