//! Data containers exchanged with the cutter: typed arrays, points, cell
//! connectivity and the datasets built from them.

mod array;
mod cell_array;
mod grid;
mod shapes;

pub(crate) use array::with_values;
pub use array::{ArrayValues, DataArray, DataType, Element, PointData, Points};
pub use cell_array::CellArray;
pub use grid::{CellType, DataObject, MultiBlockDataSet, PolyData, UnstructuredGrid};
