//! Errors raised while building grids or cutting them

use crate::data::DataType;

/// All the possible failures of a cut or of building its input containers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CutError {
    /// (UnsupportedPointType) Only `Float32` and `Float64` coordinates can be cut
    #[error("(UnsupportedPointType) input point type {0} not supported")]
    UnsupportedPointType(DataType),
    /// (UnsupportedDataObject) The data object kind cannot be cut
    #[error("(UnsupportedDataObject) cannot cut a {0}")]
    UnsupportedDataObject(&'static str),
    /// (InvalidConnectivity) A cell references a point that does not exist
    #[error("(InvalidConnectivity) cell {cell} references point {point}, grid has {num_points} points")]
    InvalidConnectivity {
        cell: usize,
        point: usize,
        num_points: usize,
    },
    /// (CellTypeCountMismatch) Every cell needs exactly one cell type
    #[error("(CellTypeCountMismatch) {cells} cells but {types} cell types")]
    CellTypeCountMismatch { cells: usize, types: usize },
    /// (ComponentMismatch) A flat array length is not a multiple of its component count
    #[error("(ComponentMismatch) array '{name}' holds {values} values, not a multiple of {components} components")]
    ComponentMismatch {
        name: String,
        values: usize,
        components: usize,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CutError>;
