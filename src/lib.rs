//! A fast, optionally multithreaded **plane cutter** for unstructured grids
//! made of linear 3D cells (tetrahedra, hexahedra, voxels, wedges and pyramids).
//!
//! Cutting a grid with a [`Plane`] produces the triangles of the cross
//! section as [`PolyData`], optionally with merged points, interpolated point
//! attributes and constant plane normals. See [`PlaneCutter`].
//!
//! # Features
//! #### Default
//! - **parallel**: use rayon for multithreading
//!
//! Without `parallel` every cut runs on the calling thread.

#![forbid(unsafe_code)]
#![warn(clippy::approx_constant, clippy::all)]

pub mod config;
pub mod cutter;
pub mod data;
pub mod errors;
pub mod float_types;
pub mod plane;

pub use cutter::{CutReport, OutputPrecision, PlaneCutter};
pub use data::{
    CellArray, CellType, DataArray, DataObject, DataType, MultiBlockDataSet, PointData, PolyData,
    Points, UnstructuredGrid,
};
pub use errors::CutError;
pub use plane::Plane;
