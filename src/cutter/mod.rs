//! Plane cutting of unstructured grids made of linear 3D cells
//!
//! The cut runs as a pipeline of data-parallel stages behind [`CutterOps`],
//! so the same driver serves the serial and the parallel implementation.

mod attributes;
pub mod cases;
pub mod edges;
pub mod locator;
pub mod traits;

pub mod serial;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use cases::{CaseTable, Shape};
pub use edges::{EdgeId, EdgeTuple, ExtractInput, MergeTuple};
pub use locator::MergedEdges;
pub use serial::SerialCutterOps;
pub use traits::{CutterOps, ExtractedEdges};

#[cfg(feature = "parallel")]
pub use parallel::ParallelCutterOps;

use crate::data::{
    ArrayValues, CellArray, DataArray, DataObject, DataType, MultiBlockDataSet, PointData,
    PolyData, Points, UnstructuredGrid,
};
use crate::errors::{CutError, Result};
use crate::float_types::{Float, is_real};
use crate::plane::Plane;
use attributes::interpolate_point_data;
use log::{debug, error, info, trace};
use std::fmt;

/// Name of the array written by [`PlaneCutter::compute_normals`].
pub const NORMALS_NAME: &str = "Normals";

/// Precision of the output point coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputPrecision {
    /// Same as the input points.
    #[default]
    Default,
    Single,
    Double,
}

impl OutputPrecision {
    /// Output element type for input points of type `input`.
    pub const fn resolve(self, input: DataType) -> DataType {
        match self {
            OutputPrecision::Default => input,
            OutputPrecision::Single => DataType::Float32,
            OutputPrecision::Double => DataType::Float64,
        }
    }
}

impl fmt::Display for OutputPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputPrecision::Default => "default",
            OutputPrecision::Single => "single",
            OutputPrecision::Double => "double",
        };
        write!(f, "{}", name)
    }
}

/// Facts about one executed cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CutReport {
    /// Number of local edge buffers that were filled and reduced.
    pub threads_used: usize,
    /// Whether 64-bit ids were used for the edge buffers.
    pub large_ids: bool,
    pub num_points: usize,
    pub num_triangles: usize,
}

/// Cuts grids of tetrahedra, hexahedra, voxels, wedges and pyramids with a
/// plane and returns the triangles of the cross section.
///
/// ```
/// use gridcut::{PlaneCutter, Plane, UnstructuredGrid};
/// use nalgebra::{Point3, Vector3};
///
/// let grid =
///     UnstructuredGrid::hexahedral_block([2, 2, 2], Point3::origin(), Vector3::repeat(1.0))
///         .unwrap();
/// let plane = Plane::new(Point3::new(0.0, 0.0, 0.5), Vector3::z());
/// let cutter = PlaneCutter::new(plane).with_merge_points(true);
/// let surface = cutter.cut(&grid).unwrap();
/// assert_eq!(surface.num_points(), 9);
/// assert_eq!(surface.num_polys(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneCutter {
    pub plane: Plane,
    /// Emit one output point per distinct intersected mesh edge.
    pub merge_points: bool,
    /// Interpolate the input point arrays onto the output points.
    pub interpolate_attributes: bool,
    /// Attach the unit plane normal to every output point.
    pub compute_normals: bool,
    pub output_precision: OutputPrecision,
    /// Run every stage on the calling thread.
    pub sequential_processing: bool,
}

impl Default for PlaneCutter {
    fn default() -> Self {
        PlaneCutter {
            plane: Plane::default(),
            merge_points: false,
            interpolate_attributes: true,
            compute_normals: false,
            output_precision: OutputPrecision::Default,
            sequential_processing: false,
        }
    }
}

impl fmt::Display for PlaneCutter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.plane.origin;
        let n = &self.plane.normal;
        writeln!(
            f,
            "Plane: origin ({}, {}, {}) normal ({}, {}, {})",
            o.x, o.y, o.z, n.x, n.y, n.z
        )?;
        writeln!(f, "Merge Points: {}", self.merge_points)?;
        writeln!(f, "Interpolate Attributes: {}", self.interpolate_attributes)?;
        writeln!(f, "Compute Normals: {}", self.compute_normals)?;
        writeln!(f, "Precision of the output points: {}", self.output_precision)?;
        write!(f, "Sequential Processing: {}", self.sequential_processing)
    }
}

impl PlaneCutter {
    pub fn new(plane: Plane) -> Self {
        PlaneCutter {
            plane,
            ..Default::default()
        }
    }

    pub fn with_plane(mut self, plane: Plane) -> Self {
        self.plane = plane;
        self
    }

    pub const fn with_merge_points(mut self, merge_points: bool) -> Self {
        self.merge_points = merge_points;
        self
    }

    pub const fn with_interpolate_attributes(mut self, interpolate_attributes: bool) -> Self {
        self.interpolate_attributes = interpolate_attributes;
        self
    }

    pub const fn with_compute_normals(mut self, compute_normals: bool) -> Self {
        self.compute_normals = compute_normals;
        self
    }

    pub const fn with_output_precision(mut self, output_precision: OutputPrecision) -> Self {
        self.output_precision = output_precision;
        self
    }

    pub const fn with_sequential_processing(mut self, sequential_processing: bool) -> Self {
        self.sequential_processing = sequential_processing;
        self
    }

    /// Cut `grid` and return the cross-section triangles.
    ///
    /// Cells that are not linear 3D cells are ignored. An empty grid gives an
    /// empty surface.
    ///
    /// # Errors
    /// [`CutError::UnsupportedPointType`] unless the points are `Float32` or `Float64`.
    pub fn cut(&self, grid: &UnstructuredGrid) -> Result<PolyData> {
        self.cut_with_report(grid).map(|(output, _)| output)
    }

    /// Like [`PlaneCutter::cut`], also returning a [`CutReport`].
    pub fn cut_with_report(&self, grid: &UnstructuredGrid) -> Result<(PolyData, CutReport)> {
        let num_points = grid.num_points();
        let num_cells = grid.num_cells();
        if num_points == 0 || num_cells == 0 {
            info!("Empty input");
            let input_type = grid.points().data_type();
            let output_type = if is_real(input_type) {
                self.output_precision.resolve(input_type)
            } else {
                DataType::Float32
            };
            return Ok((PolyData::empty(output_type), CutReport::default()));
        }

        let large_ids = num_points >= i32::MAX as usize || num_cells >= i32::MAX as usize;
        let (output, threads_used) = if large_ids {
            self.dispatch::<usize>(grid)?
        } else {
            self.dispatch::<u32>(grid)?
        };

        let report = CutReport {
            threads_used,
            large_ids,
            num_points: output.num_points(),
            num_triangles: output.num_polys(),
        };
        debug!(
            "created {} points, {} triangles from {} cells",
            report.num_points, report.num_triangles, num_cells
        );
        Ok((output, report))
    }

    /// Cut a grid, or every grid inside a multiblock dataset.
    ///
    /// A multiblock input gives a multiblock output of the same structure in
    /// which each grid is replaced by its cut; other leaves are dropped.
    ///
    /// # Errors
    /// [`CutError::UnsupportedDataObject`] for a bare [`PolyData`], and any
    /// error of [`PlaneCutter::cut`] for a bare grid.
    pub fn cut_data_object(&self, input: &DataObject) -> Result<DataObject> {
        match input {
            DataObject::UnstructuredGrid(grid) => self.cut(grid).map(DataObject::from),
            DataObject::MultiBlock(blocks) => Ok(self.cut_blocks(blocks).into()),
            other => {
                error!("Not sure what type of output to create for a {}", other.kind());
                Err(CutError::UnsupportedDataObject(other.kind()))
            },
        }
    }

    fn cut_blocks(&self, input: &MultiBlockDataSet) -> MultiBlockDataSet {
        let blocks = input
            .blocks
            .iter()
            .map(|block| -> Option<DataObject> {
                match block.as_ref()? {
                    DataObject::UnstructuredGrid(grid) => {
                        // A failed piece leaves an empty surface in its slot
                        let poly = self
                            .cut(grid)
                            .unwrap_or_else(|_| PolyData::empty(DataType::Float32));
                        Some(DataObject::PolyData(poly))
                    },
                    DataObject::MultiBlock(inner) => {
                        Some(DataObject::MultiBlock(self.cut_blocks(inner)))
                    },
                    other => {
                        info!(
                            "This filter only processes unstructured grids, skipping a {}",
                            other.kind()
                        );
                        None
                    },
                }
            })
            .collect();
        MultiBlockDataSet::new(blocks)
    }

    /// `true` if every cell of every grid in `input` is a linear 3D cell.
    pub fn can_fully_process(input: &DataObject) -> bool {
        match input {
            DataObject::UnstructuredGrid(grid) => grid
                .distinct_cell_types()
                .into_iter()
                .all(|cell_type| cell_type.is_linear_3d()),
            DataObject::MultiBlock(blocks) => {
                blocks.leaves().into_iter().all(Self::can_fully_process)
            },
            DataObject::PolyData(_) => false,
        }
    }

    #[cfg(feature = "parallel")]
    fn dispatch<I: EdgeId>(&self, grid: &UnstructuredGrid) -> Result<(PolyData, usize)> {
        if self.sequential_processing {
            self.process::<_, I>(&SerialCutterOps::new(), grid)
        } else {
            self.process::<_, I>(&ParallelCutterOps::new(), grid)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn dispatch<I: EdgeId>(&self, grid: &UnstructuredGrid) -> Result<(PolyData, usize)> {
        self.process::<_, I>(&SerialCutterOps::new(), grid)
    }

    fn process<O: CutterOps, I: EdgeId>(
        &self,
        ops: &O,
        grid: &UnstructuredGrid,
    ) -> Result<(PolyData, usize)> {
        match grid.points().data().values() {
            ArrayValues::Float32(points) => Ok(self.process_points::<O, I, f32>(ops, grid, points)),
            ArrayValues::Float64(points) => Ok(self.process_points::<O, I, f64>(ops, grid, points)),
            other => {
                let data_type = other.data_type();
                error!("Input point type {} not supported", data_type);
                Err(CutError::UnsupportedPointType(data_type))
            },
        }
    }

    fn process_points<O: CutterOps, I: EdgeId, T: Float>(
        &self,
        ops: &O,
        grid: &UnstructuredGrid,
        points: &[T],
    ) -> (PolyData, usize) {
        let inout = ops.classify_points(points, &self.plane);
        let input = ExtractInput {
            cells: grid.cells(),
            cell_types: grid.cell_types(),
            points,
            inout: &inout,
            plane: &self.plane,
        };
        let extracted: ExtractedEdges<I> = ops.extract_edges(&input);
        trace!(
            "extracted {} edges into {} local buffers",
            extracted.tuples.len(),
            extracted.threads_used
        );

        let threads_used = extracted.threads_used;
        let output = match self.output_precision.resolve(T::DATA_TYPE) {
            DataType::Float64 => self.emit::<O, I, T, f64>(ops, grid, points, extracted.tuples),
            _ => self.emit::<O, I, T, f32>(ops, grid, points, extracted.tuples),
        };
        (output, threads_used)
    }

    fn emit<O: CutterOps, I: EdgeId, TI: Float, TO: Float>(
        &self,
        ops: &O,
        grid: &UnstructuredGrid,
        points: &[TI],
        tuples: Vec<MergeTuple<I>>,
    ) -> PolyData {
        let (coords, polys, mut point_data) = if self.merge_points {
            let merged = merge_edges(ops, tuples);
            let num_points = merged.num_points();
            trace!("merged {} edges into {} points", merged.tuples.len(), num_points);

            let edge_at = |point: usize| merged.representative(point).parts();
            let mut coords = vec![TO::default(); 3 * num_points];
            ops.produce_points(&edge_at, points, &mut coords);
            let point_data = self.interpolate(ops, grid, num_points, &edge_at);
            let connectivity = merged.point_ids.iter().map(|id| id.index()).collect();
            (coords, CellArray::from_triangles(connectivity), point_data)
        } else {
            let num_points = tuples.len();
            let edge_at = |point: usize| tuples[point].parts();
            let mut coords = vec![TO::default(); 3 * num_points];
            ops.produce_points(&edge_at, points, &mut coords);
            let point_data = self.interpolate(ops, grid, num_points, &edge_at);
            (coords, CellArray::from_triangles((0..num_points).collect()), point_data)
        };

        let num_points = coords.len() / 3;
        if self.compute_normals {
            point_data.set_normals(self.normals(ops, num_points));
        }

        PolyData {
            points: Points::from_flat(coords),
            polys,
            point_data,
        }
    }

    fn interpolate<O, F>(
        &self,
        ops: &O,
        grid: &UnstructuredGrid,
        num_points: usize,
        edge_at: F,
    ) -> PointData
    where
        O: CutterOps,
        F: Fn(usize) -> (usize, usize, f32) + Sync,
    {
        if !self.interpolate_attributes {
            return PointData::new();
        }
        interpolate_point_data(ops, &grid.point_data, grid.num_points(), num_points, edge_at)
    }

    fn normals<O: CutterOps>(&self, ops: &O, num_points: usize) -> DataArray {
        let n = self.plane.unit_normal();
        let mut values = vec![0.0f32; 3 * num_points];
        ops.fill_normals([n.x as f32, n.y as f32, n.z as f32], &mut values);
        DataArray::from_raw(NORMALS_NAME, 3, values.into())
    }
}

/// Sort the raw edges and group identical ones, one group per output point.
pub fn merge_edges<O: CutterOps, I: EdgeId>(
    ops: &O,
    mut tuples: Vec<MergeTuple<I>>,
) -> MergedEdges<I> {
    ops.sort_edges(&mut tuples);
    MergedEdges::from_sorted(tuples)
}
