//! Datasets: the volume grid that gets cut, the triangle surface it produces,
//! and the composite container holding several of them.

use crate::data::{CellArray, DataType, PointData, Points};
use crate::errors::{CutError, Result};

/// Cell shape identifiers, numbered like the classic VTK cell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Vertex,
    Line,
    Triangle,
    Polygon,
    Quad,
    Tetra,
    Voxel,
    Hexahedron,
    Wedge,
    Pyramid,
    QuadraticTetra,
    Polyhedron,
    Other(u8),
}

impl CellType {
    /// Map a numeric type id to a [`CellType`].
    pub const fn from_id(id: u8) -> Self {
        match id {
            1 => CellType::Vertex,
            3 => CellType::Line,
            5 => CellType::Triangle,
            7 => CellType::Polygon,
            9 => CellType::Quad,
            10 => CellType::Tetra,
            11 => CellType::Voxel,
            12 => CellType::Hexahedron,
            13 => CellType::Wedge,
            14 => CellType::Pyramid,
            24 => CellType::QuadraticTetra,
            42 => CellType::Polyhedron,
            other => CellType::Other(other),
        }
    }

    pub const fn id(self) -> u8 {
        match self {
            CellType::Vertex => 1,
            CellType::Line => 3,
            CellType::Triangle => 5,
            CellType::Polygon => 7,
            CellType::Quad => 9,
            CellType::Tetra => 10,
            CellType::Voxel => 11,
            CellType::Hexahedron => 12,
            CellType::Wedge => 13,
            CellType::Pyramid => 14,
            CellType::QuadraticTetra => 24,
            CellType::Polyhedron => 42,
            CellType::Other(id) => id,
        }
    }

    /// `true` for the five shapes the plane cutter handles.
    pub const fn is_linear_3d(self) -> bool {
        matches!(
            self,
            CellType::Tetra
                | CellType::Voxel
                | CellType::Hexahedron
                | CellType::Wedge
                | CellType::Pyramid
        )
    }
}

/// A volume mesh: points, cells of arbitrary type, and per-point attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct UnstructuredGrid {
    points: Points,
    cells: CellArray,
    cell_types: Vec<CellType>,
    pub point_data: PointData,
}

impl UnstructuredGrid {
    /// Build a grid, checking that there is one type per cell and that every
    /// connectivity entry refers to an existing point.
    pub fn new(points: Points, cells: CellArray, cell_types: Vec<CellType>) -> Result<Self> {
        if cells.num_cells() != cell_types.len() {
            return Err(CutError::CellTypeCountMismatch {
                cells: cells.num_cells(),
                types: cell_types.len(),
            });
        }
        let num_points = points.len();
        for (cell, ids) in cells.iter().enumerate() {
            if let Some(&point) = ids.iter().find(|&&id| id >= num_points) {
                return Err(CutError::InvalidConnectivity {
                    cell,
                    point,
                    num_points,
                });
            }
        }
        Ok(UnstructuredGrid {
            points,
            cells,
            cell_types,
            point_data: PointData::new(),
        })
    }

    /// A grid with no points and no cells.
    pub fn empty() -> Self {
        UnstructuredGrid {
            points: Points::empty(DataType::Float32),
            cells: CellArray::new(),
            cell_types: Vec::new(),
            point_data: PointData::new(),
        }
    }

    /// Attach point attributes (builder style).
    pub fn with_point_data(mut self, point_data: PointData) -> Self {
        self.point_data = point_data;
        self
    }

    pub const fn points(&self) -> &Points {
        &self.points
    }

    pub const fn cells(&self) -> &CellArray {
        &self.cells
    }

    pub fn cell_types(&self) -> &[CellType] {
        &self.cell_types
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.num_cells()
    }

    /// Distinct cell types present, in order of first appearance.
    pub fn distinct_cell_types(&self) -> Vec<CellType> {
        let mut distinct = Vec::new();
        for &cell_type in &self.cell_types {
            if !distinct.contains(&cell_type) {
                distinct.push(cell_type);
            }
        }
        distinct
    }
}

/// A surface mesh of polygons (triangles, for cut output).
#[derive(Debug, Clone, PartialEq)]
pub struct PolyData {
    pub points: Points,
    pub polys: CellArray,
    pub point_data: PointData,
}

impl PolyData {
    /// An empty surface whose points use `data_type`.
    pub fn empty(data_type: DataType) -> Self {
        PolyData {
            points: Points::empty(data_type),
            polys: CellArray::new(),
            point_data: PointData::new(),
        }
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_polys(&self) -> usize {
        self.polys.num_cells()
    }

    pub fn is_empty(&self) -> bool {
        self.num_polys() == 0
    }
}

/// A tree of datasets. Empty slots are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiBlockDataSet {
    pub blocks: Vec<Option<DataObject>>,
}

impl MultiBlockDataSet {
    pub fn new(blocks: Vec<Option<DataObject>>) -> Self {
        MultiBlockDataSet { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Non-empty leaves in depth-first order.
    pub fn leaves(&self) -> Vec<&DataObject> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a DataObject>) {
        for block in self.blocks.iter().flatten() {
            match block {
                DataObject::MultiBlock(inner) => inner.collect_leaves(leaves),
                leaf => leaves.push(leaf),
            }
        }
    }
}

/// Any dataset the cutter may be handed.
#[derive(Debug, Clone, PartialEq)]
pub enum DataObject {
    UnstructuredGrid(UnstructuredGrid),
    PolyData(PolyData),
    MultiBlock(MultiBlockDataSet),
}

impl DataObject {
    pub const fn kind(&self) -> &'static str {
        match self {
            DataObject::UnstructuredGrid(_) => "unstructured grid",
            DataObject::PolyData(_) => "poly data",
            DataObject::MultiBlock(_) => "multiblock dataset",
        }
    }

    pub const fn as_poly_data(&self) -> Option<&PolyData> {
        match self {
            DataObject::PolyData(poly) => Some(poly),
            _ => None,
        }
    }

    pub const fn as_multi_block(&self) -> Option<&MultiBlockDataSet> {
        match self {
            DataObject::MultiBlock(blocks) => Some(blocks),
            _ => None,
        }
    }
}

impl From<UnstructuredGrid> for DataObject {
    fn from(grid: UnstructuredGrid) -> Self {
        DataObject::UnstructuredGrid(grid)
    }
}

impl From<PolyData> for DataObject {
    fn from(poly: PolyData) -> Self {
        DataObject::PolyData(poly)
    }
}

impl From<MultiBlockDataSet> for DataObject {
    fn from(blocks: MultiBlockDataSet) -> Self {
        DataObject::MultiBlock(blocks)
    }
}
