//! Grid builders: single cells and structured blocks of hexahedra or tetrahedra.

use crate::data::{CellArray, CellType, Points, UnstructuredGrid};
use crate::errors::Result;
use nalgebra::{Point3, Vector3};

/// Corner offsets of a unit hexahedron in hexahedron point order.
const HEX_CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

// Five-tetrahedron splits of a hexahedron (hexahedron point order). Even and
// odd blocks alternate so that the face diagonals of neighbours agree.
const TETS_EVEN: [[usize; 4]; 5] =
    [[0, 1, 3, 4], [1, 2, 3, 6], [1, 4, 5, 6], [3, 4, 6, 7], [1, 3, 4, 6]];
const TETS_ODD: [[usize; 4]; 5] =
    [[0, 1, 2, 5], [0, 2, 3, 7], [0, 4, 5, 7], [2, 5, 6, 7], [0, 2, 5, 7]];

impl UnstructuredGrid {
    /// A grid made of a single cell over the given `f64` points.
    pub fn single_cell(cell_type: CellType, points: Vec<[f64; 3]>) -> Result<Self> {
        let ids: Vec<usize> = (0..points.len()).collect();
        let cells: CellArray = std::iter::once(ids.as_slice()).collect();
        UnstructuredGrid::new(Points::from_xyz(points), cells, vec![cell_type])
    }

    /// `dims[0] × dims[1] × dims[2]` hexahedra on a regular lattice.
    pub fn hexahedral_block(
        dims: [usize; 3],
        origin: Point3<f64>,
        spacing: Vector3<f64>,
    ) -> Result<Self> {
        let lattice = Lattice::new(dims, origin, spacing);
        let mut cells = CellArray::new();
        let mut cell_types = Vec::new();
        lattice.for_each_block(|_, corners| {
            cells.push(&corners);
            cell_types.push(CellType::Hexahedron);
        });
        UnstructuredGrid::new(lattice.points(), cells, cell_types)
    }

    /// The same lattice as [`UnstructuredGrid::hexahedral_block`], with every
    /// hexahedron split into five positively oriented tetrahedra.
    pub fn tetrahedral_block(
        dims: [usize; 3],
        origin: Point3<f64>,
        spacing: Vector3<f64>,
    ) -> Result<Self> {
        let lattice = Lattice::new(dims, origin, spacing);
        let coords = lattice.coords();
        let mut cells = CellArray::new();
        let mut cell_types = Vec::new();
        lattice.for_each_block(|[i, j, k], corners| {
            let split = if (i + j + k) % 2 == 0 { &TETS_EVEN } else { &TETS_ODD };
            for &tet in split {
                let mut ids = tet.map(|local| corners[local]);
                if signed_volume(&coords, ids) < 0.0 {
                    ids.swap(0, 1);
                }
                cells.push(&ids);
                cell_types.push(CellType::Tetra);
            }
        });
        UnstructuredGrid::new(lattice.points(), cells, cell_types)
    }
}

struct Lattice {
    dims: [usize; 3],
    origin: Point3<f64>,
    spacing: Vector3<f64>,
}

impl Lattice {
    const fn new(dims: [usize; 3], origin: Point3<f64>, spacing: Vector3<f64>) -> Self {
        Lattice {
            dims,
            origin,
            spacing,
        }
    }

    const fn point_id(&self, i: usize, j: usize, k: usize) -> usize {
        let nx = self.dims[0] + 1;
        let ny = self.dims[1] + 1;
        (k * ny + j) * nx + i
    }

    fn coords(&self) -> Vec<[f64; 3]> {
        let [nx, ny, nz] = self.dims.map(|d| d + 1);
        let mut coords = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    coords.push([
                        self.origin.x + i as f64 * self.spacing.x,
                        self.origin.y + j as f64 * self.spacing.y,
                        self.origin.z + k as f64 * self.spacing.z,
                    ]);
                }
            }
        }
        coords
    }

    fn points(&self) -> Points {
        Points::from_xyz(self.coords())
    }

    fn for_each_block(&self, mut f: impl FnMut([usize; 3], [usize; 8])) {
        for k in 0..self.dims[2] {
            for j in 0..self.dims[1] {
                for i in 0..self.dims[0] {
                    let corners =
                        HEX_CORNERS.map(|[di, dj, dk]| self.point_id(i + di, j + dj, k + dk));
                    f([i, j, k], corners);
                }
            }
        }
    }
}

fn signed_volume(coords: &[[f64; 3]], ids: [usize; 4]) -> f64 {
    let p = ids.map(|id| Vector3::from(coords[id]));
    (p[1] - p[0]).cross(&(p[2] - p[0])).dot(&(p[3] - p[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_counts() {
        let hexes =
            UnstructuredGrid::hexahedral_block([2, 3, 4], Point3::origin(), Vector3::repeat(1.0))
                .unwrap();
        assert_eq!(hexes.num_points(), 3 * 4 * 5);
        assert_eq!(hexes.num_cells(), 24);

        let tets =
            UnstructuredGrid::tetrahedral_block([2, 2, 2], Point3::origin(), Vector3::repeat(0.5))
                .unwrap();
        assert_eq!(tets.num_cells(), 40);
        assert_eq!(tets.distinct_cell_types(), vec![CellType::Tetra]);
    }

    #[test]
    fn tetrahedra_fill_the_block_with_positive_volume() {
        let grid =
            UnstructuredGrid::tetrahedral_block([2, 1, 1], Point3::origin(), Vector3::repeat(1.0))
                .unwrap();
        let coords: Vec<[f64; 3]> =
            (0..grid.num_points()).map(|i| grid.points().point(i)).collect();
        let mut total = 0.0;
        for cell in grid.cells().iter() {
            let ids = [cell[0], cell[1], cell[2], cell[3]];
            let volume = signed_volume(&coords, ids) / 6.0;
            assert!(volume > 0.0);
            total += volume;
        }
        assert!((total - 2.0).abs() < 1e-12);
    }
}
