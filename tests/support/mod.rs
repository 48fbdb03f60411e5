//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use gridcut::{CellType, Plane, PolyData, UnstructuredGrid, float_types::Real};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Corner positions of triangle `tri`.
pub fn triangle(poly: &PolyData, tri: usize) -> [Vector3<Real>; 3] {
    let ids = poly.polys.cell(tri);
    assert_eq!(ids.len(), 3, "cut output must be triangles");
    [0, 1, 2].map(|corner| Vector3::from(poly.points.point(ids[corner])))
}

/// Non-normalized normal `(b - a) × (c - a)`; its length is twice the area.
pub fn triangle_normal(poly: &PolyData, tri: usize) -> Vector3<Real> {
    let [a, b, c] = triangle(poly, tri);
    (b - a).cross(&(c - a))
}

/// Sum of the triangle areas of a cut surface.
pub fn total_area(poly: &PolyData) -> Real {
    (0..poly.num_polys())
        .map(|tri| 0.5 * triangle_normal(poly, tri).norm())
        .sum()
}

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// of the output points.
pub fn bounding_box(poly: &PolyData) -> [Real; 6] {
    let mut bb = [Real::MAX, Real::MAX, Real::MAX, Real::MIN, Real::MIN, Real::MIN];
    for id in 0..poly.num_points() {
        let p = poly.points.point(id);
        for axis in 0..3 {
            bb[axis] = bb[axis].min(p[axis]);
            bb[axis + 3] = bb[axis + 3].max(p[axis]);
        }
    }
    bb
}

/// The horizontal plane `z = height` with an upward normal.
pub fn z_plane(height: Real) -> Plane {
    Plane::new(Point3::new(0.0, 0.0, height), Vector3::z())
}

/// The unit tetrahedron `(0,0,0) (1,0,0) (0,1,0) (0,0,1)`.
pub fn unit_tetra() -> UnstructuredGrid {
    UnstructuredGrid::single_cell(
        CellType::Tetra,
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    )
    .unwrap()
}

/// The unit cube as a voxel (x varies fastest, then y, then z).
pub fn unit_voxel() -> UnstructuredGrid {
    UnstructuredGrid::single_cell(
        CellType::Voxel,
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ],
    )
    .unwrap()
}

/// The unit cube as a hexahedron (bottom face counter-clockwise, then top face).
pub fn unit_hexahedron() -> UnstructuredGrid {
    UnstructuredGrid::single_cell(
        CellType::Hexahedron,
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
    )
    .unwrap()
}

/// A unit-height wedge over the right triangle with legs of length 1.
pub fn unit_wedge() -> UnstructuredGrid {
    UnstructuredGrid::single_cell(
        CellType::Wedge,
        vec![
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 0.0, 1.0],
        ],
    )
    .unwrap()
}

/// A unit-height pyramid over the unit square.
pub fn unit_pyramid() -> UnstructuredGrid {
    UnstructuredGrid::single_cell(
        CellType::Pyramid,
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.5, 0.5, 1.0],
        ],
    )
    .unwrap()
}

/// `n³` unit-spaced tetrahedral blocks starting at the origin.
pub fn tet_block(n: usize) -> UnstructuredGrid {
    UnstructuredGrid::tetrahedral_block([n, n, n], Point3::origin(), Vector3::repeat(1.0)).unwrap()
}

/// `n³` unit hexahedra starting at the origin.
pub fn hex_block(n: usize) -> UnstructuredGrid {
    UnstructuredGrid::hexahedral_block([n, n, n], Point3::origin(), Vector3::repeat(1.0)).unwrap()
}

/// Finds a tetrahedron edge `(v0, v1)` of `grid` that passes through `p` and
/// returns it with the parameter `t` of `p` along it.
pub fn tet_edge_through(grid: &UnstructuredGrid, p: [Real; 3]) -> Option<(usize, usize, Real)> {
    let p = Vector3::from(p);
    for ids in grid.cells().iter() {
        for i in 0..ids.len() {
            for j in i + 1..ids.len() {
                let x0 = Vector3::from(grid.points().point(ids[i]));
                let d = Vector3::from(grid.points().point(ids[j])) - x0;
                let t = (p - x0).dot(&d) / d.norm_squared();
                if (0.0..=1.0).contains(&t) && (x0 + d * t - p).norm() < 1e-9 {
                    return Some((ids[i], ids[j], t));
                }
            }
        }
    }
    None
}
