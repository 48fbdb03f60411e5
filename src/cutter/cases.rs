//! Marching case tables for the linear 3D cell shapes.
//!
//! A case is the bitmask of cell points with a non-negative plane value. For
//! every case the table lists the cell edges to interpolate, three per output
//! triangle. Tables are generated once per shape from the cell faces:
//!
//! 1. every face is walked in its outward orientation, and each crossing from
//!    an inside point to an outside point is paired with the next crossing
//!    back inside. On a face with four crossings this cuts off the outside
//!    corners and keeps the inside corners connected, so neighbouring cells
//!    sharing the face make the same choice.
//! 2. each crossed edge is left by exactly one face segment and entered by
//!    exactly one other, so the segments chain into closed loops.
//! 3. loops are fan-triangulated from their smallest edge.
//!
//! With outward faces the triangles wind counter-clockwise seen from the
//! positive side of the plane.

use crate::data::CellType;
use std::sync::OnceLock;

/// Largest number of points of a supported cell.
pub const MAX_CELL_VERTS: usize = 8;

/// A local cell edge as a pair of local point indices, smaller first.
pub type LocalEdge = [u8; 2];

/// The cell shapes with a case table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Tetra,
    Voxel,
    Hexahedron,
    Wedge,
    Pyramid,
}

// Outward oriented faces, in the point order of each shape.
const TETRA_FACES: &[&[u8]] = &[&[0, 1, 3], &[1, 2, 3], &[2, 0, 3], &[0, 2, 1]];
const VOXEL_FACES: &[&[u8]] = &[
    &[0, 4, 6, 2],
    &[1, 3, 7, 5],
    &[0, 1, 5, 4],
    &[2, 6, 7, 3],
    &[0, 2, 3, 1],
    &[4, 5, 7, 6],
];
const HEXAHEDRON_FACES: &[&[u8]] = &[
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[0, 1, 5, 4],
    &[3, 7, 6, 2],
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
];
const WEDGE_FACES: &[&[u8]] = &[
    &[0, 1, 2],
    &[3, 5, 4],
    &[0, 3, 4, 1],
    &[1, 4, 5, 2],
    &[2, 5, 3, 0],
];
const PYRAMID_FACES: &[&[u8]] = &[&[0, 3, 2, 1], &[0, 1, 4], &[1, 2, 4], &[2, 3, 4], &[3, 0, 4]];

static TETRA_CASES: OnceLock<CaseTable> = OnceLock::new();
static VOXEL_CASES: OnceLock<CaseTable> = OnceLock::new();
static HEXAHEDRON_CASES: OnceLock<CaseTable> = OnceLock::new();
static WEDGE_CASES: OnceLock<CaseTable> = OnceLock::new();
static PYRAMID_CASES: OnceLock<CaseTable> = OnceLock::new();

impl Shape {
    /// The shape of a cell type, `None` for anything that is not a linear 3D cell.
    pub const fn from_cell_type(cell_type: CellType) -> Option<Self> {
        match cell_type {
            CellType::Tetra => Some(Shape::Tetra),
            CellType::Voxel => Some(Shape::Voxel),
            CellType::Hexahedron => Some(Shape::Hexahedron),
            CellType::Wedge => Some(Shape::Wedge),
            CellType::Pyramid => Some(Shape::Pyramid),
            _ => None,
        }
    }

    pub const fn num_verts(self) -> usize {
        match self {
            Shape::Tetra => 4,
            Shape::Voxel | Shape::Hexahedron => 8,
            Shape::Wedge => 6,
            Shape::Pyramid => 5,
        }
    }

    const fn faces(self) -> &'static [&'static [u8]] {
        match self {
            Shape::Tetra => TETRA_FACES,
            Shape::Voxel => VOXEL_FACES,
            Shape::Hexahedron => HEXAHEDRON_FACES,
            Shape::Wedge => WEDGE_FACES,
            Shape::Pyramid => PYRAMID_FACES,
        }
    }

    /// The case table of this shape, built on first use.
    pub fn cases(self) -> &'static CaseTable {
        let cell = match self {
            Shape::Tetra => &TETRA_CASES,
            Shape::Voxel => &VOXEL_CASES,
            Shape::Hexahedron => &HEXAHEDRON_CASES,
            Shape::Wedge => &WEDGE_CASES,
            Shape::Pyramid => &PYRAMID_CASES,
        };
        cell.get_or_init(|| CaseTable::build(self))
    }
}

/// Edges to interpolate for every case of one shape.
#[derive(Debug, Clone)]
pub struct CaseTable {
    offsets: Vec<usize>,
    edges: Vec<LocalEdge>,
}

impl CaseTable {
    fn build(shape: Shape) -> Self {
        let num_cases = 1usize << shape.num_verts();
        let mut offsets = Vec::with_capacity(num_cases + 1);
        let mut edges = Vec::new();
        offsets.push(0);
        for iso_case in 0..num_cases {
            triangulate_case(shape.faces(), iso_case, &mut edges);
            offsets.push(edges.len());
        }
        CaseTable { offsets, edges }
    }

    pub fn num_cases(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Edges of `iso_case`; consecutive triples form one triangle.
    #[inline]
    pub fn case(&self, iso_case: usize) -> &[LocalEdge] {
        &self.edges[self.offsets[iso_case]..self.offsets[iso_case + 1]]
    }
}

#[inline]
const fn local_edge(a: u8, b: u8) -> LocalEdge {
    if a < b { [a, b] } else { [b, a] }
}

fn triangulate_case(faces: &[&[u8]], iso_case: usize, out: &mut Vec<LocalEdge>) {
    let inside = |v: u8| iso_case & (1 << v) != 0;

    // Directed segments: (edge left through, edge entered through)
    let mut links: Vec<(LocalEdge, LocalEdge)> = Vec::new();
    for face in faces {
        let crossings: Vec<(LocalEdge, bool)> = (0..face.len())
            .filter_map(|i| {
                let a = face[i];
                let b = face[(i + 1) % face.len()];
                (inside(a) != inside(b)).then(|| (local_edge(a, b), inside(a)))
            })
            .collect();
        for (i, &(edge, leaving)) in crossings.iter().enumerate() {
            if leaving {
                let (entered, _) = crossings[(i + 1) % crossings.len()];
                links.push((edge, entered));
            }
        }
    }
    links.sort_unstable();

    let mut visited: Vec<LocalEdge> = Vec::with_capacity(links.len());
    for &(start, _) in &links {
        if visited.contains(&start) {
            continue;
        }
        let mut cycle = vec![start];
        visited.push(start);
        let mut current = start;
        while let Some(&(_, next)) = links.iter().find(|(from, _)| *from == current) {
            if next == start || visited.contains(&next) {
                break;
            }
            cycle.push(next);
            visited.push(next);
            current = next;
        }
        for i in 1..cycle.len().saturating_sub(1) {
            out.extend_from_slice(&[cycle[0], cycle[i], cycle[i + 1]]);
        }
    }
}
