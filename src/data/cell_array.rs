//! Offset-encoded cell connectivity.

/// A list of cells, each a run of point ids inside one flat connectivity array.
///
/// `offsets` always starts with `0` and holds one more entry than there are
/// cells; cell `i` is `connectivity[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellArray {
    offsets: Vec<usize>,
    connectivity: Vec<usize>,
}

impl Default for CellArray {
    fn default() -> Self {
        Self::new()
    }
}

impl CellArray {
    pub fn new() -> Self {
        CellArray {
            offsets: vec![0],
            connectivity: Vec::new(),
        }
    }

    /// Build from raw parts. Returns `None` when the offsets are not a
    /// non-decreasing sequence starting at `0` and ending at `connectivity.len()`.
    pub fn from_raw(offsets: Vec<usize>, connectivity: Vec<usize>) -> Option<Self> {
        let well_formed = offsets.first() == Some(&0)
            && offsets.last() == Some(&connectivity.len())
            && offsets.windows(2).all(|w| w[0] <= w[1]);
        well_formed.then_some(CellArray {
            offsets,
            connectivity,
        })
    }

    /// Triangles from a flat connectivity list of `3 * n` point ids.
    pub fn from_triangles(connectivity: Vec<usize>) -> Self {
        debug_assert_eq!(connectivity.len() % 3, 0);
        let offsets = (0..=connectivity.len() / 3).map(|tri| 3 * tri).collect();
        CellArray {
            offsets,
            connectivity,
        }
    }

    /// Append one cell.
    pub fn push(&mut self, cell: &[usize]) {
        self.connectivity.extend_from_slice(cell);
        self.offsets.push(self.connectivity.len());
    }

    pub fn num_cells(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.num_cells() == 0
    }

    /// Point ids of cell `i`.
    #[inline]
    pub fn cell(&self, i: usize) -> &[usize] {
        &self.connectivity[self.offsets[i]..self.offsets[i + 1]]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.offsets
            .windows(2)
            .map(move |w| &self.connectivity[w[0]..w[1]])
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn connectivity(&self) -> &[usize] {
        &self.connectivity
    }
}

impl<'a> FromIterator<&'a [usize]> for CellArray {
    fn from_iter<I: IntoIterator<Item = &'a [usize]>>(iter: I) -> Self {
        let mut cells = CellArray::new();
        for cell in iter {
            cells.push(cell);
        }
        cells
    }
}
