use roaring::RoaringBitmap;

use crate::Vertex;

/// Number of cells strictly above the diagonal of a `n x n` matrix.
#[inline]
pub fn strictly_upper_triangular_matrix_capacity(n: Vertex) -> u32 {
    let n = u32::from(n);
    (n * n - n) / 2
}

/// Cells are packed column by column: `(0, 1), (0, 2), (1, 2), (0, 3), ...`.
/// That's the order graph6 lists the upper triangle in.  The index of a cell
/// doesn't depend on the size of the matrix.
#[inline]
pub(crate) fn strictly_upper_triangular_matrix_index(row: Vertex, column: Vertex) -> u32 {
    debug_assert!(row < column);
    let column = u32::from(column);
    column * (column - 1) / 2 + u32::from(row)
}

#[inline]
pub(crate) fn row_column_from_index(index: u32) -> (Vertex, Vertex) {
    // Largest column with column * (column - 1) / 2 <= index.
    let mut column = (((8.0 * f64::from(index) + 1.0).sqrt() + 1.0) / 2.0) as u32;
    while column * (column - 1) / 2 > index {
        column -= 1;
    }
    while (column + 1) * column / 2 <= index {
        column += 1;
    }
    let row = index - column * (column - 1) / 2;
    (
        Vertex::try_from(row).unwrap(),
        Vertex::try_from(column).unwrap(),
    )
}

/// Iterates over the cells `(row, column)` with `row < column` in column-major
/// order.
pub struct ColumnMajorIterator {
    size: Vertex,
    row: Vertex,
    column: Vertex,
}

impl ColumnMajorIterator {
    pub fn new(size: Vertex) -> Self {
        Self {
            size,
            row: 0,
            column: 1,
        }
    }
}

impl Iterator for ColumnMajorIterator {
    type Item = (Vertex, Vertex);

    fn next(&mut self) -> Option<Self::Item> {
        if self.column >= self.size {
            return None;
        }
        let result = (self.row, self.column);
        self.row += 1;
        if self.row == self.column {
            self.row = 0;
            self.column += 1;
        }
        Some(result)
    }
}

/// Symmetric 0/1 adjacency of an undirected graph, storing only the cells
/// strictly above the diagonal.  One bit per *adjacent* pair, so edge
/// multiplicities are not recorded here.
#[derive(Clone, Debug)]
pub struct UpperTriangularAdjacency {
    size: Vertex,
    cells: RoaringBitmap,
}

impl Eq for UpperTriangularAdjacency {}

impl PartialEq for UpperTriangularAdjacency {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

#[inline]
fn ordered(u: Vertex, v: Vertex) -> (Vertex, Vertex) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

impl UpperTriangularAdjacency {
    pub fn zeroed(size: Vertex) -> Self {
        Self {
            size,
            cells: RoaringBitmap::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> Vertex {
        self.size
    }

    /// Requires `u != v`.  Panics otherwise.
    pub fn get(&self, u: Vertex, v: Vertex) -> bool {
        assert!(u < self.size);
        assert!(v < self.size);
        assert!(u != v, "the diagonal is not stored");
        let (row, column) = ordered(u, v);
        self.cells
            .contains(strictly_upper_triangular_matrix_index(row, column))
    }

    /// Returns the previous value.
    pub fn set(&mut self, u: Vertex, v: Vertex) -> bool {
        assert!(u < self.size);
        assert!(v < self.size);
        assert!(u != v, "the diagonal is not stored");
        let (row, column) = ordered(u, v);
        !self
            .cells
            .insert(strictly_upper_triangular_matrix_index(row, column))
    }

    /// Number of adjacent pairs.
    pub fn len(&self) -> u64 {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Each emitted pair `(u, v)` satisfies `u < v`; pairs come in column-major
    /// order.
    pub fn iter_ones(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.cells.iter().map(row_column_from_index)
    }
}
