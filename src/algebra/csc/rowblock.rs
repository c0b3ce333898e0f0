use crate::algebra::{column_starts, CscMatrix, FloatT};
use std::ops::Range;

/// A contiguous block of matrix rows in compressed sparse row layout.
///
/// Produced by [`CscMatrix::row_block`], this is the form in which rows
/// are appended to an optimizer that loads data row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrBlock<T = f64> {
    /// number of rows in the block
    pub nrows: usize,
    /// row start array, length `nrows + 1`
    pub rowptr: Vec<usize>,
    /// column index of every nonzero
    pub colval: Vec<usize>,
    /// nonzero values
    pub nzval: Vec<T>,
}

impl<T> CsrBlock<T>
where
    T: FloatT,
{
    /// Iterator over the `(col, value)` pairs of a single row.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let rng = self.rowptr[i]..self.rowptr[i + 1];
        self.colval[rng.clone()]
            .iter()
            .copied()
            .zip(self.nzval[rng].iter().copied())
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.rowptr[self.nrows]
    }
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Extract the rows in `rows` as a row-compressed block.  Entries
    /// within each row are ordered by increasing column.
    ///
    /// # Panics
    /// Panics if the range exceeds the row dimension
    pub fn row_block(&self, rows: Range<usize>) -> CsrBlock<T> {
        let sub = self.select_row_range(rows.clone());

        // row starts come from a histogram over the (relative) row
        // index of every nonzero.  Indices are in range by construction.
        let rowptr = column_starts(&sub.rowval, rows.len()).unwrap_or_else(|_| unreachable!());

        let mut next = rowptr.clone();
        let mut colval = vec![0; sub.nnz()];
        let mut nzval = vec![T::zero(); sub.nnz()];

        // columns are visited in order, so each row fills left to right
        for col in 0..sub.n {
            for ptr in sub.colptr[col]..sub.colptr[col + 1] {
                let row = sub.rowval[ptr];
                let dest = next[row];
                colval[dest] = col;
                nzval[dest] = sub.nzval[ptr];
                next[row] += 1;
            }
        }

        CsrBlock {
            nrows: rows.len(),
            rowptr,
            colval,
            nzval,
        }
    }
}

#[test]
fn test_row_block() {
    // A =
    //[1.  .  2.]
    //[.   3. . ]
    //[4.  5. 6.]
    let A = CscMatrix::from_triplets(
        3,
        3,
        &[
            (0, 0, 1.),
            (0, 2, 2.),
            (1, 1, 3.),
            (2, 0, 4.),
            (2, 1, 5.),
            (2, 2, 6.),
        ],
    );

    let blk = A.row_block(1..3);
    assert_eq!(blk.nrows, 2);
    assert_eq!(blk.rowptr, vec![0, 1, 4]);
    assert_eq!(blk.colval, vec![1, 0, 1, 2]);
    assert_eq!(blk.nzval, vec![3., 4., 5., 6.]);
    assert_eq!(blk.row(1).collect::<Vec<_>>(), vec![(0, 4.), (1, 5.), (2, 6.)]);

    let empty = A.row_block(1..1);
    assert_eq!(empty.rowptr, vec![0]);
    assert_eq!(empty.nnz(), 0);
}
