use crate::algebra::{CscMatrix, FloatT, SparseFormatError};
use std::cmp::Ordering;

/// A single changed entry between two matrices of equal shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryChange<T> {
    pub row: usize,
    pub col: usize,
    /// value in the earlier matrix (zero if not stored)
    pub old: T,
    /// value in the later matrix (zero if not stored)
    pub new: T,
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Elementwise comparison against an earlier matrix of the same shape.
    ///
    /// Returns every coordinate whose value differs, treating entries that
    /// are not stored as zero.  Explicitly stored zeros compare equal to
    /// missing entries.  Both matrices must have strictly increasing row
    /// indices within each column.  Output is ordered by column, then row.
    pub fn diff(&self, prev: &CscMatrix<T>) -> Result<Vec<EntryChange<T>>, SparseFormatError> {
        if self.size() != prev.size() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        let mut changes = Vec::new();

        for col in 0..self.n {
            let (mut i, iend) = (self.colptr[col], self.colptr[col + 1]);
            let (mut j, jend) = (prev.colptr[col], prev.colptr[col + 1]);

            while i < iend || j < jend {
                let order = match (i < iend, j < jend) {
                    (true, true) => self.rowval[i].cmp(&prev.rowval[j]),
                    (true, false) => Ordering::Less,
                    _ => Ordering::Greater,
                };

                let (row, new, old) = match order {
                    Ordering::Less => {
                        i += 1;
                        (self.rowval[i - 1], self.nzval[i - 1], T::zero())
                    }
                    Ordering::Greater => {
                        j += 1;
                        (prev.rowval[j - 1], T::zero(), prev.nzval[j - 1])
                    }
                    Ordering::Equal => {
                        i += 1;
                        j += 1;
                        (self.rowval[i - 1], self.nzval[i - 1], prev.nzval[j - 1])
                    }
                };

                if new != old {
                    changes.push(EntryChange { row, col, old, new });
                }
            }
        }

        Ok(changes)
    }
}
