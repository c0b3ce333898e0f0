use crate::algebra::IndexError;
use num_traits::PrimInt;

/// Builds the cumulative start index array of a compressed sparse axis.
///
/// Given the coordinate of every nonzero along one axis (the column index
/// of each nonzero for a CSC layout, or the row index for a CSR layout)
/// and the axis length `n`, returns a vector of length `n+1` whose entry
/// `i` is the number of nonzeros with coordinate in `[0, i)`.
///
/// Coordinates may appear in any order.  Axis positions with no nonzeros
/// produce repeated values in the output.
///
/// ```
/// use conelink::algebra::column_starts;
///
/// let starts = column_starts(&[2i64, 0, 2, 3], 5).unwrap();
/// assert_eq!(starts, vec![0, 1, 1, 3, 4, 4]);
/// ```
pub fn column_starts<I>(coords: &[I], n: usize) -> Result<Vec<usize>, IndexError>
where
    I: PrimInt,
{
    // histogram shifted by one, so that the running
    // sum below leaves a leading zero in place
    let mut starts = vec![0usize; n + 1];

    for (position, c) in coords.iter().enumerate() {
        let index = c.to_usize().ok_or(IndexError::Negative { position })?;
        if index >= n {
            return Err(IndexError::OutOfRange {
                position,
                index,
                len: n,
            });
        }
        starts[index + 1] += 1;
    }

    for i in 0..n {
        starts[i + 1] += starts[i];
    }

    Ok(starts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_starts_basic() {
        let starts = column_starts(&[0usize, 0, 1, 3], 4).unwrap();
        assert_eq!(starts, vec![0, 2, 3, 3, 4]);
    }

    #[test]
    fn test_column_starts_unsorted() {
        let sorted = column_starts(&[0usize, 1, 1, 2, 4], 6).unwrap();
        let shuffled = column_starts(&[4usize, 1, 0, 2, 1], 6).unwrap();
        assert_eq!(sorted, shuffled);
        assert_eq!(sorted.len(), 7);
        assert_eq!(*sorted.last().unwrap(), 5);
    }

    #[test]
    fn test_column_starts_empty_axes() {
        assert_eq!(column_starts::<i32>(&[], 3).unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(column_starts::<i32>(&[], 0).unwrap(), vec![0]);
    }

    #[test]
    fn test_column_starts_monotone() {
        let coords: Vec<i64> = vec![7, 3, 3, 0, 9, 9, 9, 1, 5];
        let starts = column_starts(&coords, 12).unwrap();
        assert_eq!(starts.len(), 13);
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(starts[12], coords.len());
    }

    #[test]
    fn test_column_starts_bad_coords() {
        assert_eq!(
            column_starts(&[0i64, -1, 2], 3),
            Err(IndexError::Negative { position: 1 })
        );
        assert_eq!(
            column_starts(&[0i64, 3], 3),
            Err(IndexError::OutOfRange {
                position: 1,
                index: 3,
                len: 3
            })
        );
    }
}
