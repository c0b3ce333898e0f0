use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by sparse matrix assembly and comparison operations.
pub enum SparseFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Row value exceeds the matrix row dimension or is out of order")]
    /// Row value exceeds the matrix row dimension, or rows within
    /// a column are not strictly increasing
    BadRowval,
    #[error("Bad column pointer values")]
    /// Matrix column pointer values are defective
    BadColptr,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned when building start index arrays from
/// nonzero coordinates.
pub enum IndexError {
    /// A coordinate is negative
    #[error("coordinate at position {position} is negative")]
    Negative { position: usize },
    /// A coordinate is not smaller than the target axis length
    #[error("coordinate {index} at position {position} exceeds axis length {len}")]
    OutOfRange {
        position: usize,
        index: usize,
        len: usize,
    },
}
