//! Sparse matrix and vector utilities used to stage problem data.
//!
//! The [`CscMatrix`] type follows the standard Compressed Sparse Column
//! layout expected by sparse-matrix optimizers.  The utilities here cover
//! only what is needed to move canonical problem data into an optimizer:
//! building column (or row) start arrays, slicing row blocks, and computing
//! elementwise differences between successive matrices.

mod csc;
mod error_types;
mod floats;
mod math_traits;
mod vecmath;

pub use csc::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;

#[cfg(test)]
mod tests;
