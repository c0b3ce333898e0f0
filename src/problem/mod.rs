//! Canonical, solver-agnostic problem data.
//!
//! A [`CanonicalProblem`] describes
//!
//! ```text
//! minimize    c'x
//! subject to  A_eq  x  = b_eq
//!             A_leq x <= b_leq
//!             b_k - A_k x in SOC(k)    for each cone block k
//!             x_j in {0,1} / integer   for the declared index sets
//! ```
//!
//! with the rows of `A` and `b` ordered as equality rows, then inequality
//! rows, then one contiguous block of rows per second-order cone.

mod canonical;
mod dims;
#[cfg(feature = "serde")]
mod json;

pub use canonical::*;
pub use dims::*;
