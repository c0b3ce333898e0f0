//!  __conelink__ loads canonical convex problems into sparse-matrix
//! optimizers and reads their results back.  The problems handled are
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & c^T x\\\\\[2ex\]
//!  \text{subject to} & A_{eq} x = b_{eq} \\\\\[1ex\]
//!         & A_{leq} x \le b_{leq} \\\\\[1ex\]
//!         & b_k - A_k x \in \mathcal{Q}^{n_k}, \quad k = 1,\dots,K \\\\\[1ex\]
//!         & x_j \in \mathbb{Z} \text{ or } \\{0,1\\} \text{ for selected } j
//!  \end{array}
//! $$
//!
//! with the rows of $A$ and $b$ stacked as equality rows, inequality rows,
//! then one block of rows per second-order cone $\mathcal{Q}^{n_k}$.
//!
//! ## Features
//!
//! * __Cold loading__: linear rows are passed in compressed sparse column
//! form, and cone blocks are added either through auxiliary variables or
//! as quadratic constraints over affine expressions.
//!
//! * __Warm starts__: when a problem is re-solved with the same structure,
//! only the changed objective, matrix, right-hand side and column type
//! entries are sent to the optimizer.
//!
//! * __Canonical results__: native status codes are mapped to a small
//! status vocabulary, and auxiliary columns are dropped from solutions.
//!
//! The optimizer is abstracted by the [`Optimizer`](optimizer::Optimizer)
//! trait.  A reference implementation on top of the Clarabel interior
//! point solver is included, with branch and bound for integer variables.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod algebra;
pub mod interface;
pub mod optimizer;
pub mod problem;

pub use interface::{ConicInterface, InterfaceError, ResultRecord, SolveOptions, SolverStatus};
pub use problem::{CanonicalProblem, ProblemDims};
