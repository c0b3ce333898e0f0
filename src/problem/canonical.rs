#![allow(non_snake_case)]

use super::{ConeBlocks, ProblemDims};
use crate::algebra::{CscMatrix, SparseFormatError};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error type returned when a canonical problem violates its own
/// declared dimensions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("objective has length {actual} but the matrix has {expected} columns")]
    ObjectiveLength { expected: usize, actual: usize },
    #[error("right-hand side has length {actual} but the matrix has {expected} rows")]
    RhsLength { expected: usize, actual: usize },
    #[error("dimensions describe {declared} rows but the matrix has {actual}")]
    RowCount { declared: usize, actual: usize },
    #[error("cone {cone} has size zero")]
    EmptyCone { cone: usize },
    #[error("{set} index {index} is out of range for {n} variables")]
    IndexOutOfRange {
        set: &'static str,
        index: usize,
        n: usize,
    },
    #[error("bad constraint matrix: {0}")]
    BadMatrix(#[from] SparseFormatError),
}

/// Flags telling whether parts of a problem depend on symbolic
/// parameters, and so may change from one solve to the next.
///
/// Warm starts only compare the objective / the constraint matrix for
/// changes when the corresponding flag is set.  Both default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParameterFlags {
    /// objective contains parameters
    pub objective: bool,
    /// constraints contain parameters
    pub constraints: bool,
}

impl Default for ParameterFlags {
    fn default() -> Self {
        Self {
            objective: true,
            constraints: true,
        }
    }
}

impl ParameterFlags {
    /// No part of the problem is parameterized
    pub fn none() -> Self {
        Self {
            objective: false,
            constraints: false,
        }
    }
}

/// Canonical problem data, as produced by a modelling front-end.
///
/// __Example usage__ : minimize `x0 + x1` subject to `x0 + x1 = 1`
///
/// ```
/// use conelink::algebra::CscMatrix;
/// use conelink::problem::{CanonicalProblem, ProblemDims};
///
/// let A = CscMatrix::from_triplets(1, 2, &[(0, 0, 1.), (0, 1, 1.)]);
/// let problem = CanonicalProblem::new(
///     vec![1., 1.],
///     A,
///     vec![1.],
///     ProblemDims::new(1, 0, vec![]),
/// ).unwrap();
///
/// assert_eq!(problem.n(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CanonicalProblem {
    /// objective coefficients, length `n`
    pub c: Vec<f64>,
    /// constraint matrix, `m x n`
    pub A: CscMatrix<f64>,
    /// right-hand side, length `m`
    pub b: Vec<f64>,
    /// row partition
    pub dims: ProblemDims,
    /// indices of boolean variables
    #[cfg_attr(feature = "serde", serde(default))]
    pub bool_idx: Vec<usize>,
    /// indices of general integer variables
    #[cfg_attr(feature = "serde", serde(default))]
    pub int_idx: Vec<usize>,
    /// which parts of the problem are parameterized
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: ParameterFlags,
}

impl CanonicalProblem {
    /// Create a continuous problem and check it for consistency.
    pub fn new(
        c: Vec<f64>,
        A: CscMatrix<f64>,
        b: Vec<f64>,
        dims: ProblemDims,
    ) -> Result<Self, ProblemError> {
        let problem = Self {
            c,
            A,
            b,
            dims,
            bool_idx: Vec::new(),
            int_idx: Vec::new(),
            params: ParameterFlags::default(),
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Declare the boolean variables
    pub fn with_booleans(mut self, idx: Vec<usize>) -> Result<Self, ProblemError> {
        self.bool_idx = idx;
        self.validate()?;
        Ok(self)
    }

    /// Declare the general integer variables
    pub fn with_integers(mut self, idx: Vec<usize>) -> Result<Self, ProblemError> {
        self.int_idx = idx;
        self.validate()?;
        Ok(self)
    }

    /// Declare which parts of the problem are parameterized
    pub fn with_params(mut self, params: ParameterFlags) -> Self {
        self.params = params;
        self
    }

    /// number of variables
    pub fn n(&self) -> usize {
        self.A.n
    }

    /// number of constraint rows, including cone rows
    pub fn m(&self) -> usize {
        self.A.m
    }

    /// number of linear (equality and inequality) rows
    pub fn linear_rows(&self) -> usize {
        self.dims.linear_rows()
    }

    /// true if any variable is boolean or integer
    pub fn is_mip(&self) -> bool {
        !(self.bool_idx.is_empty() && self.int_idx.is_empty())
    }

    /// Iterator over the cone blocks in declared order
    pub fn cone_blocks(&self) -> ConeBlocks<'_> {
        self.dims.cone_blocks()
    }

    /// Check the problem against its declared dimensions.
    pub fn validate(&self) -> Result<(), ProblemError> {
        self.A.check_format()?;

        let (m, n) = self.A.size();

        if self.c.len() != n {
            return Err(ProblemError::ObjectiveLength {
                expected: n,
                actual: self.c.len(),
            });
        }
        if self.b.len() != m {
            return Err(ProblemError::RhsLength {
                expected: m,
                actual: self.b.len(),
            });
        }
        if let Some(cone) = self.dims.soc.iter().position(|&k| k == 0) {
            return Err(ProblemError::EmptyCone { cone });
        }
        if self.dims.total_rows() != m {
            return Err(ProblemError::RowCount {
                declared: self.dims.total_rows(),
                actual: m,
            });
        }

        let sets = [("boolean", &self.bool_idx), ("integer", &self.int_idx)];
        for (set, idx) in sets {
            if let Some(&index) = idx.iter().find(|&&j| j >= n) {
                return Err(ProblemError::IndexOutOfRange { set, index, n });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_problem() -> CanonicalProblem {
        // x0 + x1 = 1, x0 <= 3, (x0,x1) in SOC(2)
        let A = CscMatrix::from_triplets(
            4,
            2,
            &[(0, 0, 1.), (0, 1, 1.), (1, 0, 1.), (2, 0, -1.), (3, 1, -1.)],
        );
        CanonicalProblem::new(
            vec![1., 0.],
            A,
            vec![1., 3., 0., 0.],
            ProblemDims::new(1, 1, vec![2]),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_problem() {
        let p = small_problem();
        assert_eq!(p.n(), 2);
        assert_eq!(p.m(), 4);
        assert_eq!(p.linear_rows(), 2);
        assert!(!p.is_mip());
        assert_eq!(p.cone_blocks().count(), 1);
    }

    #[test]
    fn test_row_count_mismatch() {
        let mut p = small_problem();
        p.dims.soc = vec![3];
        assert_eq!(
            p.validate(),
            Err(ProblemError::RowCount {
                declared: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_vector_lengths() {
        let mut p = small_problem();
        p.c.push(0.);
        assert!(matches!(
            p.validate(),
            Err(ProblemError::ObjectiveLength { .. })
        ));

        let mut p = small_problem();
        p.b.pop();
        assert!(matches!(p.validate(), Err(ProblemError::RhsLength { .. })));
    }

    #[test]
    fn test_empty_cone() {
        let mut p = small_problem();
        p.dims = ProblemDims::new(1, 1, vec![0, 2]);
        assert_eq!(p.validate(), Err(ProblemError::EmptyCone { cone: 0 }));
    }

    #[test]
    fn test_discrete_indices() {
        let p = small_problem().with_booleans(vec![1]).unwrap();
        assert!(p.is_mip());

        let err = small_problem().with_integers(vec![2]).unwrap_err();
        assert_eq!(
            err,
            ProblemError::IndexOutOfRange {
                set: "integer",
                index: 2,
                n: 2
            }
        );
    }

    #[test]
    fn test_bad_matrix() {
        let mut p = small_problem();
        p.A.rowval.swap(0, 1);
        assert!(matches!(p.validate(), Err(ProblemError::BadMatrix(_))));
    }
}
