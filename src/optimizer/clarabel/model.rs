//! Problem storage for [`ClarabelOptimizer`](super::ClarabelOptimizer) and
//! assembly into the engine's `A x + s = b, s in K` form.

#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, VectorMath};
use crate::optimizer::*;
use ::clarabel::solver::SupportedConeT::{self, *};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub kind: RowType,
    pub rhs: f64,
    pub coefs: BTreeMap<usize, f64>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Column {
    pub bounds: Bounds,
    pub kind: ColumnType,
}

impl Column {
    /// Bounds implied by the column type.  Binary columns live in [0,1].
    pub fn effective_bounds(&self) -> Bounds {
        match self.kind {
            ColumnType::Binary => Bounds::new(self.bounds.lower.max(0.0), self.bounds.upper.min(1.0)),
            _ => self.bounds,
        }
    }
}

/// Data assembled for one call to the engine
pub(crate) struct EngineData {
    pub A: ::clarabel::algebra::CscMatrix<f64>,
    pub b: Vec<f64>,
    pub cones: Vec<SupportedConeT<f64>>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Model {
    pub rows: Vec<Row>,
    pub cols: Vec<Column>,
    pub objective: Vec<f64>,
    pub socs: Vec<SecondOrderConstraint>,
}

impl Model {
    pub fn from_load_data(data: &LoadData<'_>) -> Result<Self, OptimizerError> {
        let (nrows, ncols) = (data.nrows(), data.ncols());

        if data.rhs.len() != nrows {
            return Err(OptimizerError::Dimension("rhs"));
        }
        if data.lower.len() != ncols || data.upper.len() != ncols {
            return Err(OptimizerError::Dimension("column bounds"));
        }
        if data.colstarts.len() != ncols + 1
            || data.colstarts.windows(2).any(|w| w[0] > w[1])
            || data.colstarts[ncols] > data.rowind.len()
            || data.rowind.len() != data.values.len()
        {
            return Err(OptimizerError::Dimension("column starts"));
        }

        let mut rows: Vec<Row> = data
            .row_types
            .iter()
            .zip(data.rhs)
            .map(|(&kind, &rhs)| Row {
                kind,
                rhs,
                coefs: BTreeMap::new(),
            })
            .collect();

        for j in 0..ncols {
            for p in data.colstarts[j]..data.colstarts[j + 1] {
                let i = data.rowind[p];
                OptimizerError::check_index("row", i, nrows)?;
                *rows[i].coefs.entry(j).or_insert(0.0) += data.values[p];
            }
        }

        let cols = data
            .lower
            .iter()
            .zip(data.upper)
            .map(|(&lower, &upper)| Column {
                bounds: Bounds::new(lower, upper),
                kind: ColumnType::Continuous,
            })
            .collect();

        Ok(Self {
            rows,
            cols,
            objective: data.objective.to_vec(),
            socs: Vec::new(),
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.cols.len()
    }

    pub fn has_discrete(&self) -> bool {
        self.cols.iter().any(|c| c.kind.is_discrete())
    }

    pub fn check_col(&self, j: usize) -> Result<(), OptimizerError> {
        OptimizerError::check_index("column", j, self.ncols())
    }

    pub fn check_row(&self, i: usize) -> Result<(), OptimizerError> {
        OptimizerError::check_index("row", i, self.nrows())
    }

    pub fn set_coefficient(&mut self, i: usize, j: usize, value: f64) -> Result<(), OptimizerError> {
        self.check_row(i)?;
        self.check_col(j)?;
        let coefs = &mut self.rows[i].coefs;
        if value == 0.0 {
            coefs.remove(&j);
        } else {
            coefs.insert(j, value);
        }
        Ok(())
    }

    /// Objective value at a point
    pub fn objective_at(&self, x: &[f64]) -> f64 {
        self.objective.dot(&x[..self.ncols()])
    }

    /// Assemble the engine data.  `bounds` replaces the stored column
    /// bounds and must have one entry per column.
    ///
    /// Rows are emitted in the order: linear rows, finite column bounds,
    /// second-order constraints.  Dual values of the linear rows are
    /// therefore the leading entries of the engine's `z`.
    pub fn assemble(&self, bounds: &[Bounds]) -> EngineData {
        let n = self.ncols();
        let mut triplets = Vec::new();
        let mut b = Vec::new();
        let mut cones = Vec::new();

        for row in &self.rows {
            let (sign, cone) = match row.kind {
                RowType::Equal => (1.0, ZeroConeT(1)),
                RowType::LessEqual => (1.0, NonnegativeConeT(1)),
                RowType::GreaterEqual => (-1.0, NonnegativeConeT(1)),
            };
            let i = b.len();
            triplets.extend(row.coefs.iter().map(|(&j, &v)| (i, j, sign * v)));
            b.push(sign * row.rhs);
            push_cone(&mut cones, cone);
        }

        for (j, bnd) in bounds.iter().enumerate() {
            if bnd.has_lower() {
                triplets.push((b.len(), j, -1.0));
                b.push(-bnd.lower);
                push_cone(&mut cones, NonnegativeConeT(1));
            }
            if bnd.has_upper() {
                triplets.push((b.len(), j, 1.0));
                b.push(bnd.upper);
                push_cone(&mut cones, NonnegativeConeT(1));
            }
        }

        for soc in &self.socs {
            for expr in soc.expressions() {
                let i = b.len();
                triplets.extend(expr.terms.iter().map(|&(j, v)| (i, j, -v)));
                b.push(expr.constant);
            }
            let cone = match soc.dim() {
                1 => NonnegativeConeT(1),
                d => SecondOrderConeT(d),
            };
            push_cone(&mut cones, cone);
        }

        let A = CscMatrix::from_triplets(b.len(), n, &triplets);

        EngineData {
            A: ::clarabel::algebra::CscMatrix::new(A.m, A.n, A.colptr, A.rowval, A.nzval),
            b,
            cones,
        }
    }

    /// Stored bounds of every column, with binary columns restricted to [0,1]
    pub fn column_bounds(&self) -> Vec<Bounds> {
        self.cols.iter().map(|c| c.effective_bounds()).collect()
    }
}

// merge consecutive scalar cones of the same kind
fn push_cone(cones: &mut Vec<SupportedConeT<f64>>, next: SupportedConeT<f64>) {
    if let Some(last) = cones.last_mut() {
        match (last, &next) {
            (ZeroConeT(a), ZeroConeT(b)) | (NonnegativeConeT(a), NonnegativeConeT(b)) => {
                *a += *b;
                return;
            }
            _ => {}
        }
    }
    cones.push(next);
}
