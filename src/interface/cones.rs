//! Representations of second-order cone blocks in an optimizer.
//!
//! A cone block `b_k - A_k x in SOC(k)` is given to the optimizer either
//! through auxiliary variables `y = b_k - A_k x` and a quadratic
//! constraint on `y`, or directly as a quadratic constraint over affine
//! expressions in `x`.

use super::{ConeRecord, InterfaceError};
use crate::algebra::CsrBlock;
use crate::optimizer::{AffineExpr, Bounds, RowType, SecondOrderConstraint};
use crate::problem::ConeBlock;
use enum_dispatch::*;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operations a cone representation needs from a loaded instance
pub trait ConeTarget {
    /// Append columns reserved for cone `cone`
    fn add_cone_columns(
        &mut self,
        cone: usize,
        bounds: &[Bounds],
    ) -> Result<Range<usize>, InterfaceError>;

    fn add_rows(
        &mut self,
        row_types: &[RowType],
        rhs: &[f64],
        rowstarts: &[usize],
        colind: &[usize],
        values: &[f64],
    ) -> Result<Range<usize>, InterfaceError>;

    fn change_coefficients(
        &mut self,
        rows: &[usize],
        cols: &[usize],
        values: &[f64],
    ) -> Result<(), InterfaceError>;

    fn add_second_order_constraint(
        &mut self,
        constraint: SecondOrderConstraint,
    ) -> Result<usize, InterfaceError>;
}

#[enum_dispatch]
pub trait ConeTransform {
    /// Add the cone block `block` to `target`.  `rows` holds the rows of
    /// the block and `rhs` the matching right-hand side entries.
    fn transform(
        &self,
        target: &mut dyn ConeTarget,
        block: &ConeBlock,
        rows: &CsrBlock<f64>,
        rhs: &[f64],
    ) -> Result<ConeRecord, InterfaceError>;

    /// True if coefficient and rhs changes inside cone rows can be applied
    /// to an instance built with this representation
    fn updates_cone_rows(&self) -> bool;
}

/// Auxiliary variables `y_i = b[r+i] - A[r+i] x` tied in by equality rows,
/// with the quadratic constraint `sum(y_i^2, i >= 1) <= y_0^2`, `y_0 >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuxiliaryVariables;

/// One quadratic constraint over the affine expressions `b[r+i] - A[r+i] x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BackSubstitution;

/// Cone representation used when loading a problem
#[enum_dispatch(ConeTransform)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConeMode {
    AuxiliaryVariables,
    BackSubstitution,
}

impl Default for ConeMode {
    fn default() -> Self {
        AuxiliaryVariables.into()
    }
}

fn cone_name(block: &ConeBlock) -> String {
    format!("cone_{}", block.index)
}

impl ConeTransform for AuxiliaryVariables {
    fn transform(
        &self,
        target: &mut dyn ConeTarget,
        block: &ConeBlock,
        rows: &CsrBlock<f64>,
        rhs: &[f64],
    ) -> Result<ConeRecord, InterfaceError> {
        let k = block.size;

        // y_0 is the apex
        let mut bounds = vec![Bounds::free(); k];
        bounds[0] = Bounds::nonnegative();
        let columns = target.add_cone_columns(block.index, &bounds)?;

        // A[r+i] x = b[r+i] first, then + y_i
        let row_types = vec![RowType::Equal; k];
        let added = target.add_rows(&row_types, rhs, &rows.rowptr, &rows.colval, &rows.nzval)?;

        let new_rows: Vec<usize> = added.clone().collect();
        let new_cols: Vec<usize> = columns.clone().collect();
        target.change_coefficients(&new_rows, &new_cols, &vec![1.0; k])?;

        let constraint = if k > 1 {
            let legs = new_cols[1..].iter().map(|&j| AffineExpr::variable(j)).collect();
            let soc = SecondOrderConstraint::new(AffineExpr::variable(new_cols[0]), legs)
                .named(cone_name(block));
            Some(target.add_second_order_constraint(soc)?)
        } else {
            None
        };

        Ok(ConeRecord {
            index: block.index,
            source_rows: block.rows(),
            columns,
            rows: added,
            constraint,
        })
    }

    fn updates_cone_rows(&self) -> bool {
        true
    }
}

impl ConeTransform for BackSubstitution {
    fn transform(
        &self,
        target: &mut dyn ConeTarget,
        block: &ConeBlock,
        rows: &CsrBlock<f64>,
        rhs: &[f64],
    ) -> Result<ConeRecord, InterfaceError> {
        let mut exprs: Vec<AffineExpr> = (0..block.size)
            .map(|i| {
                let mut expr = AffineExpr::constant(rhs[i]);
                for (j, v) in rows.row(i) {
                    expr.add_term(j, -v);
                }
                expr
            })
            .collect();

        let apex = exprs.remove(0);
        let soc = SecondOrderConstraint::new(apex, exprs).named(cone_name(block));
        let constraint = target.add_second_order_constraint(soc)?;

        Ok(ConeRecord {
            index: block.index,
            source_rows: block.rows(),
            columns: 0..0,
            rows: 0..0,
            constraint: Some(constraint),
        })
    }

    fn updates_cone_rows(&self) -> bool {
        false
    }
}
