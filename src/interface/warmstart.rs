//! Incremental updates of a cached instance.
//!
//! A [`WarmStartPlan`] is computed purely from a cached [`Snapshot`] and a
//! new problem.  It is only ever produced when every change it contains
//! can be applied to the cached instance, so an ineligible call never
//! modifies the instance.

use super::{column_types_for, InterfaceError, Snapshot};
use crate::algebra::EntryChange;
use crate::optimizer::{ColumnType, Optimizer};
use crate::problem::CanonicalProblem;
use thiserror::Error;

/// Reason a warm start was declined
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Ineligible {
    #[error("warm start not requested")]
    NotRequested,
    #[error("no cached problem")]
    NoSnapshot,
    #[error("variable count changed from {cached} to {requested}")]
    VariableCount { cached: usize, requested: usize },
    #[error("linear rows changed from {cached:?} to {requested:?} (eq, leq)")]
    LinearRows {
        cached: (usize, usize),
        requested: (usize, usize),
    },
    #[error("cone sizes changed")]
    ConeSizes,
    #[error("constraint matrix shape changed")]
    MatrixShape,
    #[error("row {row} inside a cone changed, which the cached instance cannot absorb")]
    ConeRowChange { row: usize },
}

/// A changed scalar, addressed by optimizer row or column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange {
    pub index: usize,
    pub old: f64,
    pub new: f64,
}

/// A changed column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeChange {
    pub col: usize,
    pub old: ColumnType,
    pub new: ColumnType,
}

/// Changes taking a cached instance to a new problem.  All indices refer
/// to optimizer rows and columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarmStartPlan {
    pub objective: Vec<ValueChange>,
    pub matrix: Vec<EntryChange<f64>>,
    pub rhs: Vec<ValueChange>,
    pub column_types: Vec<TypeChange>,
}

/// Compute the changes from `snapshot` to `problem`, or the reason the
/// cached instance cannot be reused.
///
/// The objective is only compared when it is parameterized, and the
/// matrix only when the constraints are.  The rhs is always compared.
/// Column types are compared against those read back from the optimizer.
pub fn plan<O>(snapshot: &Snapshot<O>, problem: &CanonicalProblem) -> Result<WarmStartPlan, Ineligible>
where
    O: Optimizer,
{
    let instance = snapshot.instance();

    if snapshot.c().len() != problem.n() {
        return Err(Ineligible::VariableCount {
            cached: snapshot.c().len(),
            requested: problem.n(),
        });
    }
    let cached = (snapshot.dims().eq, snapshot.dims().leq);
    let requested = (problem.dims.eq, problem.dims.leq);
    if cached != requested {
        return Err(Ineligible::LinearRows { cached, requested });
    }
    if snapshot.dims().soc != problem.dims.soc {
        return Err(Ineligible::ConeSizes);
    }

    let realize = |row: usize| instance.realized_row(row).ok_or(Ineligible::ConeRowChange { row });

    let mut plan = WarmStartPlan::default();

    if problem.params.objective {
        plan.objective = diff_values(snapshot.c(), &problem.c);
    }

    if problem.params.constraints {
        let changes = problem
            .A
            .diff(snapshot.A())
            .map_err(|_| Ineligible::MatrixShape)?;
        for change in changes {
            plan.matrix.push(EntryChange {
                row: realize(change.row)?,
                ..change
            });
        }
    }

    for change in diff_values(snapshot.b(), &problem.b) {
        plan.rhs.push(ValueChange {
            index: realize(change.index)?,
            ..change
        });
    }

    let desired = column_types_for(problem, problem.n());
    plan.column_types = desired
        .iter()
        .zip(snapshot.column_types())
        .enumerate()
        .filter(|(_, (new, old))| new != old)
        .map(|(col, (&new, &old))| TypeChange { col, old, new })
        .collect();

    Ok(plan)
}

fn diff_values(old: &[f64], new: &[f64]) -> Vec<ValueChange> {
    old.iter()
        .zip(new)
        .enumerate()
        .filter(|(_, (o, n))| o != n)
        .map(|(index, (&old, &new))| ValueChange { index, old, new })
        .collect()
}

impl WarmStartPlan {
    pub fn is_empty(&self) -> bool {
        self.objective.is_empty()
            && self.matrix.is_empty()
            && self.rhs.is_empty()
            && self.column_types.is_empty()
    }

    /// total number of changed entries
    pub fn len(&self) -> usize {
        self.objective.len() + self.matrix.len() + self.rhs.len() + self.column_types.len()
    }

    /// Apply the new values, one batched call per group.
    pub fn apply<O: Optimizer>(&self, optimizer: &mut O) -> Result<(), InterfaceError> {
        self.send(optimizer, |v| v.new, |c| c.new, |t| t.new)
    }

    /// Re-apply the old values, undoing [`apply`](Self::apply).
    pub fn revert<O: Optimizer>(&self, optimizer: &mut O) -> Result<(), InterfaceError> {
        self.send(optimizer, |v| v.old, |c| c.old, |t| t.old)
    }

    fn send<O: Optimizer>(
        &self,
        optimizer: &mut O,
        value: impl Fn(&ValueChange) -> f64,
        entry: impl Fn(&EntryChange<f64>) -> f64,
        kind: impl Fn(&TypeChange) -> ColumnType,
    ) -> Result<(), InterfaceError> {
        if !self.objective.is_empty() {
            let cols: Vec<usize> = self.objective.iter().map(|v| v.index).collect();
            let vals: Vec<f64> = self.objective.iter().map(&value).collect();
            optimizer.change_objective(&cols, &vals)?;
        }
        if !self.matrix.is_empty() {
            let rows: Vec<usize> = self.matrix.iter().map(|c| c.row).collect();
            let cols: Vec<usize> = self.matrix.iter().map(|c| c.col).collect();
            let vals: Vec<f64> = self.matrix.iter().map(&entry).collect();
            optimizer.change_coefficients(&rows, &cols, &vals)?;
        }
        if !self.rhs.is_empty() {
            let rows: Vec<usize> = self.rhs.iter().map(|v| v.index).collect();
            let vals: Vec<f64> = self.rhs.iter().map(&value).collect();
            optimizer.change_rhs(&rows, &vals)?;
        }
        if !self.column_types.is_empty() {
            let cols: Vec<usize> = self.column_types.iter().map(|t| t.col).collect();
            let types: Vec<ColumnType> = self.column_types.iter().map(&kind).collect();
            optimizer.change_column_types(&cols, &types)?;
        }
        Ok(())
    }
}
