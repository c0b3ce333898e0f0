//! The boundary to an external sparse-matrix optimizer.
//!
//! Everything the interface layer needs from an optimizer is expressed by
//! the [`Optimizer`] trait: loading a problem in compressed sparse column
//! form, appending columns, rows and second-order constraints, applying
//! incremental changes, setting controls, solving, and reading results
//! back.  Status codes are reported in the optimizer's own vocabulary
//! (see [`native`]) and translated by the interface layer.
//!
//! A reference implementation backed by the Clarabel interior point
//! solver is provided in [`clarabel`].

pub mod clarabel;
pub mod native;
mod types;

pub use self::clarabel::ClarabelOptimizer;
pub use native::NativeStatus;
pub use types::*;

use std::ops::Range;

/// Values at or beyond this magnitude are treated as infinite bounds.
pub const INFINITY: f64 = 1e20;

/// Name of the control that switches optimizer log output on or off.
pub const VERBOSE_CONTROL: &str = "verbose";

/// Operations an external optimizer must provide.
///
/// Row and column indices are 0-based and refer to the optimizer's own
/// (realized) problem, which may contain more rows and columns than the
/// canonical problem it was built from.
pub trait Optimizer {
    /// Name of the optimizer, used to key cached problem state.
    const NAME: &'static str;

    /// Replace any existing problem with the given linear problem.
    fn load_problem(&mut self, data: &LoadData<'_>) -> Result<(), OptimizerError>;

    /// Append new columns with the given bounds.  Returns the indices
    /// of the new columns.
    fn add_columns(&mut self, bounds: &[Bounds]) -> Result<Range<usize>, OptimizerError>;

    /// Append rows given in compressed sparse row form.  Returns the
    /// indices of the new rows.
    fn add_rows(
        &mut self,
        row_types: &[RowType],
        rhs: &[f64],
        rowstarts: &[usize],
        colind: &[usize],
        values: &[f64],
    ) -> Result<Range<usize>, OptimizerError>;

    /// Append a second-order constraint.  Returns its index.
    fn add_second_order_constraint(
        &mut self,
        constraint: SecondOrderConstraint,
    ) -> Result<usize, OptimizerError>;

    /// Set the linear objective over all columns.  The sense is always
    /// minimization.
    fn set_objective(&mut self, coefs: &[f64]) -> Result<(), OptimizerError>;

    /// Change selected objective coefficients.
    fn change_objective(&mut self, cols: &[usize], values: &[f64]) -> Result<(), OptimizerError>;

    /// Change selected matrix coefficients.  Setting a coefficient that
    /// is not yet stored adds it; setting a coefficient to zero removes it.
    fn change_coefficients(
        &mut self,
        rows: &[usize],
        cols: &[usize],
        values: &[f64],
    ) -> Result<(), OptimizerError>;

    /// Change selected right-hand side values.
    fn change_rhs(&mut self, rows: &[usize], values: &[f64]) -> Result<(), OptimizerError>;

    /// Change the type of selected columns.
    fn change_column_types(
        &mut self,
        cols: &[usize],
        types: &[ColumnType],
    ) -> Result<(), OptimizerError>;

    /// Set a named control.
    fn set_control(&mut self, name: &str, value: &ControlValue) -> Result<(), OptimizerError>;

    /// True if `name` is a control known to the optimizer.
    fn has_control(&self, name: &str) -> bool;

    /// Restore every control to the value it had when the optimizer was
    /// created.
    fn reset_controls(&mut self);

    /// Solve the loaded problem.
    fn solve(&mut self) -> Result<(), OptimizerError>;

    /// Native status code of the most recent solve.
    fn status(&self) -> NativeStatus;

    /// Objective value of the most recent solve, if available.
    fn objective_value(&self) -> Option<f64>;

    /// Primal values of all columns.
    fn primal(&self) -> Result<Vec<f64>, OptimizerError>;

    /// Dual values of all linear rows.
    fn duals(&self) -> Result<Vec<f64>, OptimizerError>;

    /// Current type of every column.
    fn column_types(&self) -> Vec<ColumnType>;

    /// number of linear rows
    fn num_rows(&self) -> usize;

    /// number of columns
    fn num_cols(&self) -> usize;

    /// number of second-order constraints
    fn num_second_order_constraints(&self) -> usize;
}
