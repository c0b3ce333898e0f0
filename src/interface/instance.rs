use super::{ConeMode, ConeTarget, InterfaceError};
use crate::optimizer::{Bounds, Optimizer, OptimizerError, RowType, SecondOrderConstraint};
use std::ops::Range;

/// Where an optimizer column comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableOrigin {
    /// variable `x[j]` of the canonical problem
    Original(usize),
    /// auxiliary variable `y[member]` of cone `cone`
    Cone { cone: usize, member: usize },
}

/// Arena of optimizer columns.  Column indices are stable: original
/// variables come first, cone variables are appended cone by cone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    origins: Vec<VariableOrigin>,
    n_original: usize,
}

impl VariableTable {
    pub fn with_original(n: usize) -> Self {
        Self {
            origins: (0..n).map(VariableOrigin::Original).collect(),
            n_original: n,
        }
    }

    /// total number of columns
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// number of canonical problem variables
    pub fn n_original(&self) -> usize {
        self.n_original
    }

    pub fn origin(&self, col: usize) -> Option<VariableOrigin> {
        self.origins.get(col).copied()
    }

    /// Columns reserved for cone `cone`, in member order
    pub fn cone_columns(&self, cone: usize) -> impl Iterator<Item = usize> + '_ {
        self.origins
            .iter()
            .enumerate()
            .filter(move |(_, o)| matches!(o, VariableOrigin::Cone { cone: c, .. } if *c == cone))
            .map(|(j, _)| j)
    }

    // the optimizer must have appended exactly at the end of the table
    fn push_cone(&mut self, cone: usize, cols: Range<usize>) -> Result<(), OptimizerError> {
        if cols.start != self.len() {
            return Err(OptimizerError::Dimension("cone columns"));
        }
        self.origins.extend(
            cols.enumerate()
                .map(|(member, _)| VariableOrigin::Cone { cone, member }),
        );
        Ok(())
    }
}

/// How a cone block was realized in the optimizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConeRecord {
    /// position in the cone sequence
    pub index: usize,
    /// rows of the canonical problem
    pub source_rows: Range<usize>,
    /// auxiliary columns (empty unless auxiliary variables are used)
    pub columns: Range<usize>,
    /// optimizer rows tying the auxiliary columns in
    pub rows: Range<usize>,
    /// index of the quadratic constraint, if one was needed
    pub constraint: Option<usize>,
}

impl ConeRecord {
    pub fn size(&self) -> usize {
        self.source_rows.len()
    }
}

/// An optimizer loaded with a canonical problem, together with the
/// bookkeeping needed to update it in place.
#[derive(Debug, Clone)]
pub struct SolverInstance<O> {
    optimizer: O,
    mode: ConeMode,
    variables: VariableTable,
    cones: Vec<ConeRecord>,
    linear_rows: usize,
}

impl<O> SolverInstance<O>
where
    O: Optimizer,
{
    pub(crate) fn new(optimizer: O, mode: ConeMode, n: usize, linear_rows: usize) -> Self {
        Self {
            optimizer,
            mode,
            variables: VariableTable::with_original(n),
            cones: Vec::new(),
            linear_rows,
        }
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    pub fn optimizer_mut(&mut self) -> &mut O {
        &mut self.optimizer
    }

    pub fn mode(&self) -> ConeMode {
        self.mode
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn cones(&self) -> &[ConeRecord] {
        &self.cones
    }

    /// number of canonical problem variables
    pub fn n(&self) -> usize {
        self.variables.n_original()
    }

    /// number of linear rows of the canonical problem
    pub fn linear_rows(&self) -> usize {
        self.linear_rows
    }

    /// number of optimizer columns, auxiliary columns included
    pub fn num_cols(&self) -> usize {
        self.variables.len()
    }

    /// Optimizer row holding canonical row `row`.  Rows inside cone
    /// blocks only have a counterpart when auxiliary variables are used.
    pub fn realized_row(&self, row: usize) -> Option<usize> {
        if row < self.linear_rows {
            return Some(row);
        }
        let cone = self.cones.iter().find(|c| c.source_rows.contains(&row))?;
        if cone.rows.is_empty() {
            return None;
        }
        Some(cone.rows.start + (row - cone.source_rows.start))
    }

    pub(crate) fn push_cone(&mut self, record: ConeRecord) {
        self.cones.push(record);
    }
}

impl<O> ConeTarget for SolverInstance<O>
where
    O: Optimizer,
{
    fn add_cone_columns(
        &mut self,
        cone: usize,
        bounds: &[Bounds],
    ) -> Result<Range<usize>, InterfaceError> {
        let cols = self.optimizer.add_columns(bounds)?;
        self.variables.push_cone(cone, cols.clone())?;
        Ok(cols)
    }

    fn add_rows(
        &mut self,
        row_types: &[RowType],
        rhs: &[f64],
        rowstarts: &[usize],
        colind: &[usize],
        values: &[f64],
    ) -> Result<Range<usize>, InterfaceError> {
        Ok(self
            .optimizer
            .add_rows(row_types, rhs, rowstarts, colind, values)?)
    }

    fn change_coefficients(
        &mut self,
        rows: &[usize],
        cols: &[usize],
        values: &[f64],
    ) -> Result<(), InterfaceError> {
        Ok(self.optimizer.change_coefficients(rows, cols, values)?)
    }

    fn add_second_order_constraint(
        &mut self,
        constraint: SecondOrderConstraint,
    ) -> Result<usize, InterfaceError> {
        Ok(self.optimizer.add_second_order_constraint(constraint)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_table() {
        let mut table = VariableTable::with_original(2);
        table.push_cone(0, 2..4).unwrap();
        table.push_cone(1, 4..5).unwrap();

        assert_eq!(table.len(), 5);
        assert_eq!(table.n_original(), 2);
        assert_eq!(table.origin(1), Some(VariableOrigin::Original(1)));
        assert_eq!(
            table.origin(3),
            Some(VariableOrigin::Cone { cone: 0, member: 1 })
        );
        assert_eq!(table.cone_columns(0).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(table.origin(5), None);

        assert!(table.push_cone(2, 7..8).is_err());
    }

    #[test]
    fn test_cone_record_size() {
        let record = ConeRecord {
            index: 0,
            source_rows: 3..6,
            columns: 0..0,
            rows: 0..0,
            constraint: Some(0),
        };
        assert_eq!(record.size(), 3);
    }
}
