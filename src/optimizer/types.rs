use super::{NativeStatus, INFINITY};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sense of a linear row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowType {
    /// `a'x = rhs`
    Equal,
    /// `a'x <= rhs`
    LessEqual,
    /// `a'x >= rhs`
    GreaterEqual,
}

/// Type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnType {
    #[default]
    Continuous,
    Integer,
    Binary,
}

impl ColumnType {
    pub fn is_discrete(&self) -> bool {
        !matches!(self, ColumnType::Continuous)
    }
}

/// Lower and upper bound of a column.  Values with magnitude at or beyond
/// [`INFINITY`] are unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// (-inf, +inf)
    pub fn free() -> Self {
        Self::new(-INFINITY, INFINITY)
    }

    /// [0, +inf)
    pub fn nonnegative() -> Self {
        Self::new(0.0, INFINITY)
    }

    pub fn has_lower(&self) -> bool {
        self.lower > -INFINITY
    }

    pub fn has_upper(&self) -> bool {
        self.upper < INFINITY
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::free()
    }
}

/// Affine expression `constant + sum(coef * x[col])` over optimizer columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffineExpr {
    pub constant: f64,
    pub terms: Vec<(usize, f64)>,
}

impl AffineExpr {
    pub fn constant(value: f64) -> Self {
        Self {
            constant: value,
            terms: Vec::new(),
        }
    }

    /// The expression `x[col]`
    pub fn variable(col: usize) -> Self {
        Self {
            constant: 0.0,
            terms: vec![(col, 1.0)],
        }
    }

    pub fn add_term(&mut self, col: usize, coef: f64) {
        self.terms.push((col, coef));
    }

    /// largest column index referenced
    pub fn max_column(&self) -> Option<usize> {
        self.terms.iter().map(|&(j, _)| j).max()
    }
}

/// Quadratic constraint `sum(legs[i]^2) <= apex^2` taken on its convex
/// branch, i.e. together with `apex >= 0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecondOrderConstraint {
    pub name: Option<String>,
    pub apex: AffineExpr,
    pub legs: Vec<AffineExpr>,
}

impl SecondOrderConstraint {
    pub fn new(apex: AffineExpr, legs: Vec<AffineExpr>) -> Self {
        Self {
            name: None,
            apex,
            legs,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of expressions in the constraint, apex included
    pub fn dim(&self) -> usize {
        1 + self.legs.len()
    }

    pub(crate) fn expressions(&self) -> impl Iterator<Item = &AffineExpr> {
        std::iter::once(&self.apex).chain(self.legs.iter())
    }
}

/// Value of an optimizer control
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ControlValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ControlValue {
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ControlValue::Int(v) => Some(v as f64),
            ControlValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            ControlValue::Int(v) => u32::try_from(v).ok(),
            _ => None,
        }
    }

    /// Booleans, or integers read as on / off
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ControlValue::Bool(v) => Some(v),
            ControlValue::Int(v) => Some(v != 0),
            _ => None,
        }
    }
}

impl From<bool> for ControlValue {
    fn from(v: bool) -> Self {
        ControlValue::Bool(v)
    }
}
impl From<i64> for ControlValue {
    fn from(v: i64) -> Self {
        ControlValue::Int(v)
    }
}
impl From<f64> for ControlValue {
    fn from(v: f64) -> Self {
        ControlValue::Float(v)
    }
}
impl From<&str> for ControlValue {
    fn from(v: &str) -> Self {
        ControlValue::Text(v.to_string())
    }
}

/// A linear problem in compressed sparse column form, as passed to
/// [`Optimizer::load_problem`](super::Optimizer::load_problem).
///
/// Column `j` owns the entries `colstarts[j]..colstarts[j+1]` of
/// `rowind` and `values`.
#[derive(Debug, Clone, Copy)]
pub struct LoadData<'a> {
    pub row_types: &'a [RowType],
    pub rhs: &'a [f64],
    pub colstarts: &'a [usize],
    pub rowind: &'a [usize],
    pub values: &'a [f64],
    pub lower: &'a [f64],
    pub upper: &'a [f64],
    pub objective: &'a [f64],
}

impl LoadData<'_> {
    /// number of rows
    pub fn nrows(&self) -> usize {
        self.row_types.len()
    }

    /// number of columns
    pub fn ncols(&self) -> usize {
        self.objective.len()
    }
}

/// Error type returned by [`Optimizer`](super::Optimizer) operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("no problem has been loaded")]
    NotLoaded,
    #[error("inconsistent dimensions in {0}")]
    Dimension(&'static str),
    #[error("{kind} index {index} out of range ({len} available)")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
    #[error("unknown control \"{0}\"")]
    UnknownControl(String),
    #[error("bad value for control \"{name}\": {value:?}")]
    BadControlValue { name: String, value: ControlValue },
    #[error("optimizer engine error: {0}")]
    Engine(String),
    #[error("no solution available (status {status})")]
    NoSolution { status: NativeStatus },
}

impl OptimizerError {
    pub(crate) fn check_index(kind: &'static str, index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(OptimizerError::IndexOutOfRange { kind, index, len })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affine_max_column() {
        let mut e = AffineExpr::constant(2.0);
        e.add_term(0, 3.0);
        e.add_term(2, -1.0);
        assert_eq!(e.max_column(), Some(2));
        assert_eq!(AffineExpr::variable(4).max_column(), Some(4));
        assert_eq!(AffineExpr::constant(1.0).max_column(), None);
    }

    #[test]
    fn test_bounds() {
        assert!(!Bounds::free().has_lower());
        assert!(!Bounds::free().has_upper());
        assert!(Bounds::nonnegative().has_lower());
        assert!(Bounds::new(0.0, 1.0).has_upper());
    }

    #[test]
    fn test_control_value_conversions() {
        assert_eq!(ControlValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(ControlValue::Int(-1).as_u32(), None);
        assert_eq!(ControlValue::Int(0).as_bool(), Some(false));
        assert_eq!(ControlValue::from("x").as_bool(), None);
    }

    #[test]
    fn test_discrete_columns() {
        assert!(ColumnType::Binary.is_discrete());
        assert!(ColumnType::Integer.is_discrete());
        assert!(!ColumnType::default().is_discrete());
    }
}
