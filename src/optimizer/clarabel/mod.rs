//! Reference [`Optimizer`] backed by the Clarabel interior point solver.
//!
//! The loaded problem is kept in memory so that incremental change calls
//! are cheap.  Each call to [`Optimizer::solve`] assembles the current
//! model and runs the engine on it.  When integer or binary columns are
//! present, a depth-first branch and bound over continuous relaxations is
//! run instead, and status codes are reported from the mixed-integer
//! vocabulary.

mod branching;
mod controls;
mod model;

pub use controls::*;

use self::model::{Column, Model, Row};
use super::native::{lp, mip};
use super::*;
use ::clarabel::algebra::CscMatrix as EngineMatrix;
use ::clarabel::solver::{DefaultSolver, IPSolver, SolverStatus};
use itertools::izip;
use std::collections::BTreeMap;

/// Outcome of a single continuous relaxation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Solved,
    Infeasible,
    Unbounded,
    Stopped,
    Failed,
    NotRun,
}

impl Outcome {
    fn from_engine(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Solved | SolverStatus::AlmostSolved => Outcome::Solved,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                Outcome::Infeasible
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                Outcome::Unbounded
            }
            SolverStatus::MaxIterations | SolverStatus::MaxTime => Outcome::Stopped,
            SolverStatus::NumericalError | SolverStatus::InsufficientProgress => Outcome::Failed,
            SolverStatus::Unsolved => Outcome::NotRun,
            #[allow(unreachable_patterns)]
            _ => Outcome::Stopped,
        }
    }

    fn lp_status(self) -> NativeStatus {
        match self {
            Outcome::Solved => lp::OPTIMAL,
            Outcome::Infeasible => lp::INFEASIBLE,
            Outcome::Unbounded => lp::UNBOUNDED,
            Outcome::Stopped => lp::UNFINISHED,
            Outcome::Failed => lp::UNSOLVED,
            Outcome::NotRun => lp::UNSTARTED,
        }
    }
}

/// Result of a continuous relaxation
#[derive(Debug, Clone)]
pub(crate) struct Relaxation {
    pub outcome: Outcome,
    pub x: Vec<f64>,
    pub z: Vec<f64>,
    pub obj_val: f64,
}

/// Result of the most recent solve
#[derive(Debug, Clone)]
struct SolveResult {
    status: NativeStatus,
    objective: Option<f64>,
    x: Option<Vec<f64>>,
    duals: Option<Vec<f64>>,
}

/// An [`Optimizer`] running the Clarabel interior point engine.
///
/// __Example usage__ : minimize `x` subject to `x >= 2`
///
/// ```
/// use conelink::optimizer::*;
///
/// let mut opt = ClarabelOptimizer::default();
/// opt.load_problem(&LoadData {
///     row_types: &[RowType::GreaterEqual],
///     rhs: &[2.],
///     colstarts: &[0, 1],
///     rowind: &[0],
///     values: &[1.],
///     lower: &[-INFINITY],
///     upper: &[INFINITY],
///     objective: &[1.],
/// }).unwrap();
/// opt.solve().unwrap();
///
/// assert_eq!(opt.status(), native::lp::OPTIMAL);
/// assert!((opt.primal().unwrap()[0] - 2.).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClarabelOptimizer {
    model: Option<Model>,
    controls: ClarabelControls,
    defaults: ClarabelControls,
    result: Option<SolveResult>,
}

impl ClarabelOptimizer {
    pub fn new(controls: ClarabelControls) -> Self {
        Self {
            defaults: controls.clone(),
            controls,
            ..Self::default()
        }
    }

    pub fn controls(&self) -> &ClarabelControls {
        &self.controls
    }

    fn model(&self) -> Result<&Model, OptimizerError> {
        self.model.as_ref().ok_or(OptimizerError::NotLoaded)
    }

    // any change to the model invalidates the previous result
    fn model_mut(&mut self) -> Result<&mut Model, OptimizerError> {
        self.result = None;
        self.model.as_mut().ok_or(OptimizerError::NotLoaded)
    }

    fn solved(&self) -> Result<&SolveResult, OptimizerError> {
        self.result.as_ref().ok_or(OptimizerError::NoSolution {
            status: self.status(),
        })
    }
}

/// Solve the continuous relaxation of `model` with the given column bounds.
#[allow(non_snake_case)]
pub(crate) fn relax(
    model: &Model,
    bounds: &[Bounds],
    controls: &ClarabelControls,
) -> Result<Relaxation, OptimizerError> {
    let n = model.ncols();
    let data = model.assemble(bounds);

    // the engine cannot factor an empty system
    if n == 0 && data.b.is_empty() {
        return Ok(Relaxation {
            outcome: Outcome::Solved,
            x: Vec::new(),
            z: Vec::new(),
            obj_val: 0.0,
        });
    }

    let P = EngineMatrix::<f64>::zeros((n, n));
    let settings = controls.engine_settings()?;

    let mut solver = DefaultSolver::new(&P, &model.objective, &data.A, &data.b, &data.cones, settings)
        .map_err(|e| OptimizerError::Engine(format!("{:?}", e)))?;
    solver.solve();

    let solution = &solver.solution;
    Ok(Relaxation {
        outcome: Outcome::from_engine(solution.status),
        x: solution.x.clone(),
        z: solution.z.clone(),
        obj_val: solution.obj_val,
    })
}

// engine duals of the linear rows, sign adjusted for negated `>=` rows
fn row_duals(rows: &[Row], z: &[f64]) -> Vec<f64> {
    rows.iter()
        .zip(z)
        .map(|(row, &zi)| match row.kind {
            RowType::GreaterEqual => -zi,
            _ => zi,
        })
        .collect()
}

impl Optimizer for ClarabelOptimizer {
    const NAME: &'static str = "CLARABEL";

    fn load_problem(&mut self, data: &LoadData<'_>) -> Result<(), OptimizerError> {
        let model = Model::from_load_data(data)?;
        log::debug!(
            "loaded {} rows, {} columns, {} nonzeros",
            model.nrows(),
            model.ncols(),
            data.colstarts[model.ncols()]
        );
        self.model = Some(model);
        self.result = None;
        Ok(())
    }

    fn add_columns(&mut self, bounds: &[Bounds]) -> Result<std::ops::Range<usize>, OptimizerError> {
        let model = self.model_mut()?;
        let first = model.ncols();
        model.cols.extend(bounds.iter().map(|&bounds| Column {
            bounds,
            kind: ColumnType::Continuous,
        }));
        model.objective.resize(model.ncols(), 0.0);
        Ok(first..model.ncols())
    }

    fn add_rows(
        &mut self,
        row_types: &[RowType],
        rhs: &[f64],
        rowstarts: &[usize],
        colind: &[usize],
        values: &[f64],
    ) -> Result<std::ops::Range<usize>, OptimizerError> {
        let nnew = row_types.len();
        if rhs.len() != nnew
            || rowstarts.len() != nnew + 1
            || rowstarts.windows(2).any(|w| w[0] > w[1])
            || rowstarts[nnew] > colind.len()
            || colind.len() != values.len()
        {
            return Err(OptimizerError::Dimension("row starts"));
        }

        let model = self.model_mut()?;
        let ncols = model.ncols();
        let mut rows = Vec::with_capacity(nnew);
        for i in 0..nnew {
            let mut coefs = BTreeMap::new();
            for p in rowstarts[i]..rowstarts[i + 1] {
                OptimizerError::check_index("column", colind[p], ncols)?;
                *coefs.entry(colind[p]).or_insert(0.0) += values[p];
            }
            rows.push(Row {
                kind: row_types[i],
                rhs: rhs[i],
                coefs,
            });
        }

        let first = model.nrows();
        model.rows.extend(rows);
        Ok(first..model.nrows())
    }

    fn add_second_order_constraint(
        &mut self,
        constraint: SecondOrderConstraint,
    ) -> Result<usize, OptimizerError> {
        let model = self.model_mut()?;
        for expr in constraint.expressions() {
            if let Some(j) = expr.max_column() {
                model.check_col(j)?;
            }
        }
        model.socs.push(constraint);
        Ok(model.socs.len() - 1)
    }

    fn set_objective(&mut self, coefs: &[f64]) -> Result<(), OptimizerError> {
        let model = self.model_mut()?;
        if coefs.len() != model.ncols() {
            return Err(OptimizerError::Dimension("objective"));
        }
        model.objective.copy_from_slice(coefs);
        Ok(())
    }

    fn change_objective(&mut self, cols: &[usize], values: &[f64]) -> Result<(), OptimizerError> {
        if cols.len() != values.len() {
            return Err(OptimizerError::Dimension("objective change"));
        }
        let model = self.model_mut()?;
        for (&j, &v) in cols.iter().zip(values) {
            model.check_col(j)?;
            model.objective[j] = v;
        }
        Ok(())
    }

    fn change_coefficients(
        &mut self,
        rows: &[usize],
        cols: &[usize],
        values: &[f64],
    ) -> Result<(), OptimizerError> {
        if rows.len() != cols.len() || cols.len() != values.len() {
            return Err(OptimizerError::Dimension("coefficient change"));
        }
        let model = self.model_mut()?;
        for (&i, &j, &v) in izip!(rows, cols, values) {
            model.set_coefficient(i, j, v)?;
        }
        Ok(())
    }

    fn change_rhs(&mut self, rows: &[usize], values: &[f64]) -> Result<(), OptimizerError> {
        if rows.len() != values.len() {
            return Err(OptimizerError::Dimension("rhs change"));
        }
        let model = self.model_mut()?;
        for (&i, &v) in rows.iter().zip(values) {
            model.check_row(i)?;
            model.rows[i].rhs = v;
        }
        Ok(())
    }

    fn change_column_types(
        &mut self,
        cols: &[usize],
        types: &[ColumnType],
    ) -> Result<(), OptimizerError> {
        if cols.len() != types.len() {
            return Err(OptimizerError::Dimension("column type change"));
        }
        let model = self.model_mut()?;
        for (&j, &kind) in cols.iter().zip(types) {
            model.check_col(j)?;
            model.cols[j].kind = kind;
        }
        Ok(())
    }

    fn set_control(&mut self, name: &str, value: &ControlValue) -> Result<(), OptimizerError> {
        self.controls.set(name, value)
    }

    fn has_control(&self, name: &str) -> bool {
        ClarabelControls::is_known(name)
    }

    fn reset_controls(&mut self) {
        self.controls = self.defaults.clone();
    }

    fn solve(&mut self) -> Result<(), OptimizerError> {
        self.result = None;
        let model = self.model()?;

        let result = if model.has_discrete() {
            let search = branching::search(model, &self.controls)?;
            log::debug!(
                "branch and bound finished after {} nodes with status {}",
                search.nodes,
                search.status
            );
            SolveResult {
                status: search.status,
                objective: search.incumbent.as_ref().map(|x| model.objective_at(x)),
                x: search.incumbent,
                duals: None,
            }
        } else {
            let relaxation = relax(model, &model.column_bounds(), &self.controls)?;
            let solved = relaxation.outcome == Outcome::Solved;
            SolveResult {
                status: relaxation.outcome.lp_status(),
                objective: solved.then_some(relaxation.obj_val),
                duals: solved.then(|| row_duals(&model.rows, &relaxation.z)),
                x: solved.then_some(relaxation.x),
            }
        };

        self.result = Some(result);
        Ok(())
    }

    fn status(&self) -> NativeStatus {
        match (&self.result, &self.model) {
            (Some(result), _) => result.status,
            (None, Some(model)) if model.has_discrete() => mip::LP_NOT_OPTIMAL,
            (None, Some(_)) => lp::UNSTARTED,
            (None, None) => mip::NOT_LOADED,
        }
    }

    fn objective_value(&self) -> Option<f64> {
        self.result.as_ref().and_then(|r| r.objective)
    }

    fn primal(&self) -> Result<Vec<f64>, OptimizerError> {
        let result = self.solved()?;
        result.x.clone().ok_or(OptimizerError::NoSolution {
            status: result.status,
        })
    }

    fn duals(&self) -> Result<Vec<f64>, OptimizerError> {
        let result = self.solved()?;
        result.duals.clone().ok_or(OptimizerError::NoSolution {
            status: result.status,
        })
    }

    fn column_types(&self) -> Vec<ColumnType> {
        self.model
            .as_ref()
            .map(|m| m.cols.iter().map(|c| c.kind).collect())
            .unwrap_or_default()
    }

    fn num_rows(&self) -> usize {
        self.model.as_ref().map_or(0, Model::nrows)
    }

    fn num_cols(&self) -> usize {
        self.model.as_ref().map_or(0, Model::ncols)
    }

    fn num_second_order_constraints(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.socs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimizer_with(objective: &[f64], lower: &[f64]) -> ClarabelOptimizer {
        // x0 + x1 >= 1
        let mut opt = ClarabelOptimizer::default();
        opt.load_problem(&LoadData {
            row_types: &[RowType::GreaterEqual],
            rhs: &[1.],
            colstarts: &[0, 1, 2],
            rowind: &[0, 0],
            values: &[1., 1.],
            lower,
            upper: &[INFINITY, INFINITY],
            objective,
        })
        .unwrap();
        opt
    }

    #[test]
    fn test_not_loaded() {
        let mut opt = ClarabelOptimizer::default();
        assert_eq!(opt.solve(), Err(OptimizerError::NotLoaded));
        assert_eq!(opt.status(), mip::NOT_LOADED);
        assert!(opt.primal().is_err());
    }

    #[test]
    fn test_lp_solve() {
        let mut opt = optimizer_with(&[1., 2.], &[0., 0.]);
        opt.solve().unwrap();
        assert_eq!(opt.status(), lp::OPTIMAL);

        let x = opt.primal().unwrap();
        assert!((x[0] - 1.).abs() < 1e-6);
        assert!(x[1].abs() < 1e-6);
        assert!((opt.objective_value().unwrap() - 1.).abs() < 1e-6);
        assert_eq!(opt.duals().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_problem() {
        let mut opt = ClarabelOptimizer::default();
        opt.load_problem(&LoadData {
            row_types: &[],
            rhs: &[],
            colstarts: &[0],
            rowind: &[],
            values: &[],
            lower: &[],
            upper: &[],
            objective: &[],
        })
        .unwrap();
        opt.solve().unwrap();

        assert_eq!(opt.status(), lp::OPTIMAL);
        assert!(opt.primal().unwrap().is_empty());
        assert!(opt.duals().unwrap().is_empty());
        assert_eq!(opt.objective_value(), Some(0.0));
    }

    #[test]
    fn test_lp_unbounded() {
        let mut opt = optimizer_with(&[1., 0.], &[-INFINITY, 0.]);
        opt.solve().unwrap();
        assert_eq!(opt.status(), lp::UNBOUNDED);
        assert!(opt.objective_value().is_none());
    }

    #[test]
    fn test_changes_invalidate_result() {
        let mut opt = optimizer_with(&[1., 2.], &[0., 0.]);
        opt.solve().unwrap();
        opt.change_rhs(&[0], &[3.]).unwrap();
        assert!(opt.primal().is_err());

        opt.solve().unwrap();
        assert!((opt.objective_value().unwrap() - 3.).abs() < 1e-6);
    }

    #[test]
    fn test_add_rows_and_columns() {
        let mut opt = optimizer_with(&[1., 2.], &[0., 0.]);
        let cols = opt.add_columns(&[Bounds::nonnegative()]).unwrap();
        assert_eq!(cols, 2..3);

        let rows = opt
            .add_rows(&[RowType::Equal], &[4.], &[0, 2], &[0, 2], &[1., 1.])
            .unwrap();
        assert_eq!(rows, 1..2);
        assert_eq!(opt.num_rows(), 2);
        assert_eq!(opt.num_cols(), 3);

        assert!(opt
            .add_rows(&[RowType::Equal], &[4.], &[0, 1], &[7], &[1.])
            .is_err());
        assert!(opt.change_objective(&[5], &[1.]).is_err());
    }

    #[test]
    fn test_second_order_constraint() {
        // minimize t subject to ||(x0 - 3, x1 - 4)|| <= t
        let mut opt = ClarabelOptimizer::default();
        opt.load_problem(&LoadData {
            row_types: &[],
            rhs: &[],
            colstarts: &[0, 0, 0, 0],
            rowind: &[],
            values: &[],
            lower: &[-INFINITY; 3],
            upper: &[INFINITY; 3],
            objective: &[0., 0., 1.],
        })
        .unwrap();

        // x = (0, 0)
        opt.add_rows(
            &[RowType::Equal, RowType::Equal],
            &[0., 0.],
            &[0, 1, 2],
            &[0, 1],
            &[1., 1.],
        )
        .unwrap();

        let mut leg0 = AffineExpr::constant(-3.);
        leg0.add_term(0, 1.);
        let mut leg1 = AffineExpr::constant(-4.);
        leg1.add_term(1, 1.);
        let index = opt
            .add_second_order_constraint(SecondOrderConstraint::new(
                AffineExpr::variable(2),
                vec![leg0, leg1],
            ))
            .unwrap();
        assert_eq!(index, 0);

        opt.solve().unwrap();
        assert_eq!(opt.status(), lp::OPTIMAL);
        assert!((opt.objective_value().unwrap() - 5.).abs() < 1e-5);
    }

    #[test]
    fn test_mip_status_vocabulary() {
        let mut opt = optimizer_with(&[1., 2.], &[0., 0.]);
        opt.change_column_types(&[0], &[ColumnType::Integer]).unwrap();
        assert_eq!(opt.status(), mip::LP_NOT_OPTIMAL);
        assert_eq!(
            opt.column_types(),
            vec![ColumnType::Integer, ColumnType::Continuous]
        );

        opt.solve().unwrap();
        assert_eq!(opt.status(), mip::OPTIMAL);
        assert!(opt.duals().is_err());
    }

    #[test]
    fn test_controls() {
        let mut opt = ClarabelOptimizer::default();
        assert!(opt.has_control(VERBOSE_CONTROL));
        opt.set_control("max_iter", &ControlValue::Int(5)).unwrap();
        assert_eq!(opt.controls().max_iter, 5);
        assert!(opt.set_control("nope", &ControlValue::Int(5)).is_err());
    }

    #[test]
    fn test_reset_controls() {
        let initial = ClarabelControlsBuilder::default().max_iter(40u32).build().unwrap();
        let mut opt = ClarabelOptimizer::new(initial.clone());
        opt.set_control("max_iter", &ControlValue::Int(5)).unwrap();
        opt.set_control(VERBOSE_CONTROL, &ControlValue::Bool(true)).unwrap();

        opt.reset_controls();
        assert_eq!(opt.controls(), &initial);
    }
}
