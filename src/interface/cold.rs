//! Loading a canonical problem into a fresh optimizer.

use super::{ConeMode, ConeTransform, InterfaceError, SolverInstance};
use crate::algebra::column_starts;
use crate::optimizer::{ColumnType, LoadData, Optimizer, RowType, INFINITY};
use crate::problem::CanonicalProblem;
use std::iter::repeat;

/// Types of the first `ncols` optimizer columns as required by `problem`.
/// A variable listed as both boolean and integer is integer.
pub fn column_types_for(problem: &CanonicalProblem, ncols: usize) -> Vec<ColumnType> {
    let mut types = vec![ColumnType::Continuous; ncols];
    for &j in &problem.bool_idx {
        types[j] = ColumnType::Binary;
    }
    for &j in &problem.int_idx {
        types[j] = ColumnType::Integer;
    }
    types
}

/// Build a new [`SolverInstance`] holding `problem`.
///
/// The linear rows are loaded in one call, followed by the column types
/// of the discrete variables and then the cone blocks in declared order.
/// The objective is set last, over all columns including any auxiliary
/// cone columns.
pub fn cold_load<O>(
    problem: &CanonicalProblem,
    mode: ConeMode,
) -> Result<SolverInstance<O>, InterfaceError>
where
    O: Optimizer + Default,
{
    problem.validate()?;

    let n = problem.n();
    let (eq, leq) = (problem.dims.eq, problem.dims.leq);
    let linear_rows = eq + leq;

    let row_types: Vec<RowType> = repeat(RowType::Equal)
        .take(eq)
        .chain(repeat(RowType::LessEqual).take(leq))
        .collect();

    let linear = problem.A.select_row_range(0..linear_rows);
    let colstarts = column_starts(&linear.col_indices(), n)?;
    let lower = vec![-INFINITY; n];
    let upper = vec![INFINITY; n];

    let mut optimizer = O::default();
    optimizer.load_problem(&LoadData {
        row_types: &row_types,
        rhs: &problem.b[..linear_rows],
        colstarts: &colstarts,
        rowind: &linear.rowval,
        values: &linear.nzval,
        lower: &lower,
        upper: &upper,
        objective: &problem.c,
    })?;

    let mut instance = SolverInstance::new(optimizer, mode, n, linear_rows);

    // booleans first, so that integers win on overlap
    let (cols, types): (Vec<usize>, Vec<ColumnType>) = problem
        .bool_idx
        .iter()
        .map(|&j| (j, ColumnType::Binary))
        .chain(problem.int_idx.iter().map(|&j| (j, ColumnType::Integer)))
        .unzip();
    if !cols.is_empty() {
        instance.optimizer_mut().change_column_types(&cols, &types)?;
    }

    for block in problem.cone_blocks() {
        let rows = problem.A.row_block(block.rows());
        let record = mode.transform(&mut instance, &block, &rows, &problem.b[block.rows()])?;
        instance.push_cone(record);
    }

    let mut objective = problem.c.clone();
    objective.resize(instance.num_cols(), 0.0);
    instance.optimizer_mut().set_objective(&objective)?;

    log::debug!(
        "cold load: {} columns ({} auxiliary), {} linear rows, {} cones",
        instance.num_cols(),
        instance.num_cols() - n,
        linear_rows,
        instance.cones().len()
    );

    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::CscMatrix;
    use crate::interface::{AuxiliaryVariables, BackSubstitution};
    use crate::optimizer::ClarabelOptimizer;
    use crate::problem::ProblemDims;

    // x0 + x1 = 1, x0 <= 2, (t, x0, x1) in SOC(3) with t = x2
    fn problem() -> CanonicalProblem {
        #[allow(non_snake_case)]
        let A = CscMatrix::from_triplets(
            5,
            3,
            &[
                (0, 0, 1.),
                (0, 1, 1.),
                (1, 0, 1.),
                (2, 2, -1.),
                (3, 0, -1.),
                (4, 1, -1.),
            ],
        );
        CanonicalProblem::new(
            vec![0., 0., 1.],
            A,
            vec![1., 2., 0., 0., 0.],
            ProblemDims::new(1, 1, vec![3]),
        )
        .unwrap()
    }

    #[test]
    fn test_cold_load_auxiliary() {
        let instance =
            cold_load::<ClarabelOptimizer>(&problem(), AuxiliaryVariables.into()).unwrap();

        let opt = instance.optimizer();
        assert_eq!(opt.num_cols(), 6);
        assert_eq!(opt.num_rows(), 5);
        assert_eq!(opt.num_second_order_constraints(), 1);
        assert_eq!(instance.num_cols(), 6);
        assert_eq!(instance.cones()[0].columns, 3..6);
        assert_eq!(instance.realized_row(3), Some(3));
        assert_eq!(instance.realized_row(1), Some(1));
    }

    #[test]
    fn test_cold_load_back_substitution() {
        let instance =
            cold_load::<ClarabelOptimizer>(&problem(), BackSubstitution.into()).unwrap();

        let opt = instance.optimizer();
        assert_eq!(opt.num_cols(), 3);
        assert_eq!(opt.num_rows(), 2);
        assert_eq!(opt.num_second_order_constraints(), 1);
        assert_eq!(instance.realized_row(3), None);
    }

    #[test]
    fn test_column_types() {
        let p = problem()
            .with_booleans(vec![0, 1])
            .unwrap()
            .with_integers(vec![1])
            .unwrap();

        let types = column_types_for(&p, 4);
        assert_eq!(
            types,
            vec![
                ColumnType::Binary,
                ColumnType::Integer,
                ColumnType::Continuous,
                ColumnType::Continuous
            ]
        );

        let instance = cold_load::<ClarabelOptimizer>(&p, ConeMode::default()).unwrap();
        assert_eq!(
            instance.optimizer().column_types(),
            column_types_for(&p, instance.num_cols())
        );
    }

    #[test]
    fn test_invalid_problem_rejected() {
        let mut p = problem();
        p.b.pop();
        let err = cold_load::<ClarabelOptimizer>(&p, ConeMode::default()).unwrap_err();
        assert!(matches!(err, InterfaceError::InvalidProblem(_)));
    }
}
