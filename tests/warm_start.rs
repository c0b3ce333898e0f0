#![allow(non_snake_case)]

use conelink::algebra::*;
use conelink::interface::*;
use conelink::optimizer::clarabel::ClarabelControls;
use conelink::optimizer::{ColumnType, Optimizer};
use conelink::problem::*;

// minimize c'x subject to x0 + x1 + x2 = 1, x >= 0, and
// ||(x0, x1)|| <= 0.8 as the cone block (0.8, x0, x1)
fn warm_data() -> CanonicalProblem {
    let A = CscMatrix::from_triplets(
        7,
        3,
        &[
            (0, 0, 1.),
            (0, 1, 1.),
            (0, 2, 1.),
            (1, 0, -1.),
            (2, 1, -1.),
            (3, 2, -1.),
            (5, 0, -1.),
            (6, 1, -1.),
        ],
    );
    let b = vec![1., 0., 0., 0., 0.8, 0., 0.];

    CanonicalProblem::new(vec![1., 2., 3.], A, b, ProblemDims::new(1, 3, vec![3])).unwrap()
}

fn interface(mode: ConeMode) -> ConicInterface {
    let _ = env_logger::builder().is_test(true).try_init();
    let settings = InterfaceSettingsBuilder::default()
        .cone_mode(mode)
        .build()
        .unwrap();
    ConicInterface::new(settings)
}

fn cold_result(problem: &CanonicalProblem) -> ResultRecord {
    interface(ConeMode::default())
        .solve(problem, false, &SolveOptions::default())
        .unwrap()
}

fn version(interface: &ConicInterface) -> u64 {
    interface.cache().get(interface.name()).unwrap().version()
}

fn assert_close(a: &ResultRecord, b: &ResultRecord) {
    assert_eq!(a.status, b.status);
    assert!(f64::abs(a.obj_val.unwrap() - b.obj_val.unwrap()) <= 1e-6);
    assert!(a.x.as_ref().unwrap().dist(b.x.as_ref().unwrap()) <= 1e-5);
}

#[test]
fn test_warm_identical_problem() {
    let problem = warm_data();
    let mut interface = interface(ConeMode::default());
    let options = SolveOptions::default();

    let first = interface.solve(&problem, true, &options).unwrap();
    let v1 = version(&interface);

    let snapshot = interface.cache().get(interface.name()).unwrap();
    assert!(plan(snapshot, &problem).unwrap().is_empty());

    let second = interface.solve(&problem, true, &options).unwrap();
    assert_close(&first, &second);
    assert!(version(&interface) > v1);
}

#[test]
fn test_warm_value_changes() {
    for mode in [AuxiliaryVariables.into(), BackSubstitution.into()] {
        let problem = warm_data();
        let mut interface = interface(mode);
        interface
            .solve(&problem, false, &SolveOptions::default())
            .unwrap();

        // objective, linear rhs and matrix changes
        let mut next = problem.clone();
        next.c = vec![3., 2., 1.];
        next.b[0] = 2.;
        next.A.nzval[0] = 2.;

        let warm = interface
            .solve(&next, true, &SolveOptions::default())
            .unwrap();
        assert_close(&warm, &cold_result(&next));

        let snapshot = interface.cache().get(interface.name()).unwrap();
        assert_eq!(snapshot.c(), next.c.as_slice());
    }
}

#[test]
fn test_warm_cone_rhs_change() {
    let problem = warm_data();
    let mut next = problem.clone();
    next.c = vec![-1., -1., 0.];
    next.b[4] = 0.5;

    // absorbed in place with auxiliary variables
    let mut aux = interface(AuxiliaryVariables.into());
    aux.solve(&problem, true, &SolveOptions::default()).unwrap();
    let snapshot = aux.cache().get(aux.name()).unwrap();
    assert_eq!(plan(snapshot, &next).unwrap().rhs.len(), 1);
    let warm = aux.solve(&next, true, &SolveOptions::default()).unwrap();
    assert_close(&warm, &cold_result(&next));

    // reloaded from scratch with back substitution
    let mut back = interface(BackSubstitution.into());
    back.solve(&problem, true, &SolveOptions::default()).unwrap();
    let snapshot = back.cache().get(back.name()).unwrap();
    assert_eq!(
        plan(snapshot, &next),
        Err(Ineligible::ConeRowChange { row: 4 })
    );
    let warm = back.solve(&next, true, &SolveOptions::default()).unwrap();
    assert_close(&warm, &cold_result(&next));
}

#[test]
fn test_warm_structural_change_reloads() {
    let problem = warm_data();
    let mut interface = interface(ConeMode::default());
    interface
        .solve(&problem, true, &SolveOptions::default())
        .unwrap();

    // drop the cone
    let linear = CanonicalProblem::new(
        problem.c.clone(),
        problem.A.select_row_range(0..4),
        problem.b[..4].to_vec(),
        ProblemDims::new(1, 3, vec![]),
    )
    .unwrap();

    let snapshot = interface.cache().get(interface.name()).unwrap();
    assert_eq!(plan(snapshot, &linear), Err(Ineligible::ConeSizes));

    let result = interface
        .solve(&linear, true, &SolveOptions::default())
        .unwrap();
    assert_close(&result, &cold_result(&linear));

    let instance = interface.cache().get(interface.name()).unwrap().instance();
    assert!(instance.cones().is_empty());
}

#[test]
fn test_warm_unparameterized_objective() {
    let problem = warm_data().with_params(ParameterFlags {
        objective: false,
        constraints: true,
    });
    let mut interface = interface(ConeMode::default());
    let first = interface
        .solve(&problem, false, &SolveOptions::default())
        .unwrap();

    // objective changes are not looked for
    let mut next = problem.clone();
    next.c = vec![3., 2., 1.];
    let second = interface
        .solve(&next, true, &SolveOptions::default())
        .unwrap();

    assert_close(&first, &second);
}

#[test]
fn test_warm_column_type_change() {
    let problem = warm_data();
    let mut interface = interface(ConeMode::default());
    interface
        .solve(&problem, false, &SolveOptions::default())
        .unwrap();

    let next = problem.clone().with_integers(vec![2]).unwrap();
    let result = interface
        .solve(&next, true, &SolveOptions::default())
        .unwrap();

    assert_eq!(result.status, SolverStatus::Optimal);
    assert!(result.eq_dual.is_none());
    let types = interface
        .cache()
        .get(interface.name())
        .unwrap()
        .column_types()
        .to_vec();
    assert_eq!(types[2], ColumnType::Integer);

    // and back again
    let result = interface
        .solve(&problem, true, &SolveOptions::default())
        .unwrap();
    assert!(result.eq_dual.is_some());
    let instance = interface.cache().get(interface.name()).unwrap().instance();
    assert!(instance.optimizer().column_types()[..3]
        .iter()
        .all(|&t| t == ColumnType::Continuous));
}

#[test]
fn test_warm_failure_keeps_snapshot() {
    let problem = warm_data();
    let mut interface = interface(ConeMode::default());
    interface
        .solve(&problem, false, &SolveOptions::default())
        .unwrap();
    let v1 = version(&interface);

    let mut next = problem.clone();
    next.b[0] = 2.;
    let options = SolveOptions::new().with_control("no_such_control", 1i64);
    let err = interface.solve(&next, true, &options).unwrap_err();
    assert!(matches!(err, InterfaceError::SolverRejected(_)));

    // the cached instance still holds the first problem
    assert_eq!(version(&interface), v1);
    let snapshot = interface.cache().get(interface.name()).unwrap();
    assert_eq!(snapshot.b(), problem.b.as_slice());
    assert_eq!(plan(snapshot, &next).unwrap().rhs.len(), 1);

    let warm = interface
        .solve(&next, true, &SolveOptions::default())
        .unwrap();
    assert_close(&warm, &cold_result(&next));
}

#[test]
fn test_warm_solve_resets_controls() {
    let problem = warm_data();
    let mut interface = interface(ConeMode::default());
    let options = SolveOptions::new().with_control("max_iter", 50i64);
    interface.solve(&problem, false, &options).unwrap();

    let controls = |interface: &ConicInterface| {
        let snapshot = interface.cache().get(interface.name()).unwrap();
        snapshot.instance().optimizer().controls().clone()
    };
    assert_eq!(controls(&interface).max_iter, 50);

    interface
        .solve(&problem, true, &SolveOptions::default())
        .unwrap();
    assert_eq!(controls(&interface), ClarabelControls::default());
}

#[test]
fn test_warm_start_not_requested() {
    let problem = warm_data();
    let mut interface = interface(ConeMode::default());
    interface
        .solve(&problem, false, &SolveOptions::default())
        .unwrap();
    let v1 = version(&interface);

    interface
        .solve(&problem, false, &SolveOptions::default())
        .unwrap();
    assert!(version(&interface) > v1);
    assert_eq!(interface.cache().len(), 1);

    assert!(interface.cache_mut().invalidate("CLARABEL"));
    assert!(interface.cache().is_empty());
}
