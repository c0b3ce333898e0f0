#![allow(non_snake_case)]

use conelink::algebra::*;
use conelink::interface::*;
use conelink::problem::*;

// minimize c'x subject to -1 <= 2x <= 1, as six inequality rows
fn basic_lp_data() -> CanonicalProblem {
    let mut triplets = Vec::new();
    for i in 0..3 {
        triplets.push((i, i, 2.));
        triplets.push((i + 3, i, -2.));
    }
    let A = CscMatrix::from_triplets(6, 3, &triplets);

    let c = vec![3., -2., 1.];
    let b = vec![1.; 6];

    CanonicalProblem::new(c, A, b, ProblemDims::new(0, 6, vec![])).unwrap()
}

fn solve(problem: &CanonicalProblem) -> ResultRecord {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut interface: ConicInterface = ConicInterface::default();
    interface
        .solve(problem, false, &SolveOptions::default())
        .unwrap()
}

#[test]
fn test_lp_feasible() {
    let result = solve(&basic_lp_data());

    assert_eq!(result.status, SolverStatus::Optimal);
    assert!(!result.infeasible);

    let refsol = vec![-0.5, 0.5, -0.5];
    assert!(result.x.unwrap().dist(&refsol) <= 1e-6);

    let refobj = -3.;
    assert!(f64::abs(result.obj_val.unwrap() - refobj) <= 1e-6);

    // multipliers of the active rows balance the objective
    let refdual = vec![0., 1., 0., 1.5, 0., 0.5];
    assert!(result.eq_dual.unwrap().dist(&refdual) <= 1e-5);
}

#[test]
fn test_lp_primal_infeasible() {
    let mut problem = basic_lp_data();

    problem.b[0] = -1.;
    problem.b[3] = -1.;

    let result = solve(&problem);

    assert_eq!(result.status, SolverStatus::Infeasible);
    assert!(result.infeasible);
    assert!(result.x.is_none());
    assert!(result.obj_val.is_none());
    assert!(result.eq_dual.is_none());
}

#[test]
fn test_lp_dual_infeasible() {
    let mut problem = basic_lp_data();

    // swap lower bound on first variable to redundant upper bound
    problem.A.nzval[1] = 2.;
    problem.c = vec![1., 0., 0.];

    let result = solve(&problem);

    assert_eq!(result.status, SolverStatus::Unbounded);
    assert!(!result.infeasible);
    assert!(result.x.is_none());
}

#[test]
fn test_lp_empty_problem() {
    let problem = CanonicalProblem::new(
        vec![],
        CscMatrix::zeros((0, 0)),
        vec![],
        ProblemDims::new(0, 0, vec![]),
    )
    .unwrap();

    let result = solve(&problem);

    assert_eq!(result.status, SolverStatus::Optimal);
    assert_eq!(result.x, Some(vec![]));
    assert_eq!(result.eq_dual, Some(vec![]));
    assert_eq!(result.obj_val, Some(0.0));
}

#[test]
fn test_lp_equality_constrained() {
    // minimize x0 + x1 subject to x0 + x1 = 1, x >= 0
    let A = CscMatrix::from_triplets(3, 2, &[(0, 0, 1.), (0, 1, 1.), (1, 0, -1.), (2, 1, -1.)]);
    let problem = CanonicalProblem::new(
        vec![1., 1.],
        A,
        vec![1., 0., 0.],
        ProblemDims::new(1, 2, vec![]),
    )
    .unwrap();

    let result = solve(&problem);

    assert_eq!(result.status, SolverStatus::Optimal);
    let x = result.x.unwrap();
    assert!(f64::abs(x.sum() - 1.) <= 1e-6);

    // residual b - Ax
    let mut r = problem.b.clone();
    problem.A.gemv(&mut r, &x, -1., 1.);
    assert!(f64::abs(r[0]) <= 1e-6);
    assert!(r[1..].iter().all(|&ri| ri >= -1e-6));
    assert_eq!(result.eq_dual.unwrap().len(), 3);
}

#[test]
fn test_lp_inconsistent_equalities() {
    // x0 = 1 and x0 = 2
    let A = CscMatrix::from_triplets(2, 1, &[(0, 0, 1.), (1, 0, 1.)]);
    let problem =
        CanonicalProblem::new(vec![0.], A, vec![1., 2.], ProblemDims::new(2, 0, vec![])).unwrap();

    let result = solve(&problem);

    assert_eq!(result.status, SolverStatus::Infeasible);
    assert!(result.infeasible);
}

#[test]
fn test_lp_rejects_bad_dimensions() {
    let mut problem = basic_lp_data();
    problem.dims.leq = 5;

    let mut interface: ConicInterface = ConicInterface::default();
    let err = interface
        .solve(&problem, false, &SolveOptions::default())
        .unwrap_err();

    assert!(matches!(err, InterfaceError::InvalidProblem(_)));
    assert!(interface.cache().is_empty());
}
