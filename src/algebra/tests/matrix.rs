#![allow(non_snake_case)]

use crate::algebra::*;

fn test_matrix() -> CscMatrix<f64> {
    // A =
    //[1.  .  2.]
    //[.   3. . ]
    CscMatrix::from_triplets(2, 3, &[(0, 0, 1.), (1, 1, 3.), (0, 2, 2.)])
}

#[test]
fn test_from_triplets() {
    let A = test_matrix();
    assert!(A.check_format().is_ok());
    assert_eq!(A.colptr, vec![0, 1, 2, 3]);
    assert_eq!(A.rowval, vec![0, 1, 0]);
    assert_eq!(A.nzval, vec![1., 3., 2.]);

    // duplicates are summed
    let B = CscMatrix::from_triplets(1, 1, &[(0, 0, 1.), (0, 0, 2.)]);
    assert_eq!(B.nzval, vec![3.]);
}

#[test]
fn test_check_format() {
    let mut A = test_matrix();
    A.rowval[0] = 5;
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowval));

    let mut A = test_matrix();
    A.colptr = vec![0, 2, 1, 3];
    assert_eq!(A.check_format(), Err(SparseFormatError::BadColptr));

    let mut A = test_matrix();
    A.nzval.pop();
    assert_eq!(
        A.check_format(),
        Err(SparseFormatError::IncompatibleDimension)
    );
}

#[test]
fn test_gemv() {
    let A = test_matrix();
    let x = [1., 2., 3.];
    let mut y = [1., 1.];
    A.gemv(&mut y, &x, 2., -1.);
    assert_eq!(y, [13., 11.]);
}

#[test]
fn test_zeros() {
    let Z = CscMatrix::<f64>::zeros((2, 4));
    assert_eq!(Z.size(), (2, 4));
    assert_eq!(Z.nnz(), 0);
}
