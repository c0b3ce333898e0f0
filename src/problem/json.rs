#![allow(non_snake_case)]

use super::CanonicalProblem;
use std::fs::File;
use std::io::{self, Read, Write};

impl CanonicalProblem {
    /// Write the problem to a file in JSON format.
    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Read a problem in JSON format from a file.  The problem is
    /// checked for consistency after reading.
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let problem: CanonicalProblem = serde_json::from_str(&buffer)?;

        problem
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(problem)
    }
}

#[test]
fn test_json_io() {
    use crate::algebra::CscMatrix;
    use crate::problem::{ParameterFlags, ProblemDims};
    use std::io::{Seek, SeekFrom};

    let A = CscMatrix::from_triplets(3, 2, &[(0, 0, 1.), (1, 0, -1.), (2, 1, -1.)]);
    let problem = CanonicalProblem::new(
        vec![1., 2.],
        A,
        vec![4., 0., 0.],
        ProblemDims::new(0, 1, vec![2]),
    )
    .unwrap()
    .with_integers(vec![1])
    .unwrap()
    .with_params(ParameterFlags::none());

    let mut file = tempfile::tempfile().unwrap();
    problem.write_to_file(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let problem2 = CanonicalProblem::read_from_file(&mut file).unwrap();
    assert_eq!(problem, problem2);
}

#[test]
fn test_json_rejects_inconsistent() {
    use std::io::{Seek, SeekFrom};

    // two rows declared, one row in the matrix
    let json = r#"{
        "c": [1.0],
        "A": {"m": 1, "n": 1, "colptr": [0, 1], "rowval": [0], "nzval": [1.0]},
        "b": [1.0],
        "dims": {"eq": 2, "leq": 0, "soc": []}
    }"#;

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let err = CanonicalProblem::read_from_file(&mut file).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
