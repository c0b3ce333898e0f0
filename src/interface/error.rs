use super::ProblemKind;
use crate::algebra::IndexError;
use crate::optimizer::{NativeStatus, OptimizerError};
use crate::problem::ProblemError;
use thiserror::Error;

/// Error type returned by [`ConicInterface`](super::ConicInterface) operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterfaceError {
    /// Malformed index data
    #[error("invalid input: {0}")]
    InvalidInput(#[from] IndexError),
    /// Problem data inconsistent with its declared dimensions
    #[error("invalid problem: {0}")]
    InvalidProblem(#[from] ProblemError),
    /// The optimizer rejected a call.  Cached state is left unchanged.
    #[error("optimizer rejected the call: {0}")]
    SolverRejected(#[from] OptimizerError),
    /// The optimizer reported a status code missing from the status table
    #[error("unknown {kind} status code {code}")]
    UnknownStatus {
        kind: ProblemKind,
        code: NativeStatus,
    },
}
