//! Translation of native optimizer status codes.

use super::InterfaceError;
use crate::optimizer::native::{lp, mip};
use crate::optimizer::NativeStatus;
use lazy_static::lazy_static;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical status of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolverStatus {
    Optimal,
    Infeasible,
    Unbounded,
    SolverError,
}

impl SolverStatus {
    /// True if a primal solution can be read back
    pub fn has_solution(&self) -> bool {
        matches!(self, SolverStatus::Optimal)
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::SolverError => "solver_error",
        };
        write!(f, "{}", s)
    }
}

/// Selects the native status vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProblemKind {
    Continuous,
    MixedInteger,
}

impl ProblemKind {
    pub fn from_mip_flag(is_mip: bool) -> Self {
        if is_mip {
            ProblemKind::MixedInteger
        } else {
            ProblemKind::Continuous
        }
    }
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProblemKind::Continuous => write!(f, "continuous"),
            ProblemKind::MixedInteger => write!(f, "mixed-integer"),
        }
    }
}

lazy_static! {
    static ref CONTINUOUS_STATUS: HashMap<NativeStatus, SolverStatus> = HashMap::from([
        (lp::UNSTARTED, SolverStatus::SolverError),
        (lp::OPTIMAL, SolverStatus::Optimal),
        (lp::INFEASIBLE, SolverStatus::Infeasible),
        (lp::CUTOFF, SolverStatus::SolverError),
        (lp::UNFINISHED, SolverStatus::SolverError),
        (lp::UNBOUNDED, SolverStatus::Unbounded),
        (lp::CUTOFF_IN_DUAL, SolverStatus::SolverError),
        (lp::UNSOLVED, SolverStatus::SolverError),
        (lp::NONCONVEX, SolverStatus::SolverError),
    ]);
    static ref MIXED_INTEGER_STATUS: HashMap<NativeStatus, SolverStatus> = HashMap::from([
        (mip::NOT_LOADED, SolverStatus::SolverError),
        (mip::LP_NOT_OPTIMAL, SolverStatus::SolverError),
        (mip::LP_OPTIMAL, SolverStatus::SolverError),
        (mip::NO_SOL_FOUND, SolverStatus::SolverError),
        (mip::SOLUTION, SolverStatus::SolverError),
        (mip::INFEASIBLE, SolverStatus::Infeasible),
        (mip::OPTIMAL, SolverStatus::Optimal),
        (mip::UNBOUNDED, SolverStatus::Unbounded),
    ]);
}

/// Status table for a problem kind
pub fn status_table(kind: ProblemKind) -> &'static HashMap<NativeStatus, SolverStatus> {
    match kind {
        ProblemKind::Continuous => &CONTINUOUS_STATUS,
        ProblemKind::MixedInteger => &MIXED_INTEGER_STATUS,
    }
}

/// Map a native status code to its canonical status.
pub fn translate_status(
    kind: ProblemKind,
    code: NativeStatus,
) -> Result<SolverStatus, InterfaceError> {
    status_table(kind)
        .get(&code)
        .copied()
        .ok_or(InterfaceError::UnknownStatus { kind, code })
}
