use super::{InterfaceError, ProblemKind, SolverInstance, SolverStatus};
use crate::optimizer::Optimizer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical result of a solve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultRecord {
    pub status: SolverStatus,
    /// objective value, when a solution is available
    pub obj_val: Option<f64>,
    /// values of the canonical variables, when a solution is available
    pub x: Option<Vec<f64>>,
    /// duals of the linear rows (continuous problems only)
    pub eq_dual: Option<Vec<f64>>,
    /// set when the optimizer proved the problem infeasible
    pub infeasible: bool,
}

impl ResultRecord {
    fn without_solution(status: SolverStatus) -> Self {
        Self {
            status,
            obj_val: None,
            x: None,
            eq_dual: None,
            infeasible: status == SolverStatus::Infeasible,
        }
    }
}

/// Read the result of a finished solve from `instance`.
///
/// Auxiliary cone columns are dropped from the primal solution, and duals
/// are reported for the linear rows of continuous problems only.
pub fn extract_result<O>(
    instance: &SolverInstance<O>,
    status: SolverStatus,
    kind: ProblemKind,
) -> Result<ResultRecord, InterfaceError>
where
    O: Optimizer,
{
    if !status.has_solution() {
        return Ok(ResultRecord::without_solution(status));
    }

    let optimizer = instance.optimizer();

    let mut x = optimizer.primal()?;
    x.truncate(instance.n());

    let eq_dual = match kind {
        ProblemKind::Continuous => {
            let mut y = optimizer.duals()?;
            y.truncate(instance.linear_rows());
            Some(y)
        }
        ProblemKind::MixedInteger => None,
    };

    Ok(ResultRecord {
        status,
        obj_val: optimizer.objective_value(),
        x: Some(x),
        eq_dual,
        infeasible: false,
    })
}
