//! Depth-first branch and bound over continuous relaxations.

use super::model::Model;
use super::{relax, ClarabelControls, Outcome};
use crate::optimizer::native::mip;
use crate::optimizer::{Bounds, NativeStatus, OptimizerError};

/// Result of a branch and bound search
#[derive(Debug, Clone)]
pub(crate) struct SearchResult {
    pub status: NativeStatus,
    pub incumbent: Option<Vec<f64>>,
    pub nodes: u32,
}

impl SearchResult {
    fn without_solution(status: NativeStatus, nodes: u32) -> Self {
        Self {
            status,
            incumbent: None,
            nodes,
        }
    }
}

/// A branching decision on a fractional column
#[derive(Debug, Clone, Copy, PartialEq)]
struct BranchDecision {
    var: usize,
    value: f64,
}

impl BranchDecision {
    /// Children of a node, the one to explore first last.
    fn children(&self, bounds: Vec<Bounds>) -> [Vec<Bounds>; 2] {
        let mut down = bounds.clone();
        down[self.var].upper = self.value.floor();
        let mut up = bounds;
        up[self.var].lower = self.value.ceil();

        if self.value - self.value.floor() < 0.5 {
            [up, down]
        } else {
            [down, up]
        }
    }
}

// most fractional discrete column, or None if integer feasible
fn select_branch(x: &[f64], discrete: &[usize], tol: f64) -> Option<BranchDecision> {
    discrete
        .iter()
        .map(|&j| {
            let f = x[j] - x[j].floor();
            (j, f.min(1.0 - f))
        })
        .filter(|&(_, frac)| frac > tol)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(var, _)| BranchDecision { var, value: x[var] })
}

fn is_empty_domain(bounds: &[Bounds], tol: f64) -> bool {
    bounds.iter().any(|b| b.lower > b.upper + tol)
}

pub(crate) fn search(
    model: &Model,
    controls: &ClarabelControls,
) -> Result<SearchResult, OptimizerError> {
    let tol = controls.mip_int_tol;
    let n = model.ncols();
    let discrete: Vec<usize> = (0..n).filter(|&j| model.cols[j].kind.is_discrete()).collect();

    let mut stack = vec![model.column_bounds()];
    let mut incumbent: Option<(f64, Vec<f64>)> = None;
    let mut nodes = 0u32;
    let mut complete = true;

    while let Some(bounds) = stack.pop() {
        if nodes >= controls.mip_max_nodes {
            complete = false;
            break;
        }
        nodes += 1;
        let is_root = nodes == 1;

        if is_empty_domain(&bounds, tol) {
            continue;
        }

        let relaxation = relax(model, &bounds, controls)?;
        match relaxation.outcome {
            Outcome::Solved => {}
            Outcome::Infeasible => continue,
            Outcome::Unbounded if is_root => {
                return Ok(SearchResult::without_solution(mip::UNBOUNDED, nodes));
            }
            _ if is_root => {
                return Ok(SearchResult::without_solution(mip::LP_NOT_OPTIMAL, nodes));
            }
            _ => {
                complete = false;
                continue;
            }
        }

        // prune by bound
        if let Some((best, _)) = &incumbent {
            if relaxation.obj_val >= best - controls.tol_gap_abs {
                continue;
            }
        }

        match select_branch(&relaxation.x, &discrete, tol) {
            Some(decision) => {
                log::trace!("node {}: branch on x[{}] = {}", nodes, decision.var, decision.value);
                stack.extend(decision.children(bounds));
            }
            None => {
                let mut x = relaxation.x[..n].to_vec();
                for &j in &discrete {
                    x[j] = x[j].round();
                }
                let obj = model.objective_at(&x);
                if incumbent.as_ref().map_or(true, |(best, _)| obj < *best) {
                    log::debug!("node {}: new incumbent with objective {}", nodes, obj);
                    incumbent = Some((obj, x));
                }
            }
        }
    }

    let status = match (&incumbent, complete) {
        (Some(_), true) => mip::OPTIMAL,
        (Some(_), false) => mip::SOLUTION,
        (None, true) => mip::INFEASIBLE,
        (None, false) => mip::NO_SOL_FOUND,
    };

    Ok(SearchResult {
        status,
        incumbent: incumbent.map(|(_, x)| x),
        nodes,
    })
}
