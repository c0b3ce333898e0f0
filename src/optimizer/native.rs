//! Native status vocabulary reported by [`Optimizer::status`](super::Optimizer::status).
//!
//! Continuous and mixed-integer solves report codes from separate
//! vocabularies.  Which one applies depends on whether the loaded problem
//! has any integer or binary columns.

/// A raw status code as reported by an optimizer.
pub type NativeStatus = i32;

/// Status codes for continuous (LP / SOCP) solves.
pub mod lp {
    use super::NativeStatus;
    /// solve has not been started
    pub const UNSTARTED: NativeStatus = 0;
    /// optimal solution found
    pub const OPTIMAL: NativeStatus = 1;
    /// problem is infeasible
    pub const INFEASIBLE: NativeStatus = 2;
    /// objective worse than the cutoff
    pub const CUTOFF: NativeStatus = 3;
    /// solve stopped before completion (limits reached)
    pub const UNFINISHED: NativeStatus = 4;
    /// problem is unbounded
    pub const UNBOUNDED: NativeStatus = 5;
    /// cutoff detected in the dual
    pub const CUTOFF_IN_DUAL: NativeStatus = 6;
    /// solve failed, e.g. for numerical reasons
    pub const UNSOLVED: NativeStatus = 7;
    /// problem was detected as nonconvex
    pub const NONCONVEX: NativeStatus = 8;

    /// every code in this vocabulary
    pub const ALL: [NativeStatus; 9] = [
        UNSTARTED,
        OPTIMAL,
        INFEASIBLE,
        CUTOFF,
        UNFINISHED,
        UNBOUNDED,
        CUTOFF_IN_DUAL,
        UNSOLVED,
        NONCONVEX,
    ];
}

/// Status codes for mixed-integer solves.
pub mod mip {
    use super::NativeStatus;
    /// no problem loaded or search not started
    pub const NOT_LOADED: NativeStatus = 0;
    /// root relaxation was not solved to optimality
    pub const LP_NOT_OPTIMAL: NativeStatus = 1;
    /// root relaxation optimal, search not started
    pub const LP_OPTIMAL: NativeStatus = 2;
    /// search stopped without an integer solution
    pub const NO_SOL_FOUND: NativeStatus = 3;
    /// search stopped with an integer solution, optimality not proven
    pub const SOLUTION: NativeStatus = 4;
    /// problem is integer infeasible
    pub const INFEASIBLE: NativeStatus = 5;
    /// optimal integer solution found
    pub const OPTIMAL: NativeStatus = 6;
    /// problem is unbounded
    pub const UNBOUNDED: NativeStatus = 7;

    /// every code in this vocabulary
    pub const ALL: [NativeStatus; 8] = [
        NOT_LOADED,
        LP_NOT_OPTIMAL,
        LP_OPTIMAL,
        NO_SOL_FOUND,
        SOLUTION,
        INFEASIBLE,
        OPTIMAL,
        UNBOUNDED,
    ];
}
