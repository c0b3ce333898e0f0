//! Translation between canonical problems and an [`Optimizer`].
//!
//! [`ConicInterface::solve`] validates a [`CanonicalProblem`], loads it
//! into the optimizer (or updates the instance cached by the previous
//! solve), applies the solve options, runs the optimizer and maps its
//! native status and solution back into a [`ResultRecord`].
//!
//! __Example usage__ : minimize `x0 + x1` subject to `x0 + x1 = 1`, `x >= 0`
//!
//! ```
//! use conelink::algebra::CscMatrix;
//! use conelink::interface::*;
//! use conelink::problem::{CanonicalProblem, ProblemDims};
//!
//! // rows: equality, then two inequalities -x <= 0
//! let A = CscMatrix::from_triplets(3, 2, &[
//!     (0, 0, 1.), (0, 1, 1.), (1, 0, -1.), (2, 1, -1.),
//! ]);
//! let problem = CanonicalProblem::new(
//!     vec![1., 1.], A, vec![1., 0., 0.], ProblemDims::new(1, 2, vec![]),
//! ).unwrap();
//!
//! let mut interface: ConicInterface = ConicInterface::default();
//! let result = interface.solve(&problem, false, &SolveOptions::default()).unwrap();
//!
//! assert_eq!(result.status, SolverStatus::Optimal);
//! assert!((result.obj_val.unwrap() - 1.).abs() < 1e-6);
//! ```

mod cache;
mod cold;
mod cones;
mod error;
mod instance;
mod result;
mod settings;
mod status;
mod warmstart;

pub use cache::*;
pub use cold::*;
pub use cones::*;
pub use error::*;
pub use instance::*;
pub use result::*;
pub use settings::*;
pub use status::*;
pub use warmstart::*;

use crate::optimizer::{ClarabelOptimizer, ControlValue, Optimizer, VERBOSE_CONTROL};
use crate::problem::CanonicalProblem;

/// Problem classes an interface can solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub lp: bool,
    pub socp: bool,
    pub mip: bool,
    pub sdp: bool,
    pub exp: bool,
}

/// Solves canonical problems with an optimizer of type `O`, reusing the
/// loaded instance between calls when the problem structure allows it.
#[derive(Debug)]
pub struct ConicInterface<O = ClarabelOptimizer> {
    settings: InterfaceSettings,
    cache: WarmStartCache<O>,
}

impl<O> Default for ConicInterface<O>
where
    O: Optimizer + Default,
{
    fn default() -> Self {
        Self::new(InterfaceSettings::default())
    }
}

impl<O> ConicInterface<O>
where
    O: Optimizer + Default,
{
    pub fn new(settings: InterfaceSettings) -> Self {
        Self {
            settings,
            cache: WarmStartCache::new(),
        }
    }

    /// Name of the solver, also the key of its warm-start cache entry
    pub fn name(&self) -> &str {
        self.settings.solver_name.as_deref().unwrap_or(O::NAME)
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            lp: true,
            socp: true,
            mip: true,
            sdp: false,
            exp: false,
        }
    }

    pub fn settings(&self) -> &InterfaceSettings {
        &self.settings
    }

    pub fn cache(&self) -> &WarmStartCache<O> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut WarmStartCache<O> {
        &mut self.cache
    }

    /// Solve `problem`.
    ///
    /// With `warm_start` set and a compatible cached instance, only the
    /// changes since the previous solve are sent to the optimizer.
    /// Otherwise the problem is loaded from scratch.  The cache is
    /// refreshed after every solve that does not end in
    /// [`SolverStatus::SolverError`], and left as it was on any error.
    pub fn solve(
        &mut self,
        problem: &CanonicalProblem,
        warm_start: bool,
        options: &SolveOptions,
    ) -> Result<ResultRecord, InterfaceError> {
        problem.validate()?;

        let kind = ProblemKind::from_mip_flag(problem.is_mip());
        let name = self.name().to_string();

        let attempt = match (warm_start, self.cache.get(&name)) {
            (false, _) => Err(Ineligible::NotRequested),
            (true, None) => Err(Ineligible::NoSnapshot),
            (true, Some(snapshot)) => plan(snapshot, problem),
        };

        match attempt {
            Ok(plan) => self.solve_warm(&name, problem, plan, kind, options),
            Err(reason) => {
                match reason {
                    Ineligible::NotRequested | Ineligible::NoSnapshot => {
                        log::debug!("{}: cold start ({})", name, reason)
                    }
                    _ => log::warn!("{}: warm start declined, {}", name, reason),
                }
                self.solve_cold(&name, problem, kind, options)
            }
        }
    }

    fn solve_cold(
        &mut self,
        name: &str,
        problem: &CanonicalProblem,
        kind: ProblemKind,
        options: &SolveOptions,
    ) -> Result<ResultRecord, InterfaceError> {
        let mut instance = cold_load::<O>(problem, self.settings.cone_mode)?;
        let record = run(&self.settings, &mut instance, kind, options)?;

        if record.status != SolverStatus::SolverError {
            self.cache.store(name, instance, problem);
        }
        Ok(record)
    }

    fn solve_warm(
        &mut self,
        name: &str,
        problem: &CanonicalProblem,
        plan: WarmStartPlan,
        kind: ProblemKind,
        options: &SolveOptions,
    ) -> Result<ResultRecord, InterfaceError> {
        let Some(mut snapshot) = self.cache.take(name) else {
            return self.solve_cold(name, problem, kind, options);
        };

        log::debug!(
            "{}: warm start with {} objective, {} matrix, {} rhs and {} column type changes",
            name,
            plan.objective.len(),
            plan.matrix.len(),
            plan.rhs.len(),
            plan.column_types.len()
        );

        let outcome = plan
            .apply(snapshot.instance_mut().optimizer_mut())
            .and_then(|_| run(&self.settings, snapshot.instance_mut(), kind, options));

        match outcome {
            Ok(record) if record.status != SolverStatus::SolverError => {
                self.cache.store(name, snapshot.into_instance(), problem);
                Ok(record)
            }
            outcome => {
                // put the cached instance back the way it was
                match plan.revert(snapshot.instance_mut().optimizer_mut()) {
                    Ok(()) => self.cache.restore(name, snapshot),
                    Err(e) => log::warn!("{}: dropping cached instance, revert failed: {}", name, e),
                }
                outcome
            }
        }
    }
}

// controls start from the optimizer defaults on every solve.  The log
// control is set first so that user controls can override it.
fn apply_options<O: Optimizer>(
    settings: &InterfaceSettings,
    optimizer: &mut O,
    options: &SolveOptions,
) -> Result<(), InterfaceError> {
    optimizer.reset_controls();
    if optimizer.has_control(VERBOSE_CONTROL) {
        optimizer.set_control(VERBOSE_CONTROL, &ControlValue::Bool(settings.verbose))?;
    }
    for (name, value) in &options.controls {
        optimizer.set_control(name, value)?;
    }
    for (name, value) in &options.extra {
        if optimizer.has_control(name) {
            optimizer.set_control(name, value)?;
        } else {
            log::debug!("ignoring option {}", name);
        }
    }
    Ok(())
}

fn run<O: Optimizer>(
    settings: &InterfaceSettings,
    instance: &mut SolverInstance<O>,
    kind: ProblemKind,
    options: &SolveOptions,
) -> Result<ResultRecord, InterfaceError> {
    apply_options(settings, instance.optimizer_mut(), options)?;
    instance.optimizer_mut().solve()?;

    let code = instance.optimizer().status();
    let status = translate_status(kind, code)?;
    log::info!("{} finished with status {} ({})", O::NAME, status, code);

    extract_result(instance, status, kind)
}
