//! Per-solver cache of loaded problems.

#![allow(non_snake_case)]

use super::SolverInstance;
use crate::algebra::CscMatrix;
use crate::optimizer::{ColumnType, Optimizer};
use crate::problem::{CanonicalProblem, ProblemDims};
use std::collections::HashMap;

/// A loaded instance together with the problem data it holds.
///
/// Snapshots are never edited in place.  After every successful solve the
/// cache entry is replaced by a new snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot<O> {
    instance: SolverInstance<O>,
    c: Vec<f64>,
    A: CscMatrix<f64>,
    b: Vec<f64>,
    dims: ProblemDims,
    column_types: Vec<ColumnType>,
    version: u64,
}

impl<O> Snapshot<O>
where
    O: Optimizer,
{
    fn new(instance: SolverInstance<O>, problem: &CanonicalProblem, version: u64) -> Self {
        let column_types = instance.optimizer().column_types();
        Self {
            instance,
            c: problem.c.clone(),
            A: problem.A.clone(),
            b: problem.b.clone(),
            dims: problem.dims.clone(),
            column_types,
            version,
        }
    }

    pub fn instance(&self) -> &SolverInstance<O> {
        &self.instance
    }

    pub(crate) fn instance_mut(&mut self) -> &mut SolverInstance<O> {
        &mut self.instance
    }

    pub fn into_instance(self) -> SolverInstance<O> {
        self.instance
    }

    /// objective of the cached problem
    pub fn c(&self) -> &[f64] {
        &self.c
    }

    /// constraint matrix of the cached problem
    pub fn A(&self) -> &CscMatrix<f64> {
        &self.A
    }

    /// right-hand side of the cached problem
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    pub fn dims(&self) -> &ProblemDims {
        &self.dims
    }

    /// column types read back from the optimizer after the cached solve
    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    /// cache version at which this snapshot was stored
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Map from solver name to the most recent [`Snapshot`].
#[derive(Debug)]
pub struct WarmStartCache<O> {
    entries: HashMap<String, Snapshot<O>>,
    version: u64,
}

impl<O> Default for WarmStartCache<O> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            version: 0,
        }
    }
}

impl<O> WarmStartCache<O>
where
    O: Optimizer,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Snapshot<O>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return the entry for `name`
    pub(crate) fn take(&mut self, name: &str) -> Option<Snapshot<O>> {
        self.entries.remove(name)
    }

    /// Put back a snapshot previously removed with `take`
    pub(crate) fn restore(&mut self, name: &str, snapshot: Snapshot<O>) {
        self.entries.insert(name.to_string(), snapshot);
    }

    /// Replace the entry for `name` with a snapshot of `instance`
    /// holding `problem`.  Returns the new version.
    pub fn store(
        &mut self,
        name: &str,
        instance: SolverInstance<O>,
        problem: &CanonicalProblem,
    ) -> u64 {
        self.version += 1;
        let snapshot = Snapshot::new(instance, problem, self.version);
        self.entries.insert(name.to_string(), snapshot);
        self.version
    }

    /// Drop the entry for `name`, forcing the next solve to load cold
    pub fn invalidate(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
