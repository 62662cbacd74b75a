//! Interface toward an external solving collaborator
//!
//! The core never solves anything itself. A [`Solver`] receives the rendered
//! document text and produces a lazy stream of [`SolutionRecord`]s whose
//! contents are opaque to this crate.

use crate::error::ZincError;
use crate::ZincResult;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// One solution reported by a solver, as variable name to value assignments
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SolutionRecord {
    pub assignments: Map<String, Value>,
}

impl SolutionRecord {
    pub fn new(assignments: Map<String, Value>) -> Self {
        Self { assignments }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.assignments.get(name)
    }
}

impl fmt::Display for SolutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.assignments {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", name, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Options passed through to the solver untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// Report every solution rather than the first one found
    pub all_solutions: bool,
    /// Stop after this many solutions
    pub solution_limit: Option<usize>,
    /// Wall-clock limit in milliseconds
    pub time_limit_ms: Option<u64>,
    /// Let the solver ignore search annotations
    pub free_search: bool,
}

/// A lazy, possibly unbounded stream of solutions
pub type Solutions<'a> = Box<dyn Iterator<Item = ZincResult<SolutionRecord>> + 'a>;

pub trait Solver {
    /// Unique identifier, e.g. `org.gecode.gecode`
    fn id(&self) -> &str;

    /// Alternative names the solver answers to, e.g. `cp`, `gecode`
    fn tags(&self) -> &[String] {
        &[]
    }

    /// Start solving `document` and stream back its solutions
    fn solve(&self, document: &str, options: &SolveOptions) -> ZincResult<Solutions<'_>>;

    /// Whether `name` selects this solver: full id, last id segment, or a tag
    fn matches(&self, name: &str) -> bool {
        let id = self.id();
        id == name
            || id.rsplit('.').next() == Some(name)
            || self.tags().iter().any(|tag| tag == name)
    }
}

/// The set of solvers a model can be handed to
#[derive(Default)]
pub struct SolverRegistry {
    solvers: Vec<Box<dyn Solver>>,
}

impl SolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, solver: Box<dyn Solver>) {
        self.solvers.push(solver);
    }

    /// Registered solver ids, in registration order
    pub fn solvers(&self) -> Vec<&str> {
        self.solvers.iter().map(|s| s.id()).collect()
    }

    /// Find a solver by id, id suffix or tag. Exact id matches win over the rest.
    pub fn lookup(&self, name: &str) -> ZincResult<&dyn Solver> {
        self.solvers
            .iter()
            .find(|s| s.id() == name)
            .or_else(|| self.solvers.iter().find(|s| s.matches(name)))
            .map(|s| s.as_ref())
            .ok_or_else(|| ZincError::SolverNotFound(name.to_string()))
    }

    pub fn solve(
        &self,
        document: &str,
        solver_name: &str,
        options: &SolveOptions,
    ) -> ZincResult<Solutions<'_>> {
        let solver = self.lookup(solver_name)?;
        tracing::debug!(solver = solver.id(), "handing document to solver");
        solver.solve(document, options)
    }
}

impl fmt::Debug for SolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverRegistry")
            .field("solvers", &self.solvers())
            .finish()
    }
}
