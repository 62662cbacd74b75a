use crate::error::ZincError;
use crate::options::ModelOptions;
use crate::parser;
use crate::semantic::{Expression, Interval, Variable};
use crate::solver::{SolveOptions, Solutions, SolverRegistry};
use crate::ZincResult;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// The model registry.
///
/// Owns the declared variables and the posted constraints, and renders them
/// as a constraint-model document. Declarations keep the order in which
/// each name was first declared; constraints keep post order.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<Variable>,
    index: HashMap<String, usize>,
    constraints: Vec<Expression>,
    options: ModelOptions,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ModelOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Parse constraint-model source into a fresh registry
    pub fn from_source(source: &str, source_id: &str, options: ModelOptions) -> ZincResult<Self> {
        let mut model = Self::with_options(options);
        model.add_source(source, source_id)?;
        Ok(model)
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Parse source and add its declarations and constraints to this model
    pub fn add_source(&mut self, source: &str, source_id: &str) -> ZincResult<()> {
        parser::parse_into(self, source, source_id)
    }

    /// Declare `name` with `domain`, replacing any earlier declaration of the
    /// same name in place.
    pub fn declare(&mut self, name: impl Into<String>, domain: Interval) -> &Variable {
        let name = name.into();
        let var = Variable::new(name.clone(), domain);
        let slot = match self.index.get(&name).copied() {
            Some(slot) => {
                debug!(name = %name, "redeclaring variable");
                self.variables[slot] = var;
                slot
            }
            None => {
                self.variables.push(var);
                self.index.insert(name, self.variables.len() - 1);
                self.variables.len() - 1
            }
        };
        &self.variables[slot]
    }

    /// Declare `name` with the model's default domain
    pub fn declare_default(&mut self, name: impl Into<String>) -> &Variable {
        let domain = self.options.default_domain.clone();
        self.declare(name, domain)
    }

    /// Look up `name`, declaring it with the default domain when auto-declare
    /// is enabled. Fails with `UndeclaredVariable` otherwise.
    pub fn resolve(&mut self, name: &str) -> ZincResult<Variable> {
        if let Some(var) = self.get(name) {
            return Ok(var.clone());
        }
        if !self.options.auto_declare {
            return Err(ZincError::UndeclaredVariable(name.to_string()));
        }
        debug!(name, domain = %self.options.default_domain, "auto-declaring variable");
        Ok(self.declare_default(name).clone())
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&slot| &self.variables[slot])
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Declared variables in declaration order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Posted constraints in post order
    pub fn constraints(&self) -> &[Expression] {
        &self.constraints
    }

    /// Append a constraint.
    ///
    /// With auto-declare enabled, variables in `constraint` that this model
    /// has not declared (for instance ones built by another model) are
    /// adopted with the domain they carry.
    pub fn post(&mut self, constraint: Expression) {
        if self.options.auto_declare {
            let missing: Vec<Variable> = constraint
                .collect_variables()
                .filter(|var| !self.is_declared(var.name()))
                .cloned()
                .collect();
            for var in missing {
                if !self.is_declared(var.name()) {
                    debug!(name = var.name(), "adopting variable from posted constraint");
                    self.declare(var.name().to_string(), var.domain().clone());
                }
            }
        }
        self.constraints.push(constraint);
    }

    /// Variables referenced by constraints but missing from the registry,
    /// once each, in order of first reference.
    pub fn undeclared(&self) -> Vec<&Variable> {
        let mut seen = HashSet::new();
        self.constraints
            .iter()
            .flat_map(|c| c.collect_variables())
            .filter(|var| !self.is_declared(var.name()))
            .filter(|var| seen.insert(var.name()))
            .collect()
    }

    /// Fail with `UndeclaredVariable` if any constraint references an
    /// undeclared name
    pub fn check(&self) -> ZincResult<()> {
        match self.undeclared().first() {
            Some(var) => Err(ZincError::UndeclaredVariable(var.name().to_string())),
            None => Ok(()),
        }
    }

    /// Render the declarations, a blank line, then the constraints
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Hand the rendered document to a solver from `solvers`
    pub fn solve<'a>(
        &self,
        solvers: &'a SolverRegistry,
        solver_name: &str,
        options: &SolveOptions,
    ) -> ZincResult<Solutions<'a>> {
        solvers.solve(&self.render(), solver_name, options)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, var) in self.variables.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{};", var.as_declaration())?;
        }
        write!(f, "\n\n")?;
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "constraint {};", constraint)?;
        }
        Ok(())
    }
}
