//! # Zinc
//!
//! **Constraint models, written in Rust**
//!
//! Zinc is an embedded DSL for building constraint-satisfaction models
//! programmatically and rendering them as a textual constraint-model
//! document (MiniZinc syntax) for an external solver.
//!
//! ## Quick Start
//!
//! ```rust
//! use zinc::{Compose, Interval, Model, ZincResult};
//!
//! fn main() -> ZincResult<()> {
//!     let mut model = Model::new();
//!     let x = model.declare("x", Interval::new(0, 10)?).clone();
//!     let y = model.declare("y", Interval::new(0, 10)?).clone();
//!
//!     model.post((&x).plus(&y).equals(10));
//!
//!     assert_eq!(
//!         model.render(),
//!         "var 0..10: x;\nvar 0..10: y;\n\nconstraint ((x) + (y)) = (10);"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Variables
//! Named unknowns bounded by an [`Interval`]. A [`Model`] owns its variables;
//! with auto-declare enabled, [`Model::resolve`] creates unknown names on
//! first reference using the model's default domain.
//!
//! ### Expressions
//! Binary trees over variables, constants and other expressions. They are
//! never evaluated, only rendered, with every operand parenthesized.
//!
//! ### Solvers
//! Solving is delegated. A [`Solver`] receives the rendered document and
//! streams back [`SolutionRecord`]s.

pub mod ast;
pub mod error;
pub mod model;
pub mod ops;
pub mod options;
pub mod parser;
pub mod semantic;
pub mod solver;

pub use ast::Span;
pub use error::{ErrorDetails, ZincError};
pub use model::Model;
pub use ops::Compose;
pub use options::ModelOptions;
pub use parser::parse_expression;
pub use semantic::{DomainValue, Expression, Interval, Operand, Operator, Variable, Variables};
pub use solver::{SolutionRecord, Solutions, SolveOptions, Solver, SolverRegistry};

/// Result type for Zinc operations
pub type ZincResult<T> = Result<T, ZincError>;
