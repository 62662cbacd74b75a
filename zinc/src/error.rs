use crate::ast::Span;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// Error types for building, reading and solving constraint models
#[derive(Debug, Clone)]
pub enum ZincError {
    /// Syntax error in constraint-model source, with location
    Parse(Box<ErrorDetails>),

    /// A name was resolved while auto-declare was disabled
    UndeclaredVariable(String),

    /// An operator symbol outside `+ - * / = >= > < <=`
    InvalidOperator(String),

    /// An interval whose lower bound exceeds its upper bound
    InvalidInterval { low: Decimal, high: Decimal },

    /// The solver collaborator has no solver matching the requested name
    SolverNotFound(String),

    /// Failure reported by the solver collaborator while solving
    Solver(String),

    /// Internal error without a source location
    Engine(String),
}

impl ZincError {
    /// Create a parse error with source information
    pub fn parse(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Create a parse error with suggestion
    pub fn parse_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }
}

impl fmt::Display for ZincError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZincError::Parse(details) => {
                write!(f, "Parse error: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(
                    f,
                    " at {}:{}:{}",
                    details.source_id, details.span.line, details.span.col
                )
            }
            ZincError::UndeclaredVariable(name) => {
                write!(f, "Undeclared variable '{}'", name)
            }
            ZincError::InvalidOperator(symbol) => {
                write!(
                    f,
                    "Invalid operator '{}' (expected one of + - * / = >= > < <=)",
                    symbol
                )
            }
            ZincError::InvalidInterval { low, high } => {
                write!(
                    f,
                    "Invalid interval {}..{}: lower bound exceeds upper bound",
                    low, high
                )
            }
            ZincError::SolverNotFound(name) => write!(f, "Solver '{}' not found", name),
            ZincError::Solver(msg) => write!(f, "Solver error: {}", msg),
            ZincError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for ZincError {}
