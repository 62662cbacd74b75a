//! Operator composition for model operands
//!
//! Every operand kind (variables, constants and expressions) can be combined
//! into a new [`Expression`]. Arithmetic is available through the standard
//! operator traits, so `&x + &y` builds a tree. Comparisons cannot reuse
//! `==`/`>=` because those traits must return `bool`, so they are exposed as
//! named builders on [`Compose`]:
//!
//! ```rust
//! use zinc::{Compose, Model};
//!
//! let mut model = Model::new();
//! let x = model.resolve("x").unwrap();
//! let y = model.resolve("y").unwrap();
//! model.post((&x + &y).equals(10));
//! assert_eq!(model.constraints()[0].render(), "((x) + (y)) = (10)");
//! ```

use crate::semantic::{DomainValue, Expression, Operand, Operator, Variable};
use std::ops::{Add, Div, Mul, Sub};

/// Named builders producing a new expression node `(self, op, rhs)`
///
/// Implemented for everything convertible into an [`Operand`], including
/// plain integers, so `3i64.times(&x)` is as valid as `x.times(3)`.
pub trait Compose: Into<Operand> + Sized {
    fn combine(self, operator: Operator, rhs: impl Into<Operand>) -> Expression {
        Expression::new(self, operator, rhs)
    }

    fn plus(self, rhs: impl Into<Operand>) -> Expression {
        self.combine(Operator::Add, rhs)
    }

    fn minus(self, rhs: impl Into<Operand>) -> Expression {
        self.combine(Operator::Subtract, rhs)
    }

    fn times(self, rhs: impl Into<Operand>) -> Expression {
        self.combine(Operator::Multiply, rhs)
    }

    fn divide(self, rhs: impl Into<Operand>) -> Expression {
        self.combine(Operator::Divide, rhs)
    }

    /// `=` constraint; not a structural comparison
    fn equals(self, rhs: impl Into<Operand>) -> Expression {
        self.combine(Operator::Equal, rhs)
    }

    fn ge(self, rhs: impl Into<Operand>) -> Expression {
        self.combine(Operator::GreaterThanOrEqual, rhs)
    }

    fn gt(self, rhs: impl Into<Operand>) -> Expression {
        self.combine(Operator::GreaterThan, rhs)
    }

    fn lt(self, rhs: impl Into<Operand>) -> Expression {
        self.combine(Operator::LessThan, rhs)
    }

    fn le(self, rhs: impl Into<Operand>) -> Expression {
        self.combine(Operator::LessThanOrEqual, rhs)
    }
}

impl<T: Into<Operand>> Compose for T {}

macro_rules! impl_arithmetic {
    ($($lhs:ty),+) => {
        $(
            impl<R: Into<Operand>> Add<R> for $lhs {
                type Output = Expression;

                fn add(self, rhs: R) -> Expression {
                    Expression::new(self, Operator::Add, rhs)
                }
            }

            impl<R: Into<Operand>> Sub<R> for $lhs {
                type Output = Expression;

                fn sub(self, rhs: R) -> Expression {
                    Expression::new(self, Operator::Subtract, rhs)
                }
            }

            impl<R: Into<Operand>> Mul<R> for $lhs {
                type Output = Expression;

                fn mul(self, rhs: R) -> Expression {
                    Expression::new(self, Operator::Multiply, rhs)
                }
            }

            impl<R: Into<Operand>> Div<R> for $lhs {
                type Output = Expression;

                fn div(self, rhs: R) -> Expression {
                    Expression::new(self, Operator::Divide, rhs)
                }
            }
        )+
    };
}

impl_arithmetic!(
    Variable,
    &Variable,
    DomainValue,
    Expression,
    &Expression,
    Operand
);
