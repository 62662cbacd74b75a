use crate::error::ZincError;
use crate::ZincResult;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A closed numeric range bounding a variable's domain
///
/// Bounds are normalized on construction, so `Interval::new(0, 10)` and an
/// interval read from `0.0..10.00` render identically as `0..10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    low: Decimal,
    high: Decimal,
}

impl Interval {
    /// Create an interval, failing with `InvalidInterval` when `low > high`
    pub fn new(low: impl Into<Decimal>, high: impl Into<Decimal>) -> ZincResult<Self> {
        let low = low.into().normalize();
        let high = high.into().normalize();
        if low > high {
            return Err(ZincError::InvalidInterval { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> Decimal {
        self.low
    }

    pub fn high(&self) -> Decimal {
        self.high
    }

    /// The textual `low..high` form
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Interval {
    /// `0..255`
    fn default() -> Self {
        Self {
            low: Decimal::ZERO,
            high: Decimal::from(255),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.low, self.high)
    }
}

impl Serialize for Interval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// A named, ranged unknown of the model
///
/// Identity is the name: two variables with the same name compare equal
/// regardless of their domains.
#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    name: String,
    domain: Interval,
}

impl Variable {
    pub fn new(name: impl Into<String>, domain: Interval) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Interval {
        &self.domain
    }

    /// Declaration statement without the terminating `;`, e.g. `var 0..255: x`
    pub fn as_declaration(&self) -> String {
        format!("var {}: {}", self.domain, self.name)
    }

    /// A variable is a leaf: it yields only itself
    pub fn collect_variables(&self) -> Variables<'_> {
        Variables::leaf(self)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A numeric constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DomainValue(Decimal);

impl DomainValue {
    pub fn new(value: impl Into<Decimal>) -> Self {
        Self(value.into().normalize())
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Convert a float, returning `None` for NaN and infinities
    pub fn from_f64(value: f64) -> Option<Self> {
        use rust_decimal::prelude::FromPrimitive;
        Decimal::from_f64(value).map(Self::new)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Constants contain no variables
    pub fn collect_variables(&self) -> Variables<'_> {
        Variables::empty()
    }
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! impl_domain_value_from {
    ($($source:ty),+) => {
        $(
            impl From<$source> for DomainValue {
                fn from(value: $source) -> Self {
                    DomainValue::new(value)
                }
            }

            impl From<$source> for Operand {
                fn from(value: $source) -> Self {
                    Operand::Value(DomainValue::new(value))
                }
            }
        )+
    };
}

impl_domain_value_from!(i32, i64, u32, usize, Decimal);

/// Operators available for combining operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    GreaterThanOrEqual,
    GreaterThan,
    LessThan,
    LessThanOrEqual,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Equal,
        Operator::GreaterThanOrEqual,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::LessThanOrEqual,
    ];

    /// The symbol written into the rendered document
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Equal => "=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
        }
    }

    /// Returns a human-readable name for the operator
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "addition",
            Operator::Subtract => "subtraction",
            Operator::Multiply => "multiplication",
            Operator::Divide => "division",
            Operator::Equal => "equal",
            Operator::GreaterThanOrEqual => "greater than or equal",
            Operator::GreaterThan => "greater than",
            Operator::LessThan => "less than",
            Operator::LessThanOrEqual => "less than or equal",
        }
    }

    pub fn is_comparison(&self) -> bool {
        !matches!(
            self,
            Operator::Add | Operator::Subtract | Operator::Multiply | Operator::Divide
        )
    }
}

impl FromStr for Operator {
    type Err = ZincError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == symbol)
            .ok_or_else(|| ZincError::InvalidOperator(symbol.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Anything that can sit on either side of an operator
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(DomainValue),
    Variable(Variable),
    Expression(Box<Expression>),
}

impl Operand {
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Variables reachable from this operand, left before right
    pub fn collect_variables(&self) -> Variables<'_> {
        Variables::from_operand(self)
    }

}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Value(value) => write!(f, "{}", value),
            Operand::Variable(var) => write!(f, "{}", var),
            Operand::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl From<DomainValue> for Operand {
    fn from(value: DomainValue) -> Self {
        Operand::Value(value)
    }
}

impl From<Variable> for Operand {
    fn from(var: Variable) -> Self {
        Operand::Variable(var)
    }
}

impl From<&Variable> for Operand {
    fn from(var: &Variable) -> Self {
        Operand::Variable(var.clone())
    }
}

impl From<Expression> for Operand {
    fn from(expr: Expression) -> Self {
        Operand::Expression(Box::new(expr))
    }
}

impl From<&Expression> for Operand {
    fn from(expr: &Expression) -> Self {
        Operand::Expression(Box::new(expr.clone()))
    }
}

/// A binary node combining two operands with an operator
///
/// Expressions are never evaluated, only rendered. Equality is structural;
/// use [`crate::Compose::equals`] to build an `=` constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub left: Operand,
    pub operator: Operator,
    pub right: Operand,
}

impl Expression {
    pub fn new(left: impl Into<Operand>, operator: Operator, right: impl Into<Operand>) -> Self {
        Self {
            left: left.into(),
            operator,
            right: right.into(),
        }
    }

    /// Build from an operator symbol, failing with `InvalidOperator` on unknown symbols
    pub fn from_symbol(
        left: impl Into<Operand>,
        symbol: &str,
        right: impl Into<Operand>,
    ) -> ZincResult<Self> {
        let operator = symbol.parse::<Operator>()?;
        Ok(Self::new(left, operator, right))
    }

    /// `(<left>) <op> (<right>)`, parenthesizing both children unconditionally
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Variables reachable from this node, depth-first and left before right.
    /// Repeated variables are yielded once per occurrence.
    pub fn collect_variables(&self) -> Variables<'_> {
        Variables {
            leaf: None,
            stack: vec![&self.right, &self.left],
        }
    }

    /// Number of operator nodes on the longest path to a leaf
    pub fn depth(&self) -> usize {
        let mut deepest = 1;
        let mut pending = vec![(&self.left, 1), (&self.right, 1)];
        while let Some((operand, level)) = pending.pop() {
            if let Operand::Expression(expr) = operand {
                deepest = deepest.max(level + 1);
                pending.push((&expr.left, level + 1));
                pending.push((&expr.right, level + 1));
            }
        }
        deepest
    }
}

/// A piece of rendered output still to be written
enum Token<'a> {
    Text(&'static str),
    Operand(&'a Operand),
}

/// Queue `(left) op (right)` so that popping yields it in reading order
fn push_node<'a>(expr: &'a Expression, pending: &mut Vec<Token<'a>>) {
    pending.extend([
        Token::Text(")"),
        Token::Operand(&expr.right),
        Token::Text(" ("),
        Token::Text(expr.operator.symbol()),
        Token::Text(") "),
        Token::Operand(&expr.left),
        Token::Text("("),
    ]);
}

// Trees built through the API have no depth limit, so rendering and
// dropping walk them with a heap stack instead of recursing.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = Vec::new();
        push_node(self, &mut pending);
        while let Some(token) = pending.pop() {
            match token {
                Token::Text(text) => f.write_str(text)?,
                Token::Operand(Operand::Expression(expr)) => push_node(expr, &mut pending),
                Token::Operand(Operand::Value(value)) => write!(f, "{}", value)?,
                Token::Operand(Operand::Variable(var)) => write!(f, "{}", var)?,
            }
        }
        Ok(())
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(&mut self.left, &mut pending);
        detach(&mut self.right, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach(&mut expr.left, &mut pending);
            detach(&mut expr.right, &mut pending);
        }
    }
}

/// Move a child expression out of `operand`, leaving a constant behind
fn detach(operand: &mut Operand, pending: &mut Vec<Box<Expression>>) {
    if matches!(operand, Operand::Expression(_)) {
        let placeholder = Operand::Value(DomainValue(Decimal::ZERO));
        if let Operand::Expression(expr) = std::mem::replace(operand, placeholder) {
            pending.push(expr);
        }
    }
}

/// Lazy depth-first iterator over the variables of an operand tree
#[derive(Debug, Clone)]
pub struct Variables<'a> {
    leaf: Option<&'a Variable>,
    stack: Vec<&'a Operand>,
}

impl<'a> Variables<'a> {
    fn empty() -> Self {
        Self {
            leaf: None,
            stack: Vec::new(),
        }
    }

    fn leaf(var: &'a Variable) -> Self {
        Self {
            leaf: Some(var),
            stack: Vec::new(),
        }
    }

    fn from_operand(operand: &'a Operand) -> Self {
        Self {
            leaf: None,
            stack: vec![operand],
        }
    }
}

impl<'a> Iterator for Variables<'a> {
    type Item = &'a Variable;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(var) = self.leaf.take() {
            return Some(var);
        }
        while let Some(operand) = self.stack.pop() {
            match operand {
                Operand::Variable(var) => return Some(var),
                Operand::Value(_) => {}
                Operand::Expression(expr) => {
                    self.stack.push(&expr.right);
                    self.stack.push(&expr.left);
                }
            }
        }
        None
    }
}
