use crate::ast::Span;
use crate::error::ZincError;
use crate::model::Model;
use crate::parser::literals::parse_domain_value;
use crate::parser::{Rule, SourceContext};
use crate::semantic::{Expression, Operand, Operator};
use crate::ZincResult;
use pest::iterators::Pair;

/// An operand together with its nesting depth
type Parsed = (Operand, usize);

/// Parse an `expression` pair that must be a constraint, i.e. an operator
/// node rather than a bare variable or constant.
pub(crate) fn parse_constraint(
    pair: Pair<Rule>,
    model: &mut Model,
    ctx: &SourceContext,
) -> ZincResult<Expression> {
    let whole = pair.clone();
    match parse_expression(pair, model, ctx)? {
        (Operand::Expression(expr), _) => Ok(*expr),
        (operand, _) => Err(ZincError::parse_with_suggestion(
            format!("'{}' is not a constraint", operand),
            Span::from_pest_span(whole.as_span()),
            ctx.source_id,
            ctx.source_text.clone(),
            "Compare it with something, e.g. 'x >= 0'",
        )),
    }
}

// expression = { sum ~ (comp_operator ~ sum)? }
fn parse_expression(pair: Pair<Rule>, model: &mut Model, ctx: &SourceContext) -> ZincResult<Parsed> {
    parse_chain(pair, model, ctx, parse_sum)
}

// sum = { product ~ (add_operator ~ product)* }
fn parse_sum(pair: Pair<Rule>, model: &mut Model, ctx: &SourceContext) -> ZincResult<Parsed> {
    parse_chain(pair, model, ctx, parse_product)
}

// product = { primary ~ (mul_operator ~ primary)* }
fn parse_product(pair: Pair<Rule>, model: &mut Model, ctx: &SourceContext) -> ZincResult<Parsed> {
    parse_chain(pair, model, ctx, parse_primary)
}

/// Fold `operand (operator operand)*` into a left-associative tree
fn parse_chain<'i, F>(
    pair: Pair<'i, Rule>,
    model: &mut Model,
    ctx: &SourceContext,
    parse_operand: F,
) -> ZincResult<Parsed>
where
    F: Fn(Pair<'i, Rule>, &mut Model, &SourceContext) -> ZincResult<Parsed>,
{
    let span = Span::from_pest_span(pair.as_span());
    let whole = pair.clone();
    let mut pairs = pair.into_inner();
    let first = pairs
        .next()
        .ok_or_else(|| ctx.error("Missing left operand", &whole))?;
    let (mut left, mut depth) = parse_operand(first, model, ctx)?;

    while let Some(op_pair) = pairs.next() {
        let operator = op_pair
            .as_str()
            .parse::<Operator>()
            .map_err(|_| ctx.error(format!("Unknown operator '{}'", op_pair.as_str()), &op_pair))?;
        let right_pair = pairs
            .next()
            .ok_or_else(|| ctx.error("Missing right operand", &op_pair))?;
        let (right, right_depth) = parse_operand(right_pair, model, ctx)?;

        depth = depth.max(right_depth) + 1;
        if depth > ctx.max_depth {
            return Err(ctx.depth_error(span));
        }
        left = Operand::from(Expression::new(left, operator, right));
    }

    Ok((left, depth))
}

// primary = { number | identifier | "(" ~ expression ~ ")" }
fn parse_primary(pair: Pair<Rule>, model: &mut Model, ctx: &SourceContext) -> ZincResult<Parsed> {
    let inner = pair
        .clone()
        .into_inner()
        .next()
        .ok_or_else(|| ctx.error("Empty primary expression", &pair))?;

    match inner.as_rule() {
        Rule::number => Ok((Operand::Value(parse_domain_value(&inner, ctx)?), 0)),
        Rule::identifier => Ok((Operand::Variable(model.resolve(inner.as_str())?), 0)),
        Rule::expression => parse_expression(inner, model, ctx),
        other => Err(ctx.error(format!("Unexpected {:?} in expression", other), &inner)),
    }
}
