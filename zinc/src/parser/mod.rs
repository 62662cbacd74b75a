use crate::ast::Span;
use crate::error::ZincError;
use crate::model::Model;
use crate::semantic::Expression;
use crate::ZincResult;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;
use tracing::debug;

pub mod declarations;
pub mod expressions;
pub mod literals;

#[derive(Parser)]
#[grammar = "src/parser/zinc.pest"]
pub struct ZincParser;

/// Source being parsed, carried along for error reporting
pub(crate) struct SourceContext<'a> {
    pub source_id: &'a str,
    pub source_text: Arc<str>,
    pub max_depth: usize,
}

impl SourceContext<'_> {
    pub fn error(&self, message: impl Into<String>, pair: &Pair<Rule>) -> ZincError {
        ZincError::parse(
            message,
            Span::from_pest_span(pair.as_span()),
            self.source_id,
            self.source_text.clone(),
        )
    }

    pub fn depth_error(&self, span: Span) -> ZincError {
        ZincError::parse_with_suggestion(
            format!(
                "Expression nesting exceeds the limit of {} levels",
                self.max_depth
            ),
            span,
            self.source_id,
            self.source_text.clone(),
            "Split the constraint into several smaller constraints",
        )
    }
}

/// Parse declarations and constraints from `content` into `model`.
///
/// Names are resolved through the model, so the model's auto-declare
/// setting decides whether unknown names are declared or rejected.
pub fn parse_into(model: &mut Model, content: &str, source_id: &str) -> ZincResult<()> {
    let ctx = SourceContext {
        source_id,
        source_text: Arc::from(content),
        max_depth: model.options().max_expression_depth,
    };
    check_nesting(content, &ctx)?;

    let pairs = ZincParser::parse(Rule::model_file, content)
        .map_err(|e| syntax_error(e, source_id, content))?;

    let mut declarations = 0;
    let mut constraints = 0;
    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::var_declaration => {
                declarations::parse_var_declaration(pair, model, &ctx)?;
                declarations += 1;
            }
            Rule::constraint_item => {
                let constraint = parse_constraint_item(pair, model, &ctx)?;
                model.post(constraint);
                constraints += 1;
            }
            _ => {}
        }
    }

    debug!(source_id, declarations, constraints, "parsed model source");
    Ok(())
}

/// Parse a single constraint expression such as `x + y = 10`, resolving its
/// names through `model` without posting it.
pub fn parse_expression(model: &mut Model, content: &str) -> ZincResult<Expression> {
    let ctx = SourceContext {
        source_id: "<expression>",
        source_text: Arc::from(content),
        max_depth: model.options().max_expression_depth,
    };
    check_nesting(content, &ctx)?;

    let pair = ZincParser::parse(Rule::expression_only, content)
        .map_err(|e| syntax_error(e, ctx.source_id, content))?
        .next()
        .and_then(|p| p.into_inner().next())
        .ok_or_else(|| ZincError::Engine("Empty expression".to_string()))?;

    expressions::parse_constraint(pair, model, &ctx)
}

fn parse_constraint_item(
    pair: Pair<Rule>,
    model: &mut Model,
    ctx: &SourceContext,
) -> ZincResult<Expression> {
    let expression = pair
        .clone()
        .into_inner()
        .find(|p| p.as_rule() == Rule::expression)
        .ok_or_else(|| ctx.error("Constraint has no expression", &pair))?;
    expressions::parse_constraint(expression, model, ctx)
}

/// Reject parenthesis nesting beyond the configured depth before pest
/// recurses into it. Parentheses inside `%` comments are not counted.
fn check_nesting(content: &str, ctx: &SourceContext) -> ZincResult<()> {
    let mut depth = 0usize;
    let mut line = 1;
    let mut col = 1;
    let mut in_comment = false;
    for (offset, ch) in content.char_indices() {
        match ch {
            '\n' => {
                line += 1;
                col = 1;
                in_comment = false;
                continue;
            }
            _ if in_comment => {}
            '%' => in_comment = true,
            '(' => {
                depth += 1;
                if depth > ctx.max_depth {
                    return Err(ctx.depth_error(Span {
                        start: offset,
                        end: offset + 1,
                        line,
                        col,
                    }));
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        col += 1;
    }
    Ok(())
}

fn syntax_error(e: pest::error::Error<Rule>, source_id: &str, content: &str) -> ZincError {
    let span = match e.line_col {
        pest::error::LineColLocation::Pos((line, col)) => Span::at(line, col),
        pest::error::LineColLocation::Span((start_line, start_col), (_, _)) => {
            Span::at(start_line, start_col)
        }
    };
    let span = match e.location {
        pest::error::InputLocation::Pos(pos) => Span {
            start: pos,
            end: pos,
            ..span
        },
        pest::error::InputLocation::Span((start, end)) => Span { start, end, ..span },
    };

    ZincError::parse(
        e.variant.message().to_string(),
        span,
        source_id,
        Arc::from(content),
    )
}
