use crate::model::Model;
use crate::parser::literals::parse_number;
use crate::parser::{Rule, SourceContext};
use crate::semantic::Interval;
use crate::ZincResult;
use pest::iterators::Pair;

/// `var <low>..<high>: <name>;`
pub(crate) fn parse_var_declaration(
    pair: Pair<Rule>,
    model: &mut Model,
    ctx: &SourceContext,
) -> ZincResult<()> {
    let mut interval = None;
    let mut name = None;
    for inner in pair.clone().into_inner() {
        match inner.as_rule() {
            Rule::interval => interval = Some(parse_interval(inner, ctx)?),
            Rule::identifier => name = Some(inner.as_str().to_string()),
            _ => {}
        }
    }

    match (name, interval) {
        (Some(name), Some(interval)) => {
            model.declare(name, interval);
            Ok(())
        }
        _ => Err(ctx.error("Variable declaration without name or interval", &pair)),
    }
}

/// `<low>..<high>`, failing with `InvalidInterval` when `low > high`
pub(crate) fn parse_interval(pair: Pair<Rule>, ctx: &SourceContext) -> ZincResult<Interval> {
    let bounds: Vec<Pair<Rule>> = pair
        .clone()
        .into_inner()
        .filter(|p| p.as_rule() == Rule::number)
        .collect();
    match bounds.as_slice() {
        [low, high] => Interval::new(parse_number(low, ctx)?, parse_number(high, ctx)?),
        _ => Err(ctx.error("Interval needs a lower and an upper bound", &pair)),
    }
}
