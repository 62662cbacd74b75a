use crate::parser::{Rule, SourceContext};
use crate::semantic::DomainValue;
use crate::ZincResult;
use pest::iterators::Pair;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a number literal, e.g. `42`, `-3` or `2.50`
pub(crate) fn parse_number(pair: &Pair<Rule>, ctx: &SourceContext) -> ZincResult<Decimal> {
    Decimal::from_str(pair.as_str())
        .map_err(|e| ctx.error(format!("Invalid number '{}': {}", pair.as_str(), e), pair))
}

pub(crate) fn parse_domain_value(pair: &Pair<Rule>, ctx: &SourceContext) -> ZincResult<DomainValue> {
    parse_number(pair, ctx).map(DomainValue::new)
}
