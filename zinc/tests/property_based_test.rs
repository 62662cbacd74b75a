use proptest::prelude::*;
use zinc::{Compose, DomainValue, Expression, Interval, Model, ModelOptions, Operand, Operator, Variable};

fn leaf() -> impl Strategy<Value = Operand> {
    prop_oneof![
        (-1000i64..1000).prop_map(|n| Operand::from(DomainValue::new(n))),
        "[a-e]".prop_map(|name| Operand::from(Variable::new(name, Interval::default()))),
    ]
}

fn operator() -> impl Strategy<Value = Operator> {
    proptest::sample::select(Operator::ALL.to_vec())
}

fn operand() -> impl Strategy<Value = Operand> {
    leaf().prop_recursive(4, 32, 2, |inner| {
        (inner.clone(), operator(), inner)
            .prop_map(|(left, op, right)| Operand::from(Expression::new(left, op, right)))
    })
}

fn count_variable_leaves(operand: &Operand) -> usize {
    match operand {
        Operand::Value(_) => 0,
        Operand::Variable(_) => 1,
        Operand::Expression(expr) => {
            count_variable_leaves(&expr.left) + count_variable_leaves(&expr.right)
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_interval_render(a in -10_000i64..10_000, b in -10_000i64..10_000) {
        let (low, high) = (a.min(b), a.max(b));
        let interval = Interval::new(low, high).unwrap();
        prop_assert_eq!(interval.render(), format!("{}..{}", low, high));
    }

    #[test]
    fn prop_inverted_interval_rejected(low in 1i64..1000, gap in 1i64..1000) {
        prop_assert!(Interval::new(low, low - gap).is_err());
    }

    #[test]
    fn prop_expression_render_wraps_children(left in operand(), op in operator(), right in operand()) {
        let expected = format!("({}) {} ({})", left.render(), op.symbol(), right.render());
        prop_assert_eq!(Expression::new(left, op, right).render(), expected);
    }

    #[test]
    fn prop_collect_variables_counts_leaves(left in operand(), op in operator(), right in operand()) {
        let expected = count_variable_leaves(&left) + count_variable_leaves(&right);
        let expr = Expression::new(left, op, right);
        prop_assert_eq!(expr.collect_variables().count(), expected);
    }

    #[test]
    fn prop_render_idempotent(names in proptest::collection::vec("[a-z]{1,6}", 0..6), bound in 0i64..50) {
        let mut model = Model::new();
        for name in &names {
            let var = model.resolve(name).unwrap();
            model.post(var.le(bound));
        }
        prop_assert_eq!(model.render(), model.render());
    }

    #[test]
    fn prop_rendered_document_parses_back(left in operand(), op in operator(), right in operand()) {
        let mut model = Model::new();
        model.post(Expression::new(left, op, right));
        let rendered = model.render();
        let parsed = Model::from_source(&rendered, "roundtrip", ModelOptions::default()).unwrap();
        prop_assert_eq!(parsed.render(), rendered);
    }
}
