use cppcond::interpreter::NonBooleanConditionParser;
use cppcond::parser::{parse, CppExpression, CppOperator};
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,6}"
}

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        identifier(),
        (0u32..1000).prop_map(|n| n.to_string()),
        identifier().prop_map(|name| format!("defined({})", name)),
        identifier().prop_map(|name| format!("defined {}", name)),
    ]
}

/// Conditions built from the full operator set, every compound part bracketed
fn condition() -> impl Strategy<Value = String> {
    let binary = prop::sample::select(vec![
        "&&", "||", "==", "!=", "<", "<=", ">", ">=", "<<", ">>", "+", "-", "*", "/", "%", "&",
        "|", "^",
    ]);
    let unary = prop::sample::select(vec!["!", "~", "-", "+", "++", "--"]);

    leaf().prop_recursive(4, 32, 2, move |inner| {
        prop_oneof![
            (inner.clone(), binary.clone(), inner.clone())
                .prop_map(|(l, op, r)| format!("({} {} {})", l, op, r)),
            (unary.clone(), inner.clone()).prop_map(|(op, x)| format!("({}({}))", op, x)),
            ("F[A-Z]{0,3}", inner.clone()).prop_map(|(name, arg)| format!("{}({})", name, arg)),
            "F[A-Z]{0,3}".prop_map(|name| format!("{}()", name)),
        ]
    })
}

fn same_precedence_chain() -> impl Strategy<Value = (Vec<String>, Vec<CppOperator>)> {
    let group = prop::sample::select(vec![
        vec![CppOperator::IntAdd, CppOperator::IntSub],
        vec![CppOperator::IntMul, CppOperator::IntDiv, CppOperator::IntMod],
        vec![CppOperator::BoolAnd],
        vec![CppOperator::CmpLt, CppOperator::CmpGe],
    ]);
    (prop::collection::vec(identifier(), 3..7), group).prop_flat_map(|(names, group)| {
        let ops = prop::collection::vec(prop::sample::select(group), names.len() - 1);
        (Just(names), ops)
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_non_boolean_render_reparses(text in condition()) {
        let parser = NonBooleanConditionParser::new(false);
        let formula = parser.parse(&text).unwrap();
        let rendered = formula.to_string();
        let reparsed = parser.parse(&rendered).unwrap();
        prop_assert_eq!(reparsed, formula, "{} rendered as {}", text, rendered);
    }

    #[test]
    fn prop_same_precedence_binds_left((names, ops) in same_precedence_chain()) {
        let mut text = names[0].clone();
        let mut expected = CppExpression::var(names[0].as_str());
        for (op, name) in ops.iter().zip(&names[1..]) {
            text.push_str(&format!(" {} {}", op, name));
            expected = CppExpression::binary(expected, *op, CppExpression::var(name.as_str()));
        }

        prop_assert_eq!(parse(&text).unwrap(), expected);
    }

    #[test]
    fn prop_caret_marks_invalid_character(prefix in identifier(), bad in prop::sample::select(vec!['$', '@', '#', ',', '?'])) {
        let text = format!("{} && {}X", prefix, bad);
        let position = prefix.chars().count() + 4;

        let err = parse(&text).unwrap_err();
        prop_assert_eq!(err.position, Some(position));
        let marker = err.marker_line().unwrap();
        prop_assert_eq!(marker.find('^'), Some("In formula: ".len() + position));
    }
}
