use crate::{
    filter::{FilterExpr, Operation, Predicate, evaluate, filter, parse},
    record::Record,
    value::Value,
};
use proptest::prelude::*;

const COLUMNS: [&str; 4] = ["a", "b", "c", "d"];

fn arb_column() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(COLUMNS[0].to_string()),
        Just(COLUMNS[1].to_string()),
        Just(COLUMNS[2].to_string()),
        Just(COLUMNS[3].to_string()),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        (-1000.0f64..1000.0).prop_map(Value::Float),
        any::<bool>().prop_map(Value::Bool),
        "[a-z0-9_]{0,6}".prop_map(Value::Text),
        Just(Value::Null),
    ]
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Equal),
        Just(Operation::Different),
        Just(Operation::Gt),
        Just(Operation::Lt),
        Just(Operation::Lte),
        Just(Operation::Gte),
        Just(Operation::Like),
        Just(Operation::Ilike),
    ]
}

fn arb_expr() -> impl Strategy<Value = FilterExpr> {
    let leaf = prop_oneof![
        Just(FilterExpr::True),
        (arb_column(), arb_operation(), arb_value()).prop_map(|(column, operation, value)| {
            FilterExpr::Predicate(Predicate {
                column,
                operation,
                value,
            })
        }),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(FilterExpr::And),
            prop::collection::vec(inner, 0..4).prop_map(FilterExpr::Or),
        ]
    })
}

fn arb_record(id: usize) -> impl Strategy<Value = Record> {
    prop::collection::vec(
        prop_oneof![Just(None), arb_value().prop_map(Some)],
        COLUMNS.len(),
    )
    .prop_map(move |values| {
        let mut record = Record::new(id.to_string());
        for (name, value) in COLUMNS.iter().zip(values) {
            if let Some(value) = value {
                record.columns.insert((*name).to_string(), value);
            }
        }
        record
    })
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(0), 0..10).prop_map(|mut records| {
        for (idx, record) in records.iter_mut().enumerate() {
            record.data_id = idx.to_string();
        }
        records
    })
}

proptest! {
    // `equal_and_different_are_complements` discards most generated
    // inputs via `prop_assume!`; the default cap of 1024 global
    // rejects aborts it before reaching 256 successes.
    #![proptest_config(ProptestConfig {
        max_global_rejects: 65536,
        ..ProptestConfig::default()
    })]

    #[test]
    fn filter_preserves_relative_order(expr in arb_expr(), records in arb_records()) {
        let matched = filter(&expr, &records);
        let positions: Vec<usize> = matched
            .iter()
            .map(|record| record.data_id.parse().unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn filter_agrees_with_evaluate(expr in arb_expr(), records in arb_records()) {
        let matched = filter(&expr, &records);
        let expected: Vec<&Record> = records
            .iter()
            .filter(|record| evaluate(&expr, *record))
            .collect();
        prop_assert_eq!(matched, expected);
    }

    #[test]
    fn and_with_itself_is_idempotent(expr in arb_expr(), record in arb_record(0)) {
        let doubled = FilterExpr::And(vec![expr.clone(), expr.clone()]);
        prop_assert_eq!(evaluate(&doubled, &record), evaluate(&expr, &record));
    }

    #[test]
    fn or_decomposes_into_disjunction(
        left in arb_expr(),
        right in arb_expr(),
        record in arb_record(0),
    ) {
        let or = FilterExpr::Or(vec![left.clone(), right.clone()]);
        prop_assert_eq!(
            evaluate(&or, &record),
            evaluate(&left, &record) || evaluate(&right, &record)
        );
    }

    #[test]
    fn equal_and_different_are_complements(
        column in arb_column(),
        value in arb_value(),
        record in arb_record(0),
    ) {
        // Complementary whenever the column is present and comparable.
        let present = match record.get(&column) {
            Some(actual) => crate::value::compare_eq(actual, &value).is_some(),
            None => false,
        };
        prop_assume!(present);

        let eq = FilterExpr::Predicate(Predicate::new(column.clone(), Operation::Equal, value.clone()));
        let ne = FilterExpr::Predicate(Predicate::new(column, Operation::Different, value));
        prop_assert_ne!(evaluate(&eq, &record), evaluate(&ne, &record));
    }

    #[test]
    fn evaluation_is_deterministic(expr in arb_expr(), record in arb_record(0)) {
        prop_assert_eq!(evaluate(&expr, &record), evaluate(&expr, &record));
    }

    #[test]
    fn display_output_always_reparses(expr in arb_expr()) {
        // Every constructible tree renders to valid stored filter
        // text, including trees with match-all or empty children the
        // parser itself never produces.
        let rendered = expr.to_string();
        prop_assert!(parse(&rendered).is_ok(), "unparseable: {rendered:?}");
    }
}
