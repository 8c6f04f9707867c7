use csv_profiler::data::Value;
use csv_profiler::stats::{ColumnStats, TableStats};
use proptest::prelude::*;

// Scalar values the engine accepts (Boolean is deliberately absent:
// it is the rejected kind).
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Empty),
        "[a-z0-9 ]{0,8}".prop_map(Value::Text),
        (-1_000_000i64..1_000_000).prop_map(Value::Integer),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
    ]
}

fn value_vec() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(value_strategy(), 0..50)
}

fn permuted_pair() -> impl Strategy<Value = (Vec<Value>, Vec<Value>)> {
    value_vec().prop_flat_map(|original| {
        let shuffled = Just(original.clone()).prop_shuffle();
        (Just(original), shuffled)
    })
}

proptest! {
    #[test]
    fn row_count_matches_rows_fed(rows in prop::collection::vec(value_vec(), 0..30)) {
        let mut table = TableStats::new(10, &[]).expect("table");
        for row in &rows {
            table.analyze_row(row).expect("row");
        }
        prop_assert_eq!(table.row_count(), rows.len() as u64);
    }

    #[test]
    fn frequency_map_never_exceeds_cap_and_latch_is_monotone(
        values in value_vec(),
        cap in 1usize..6,
    ) {
        let mut column = ColumnStats::new(0, None, cap);
        let mut latched = false;
        for value in &values {
            column.analyze_value(value).expect("value");
            prop_assert!(column.distinct_tracked() <= cap);
            if latched {
                prop_assert!(column.frequencies_full());
            }
            latched = column.frequencies_full();
        }
    }

    #[test]
    fn inferred_type_is_permutation_invariant((original, shuffled) in permuted_pair()) {
        let mut first = ColumnStats::new(0, None, 100);
        for value in &original {
            first.analyze_value(value).expect("value");
        }
        let mut second = ColumnStats::new(0, None, 100);
        for value in &shuffled {
            second.analyze_value(value).expect("value");
        }
        prop_assert_eq!(first.datatype(), second.datatype());
        prop_assert_eq!(first.empty_count(), second.empty_count());
        prop_assert_eq!(first.nonempty_count(), second.nonempty_count());
        prop_assert_eq!(first.report().frequencies, second.report().frequencies);
    }

    #[test]
    fn density_is_a_fraction_or_absent(values in value_vec()) {
        let mut column = ColumnStats::new(0, None, 10);
        for value in &values {
            column.analyze_value(value).expect("value");
        }
        match column.density() {
            Some(density) => {
                prop_assert!((0.0..=1.0).contains(&density));
                prop_assert!(column.empty_count() + column.nonempty_count() > 0);
            }
            None => {
                prop_assert_eq!(column.empty_count() + column.nonempty_count(), 0);
            }
        }
    }

    #[test]
    fn wider_rows_grow_and_narrower_rows_never_shrink(
        first_width in 0usize..8,
        second_width in 0usize..8,
    ) {
        let mut table = TableStats::new(5, &[]).expect("table");
        let wide: Vec<Value> = (0..first_width).map(|_| Value::Empty).collect();
        let narrow: Vec<Value> = (0..second_width).map(|_| Value::Empty).collect();
        table.analyze_row(&wide).expect("row");
        prop_assert_eq!(table.columns().len(), first_width);
        table.analyze_row(&narrow).expect("row");
        prop_assert_eq!(table.columns().len(), first_width.max(second_width));
    }
}
