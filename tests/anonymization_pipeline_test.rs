//! Integration tests for the anonymization pipeline

use kredact::anonymization::{
    anonymize_dataset, clean_dataset,
    classifier::ColumnClass,
    config::{AnonymizationConfig, CleaningConfig, PipelineParams},
    engine::{repair_types, ColumnAction},
    transform::k_redact,
};
use kredact::domain::{Bin, Column, Dataset, ElementKind, Value};

fn params(max_categorical_size: usize, bin_size: usize, sensitivity_minimum: usize) -> PipelineParams {
    PipelineParams {
        k: 2,
        max_categorical_size,
        bin_size,
        sensitivity_minimum,
    }
}

#[test]
fn test_singleton_cities_are_suppressed() {
    let cities = [
        "Oslo", "Rome", "Lima", "Pune", "Kyiv", "Baku", "Riga", "Doha", "Oslo", "Nice",
    ];
    let dataset = Dataset::new(vec![Column::text("City", cities)]).unwrap();

    let outcome = anonymize_dataset(dataset, &params(50, 20, 2));

    let city = outcome.dataset.column("City").unwrap();
    assert_eq!(city.len(), 10);
    assert_eq!(city.null_count(), 8);
    assert_eq!(city.values()[0], Value::from("Oslo"));
    assert_eq!(city.values()[8], Value::from("Oslo"));
    assert_eq!(outcome.columns[0].class, ColumnClass::Text);
    assert_eq!(outcome.columns[0].change.cells_suppressed, 8);
    assert!(outcome.unprocessed.is_empty());
}

#[test]
fn test_twenty_values_make_four_bins() {
    let dataset = Dataset::new(vec![Column::integers("income", 1..=20)]).unwrap();

    let outcome = anonymize_dataset(dataset, &params(10, 5, 2));

    let income = outcome.dataset.column("income").unwrap();
    assert_eq!(income.kind(), ElementKind::Range);
    assert_eq!(outcome.columns[0].action, ColumnAction::Binned);
    assert_eq!(outcome.columns[0].change.bins, 4);
    assert_eq!(outcome.columns[0].change.cells_suppressed, 0);

    let expected = [
        Bin::new(1.0, 5.0),
        Bin::new(6.0, 10.0),
        Bin::new(11.0, 15.0),
        Bin::new(16.0, 20.0),
    ];
    for (row, value) in income.values().iter().enumerate() {
        assert_eq!(*value, Value::Range(expected[row / 5]), "row {row}");
        let Value::Range(bin) = value else {
            panic!("row {row} was not binned");
        };
        assert!(bin.contains((row + 1) as f64));
    }
}

#[test]
fn test_k_redaction_nulls_only_the_unique_pair() {
    let dataset = Dataset::new(vec![
        Column::text("A", ["x", "x", "x", "y"]),
        Column::text("B", ["1", "1", "1", "2"]),
        Column::new(
            "C",
            ElementKind::Text,
            vec![Value::from("p"), Value::from("p"), Value::from("p"), Value::Null],
        ),
    ])
    .unwrap();
    let before = dataset.clone();

    let (after, summary) = k_redact(dataset, 2);

    assert_eq!(summary.cells_redacted, 2);
    assert_eq!(after.column("A").unwrap().values()[3], Value::Null);
    assert_eq!(after.column("B").unwrap().values()[3], Value::Null);
    for row in 0..3 {
        assert_eq!(after.row(row), before.row(row));
    }
    assert_eq!(after.column("C"), before.column("C"));
}

#[test]
fn test_type_repair_after_suppression() {
    let mut dataset = Dataset::new(vec![
        Column::integers("count", [1, 2, 3, 4]),
        Column::floats("ratio", [0.5, 1.5, 2.5, 3.5]),
    ])
    .unwrap();
    let manifest = dataset.kind_manifest();

    for column in dataset.columns_mut() {
        column.set_null(1);
    }
    assert_eq!(
        dataset.column("count").unwrap().kind(),
        ElementKind::NullableInteger
    );

    let repaired = repair_types(&dataset, &manifest);

    assert_eq!(repaired, vec!["count".to_string()]);
    let count = dataset.column("count").unwrap();
    assert_eq!(count.kind(), ElementKind::NullableInteger);
    assert_eq!(
        count.values(),
        &[Value::Int(1), Value::Null, Value::Int(3), Value::Int(4)]
    );
    assert_eq!(dataset.column("ratio").unwrap().kind(), ElementKind::Float);
}

#[test]
fn test_cleaning_fully_null_rows() {
    let dataset = || {
        Dataset::new(vec![
            Column::new(
                "a",
                ElementKind::NullableInteger,
                vec![Value::Int(1), Value::Null, Value::Int(3)],
            ),
            Column::new(
                "b",
                ElementKind::Text,
                vec![Value::from("x"), Value::Null, Value::Null],
            ),
        ])
        .unwrap()
    };

    let lenient = clean_dataset(dataset(), &CleaningConfig::default()).unwrap();
    assert_eq!(lenient.dataset.height(), 2);
    assert_eq!(lenient.missing_rows_removed, 1);

    let strict = clean_dataset(
        dataset(),
        &CleaningConfig {
            remove_duplicates: true,
            drop_missing: true,
        },
    )
    .unwrap();
    assert_eq!(strict.dataset.height(), 1);
    assert_eq!(strict.missing_rows_removed, 2);
}

#[test]
fn test_shape_is_preserved() {
    let dataset = Dataset::new(vec![
        Column::text("name", ["Ada", "Bo", "Cy", "Di", "Ed", "Flo"]),
        Column::integers("age", [30, 30, 41, 41, 52, 67]),
        Column::text("team", ["red", "red", "blue", "blue", "red", "blue"]),
    ])
    .unwrap();

    let outcome = anonymize_dataset(dataset, &AnonymizationConfig::default().params());

    assert_eq!(outcome.dataset.height(), 6);
    assert_eq!(outcome.dataset.column_names(), vec!["name", "age", "team"]);
    // Every name is unique, so suppression removes all of them
    assert_eq!(outcome.dataset.column("name").unwrap().null_count(), 6);
}

#[test]
fn test_empty_dataset_is_untouched() {
    let dataset = Dataset::new(vec![Column::text("name", Vec::<&str>::new())]).unwrap();

    let outcome = anonymize_dataset(dataset.clone(), &AnonymizationConfig::default().params());

    assert_eq!(outcome.dataset, dataset);
    assert!(outcome.unprocessed.is_empty());
    assert_eq!(outcome.k_redaction.cells_redacted, 0);
}
