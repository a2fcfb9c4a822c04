use std::io::Write;

use mlops_prep::{
    load, save, ColumnKind, DataPreprocessor, LoadOptions, PrepError, Table, Value,
};
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

fn column(table: &Table, name: &str) -> Vec<Value> {
    let idx = table.column_index(name).unwrap();
    table.column_values(idx).cloned().collect()
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

#[test]
fn load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("absent.csv"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, PrepError::NotFound { .. }));
}

#[test]
fn load_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, PrepError::NotFound { .. }));
}

#[test]
fn load_ragged_file_is_format_error() {
    let file = create_temp_csv("A,B\n1,2\n3,4\n5,6,7\n");
    let err = load(file.path(), &LoadOptions::default()).unwrap_err();
    match err {
        PrepError::Format { row, expected, found } => {
            assert_eq!(row, 3);
            assert_eq!(expected, 2);
            assert_eq!(found, 3);
        }
        other => panic!("expected format error, got {other}"),
    }
}

#[test]
fn csv_with_null_row_is_cleaned_and_scaled() {
    let file = create_temp_csv("A,B\n1,1.1\n2,2.2\n3,3.3\n,4.4\n5,5.5\n");
    let table = load(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(table.n_rows(), 5);

    let out = DataPreprocessor::new().preprocess(&table).unwrap();
    assert_eq!(out.n_rows(), 4);
    assert!(!out.has_missing());
    assert_eq!(out.column_names(), vec!["A", "B"]);

    for name in ["A", "B"] {
        let values: Vec<f64> = column(&out, name).iter().filter_map(Value::as_f64).collect();
        assert_eq!(values.len(), 4);
        let (mean, std) = mean_std(&values);
        assert!(mean.abs() < 1e-9, "{name}: mean = {mean}");
        assert!((std - 1.0).abs() < 1e-9, "{name}: std = {std}");
    }
}

#[test]
fn header_only_file_gives_empty_table() {
    let file = create_temp_csv("id,label\n");
    let table = load(file.path(), &LoadOptions::default()).unwrap();
    let out = DataPreprocessor::new().preprocess(&table).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.column_names(), vec!["id", "label"]);
}

#[test]
fn categorical_file_is_unchanged_except_dropped_rows() {
    let file = create_temp_csv("species\nsetosa\nNA\nversicolor\nvirginica\n");
    let table = load(file.path(), &LoadOptions::default()).unwrap();
    let out = DataPreprocessor::new().preprocess(&table).unwrap();

    assert_eq!(
        column(&out, "species"),
        vec![
            Value::from("setosa"),
            Value::from("versicolor"),
            Value::from("virginica")
        ]
    );
    assert_eq!(out.columns[0].kind, Some(ColumnKind::NonNumeric));
}

#[test]
fn constant_column_becomes_zero() {
    let file = create_temp_csv("k,x\n7,1\n7,\n7,2\n7,3\n");
    let table = load(file.path(), &LoadOptions::default()).unwrap();
    let (out, report) = DataPreprocessor::new().preprocess_with_report(&table).unwrap();

    assert_eq!(out.n_rows(), 3);
    assert!(column(&out, "k").iter().all(|v| *v == Value::Number(0.0)));
    let k = &report.scalers[0];
    assert_eq!(k.column, "k");
    assert!(k.constant);
    assert_eq!(k.mean, 7.0);
}

#[test]
fn preprocess_is_idempotent_on_missing_values() {
    let file = create_temp_csv("a,b,c\n1,x,\n2,y,3\n4,,5\n6,z,7\n");
    let table = load(file.path(), &LoadOptions::default()).unwrap();
    let preprocessor = DataPreprocessor::new();

    let once = preprocessor.preprocess(&table).unwrap();
    let twice = preprocessor.preprocess(&once).unwrap();
    assert_eq!(once.n_rows(), 2);
    assert_eq!(twice.n_rows(), once.n_rows());
    assert_eq!(column(&once, "b"), vec![Value::from("y"), Value::from("z")]);
}

#[test]
fn complete_table_keeps_every_row() {
    let file = create_temp_csv("a,b\n1,p\n2,q\n3,r\n");
    let table = load(file.path(), &LoadOptions::default()).unwrap();
    let (out, report) = DataPreprocessor::new().preprocess_with_report(&table).unwrap();
    assert_eq!(out.n_rows(), table.n_rows());
    assert_eq!(report.rows_dropped, 0);
    assert_eq!(report.non_numeric_columns, vec!["b"]);
}

#[test]
fn saved_output_loads_back() {
    let file = create_temp_csv("a,label\n2,x\n4,y\n");
    let table = load(file.path(), &LoadOptions::default()).unwrap();
    let out = DataPreprocessor::new().preprocess(&table).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.csv");
    save(&out, &path, &LoadOptions::default()).unwrap();

    let back = load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(back.rows, out.rows);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,label\n-1,x\n1,y\n");
}

#[test]
fn tiny_scale_column_is_standardized() {
    let file = create_temp_csv("a\n1e-12\n2e-12\n3e-12\n");
    let table = load(file.path(), &LoadOptions::default()).unwrap();
    let (out, report) = DataPreprocessor::new().preprocess_with_report(&table).unwrap();

    assert!(!report.scalers[0].constant);
    let values: Vec<f64> = column(&out, "a").iter().filter_map(Value::as_f64).collect();
    let (mean, std) = mean_std(&values);
    assert!(mean.abs() < 1e-9, "mean = {mean}");
    assert!((std - 1.0).abs() < 1e-9, "std = {std}");
}

#[test]
fn huge_values_survive_save_and_load() {
    let file = create_temp_csv("a,b\n1.7e308,1e308\n1.7e308,-1e308\n1,1e308\n");
    let table = load(file.path(), &LoadOptions::default()).unwrap();
    let out = DataPreprocessor::new().preprocess(&table).unwrap();

    assert!(out
        .rows
        .iter()
        .flatten()
        .all(|v| v.as_f64().is_some_and(f64::is_finite)));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.csv");
    save(&out, &path, &LoadOptions::default()).unwrap();
    let back = load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(back.missing_count(), 0);
    assert_eq!(back.n_rows(), 3);
}
