//! Предобработка таблицы: пропуски -> типы столбцов -> стандартизация

#![allow(non_snake_case)]

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::Span;

use super::missing::drop_missing;
use super::normalization::StandardScaler;
use super::schema::classify_columns;
use crate::error::Result;
use crate::types::{ColumnKind, Table, Value};

/// Параметры стандартизации столбца. Вычисляются заново при каждом вызове
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub column: String,
    pub mean: f64,
    pub std: f64,
    /// std = 0, значения заменены на 0
    pub constant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub rows_dropped: usize,
    pub numeric_columns: Vec<String>,
    pub non_numeric_columns: Vec<String>,
    pub scalers: Vec<ScalerParams>,
}

/// Без состояния: span логирования передаётся снаружи
pub struct DataPreprocessor {
    span: Span,
}

impl DataPreprocessor {
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("preprocess"))
    }

    pub fn with_span(span: Span) -> Self {
        Self { span }
    }

    pub fn preprocess(&self, table: &Table) -> Result<Table> {
        self.preprocess_with_report(table).map(|(table, _)| table)
    }

    pub fn preprocess_with_report(&self, table: &Table) -> Result<(Table, PreprocessReport)> {
        table.validate()?;
        let _guard = self.span.enter();

        let mut out = drop_missing(table);
        let rows_dropped = table.n_rows() - out.n_rows();
        if rows_dropped > 0 {
            tracing::debug!(rows_dropped, "dropped rows with missing values");
        }

        let kinds = classify_columns(&out.rows, out.n_cols());
        for (column, kind) in out.columns.iter_mut().zip(&kinds) {
            column.kind = Some(*kind);
        }

        let numeric: Vec<usize> = kinds
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == ColumnKind::Numeric)
            .map(|(idx, _)| idx)
            .collect();

        let mut scalers = Vec::with_capacity(numeric.len());
        if !numeric.is_empty() {
            let X = Array2::from_shape_fn((out.n_rows(), numeric.len()), |(r, c)| {
                out.rows[r][numeric[c]].as_f64().unwrap_or_default()
            });

            let mut scaler = StandardScaler::new();
            let scaled = scaler.fit_transform(&X)?;

            for (r, row) in out.rows.iter_mut().enumerate() {
                for (c, &idx) in numeric.iter().enumerate() {
                    row[idx] = Value::Number(scaled[[r, c]]);
                }
            }

            for (&idx, (mean, std, constant)) in numeric.iter().zip(scaler.params()) {
                let column = out.columns[idx].name.clone();
                if constant {
                    tracing::warn!(column = %column, mean, "zero variance, column set to 0");
                }
                scalers.push(ScalerParams {
                    column,
                    mean,
                    std,
                    constant,
                });
            }
        }

        let names_of = |kind: ColumnKind| -> Vec<String> {
            out.columns
                .iter()
                .filter(|c| c.kind == Some(kind))
                .map(|c| c.name.clone())
                .collect()
        };

        let report = PreprocessReport {
            rows_in: table.n_rows(),
            rows_out: out.n_rows(),
            rows_dropped,
            numeric_columns: names_of(ColumnKind::Numeric),
            non_numeric_columns: names_of(ColumnKind::NonNumeric),
            scalers,
        };

        tracing::info!(
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            numeric = report.numeric_columns.len(),
            "preprocessing finished"
        );

        Ok((out, report))
    }
}

impl Default for DataPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
