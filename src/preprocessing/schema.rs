//! Определение типа столбцов

use crate::types::{ColumnKind, Value};

/// Столбец числовой, если строк больше нуля и каждое значение — число.
/// Пустые и смешанные столбцы не масштабируются.
pub fn classify_column<'a>(values: impl IntoIterator<Item = &'a Value>) -> ColumnKind {
    let mut seen = false;
    for value in values {
        if value.as_f64().is_none() {
            return ColumnKind::NonNumeric;
        }
        seen = true;
    }
    if seen {
        ColumnKind::Numeric
    } else {
        ColumnKind::NonNumeric
    }
}

pub fn classify_columns(rows: &[Vec<Value>], n_cols: usize) -> Vec<ColumnKind> {
    (0..n_cols)
        .map(|idx| classify_column(rows.iter().map(|row| &row[idx])))
        .collect()
}
