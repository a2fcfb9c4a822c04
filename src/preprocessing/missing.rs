//! Удаление строк с пропусками

use crate::types::{Table, Value};

/// Оставляет только полные строки, сохраняя исходный порядок
pub fn drop_missing(table: &Table) -> Table {
    Table {
        columns: table.columns.clone(),
        rows: table
            .rows
            .iter()
            .filter(|row| !row.iter().any(Value::is_missing))
            .cloned()
            .collect(),
    }
}
