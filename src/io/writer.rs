//! Сохранение таблицы в CSV

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::config::LoadOptions;
use crate::error::Result;
use crate::types::{Table, Value};

fn format_value(value: &Value) -> String {
    match value {
        Value::Missing => String::new(),
        Value::Number(v) => v.to_string(),
        Value::Text(s) => s.clone(),
    }
}

pub fn write_table<W: Write>(table: &Table, writer: W, options: &LoadOptions) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    writer.write_record(table.column_names())?;
    for row in &table.rows {
        writer.write_record(row.iter().map(format_value))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save(table: &Table, path: impl AsRef<Path>, options: &LoadOptions) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_table(table, file, options)?;
    tracing::debug!(path = %path.display(), rows = table.n_rows(), "table saved");
    Ok(())
}
