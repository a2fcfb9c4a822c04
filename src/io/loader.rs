//! Загрузка таблицы из CSV

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::config::LoadOptions;
use crate::error::{PrepError, Result};
use crate::types::{Table, Value};

/// Разбор одного поля: маркер пропуска, конечное число или текст
pub fn parse_field(field: &str, options: &LoadOptions) -> Value {
    if options.is_missing_token(field) {
        return Value::Missing;
    }
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Value::Number(v),
        _ => Value::Text(field.to_string()),
    }
}

/// Загрузка файла целиком в память. Первая строка — заголовок
pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Table> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PrepError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => PrepError::NotFound {
            path: path.to_path_buf(),
        },
        _ => PrepError::Io(e),
    })?;

    let table = load_reader(file, options)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.n_rows(),
        cols = table.n_cols(),
        "table loaded"
    );
    Ok(table)
}

pub fn load_str(text: &str, options: &LoadOptions) -> Result<Table> {
    load_reader(text.as_bytes(), options)
}

pub fn load_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Table> {
    // flexible: длину строк проверяем сами, чтобы вернуть номер строки
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .flexible(true)
        .from_reader(reader);

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(header);
    let expected = table.n_cols();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != expected {
            return Err(PrepError::Format {
                row: i + 1,
                expected,
                found: record.len(),
            });
        }
        table
            .rows
            .push(record.iter().map(|f| parse_field(f, options)).collect());
    }

    Ok(table)
}
