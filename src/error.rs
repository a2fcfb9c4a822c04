//! Ошибки загрузки и предобработки

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepError {
    /// Путь не указывает на читаемый файл
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Количество полей в строке не совпадает с заголовком.
    /// `row` — номер записи данных с 1 (заголовок и пустые строки не считаются)
    #[error("row {row}: expected {expected} fields, found {found}")]
    Format {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PrepError>;

impl PrepError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
