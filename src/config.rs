//! Настройки загрузки и сервера

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// Маркеры пропусков по умолчанию (как у pandas `read_csv`)
pub const DEFAULT_MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "null", "NULL", "None", "#N/A", "<NA>",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub missing_tokens: Vec<String>,
    pub trim: bool,
}

impl LoadOptions {
    pub fn is_missing_token(&self, field: &str) -> bool {
        self.missing_tokens.iter().any(|t| t == field)
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_missing_tokens<S: Into<String>>(
        mut self,
        tokens: impl IntoIterator<Item = S>,
    ) -> Self {
        self.missing_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            missing_tokens: DEFAULT_MISSING_TOKENS.iter().map(|t| t.to_string()).collect(),
            trim: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Корень для путей в `/api/preprocess-file`
    pub data_root: PathBuf,
}

impl ServerConfig {
    pub const DEFAULT_ADDR: &'static str = "0.0.0.0:8000";

    /// Чтение из окружения: `PREP_ADDR`, `PREP_DATA_ROOT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = lookup("PREP_ADDR").unwrap_or_else(|| Self::DEFAULT_ADDR.to_string());
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|_| PrepError::invalid(format!("PREP_ADDR is not a socket address: {addr}")))?;
        let data_root = lookup("PREP_DATA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self { addr, data_root })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            data_root: PathBuf::from("."),
        }
    }
}
