//! MLOps prep - загрузка и предобработка табличных данных

pub mod api;
pub mod config;
pub mod error;
pub mod io;
pub mod preprocessing;
pub mod types;

pub use config::{LoadOptions, ServerConfig};
pub use error::{PrepError, Result};
pub use preprocessing::*;
pub use types::*;

// Re-export для удобства
pub use io::{load, save};
