/// Модуль предобработки данных

pub mod missing;
pub mod normalization;
pub mod pipeline;
pub mod schema;

pub use missing::drop_missing;
pub use normalization::StandardScaler;
pub use pipeline::{DataPreprocessor, PreprocessReport, ScalerParams};
pub use schema::{classify_column, classify_columns};
