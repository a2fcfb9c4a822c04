//! HTTP API поверх предобработки

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::config::{LoadOptions, ServerConfig};
use crate::error::PrepError;
use crate::io;
use crate::preprocessing::{DataPreprocessor, PreprocessReport};
use crate::types::Table;

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PreprocessRequest {
    pub table: Table,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreprocessResponse {
    pub table: Table,
    pub report: PreprocessReport,
}

#[derive(Debug, Deserialize)]
pub struct PreprocessFileRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub options: LoadOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreprocessFileResponse {
    pub output: Option<PathBuf>,
    pub report: PreprocessReport,
}

/// Ошибка обработчика -> `{ "error": ... }` с кодом статуса
pub struct ApiError(PrepError);

impl From<PrepError> for ApiError {
    fn from(err: PrepError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PrepError::NotFound { .. } => StatusCode::NOT_FOUND,
            PrepError::Format { .. } | PrepError::Csv(_) => StatusCode::BAD_REQUEST,
            PrepError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PrepError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        } else {
            tracing::warn!("request rejected: {}", self.0);
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/preprocess", post(preprocess))
        .route("/api/preprocess-file", post(preprocess_file))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "MLOps preprocessing API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn preprocess(
    Json(request): Json<PreprocessRequest>,
) -> Result<Json<PreprocessResponse>, ApiError> {
    tracing::info!(
        "Preprocess request: {} rows, {} columns",
        request.table.n_rows(),
        request.table.n_cols()
    );

    let preprocessor =
        DataPreprocessor::with_span(tracing::info_span!("preprocess", route = "/api/preprocess"));
    let (table, report) = preprocessor.preprocess_with_report(&request.table)?;
    Ok(Json(PreprocessResponse { table, report }))
}

async fn preprocess_file(
    State(state): State<AppState>,
    Json(request): Json<PreprocessFileRequest>,
) -> Result<Json<PreprocessFileResponse>, ApiError> {
    let root = state.config.data_root.clone();
    let input = resolve(&root, &request.input)?;
    let output = request
        .output
        .as_deref()
        .map(|p| resolve(&root, p))
        .transpose()?;

    tracing::info!("Preprocess file request: {}", input.display());

    let options = request.options;
    let span = tracing::info_span!("preprocess", route = "/api/preprocess-file");
    let report = tokio::task::spawn_blocking(move || -> Result<PreprocessReport, PrepError> {
        let table = io::load(&input, &options)?;
        let (table, report) = DataPreprocessor::with_span(span).preprocess_with_report(&table)?;
        if let Some(path) = &output {
            io::save(&table, path, &options)?;
        }
        Ok(report)
    })
    .await
    .map_err(|e| PrepError::Io(std::io::Error::other(e)))??;

    Ok(Json(PreprocessFileResponse {
        output: request.output,
        report,
    }))
}

/// Путь относительно `data_root`; абсолютные пути и `..` запрещены
fn resolve(root: &Path, relative: &Path) -> Result<PathBuf, PrepError> {
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || relative.as_os_str().is_empty() {
        return Err(PrepError::invalid(format!(
            "path must be relative to the data root: {}",
            relative.display()
        )));
    }
    Ok(root.join(relative))
}
