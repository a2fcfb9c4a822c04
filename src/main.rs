/// API сервер предобработки

use anyhow::Context;

use mlops_prep::{
    api::{self, AppState},
    ServerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let addr = config.addr;
    tracing::info!("Data root: {}", config.data_root.display());

    let app = api::router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
