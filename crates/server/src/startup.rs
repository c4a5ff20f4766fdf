use std::{path::Path, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{catalog::CatalogService, runtime};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// 打开商品文件（按配置在缺失时创建空集合），并包装为目录服务
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let storage = &cfg.storage;
    runtime::ensure_env(&storage.frontend_dir, &storage.data_dir()).await?;
    let store = runtime::open_products_file(Path::new(&storage.products_path), storage.create_if_missing)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    Ok(ServerState { catalog: Arc::new(CatalogService::new(Arc::new(store))) })
}

pub fn build_app(state: ServerState, cfg: &AppConfig) -> Router {
    routes::build_router(state, build_cors(), &cfg.storage.frontend_dir)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let addr = cfg
        .server
        .bind_addr()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = build_state(&cfg).await?;
    let app = build_app(state, &cfg);

    info!(%addr, products = %cfg.storage.products_path, "starting catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
