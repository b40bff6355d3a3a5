use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::api::handlers::{
    handle_clear_log, handle_download_log, handle_health, handle_help_close, handle_help_open, handle_index,
    handle_refresh, handle_reset, handle_retry, handle_screenshot, handle_select_history, handle_state,
    handle_submit, handle_theme, SharedController,
};
use crate::backend::HttpTaskBackend;
use crate::config::ConsoleConfig;
use crate::controller::ViewController;

pub fn build_app(controller: SharedController) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/ui/state", get(handle_state))
        .route("/ui/tasks", post(handle_submit))
        .route("/ui/tasks/retry", post(handle_retry))
        .route("/ui/history/:index/select", post(handle_select_history))
        .route("/ui/log/clear", post(handle_clear_log))
        .route("/ui/log/download", get(handle_download_log))
        .route("/ui/browser/refresh", post(handle_refresh))
        .route("/ui/browser/screenshot", post(handle_screenshot))
        .route("/ui/theme", post(handle_theme))
        .route("/ui/help/open", post(handle_help_open))
        .route("/ui/help/close", post(handle_help_close))
        .route("/ui/reset", post(handle_reset))
        .with_state(controller)
}

pub struct ConsoleServer {
    pub port: u16,
    pub controller: SharedController,
}

impl ConsoleServer {
    pub fn new(port: u16, controller: SharedController) -> Self {
        Self { port, controller }
    }

    /// Controller talking to the HTTP backend named in `config`.
    pub fn from_config(config: ConsoleConfig) -> anyhow::Result<Self> {
        let backend = HttpTaskBackend::from_config(&config).context("building backend client")?;
        let port = config.port;
        let controller = Arc::new(ViewController::new(config, Arc::new(backend)));
        Ok(Self::new(port, controller))
    }

    pub async fn start(&self) -> anyhow::Result<()> {
        let app = build_app(self.controller.clone());
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, backend = %self.controller.config.backend_url, "console listening");
        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await
            .context("serving console")
    }
}
