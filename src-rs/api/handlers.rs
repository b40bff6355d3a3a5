use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::controller::{ViewController, ViewSnapshot};
use crate::error::ConsoleError;
use crate::view::INDEX_HTML;

pub type SharedController = Arc<ViewController>;

#[derive(Debug)]
pub struct ApiError(ConsoleError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "ok": false,
                "error": self.0.to_string()
            })),
        )
            .into_response()
    }
}

impl From<ConsoleError> for ApiError {
    fn from(value: ConsoleError) -> Self {
        Self(value)
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub task: String,
    pub headless: Option<bool>,
    pub slow_mo: Option<bool>,
}

pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

pub async fn handle_state(State(ctl): State<SharedController>) -> Json<ViewSnapshot> {
    Json(ctl.snapshot())
}

pub async fn handle_submit(
    State(ctl): State<SharedController>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<ViewSnapshot>, ApiError> {
    match ctl.begin_submit_form(&req.task, req.headless, req.slow_mo) {
        Ok(pending) => {
            ctl.spawn_finish_submit(pending);
        }
        // already on the console
        Err(ConsoleError::EmptyTask) => debug!("rejected empty task"),
        Err(err) => return Err(err.into()),
    }
    Ok(Json(ctl.snapshot()))
}

pub async fn handle_retry(State(ctl): State<SharedController>) -> Result<Json<ViewSnapshot>, ApiError> {
    let pending = ctl.begin_retry()?;
    ctl.spawn_finish_submit(pending);
    Ok(Json(ctl.snapshot()))
}

pub async fn handle_select_history(
    State(ctl): State<SharedController>,
    Path(index): Path<usize>,
) -> Result<Json<ViewSnapshot>, ApiError> {
    ctl.select_history(index)?;
    Ok(Json(ctl.snapshot()))
}

pub async fn handle_clear_log(State(ctl): State<SharedController>) -> Json<ViewSnapshot> {
    ctl.clear_log();
    Json(ctl.snapshot())
}

pub async fn handle_download_log(State(ctl): State<SharedController>) -> impl IntoResponse {
    let export = ctl.export_log();
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name),
            ),
        ],
        export.content,
    )
}

pub async fn handle_refresh(State(ctl): State<SharedController>) -> Json<ViewSnapshot> {
    let ticket = ctl.begin_refresh();
    ctl.spawn_finish_refresh(ticket);
    Json(ctl.snapshot())
}

pub async fn handle_screenshot(State(ctl): State<SharedController>) -> Json<ViewSnapshot> {
    let ticket = ctl.begin_screenshot();
    ctl.spawn_finish_screenshot(ticket);
    Json(ctl.snapshot())
}

pub async fn handle_theme(State(ctl): State<SharedController>) -> Json<ViewSnapshot> {
    ctl.toggle_theme();
    Json(ctl.snapshot())
}

pub async fn handle_help_open(State(ctl): State<SharedController>) -> Json<ViewSnapshot> {
    ctl.open_help();
    Json(ctl.snapshot())
}

pub async fn handle_help_close(State(ctl): State<SharedController>) -> Json<ViewSnapshot> {
    ctl.close_help();
    Json(ctl.snapshot())
}

pub async fn handle_reset(State(ctl): State<SharedController>) -> Json<ViewSnapshot> {
    ctl.reset_all();
    Json(ctl.snapshot())
}
