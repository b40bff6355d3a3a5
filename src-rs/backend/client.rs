use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

use super::types::{ExecuteTaskRequest, ExecuteTaskResponse};
use crate::config::ConsoleConfig;
use crate::error::BackendError;

/// The automation server behind `/api/execute-task`.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    async fn execute(&self, request: &ExecuteTaskRequest) -> Result<ExecuteTaskResponse, BackendError>;
}

pub struct HttpTaskBackend {
    pub execute_url: String,
    client: Client,
}

impl HttpTaskBackend {
    pub fn new(execute_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| BackendError::Request(err.to_string()))?;
        Ok(Self {
            execute_url: execute_url.to_string(),
            client,
        })
    }

    pub fn from_config(cfg: &ConsoleConfig) -> Result<Self, BackendError> {
        Self::new(&cfg.execute_url(), cfg.request_timeout)
    }
}

#[async_trait]
impl TaskBackend for HttpTaskBackend {
    async fn execute(&self, request: &ExecuteTaskRequest) -> Result<ExecuteTaskResponse, BackendError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        debug!(url = %self.execute_url, task = %request.task, "posting task to backend");
        let resp = self
            .client
            .post(&self.execute_url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|err| BackendError::Request(err.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            resp.json::<ExecuteTaskResponse>()
                .await
                .map_err(|err| BackendError::Decode(err.to_string()))
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(BackendError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
