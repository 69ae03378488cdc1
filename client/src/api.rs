/// HTTP client for the reupload backend.
///
/// Both submission endpoints are fire-and-acknowledge: they only return a
/// task handle, never the final result. Progress comes from the task
/// status endpoint.
use serde::Serialize;
use tracing::debug;

use reelay_shared::errors::{ReelayError, ReelayResult, TransportError};
use reelay_shared::models::{DownloadRequest, ProcessRequest, SubmitAck, TaskSnapshot};

/// Backend operations needed by the task-flow controller.
///
/// A trait seam so the controller can be exercised in tests with scripted
/// responses instead of a live server.
#[allow(async_fn_in_trait)]
pub trait TaskBackend {
    async fn submit_process(&self, request: &ProcessRequest) -> ReelayResult<String>;
    async fn submit_download(&self, request: &DownloadRequest) -> ReelayResult<String>;
    async fn fetch_task(&self, task_id: &str) -> ReelayResult<TaskSnapshot>;
}

/// reqwest-backed implementation of [`TaskBackend`].
pub struct HttpBackend {
    base: String,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        HttpBackend {
            base,
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// POST a submission body and extract the task handle from the ack.
    async fn submit<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> ReelayResult<String> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()).into());
        }

        let ack: SubmitAck = response
            .json()
            .await
            .map_err(|e| ReelayError::Application(format!("invalid response body: {}", e)))?;

        match ack.task_id {
            Some(task_id) => Ok(task_id),
            // 2xx without a handle is an application-level failure; prefer
            // the backend's own error message.
            None => Err(match ack.error {
                Some(message) => ReelayError::Application(message),
                None => ReelayError::unknown(),
            }),
        }
    }
}

impl TaskBackend for HttpBackend {
    async fn submit_process(&self, request: &ProcessRequest) -> ReelayResult<String> {
        self.submit("/api/process", request).await
    }

    async fn submit_download(&self, request: &DownloadRequest) -> ReelayResult<String> {
        self.submit("/api/download", request).await
    }

    async fn fetch_task(&self, task_id: &str) -> ReelayResult<TaskSnapshot> {
        let url = self.endpoint(&format!("/api/task/{}", task_id));
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()).into());
        }

        response
            .json()
            .await
            .map_err(|e| ReelayError::Application(format!("invalid response body: {}", e)))
    }
}
