//! # Transport
//!
//! Thin abstraction over the outbound HTTP calls so the client logic is
//! testable without a server. The real implementation rides on
//! `reqwest`; the mock records requests and replays scripted responses.

use crate::errors::SyncError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Status and optional JSON body of a completed request
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

impl TransportResponse {
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }

    pub fn ok_with(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    pub fn status(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Any 2xx counts as success
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound request surface used by [`crate::SyncClient`]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body
    async fn post_json(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        body: serde_json::Value,
    ) -> Result<TransportResponse, SyncError>;

    /// POST a binary payload (media upload)
    async fn post_bytes(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<TransportResponse, SyncError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn post_json(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        body: serde_json::Value,
    ) -> Result<TransportResponse, SyncError> {
        (**self).post_json(endpoint, authorization, body).await
    }

    async fn post_bytes(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<TransportResponse, SyncError> {
        (**self)
            .post_bytes(endpoint, authorization, filename, bytes)
            .await
    }
}

/// Real HTTP transport
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// `base_url` is prefixed onto every endpoint path
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        body: serde_json::Value,
    ) -> Result<TransportResponse, SyncError> {
        let mut request = self.client.post(self.url(endpoint)).json(&body);
        if let Some(credential) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, credential);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.json().await.ok();

        Ok(TransportResponse { status, body })
    }

    async fn post_bytes(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<TransportResponse, SyncError> {
        let mut request = self
            .client
            .post(self.url(endpoint))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .header("x-file-name", filename)
            .body(bytes);
        if let Some(credential) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, credential);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.json().await.ok();

        Ok(TransportResponse { status, body })
    }
}

/// One request observed by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

/// Mock transport: records requests, replays scripted responses in
/// order. An exhausted script answers plain 200s.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<TransportResponse>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response
    pub fn enqueue(&self, response: TransportResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Requests observed so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self) -> TransportResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(TransportResponse::ok)
    }

    fn record(&self, endpoint: &str, authorization: Option<&str>, body: serde_json::Value) {
        self.requests.lock().unwrap().push(RecordedRequest {
            endpoint: endpoint.to_string(),
            authorization: authorization.map(str::to_string),
            body,
        });
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        body: serde_json::Value,
    ) -> Result<TransportResponse, SyncError> {
        self.record(endpoint, authorization, body);
        Ok(self.next_response())
    }

    async fn post_bytes(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<TransportResponse, SyncError> {
        self.record(
            endpoint,
            authorization,
            serde_json::json!({ "filename": filename, "size": bytes.len() }),
        );
        Ok(self.next_response())
    }
}
