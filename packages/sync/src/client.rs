//! # Sync Client
//!
//! Reads the registry's dirty subsets, talks to the save/publish/upload
//! endpoints, and writes acknowledged state back. Everything runs on
//! the caller's task; the busy flag only suppresses overlapping calls,
//! it is not a lock (a double-send of already-saved content would be
//! wasteful, never corrupting).

use crate::errors::SyncError;
use crate::payload::{PageMeta, PublishRequest, SaveRequest, SaveResponse, SectionChange, UploadResponse};
use crate::transport::{Transport, TransportResponse};
use inlay_editor::{Baseline, EditorConfig, SectionRegistry};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Result of a save or publish attempt that reached a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Request succeeded; this many sections were transmitted
    Completed { sections: usize },

    /// Nothing had changed; no network call was made
    Clean,

    /// Another operation is in flight; nothing was sent
    Busy,
}

/// Client for one page's save/publish/upload endpoints.
///
/// Operations take `&self`, so a client wrapped in an `Arc` can be
/// shared across tasks; the busy flag then suppresses overlapping
/// calls.
pub struct SyncClient<T: Transport> {
    transport: T,
    save_endpoint: String,
    publish_endpoint: String,
    upload_endpoint: String,
    page: String,
    authorization: Option<String>,
    busy: AtomicBool,
}

impl<T: Transport> SyncClient<T> {
    /// Build a client from the editor's configuration
    pub fn new(transport: T, config: &EditorConfig) -> Self {
        Self {
            transport,
            save_endpoint: config.save_endpoint.clone(),
            publish_endpoint: config.publish_endpoint.clone(),
            upload_endpoint: config.upload_endpoint.clone(),
            page: config.page.clone(),
            authorization: config.authorization.clone(),
            busy: AtomicBool::new(false),
        }
    }

    /// Whether an operation is currently in flight (the host shows a
    /// wait cursor while this is true)
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Raise the busy flag; `false` when another call already holds it.
    fn enter(&self) -> bool {
        !self.busy.swap(true, Ordering::Acquire)
    }

    fn leave(&self) {
        self.busy.store(false, Ordering::Release);
    }

    /// Transmit the changed-for-save subset.
    ///
    /// A clean registry is a no-op with no network call. On 2xx each
    /// transmitted section's `saved_text` is promoted to its
    /// `edited_text`, then reconciled against any authoritative states
    /// echoed in the response body. On failure dirty state is left
    /// untouched so a later attempt retries naturally.
    pub async fn save(
        &self,
        registry: &mut SectionRegistry,
        meta: Option<PageMeta>,
    ) -> Result<SyncOutcome, SyncError> {
        let changed: Vec<SectionChange> = registry
            .changed_since(Baseline::Save)
            .into_iter()
            .map(SectionChange::edited)
            .collect();
        if changed.is_empty() {
            debug!("save skipped: nothing changed");
            return Ok(SyncOutcome::Clean);
        }

        let request = SaveRequest {
            page: self.page.clone(),
            sections: changed.clone(),
            meta,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        let body = serde_json::to_value(&request)?;

        if !self.enter() {
            return Ok(SyncOutcome::Busy);
        }
        let result = self.post(&self.save_endpoint, body, "save").await;
        self.leave();
        let response = result?;

        // Promote what we sent, then defer to the server's echo.
        for change in &changed {
            if let Some(section) = registry.find_by_path_mut(&change.path) {
                section.saved_text = section.edited_text.clone();
            }
        }
        if let Some(body) = response.body {
            if let Ok(echo) = serde_json::from_value::<SaveResponse>(body) {
                for change in echo.sections {
                    if let Some(section) = registry.find_by_path_mut(&change.path) {
                        section.saved_text = change.text;
                    }
                }
            }
        }

        info!(sections = changed.len(), "save acknowledged");
        Ok(SyncOutcome::Completed {
            sections: changed.len(),
        })
    }

    /// Transmit the full section list if anything is unpublished.
    ///
    /// On 2xx every section's `original_text` is promoted to its
    /// `saved_text` (publish is a full-registry promotion, not a
    /// filtered one).
    pub async fn publish(
        &self,
        registry: &mut SectionRegistry,
    ) -> Result<SyncOutcome, SyncError> {
        let unpublished = registry.changed_since(Baseline::Publish).len();
        if unpublished == 0 {
            debug!("publish skipped: nothing changed");
            return Ok(SyncOutcome::Clean);
        }

        let request = PublishRequest {
            page: self.page.clone(),
            sections: registry.iter().map(SectionChange::saved).collect(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        let body = serde_json::to_value(&request)?;

        if !self.enter() {
            return Ok(SyncOutcome::Busy);
        }
        let result = self.post(&self.publish_endpoint, body, "publish").await;
        self.leave();
        result?;

        for section in registry.iter_mut() {
            section.original_text = section.saved_text.clone();
        }

        info!(sections = unpublished, "publish acknowledged");
        Ok(SyncOutcome::Completed {
            sections: unpublished,
        })
    }

    /// Upload a media file, returning the path/URL to embed
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String, SyncError> {
        if !self.enter() {
            return Err(SyncError::Busy);
        }
        let result = self
            .transport
            .post_bytes(
                &self.upload_endpoint,
                self.authorization.as_deref(),
                filename,
                bytes,
            )
            .await;
        self.leave();

        let response = result.inspect_err(|e| warn!(error = %e, "upload failed"))?;
        if !response.is_success() {
            warn!(status = response.status, "upload rejected");
            return Err(SyncError::Status {
                endpoint: self.upload_endpoint.clone(),
                status: response.status,
            });
        }

        let body = response.body.ok_or(SyncError::MalformedResponse)?;
        let parsed: UploadResponse =
            serde_json::from_value(body).map_err(|_| SyncError::MalformedResponse)?;
        Ok(parsed.path)
    }

    /// Issue one POST, mapping non-2xx statuses to errors. The caller
    /// holds the busy flag around this and clears it on both paths.
    async fn post(
        &self,
        endpoint: &str,
        body: serde_json::Value,
        operation: &str,
    ) -> Result<TransportResponse, SyncError> {
        let result = self
            .transport
            .post_json(endpoint, self.authorization.as_deref(), body)
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(operation, error = %e, "request failed, local state untouched");
                return Err(e);
            }
        };

        if !response.is_success() {
            warn!(operation, status = response.status, "request rejected, local state untouched");
            return Err(SyncError::Status {
                endpoint: endpoint.to_string(),
                status: response.status,
            });
        }

        Ok(response)
    }
}
