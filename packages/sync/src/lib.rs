//! # Inlay Sync
//!
//! Network layer for the inlay editing core: batches changed sections
//! and issues save/publish/upload requests, then writes acknowledged
//! state back into the section registry.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ editor: SectionRegistry (dirty subsets)     │
//! └─────────────────────────────────────────────┘
//!                     ↓ changed_since(...)
//! ┌─────────────────────────────────────────────┐
//! │ sync: SyncClient                            │
//! │  - save: POST changed-for-save subset       │
//! │  - publish: POST full list, promote all     │
//! │  - upload: POST bytes, returns a path       │
//! └─────────────────────────────────────────────┘
//!                     ↓ Transport
//! ┌─────────────────────────────────────────────┐
//! │ HTTP endpoints (or a mock in tests)         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Failure semantics
//!
//! Network failures are locally recoverable: they are logged and
//! surfaced as [`SyncError`], and dirty state is left untouched so the
//! next user- or timer-triggered attempt retries naturally. There is no
//! retry machinery here.

mod client;
mod errors;
mod payload;
mod transport;

pub use client::{SyncClient, SyncOutcome};
pub use errors::SyncError;
pub use payload::{PageMeta, PublishRequest, SaveRequest, SaveResponse, SectionChange, UploadResponse};
pub use transport::{HttpTransport, MockTransport, RecordedRequest, Transport, TransportResponse};
