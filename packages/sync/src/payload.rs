//! Wire payloads for the save/publish/upload endpoints.
//!
//! Sections travel as `path` + `text` pairs; live node handles never
//! leave the process. Field names are camelCase on the wire.

use inlay_editor::Section;
use serde::{Deserialize, Serialize};

/// One section's content as transmitted or echoed back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionChange {
    /// Canonical selector path identifying the region
    pub path: String,

    /// Serialized rich content
    pub text: String,
}

impl SectionChange {
    /// The in-memory value, as sent by `save`
    pub fn edited(section: &Section) -> Self {
        Self {
            path: section.path.to_string(),
            text: section.edited_text.clone(),
        }
    }

    /// The server-acknowledged value, as sent by `publish`
    pub fn saved(section: &Section) -> Self {
        Self {
            path: section.path.to_string(),
            text: section.saved_text.clone(),
        }
    }
}

/// Optional page metadata accompanying a save
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

/// Body of a save request: the changed-for-save subset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    /// Logical page the sections belong to
    pub page: String,

    pub sections: Vec<SectionChange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,

    /// Client wall-clock time in milliseconds
    pub timestamp: i64,
}

/// Body of a publish request: the full section list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub page: String,
    pub sections: Vec<SectionChange>,
    pub timestamp: i64,
}

/// Optional echo of authoritative section states on a 2xx save
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    #[serde(default)]
    pub sections: Vec<SectionChange>,
}

/// Response from the upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Path or URL under which the uploaded media is reachable
    pub path: String,
}
