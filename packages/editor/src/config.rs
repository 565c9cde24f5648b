//! Editor configuration.
//!
//! Invalid configuration is the one failure class that must surface
//! immediately to the integrating application, so construction-time
//! validation is strict and never silently repaired.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tags treated as editable regions by default
pub const DEFAULT_EDITABLE_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "blockquote", "figcaption",
];

fn default_save_endpoint() -> String {
    "/save".to_string()
}

fn default_publish_endpoint() -> String {
    "/publish".to_string()
}

fn default_upload_endpoint() -> String {
    "/upload".to_string()
}

fn default_page() -> String {
    "/".to_string()
}

/// Editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Endpoint receiving save requests
    #[serde(default = "default_save_endpoint")]
    pub save_endpoint: String,

    /// Endpoint receiving publish requests
    #[serde(default = "default_publish_endpoint")]
    pub publish_endpoint: String,

    /// Endpoint receiving media uploads
    #[serde(default = "default_upload_endpoint")]
    pub upload_endpoint: String,

    /// Editable tags in addition to [`DEFAULT_EDITABLE_TAGS`]
    #[serde(default)]
    pub extra_editable_tags: Vec<String>,

    /// Logical page identifier sections belong to
    #[serde(default = "default_page")]
    pub page: String,

    /// Initial language code (persisted preference wins over this)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Opaque credential attached as an `Authorization` header on all
    /// outgoing requests. Never interpreted by the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid editable tag: {0:?}")]
    InvalidTag(String),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EditorConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate constructor arguments, failing fast on misuse
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tag in &self.extra_editable_tags {
            let well_formed = !tag.is_empty()
                && tag
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
            if !well_formed {
                return Err(ConfigError::InvalidTag(tag.clone()));
            }
        }
        Ok(())
    }

    /// Full editable tag set: defaults plus configured extras
    pub fn editable_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = DEFAULT_EDITABLE_TAGS.iter().map(|t| t.to_string()).collect();
        for extra in &self.extra_editable_tags {
            if !tags.contains(extra) {
                tags.push(extra.clone());
            }
        }
        tags
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            save_endpoint: default_save_endpoint(),
            publish_endpoint: default_publish_endpoint(),
            upload_endpoint: default_upload_endpoint(),
            extra_editable_tags: vec![],
            page: default_page(),
            language: None,
            authorization: None,
        }
    }
}
