//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Preference store error: {0}")]
    Store(#[from] inlay_common::CommonError),
}
