use std::path::PathBuf;

use thiserror::Error;

use crate::check::status::NagiosStatus;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {}", with_sources(.0))]
    Network(#[from] reqwest::Error),

    #[error("HTTP status {status} returned by {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body: {}", with_sources(.0))]
    Body(reqwest::Error),
}

/// Renders reqwest's error with its causes; the connect or timeout reason sits
/// behind a bare "error sending request"
fn with_sources(err: &reqwest::Error) -> String {
    anyhow::Chain::new(err)
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Save file {path:?} cannot be read: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Save file {path:?} cannot be written: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Permissions of save file {path:?} cannot be set: {source}")]
    Permissions {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures of a single check run, each mapped to a Nagios status
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Request failed ({0}). Current version couldn't be retrieved.")]
    Transport(#[from] FetchError),

    #[error(
        "No revision ID was found between {prefix:?} and {suffix:?} in the fetched page. Current version couldn't be determined."
    )]
    Extraction { prefix: String, suffix: String },

    #[error("The save file cannot be opened. Please check the status of this file. ({0})")]
    StoreUnreadable(StoreError),

    #[error("The save file could not be updated. ({0})")]
    StoreWrite(StoreError),
}

impl CheckError {
    pub fn status(&self) -> NagiosStatus {
        match self {
            CheckError::Transport(_) => NagiosStatus::Critical,
            CheckError::Extraction { .. } => NagiosStatus::Unknown,
            CheckError::StoreUnreadable(_) => NagiosStatus::Critical,
            CheckError::StoreWrite(_) => NagiosStatus::Critical,
        }
    }
}
