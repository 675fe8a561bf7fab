//! Unified error types for the provider directory.

use std::path::PathBuf;

use strum::Display;
use thiserror::Error;

/// Unified error type for the provider directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration values failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dataset loading error.
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// Search request error.
    #[error("search error: {0}")]
    Search(#[from] SearchError),
}

/// Which static dataset an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Dataset {
    /// The provider dataset.
    Providers,
    /// The insurance plan dataset.
    Plans,
}

/// Errors raised while loading the static datasets at startup.
#[derive(Error, Debug)]
pub enum DataError {
    /// The dataset file could not be read.
    #[error("failed to read {dataset} dataset at {}: {source}", path.display())]
    Read {
        /// Dataset being loaded.
        dataset: Dataset,
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not a JSON array of the expected records.
    #[error("malformed {dataset} dataset at {}: {source}", path.display())]
    Malformed {
        /// Dataset being loaded.
        dataset: Dataset,
        /// Path that was read.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Client input errors for the search operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The supplied plan id does not convert to an integer.
    #[error("invalid plan_id {value}: expected an integer")]
    InvalidPlanId {
        /// The rejected value, as received.
        value: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, DirectoryError>;
