// src/error.rs

use thiserror::Error;

/// Errors surfaced by the advisor.
///
/// Malformed sales entries read from a store are not errors: they are skipped
/// during ingestion (see `model::record::ParsedRecord`).
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// A caller tried to write data that violates an invariant.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("product name cannot be empty")]
    InvalidProductName,

    #[error("product '{0}' already exists")]
    ProductExists(String),

    #[error("unknown product '{0}'")]
    UnknownProduct(String),

    /// The store file parsed as JSON but does not have the expected shape.
    #[error("malformed store: {0}")]
    MalformedStore(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
