use std::path::PathBuf;

use thiserror::Error;

/// Configuration-time failures of schemas and catalogs.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("step index {index} is out of range (step count {count})")]
    OutOfRange { index: usize, count: usize },
    #[error("invalid step schema: {0}")]
    InvalidSchema(String),
    #[error("failed to parse step schema: {0}")]
    SchemaParse(#[source] serde_json::Error),
    #[error("locale catalog '{locale}' is missing required key '{key}'")]
    CatalogIncomplete { locale: String, key: String },
    #[error("default locale '{0}' is not declared by the catalog")]
    UnknownDefaultLocale(String),
    #[error("failed to parse locale catalog '{locale}': {source}")]
    CatalogParse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
