use thiserror::Error;

#[derive(Debug, Error)]
pub enum AozoraError {
    #[error("catalog error: {0}")]
    Catalog(#[from] aozora_api::catalog::CatalogError),

    #[error("metadata error: {0}")]
    Jikan(#[from] aozora_api::jikan::JikanError),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
