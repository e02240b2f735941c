use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Products file not found: {path}")]
    ProductsNotFound { path: PathBuf },

    #[error("Invalid rule in category '{category}': {message}")]
    InvalidRule { category: String, message: String },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid config value for {key}: {message}")]
    ConfigValue { key: String, message: String },

    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ProductsNotFound { .. } => 2,
            Self::InvalidRule { .. } => 3,
            Self::ConfigParse { .. } | Self::ConfigKeyNotFound { .. } | Self::ConfigValue { .. } => {
                4
            }
            Self::InvalidPageSize => 5,
            _ => 1,
        }
    }
}
