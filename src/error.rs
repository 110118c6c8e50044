//! Error types for the planner's I/O layers. Schedule derivation itself never fails.

use thiserror::Error;

/// Result type for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Error, Debug)]
pub enum PlannerError {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog CSV could not be read or decoded
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Text export could not be formatted
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A component id that isn't in the catalog
    #[error("Unknown component: {0}")]
    UnknownComponent(String),
}
