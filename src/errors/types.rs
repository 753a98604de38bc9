use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArsenalError {
    /// The store could not be opened or written: bad path, permissions,
    /// or a lock that stayed held past the retry budget.
    #[error("Storage unavailable: {0}")]
    Storage(String),

    /// Transient lock contention from a concurrent writer. Retryable;
    /// converted to Storage once the retry budget is exhausted.
    #[error("Database busy: {0}")]
    Busy(String),

    /// A pre-existing store with an incompatible schema. Never
    /// auto-migrated.
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
