use super::types::ArsenalError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl ArsenalError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable: another process holds the write lock
            ArsenalError::Busy(_) => ErrorClassification {
                error_type: "BusyError",
                retryable: true,
            },

            // Non-retryable errors
            ArsenalError::Storage(_) => ErrorClassification {
                error_type: "StorageError",
                retryable: false,
            },
            ArsenalError::Schema(_) => ErrorClassification {
                error_type: "SchemaError",
                retryable: false,
            },
            ArsenalError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            ArsenalError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: false,
            },
            ArsenalError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            ArsenalError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
        }
    }
}
