use thiserror::Error;

/// Failures of the durable key/value store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to clear store: {0}")]
    Clear(#[source] std::io::Error),

    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed record `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of a single content fetch. Never retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no verses found for {0}")]
    Empty(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("no book selected")]
    NoBookSelected,
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_store_error_conversion() {
        let err = StoreError::Write {
            key: "favorites".to_string(),
            source: std::io::Error::other("disk full"),
        };
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Store(StoreError::Write { .. })));
        assert_eq!(
            app_err.to_string(),
            "Store error: failed to write `favorites`: disk full"
        );
    }

    #[test]
    fn test_error_display() {
        let err = FetchError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");

        let err = AppError::Fetch(FetchError::Parse("expected value".to_string()));
        assert_eq!(err.to_string(), "Fetch error: parse error: expected value");

        let err = AppError::Config("timeout must be positive".to_string());
        assert_eq!(err.to_string(), "Config error: timeout must be positive");
    }
}
