use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Other(String),
}

impl From<String> for MemoryError {
    fn from(s: String) -> Self {
        MemoryError::Other(s)
    }
}

impl From<&str> for MemoryError {
    fn from(s: &str) -> Self {
        MemoryError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let err: MemoryError = "something broke".to_string().into();
        assert!(matches!(err, MemoryError::Other(_)));
        assert_eq!(err.to_string(), "something broke");
    }

    #[test]
    fn test_from_str() {
        let err: MemoryError = "bad input".into();
        assert!(matches!(err, MemoryError::Other(_)));
        assert_eq!(err.to_string(), "bad input");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file gone");
        let err: MemoryError = io_err.into();
        assert!(matches!(err, MemoryError::Io(_)));
        assert!(err.to_string().contains("file gone"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json{").unwrap_err();
        let err: MemoryError = json_err.into();
        assert!(matches!(err, MemoryError::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_display_invalid_input_variant() {
        let err = MemoryError::InvalidInput("importance out of range".to_string());
        assert_eq!(err.to_string(), "Invalid input: importance out of range");
    }

    #[test]
    fn test_from_rusqlite_error() {
        let sql_err = rusqlite::Error::InvalidQuery;
        let err: MemoryError = sql_err.into();
        assert!(matches!(err, MemoryError::Database(_)));
        assert!(err.to_string().contains("Database error"));
    }
}
