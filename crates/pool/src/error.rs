//! Error types for pool operations
use thiserror::Error;

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pool and registry operations
#[derive(Error, Debug)]
pub enum Error {
    /// Pool configuration is invalid
    #[error("Configuration error: {message}")]
    Configuration {
        /// The error message
        message: String,
        /// The underlying error (if available)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Object creation failed
    #[error("Creation failed for pool '{pool_id}': {reason}")]
    Creation {
        /// The pool identifier
        pool_id: String,
        /// The failure reason
        reason: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A registry key is already bound to a pool driven by a different
    /// lifecycle type
    #[error("Pool '{key}' is bound to a different lifecycle type")]
    TypeMismatch {
        /// The registry key
        key: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a creation error
    pub fn creation<S: Into<String>, R: Into<String>>(pool_id: S, reason: R) -> Self {
        Self::Creation {
            pool_id: pool_id.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a creation error wrapping an underlying cause
    pub fn creation_with_source<S: Into<String>, R: Into<String>>(
        pool_id: S,
        reason: R,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Creation {
            pool_id: pool_id.into(),
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<S: Into<String>>(key: S) -> Self {
        Self::TypeMismatch { key: key.into() }
    }

    /// Get the pool ID associated with this error (if any)
    #[must_use]
    pub fn pool_id(&self) -> Option<&str> {
        match self {
            Self::Configuration { .. } => None,
            Self::Creation { pool_id, .. } => Some(pool_id),
            Self::TypeMismatch { key } => Some(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_has_no_pool_id() {
        let err = Error::configuration("capacity out of range");
        assert_eq!(err.pool_id(), None);
        assert!(err.to_string().contains("capacity out of range"));
    }

    #[test]
    fn creation_error_carries_pool_id() {
        let err = Error::creation("db", "connect refused");
        assert_eq!(err.pool_id(), Some("db"));
        assert_eq!(
            err.to_string(),
            "Creation failed for pool 'db': connect refused"
        );
    }

    #[test]
    fn creation_error_preserves_source() {
        let io = std::io::Error::other("boom");
        let err = Error::creation_with_source("db", "connect refused", Box::new(io));
        let source = std::error::Error::source(&err).expect("source should be set");
        assert_eq!(source.to_string(), "boom");
    }

    #[test]
    fn type_mismatch_reports_key() {
        let err = Error::type_mismatch("shared");
        assert_eq!(err.pool_id(), Some("shared"));
        assert!(err.to_string().contains("shared"));
    }
}
