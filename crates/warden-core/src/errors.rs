//! Unified error system for Warden
//!
//! One error type covers the whole crate family. Verification failures of a
//! ticket are deliberately absent: they collapse to "no identity" inside the
//! authenticator and never reach this type.

/// Unified error type for all Warden operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WardenError {
    /// A ticket was requested for an empty or otherwise unusable identity
    #[error("Invalid identity: {message}")]
    InvalidIdentity {
        /// Error message describing why the identity was rejected
        message: String,
    },

    /// The caller is authenticated (or anonymous) but lacks the permission
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Error message naming the permission that was refused
        message: String,
    },

    /// The operation requires an authenticated identity and none was present
    #[error("Authentication required: {message}")]
    AuthenticationRequired {
        /// Error message describing the guarded operation
        message: String,
    },

    /// A required collaborator or context was not configured for this call
    #[error("Runtime configuration error: {message}")]
    RuntimeConfiguration {
        /// Error message describing what is missing
        message: String,
    },

    /// The group-membership callback failed
    #[error("Group lookup failed: {message}")]
    GroupLookup {
        /// Error message from the lookup collaborator
        message: String,
    },

    /// Invalid static configuration (config file, environment, secret)
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message describing the invalid setting
        message: String,
    },

    /// Keyed-hash construction failed
    #[error("Crypto error: {message}")]
    Crypto {
        /// Error message describing the cryptographic failure
        message: String,
    },
}

impl WardenError {
    /// Create an invalid identity error
    pub fn invalid_identity(message: impl Into<String>) -> Self {
        Self::InvalidIdentity {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create an authentication required error
    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::AuthenticationRequired {
            message: message.into(),
        }
    }

    /// Create a runtime configuration error
    pub fn runtime_configuration(message: impl Into<String>) -> Self {
        Self::RuntimeConfiguration {
            message: message.into(),
        }
    }

    /// Create a group lookup error
    pub fn group_lookup(message: impl Into<String>) -> Self {
        Self::GroupLookup {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a crypto error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    /// Whether this is an expected access-control outcome rather than a defect
    pub fn is_access_outcome(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. } | Self::AuthenticationRequired { .. }
        )
    }

    /// Conventional HTTP status for adapters that map outcomes to responses
    pub fn status_code(&self) -> u16 {
        match self {
            Self::AuthenticationRequired { .. } => 401,
            Self::PermissionDenied { .. } => 403,
            Self::InvalidIdentity { .. } => 400,
            Self::RuntimeConfiguration { .. }
            | Self::GroupLookup { .. }
            | Self::Config { .. }
            | Self::Crypto { .. } => 500,
        }
    }
}

/// Standard Result type for Warden operations
pub type Result<T> = std::result::Result<T, WardenError>;

impl From<toml::de::Error> for WardenError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<std::io::Error> for WardenError {
    fn from(err: std::io::Error) -> Self {
        Self::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = WardenError::invalid_identity("identity must not be empty");
        assert!(matches!(err, WardenError::InvalidIdentity { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid identity: identity must not be empty"
        );
    }

    #[test]
    fn test_access_outcomes_map_to_distinct_statuses() {
        let denied = WardenError::permission_denied("edit");
        let required = WardenError::authentication_required("edit");

        assert!(denied.is_access_outcome());
        assert!(required.is_access_outcome());
        assert_eq!(denied.status_code(), 403);
        assert_eq!(required.status_code(), 401);
    }

    #[test]
    fn test_configuration_errors_are_not_access_outcomes() {
        let err = WardenError::runtime_configuration("no ACL context");
        assert!(!err.is_access_outcome());
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "warden.toml");
        let err = WardenError::from(io_err);
        assert!(matches!(err, WardenError::Config { .. }));
    }
}
