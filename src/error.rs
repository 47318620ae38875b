//! Error types for preference parsing, configuration, and storage access.

/// Error returned when an attribute or stored string does not name a known
/// preference value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The string is not one of the kind's enumerated variants.
    #[error("unknown {kind} value: {value:?}")]
    UnknownVariant {
        /// Preference kind being parsed (`font size`, `theme`, ...).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
    /// The string does not name a preference kind.
    #[error("unknown preference kind: {0:?}")]
    UnknownKind(String),
}

/// Error returned by [`crate::config::Config::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config payload is not valid JSON for [`crate::config::Config`].
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    /// A numeric tuning value is out of range.
    #[error("config field {field} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Error surfaced by a [`crate::store::KeyValueStore`] backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage is reachable (private mode, disabled cookies, SSR).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend rejected the operation (quota, security error).
    #[error("storage {op} failed for key {key:?}: {reason}")]
    Rejected {
        /// Operation name: `get`, `set`, or `remove`.
        op: &'static str,
        /// Key involved.
        key: String,
        /// Backend-provided reason.
        reason: String,
    },
}
