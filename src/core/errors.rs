/*!
 * Error Types
 * Errors raised at the crate's edges (configuration, host plumbing, code conversion).
 *
 * Registry operations themselves never fail: unknown or unresolved state
 * degrades to `Denied` instead.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for fallible edge operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Edge errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum RegistryError {
    #[error("Invalid configuration for {key}: {reason}")]
    #[diagnostic(
        code(registry::invalid_config),
        help("Check the PERMISSION_* environment variables.")
    )]
    InvalidConfig { key: String, reason: String },

    #[error("Unknown platform permission code: {0}")]
    #[diagnostic(
        code(registry::unknown_platform_code),
        help("Platforms report 0 for granted and -1 for denied.")
    )]
    UnknownPlatformCode(i32),

    #[error("Permission channel closed")]
    #[diagnostic(
        code(registry::channel_closed),
        help("The other end of the request/result channel was dropped.")
    )]
    ChannelClosed,
}

impl RegistryError {
    pub(crate) fn invalid_config(key: &str, reason: impl Into<String>) -> Self {
        RegistryError::InvalidConfig {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
