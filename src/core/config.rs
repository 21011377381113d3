/*!
 * Registry Configuration
 *
 * Runtime configuration for the request code and audit buffer
 */

use super::errors::{RegistryError, RegistryResult};
use super::limits::{
    DEFAULT_AUDIT_CAPACITY, DEFAULT_REQUEST_CODE, ENV_AUDIT_CAPACITY, ENV_REQUEST_CODE,
    MAX_AUDIT_CAPACITY,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RegistryConfig {
    /// Code attached to the batched platform request
    pub request_code: i32,
    /// Number of lifecycle events kept by the audit log
    pub audit_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            request_code: DEFAULT_REQUEST_CODE,
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
        }
    }
}

impl RegistryConfig {
    /// Builder-style request code override
    pub fn with_request_code(mut self, request_code: i32) -> Self {
        self.request_code = request_code;
        self
    }

    /// Builder-style audit capacity override
    pub fn with_audit_capacity(mut self, audit_capacity: usize) -> Self {
        self.audit_capacity = audit_capacity;
        self
    }

    /// Load configuration from the environment
    ///
    /// Environment variables:
    /// - PERMISSION_REQUEST_CODE: request code (default: 100)
    /// - PERMISSION_AUDIT_CAPACITY: audit ring size (default: 1024)
    pub fn from_env() -> RegistryResult<Self> {
        let mut config = Self::default();

        if let Some(code) = read_env::<i32>(ENV_REQUEST_CODE)? {
            config.request_code = code;
        }
        if let Some(capacity) = read_env::<usize>(ENV_AUDIT_CAPACITY)? {
            config.audit_capacity = capacity;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the registry cannot operate with
    pub fn validate(&self) -> RegistryResult<()> {
        if self.audit_capacity == 0 {
            return Err(RegistryError::invalid_config(
                ENV_AUDIT_CAPACITY,
                "audit capacity must be at least 1",
            ));
        }
        if self.audit_capacity > MAX_AUDIT_CAPACITY {
            return Err(RegistryError::invalid_config(
                ENV_AUDIT_CAPACITY,
                format!("audit capacity must not exceed {}", MAX_AUDIT_CAPACITY),
            ));
        }
        Ok(())
    }
}

fn read_env<T: FromStr>(key: &str) -> RegistryResult<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| RegistryError::invalid_config(key, format!("cannot parse {:?}", raw))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(RegistryError::invalid_config(key, "value is not valid unicode"))
        }
    }
}
