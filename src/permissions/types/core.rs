/*!
 * Permission Types
 * Identifiers, statuses, and the values reported by registry operations
 */

use crate::core::errors::{RegistryError, RegistryResult};
use crate::core::limits::{PLATFORM_DENIED, PLATFORM_GRANTED};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque identifier of an OS-gated capability
///
/// Compared by value. Usually a manifest string such as
/// `android.permission.BLUETOOTH`, see [`crate::permissions::manifest`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(String);

impl PermissionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PermissionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PermissionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&PermissionId> for PermissionId {
    fn from(id: &PermissionId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for PermissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PermissionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PermissionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PermissionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Last known grant state of a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    /// Never checked
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }

    /// Collapse to the two-valued query contract: anything not granted is denied
    pub fn fail_closed(self) -> Self {
        match self {
            PermissionStatus::Granted => PermissionStatus::Granted,
            PermissionStatus::Unknown | PermissionStatus::Denied => PermissionStatus::Denied,
        }
    }

    /// Lenient conversion from a platform status code
    ///
    /// Only the platform's granted code maps to `Granted`.
    pub fn from_platform_code(code: i32) -> Self {
        if code == PLATFORM_GRANTED {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    /// Platform status code; `Unknown` reports as denied
    pub fn to_platform_code(self) -> i32 {
        match self {
            PermissionStatus::Granted => PLATFORM_GRANTED,
            PermissionStatus::Unknown | PermissionStatus::Denied => PLATFORM_DENIED,
        }
    }
}

impl TryFrom<i32> for PermissionStatus {
    type Error = RegistryError;

    fn try_from(code: i32) -> RegistryResult<Self> {
        match code {
            PLATFORM_GRANTED => Ok(PermissionStatus::Granted),
            PLATFORM_DENIED => Ok(PermissionStatus::Denied),
            other => Err(RegistryError::UnknownPlatformCode(other)),
        }
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PermissionStatus::Unknown => "UNKNOWN",
            PermissionStatus::Granted => "GRANTED",
            PermissionStatus::Denied => "DENIED",
        };
        f.write_str(label)
    }
}

/// What a resolve pass did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvePass {
    /// 1 for the first pass, incremented on every repeat
    pub pass: u32,
    /// Tracked entries checked (duplicates counted once per entry)
    pub checked: usize,
    /// Entries already granted at check time
    pub granted: usize,
    /// Batch handed to the platform request, in tracked order; empty when nothing was requested
    pub requested: Vec<PermissionId>,
}

impl ResolvePass {
    pub fn issued_request(&self) -> bool {
        !self.requested.is_empty()
    }
}

/// What a result callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    /// Status writes performed
    pub applied: usize,
    /// Writes for ids that were never tracked
    pub untracked: usize,
    /// Ids or results without a partner, dropped
    pub unpaired: usize,
}

/// Registry counters over distinct tracked ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub tracked: usize,
    pub granted: usize,
    pub denied: usize,
    pub unknown: usize,
    pub locked: bool,
}

/// One tracked entry as seen from outside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: PermissionId,
    /// 1-based position of this entry in the tracked sequence
    pub position: usize,
    pub status: PermissionStatus,
}

/// Serializable view of the registry in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub locked: bool,
    pub entries: Vec<SnapshotEntry>,
}
