/*!
 * Permission Types Module
 * Core types and traits for the permission registry
 */

mod core;
mod traits;

pub use self::core::{
    PermissionId, PermissionStatus, RegistrySnapshot, RegistryStats, ResolutionOutcome,
    ResolvePass, SnapshotEntry,
};
pub use traits::PermissionHost;

#[cfg(test)]
pub use traits::MockPermissionHost;
