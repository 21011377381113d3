/*!
 * Permissions Module
 * Runtime permission bookkeeping for a host application
 *
 * The host declares which OS-gated permissions it needs, runs one resolve pass that
 * asks the platform for everything not yet granted, forwards the platform's answer,
 * and queries the final state whenever a feature needs to know.
 *
 * ## Usage
 * ```
 * use permission_registry::permissions::{manifest, PermissionRegistry, PermissionStatus};
 *
 * let mut registry = PermissionRegistry::new();
 * registry.add_many(manifest::LOCATION);
 * registry.add(manifest::BLUETOOTH);
 *
 * let pass = registry.resolve(|_| PermissionStatus::Denied, |batch| {
 *     // hand `batch` to the platform's consent dialog
 *     assert_eq!(batch.len(), 3);
 * });
 *
 * // later, from the platform callback
 * registry.on_resolution_result(
 *     &pass.requested,
 *     &[PermissionStatus::Granted, PermissionStatus::Denied, PermissionStatus::Granted],
 * );
 * assert!(registry.is_granted(manifest::BLUETOOTH));
 * ```
 */

pub mod audit;
pub mod channel;
pub mod manifest;
pub mod registry;
pub mod shared;
pub mod types;

// Re-export commonly used items
pub use audit::{AuditEvent, AuditKind, AuditLog, AuditStats};
pub use channel::{
    result_channel, ChannelHost, RequestBatch, RequestReceiver, ResolutionResult, ResultReceiver,
    ResultSender,
};
pub use registry::PermissionRegistry;
pub use shared::SharedRegistry;
pub use types::{
    PermissionHost, PermissionId, PermissionStatus, RegistrySnapshot, RegistryStats,
    ResolutionOutcome, ResolvePass, SnapshotEntry,
};
