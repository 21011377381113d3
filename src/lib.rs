/*!
 * Permission Registry Library
 * Runtime permission state tracking exposed as a library
 */

pub mod core;
pub mod monitoring;
pub mod permissions;

// Re-exports
pub use crate::core::{RegistryConfig, RegistryError, RegistryResult};
pub use monitoring::init_tracing;
pub use permissions::{
    ChannelHost, PermissionHost, PermissionId, PermissionRegistry, PermissionStatus,
    SharedRegistry,
};
