/*!
 * Core Module
 * Shared configuration, limits, and error handling
 */

pub mod config;
pub mod errors;
pub mod limits;

// Re-export for convenience
pub use config::RegistryConfig;
pub use errors::*;
