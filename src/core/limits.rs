/*!
 * Registry Limits and Constants
 *
 * Centralized location for request codes, platform status codes, and buffer sizes.
 */

// =============================================================================
// PLATFORM REQUEST
// =============================================================================

/// Request code attached to the single batched permission request
/// Result callbacks carrying any other code belong to someone else and are ignored
pub const DEFAULT_REQUEST_CODE: i32 = 100;

/// Platform status code for a granted permission (Android `PERMISSION_GRANTED`)
pub const PLATFORM_GRANTED: i32 = 0;

/// Platform status code for a denied permission (Android `PERMISSION_DENIED`)
pub const PLATFORM_DENIED: i32 = -1;

// =============================================================================
// AUDIT
// =============================================================================

/// Default number of lifecycle events kept in the in-memory audit ring
pub const DEFAULT_AUDIT_CAPACITY: usize = 1024;

/// Upper bound accepted for a configured audit capacity
/// Keeps a misconfigured host from reserving an unbounded buffer at startup
pub const MAX_AUDIT_CAPACITY: usize = 64 * 1024;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Overrides the request code used for the batched platform request
pub const ENV_REQUEST_CODE: &str = "PERMISSION_REQUEST_CODE";

/// Overrides the audit ring capacity
pub const ENV_AUDIT_CAPACITY: &str = "PERMISSION_AUDIT_CAPACITY";

/// Switches tracing output to JSON when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "PERMISSION_TRACE_JSON";
