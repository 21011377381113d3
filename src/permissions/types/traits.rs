/*!
 * Permission Traits
 * Seam between the registry and the host platform
 */

use super::core::{PermissionId, PermissionStatus};

/// Host platform primitives the registry resolves against
#[cfg_attr(test, mockall::automock)]
pub trait PermissionHost {
    /// Synchronous query of the current OS-level state for one permission
    fn check(&self, id: &PermissionId) -> PermissionStatus;

    /// Present the consent UI for a batch; the answer arrives later through the
    /// registry's result callback
    fn request(&self, ids: &[PermissionId]);
}

impl<T: PermissionHost + ?Sized> PermissionHost for &T {
    fn check(&self, id: &PermissionId) -> PermissionStatus {
        (**self).check(id)
    }

    fn request(&self, ids: &[PermissionId]) {
        (**self).request(ids)
    }
}
