/*!
 * Shared Registry
 * Mutex-guarded handle for hosts that deliver results on another thread
 */

use super::audit::AuditStats;
use super::channel::ResolutionResult;
use super::registry::PermissionRegistry;
use super::types::{
    PermissionHost, PermissionId, PermissionStatus, RegistrySnapshot, RegistryStats,
    ResolutionOutcome, ResolvePass,
};
use crate::core::config::RegistryConfig;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, thread-safe registry handle
///
/// Host callbacks run with the lock released: `check` may read the handle and
/// `request` may answer through another clone of it.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<PermissionRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::from_registry(PermissionRegistry::new())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self::from_registry(PermissionRegistry::with_config(config))
    }

    pub fn from_registry(registry: PermissionRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn add(&self, id: impl Into<PermissionId>) -> bool {
        self.inner.lock().add(id)
    }

    pub fn add_many<I>(&self, ids: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<PermissionId>,
    {
        self.inner.lock().add_many(ids)
    }

    pub fn query(&self, id: &str) -> PermissionStatus {
        self.inner.lock().query(id)
    }

    pub fn is_granted(&self, id: &str) -> bool {
        self.inner.lock().is_granted(id)
    }

    pub fn resolve<C, R>(&self, mut check: C, request: R) -> ResolvePass
    where
        C: FnMut(&PermissionId) -> PermissionStatus,
        R: FnOnce(&[PermissionId]),
    {
        let pending = self.inner.lock().begin_pass();
        let checked = pending
            .into_iter()
            .map(|id| {
                let status = check(&id);
                (id, status)
            })
            .collect();
        let pass = self.inner.lock().finish_pass(checked);
        if pass.issued_request() {
            request(&pass.requested);
        }
        pass
    }

    pub fn resolve_with<H: PermissionHost + ?Sized>(&self, host: &H) -> ResolvePass {
        self.resolve(|id| host.check(id), |ids| host.request(ids))
    }

    pub fn on_resolution_result<I: AsRef<str>>(
        &self,
        ids: &[I],
        results: &[PermissionStatus],
    ) -> ResolutionOutcome {
        self.inner.lock().on_resolution_result(ids, results)
    }

    pub fn on_request_permissions_result<I: AsRef<str>>(
        &self,
        request_code: i32,
        ids: &[I],
        results: &[PermissionStatus],
    ) -> Option<ResolutionOutcome> {
        self.inner
            .lock()
            .on_request_permissions_result(request_code, ids, results)
    }

    pub fn on_platform_result<I: AsRef<str>>(
        &self,
        request_code: i32,
        ids: &[I],
        codes: &[i32],
    ) -> Option<ResolutionOutcome> {
        self.inner.lock().on_platform_result(request_code, ids, codes)
    }

    pub fn request_code(&self) -> i32 {
        self.inner.lock().request_code()
    }

    pub fn is_locked(&self) -> bool {
        self.inner.lock().is_locked()
    }

    pub fn tracked(&self) -> Vec<PermissionId> {
        self.inner.lock().tracked().to_vec()
    }

    pub fn stats(&self) -> RegistryStats {
        self.inner.lock().stats()
    }

    pub fn audit_stats(&self) -> AuditStats {
        self.inner.lock().audit_stats()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.inner.lock().snapshot()
    }

    /// Forward a platform answer into the registry
    ///
    /// `None` when the answer carries another request code.
    pub fn deliver(&self, result: ResolutionResult) -> Option<ResolutionOutcome> {
        self.on_request_permissions_result(result.request_code, &result.ids, &result.statuses)
    }

    /// Run `f` with exclusive access to the underlying registry
    pub fn with<T>(&self, f: impl FnOnce(&mut PermissionRegistry) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
