/*!
 * Permission Registry
 * Tracks which permissions a host needs and what the platform last said about them
 */

use super::audit::{AuditKind, AuditLog, AuditStats};
use super::types::{
    PermissionHost, PermissionId, PermissionStatus, RegistrySnapshot, RegistryStats,
    ResolutionOutcome, ResolvePass, SnapshotEntry,
};
use crate::core::config::RegistryConfig;
use crate::monitoring::span_resolve;
use ahash::RandomState;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Permission bookkeeping for one host lifecycle
///
/// Identifiers are added while the registry is open. The first resolve pass locks it,
/// snapshots the platform state of every tracked id and hands the ones not yet granted
/// to the platform in a single batch. The platform's answer comes back through
/// [`PermissionRegistry::on_resolution_result`].
///
/// No operation fails: anything the registry cannot vouch for reads as `Denied`.
#[derive(Debug)]
pub struct PermissionRegistry {
    config: RegistryConfig,
    /// Insertion order, duplicates kept
    tracked: Vec<PermissionId>,
    /// 1-based position; a duplicate overwrites the earlier position
    index: HashMap<PermissionId, usize, RandomState>,
    status: HashMap<PermissionId, PermissionStatus, RandomState>,
    locked: bool,
    passes: u32,
    audit: AuditLog,
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let audit = AuditLog::new(config.audit_capacity);
        Self {
            config,
            tracked: Vec::new(),
            index: HashMap::with_hasher(RandomState::new()),
            status: HashMap::with_hasher(RandomState::new()),
            locked: false,
            passes: 0,
            audit,
        }
    }

    /// Track a permission
    ///
    /// Returns `false` and changes nothing once the registry is locked.
    pub fn add(&mut self, id: impl Into<PermissionId>) -> bool {
        let id = id.into();
        if self.locked {
            warn!(permission = %id, "Ignoring permission added after resolve");
            self.audit.record(AuditKind::AddRejected { id });
            return false;
        }

        debug!(permission = %id, "Adding permission");
        self.tracked.push(id.clone());
        let position = self.tracked.len();
        self.index.insert(id.clone(), position);
        self.audit.record(AuditKind::Added {
            id,
            index: position,
        });
        true
    }

    /// Track several permissions in order; returns how many were accepted
    ///
    /// A locked registry skips the whole batch.
    pub fn add_many<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<PermissionId>,
    {
        let mut accepted = 0;
        for id in ids {
            if self.add(id) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Granted or Denied; never Unknown
    pub fn query(&self, id: &str) -> PermissionStatus {
        self.status(id).fail_closed()
    }

    pub fn is_granted(&self, id: &str) -> bool {
        self.query(id).is_granted()
    }

    /// Raw last-known status, `Unknown` when nothing was recorded
    pub fn status(&self, id: &str) -> PermissionStatus {
        self.status.get(id).copied().unwrap_or_default()
    }

    /// Lock the registry, snapshot every tracked permission and request the missing ones
    ///
    /// `request` runs at most once, with the not-granted ids in tracked order.
    /// Meant to be called once; a repeat re-runs the check and may prompt again.
    pub fn resolve<C, R>(&mut self, check: C, request: R) -> ResolvePass
    where
        C: FnMut(&PermissionId) -> PermissionStatus,
        R: FnOnce(&[PermissionId]),
    {
        let pass = self.snapshot_pass(check);
        if pass.issued_request() {
            request(&pass.requested);
        }
        pass
    }

    /// [`resolve`](Self::resolve) against a [`PermissionHost`]
    pub fn resolve_with<H: PermissionHost + ?Sized>(&mut self, host: &H) -> ResolvePass {
        self.resolve(|id| host.check(id), |ids| host.request(ids))
    }

    /// Steps 1-3 of a resolve pass: lock, check, collect
    ///
    /// Records the request in the audit log but leaves issuing it to the caller.
    fn snapshot_pass<C>(&mut self, mut check: C) -> ResolvePass
    where
        C: FnMut(&PermissionId) -> PermissionStatus,
    {
        let pending = self.begin_pass();
        let checked = pending
            .into_iter()
            .map(|id| {
                let status = check(&id);
                (id, status)
            })
            .collect();
        self.finish_pass(checked)
    }

    /// Lock the registry and hand out the ids to check, in tracked order
    ///
    /// Checking happens outside so callers can run it without holding their own locks.
    pub(crate) fn begin_pass(&mut self) -> Vec<PermissionId> {
        if self.locked {
            warn!(
                pass = self.passes + 1,
                "Permissions already resolved, re-running check"
            );
        }
        self.locked = true;
        self.passes += 1;
        info!(
            tracked = self.tracked.len(),
            pass = self.passes,
            "Checking permissions"
        );
        self.tracked.clone()
    }

    /// Record check results from [`begin_pass`](Self::begin_pass) and collect the batch
    pub(crate) fn finish_pass(
        &mut self,
        checked: Vec<(PermissionId, PermissionStatus)>,
    ) -> ResolvePass {
        let span = span_resolve(checked.len(), self.passes);
        let _entered = span.enter();

        let total = checked.len();
        let mut granted = 0;
        let mut requested = Vec::new();
        for (id, status) in checked {
            self.status.insert(id.clone(), status);
            self.audit.record(AuditKind::Checked {
                id: id.clone(),
                status,
            });

            if status.is_granted() {
                debug!(permission = %id, "Permission already granted");
                granted += 1;
            } else {
                debug!(permission = %id, status = %status, "Requesting permission");
                requested.push(id);
            }
        }

        if !requested.is_empty() {
            info!(
                count = requested.len(),
                request_code = self.config.request_code,
                "Requesting permissions from platform"
            );
            self.audit.record(AuditKind::Requested {
                ids: requested.clone(),
            });
        }

        ResolvePass {
            pass: self.passes,
            checked: total,
            granted,
            requested,
        }
    }

    /// Apply the platform's answer to a batched request
    ///
    /// Pairs `ids[i]` with `results[i]` in whatever order the host delivers them. Ids
    /// that were never tracked get a status entry but stay untracked. Surplus ids or
    /// results on either side are dropped.
    pub fn on_resolution_result<I>(
        &mut self,
        ids: &[I],
        results: &[PermissionStatus],
    ) -> ResolutionOutcome
    where
        I: AsRef<str>,
    {
        let mut outcome = ResolutionOutcome::default();
        if ids.len() != results.len() {
            warn!(
                ids = ids.len(),
                results = results.len(),
                "Permission result lengths differ, applying paired prefix"
            );
            outcome.unpaired = ids.len().abs_diff(results.len());
        }

        for (id, &status) in ids.iter().zip(results) {
            let id = PermissionId::from(id.as_ref());
            let tracked = self.index.contains_key(id.as_str());
            if tracked {
                debug!(permission = %id, status = %status, "Permission result");
            } else {
                warn!(permission = %id, status = %status, "Result for untracked permission");
                outcome.untracked += 1;
            }

            self.status.insert(id.clone(), status);
            self.audit.record(AuditKind::ResultApplied {
                id,
                status,
                tracked,
            });
            outcome.applied += 1;
        }
        outcome
    }

    /// Result callback filtered by request code
    ///
    /// Returns `None` without touching any state when the code is not this registry's.
    pub fn on_request_permissions_result<I>(
        &mut self,
        request_code: i32,
        ids: &[I],
        results: &[PermissionStatus],
    ) -> Option<ResolutionOutcome>
    where
        I: AsRef<str>,
    {
        if request_code != self.config.request_code {
            warn!(
                request_code,
                expected = self.config.request_code,
                "Ignoring permission result for foreign request code"
            );
            return None;
        }
        Some(self.on_resolution_result(ids, results))
    }

    /// Result callback with raw platform status codes
    ///
    /// Codes other than the platform's granted code count as denied.
    pub fn on_platform_result<I>(
        &mut self,
        request_code: i32,
        ids: &[I],
        codes: &[i32],
    ) -> Option<ResolutionOutcome>
    where
        I: AsRef<str>,
    {
        let results: Vec<PermissionStatus> = codes
            .iter()
            .map(|&code| PermissionStatus::from_platform_code(code))
            .collect();
        self.on_request_permissions_result(request_code, ids, &results)
    }

    pub fn tracked(&self) -> &[PermissionId] {
        &self.tracked
    }

    /// 1-based position of the latest registration of `id`
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn request_code(&self) -> i32 {
        self.config.request_code
    }

    /// Number of resolve passes run so far
    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn audit_stats(&self) -> AuditStats {
        self.audit.stats()
    }

    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            tracked: 0,
            granted: 0,
            denied: 0,
            unknown: 0,
            locked: self.locked,
        };

        for id in self.distinct_tracked() {
            stats.tracked += 1;
            match self.status(id.as_str()) {
                PermissionStatus::Granted => stats.granted += 1,
                PermissionStatus::Denied => stats.denied += 1,
                PermissionStatus::Unknown => stats.unknown += 1,
            }
        }
        stats
    }

    /// Tracked entries in insertion order, duplicates included
    ///
    /// Each entry carries its own 1-based position; for duplicates only the last
    /// position matches [`index_of`](Self::index_of).
    pub fn snapshot(&self) -> RegistrySnapshot {
        let entries = self
            .tracked
            .iter()
            .enumerate()
            .map(|(offset, id)| SnapshotEntry {
                id: id.clone(),
                position: offset + 1,
                status: self.status(id.as_str()),
            })
            .collect();

        RegistrySnapshot {
            locked: self.locked,
            entries,
        }
    }

    fn distinct_tracked(&self) -> impl Iterator<Item = &PermissionId> {
        let mut seen: HashSet<&PermissionId, RandomState> =
            HashSet::with_hasher(RandomState::new());
        self.tracked.iter().filter(move |id| seen.insert(*id))
    }
}
