/*!
 * Permission Audit Trail
 * Bounded record of registry lifecycle events for diagnostics
 */

use crate::core::limits::MAX_AUDIT_CAPACITY;
use crate::permissions::types::{PermissionId, PermissionStatus};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::collections::VecDeque;
use std::time::SystemTime;
use tracing::warn;

/// Lifecycle event kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AuditKind {
    /// Identifier appended before the lock
    Added { id: PermissionId, index: usize },
    /// Identifier offered after the lock and dropped
    AddRejected { id: PermissionId },
    /// Status snapshot taken during a resolve pass
    Checked {
        id: PermissionId,
        status: PermissionStatus,
    },
    /// Batched platform request issued
    Requested { ids: Vec<PermissionId> },
    /// Status written from a result callback
    ResultApplied {
        id: PermissionId,
        status: PermissionStatus,
        tracked: bool,
    },
}

/// Permission audit event
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditEvent {
    #[serde(flatten)]
    pub kind: AuditKind,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub logged_at: SystemTime,
}

impl AuditEvent {
    pub fn new(kind: AuditKind) -> Self {
        Self {
            kind,
            logged_at: SystemTime::now(),
        }
    }
}

/// Ring buffer of audit events
#[derive(Debug, Clone)]
pub struct AuditLog {
    events: VecDeque<AuditEvent>,
    capacity: usize,
    total_events: u64,
    total_rejections: u64,
    total_requests: u64,
}

impl AuditLog {
    /// Capacity is clamped to `1..=MAX_AUDIT_CAPACITY`
    pub fn new(capacity: usize) -> Self {
        let clamped = capacity.clamp(1, MAX_AUDIT_CAPACITY);
        if clamped != capacity {
            warn!(
                requested = capacity,
                capacity = clamped,
                "Audit capacity out of range, clamping"
            );
        }
        let capacity = clamped;
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            total_events: 0,
            total_rejections: 0,
            total_requests: 0,
        }
    }

    /// Record an event, evicting the oldest when full
    pub fn record(&mut self, kind: AuditKind) {
        match &kind {
            AuditKind::AddRejected { .. } => self.total_rejections += 1,
            AuditKind::Requested { .. } => self.total_requests += 1,
            _ => {}
        }

        if self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(AuditEvent::new(kind));
        self.total_events += 1;
    }

    /// Most recent events, newest first
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        self.events.iter().rev().take(limit).cloned().collect()
    }

    /// Events still held for one identifier, oldest first
    pub fn for_id(&self, id: &str) -> Vec<AuditEvent> {
        self.events
            .iter()
            .filter(|event| match &event.kind {
                AuditKind::Added { id: e, .. }
                | AuditKind::AddRejected { id: e }
                | AuditKind::Checked { id: e, .. }
                | AuditKind::ResultApplied { id: e, .. } => e == id,
                AuditKind::Requested { ids } => ids.iter().any(|e| e == id),
            })
            .cloned()
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn stats(&self) -> AuditStats {
        AuditStats {
            retained_events: self.events.len(),
            total_events: self.total_events,
            total_rejections: self.total_rejections,
            total_requests: self.total_requests,
        }
    }
}

/// Audit statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStats {
    pub retained_events: usize,
    pub total_events: u64,
    pub total_rejections: u64,
    pub total_requests: u64,
}
