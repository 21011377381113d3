/*!
 * Channel Host
 * Message-passing adapter between the registry and an asynchronous platform
 *
 * The registry side hands out `RequestBatch` messages; the platform side answers
 * with `ResolutionResult` messages that are forwarded back into the registry.
 */

use super::shared::SharedRegistry;
use super::types::{PermissionHost, PermissionId, PermissionStatus, ResolutionOutcome};
use crate::core::errors::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Batched consent request sent to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBatch {
    pub request_code: i32,
    pub ids: Vec<PermissionId>,
}

/// Platform answer to a `RequestBatch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub request_code: i32,
    pub ids: Vec<PermissionId>,
    pub statuses: Vec<PermissionStatus>,
}

impl ResolutionResult {
    pub fn new(request_code: i32, ids: Vec<PermissionId>, statuses: Vec<PermissionStatus>) -> Self {
        Self {
            request_code,
            ids,
            statuses,
        }
    }

    /// Answer every id in `batch` with the same status
    pub fn uniform(batch: &RequestBatch, status: PermissionStatus) -> Self {
        Self::new(
            batch.request_code,
            batch.ids.clone(),
            vec![status; batch.ids.len()],
        )
    }
}

type Checker = Box<dyn Fn(&PermissionId) -> PermissionStatus + Send + Sync>;

/// `PermissionHost` that checks synchronously and requests over a channel
pub struct ChannelHost {
    checker: Checker,
    request_code: i32,
    requests: flume::Sender<RequestBatch>,
}

impl ChannelHost {
    /// Create a host and the receiving end the platform side listens on
    pub fn new<F>(request_code: i32, checker: F) -> (Self, RequestReceiver)
    where
        F: Fn(&PermissionId) -> PermissionStatus + Send + Sync + 'static,
    {
        let (tx, rx) = flume::unbounded();
        let host = Self {
            checker: Box::new(checker),
            request_code,
            requests: tx,
        };
        (host, RequestReceiver { requests: rx })
    }

    /// Host bound to a shared registry's request code
    pub fn for_registry<F>(registry: &SharedRegistry, checker: F) -> (Self, RequestReceiver)
    where
        F: Fn(&PermissionId) -> PermissionStatus + Send + Sync + 'static,
    {
        Self::new(registry.request_code(), checker)
    }
}

impl PermissionHost for ChannelHost {
    fn check(&self, id: &PermissionId) -> PermissionStatus {
        (self.checker)(id)
    }

    fn request(&self, ids: &[PermissionId]) {
        let batch = RequestBatch {
            request_code: self.request_code,
            ids: ids.to_vec(),
        };
        // Fire-and-forget: a vanished platform leaves the checked statuses in place
        if self.requests.send(batch).is_err() {
            warn!(count = ids.len(), "Permission request dropped, platform receiver closed");
        } else {
            debug!(count = ids.len(), "Permission request queued");
        }
    }
}

/// Platform side of the request channel
pub struct RequestReceiver {
    requests: flume::Receiver<RequestBatch>,
}

impl RequestReceiver {
    pub fn try_recv(&self) -> Option<RequestBatch> {
        self.requests.try_recv().ok()
    }

    pub fn recv(&self) -> RegistryResult<RequestBatch> {
        self.requests.recv().map_err(|_| RegistryError::ChannelClosed)
    }

    pub async fn recv_async(&self) -> RegistryResult<RequestBatch> {
        self.requests
            .recv_async()
            .await
            .map_err(|_| RegistryError::ChannelClosed)
    }
}

/// Sender the platform side uses to deliver answers
#[derive(Clone)]
pub struct ResultSender {
    results: flume::Sender<ResolutionResult>,
}

impl ResultSender {
    pub fn send(&self, result: ResolutionResult) -> RegistryResult<()> {
        self.results
            .send(result)
            .map_err(|_| RegistryError::ChannelClosed)
    }
}

/// Registry side of the result channel
pub struct ResultReceiver {
    results: flume::Receiver<ResolutionResult>,
}

impl ResultReceiver {
    /// Wait for the next answer and apply it to `registry`
    pub fn deliver_next(
        &self,
        registry: &SharedRegistry,
    ) -> RegistryResult<Option<ResolutionOutcome>> {
        let result = self.results.recv().map_err(|_| RegistryError::ChannelClosed)?;
        Ok(registry.deliver(result))
    }

    pub async fn deliver_next_async(
        &self,
        registry: &SharedRegistry,
    ) -> RegistryResult<Option<ResolutionOutcome>> {
        let result = self
            .results
            .recv_async()
            .await
            .map_err(|_| RegistryError::ChannelClosed)?;
        Ok(registry.deliver(result))
    }

    /// Apply every answer already waiting; returns how many were applied
    pub fn drain(&self, registry: &SharedRegistry) -> usize {
        self.results
            .try_iter()
            .filter_map(|result| registry.deliver(result))
            .count()
    }
}

/// Channel the platform side answers on
pub fn result_channel() -> (ResultSender, ResultReceiver) {
    let (tx, rx) = flume::unbounded();
    (ResultSender { results: tx }, ResultReceiver { results: rx })
}
