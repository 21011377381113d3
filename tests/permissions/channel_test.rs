/*!
 * Channel Host Integration Tests
 * Asynchronous request/answer flow between a shared registry and a platform task
 */

use permission_registry::permissions::{manifest, result_channel, ResolutionResult};
use permission_registry::{ChannelHost, PermissionStatus, SharedRegistry};
use std::time::Duration;

#[tokio::test]
async fn test_async_platform_round_trip() {
    let registry = SharedRegistry::new();
    registry.add_many(manifest::LOCATION);
    registry.add(manifest::BLUETOOTH);

    let (host, requests) = ChannelHost::for_registry(&registry, |_| PermissionStatus::Denied);
    let (answers, results) = result_channel();

    let platform = tokio::spawn(async move {
        let batch = requests.recv_async().await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let statuses = vec![
            PermissionStatus::Granted,
            PermissionStatus::Denied,
            PermissionStatus::Granted,
        ];
        answers
            .send(ResolutionResult::new(batch.request_code, batch.ids, statuses))
            .unwrap();
    });

    let pass = registry.resolve_with(&host);
    assert_eq!(pass.requested.len(), 3);

    // Nothing answered yet
    assert_eq!(registry.query(manifest::BLUETOOTH), PermissionStatus::Denied);

    let outcome = results.deliver_next_async(&registry).await.unwrap().unwrap();
    platform.await.unwrap();

    assert_eq!(outcome.applied, 3);
    assert!(registry.is_granted(manifest::ACCESS_COARSE_LOCATION));
    assert!(!registry.is_granted(manifest::ACCESS_FINE_LOCATION));
    assert!(registry.is_granted(manifest::BLUETOOTH));
}

#[tokio::test]
async fn test_late_add_while_request_pending() {
    let registry = SharedRegistry::new();
    registry.add(manifest::CAMERA);

    let (host, requests) = ChannelHost::for_registry(&registry, |_| PermissionStatus::Denied);
    registry.resolve_with(&host);
    let batch = requests.recv_async().await.unwrap();

    assert!(!registry.add(manifest::RECORD_AUDIO));

    let answer = ResolutionResult::uniform(&batch, PermissionStatus::Granted);
    assert!(registry.deliver(answer).is_some());
    assert!(registry.is_granted(manifest::CAMERA));
    assert!(!registry.is_granted(manifest::RECORD_AUDIO));
    assert_eq!(registry.tracked().len(), 1);
}

#[test]
fn test_answer_from_platform_thread() {
    let registry = SharedRegistry::new();
    registry.add_many(["A", "B"]);

    let (host, requests) = ChannelHost::for_registry(&registry, |_| PermissionStatus::Denied);
    let (answers, results) = result_channel();

    let platform = std::thread::spawn(move || {
        let batch = requests.recv().unwrap();
        answers
            .send(ResolutionResult::uniform(&batch, PermissionStatus::Granted))
            .unwrap();
    });

    registry.resolve_with(&host);
    results.deliver_next(&registry).unwrap();
    platform.join().unwrap();

    assert_eq!(registry.stats().granted, 2);
    assert_eq!(registry.audit_stats().total_requests, 1);
}
