/*!
 * Permission Registry Integration Tests
 */

use permission_registry::permissions::{manifest, PermissionHost, RegistrySnapshot};
use permission_registry::{PermissionId, PermissionRegistry, PermissionStatus, RegistryConfig};
use pretty_assertions::assert_eq;
use std::cell::RefCell;

/// Platform stand-in: a fixed grant table plus a log of consent requests
struct FakePlatform {
    granted: Vec<&'static str>,
    requests: RefCell<Vec<Vec<PermissionId>>>,
}

impl FakePlatform {
    fn granting(granted: &[&'static str]) -> Self {
        Self {
            granted: granted.to_vec(),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl PermissionHost for FakePlatform {
    fn check(&self, id: &PermissionId) -> PermissionStatus {
        if self.granted.iter().any(|granted| *granted == id.as_str()) {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    fn request(&self, ids: &[PermissionId]) {
        self.requests.borrow_mut().push(ids.to_vec());
    }
}

fn ids(raw: &[&str]) -> Vec<PermissionId> {
    raw.iter().map(|id| PermissionId::from(*id)).collect()
}

#[test]
fn test_end_to_end_location_and_bluetooth() {
    let mut registry = PermissionRegistry::new();
    registry.add_many(["LOCATION_COARSE", "LOCATION_FINE"]);
    registry.add("BLUETOOTH");

    let platform = FakePlatform::granting(&[]);
    let pass = registry.resolve_with(&platform);

    let expected = ids(&["LOCATION_COARSE", "LOCATION_FINE", "BLUETOOTH"]);
    assert_eq!(*platform.requests.borrow(), vec![expected.clone()]);
    assert_eq!(pass.requested, expected);

    registry.on_resolution_result(
        &expected,
        &[
            PermissionStatus::Granted,
            PermissionStatus::Denied,
            PermissionStatus::Granted,
        ],
    );

    assert_eq!(registry.query("LOCATION_COARSE"), PermissionStatus::Granted);
    assert_eq!(registry.query("LOCATION_FINE"), PermissionStatus::Denied);
    assert_eq!(registry.query("BLUETOOTH"), PermissionStatus::Granted);
}

#[test]
fn test_partial_grant_requests_remaining() {
    let mut registry = PermissionRegistry::new();
    registry.add_many(["A", "B", "C"]);

    let platform = FakePlatform::granting(&["A"]);
    registry.resolve_with(&platform);

    assert_eq!(*platform.requests.borrow(), vec![ids(&["B", "C"])]);
    assert_eq!(registry.query("A"), PermissionStatus::Granted);
    assert_eq!(registry.query("B"), PermissionStatus::Denied);
    assert_eq!(registry.query("C"), PermissionStatus::Denied);

    registry.on_resolution_result(
        &["B", "C"],
        &[PermissionStatus::Granted, PermissionStatus::Denied],
    );
    assert_eq!(registry.query("A"), PermissionStatus::Granted);
    assert_eq!(registry.query("B"), PermissionStatus::Granted);
    assert_eq!(registry.query("C"), PermissionStatus::Denied);
}

#[test]
fn test_all_granted_never_prompts() {
    let mut registry = PermissionRegistry::new();
    registry.add_many(manifest::LOCATION);

    let platform = FakePlatform::granting(&manifest::LOCATION);
    let pass = registry.resolve_with(&platform);

    assert!(platform.requests.borrow().is_empty());
    assert_eq!(pass.granted, 2);
    assert!(registry.is_granted(manifest::ACCESS_FINE_LOCATION));
}

#[test]
fn test_callback_order_differs_from_request() {
    let mut registry = PermissionRegistry::new();
    registry.add_many(["A", "B"]);
    registry.resolve_with(&FakePlatform::granting(&[]));

    registry.on_resolution_result(
        &["B", "A"],
        &[PermissionStatus::Granted, PermissionStatus::Denied],
    );
    assert_eq!(registry.query("A"), PermissionStatus::Denied);
    assert_eq!(registry.query("B"), PermissionStatus::Granted);
}

#[test]
fn test_late_add_is_ignored() {
    let mut registry = PermissionRegistry::new();
    registry.add(manifest::CAMERA);
    registry.resolve_with(&FakePlatform::granting(&[manifest::CAMERA]));

    assert!(!registry.add(manifest::RECORD_AUDIO));
    assert_eq!(registry.tracked(), ids(&[manifest::CAMERA]).as_slice());
    assert_eq!(registry.index_of(manifest::RECORD_AUDIO), None);
    assert_eq!(registry.query(manifest::RECORD_AUDIO), PermissionStatus::Denied);
}

#[test]
fn test_duplicate_follows_latest_write() {
    let mut registry = PermissionRegistry::new();
    registry.add("A");
    registry.add("A");
    assert_eq!(registry.tracked().len(), 2);

    let mut batches = Vec::new();
    registry.resolve(|_| PermissionStatus::Denied, |batch| batches.push(batch.to_vec()));
    assert_eq!(batches, vec![ids(&["A", "A"])]);

    registry.on_resolution_result(
        &["A", "A"],
        &[PermissionStatus::Granted, PermissionStatus::Denied],
    );
    assert_eq!(registry.query("A"), PermissionStatus::Denied);
}

#[test]
fn test_platform_codes_with_request_code() {
    let config = RegistryConfig::default().with_request_code(4242);
    let mut registry = PermissionRegistry::with_config(config);
    registry.add_many([manifest::CAMERA, manifest::RECORD_AUDIO]);
    registry.resolve_with(&FakePlatform::granting(&[]));

    let answered = [manifest::CAMERA, manifest::RECORD_AUDIO];
    assert!(registry.on_platform_result(100, &answered, &[0, 0]).is_none());
    assert!(!registry.is_granted(manifest::CAMERA));

    let outcome = registry.on_platform_result(4242, &answered, &[0, -1]).unwrap();
    assert_eq!(outcome.applied, 2);
    assert!(registry.is_granted(manifest::CAMERA));
    assert!(!registry.is_granted(manifest::RECORD_AUDIO));
}

#[test]
fn test_snapshot_serializes_in_insertion_order() {
    let mut registry = PermissionRegistry::new();
    registry.add_many(["B", "A"]);
    registry.resolve_with(&FakePlatform::granting(&["A"]));

    let json = serde_json::to_value(registry.snapshot()).unwrap();
    assert_eq!(json["locked"], true);
    assert_eq!(json["entries"][0]["id"], "B");
    assert_eq!(json["entries"][0]["status"], "denied");
    assert_eq!(json["entries"][1]["position"], 2);
    assert_eq!(json["entries"][1]["status"], "granted");

    let back: RegistrySnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, registry.snapshot());
}
