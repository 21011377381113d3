/*!
 * Registry property tests
 * Ordering and fail-closed guarantees over generated permission sets
 */

use permission_registry::{PermissionId, PermissionRegistry, PermissionStatus};
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = PermissionStatus> {
    prop_oneof![
        Just(PermissionStatus::Granted),
        Just(PermissionStatus::Denied),
        Just(PermissionStatus::Unknown),
    ]
}

proptest! {
    #[test]
    fn untracked_ids_are_denied(
        tracked in prop::collection::vec("[A-M]{1,4}", 0..8),
        other in "[N-Z]{1,4}",
    ) {
        let mut registry = PermissionRegistry::new();
        registry.add_many(tracked.iter().map(String::as_str));
        registry.resolve(|_| PermissionStatus::Granted, |_| {});

        prop_assert_eq!(registry.query(&other), PermissionStatus::Denied);
    }

    #[test]
    fn request_is_not_granted_subsequence(
        entries in prop::collection::vec(("[A-Z]{1,6}", status_strategy()), 0..12)
    ) {
        let mut registry = PermissionRegistry::new();
        for (id, _) in &entries {
            registry.add(id.as_str());
        }

        // Per-entry answers so duplicates can check differently
        let mut answers = entries.iter().map(|(_, status)| *status);
        let mut batches: Vec<Vec<PermissionId>> = Vec::new();
        registry.resolve(
            |_| answers.next().unwrap_or(PermissionStatus::Denied),
            |batch| batches.push(batch.to_vec()),
        );

        let expected: Vec<PermissionId> = entries
            .iter()
            .filter(|(_, status)| !status.is_granted())
            .map(|(id, _)| PermissionId::from(id.as_str()))
            .collect();

        if expected.is_empty() {
            prop_assert!(batches.is_empty());
        } else {
            prop_assert_eq!(batches, vec![expected]);
        }
    }

    #[test]
    fn query_is_stable(ids in prop::collection::vec("[A-Z]{1,4}", 1..8)) {
        let mut registry = PermissionRegistry::new();
        registry.add_many(ids.iter().map(String::as_str));
        registry.resolve(|id| if id.as_str().len() % 2 == 0 {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }, |_| {});

        for id in &ids {
            let first = registry.query(id);
            prop_assert_eq!(first, registry.query(id));
            prop_assert_ne!(first, PermissionStatus::Unknown);
        }
    }
}
