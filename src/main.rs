/*!
 * Permission Demo - Main Entry Point
 *
 * Walks one host lifecycle against a simulated platform:
 * - Declares location and Bluetooth permissions
 * - Resolves them, which queues a single consent request
 * - Answers the request from the simulated user on another task
 * - Reports the final status of each permission
 */

use anyhow::Context;
use std::time::Duration;
use tracing::info;

use permission_registry::permissions::{manifest, result_channel, ResolutionResult};
use permission_registry::{
    init_tracing, ChannelHost, PermissionId, PermissionStatus, RegistryConfig, SharedRegistry,
};

/// What the simulated user taps in the consent dialog
fn simulated_choice(id: &PermissionId) -> PermissionStatus {
    if id == manifest::ACCESS_FINE_LOCATION {
        PermissionStatus::Denied
    } else {
        PermissionStatus::Granted
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = RegistryConfig::from_env().context("loading registry configuration")?;
    info!(request_code = config.request_code, "Permission demo starting...");

    let registry = SharedRegistry::with_config(config);
    registry.add_many(manifest::LOCATION);
    registry.add(manifest::BLUETOOTH);

    // Fresh install: nothing granted yet
    let (host, requests) = ChannelHost::for_registry(&registry, |_| PermissionStatus::Denied);
    let (answers, results) = result_channel();

    let platform = tokio::spawn(async move {
        let batch = requests.recv_async().await?;
        info!(count = batch.ids.len(), "Platform showing consent dialog");
        tokio::time::sleep(Duration::from_millis(50)).await;

        let statuses = batch.ids.iter().map(simulated_choice).collect();
        answers.send(ResolutionResult::new(batch.request_code, batch.ids, statuses))
    });

    let pass = registry.resolve_with(&host);
    info!(
        requested = pass.requested.len(),
        granted = pass.granted,
        "Resolve pass complete"
    );

    drop(host);

    if pass.issued_request() {
        let outcome = results
            .deliver_next_async(&registry)
            .await
            .context("waiting for platform answer")?;
        info!(?outcome, "Platform answer applied");
        platform.await.context("platform task panicked")??;
    } else {
        platform.abort();
    }

    for entry in registry.snapshot().entries {
        info!(
            permission = manifest::short_name(entry.id.as_str()),
            status = %registry.query(entry.id.as_str()),
            "Final permission status"
        );
    }

    let snapshot = serde_json::to_string(&registry.snapshot())?;
    info!(%snapshot, "Registry snapshot");

    let stats = registry.stats();
    info!(
        granted = stats.granted,
        denied = stats.denied,
        "Permission demo finished"
    );
    Ok(())
}
