use std::sync::Arc;
use std::time::Duration;

use crate::service::geolocation::{LocationProvider, resolve_location};
use crate::service::orchestrator::Planner;

/// Resolves the device location, then refreshes the weather for it.
/// Never fails: both steps degrade to a fallback or a log line.
pub async fn run_location_task(
    planner: Planner,
    provider: Option<Arc<dyn LocationProvider>>,
    deadline: Duration,
) {
    let resolution = resolve_location(provider.as_deref(), deadline).await;
    planner.apply_location(resolution).await;
    planner.refresh_weather().await;
}
