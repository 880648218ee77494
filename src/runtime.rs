use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::events::queue::EventBus;
use crate::events::worker::run_view_worker;
use crate::handlers::web;
use crate::service::geolocation::LocationProvider;
use crate::service::orchestrator::Planner;
use crate::tasks::location_task::run_location_task;
use crate::tasks::task_runner::TaskRunner;

/// Serves the planner over HTTP. The initial load and the location/weather
/// chain run in the background so the state endpoint answers `loading`
/// right away.
pub async fn run_api(
    planner: Planner,
    location: Option<Arc<dyn LocationProvider>>,
    geolocation_timeout: Duration,
    bind_addr: SocketAddr,
) {
    let (bus, rx) = EventBus::new(32);

    let mut task_runner = TaskRunner::new();
    task_runner.add_task("view_worker", run_view_worker(rx, planner.clone()));
    task_runner.add_task("initial_load", {
        let planner = planner.clone();
        async move {
            if let Err(err) = planner.initial_load().await {
                error!(error = %err, "initial load failed");
            }
        }
    });
    task_runner.add_task(
        "location",
        run_location_task(planner.clone(), location, geolocation_timeout),
    );
    task_runner.start_all();

    info!(%bind_addr, "serving planner");
    warp::serve(web::routes(planner, bus)).run(bind_addr).await;
}
