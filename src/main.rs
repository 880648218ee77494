#![allow(non_snake_case)]

use std::env;
use std::process;
use std::sync::Arc;

use dayPlanner::cli;
use dayPlanner::config::{AppConfig, GeolocationMode, RunMode, Settings};
use dayPlanner::runtime;
use dayPlanner::service::generation_service::GeminiService;
use dayPlanner::service::geolocation::{FixedLocation, IpLocationProvider, LocationProvider};
use dayPlanner::service::orchestrator::Planner;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            warn!(%path, error = %err, "unable to read config file, using environment only");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };

    let settings = match Settings::from_config(&config) {
        Ok(settings) => settings,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    let generator = Arc::new(GeminiService::new(
        settings.api_key.clone(),
        settings.base_url.clone(),
    ));
    let planner = Planner::new(generator, settings.planner.clone());

    let location: Option<Arc<dyn LocationProvider>> = match &settings.geolocation {
        GeolocationMode::Ip { url } => Some(Arc::new(IpLocationProvider::new(url.clone()))),
        GeolocationMode::Fixed(coordinates) => Some(Arc::new(FixedLocation::new(*coordinates))),
        GeolocationMode::Off => None,
    };

    match settings.run_mode {
        RunMode::Api => {
            runtime::run_api(
                planner,
                location,
                settings.geolocation_timeout,
                settings.bind_addr,
            )
            .await
        }
        RunMode::Cli => cli::cli(planner, location, settings.geolocation_timeout).await,
    }
}
