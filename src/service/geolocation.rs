use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::clients::geolocation_client;
use crate::error::PlannerResult;
use crate::models::weather::Coordinates;

/// New Damietta, Egypt.
pub const DEFAULT_LOCATION: Coordinates = Coordinates {
    lat: 31.4167,
    lng: 31.8167,
};
const DEFAULT_LOCATION_NAME: &str = "New Damietta, Egypt";

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> PlannerResult<Coordinates>;
}

pub struct FixedLocation {
    coordinates: Coordinates,
}

impl FixedLocation {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> PlannerResult<Coordinates> {
        Ok(self.coordinates)
    }
}

pub struct IpLocationProvider {
    client: reqwest::Client,
    url: String,
}

impl IpLocationProvider {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl LocationProvider for IpLocationProvider {
    async fn current_position(&self) -> PlannerResult<Coordinates> {
        geolocation_client::lookup_ip_location(&self.client, &self.url).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationResolution {
    pub coordinates: Coordinates,
    /// Set whenever the fallback coordinate was used.
    pub advisory: Option<String>,
}

impl LocationResolution {
    fn fallback(advisory: String) -> Self {
        Self {
            coordinates: DEFAULT_LOCATION,
            advisory: Some(advisory),
        }
    }
}

/// Best-effort position lookup. Any failure, including the deadline passing,
/// falls back to the fixed default coordinate.
pub async fn resolve_location(
    provider: Option<&dyn LocationProvider>,
    deadline: Duration,
) -> LocationResolution {
    let Some(provider) = provider else {
        warn!("geolocation not supported, using default location");
        return LocationResolution::fallback(format!(
            "Geolocation not supported. Using default location ({}).",
            DEFAULT_LOCATION_NAME
        ));
    };

    let cause = match tokio::time::timeout(deadline, provider.current_position()).await {
        Ok(Ok(coordinates)) => {
            info!(lat = coordinates.lat, lng = coordinates.lng, "resolved device location");
            return LocationResolution {
                coordinates,
                advisory: None,
            };
        }
        Ok(Err(err)) => err.to_string(),
        Err(_) => format!("timed out after {}ms", deadline.as_millis()),
    };

    warn!(%cause, "geolocation access failed, using default location");
    LocationResolution::fallback(format!(
        "Geolocation access failed: {}. Using default location ({}).",
        cause, DEFAULT_LOCATION_NAME
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_provider_resolves_without_advisory() {
        let here = Coordinates { lat: 30.05, lng: 31.23 };
        let provider = FixedLocation::new(here);
        let resolution = resolve_location(Some(&provider), Duration::from_secs(1)).await;
        assert_eq!(resolution.coordinates, here);
        assert!(resolution.advisory.is_none());
    }

    #[tokio::test]
    async fn missing_provider_falls_back() {
        let resolution = resolve_location(None, Duration::from_secs(1)).await;
        assert_eq!(resolution.coordinates, DEFAULT_LOCATION);
        assert!(resolution.advisory.unwrap().contains("not supported"));
    }
}
