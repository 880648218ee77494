use serde::Deserialize;

use crate::error::{PlannerError, PlannerResult};
use crate::models::weather::Coordinates;

pub const DEFAULT_LOOKUP_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

fn coordinates_from(body: IpLookupResponse) -> PlannerResult<Coordinates> {
    if body.status != "success" {
        let reason = body.message.unwrap_or_else(|| body.status.clone());
        return Err(PlannerError::Geolocation(format!("lookup refused: {}", reason)));
    }
    match (body.lat, body.lon) {
        (Some(lat), Some(lng)) => Ok(Coordinates { lat, lng }),
        _ => Err(PlannerError::Geolocation(
            "lookup returned no coordinates".to_string(),
        )),
    }
}

/// Approximates the device position from its public IP address.
pub async fn lookup_ip_location(client: &reqwest::Client, url: &str) -> PlannerResult<Coordinates> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PlannerError::Geolocation(format!(
            "lookup failed with status {}",
            status
        )));
    }
    let body: IpLookupResponse = response.json().await?;
    coordinates_from(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_lookup_carries_reason() {
        let body: IpLookupResponse =
            serde_json::from_str(r#"{"status":"fail","message":"private range"}"#).unwrap();
        let err = coordinates_from(body).unwrap_err();
        assert!(err.to_string().contains("private range"));
    }

    #[test]
    fn successful_lookup_maps_lon_to_lng() {
        let body: IpLookupResponse =
            serde_json::from_str(r#"{"status":"success","lat":30.0,"lon":31.2}"#).unwrap();
        assert_eq!(coordinates_from(body).unwrap(), Coordinates { lat: 30.0, lng: 31.2 });
    }
}
