//! Best-effort resolution of the client's coordinates.
//!
//! Looks the public IP up against ip-api.com, which needs no API key.
//! Failures never block the chat: the webhook simply receives no fallback
//! coordinate and weather queries then need an explicit place.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use weatherbot_core::Coordinate;

const GEO_URL: &str = "http://ip-api.com/json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Look up the coordinates of the caller's public IP address. Returns
/// `None` on any failure.
pub async fn current_location() -> Option<Coordinate> {
    fetch_from(GEO_URL).await
}

async fn fetch_from(url: &str) -> Option<Coordinate> {
    let client = match Client::builder().timeout(REQUEST_TIMEOUT).build() {
        Ok(client) => client,
        Err(err) => {
            debug!("Failed to build geolocation client: {err}");
            return None;
        }
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(err) => {
            debug!("Geolocation request failed: {err}");
            return None;
        }
    };

    if !response.status().is_success() {
        debug!("Geolocation request returned status {}", response.status());
        return None;
    }

    let body: GeoIpResponse = match response.json().await {
        Ok(body) => body,
        Err(err) => {
            debug!("Failed to parse geolocation response: {err}");
            return None;
        }
    };

    if body.status != "success" {
        debug!("Geolocation lookup unsuccessful: {}", body.status);
        return None;
    }

    let latitude = body.lat?;
    let longitude = body.lon?;

    debug!("Resolved client location: {latitude}, {longitude}");
    Some(Coordinate { latitude, longitude })
}
