//! Device location for the CLI front end.
//!
//! A chat transport would deliver device coordinates with the message;
//! the one-shot CLI has none, so `here` queries resolve the machine's
//! approximate position via IP geolocation instead, falling back to
//! Warsaw so the command still answers when the service is down.

use ipgeolocate::{Locator, Service};
use tracing::{error, info};

/// Warsaw city center, in decimal degrees (WGS84).
const FALLBACK: (f64, f64) = (52.2297, 21.0122);

/// Resolves the machine's approximate location via IP geolocation.
///
/// On success returns the reported latitude and longitude; on network or
/// service failure, logs the error and returns the Warsaw fallback.
/// Does not panic: coordinate parse failures also fall back.
pub async fn get_current_location() -> (f64, f64) {
    // Locator::get wants a concrete address; 1.1.1.1 geolocates that
    // resolver, not this machine, so the answer is only approximate.
    match Locator::get("1.1.1.1", Service::IpApi).await {
        Ok(loc) => {
            let lat = loc.latitude.parse::<f64>().unwrap_or(FALLBACK.0);
            let lon = loc.longitude.parse::<f64>().unwrap_or(FALLBACK.1);
            info!("Geolocation successful - ({}, {})", lat, lon);
            (lat, lon)
        }
        Err(e) => {
            error!(
                "Error using geolocation service: {}. Using Warsaw as default location.",
                e
            );
            FALLBACK
        }
    }
}
