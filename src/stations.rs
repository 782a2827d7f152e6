//! Station catalog fetch and resolution.
//!
//! The catalog is fetched fresh per query and lives only as long as the
//! query that asked for it. Resolution is either exact (id → name) or
//! spatial (coordinates → nearest station by great-circle distance).

use crate::gateway::{Gateway, GatewayError};
use crate::models::{Station, StationPayload};
use thiserror::Error;

const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Rejected user input, raised before any network call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("station id is not a number: {0}")]
    BadId(String),
    #[error("coordinate is not a number: {0}")]
    BadCoordinate(String),
    #[error("coordinate out of range: {0}")]
    OutOfRange(f64),
}

/// Full station catalog. An empty catalog is a valid result, distinct
/// from a gateway failure.
pub async fn fetch_all_stations(gw: &Gateway) -> Result<Vec<Station>, GatewayError> {
    let payload: Vec<StationPayload> = gw.get_json("station/findAll").await?;
    Ok(payload.into_iter().map(Station::from).collect())
}

/// Resolves a station id to its name. Zero matches and multiple matches
/// both mean the id cannot be trusted, so both resolve to `None`.
pub fn resolve_name(stations: &[Station], id: i64) -> Option<String> {
    let mut matches = stations.iter().filter(|s| s.id == id);
    match (matches.next(), matches.next()) {
        (Some(station), None) => Some(station.name.clone()),
        _ => None,
    }
}

/// Station closest to `(lat, lon)` with its distance in km. Ties go to
/// the earliest catalog entry. `None` only for an empty catalog.
pub fn resolve_nearest(stations: &[Station], lat: f64, lon: f64) -> Option<(i64, f64)> {
    stations
        .iter()
        .map(|s| (s.id, great_circle_km(lat, lon, s.lat, s.lon)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Both components must lie in [-90, 90]. Longitude shares latitude's
/// bound to match the deployed service's behavior.
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), ValidationError> {
    for component in [lat, lon] {
        if !(-90.0..=90.0).contains(&component) {
            return Err(ValidationError::OutOfRange(component));
        }
    }
    Ok(())
}

/// `"<name> id: <id>"` entries for every station, joined by `" | "`.
pub fn format_catalog(stations: &[Station]) -> String {
    stations
        .iter()
        .map(|s| format!("{} id: {}", s.name, s.id))
        .collect::<Vec<_>>()
        .join(" | ")
}

// Haversine on a spherical Earth of mean radius.
fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: i64, name: &str, lat: f64, lon: f64) -> Station {
        Station {
            id,
            name: name.to_string(),
            lat,
            lon,
        }
    }

    #[test]
    fn resolve_name_finds_unique_match() {
        let catalog = vec![
            station(10955, "Station A", 54.0, 18.0),
            station(117, "Station B", 52.0, 21.0),
        ];
        assert_eq!(resolve_name(&catalog, 117), Some("Station B".to_string()));
    }

    #[test]
    fn resolve_name_misses_absent_id() {
        let catalog = vec![station(10955, "Station A", 54.0, 18.0)];
        assert_eq!(resolve_name(&catalog, 9999), None);
    }

    #[test]
    fn resolve_name_treats_duplicate_ids_as_not_found() {
        let catalog = vec![
            station(117, "Station B", 52.0, 21.0),
            station(117, "Station B again", 50.0, 19.0),
        ];
        assert_eq!(resolve_name(&catalog, 117), None);
    }

    #[test]
    fn resolve_nearest_picks_the_minimum_distance() {
        let catalog = vec![
            station(1, "Gdansk", 54.352, 18.646),
            station(2, "Warszawa", 52.2297, 21.0122),
            station(3, "Krakow", 50.0647, 19.945),
        ];
        // Query point just outside Warszawa.
        let (id, km) = resolve_nearest(&catalog, 52.25, 21.0).unwrap();
        assert_eq!(id, 2);
        assert!(km < 5.0);
    }

    #[test]
    fn resolve_nearest_breaks_ties_by_catalog_order() {
        // Two stations symmetric about the query point.
        let catalog = vec![
            station(7, "East", 50.0, 20.5),
            station(8, "West", 50.0, 19.5),
        ];
        let (id, _) = resolve_nearest(&catalog, 50.0, 20.0).unwrap();
        assert_eq!(id, 7);
    }

    #[test]
    fn resolve_nearest_on_empty_catalog() {
        assert_eq!(resolve_nearest(&[], 52.0, 21.0), None);
    }

    #[test]
    fn great_circle_distance_is_plausible() {
        // Gdansk to Warszawa is roughly 284 km.
        let km = great_circle_km(54.352, 18.646, 52.2297, 21.0122);
        assert!((280.0..290.0).contains(&km), "got {km}");
    }

    #[test]
    fn great_circle_distance_to_self_is_zero() {
        assert_eq!(great_circle_km(52.0, 21.0, 52.0, 21.0), 0.0);
    }

    #[test]
    fn coordinates_at_the_boundary_are_accepted() {
        assert!(validate_coordinates(90.0, -90.0).is_ok());
        assert!(validate_coordinates(-90.0, 90.0).is_ok());
    }

    #[test]
    fn coordinates_just_outside_the_boundary_are_rejected() {
        assert_eq!(
            validate_coordinates(90.0001, 0.0),
            Err(ValidationError::OutOfRange(90.0001))
        );
        assert_eq!(
            validate_coordinates(0.0, -90.0001),
            Err(ValidationError::OutOfRange(-90.0001))
        );
    }

    #[test]
    fn catalog_listing_format() {
        let catalog = vec![
            station(10955, "Station A", 54.0, 18.0),
            station(117, "Station B", 52.0, 21.0),
        ];
        assert_eq!(
            format_catalog(&catalog),
            "Station A id: 10955 | Station B id: 117"
        );
    }
}
