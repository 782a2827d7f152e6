//! Query orchestration.
//!
//! The three query shapes all converge on "resolve a station id, then
//! aggregate and format". This module is the only place internal
//! failures are translated into user-facing text; the transport layer
//! never observes an internal error type.

use crate::format;
use crate::gateway::{Gateway, GatewayError};
use crate::models::Station;
use crate::readings::{self, AggregateError};
use crate::stations::{self, ValidationError};
use thiserror::Error;
use tracing::{info, warn};

/// One incoming query intent from the transport layer. Ids and
/// coordinates arrive as raw text and are parsed here, before any
/// network traffic happens.
#[derive(Debug, Clone)]
pub enum Query {
    ById(String),
    ByCoordinates(String, String),
    ByDeviceLocation(f64, f64),
}

pub const MSG_WRONG_ID: &str = "wrong id";
pub const MSG_WRONG_LOCATION: &str = "wrong location";
pub const MSG_TRY_LATER: &str = "try again later";
pub const MSG_UNKNOWN: &str = "unknown problem";
pub const MSG_EMPTY: &str = "readings are empty";

#[derive(Debug, Error)]
enum QueryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error("station catalog is empty")]
    EmptyCatalog,
}

/// Answers one query with the exact string the user should see.
pub async fn answer(gw: &Gateway, query: Query) -> String {
    match run(gw, query).await {
        Ok(text) => text,
        Err(err) => {
            warn!("query failed: {err}");
            user_text(&err).to_string()
        }
    }
}

/// The `stations` listing, with the same failure mapping as queries.
pub async fn catalog_listing(gw: &Gateway) -> String {
    match stations::fetch_all_stations(gw).await {
        Ok(catalog) => stations::format_catalog(&catalog),
        Err(err) => {
            warn!("catalog listing failed: {err}");
            user_text(&QueryError::Aggregate(err.into())).to_string()
        }
    }
}

async fn run(gw: &Gateway, query: Query) -> Result<String, QueryError> {
    match query {
        Query::ById(raw) => {
            let id = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::BadId(raw.clone()))?;
            let catalog = stations::fetch_all_stations(gw).await.map_err(AggregateError::from)?;
            reply(gw, &catalog, id, None).await
        }
        Query::ByCoordinates(raw_lat, raw_lon) => {
            let (lat, lon) = parse_coordinates(&raw_lat, &raw_lon)?;
            nearest_reply(gw, lat, lon).await
        }
        Query::ByDeviceLocation(lat, lon) => {
            stations::validate_coordinates(lat, lon)?;
            nearest_reply(gw, lat, lon).await
        }
    }
}

async fn nearest_reply(gw: &Gateway, lat: f64, lon: f64) -> Result<String, QueryError> {
    let catalog = stations::fetch_all_stations(gw).await.map_err(AggregateError::from)?;
    let (id, distance_km) =
        stations::resolve_nearest(&catalog, lat, lon).ok_or(QueryError::EmptyCatalog)?;
    info!("nearest station to ({lat}, {lon}) is {id} at {distance_km:.2} km");
    reply(gw, &catalog, id, Some(distance_km)).await
}

async fn reply(
    gw: &Gateway,
    catalog: &[Station],
    station_id: i64,
    distance_km: Option<f64>,
) -> Result<String, QueryError> {
    let snapshot = readings::aggregate(gw, catalog, station_id).await?;
    // Degenerate success: a snapshot with nothing in it is reported as
    // such, not as a failure.
    if snapshot.entries.is_empty() {
        return Ok(MSG_EMPTY.to_string());
    }

    let mut text = snapshot.station_name.clone();
    text.push('\n');
    if let Some(km) = distance_km {
        text.push_str(&format!("distance: {km:.2} km\n"));
    }
    text.push_str(&format::format_readings(&snapshot.entries));
    Ok(text)
}

fn parse_coordinates(raw_lat: &str, raw_lon: &str) -> Result<(f64, f64), ValidationError> {
    let lat = raw_lat
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::BadCoordinate(raw_lat.to_string()))?;
    let lon = raw_lon
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::BadCoordinate(raw_lon.to_string()))?;
    stations::validate_coordinates(lat, lon)?;
    Ok((lat, lon))
}

fn user_text(err: &QueryError) -> &'static str {
    match err {
        QueryError::Validation(ValidationError::BadId(_)) => MSG_WRONG_ID,
        QueryError::Validation(_) => MSG_WRONG_LOCATION,
        QueryError::Aggregate(AggregateError::NotFound(_))
        | QueryError::Aggregate(AggregateError::NoSensors(_)) => MSG_WRONG_ID,
        QueryError::Aggregate(AggregateError::Gateway(GatewayError::Request(_))) => MSG_TRY_LATER,
        QueryError::Aggregate(AggregateError::Gateway(GatewayError::Unknown(_))) => MSG_UNKNOWN,
        QueryError::EmptyCatalog => MSG_UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A gateway pointing nowhere; tests that reach it would fail, so it
    // doubles as proof that validation short-circuits before the network.
    fn dead_gateway() -> Gateway {
        Gateway::new("http://127.0.0.1:9".to_string(), None)
    }

    #[tokio::test]
    async fn non_numeric_id_fails_before_any_network_call() {
        let reply = answer(&dead_gateway(), Query::ById("abcd".to_string())).await;
        assert_eq!(reply, MSG_WRONG_ID);
    }

    #[tokio::test]
    async fn non_numeric_coordinates_fail_before_any_network_call() {
        let query = Query::ByCoordinates("fifty".to_string(), "18.0".to_string());
        assert_eq!(answer(&dead_gateway(), query).await, MSG_WRONG_LOCATION);
    }

    #[tokio::test]
    async fn out_of_range_coordinates_fail_before_any_network_call() {
        let query = Query::ByCoordinates("54.35".to_string(), "118.0".to_string());
        assert_eq!(answer(&dead_gateway(), query).await, MSG_WRONG_LOCATION);

        let query = Query::ByDeviceLocation(-90.5, 18.0);
        assert_eq!(answer(&dead_gateway(), query).await, MSG_WRONG_LOCATION);
    }

    #[tokio::test]
    async fn gateway_failure_maps_to_try_again_later() {
        // Valid input, dead endpoint: the catalog fetch's connection
        // error must surface as the transport-failure message.
        let reply = answer(&dead_gateway(), Query::ById("10955".to_string())).await;
        assert_eq!(reply, MSG_TRY_LATER);
    }

    #[test]
    fn failure_kinds_map_to_fixed_user_text() {
        assert_eq!(
            user_text(&QueryError::Aggregate(AggregateError::NotFound(9999))),
            MSG_WRONG_ID
        );
        assert_eq!(
            user_text(&QueryError::Aggregate(AggregateError::NoSensors(117))),
            MSG_WRONG_ID
        );
        assert_eq!(
            user_text(&QueryError::Aggregate(AggregateError::Gateway(
                GatewayError::Unknown("boom".to_string())
            ))),
            MSG_UNKNOWN
        );
        assert_eq!(
            user_text(&QueryError::Validation(ValidationError::OutOfRange(118.0))),
            MSG_WRONG_LOCATION
        );
        assert_eq!(user_text(&QueryError::EmptyCatalog), MSG_UNKNOWN);
    }
}
