//! Per-station reading aggregation.
//!
//! Given a station id already validated against the catalog, fetches the
//! station's sensors and each sensor's latest reading, and assembles one
//! [`Snapshot`]. Any single upstream failure aborts the whole
//! aggregation; partial snapshots are never produced.

use crate::gateway::{Gateway, GatewayError};
use crate::models::{DataPayload, Reading, Sensor, SensorPayload, Snapshot, Station};
use crate::stations;
use futures::future::try_join_all;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// Id has no (or no unique) match in the catalog.
    #[error("station {0} not in catalog")]
    NotFound(i64),
    /// The provider answered `[]` on the sensors endpoint, which is what
    /// it does for unknown ids rather than returning an error.
    #[error("no sensors for station {0}")]
    NoSensors(i64),
}

/// Sensors of one station. An empty provider response is surfaced as
/// [`AggregateError::NoSensors`], not as a station with zero sensors.
pub async fn fetch_sensors(gw: &Gateway, station_id: i64) -> Result<Vec<Sensor>, AggregateError> {
    let payload: Vec<SensorPayload> = gw
        .get_json(&format!("station/sensors/{station_id}"))
        .await?;
    if payload.is_empty() {
        return Err(AggregateError::NoSensors(station_id));
    }
    Ok(payload.into_iter().map(Sensor::from).collect())
}

/// Latest reading of one sensor. A series with no usable value resolves
/// to the "no data" sentinel, which is a normal outcome, not an error.
pub async fn fetch_latest_reading(gw: &Gateway, sensor_id: i64) -> Result<Reading, GatewayError> {
    let payload: DataPayload = gw.get_json(&format!("data/getData/{sensor_id}")).await?;
    Ok(latest_reading(payload))
}

/// Selects the first entry, in provider order, whose value is non-null.
/// The provider sends the series newest first; that ordering is trusted,
/// not recomputed from timestamps.
fn latest_reading(payload: DataPayload) -> Reading {
    let DataPayload { key, values } = payload;
    match values.into_iter().find(|entry| entry.value.is_some()) {
        Some(entry) => Reading {
            key,
            value: entry.value,
            date: entry.date,
        },
        None => Reading {
            key,
            value: None,
            date: None,
        },
    }
}

// The pollutant key normally comes from the data payload; when the
// provider omits it there, the sensor's catalog key fills in.
async fn reading_for(gw: &Gateway, sensor: &Sensor) -> Result<Reading, GatewayError> {
    let mut reading = fetch_latest_reading(gw, sensor.id).await?;
    if reading.key.is_empty() {
        reading.key = sensor.key.clone();
    }
    Ok(reading)
}

/// Full snapshot for one station: resolve the name, fetch the sensors,
/// then fetch all sensor readings concurrently. Entry order follows the
/// provider's sensor order regardless of fetch completion order.
pub async fn aggregate(
    gw: &Gateway,
    catalog: &[Station],
    station_id: i64,
) -> Result<Snapshot, AggregateError> {
    let station_name =
        stations::resolve_name(catalog, station_id).ok_or(AggregateError::NotFound(station_id))?;

    let sensors = fetch_sensors(gw, station_id).await?;
    let entries = try_join_all(sensors.iter().map(|sensor| reading_for(gw, sensor))).await?;

    Ok(Snapshot {
        station_name,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValueEntry;

    fn payload(key: &str, values: Vec<(Option<&str>, Option<f64>)>) -> DataPayload {
        DataPayload {
            key: key.to_string(),
            values: values
                .into_iter()
                .map(|(date, value)| ValueEntry {
                    date: date.map(str::to_string),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn latest_reading_takes_the_first_entry() {
        let reading = latest_reading(payload(
            "PM10",
            vec![
                (Some("2024-01-01 13:00:00"), Some(23.4)),
                (Some("2024-01-01 12:00:00"), Some(30.1)),
            ],
        ));
        assert_eq!(reading.value, Some(23.4));
        assert_eq!(reading.date.as_deref(), Some("2024-01-01 13:00:00"));
    }

    #[test]
    fn latest_reading_skips_leading_nulls() {
        let reading = latest_reading(payload(
            "NO2",
            vec![
                (Some("2024-01-01 13:00:00"), None),
                (Some("2024-01-01 12:00:00"), Some(18.0)),
            ],
        ));
        assert_eq!(reading.value, Some(18.0));
        assert_eq!(reading.date.as_deref(), Some("2024-01-01 12:00:00"));
    }

    #[test]
    fn empty_series_is_the_no_data_sentinel() {
        let reading = latest_reading(payload("O3", vec![]));
        assert_eq!(
            reading,
            Reading {
                key: "O3".to_string(),
                value: None,
                date: None,
            }
        );
    }

    #[test]
    fn all_null_series_is_the_no_data_sentinel() {
        let reading = latest_reading(payload(
            "SO2",
            vec![
                (Some("2024-01-01 13:00:00"), None),
                (Some("2024-01-01 12:00:00"), None),
            ],
        ));
        assert_eq!(reading.value, None);
        assert_eq!(reading.date, None);
    }
}
