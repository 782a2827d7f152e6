use serde::{Deserialize, Deserializer};

/// A fixed air-quality measurement station from the GIOŚ catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// A single-pollutant instrument attached to one station.
#[derive(Debug, Clone)]
pub struct Sensor {
    pub id: i64,
    pub station_id: i64,
    pub key: String,
}

/// Latest measurement for one pollutant. `value: None` is the
/// "no data" sentinel: the sensor had no usable value in its series.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub key: String,
    pub value: Option<f64>,
    pub date: Option<String>,
}

/// All latest readings for one station, assembled per query and never
/// persisted. Entry order follows the provider's sensor order.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub station_name: String,
    pub entries: Vec<Reading>,
}

// Unmarshal the JSON responses from the GIOŚ REST API into instances
// of the types above.

/// One entry of the `station/findAll` response. The live API sends
/// coordinates as strings ("54.353336"); some mirrors send numbers, so
/// both are accepted.
#[derive(Debug, Deserialize)]
pub struct StationPayload {
    pub id: i64,
    #[serde(rename = "stationName")]
    pub station_name: String,
    #[serde(rename = "gegrLat", deserialize_with = "coord")]
    pub gegr_lat: f64,
    #[serde(rename = "gegrLon", deserialize_with = "coord")]
    pub gegr_lon: f64,
}

impl From<StationPayload> for Station {
    fn from(p: StationPayload) -> Self {
        Self {
            id: p.id,
            name: p.station_name,
            lat: p.gegr_lat,
            lon: p.gegr_lon,
        }
    }
}

/// One entry of the `station/sensors/{id}` response.
#[derive(Debug, Deserialize)]
pub struct SensorPayload {
    pub id: i64,
    #[serde(rename = "stationId")]
    pub station_id: i64,
    #[serde(default)]
    pub param: Option<SensorParam>,
}

#[derive(Debug, Deserialize)]
pub struct SensorParam {
    #[serde(rename = "paramCode")]
    pub param_code: String,
}

impl From<SensorPayload> for Sensor {
    fn from(p: SensorPayload) -> Self {
        Self {
            id: p.id,
            station_id: p.station_id,
            key: p.param.map(|param| param.param_code).unwrap_or_default(),
        }
    }
}

/// The `data/getData/{sensorId}` response: pollutant code plus the
/// historical series, newest entry first. The code is occasionally
/// missing; the aggregator then falls back to the sensor's catalog key.
#[derive(Debug, Deserialize)]
pub struct DataPayload {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub values: Vec<ValueEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ValueEntry {
    pub date: Option<String>,
    pub value: Option<f64>,
}

fn coord<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Raw::deserialize(de)? {
        Raw::Num(v) => Ok(v),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
