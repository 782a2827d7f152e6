//! airbot — query core for Polish GIOŚ air-quality data.
//!
//! Pipeline: station catalog fetch → station resolution (by id or by
//! nearest coordinates) → per-station sensor list → per-sensor latest
//! reading → formatted pollutant snapshot. Every remote call goes
//! through [`gateway::Gateway`]; every stage returns a typed failure,
//! and [`query`] is the single place failures become user-facing text.

pub mod config;
pub mod format;
pub mod gateway;
pub mod location;
pub mod logging;
pub mod models;
pub mod norms;
pub mod query;
pub mod readings;
pub mod stations;
