//! Core census crate: places geolocated agents on a 1°×1° world grid and
//! aggregates their traits per zone and per age.
//!
//! Typical flow: [`load_records`] → [`ingest`] into a [`SpatialGrid`] →
//! [`render_all`] over [`SpatialGrid::zones`], producing [`Chart`]s for an
//! external renderer.

pub mod agent;
pub mod aggregate;
pub mod coordinate;
pub mod grid;
pub mod grid_config;
pub mod ingest;
pub mod synthetic;
pub mod views;
pub mod zone;

pub use agent::{Agent, TraitError, TraitValue, Traits, AGE_TRAIT};
pub use aggregate::{per_age_bucket_average, per_zone_pairs, try_per_zone_pairs, Series};
pub use coordinate::{Axis, Coordinate, CoordinateError};
pub use grid::{GridError, SpatialGrid};
pub use grid_config::{
    load_grid_config_from_env, AgeBuckets, GridConfig, GridConfigError, GridConfigSource,
    MAX_GRID_CELLS,
};
pub use ingest::{
    ingest, load_records, parse_records, AgentRecord, IngestError, IngestSummary, RecordError,
};
pub use synthetic::SyntheticPopulation;
pub use views::{render_all, Chart, View, ViewKind, ZoneMetric};
pub use zone::{Zone, ZoneError, EARTH_RADIUS_KILOMETERS};

/// Builds a grid from `config`, places `records` on it and renders every
/// configured view.
pub fn run_census<I>(config: &GridConfig, records: I) -> Result<CensusReport, CensusError>
where
    I: IntoIterator<Item = AgentRecord>,
{
    let mut grid = SpatialGrid::new(config)?;
    grid.build()?;
    let summary = ingest(&mut grid, records)?;
    let charts = render_all(&config.views, grid.zones(), config.age_buckets.range())?;
    Ok(CensusReport { summary, charts })
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CensusReport {
    pub summary: IngestSummary,
    pub charts: Vec<Chart>,
}

#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    #[error(transparent)]
    Config(#[from] GridConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Zone(#[from] ZoneError),
}
