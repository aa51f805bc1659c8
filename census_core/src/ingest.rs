//! Loading agent records and placing them on the grid.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::agent::{Agent, Traits};
use crate::coordinate::{Coordinate, CoordinateError};
use crate::grid::{GridError, SpatialGrid};

/// One input record: a position plus every other field as a trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(flatten)]
    pub traits: Traits,
}

impl AgentRecord {
    pub fn into_agent(self) -> Result<Agent, CoordinateError> {
        let position = Coordinate::new(self.longitude, self.latitude)?;
        Ok(Agent::new(position, self.traits))
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to parse agent records: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read agent records from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("record {index} rejected: {source}")]
    Record {
        index: usize,
        #[source]
        source: RecordError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub records: usize,
    pub occupied_zones: usize,
}

pub fn parse_records(json: &str) -> Result<Vec<AgentRecord>, IngestError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_records(path: &Path) -> Result<Vec<AgentRecord>, IngestError> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&contents)
}

/// Places every record on `grid`. The first bad record aborts the whole
/// pass; records before it stay on the grid.
pub fn ingest<I>(grid: &mut SpatialGrid, records: I) -> Result<IngestSummary, IngestError>
where
    I: IntoIterator<Item = AgentRecord>,
{
    let mut count = 0usize;
    for (index, record) in records.into_iter().enumerate() {
        let agent = record.into_agent().map_err(|err| IngestError::Record {
            index,
            source: err.into(),
        })?;
        grid.insert(agent).map_err(|err| IngestError::Record {
            index,
            source: err.into(),
        })?;
        count += 1;
    }

    let summary = IngestSummary {
        records: count,
        occupied_zones: grid
            .zones()
            .iter()
            .filter(|zone| zone.population() > 0)
            .count(),
    };
    info!(
        target: "census::ingest",
        records = summary.records,
        occupied_zones = summary.occupied_zones,
        "ingest.complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::TraitValue;

    #[test]
    fn position_fields_are_split_from_traits() {
        let records =
            parse_records(r#"[{"longitude": 100, "latitude": 33, "age": 84, "name": "x"}]"#)
                .unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!((record.longitude, record.latitude), (100.0, 33.0));
        assert_eq!(record.traits.len(), 2);
        assert_eq!(record.traits["age"], TraitValue::Number(84.0));
        assert!(!record.traits.contains_key("longitude"));
    }

    #[test]
    fn missing_latitude_fails_to_parse() {
        let err = parse_records(r#"[{"longitude": 100, "age": 84}]"#).unwrap_err();
        assert!(matches!(err, IngestError::Parse(_)));
    }

    #[test]
    fn records_land_in_their_zones() {
        let mut grid = SpatialGrid::default();
        let records = parse_records(
            r#"[
                {"longitude": -180, "latitude": -89, "agreeableness": 1},
                {"longitude": -179.5, "latitude": -88.5, "agreeableness": 0},
                {"longitude": 12.3, "latitude": 45.6}
            ]"#,
        )
        .unwrap();
        let summary = ingest(&mut grid, records).unwrap();
        assert_eq!(
            summary,
            IngestSummary {
                records: 3,
                occupied_zones: 2,
            }
        );
        assert_eq!(grid.zone(360).unwrap().population(), 2);
        assert_eq!(grid.zone(360).unwrap().average_trait("agreeableness"), Ok(0.5));
    }

    #[test]
    fn null_traits_are_kept_and_ingested() {
        let mut grid = SpatialGrid::default();
        let records = parse_records(
            r#"[
                {"longitude": -180, "latitude": -89, "nickname": null, "income": 300},
                {"longitude": -179.5, "latitude": -89, "income": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(records[0].traits["nickname"], TraitValue::Null);
        let summary = ingest(&mut grid, records).unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(grid.zone(360).unwrap().average_trait("income"), Ok(150.0));
    }

    #[test]
    fn out_of_range_record_reports_its_index() {
        let mut grid = SpatialGrid::default();
        let records = parse_records(
            r#"[{"longitude": 0, "latitude": 0}, {"longitude": 190, "latitude": 10}]"#,
        )
        .unwrap();
        let err = ingest(&mut grid, records).unwrap_err();
        match err {
            IngestError::Record {
                index,
                source: RecordError::Coordinate(_),
            } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
