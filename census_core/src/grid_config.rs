//! Configuration for the census grid and its report views.
//!
//! Loaded from `census_config.json` with support for an environment variable
//! override.

use std::{
    env, fs, io,
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::coordinate::{
    MAX_LATITUDE_DEGREES, MAX_LONGITUDE_DEGREES, MIN_LATITUDE_DEGREES, MIN_LONGITUDE_DEGREES,
};
use crate::views::View;
use crate::zone::EARTH_RADIUS_KILOMETERS;

pub const BUILTIN_CENSUS_CONFIG: &str = include_str!("data/census_config.json");
pub const CONFIG_PATH_ENV: &str = "CENSUS_CONFIG_PATH";

/// Upper bound on `lon_bins * lat_bins`; the grid allocates one zone per cell.
pub const MAX_GRID_CELLS: usize = 10_000_000;

const SPAN_TOLERANCE: f64 = 1e-9;

/// Root configuration for grid layout and aggregation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_width_degrees: f64,
    pub cell_height_degrees: f64,
    pub earth_radius_km: f64,
    pub age_buckets: AgeBuckets,
    pub views: Vec<View>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width_degrees: 1.0,
            cell_height_degrees: 1.0,
            earth_radius_km: EARTH_RADIUS_KILOMETERS,
            age_buckets: AgeBuckets::default(),
            views: View::defaults(),
        }
    }
}

/// Inclusive range of integer ages used as aggregation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgeBuckets {
    pub min_age: u32,
    pub max_age: u32,
}

impl Default for AgeBuckets {
    fn default() -> Self {
        Self {
            min_age: 0,
            max_age: 99,
        }
    }
}

impl AgeBuckets {
    pub fn range(&self) -> RangeInclusive<u32> {
        self.min_age..=self.max_age
    }
}

#[derive(Debug, Error)]
pub enum GridConfigError {
    #[error("failed to parse census config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read census config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid census config: {0}")]
    Invalid(String),
}

impl GridConfig {
    pub fn builtin() -> Self {
        serde_json::from_str(BUILTIN_CENSUS_CONFIG).expect("builtin census config should parse")
    }

    pub fn from_json_str(json: &str) -> Result<Self, GridConfigError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, GridConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| GridConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        GridConfig::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), GridConfigError> {
        let (lon_bins, lat_bins) = (self.lon_bins()?, self.lat_bins()?);
        match lon_bins.checked_mul(lat_bins) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(GridConfigError::Invalid(format!(
                    "{lon_bins}x{lat_bins} cells exceeds the limit of {MAX_GRID_CELLS}"
                )))
            }
        }
        if !(self.earth_radius_km.is_finite() && self.earth_radius_km > 0.0) {
            return Err(GridConfigError::Invalid(format!(
                "earth_radius_km must be positive, got {}",
                self.earth_radius_km
            )));
        }
        if self.age_buckets.min_age > self.age_buckets.max_age {
            return Err(GridConfigError::Invalid(format!(
                "age_buckets.min_age {} exceeds max_age {}",
                self.age_buckets.min_age, self.age_buckets.max_age
            )));
        }
        Ok(())
    }

    /// Number of cells along the longitude axis.
    pub fn lon_bins(&self) -> Result<usize, GridConfigError> {
        cells_along(
            "cell_width_degrees",
            MAX_LONGITUDE_DEGREES - MIN_LONGITUDE_DEGREES,
            self.cell_width_degrees,
        )
    }

    /// Number of cells along the latitude axis.
    pub fn lat_bins(&self) -> Result<usize, GridConfigError> {
        cells_along(
            "cell_height_degrees",
            MAX_LATITUDE_DEGREES - MIN_LATITUDE_DEGREES,
            self.cell_height_degrees,
        )
    }
}

// The cell size must tile the span into a whole number of cells.
fn cells_along(field: &str, span: f64, size: f64) -> Result<usize, GridConfigError> {
    if !(size.is_finite() && size > 0.0 && size <= span) {
        return Err(GridConfigError::Invalid(format!(
            "{field} must be in (0, {span}], got {size}"
        )));
    }
    let bins = (span / size).round();
    if (bins * size - span).abs() > SPAN_TOLERANCE {
        return Err(GridConfigError::Invalid(format!(
            "{field} {size} does not divide {span} degrees evenly"
        )));
    }
    Ok(bins as usize)
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridConfigSource {
    File(PathBuf),
    Builtin,
}

/// Load configuration from `CENSUS_CONFIG_PATH`, falling back to the builtin
/// config when the variable is unset or the file cannot be used.
pub fn load_grid_config_from_env() -> (GridConfig, GridConfigSource) {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) {
        match GridConfig::from_file(&path) {
            Ok(config) => {
                tracing::info!(
                    target: "census::config",
                    path = %path.display(),
                    "census_config.loaded=file"
                );
                return (config, GridConfigSource::File(path));
            }
            Err(err) => {
                tracing::warn!(
                    target: "census::config",
                    path = %path.display(),
                    error = %err,
                    "census_config.load_failed"
                );
            }
        }
    }

    tracing::info!(target: "census::config", "census_config.loaded=builtin");
    (GridConfig::builtin(), GridConfigSource::Builtin)
}
