use thiserror::Error;
use tracing::debug;

use crate::agent::Agent;
use crate::coordinate::{
    Coordinate, CoordinateError, MAX_LATITUDE_DEGREES, MAX_LONGITUDE_DEGREES,
    MIN_LATITUDE_DEGREES, MIN_LONGITUDE_DEGREES,
};
use crate::grid_config::{GridConfig, GridConfigError};
use crate::zone::{Zone, EARTH_RADIUS_KILOMETERS};

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell index {index} is outside a grid of {len} cells")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cell {index} does not contain {coordinate}")]
    InvariantViolation { index: usize, coordinate: Coordinate },
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}

/// Fixed array of equally sized zones covering `[-180, 180) × [-90, 90)`,
/// row-major by latitude then longitude.
///
/// Cells are built lazily on the first lookup. Coordinates on the +180°
/// longitude or +90° latitude edge are clamped into the last column/row so
/// every valid coordinate has a home cell.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_width_degrees: f64,
    cell_height_degrees: f64,
    earth_radius_km: f64,
    lon_bins: usize,
    lat_bins: usize,
    cells: Vec<Zone>,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self {
            cell_width_degrees: 1.0,
            cell_height_degrees: 1.0,
            earth_radius_km: EARTH_RADIUS_KILOMETERS,
            lon_bins: 360,
            lat_bins: 180,
            cells: Vec::new(),
        }
    }
}

impl SpatialGrid {
    pub fn new(config: &GridConfig) -> Result<Self, GridConfigError> {
        config.validate()?;
        Ok(Self {
            cell_width_degrees: config.cell_width_degrees,
            cell_height_degrees: config.cell_height_degrees,
            earth_radius_km: config.earth_radius_km,
            lon_bins: config.lon_bins()?,
            lat_bins: config.lat_bins()?,
            cells: Vec::new(),
        })
    }

    pub fn lon_bins(&self) -> usize {
        self.lon_bins
    }

    pub fn lat_bins(&self) -> usize {
        self.lat_bins
    }

    pub fn cell_count(&self) -> usize {
        self.lon_bins * self.lat_bins
    }

    pub fn is_built(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Built cells; empty until the first lookup or an explicit [`build`](Self::build).
    pub fn zones(&self) -> &[Zone] {
        &self.cells
    }

    pub fn zone(&self, index: usize) -> Option<&Zone> {
        self.cells.get(index)
    }

    /// Total inhabitants across every cell.
    pub fn population(&self) -> usize {
        self.cells.iter().map(Zone::population).sum()
    }

    /// (Re)builds every cell. Any previous inhabitants are dropped.
    pub fn build(&mut self) -> Result<(), GridError> {
        let mut cells = Vec::with_capacity(self.cell_count());
        for lat_index in 0..self.lat_bins {
            for lon_index in 0..self.lon_bins {
                let bottom_left =
                    Coordinate::new(self.lon_edge(lon_index), self.lat_edge(lat_index))?;
                let top_right =
                    Coordinate::new(self.lon_edge(lon_index + 1), self.lat_edge(lat_index + 1))?;
                cells.push(
                    Zone::new(bottom_left, top_right).with_earth_radius(self.earth_radius_km),
                );
            }
        }
        self.cells = cells;
        debug!(
            target: "census::grid",
            cells = self.cells.len(),
            lon_bins = self.lon_bins,
            lat_bins = self.lat_bins,
            "grid.built"
        );
        Ok(())
    }

    /// Discards every cell and inhabitant; the next lookup rebuilds.
    pub fn reset(&mut self) {
        self.cells = Vec::new();
        debug!(target: "census::grid", "grid.reset");
    }

    /// Empties every cell while keeping the built layout.
    pub fn clear_inhabitants(&mut self) {
        for cell in &mut self.cells {
            cell.clear_inhabitants();
        }
    }

    /// Row-major index of the cell holding `coordinate`.
    ///
    /// The floored quotient is checked against the exact cell edges and
    /// moved by at most one cell per axis, so rounding in the division can
    /// never disagree with [`Zone::contains`].
    pub fn cell_index_for(&self, coordinate: &Coordinate) -> usize {
        let lon_index = axis_index(
            coordinate.longitude_degrees(),
            MIN_LONGITUDE_DEGREES,
            self.cell_width_degrees,
            self.lon_bins,
            |i| self.lon_edge(i),
        );
        let lat_index = axis_index(
            coordinate.latitude_degrees(),
            MIN_LATITUDE_DEGREES,
            self.cell_height_degrees,
            self.lat_bins,
            |i| self.lat_edge(i),
        );
        lat_index * self.lon_bins + lon_index
    }

    /// Locates the cell for `coordinate`, building the grid if needed, and
    /// verifies that the cell geometrically contains it.
    pub fn locate(&mut self, coordinate: &Coordinate) -> Result<usize, GridError> {
        if !self.is_built() {
            self.build()?;
        }
        let index = self.cell_index_for(coordinate);
        let zone = self.cells.get(index).ok_or(GridError::IndexOutOfRange {
            index,
            len: self.cells.len(),
        })?;
        let on_outer_edge = coordinate.longitude_degrees() == MAX_LONGITUDE_DEGREES
            || coordinate.latitude_degrees() == MAX_LATITUDE_DEGREES;
        let inside = if on_outer_edge {
            zone.contains_closed(coordinate)
        } else {
            zone.contains(coordinate)
        };
        if !inside {
            return Err(GridError::InvariantViolation {
                index,
                coordinate: *coordinate,
            });
        }
        Ok(index)
    }

    pub fn find_zone_containing(
        &mut self,
        coordinate: &Coordinate,
    ) -> Result<&mut Zone, GridError> {
        let index = self.locate(coordinate)?;
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or(GridError::IndexOutOfRange { index, len })
    }

    /// Places `agent` in the cell containing its position and returns the
    /// cell index.
    pub fn insert(&mut self, agent: Agent) -> Result<usize, GridError> {
        let index = self.locate(&agent.position())?;
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or(GridError::IndexOutOfRange { index, len })?
            .add_inhabitant(agent);
        Ok(index)
    }

    fn lon_edge(&self, index: usize) -> f64 {
        if index >= self.lon_bins {
            MAX_LONGITUDE_DEGREES
        } else {
            MIN_LONGITUDE_DEGREES + index as f64 * self.cell_width_degrees
        }
    }

    fn lat_edge(&self, index: usize) -> f64 {
        if index >= self.lat_bins {
            MAX_LATITUDE_DEGREES
        } else {
            MIN_LATITUDE_DEGREES + index as f64 * self.cell_height_degrees
        }
    }
}

fn axis_index(
    value: f64,
    min: f64,
    size: f64,
    bins: usize,
    edge: impl Fn(usize) -> f64,
) -> usize {
    let raw = ((value - min) / size).floor();
    let mut index = if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(bins - 1)
    };
    if index > 0 && value < edge(index) {
        index -= 1;
    } else if index + 1 < bins && value >= edge(index + 1) {
        index += 1;
    }
    index
}
