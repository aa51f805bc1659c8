use thiserror::Error;

use crate::agent::{Agent, TraitError};
use crate::coordinate::Coordinate;

pub const EARTH_RADIUS_KILOMETERS: f64 = 6371.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneError {
    #[error("zone between {corner1} and {corner2} has zero area")]
    DegenerateArea {
        corner1: Coordinate,
        corner2: Coordinate,
    },
    #[error(transparent)]
    Trait(#[from] TraitError),
}

/// A rectangular area bounded by two opposite corners.
///
/// The corners may be either diagonal pairing (bottom-left/top-right or
/// top-left/bottom-right), so every extent is taken from absolute
/// differences and min/max of the corner components.
#[derive(Debug, Clone)]
pub struct Zone {
    corner1: Coordinate,
    corner2: Coordinate,
    earth_radius_km: f64,
    inhabitants: Vec<Agent>,
}

impl Zone {
    pub fn new(corner1: Coordinate, corner2: Coordinate) -> Self {
        Self {
            corner1,
            corner2,
            earth_radius_km: EARTH_RADIUS_KILOMETERS,
            inhabitants: Vec::new(),
        }
    }

    pub fn with_earth_radius(mut self, earth_radius_km: f64) -> Self {
        self.earth_radius_km = earth_radius_km;
        self
    }

    pub fn corner1(&self) -> Coordinate {
        self.corner1
    }

    pub fn corner2(&self) -> Coordinate {
        self.corner2
    }

    /// `(min_longitude, min_latitude)` in degrees.
    pub fn min_corner(&self) -> (f64, f64) {
        (
            self.corner1
                .longitude_degrees()
                .min(self.corner2.longitude_degrees()),
            self.corner1
                .latitude_degrees()
                .min(self.corner2.latitude_degrees()),
        )
    }

    /// `(max_longitude, max_latitude)` in degrees.
    pub fn max_corner(&self) -> (f64, f64) {
        (
            self.corner1
                .longitude_degrees()
                .max(self.corner2.longitude_degrees()),
            self.corner1
                .latitude_degrees()
                .max(self.corner2.latitude_degrees()),
        )
    }

    /// Zone width in kilometers. Exact along the equator only.
    pub fn width_km(&self) -> f64 {
        (self.corner1.longitude_radians() - self.corner2.longitude_radians()).abs()
            * self.earth_radius_km
    }

    /// Zone height in kilometers.
    pub fn height_km(&self) -> f64 {
        (self.corner1.latitude_radians() - self.corner2.latitude_radians()).abs()
            * self.earth_radius_km
    }

    pub fn area_km2(&self) -> f64 {
        self.height_km() * self.width_km()
    }

    pub fn add_inhabitant(&mut self, agent: Agent) {
        self.inhabitants.push(agent);
    }

    pub fn inhabitants(&self) -> &[Agent] {
        &self.inhabitants
    }

    pub fn population(&self) -> usize {
        self.inhabitants.len()
    }

    /// Inhabitants per square kilometer.
    pub fn population_density(&self) -> Result<f64, ZoneError> {
        let area = self.area_km2();
        if area == 0.0 {
            return Err(ZoneError::DegenerateArea {
                corner1: self.corner1,
                corner2: self.corner2,
            });
        }
        Ok(self.population() as f64 / area)
    }

    /// Mean of a numeric trait over every inhabitant. Missing traits count
    /// as `0` and an empty zone averages to `0`.
    pub fn average_trait(&self, name: &str) -> Result<f64, ZoneError> {
        if self.inhabitants.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for inhabitant in &self.inhabitants {
            total += inhabitant.numeric_trait(name)?;
        }
        Ok(total / self.population() as f64)
    }

    /// Half-open containment: lower bounds inclusive, upper bounds exclusive.
    pub fn contains(&self, position: &Coordinate) -> bool {
        let (min_lon, min_lat) = self.min_corner();
        let (max_lon, max_lat) = self.max_corner();
        let lon = position.longitude_degrees();
        let lat = position.latitude_degrees();
        lon >= min_lon && lon < max_lon && lat >= min_lat && lat < max_lat
    }

    /// Closed containment, used only for positions on the grid's outer
    /// +180°/+90° edge.
    pub fn contains_closed(&self, position: &Coordinate) -> bool {
        let (min_lon, min_lat) = self.min_corner();
        let (max_lon, max_lat) = self.max_corner();
        let lon = position.longitude_degrees();
        let lat = position.latitude_degrees();
        lon >= min_lon && lon <= max_lon && lat >= min_lat && lat <= max_lat
    }

    pub(crate) fn clear_inhabitants(&mut self) {
        self.inhabitants.clear();
    }
}
