use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub const MIN_LONGITUDE_DEGREES: f64 = -180.0;
pub const MAX_LONGITUDE_DEGREES: f64 = 180.0;
pub const MIN_LATITUDE_DEGREES: f64 = -90.0;
pub const MAX_LATITUDE_DEGREES: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Longitude,
    Latitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Longitude => f.write_str("longitude"),
            Axis::Latitude => f.write_str("latitude"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("{axis} {value} is outside [{min}, {max}] degrees")]
    OutOfRange {
        axis: Axis,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// A validated longitude/latitude pair, stored in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    longitude_degrees: f64,
    latitude_degrees: f64,
}

impl Coordinate {
    pub fn new(longitude_degrees: f64, latitude_degrees: f64) -> Result<Self, CoordinateError> {
        check_range(
            Axis::Longitude,
            longitude_degrees,
            MIN_LONGITUDE_DEGREES,
            MAX_LONGITUDE_DEGREES,
        )?;
        check_range(
            Axis::Latitude,
            latitude_degrees,
            MIN_LATITUDE_DEGREES,
            MAX_LATITUDE_DEGREES,
        )?;
        Ok(Self {
            longitude_degrees,
            latitude_degrees,
        })
    }

    #[inline]
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude_degrees
    }

    #[inline]
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude_degrees
    }

    #[inline]
    pub fn longitude_radians(&self) -> f64 {
        self.longitude_degrees * PI / 180.0
    }

    #[inline]
    pub fn latitude_radians(&self) -> f64 {
        self.latitude_degrees * PI / 180.0
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}, {:.6})",
            self.longitude_degrees, self.latitude_degrees
        )
    }
}

// `contains` is false for NaN, so NaN is rejected along with everything else.
fn check_range(axis: Axis, value: f64, min: f64, max: f64) -> Result<(), CoordinateError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CoordinateError::OutOfRange {
            axis,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radians_are_derived_from_degrees() {
        let coordinate = Coordinate::new(100.0, 33.0).unwrap();
        assert_eq!(coordinate.longitude_degrees(), 100.0);
        assert_eq!(coordinate.latitude_degrees(), 33.0);
        assert_eq!(coordinate.longitude_radians(), 1.7453292519943295);
        assert_eq!(coordinate.latitude_radians(), 0.5759586531581288);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(Coordinate::new(-180.0, -90.0).is_ok());
        assert!(Coordinate::new(180.0, 90.0).is_ok());
    }

    #[test]
    fn longitude_out_of_range_is_rejected() {
        let err = Coordinate::new(190.0, 10.0).unwrap_err();
        assert!(matches!(
            err,
            CoordinateError::OutOfRange {
                axis: Axis::Longitude,
                ..
            }
        ));
    }

    #[test]
    fn latitude_out_of_range_is_rejected() {
        let err = Coordinate::new(100.0, 100.0).unwrap_err();
        assert!(matches!(
            err,
            CoordinateError::OutOfRange {
                axis: Axis::Latitude,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "latitude 100 is outside [-90, 90] degrees"
        );
    }

    #[test]
    fn nan_is_rejected() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }
}
