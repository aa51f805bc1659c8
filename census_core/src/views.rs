//! Chart views over the zone set.
//!
//! A view is a pure function from zones to an `(x, y)` series plus static
//! labels. The set of view kinds is closed; which views run is chosen by
//! configuration.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::aggregate::{per_age_bucket_average, try_per_zone_pairs, Series};
use crate::zone::{Zone, ZoneError};

/// Scalar read from a single zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum ZoneMetric {
    PopulationDensity,
    Population,
    AreaKm2,
    AverageTrait { trait_name: String },
}

impl ZoneMetric {
    pub fn average(trait_name: impl Into<String>) -> Self {
        ZoneMetric::AverageTrait {
            trait_name: trait_name.into(),
        }
    }

    pub fn evaluate(&self, zone: &Zone) -> Result<f64, ZoneError> {
        match self {
            ZoneMetric::PopulationDensity => zone.population_density(),
            ZoneMetric::Population => Ok(zone.population() as f64),
            ZoneMetric::AreaKm2 => Ok(zone.area_km2()),
            ZoneMetric::AverageTrait { trait_name } => zone.average_trait(trait_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewKind {
    /// One point per zone.
    ZonePairs { x: ZoneMetric, y: ZoneMetric },
    /// One point per age bucket, averaged across every zone.
    AgeBuckets { trait_name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ViewKind,
}

/// Rendered output handed to whatever draws the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
}

impl View {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        kind: ViewKind,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            kind,
        }
    }

    pub fn agreeableness_by_density() -> Self {
        View::new(
            "Nice people live in the countryside",
            "population density",
            "agreeableness",
            ViewKind::ZonePairs {
                x: ZoneMetric::PopulationDensity,
                y: ZoneMetric::average("agreeableness"),
            },
        )
    }

    pub fn income_by_age() -> Self {
        View::new(
            "Older people have more money",
            "age",
            "income",
            ViewKind::AgeBuckets {
                trait_name: "income".to_string(),
            },
        )
    }

    pub fn agreeableness_by_age() -> Self {
        View::new(
            "Nice people are young",
            "age",
            "agreeableness",
            ViewKind::AgeBuckets {
                trait_name: "agreeableness".to_string(),
            },
        )
    }

    pub fn defaults() -> Vec<View> {
        vec![
            View::agreeableness_by_density(),
            View::agreeableness_by_age(),
            View::income_by_age(),
        ]
    }

    pub fn series(&self, zones: &[Zone], ages: RangeInclusive<u32>) -> Result<Series, ZoneError> {
        match &self.kind {
            ViewKind::ZonePairs { x, y } => {
                try_per_zone_pairs(zones, |zone| x.evaluate(zone), |zone| y.evaluate(zone))
            }
            ViewKind::AgeBuckets { trait_name } => per_age_bucket_average(zones, trait_name, ages),
        }
    }

    pub fn render(&self, zones: &[Zone], ages: RangeInclusive<u32>) -> Result<Chart, ZoneError> {
        let Series { x_values, y_values } = self.series(zones, ages)?;
        Ok(Chart {
            title: self.title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            x_values,
            y_values,
        })
    }
}

pub fn render_all(
    views: &[View],
    zones: &[Zone],
    ages: RangeInclusive<u32>,
) -> Result<Vec<Chart>, ZoneError> {
    views
        .iter()
        .map(|view| view.render(zones, ages.clone()))
        .collect()
}
