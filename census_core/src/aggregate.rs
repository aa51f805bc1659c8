use std::convert::Infallible;
use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use crate::zone::{Zone, ZoneError};

/// Parallel x/y sequences of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
}

impl Series {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x_values: Vec::with_capacity(capacity),
            y_values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x_values.push(x);
        self.y_values.push(y);
    }

    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }
}

/// One `(x_fn(zone), y_fn(zone))` point per zone, in zone order.
pub fn per_zone_pairs<'a, I, FX, FY>(zones: I, mut x_fn: FX, mut y_fn: FY) -> Series
where
    I: IntoIterator<Item = &'a Zone>,
    FX: FnMut(&Zone) -> f64,
    FY: FnMut(&Zone) -> f64,
{
    let result: Result<Series, Infallible> =
        try_per_zone_pairs(zones, |zone| Ok(x_fn(zone)), |zone| Ok(y_fn(zone)));
    match result {
        Ok(series) => series,
        Err(never) => match never {},
    }
}

/// Fallible form of [`per_zone_pairs`]; stops at the first error.
pub fn try_per_zone_pairs<'a, I, FX, FY, E>(
    zones: I,
    mut x_fn: FX,
    mut y_fn: FY,
) -> Result<Series, E>
where
    I: IntoIterator<Item = &'a Zone>,
    FX: FnMut(&Zone) -> Result<f64, E>,
    FY: FnMut(&Zone) -> Result<f64, E>,
{
    let zones = zones.into_iter();
    let mut series = Series::with_capacity(zones.size_hint().0);
    for zone in zones {
        let x = x_fn(zone)?;
        let y = y_fn(zone)?;
        series.push(x, y);
    }
    Ok(series)
}

/// Average of `trait_name` for every integer age in `ages`, across all
/// inhabitants of all zones.
///
/// Always returns one point per age; a bucket nobody falls into reads `0`.
/// Inhabitants whose age is missing, fractional or outside `ages` are left
/// out of every bucket.
pub fn per_age_bucket_average<'a, I>(
    zones: I,
    trait_name: &str,
    ages: RangeInclusive<u32>,
) -> Result<Series, ZoneError>
where
    I: IntoIterator<Item = &'a Zone>,
{
    let first_age = *ages.start();
    let bucket_count = if ages.is_empty() {
        0
    } else {
        (ages.end() - first_age) as usize + 1
    };
    let mut totals = vec![0.0f64; bucket_count];
    let mut counts = vec![0u64; bucket_count];
    let mut excluded = 0u64;

    for zone in zones {
        for inhabitant in zone.inhabitants() {
            let Some(age) = inhabitant.age().filter(|age| ages.contains(age)) else {
                excluded += 1;
                continue;
            };
            let slot = (age - first_age) as usize;
            totals[slot] += inhabitant.numeric_trait(trait_name)?;
            counts[slot] += 1;
        }
    }

    if excluded > 0 {
        debug!(
            target: "census::aggregate",
            trait_name,
            excluded,
            "aggregate.ages_excluded"
        );
    }

    let mut series = Series::with_capacity(bucket_count);
    for (age, (total, count)) in ages.zip(totals.into_iter().zip(counts)) {
        let average = if count == 0 { 0.0 } else { total / count as f64 };
        series.push(f64::from(age), average);
    }
    Ok(series)
}
