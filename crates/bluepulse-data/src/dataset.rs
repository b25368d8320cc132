//! Per-location chlorophyll time series.
//!
//! The JSON layout matches the dataset files the viewer ships with:
//!
//! ```json
//! {
//!   "meta": { "title": "...", "units": "mg m^-3", "min": 0.01, "max": 15.0,
//!             "timestamps": ["2024-01-15T00:00:00Z", ...], ... },
//!   "data": [ { "lon": -73.5, "lat": 40.5, "values": [0.8, null, ...] }, ... ]
//! }
//! ```

use std::cmp::Ordering;

use bluepulse_geo::GeoCoordinate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dataset-wide metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMeta {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Measured variable, e.g. `chlorophyll-a`.
    #[serde(default)]
    pub variable: String,
    pub units: String,
    #[serde(default)]
    pub source: String,
    /// Retrieval algorithm, e.g. `OC3M`.
    #[serde(default)]
    pub algorithm: String,
    #[serde(default)]
    pub resolution: String,
    /// Lower bound of the colour scale.
    pub min: f64,
    /// Upper bound of the colour scale.
    pub max: f64,
    /// One ISO-8601 timestamp per time step.
    pub timestamps: Vec<String>,
}

/// A location and its value at every time step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub lon: f64,
    pub lat: f64,
    /// `None` where the measurement is missing.
    pub values: Vec<Option<f64>>,
}

impl SeriesPoint {
    #[must_use]
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.lon, self.lat)
    }

    /// The value at `index`, or `None` if missing or out of range.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }
}

/// A complete chlorophyll dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChlorophyllDataset {
    pub meta: DatasetMeta,
    pub data: Vec<SeriesPoint>,
}

impl ChlorophyllDataset {
    /// Number of time steps.
    #[must_use]
    pub fn time_steps(&self) -> usize {
        self.meta.timestamps.len()
    }

    /// Check the structural invariants every consumer relies on.
    ///
    /// There must be at least one timestamp, `min < max`, and every series
    /// must hold exactly one value per timestamp.
    pub fn validate(&self) -> Result<()> {
        if self.meta.timestamps.is_empty() {
            return Err(Error::InvalidData {
                context: "dataset meta",
                detail: "no timestamps".to_string(),
            });
        }
        if self.meta.min.partial_cmp(&self.meta.max) != Some(Ordering::Less) {
            return Err(Error::InvalidData {
                context: "dataset meta",
                detail: format!(
                    "min ({}) must be less than max ({})",
                    self.meta.min, self.meta.max
                ),
            });
        }
        let expected = self.time_steps();
        if let Some((i, point)) = self
            .data
            .iter()
            .enumerate()
            .find(|(_, point)| point.values.len() != expected)
        {
            return Err(Error::InvalidData {
                context: "dataset series",
                detail: format!(
                    "point {i} at ({}, {}) has {} values, expected {expected}",
                    point.lon,
                    point.lat,
                    point.values.len()
                ),
            });
        }
        Ok(())
    }

    /// Parse and validate a dataset from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Observed range of non-missing values at `index`.
    #[must_use]
    pub fn value_range_at(&self, index: usize) -> Option<(f64, f64)> {
        self.data
            .iter()
            .filter_map(|point| point.value_at(index))
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
