//! Sources of chlorophyll datasets.
//!
//! The viewer never swaps sources behind the caller's back: the caller picks
//! a [`DataSource`] and handles its errors.
//!
//! # Implementations
//!
//! - [`SyntheticSource`]: seeded generator with seasonal variation per location
//! - [`JsonFileSource`]: dataset file on disk

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::dataset::{ChlorophyllDataset, DatasetMeta, SeriesPoint};
use crate::error::{Error, Result};

/// Lowest value a synthetic sample can take, in mg m^-3.
pub const CHLOROPHYLL_MIN: f64 = 0.01;
/// Highest value a synthetic sample can take, in mg m^-3.
pub const CHLOROPHYLL_MAX: f64 = 15.0;
/// Monthly composites per synthetic dataset.
const MONTHS: u32 = 12;

/// Something that can produce a dataset.
pub trait DataSource {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Produce a validated dataset.
    fn load(&self) -> Result<ChlorophyllDataset>;
}

/// A named sampling location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedLocation {
    pub name: &'static str,
    pub lon: f64,
    pub lat: f64,
}

const fn loc(name: &'static str, lon: f64, lat: f64) -> NamedLocation {
    NamedLocation { name, lon, lat }
}

/// Ocean locations covering the major currents, gyres and coastal seas.
pub const OCEAN_LOCATIONS: &[NamedLocation] = &[
    loc("North Atlantic Current", -40.0, 50.0),
    loc("Pacific Equatorial Current", -150.0, 0.0),
    loc("Indian Ocean Monsoon Current", 70.0, 10.0),
    loc("Arctic Ocean", 0.0, 80.0),
    loc("Antarctic Circumpolar Current", 0.0, -60.0),
    loc("Gulf Stream", -70.0, 35.0),
    loc("Kuroshio Current", 140.0, 35.0),
    loc("Benguela Current", 10.0, -30.0),
    loc("Caribbean Sea", -80.0, 25.0),
    loc("Mediterranean Sea", 12.0, 45.0),
    loc("Bay of Bengal", 90.0, 23.0),
    loc("Indian Ocean", 73.0, 4.0),
    loc("Tokyo Bay", 139.0, 35.0),
    loc("North Sea", 4.0, 52.0),
    loc("New York Bight", -74.0, 40.0),
    loc("East China Sea", 121.0, 31.0),
    loc("Java Sea", 106.0, -6.0),
    loc("Arabian Sea", 72.0, 19.0),
    loc("South Atlantic Gyre", -15.0, -25.0),
    loc("Coral Sea", 147.0, -18.0),
    loc("Northwest Atlantic", -73.0, 40.0),
    loc("California Current", -120.0, 35.0),
    loc("Black Sea", 20.0, 40.0),
    loc("Equatorial Atlantic", -30.0, 0.0),
    loc("Equatorial Indian Ocean", 60.0, 0.0),
    loc("Gulf of Mexico", -100.0, 20.0),
    loc("South Pacific Gyre", 160.0, -20.0),
    loc("South Atlantic", -50.0, -40.0),
    loc("Norwegian Sea", 30.0, 60.0),
    loc("Northeast Pacific", -120.0, 50.0),
    loc("Equatorial Pacific", 0.0, 0.0),
];

/// Areas with elevated baseline productivity: (lon, lat).
const HIGH_PRODUCTIVITY_AREAS: [(f64, f64); 5] = [
    (-80.0, 25.0), // Gulf of Mexico
    (12.0, 45.0),  // Mediterranean
    (139.0, 35.0), // Tokyo Bay
    (-74.0, 40.0), // New York Bight
    (4.0, 52.0),   // North Sea
];

/// Generates a year of monthly values with plausible seasonal cycles.
///
/// Output is deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    locations: Vec<NamedLocation>,
    start_year: i32,
    /// Zero-based month of the first timestamp.
    start_month: u32,
    seed: u64,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SyntheticSource {
    /// Generator over [`OCEAN_LOCATIONS`] for January through December 2024.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            locations: OCEAN_LOCATIONS.to_vec(),
            start_year: 2024,
            start_month: 0,
            seed,
        }
    }

    #[must_use]
    pub fn with_locations(mut self, locations: Vec<NamedLocation>) -> Self {
        self.locations = locations;
        self
    }

    /// Start the series at `year` and zero-based `month` (wrapped into 0..12).
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn starting_at(mut self, year: i32, month: u32) -> Self {
        self.start_year = year + (month / 12) as i32;
        self.start_month = month % 12;
        self
    }

    /// Calendar (year, zero-based month) of each time step.
    #[allow(clippy::cast_possible_wrap)]
    fn months(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        (0..MONTHS).map(|step| {
            let absolute = self.start_month + step;
            (self.start_year + (absolute / 12) as i32, absolute % 12)
        })
    }

    fn timestamps(&self) -> Vec<String> {
        self.months()
            .map(|(year, month)| format!("{year:04}-{:02}-15T00:00:00Z", month + 1))
            .collect()
    }

    fn series(&self, location: &NamedLocation, rng: &mut StdRng) -> Vec<Option<f64>> {
        let base = base_level(location.lon, location.lat);
        self.months()
            .map(|(_, month)| {
                let seasonal = seasonal_factor(location.lat, month);
                let noise = rng.random_range(0.8..1.2);
                Some((base * seasonal * noise).clamp(CHLOROPHYLL_MIN, CHLOROPHYLL_MAX))
            })
            .collect()
    }
}

impl DataSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn load(&self) -> Result<ChlorophyllDataset> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let data = self
            .locations
            .iter()
            .map(|location| SeriesPoint {
                lon: location.lon,
                lat: location.lat,
                values: self.series(location, &mut rng),
            })
            .collect();

        let dataset = ChlorophyllDataset {
            meta: DatasetMeta {
                title: "Synthetic Chlorophyll-a Concentrations".to_string(),
                description: "Seasonal chlorophyll-a estimates generated per location".to_string(),
                variable: "chlorophyll-a".to_string(),
                units: "mg m^-3".to_string(),
                source: "BluePulse synthetic generator".to_string(),
                algorithm: "OC3M".to_string(),
                resolution: "4km".to_string(),
                min: CHLOROPHYLL_MIN,
                max: CHLOROPHYLL_MAX,
                timestamps: self.timestamps(),
            },
            data,
        };
        dataset.validate()?;
        debug!(
            points = dataset.data.len(),
            seed = self.seed,
            "generated synthetic dataset"
        );
        Ok(dataset)
    }
}

/// Baseline concentration for a location before seasonal and random factors.
#[must_use]
pub fn base_level(lon: f64, lat: f64) -> f64 {
    let high_productivity = HIGH_PRODUCTIVITY_AREAS
        .iter()
        .any(|&(area_lon, area_lat)| (area_lon - lon).abs() < 5.0 && (area_lat - lat).abs() < 5.0);
    if high_productivity {
        1.0
    } else if lat.abs() > 60.0 {
        // Polar.
        0.05
    } else if lat.abs() < 30.0 && lon.abs() < 120.0 {
        // Coastal and tropical.
        0.5
    } else {
        // Open ocean.
        0.1
    }
}

/// Seasonal multiplier for a zero-based month.
///
/// Temperate latitudes peak in late spring and summer; the tropics vary
/// mildly; the band between is flat.
#[must_use]
pub fn seasonal_factor(lat: f64, month: u32) -> f64 {
    let month = f64::from(month);
    if lat.abs() > 30.0 {
        0.5 + 0.5 * ((month - 2.0) * PI / 6.0).sin()
    } else if lat.abs() < 10.0 {
        0.8 + 0.2 * (month * PI / 6.0).sin()
    } else {
        1.0
    }
}

/// A dataset stored as JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn load(&self) -> Result<ChlorophyllDataset> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        let dataset = ChlorophyllDataset::from_json(&json).inspect_err(|e| {
            warn!(path = %self.path.display(), "rejected dataset file: {e}");
        })?;
        debug!(
            path = %self.path.display(),
            points = dataset.data.len(),
            steps = dataset.time_steps(),
            "loaded dataset file"
        );
        Ok(dataset)
    }
}
