//! Sea-level rise projections, coastal flood risk and ice-sheet melt.
//!
//! All levels are in millimetres relative to the 2024 baseline.

use bluepulse_geo::coords::{FLOOD_MARKER_RADIUS, ICE_MARKER_RADIUS};
use bluepulse_geo::{DVec3, GeoCoordinate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Year the projections and melt rates are measured from.
pub const BASELINE_YEAR: i32 = 2024;
/// Flood level (mm) at which flood intensity saturates.
const FLOOD_INTENSITY_SCALE_MM: f64 = 1000.0;
/// Flood depth (mm) at which the whole population counts as affected.
const FLOOD_SEVERITY_SCALE_MM: f64 = 2000.0;
/// Extra melt rate per scenario step.
const SCENARIO_MELT_STEP: f64 = 0.5;
/// Fraction of the remaining gap closed per animation frame.
const SEA_LEVEL_APPROACH_RATE: f64 = 0.02;
/// Radius of the undisturbed sea surface shell.
const SEA_SHELL_RADIUS: f64 = 1.01;
/// Millimetres of sea level per unit of shell radius.
const SEA_SHELL_MM_PER_UNIT: f64 = 100_000.0;

/// A warming scenario that scales the current-rate projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Warming above present, in °C.
    pub temp_increase: f64,
    pub sea_level_rise_multiplier: f64,
}

impl Scenario {
    fn new(id: u32, name: &str, description: &str, temp_increase: f64, multiplier: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            temp_increase,
            sea_level_rise_multiplier: multiplier,
        }
    }

    /// The four scenarios offered by the viewer, ordered by id.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new(0, "Current Rate", "If current trends continue", 0.0, 1.0),
            Self::new(1, "Moderate Warming", "+1.5°C warming scenario", 1.5, 1.5),
            Self::new(2, "High Warming", "+2.0°C warming scenario", 2.0, 2.0),
            Self::new(3, "Extreme Warming", "+3.0°C warming scenario", 3.0, 3.0),
        ]
    }
}

/// Current-rate global mean sea-level rise sampled at selected years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeaLevelTimeline {
    pub years: Vec<i32>,
    /// Rise at each entry of `years`, in mm.
    pub sea_level_rise_mm: Vec<f64>,
}

impl SeaLevelTimeline {
    /// Yearly to 2030, then every five years to 2100.
    #[must_use]
    pub fn builtin() -> Self {
        let years = (2024..=2030).chain((2035..=2100).step_by(5)).collect();
        let sea_level_rise_mm = vec![
            0.0, 3.3, 6.6, 9.9, 13.2, 16.5, 19.8, 33.0, 46.2, 59.4, 72.6, 85.8, 99.0, 112.2, 125.4,
            138.6, 151.8, 165.0, 178.2, 191.4, 204.6,
        ];
        Self {
            years,
            sea_level_rise_mm,
        }
    }

    /// Current-rate rise for `year`, which must be on the timeline.
    pub fn rise_for(&self, year: i32) -> Result<f64> {
        self.years
            .iter()
            .position(|&y| y == year)
            .and_then(|i| self.sea_level_rise_mm.get(i).copied())
            .ok_or(Error::UnknownYear(year))
    }
}

/// Scenarios plus the timeline they scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeaLevelProjections {
    pub scenarios: Vec<Scenario>,
    pub timeline: SeaLevelTimeline,
}

impl Default for SeaLevelProjections {
    fn default() -> Self {
        Self {
            scenarios: Scenario::builtin(),
            timeline: SeaLevelTimeline::builtin(),
        }
    }
}

impl SeaLevelProjections {
    pub fn scenario(&self, id: u32) -> Result<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or(Error::UnknownScenario(id))
    }

    /// Projected rise in mm for a scenario and timeline year.
    pub fn projected_rise(&self, scenario_id: u32, year: i32) -> Result<f64> {
        let scenario = self.scenario(scenario_id)?;
        let rise = self.timeline.rise_for(year)?;
        Ok(rise * scenario.sea_level_rise_multiplier)
    }
}

/// A coastal area that floods once the sea passes its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloodZone {
    pub id: String,
    pub name: String,
    pub coordinates: GeoCoordinate,
    /// Ground elevation above present sea level, in metres.
    pub elevation_m: f64,
    pub population: u64,
    /// Flood depth (mm) beyond which the zone counts as flooded.
    pub flood_threshold_mm: f64,
}

/// Flood state of a zone at a given sea level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloodStatus {
    /// Water above ground, in mm. Never negative.
    pub flood_level_mm: f64,
    pub is_flooded: bool,
    /// `flood_level_mm` scaled to [0, 1], for marker visuals.
    pub intensity: f64,
    /// Flood depth relative to 2 m, in [0, 1].
    pub severity: f64,
    /// People affected; zero unless flooded.
    pub affected_population: u64,
}

impl FloodZone {
    fn new(
        id: &str,
        name: &str,
        lon: f64,
        lat: f64,
        elevation_m: f64,
        population: u64,
        flood_threshold_mm: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            coordinates: GeoCoordinate::new(lon, lat),
            elevation_m,
            population,
            flood_threshold_mm,
        }
    }

    /// Major coastal cities at risk.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new(
                "miami",
                "Miami, Florida",
                -80.1918,
                25.7617,
                2.0,
                470_914,
                100.0,
            ),
            Self::new(
                "venice",
                "Venice, Italy",
                12.3155,
                45.4408,
                1.0,
                261_905,
                50.0,
            ),
            Self::new(
                "bangladesh",
                "Dhaka, Bangladesh",
                90.4125,
                23.8103,
                4.0,
                21_000_000,
                200.0,
            ),
            Self::new(
                "maldives",
                "Malé, Maldives",
                73.5093,
                4.1755,
                1.5,
                133_412,
                30.0,
            ),
            Self::new(
                "tokyo",
                "Tokyo, Japan",
                139.6917,
                35.6895,
                5.0,
                13_960_000,
                300.0,
            ),
            Self::new(
                "amsterdam",
                "Amsterdam, Netherlands",
                4.8952,
                52.3702,
                -2.0,
                872_680,
                0.0,
            ),
            Self::new(
                "newyork",
                "New York City",
                -74.0060,
                40.7128,
                10.0,
                8_336_817,
                500.0,
            ),
            Self::new(
                "shanghai",
                "Shanghai, China",
                121.4737,
                31.2304,
                4.0,
                24_870_895,
                200.0,
            ),
        ]
    }

    /// Evaluate flooding for a sea level in mm.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn assess(&self, sea_level_mm: f64) -> FloodStatus {
        let flood_level_mm = (sea_level_mm - self.elevation_m * 1000.0).max(0.0);
        let is_flooded = flood_level_mm > self.flood_threshold_mm;
        let severity = (flood_level_mm / FLOOD_SEVERITY_SCALE_MM).min(1.0);
        let affected_population = if is_flooded {
            (self.population as f64 * severity).floor() as u64
        } else {
            0
        };
        FloodStatus {
            flood_level_mm,
            is_flooded,
            intensity: (flood_level_mm / FLOOD_INTENSITY_SCALE_MM).min(1.0),
            severity,
            affected_population,
        }
    }

    #[must_use]
    pub fn marker_position(&self) -> DVec3 {
        self.coordinates.to_point(FLOOD_MARKER_RADIUS)
    }
}

/// An ice sheet shrinking at a constant rate from the baseline year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceSheet {
    pub id: String,
    pub name: String,
    pub coordinates: GeoCoordinate,
    /// Size at the baseline year, as a percentage of original extent.
    pub current_size_pct: f64,
    /// Percentage points lost per year.
    pub melt_rate_pct: f64,
    /// Contribution to sea-level rise, in mm per year. [`IceSheet::status`]
    /// scales it by the percentage points melted.
    pub sea_level_contribution_mm: f64,
    /// Size (percent) below which melting is critical.
    pub critical_threshold_pct: f64,
}

/// Melt state of an ice sheet for a year and scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IceStatus {
    pub current_size_pct: f64,
    /// Percentage points melted since the baseline year.
    pub melted_pct: f64,
    /// `melted_pct` as a fraction of the baseline size, in [0, 1].
    pub melt_fraction: f64,
    pub is_critical: bool,
    /// Sea-level rise from the melted share, in mm.
    pub sea_level_contribution_mm: f64,
}

impl IceSheet {
    fn new(
        id: &str,
        name: &str,
        (lon, lat): (f64, f64),
        melt_rate_pct: f64,
        contribution: f64,
        critical_threshold_pct: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            coordinates: GeoCoordinate::new(lon, lat),
            current_size_pct: 100.0,
            melt_rate_pct,
            sea_level_contribution_mm: contribution,
            critical_threshold_pct,
        }
    }

    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new(
                "greenland",
                "Greenland Ice Sheet",
                (-42.0, 72.0),
                0.5,
                0.7,
                70.0,
            ),
            Self::new(
                "antarctica",
                "Antarctic Ice Sheet",
                (0.0, -82.0),
                0.2,
                0.3,
                80.0,
            ),
            Self::new("arctic", "Arctic Sea Ice", (0.0, 85.0), 2.0, 0.1, 30.0),
        ]
    }

    /// Melt state in `year` under a scenario.
    ///
    /// Each scenario step adds half the base melt rate. The melted amount is
    /// clamped between zero and the baseline size.
    #[must_use]
    pub fn status(&self, year: i32, scenario_id: u32) -> IceStatus {
        let multiplier = 1.0 + SCENARIO_MELT_STEP * f64::from(scenario_id);
        let years_passed = f64::from(year - BASELINE_YEAR);
        let rate = self.melt_rate_pct * multiplier;
        let melted_pct = (rate * years_passed).clamp(0.0, self.current_size_pct);
        let current_size_pct = self.current_size_pct - melted_pct;
        let melt_fraction = if self.current_size_pct > 0.0 {
            melted_pct / self.current_size_pct
        } else {
            1.0
        };
        IceStatus {
            current_size_pct,
            melted_pct,
            melt_fraction,
            is_critical: current_size_pct < self.critical_threshold_pct,
            sea_level_contribution_mm: melted_pct * self.sea_level_contribution_mm / 100.0,
        }
    }

    /// Remaining size in `year`, never below zero.
    #[must_use]
    pub fn size_in(&self, year: i32) -> f64 {
        let years_passed = f64::from(year - BASELINE_YEAR);
        (self.current_size_pct - self.melt_rate_pct * years_passed).max(0.0)
    }

    /// Fraction melted by `year`: 0 at full size, 1 when gone.
    #[must_use]
    pub fn melt_intensity(&self, year: i32) -> f64 {
        1.0 - self.size_in(year) / 100.0
    }

    #[must_use]
    pub fn marker_position(&self) -> DVec3 {
        self.coordinates.to_point(ICE_MARKER_RADIUS)
    }
}

/// Animated sea level easing toward a projected target each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeaLevelAnimator {
    level_mm: f64,
}

impl SeaLevelAnimator {
    #[must_use]
    pub fn level_mm(&self) -> f64 {
        self.level_mm
    }

    /// Close 2% of the gap to `target_mm`. Returns the new level.
    pub fn step(&mut self, target_mm: f64) -> f64 {
        self.level_mm += (target_mm - self.level_mm) * SEA_LEVEL_APPROACH_RATE;
        self.level_mm
    }

    /// Back to the baseline, used when the year or scenario changes.
    pub fn reset(&mut self) {
        self.level_mm = 0.0;
    }

    /// Radius of the translucent sea surface shell for the current level.
    #[must_use]
    pub fn shell_radius(&self) -> f64 {
        SEA_SHELL_RADIUS + self.level_mm / SEA_SHELL_MM_PER_UNIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_timeline() {
        let timeline = SeaLevelTimeline::builtin();
        assert_eq!(timeline.years.len(), 21);
        assert_eq!(timeline.years.first(), Some(&2024));
        assert_eq!(timeline.years.last(), Some(&2100));
        assert_eq!(timeline.years[7], 2035);
        assert!((timeline.rise_for(2030).unwrap() - 19.8).abs() < 1e-9);
        assert!((timeline.rise_for(2035).unwrap() - 33.0).abs() < 1e-9);
        assert!((timeline.rise_for(2100).unwrap() - 204.6).abs() < 1e-9);
        assert!(matches!(
            timeline.rise_for(2031),
            Err(Error::UnknownYear(2031))
        ));
    }

    #[test]
    fn test_projected_rise_scales_by_scenario() {
        let projections = SeaLevelProjections::default();
        let current = projections.projected_rise(0, 2050).unwrap();
        let extreme = projections.projected_rise(3, 2050).unwrap();
        assert!((current - 72.6).abs() < 1e-9);
        assert!((extreme - 3.0 * current).abs() < 1e-9);
        assert_eq!(projections.projected_rise(0, 2024).unwrap(), 0.0);
        assert!(matches!(
            projections.projected_rise(9, 2050),
            Err(Error::UnknownScenario(9))
        ));
    }

    #[test]
    fn test_flood_assessment() {
        let zones = FloodZone::builtin();
        let amsterdam = zones.iter().find(|z| z.id == "amsterdam").unwrap();
        let miami = zones.iter().find(|z| z.id == "miami").unwrap();

        // Below sea level: flooded at any positive level.
        let status = amsterdam.assess(0.0);
        assert_eq!(status.flood_level_mm, 2000.0);
        assert!(status.is_flooded);
        assert_eq!(status.intensity, 1.0);

        let dry = miami.assess(500.0);
        assert_eq!(dry.flood_level_mm, 0.0);
        assert!(!dry.is_flooded);

        let wet = miami.assess(2150.0);
        assert!((wet.flood_level_mm - 150.0).abs() < 1e-9);
        assert!(wet.is_flooded);
        assert!((wet.intensity - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_ice_sheet_melt() {
        let sheets = IceSheet::builtin();
        let arctic = sheets.iter().find(|s| s.id == "arctic").unwrap();
        assert_eq!(arctic.size_in(2024), 100.0);
        assert_eq!(arctic.size_in(2049), 50.0);
        assert_eq!(arctic.size_in(2100), 0.0);
        assert_eq!(arctic.melt_intensity(2049), 0.5);
        assert_eq!(arctic.melt_intensity(2100), 1.0);
    }

    #[test]
    fn test_flood_severity_and_affected_population() {
        let zones = FloodZone::builtin();
        let miami = zones.iter().find(|z| z.id == "miami").unwrap();

        // 500 mm of water: flooded, a quarter of the way to full severity.
        let status = miami.assess(2500.0);
        assert!(status.is_flooded);
        assert!((status.severity - 0.25).abs() < 1e-12);
        assert_eq!(status.affected_population, 117_728);

        // Under the zone threshold nobody counts as affected.
        let shallow = miami.assess(2050.0);
        assert!(!shallow.is_flooded);
        assert!(shallow.severity > 0.0);
        assert_eq!(shallow.affected_population, 0);

        let deep = miami.assess(9000.0);
        assert_eq!(deep.severity, 1.0);
        assert_eq!(deep.affected_population, miami.population);
    }

    #[test]
    fn test_ice_status_scales_with_scenario() {
        let sheets = IceSheet::builtin();
        let greenland = sheets.iter().find(|s| s.id == "greenland").unwrap();

        let current = greenland.status(2044, 0);
        assert!((current.melted_pct - 10.0).abs() < 1e-12);
        assert!((current.current_size_pct - 90.0).abs() < 1e-12);
        assert!(!current.is_critical);
        assert!((current.sea_level_contribution_mm - 0.07).abs() < 1e-12);

        // Scenario 2 doubles the melt rate.
        let high = greenland.status(2044, 2);
        assert!((high.melted_pct - 20.0).abs() < 1e-12);
        assert!((high.melt_fraction - 0.2).abs() < 1e-12);

        let extreme = greenland.status(2050, 3);
        assert!((extreme.current_size_pct - 67.5).abs() < 1e-12);
        assert!(extreme.is_critical);
    }

    #[test]
    fn test_ice_status_is_bounded() {
        let sheets = IceSheet::builtin();
        let arctic = sheets.iter().find(|s| s.id == "arctic").unwrap();

        let gone = arctic.status(2100, 3);
        assert_eq!(gone.current_size_pct, 0.0);
        assert_eq!(gone.melted_pct, 100.0);
        assert_eq!(gone.melt_fraction, 1.0);
        assert!(gone.is_critical);
        assert!((gone.sea_level_contribution_mm - 0.1).abs() < 1e-12);

        let before = arctic.status(2000, 0);
        assert_eq!(before.melted_pct, 0.0);
        assert_eq!(before.current_size_pct, 100.0);
    }

    #[test]
    fn test_marker_radii() {
        let zone = FloodZone::builtin()[0].marker_position();
        assert!((zone.length() - FLOOD_MARKER_RADIUS).abs() < 1e-9);
        let sheet = IceSheet::builtin()[0].marker_position();
        assert!((sheet.length() - ICE_MARKER_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn test_sea_level_animator_converges() {
        let mut animator = SeaLevelAnimator::default();
        assert_eq!(animator.shell_radius(), 1.01);
        let first = animator.step(100.0);
        assert!((first - 2.0).abs() < 1e-12);
        for _ in 0..1000 {
            animator.step(100.0);
        }
        assert!((animator.level_mm() - 100.0).abs() < 1e-6);
        assert!((animator.shell_radius() - 1.011).abs() < 1e-9);

        animator.reset();
        assert_eq!(animator.level_mm(), 0.0);
    }
}
