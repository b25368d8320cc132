//! Subcommand implementations. Each builds a serializable report; `run`
//! prints it as JSON on stdout.

use std::io::Write;

use bluepulse_data::{
    ChlorophyllDataset, DataSource, FloodStatus, FloodZone, IceSheet, IceStatus, JsonFileSource,
    PointCloud, Scenario, SeaLevelProjections, SyntheticSource, build_point_cloud,
};
use bluepulse_geo::camera::HOME_POSITION;
use bluepulse_geo::fly::{FlyPath, FlyPathOptions, Interpolation, plan};
use bluepulse_geo::{DVec3, GeoCoordinate, project, unproject};
use serde::Serialize;
use tracing::info;

use crate::args::{Command, DEFAULT_SEED};
use crate::error::Result;

/// Flood report for every built-in zone.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloodReport<'a> {
    pub scenario: &'a Scenario,
    pub year: i32,
    pub sea_level_rise_mm: f64,
    pub total_affected_population: u64,
    pub zones: Vec<ZoneReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneReport {
    pub id: String,
    pub name: String,
    pub position: DVec3,
    #[serde(flatten)]
    pub status: FloodStatus,
}

/// Melt state of every built-in ice sheet.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IceReport<'a> {
    pub scenario: &'a Scenario,
    pub year: i32,
    pub total_sea_level_contribution_mm: f64,
    pub sheets: Vec<SheetReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetReport {
    pub id: String,
    pub name: String,
    pub position: DVec3,
    pub melt_intensity: f64,
    #[serde(flatten)]
    pub status: IceStatus,
}

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Project { lon, lat, radius } => emit(&project(lon, lat, radius)),
        Command::Unproject { x, y, z } => emit(&unproject(DVec3::new(x, y, z))),
        Command::Fly {
            from,
            lon,
            lat,
            distance,
            frames,
            easing,
            spherical,
        } => {
            let options = FlyPathOptions {
                distance,
                frame_count: frames,
                easing,
                interpolation: if spherical {
                    Interpolation::Spherical
                } else {
                    Interpolation::Linear
                },
            };
            emit(&fly(from.unwrap_or(HOME_POSITION), lon, lat, &options))
        }
        Command::Cloud {
            input,
            seed,
            time_index,
            radius,
        } => {
            let source: Box<dyn DataSource> = match input {
                Some(path) => Box::new(JsonFileSource::new(path)),
                None => Box::new(SyntheticSource::new(seed.unwrap_or(DEFAULT_SEED))),
            };
            emit(&cloud(source.as_ref(), time_index, radius)?)
        }
        Command::Generate { seed } => emit(&SyntheticSource::new(seed).load()?),
        Command::Flood { scenario, year } => {
            let projections = SeaLevelProjections::default();
            emit(&flood(&projections, scenario, year)?)
        }
        Command::Ice { scenario, year } => {
            let projections = SeaLevelProjections::default();
            emit(&ice(&projections, scenario, year)?)
        }
    }
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    write_json(&mut std::io::stdout().lock(), value)
}

/// Pretty-printed JSON followed by a newline.
fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}

pub fn fly(from: DVec3, lon: f64, lat: f64, options: &FlyPathOptions) -> FlyPath {
    let path = plan(from, GeoCoordinate::new(lon, lat), options);
    info!(frames = path.len(), goal = ?path.goal(), "planned flight");
    path
}

pub fn cloud(
    source: &dyn DataSource,
    time_index: usize,
    radius: f64,
) -> bluepulse_data::Result<PointCloud> {
    let dataset: ChlorophyllDataset = source.load()?;
    info!(
        source = source.name(),
        timestamp = dataset.meta.timestamps.get(time_index).map(String::as_str),
        "building point cloud"
    );
    build_point_cloud(&dataset, time_index, radius)
}

pub fn flood(
    projections: &SeaLevelProjections,
    scenario_id: u32,
    year: i32,
) -> bluepulse_data::Result<FloodReport<'_>> {
    let scenario = projections.scenario(scenario_id)?;
    let sea_level_rise_mm = projections.projected_rise(scenario_id, year)?;
    let zones: Vec<ZoneReport> = FloodZone::builtin()
        .into_iter()
        .map(|zone| ZoneReport {
            status: zone.assess(sea_level_rise_mm),
            position: zone.marker_position(),
            id: zone.id,
            name: zone.name,
        })
        .collect();
    let total_affected_population: u64 = zones.iter().map(|z| z.status.affected_population).sum();
    info!(total_affected_population, "assessed flood zones");
    Ok(FloodReport {
        scenario,
        year,
        sea_level_rise_mm,
        total_affected_population,
        zones,
    })
}

pub fn ice(
    projections: &SeaLevelProjections,
    scenario_id: u32,
    year: i32,
) -> bluepulse_data::Result<IceReport<'_>> {
    let scenario = projections.scenario(scenario_id)?;
    let sheets: Vec<SheetReport> = IceSheet::builtin()
        .into_iter()
        .map(|sheet| SheetReport {
            position: sheet.marker_position(),
            melt_intensity: sheet.melt_intensity(year),
            status: sheet.status(year, scenario_id),
            id: sheet.id,
            name: sheet.name,
        })
        .collect();
    let total_sea_level_contribution_mm: f64 = sheets
        .iter()
        .map(|s| s.status.sea_level_contribution_mm)
        .sum();
    Ok(IceReport {
        scenario,
        year,
        total_sea_level_contribution_mm,
        sheets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluepulse_data::Error;

    #[test]
    fn test_fly_ends_at_goal() {
        let options = FlyPathOptions {
            frame_count: 10,
            ..FlyPathOptions::default()
        };
        let path = fly(HOME_POSITION, 90.0, 0.0, &options);
        assert_eq!(path.len(), 10);
        let goal = path.goal();
        assert!(goal.x.abs() < 1e-12 && (goal.z + 2.6).abs() < 1e-12);
    }

    #[test]
    fn test_cloud_from_synthetic_source() {
        let source = SyntheticSource::new(7);
        let cloud = cloud(&source, 3, 1.08).unwrap();
        assert_eq!(cloud.len(), source.load().unwrap().data.len());
    }

    #[test]
    fn test_cloud_missing_file() {
        let source = JsonFileSource::new("/nonexistent/bluepulse.json");
        assert!(matches!(cloud(&source, 0, 1.08), Err(Error::Io { .. })));
    }

    #[test]
    fn test_flood_report() {
        let projections = SeaLevelProjections::default();
        let report = flood(&projections, 3, 2100).unwrap();
        assert_eq!(report.zones.len(), 8);
        assert!((report.sea_level_rise_mm - 613.8).abs() < 1e-9);

        let amsterdam = report.zones.iter().find(|z| z.id == "amsterdam").unwrap();
        assert!(amsterdam.status.is_flooded);
        let new_york = report.zones.iter().find(|z| z.id == "newyork").unwrap();
        assert!(!new_york.status.is_flooded);
        assert_eq!(new_york.status.affected_population, 0);
    }

    #[test]
    fn test_flood_report_totals_affected_population() {
        let projections = SeaLevelProjections::default();
        let report = flood(&projections, 3, 2100).unwrap();
        // Only Amsterdam, below sea level, floods; at full severity.
        assert_eq!(report.total_affected_population, 872_680);

        let report = flood(&projections, 0, 2024).unwrap();
        assert_eq!(report.total_affected_population, 872_680);
    }

    #[test]
    fn test_flood_unknown_scenario() {
        let projections = SeaLevelProjections::default();
        assert!(matches!(
            flood(&projections, 9, 2050),
            Err(Error::UnknownScenario(9))
        ));
    }

    fn sheet<'r>(report: &'r IceReport<'_>, id: &str) -> &'r SheetReport {
        report.sheets.iter().find(|s| s.id == id).unwrap()
    }

    #[test]
    fn test_ice_report() {
        let projections = SeaLevelProjections::default();
        let report = ice(&projections, 0, 2074).unwrap();
        let greenland = sheet(&report, "greenland");
        assert!((greenland.status.current_size_pct - 75.0).abs() < 1e-12);
        assert!(!greenland.status.is_critical);
        let arctic = sheet(&report, "arctic");
        assert_eq!(arctic.status.current_size_pct, 0.0);
        assert!(arctic.status.is_critical);
        assert_eq!(arctic.melt_intensity, 1.0);
        // 0.175 + 0.03 + 0.1
        let total = report.total_sea_level_contribution_mm;
        assert!((total - 0.305).abs() < 1e-9);
    }

    #[test]
    fn test_ice_report_scenario_speeds_melting() {
        let projections = SeaLevelProjections::default();
        let report = ice(&projections, 2, 2050).unwrap();
        assert_eq!(report.scenario.id, 2);
        let greenland = sheet(&report, "greenland");
        assert!((greenland.status.melted_pct - 26.0).abs() < 1e-12);
        let antarctica = sheet(&report, "antarctica");
        assert!((antarctica.status.current_size_pct - 89.6).abs() < 1e-9);
    }

    #[test]
    fn test_ice_unknown_scenario() {
        let projections = SeaLevelProjections::default();
        assert!(matches!(
            ice(&projections, 4, 2050),
            Err(Error::UnknownScenario(4))
        ));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_json_reports_output_failure() {
        let result = write_json(&mut ClosedPipe, &HOME_POSITION);
        assert!(matches!(result, Err(crate::error::Error::Output(_))));
    }

    #[test]
    fn test_write_json_ends_with_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &GeoCoordinate::new(1.0, 2.0)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["latitude"], 2.0);
    }

    #[test]
    fn test_flood_report_serializes_flat_status() {
        let projections = SeaLevelProjections::default();
        let report = flood(&projections, 0, 2024).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        let zone = &json["zones"][0];
        assert!(zone.get("floodLevelMm").is_some());
        assert!(zone.get("isFlooded").is_some());
        assert_eq!(json["scenario"]["id"], 0);
        assert!(json.get("totalAffectedPopulation").is_some());
        assert!(zone.get("affectedPopulation").is_some());
    }

    #[test]
    fn test_ice_report_serializes_flat_status() {
        let projections = SeaLevelProjections::default();
        let report = ice(&projections, 1, 2030).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        let sheet = &json["sheets"][0];
        assert_eq!(sheet["id"], "greenland");
        assert!(sheet.get("meltedPct").is_some());
        assert!(sheet.get("isCritical").is_some());
        assert!(json.get("totalSeaLevelContributionMm").is_some());
    }
}
