//! Command-line arguments.

use std::path::PathBuf;

use bluepulse_geo::coords::{DATA_DOT_RADIUS, DEFAULT_MARKER_RADIUS};
use bluepulse_geo::fly::{DEFAULT_FLY_DISTANCE, DEFAULT_FRAME_COUNT};
use bluepulse_geo::{DVec3, Easing};
use clap::{Parser, Subcommand};

/// Seed used when no dataset file is given.
pub const DEFAULT_SEED: u64 = 42;

/// Parse an `x,y,z` triple into a point.
pub fn parse_point(s: &str) -> Result<DVec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got '{s}'"));
    };
    let component = |name: &str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|e| format!("invalid {name} component '{value}': {e}"))
    };
    Ok(DVec3::new(
        component("x", x)?,
        component("y", y)?,
        component("z", z)?,
    ))
}

#[derive(Parser, Debug)]
#[command(
    name = "bluepulse",
    version,
    about = "Globe geometry and ocean data layers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project a longitude/latitude onto a sphere.
    Project {
        /// Longitude in degrees, east positive.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Latitude in degrees, north positive.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Sphere radius.
        #[arg(long, default_value_t = DEFAULT_MARKER_RADIUS)]
        radius: f64,
    },

    /// Recover longitude/latitude from a point.
    Unproject {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, allow_hyphen_values = true)]
        z: f64,
    },

    /// Plan a camera flight to a location.
    Fly {
        /// Starting camera position (format: x,y,z). Defaults to the home
        /// position.
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Option<DVec3>,
        /// Target longitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Target latitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Final distance from the globe center.
        #[arg(long, default_value_t = DEFAULT_FLY_DISTANCE)]
        distance: f64,
        /// Number of frames in the path.
        #[arg(long, default_value_t = DEFAULT_FRAME_COUNT)]
        frames: usize,
        /// Easing curve applied to frame progress.
        #[arg(long, value_enum, default_value_t = Easing::default())]
        easing: Easing,
        /// Follow the great circle instead of a straight line.
        #[arg(long)]
        spherical: bool,
    },

    /// Build the point cloud for one time step of a dataset.
    Cloud {
        /// Dataset JSON file. Without it a synthetic dataset is generated.
        #[arg(long, conflicts_with = "seed")]
        input: Option<PathBuf>,
        /// Seed for the synthetic dataset.
        #[arg(long)]
        seed: Option<u64>,
        /// Time step to render.
        #[arg(long, default_value_t = 0)]
        time_index: usize,
        /// Shell radius for the points.
        #[arg(long, default_value_t = DATA_DOT_RADIUS)]
        radius: f64,
    },

    /// Print a synthetic dataset as JSON.
    Generate {
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Flood status of the coastal zones for a scenario and year.
    Flood {
        /// Scenario id (0-3).
        #[arg(long, default_value_t = 0)]
        scenario: u32,
        #[arg(long)]
        year: i32,
    },

    /// Ice-sheet melt state for a scenario and year.
    Ice {
        /// Scenario id (0-3); higher scenarios melt faster.
        #[arg(long, default_value_t = 0)]
        scenario: u32,
        #[arg(long)]
        year: i32,
    },
}
