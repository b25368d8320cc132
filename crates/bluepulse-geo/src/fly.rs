//! Camera fly-to path planning.
//!
//! A fly path is a precomputed, fixed-length sequence of camera positions from
//! the current camera position to a vantage point above a geographic target.
//! The whole path is computed up front; playing it back one frame per
//! rendered frame is the job of [`crate::camera::CameraDriver`].

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coords::{GeoCoordinate, project, slerp_dvec3};
use crate::easing::{Easing, ease_in_out};

/// Default final distance of the camera from the globe center.
///
/// Frames the target close to the viewer without clipping into the unit
/// globe.
pub const DEFAULT_FLY_DISTANCE: f64 = 2.6;
/// Default number of frames in a fly path.
pub const DEFAULT_FRAME_COUNT: usize = 60;

/// How intermediate frames move between the start and the goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Straight line through space. Near-antipodal flights can pass close
    /// to, or through, the globe.
    #[default]
    Linear,
    /// Great-circle direction with linearly interpolated distance from the
    /// globe center. Keeps the camera outside the globe as long as both
    /// endpoints are.
    Spherical,
}

/// Options for [`plan`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlyPathOptions {
    /// Final distance from the globe center.
    pub distance: f64,
    /// Number of frames. Zero is treated as one.
    pub frame_count: usize,
    /// Easing applied to the normalized frame index.
    pub easing: Easing,
    /// Interpolation between start and goal.
    pub interpolation: Interpolation,
}

impl Default for FlyPathOptions {
    fn default() -> Self {
        Self {
            distance: DEFAULT_FLY_DISTANCE,
            frame_count: DEFAULT_FRAME_COUNT,
            easing: Easing::CubicInOut,
            interpolation: Interpolation::Linear,
        }
    }
}

/// A precomputed sequence of camera positions.
///
/// Never empty. Paths are not modified after construction; planning a new
/// flight produces a new path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlyPath {
    frames: Vec<DVec3>,
}

impl FlyPath {
    /// All frames in playback order.
    #[must_use]
    pub fn frames(&self) -> &[DVec3] {
        &self.frames
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<DVec3> {
        self.frames.get(index).copied()
    }

    #[must_use]
    pub fn first(&self) -> DVec3 {
        self.frames[0]
    }

    /// The final camera position.
    #[must_use]
    pub fn goal(&self) -> DVec3 {
        self.frames[self.frames.len() - 1]
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec3> + '_ {
        self.frames.iter().copied()
    }

    #[must_use]
    pub fn into_frames(self) -> Vec<DVec3> {
        self.frames
    }
}

impl IntoIterator for FlyPath {
    type Item = DVec3;
    type IntoIter = std::vec::IntoIter<DVec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

/// The camera position `distance` above the given coordinate.
#[must_use]
pub fn goal_position(longitude: f64, latitude: f64, distance: f64) -> DVec3 {
    project(longitude, latitude, 1.0).normalize() * distance
}

/// Compute a straight-line, cubic-eased fly path.
///
/// Returns exactly `frame_count` frames (at least one). The first frame is
/// `start` when there is more than one frame and the last frame is the goal
/// position `distance` above (`longitude`, `latitude`).
#[must_use]
pub fn compute_fly_path(
    start: DVec3,
    longitude: f64,
    latitude: f64,
    distance: f64,
    frame_count: usize,
) -> FlyPath {
    let goal = goal_position(longitude, latitude, distance);
    let frames = sample(frame_count, goal, |i, last| {
        let t = ease_in_out(fraction(i, last));
        lerp_exact(start, goal, t)
    });
    debug!(
        frames = frames.len(),
        ?start,
        ?goal,
        "computed fly path to ({longitude}, {latitude})"
    );
    FlyPath { frames }
}

/// Plan a fly path to `target` with explicit options.
#[must_use]
pub fn plan(start: DVec3, target: GeoCoordinate, options: &FlyPathOptions) -> FlyPath {
    let goal = goal_position(target.longitude, target.latitude, options.distance);
    let easing = options.easing;

    // A camera sitting on the globe center has no direction to slerp from.
    let spherical =
        options.interpolation == Interpolation::Spherical && start.length_squared() > 0.0;
    let frames = if spherical {
        let start_dir = start.normalize();
        let goal_dir = goal.normalize();
        let start_len = start.length();
        sample(options.frame_count, goal, |i, last| {
            if i == 0 {
                return start;
            }
            if i == last {
                return goal;
            }
            let t = easing.apply(fraction(i, last));
            let length = start_len * (1.0 - t) + options.distance * t;
            slerp_dvec3(start_dir, goal_dir, t) * length
        })
    } else {
        sample(options.frame_count, goal, |i, last| {
            lerp_exact(start, goal, easing.apply(fraction(i, last)))
        })
    };

    debug!(
        frames = frames.len(),
        interpolation = ?options.interpolation,
        easing = ?options.easing,
        "planned fly path to ({}, {})",
        target.longitude,
        target.latitude
    );
    FlyPath { frames }
}

/// Emit `frame_count` frames, or just `goal` for a single frame.
///
/// `frame` receives the frame index and the last index (never zero).
fn sample(frame_count: usize, goal: DVec3, frame: impl Fn(usize, usize) -> DVec3) -> Vec<DVec3> {
    if frame_count <= 1 {
        return vec![goal];
    }
    let last = frame_count - 1;
    (0..frame_count).map(|i| frame(i, last)).collect()
}

/// `i / last` as a float.
#[allow(clippy::cast_precision_loss)]
fn fraction(i: usize, last: usize) -> f64 {
    i as f64 / last as f64
}

/// `a·(1 − t) + b·t`, exact at `t = 0` and `t = 1`.
fn lerp_exact(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_three_frame_path() {
        let start = DVec3::new(0.0, 0.0, 3.0);
        let path = compute_fly_path(start, 0.0, 0.0, 2.6, 3);

        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), start);
        assert!(path.goal().abs_diff_eq(DVec3::new(2.6, 0.0, 0.0), 1e-12));

        let mid = path.frames()[1];
        assert!(mid.x > 0.0 && mid.x < 2.6, "{mid:?}");
        assert!(mid.z > 0.0 && mid.z < 3.0, "{mid:?}");
    }

    #[test]
    fn test_last_frame_is_scaled_projection() {
        let start = DVec3::new(0.0, 0.0, 3.1);
        let path = compute_fly_path(start, -73.5, 40.5, 2.6, 60);
        let expected = project(-73.5, 40.5, 1.0).normalize() * 2.6;
        assert_eq!(path.goal(), expected);
        assert!((path.goal().length() - 2.6).abs() < 1e-12);
    }

    #[test]
    fn test_single_frame_is_goal() {
        let path = compute_fly_path(DVec3::new(0.0, 0.0, 3.0), 12.3155, 45.4408, 2.6, 1);
        assert_eq!(path.len(), 1);
        assert_eq!(path.first(), goal_position(12.3155, 45.4408, 2.6));
    }

    #[test]
    fn test_zero_frames_clamped_to_one() {
        let path = compute_fly_path(DVec3::Z, 0.0, 0.0, 2.6, 0);
        assert_eq!(path.len(), 1);
        assert!(!path.is_empty());
    }

    #[test]
    fn test_frames_progress_monotonically_toward_goal() {
        let start = DVec3::new(0.0, 0.0, 3.0);
        let path = compute_fly_path(start, 90.0, 0.0, 2.6, 30);
        let goal = path.goal();
        let distances: Vec<f64> = path.iter().map(|p| p.distance(goal)).collect();
        for pair in distances.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-12);
        }
    }

    #[test]
    fn test_plan_linear_matches_compute() {
        let start = DVec3::new(0.3, 0.2, 3.0);
        let target = GeoCoordinate::new(139.7, 35.6);
        let planned = plan(start, target, &FlyPathOptions::default());
        let computed = compute_fly_path(
            start,
            139.7,
            35.6,
            DEFAULT_FLY_DISTANCE,
            DEFAULT_FRAME_COUNT,
        );
        assert_eq!(planned, computed);
    }

    #[test]
    fn test_spherical_stays_outside_globe_for_antipodal_flight() {
        let start = goal_position(180.0, 0.0, 2.6);
        let options = FlyPathOptions {
            interpolation: Interpolation::Spherical,
            frame_count: 41,
            ..FlyPathOptions::default()
        };
        let path = plan(start, GeoCoordinate::new(0.0, 0.0), &options);
        assert_eq!(path.first(), start);
        assert_eq!(path.goal(), goal_position(0.0, 0.0, 2.6));
        for frame in path.iter() {
            assert!((frame.length() - 2.6).abs() < 1e-9, "{frame:?}");
        }

        // The straight line passes through the globe center.
        let linear = plan(
            start,
            GeoCoordinate::new(0.0, 0.0),
            &FlyPathOptions {
                frame_count: 41,
                ..FlyPathOptions::default()
            },
        );
        assert!(linear.get(20).is_some_and(|mid| mid.length() < 1.0));
    }

    #[test]
    fn test_spherical_from_origin_falls_back_to_linear() {
        let options = FlyPathOptions {
            interpolation: Interpolation::Spherical,
            frame_count: 5,
            ..FlyPathOptions::default()
        };
        let path = plan(DVec3::ZERO, GeoCoordinate::new(10.0, 10.0), &options);
        assert_eq!(path.first(), DVec3::ZERO);
        assert!(path.iter().all(|p| p.is_finite()));
    }

    proptest! {
        #[test]
        fn test_path_length_and_endpoints(
            x in -5.0f64..5.0,
            y in -5.0f64..5.0,
            z in -5.0f64..5.0,
            lon in -180.0f64..180.0,
            lat in -90.0f64..90.0,
            distance in 1.1f64..10.0,
            frame_count in 2usize..200,
        ) {
            let start = DVec3::new(x, y, z);
            let path = compute_fly_path(start, lon, lat, distance, frame_count);
            prop_assert_eq!(path.len(), frame_count);
            prop_assert_eq!(path.first(), start);
            prop_assert_eq!(path.goal(), goal_position(lon, lat, distance));
        }
    }
}
