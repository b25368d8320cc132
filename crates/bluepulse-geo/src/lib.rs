//! Globe geometry for the ocean globe viewer.
//!
//! This crate places data on the globe and moves the camera around it:
//!
//! - [`coords`]: longitude/latitude to scene-space projection and its inverse
//! - [`easing`]: animation progress curves
//! - [`fly`]: precomputed camera fly-to paths
//! - [`camera`]: per-frame playback of fly paths and globe auto-rotation
//!
//! Everything except [`camera`] is pure: each call computes a fresh value
//! from its arguments and keeps no state.
//!
//! # Example
//!
//! ```
//! use bluepulse_geo::{DVec3, compute_fly_path, project};
//!
//! let marker = project(-80.1918, 25.7617, 1.08);
//! assert!((marker.length() - 1.08).abs() < 1e-9);
//!
//! let path = compute_fly_path(DVec3::new(0.0, 0.0, 3.0), -80.1918, 25.7617, 2.6, 60);
//! assert_eq!(path.len(), 60);
//! ```

pub mod camera;
pub mod coords;
pub mod easing;
pub mod fly;

pub use camera::{AutoRotation, CameraDriver, FlyAnimation, RotationCommand, RotationControl};
pub use coords::{
    DEFAULT_MARKER_RADIUS, GeoCoordinate, project, project_default, slerp_dvec3, unproject,
};
pub use easing::{Easing, ease_in_out, smootherstep};
pub use fly::{
    DEFAULT_FLY_DISTANCE, DEFAULT_FRAME_COUNT, FlyPath, FlyPathOptions, Interpolation,
    compute_fly_path, goal_position, plan,
};

// Re-export the vector type used throughout the public API.
pub use glam::DVec3;
