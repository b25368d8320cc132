//! Coordinate conversion utilities.
//!
//! Maps geographic coordinates (longitude, latitude) onto the globe sphere
//! used by the scene. The globe is Y-up: latitude +90° sits on +Y, and
//! longitude 0° on the equator sits on +X. Longitude is negated before it is
//! used as the azimuth so that projected points line up with the
//! equirectangular Earth texture wrapped around the sphere.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Default radius for surface markers, slightly above the unit globe.
pub const DEFAULT_MARKER_RADIUS: f64 = 1.01;
/// Radius for chlorophyll data dots.
pub const DATA_DOT_RADIUS: f64 = 1.08;
/// Radius for flood zone markers.
pub const FLOOD_MARKER_RADIUS: f64 = 1.08;
/// Radius for ice sheet markers.
pub const ICE_MARKER_RADIUS: f64 = 1.05;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Longitude in degrees, nominally in [-180, 180].
    pub longitude: f64,
    /// Latitude in degrees, nominally in [-90, 90].
    pub latitude: f64,
}

impl GeoCoordinate {
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Project this coordinate onto a sphere of the given radius.
    #[must_use]
    pub fn to_point(self, radius: f64) -> DVec3 {
        project(self.longitude, self.latitude, radius)
    }
}

/// Convert longitude, latitude (degrees), and radius to a point on the globe.
///
/// Uses colatitude `φ = 90° − lat` and azimuth `θ = −lon`:
///
/// ```text
/// x = r·sin φ·cos θ
/// y = r·cos φ
/// z = r·sin φ·sin θ
/// ```
///
/// The result always lies at distance `radius` from the origin. Any real
/// input is accepted: longitudes wrap through the trigonometric functions,
/// latitudes outside [-90, 90] fold back over the poles, and non-finite input
/// produces non-finite output.
#[must_use]
pub fn project(longitude: f64, latitude: f64, radius: f64) -> DVec3 {
    let phi = (90.0 - latitude).to_radians();
    let theta = (-longitude).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    DVec3::new(
        radius * sin_phi * cos_theta,
        radius * cos_phi,
        radius * sin_phi * sin_theta,
    )
}

/// [`project`] at [`DEFAULT_MARKER_RADIUS`].
#[must_use]
pub fn project_default(longitude: f64, latitude: f64) -> DVec3 {
    project(longitude, latitude, DEFAULT_MARKER_RADIUS)
}

/// Convert a point on (or off) the globe back to longitude and latitude.
///
/// Inverse of [`project`]; the distance from the origin is discarded.
/// Longitude is returned in (-180, 180] and latitude in [-90, 90]. The origin
/// itself maps to (0, 0).
#[must_use]
pub fn unproject(point: DVec3) -> GeoCoordinate {
    let radius = point.length();
    if radius == 0.0 {
        return GeoCoordinate::new(0.0, 0.0);
    }
    let latitude = (point.y / radius).clamp(-1.0, 1.0).asin().to_degrees();
    // z = r·sin φ·sin(−lon), x = r·sin φ·cos(−lon).
    let longitude = (-point.z).atan2(point.x).to_degrees();
    GeoCoordinate::new(longitude, latitude)
}

/// Great-circle interpolation between two unit vectors.
///
/// The result is renormalized, so it stays on the unit sphere even when
/// the weights lose precision near `theta == 0`. Antipodal inputs have no
/// unique great circle; the arc then turns through
/// [`DVec3::any_orthonormal_vector`] of `a`.
#[must_use]
pub fn slerp_dvec3(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    let theta = a.dot(b).clamp(-1.0, 1.0).acos();
    if theta < 1e-10 {
        return a.lerp(b, t).normalize();
    }

    let arc = if theta > PI - 1e-6 {
        let angle = t * PI;
        a * angle.cos() + a.any_orthonormal_vector() * angle.sin()
    } else {
        let sin_theta = theta.sin();
        let from_a = ((1.0 - t) * theta).sin() / sin_theta;
        let from_b = (t * theta).sin() / sin_theta;
        a * from_a + b * from_b
    };
    arc.normalize()
}
