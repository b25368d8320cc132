//! GPU-ready point cloud for one time step of a dataset.

use bluepulse_geo::coords::{DATA_DOT_RADIUS, project};
use serde::Serialize;

use crate::colormap::{color_for, normalize, offset_lightness, to_rgb};
use crate::dataset::ChlorophyllDataset;
use crate::error::{Error, Result};

/// Point size for missing or minimum values.
const BASE_SIZE: f32 = 0.008;
/// Extra size at the top of the scale.
const SIZE_RANGE: f32 = 0.022;
/// Amplitude of the lightness shimmer.
const SHIMMER_AMPLITUDE: f64 = 0.04;
/// Shimmer phase advance per time step.
const SHIMMER_TIME_PHASE: f64 = 0.25;
/// Shimmer phase offset between neighbouring points.
const SHIMMER_POINT_PHASE: f64 = 0.15;

/// Flat per-vertex attribute arrays, one entry per dataset point.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointCloud {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub sizes: Vec<f32>,
}

impl PointCloud {
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// [`build_point_cloud`] at [`DATA_DOT_RADIUS`].
pub fn build_default_point_cloud(
    dataset: &ChlorophyllDataset,
    time_index: usize,
) -> Result<PointCloud> {
    build_point_cloud(dataset, time_index, DATA_DOT_RADIUS)
}

/// Project every dataset point and colour and size it by its value at
/// `time_index`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn build_point_cloud(
    dataset: &ChlorophyllDataset,
    time_index: usize,
    radius: f64,
) -> Result<PointCloud> {
    let len = dataset.time_steps();
    if time_index >= len {
        return Err(Error::TimeIndexOutOfRange {
            index: time_index,
            len,
        });
    }

    let (vmin, vmax) = (dataset.meta.min, dataset.meta.max);
    let mut cloud = PointCloud {
        positions: Vec::with_capacity(dataset.data.len()),
        colors: Vec::with_capacity(dataset.data.len()),
        sizes: Vec::with_capacity(dataset.data.len()),
    };

    for (i, point) in dataset.data.iter().enumerate() {
        let value = point.value_at(time_index);

        let position = project(point.lon, point.lat, radius).as_vec3();
        cloud.positions.push(position.to_array());

        let shimmer = SHIMMER_AMPLITUDE
            * (time_index as f64 * SHIMMER_TIME_PHASE + i as f64 * SHIMMER_POINT_PHASE).sin();
        let color = offset_lightness(color_for(value, vmin, vmax), shimmer);
        cloud.colors.push(to_rgb(color));

        let t = value.map_or(0.0, |v| normalize(v, vmin, vmax) as f32);
        cloud.sizes.push(BASE_SIZE + SIZE_RANGE * t);
    }

    Ok(cloud)
}
