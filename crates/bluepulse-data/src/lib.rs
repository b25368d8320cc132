//! Data layers for the ocean globe viewer.
//!
//! This crate turns datasets into things the globe can draw:
//!
//! - [`dataset`]: per-location chlorophyll time series
//! - [`source`]: where datasets come from, chosen by the caller
//! - [`colormap`]: value to colour mapping
//! - [`cloud`]: projected, coloured point clouds for one time step
//! - [`climate`]: sea-level scenarios, flood zones and ice sheets
//! - [`timeline`]: the shared time-step cursor
//!
//! # Example
//!
//! ```
//! use bluepulse_data::{DataSource, SyntheticSource, build_default_point_cloud};
//!
//! let dataset = SyntheticSource::new(42).load()?;
//! let cloud = build_default_point_cloud(&dataset, 0)?;
//! assert_eq!(cloud.len(), dataset.data.len());
//! # Ok::<(), bluepulse_data::Error>(())
//! ```

pub mod climate;
pub mod cloud;
pub mod colormap;
pub mod dataset;
mod error;
pub mod source;
pub mod timeline;

pub use climate::{
    FloodStatus, FloodZone, IceSheet, IceStatus, Scenario, SeaLevelAnimator, SeaLevelProjections,
};
pub use cloud::{PointCloud, build_default_point_cloud, build_point_cloud};
pub use colormap::color_for;
pub use dataset::{ChlorophyllDataset, DatasetMeta, SeriesPoint};
pub use error::{Error, Result};
pub use source::{DataSource, JsonFileSource, SyntheticSource};
pub use timeline::Timeline;
