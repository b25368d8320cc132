//! Blue-to-red colour scale for data values.

use bevy_color::{Hsla, Srgba};

/// Added to the scale width so a degenerate `vmin == vmax` range does not
/// divide by zero.
const RANGE_EPSILON: f64 = 1e-9;
/// Hue at the bottom of the scale (blue).
const HUE_LOW: f64 = 200.0;
const SATURATION: f32 = 0.8;
const LIGHTNESS: f32 = 0.55;

/// Colour for missing values.
pub const MISSING: Hsla = Hsla::hsl(0.0, 0.0, 0.0);

/// Position of `value` between `vmin` and `vmax`, clamped to [0, 1].
#[must_use]
pub fn normalize(value: f64, vmin: f64, vmax: f64) -> f64 {
    ((value - vmin) / (vmax - vmin + RANGE_EPSILON)).clamp(0.0, 1.0)
}

/// Colour for a data value; missing values are [`MISSING`].
///
/// Hue runs linearly from 200° (blue) at `vmin` to 0° (red) at `vmax`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn color_for(value: Option<f64>, vmin: f64, vmax: f64) -> Hsla {
    let Some(value) = value else {
        return MISSING;
    };
    let t = normalize(value, vmin, vmax);
    Hsla::hsl((HUE_LOW - HUE_LOW * t) as f32, SATURATION, LIGHTNESS)
}

/// Shift lightness by `delta`, clamped to [0, 1].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn offset_lightness(color: Hsla, delta: f64) -> Hsla {
    Hsla {
        lightness: (f64::from(color.lightness) + delta).clamp(0.0, 1.0) as f32,
        ..color
    }
}

/// `Srgba` components in [0, 1], alpha dropped.
#[must_use]
pub fn to_rgb(color: Hsla) -> [f32; 3] {
    let Srgba { red, green, blue, .. } = Srgba::from(color);
    [red, green, blue]
}

/// CSS `hsl()` notation.
#[must_use]
pub fn css(color: Hsla) -> String {
    format!(
        "hsl({:.1}, {:.1}%, {:.1}%)",
        color.hue,
        color.saturation * 100.0,
        color.lightness * 100.0
    )
}
