//! Easing curves for animation progress.

use serde::{Deserialize, Serialize};

/// Cubic ease-in-out.
///
/// Maps progress in [0, 1] to [0, 1] with `f(0) = 0` and `f(1) = 1`,
/// accelerating through the first half and decelerating through the second.
/// Callers clamp before calling; out-of-range input is not meaningful.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Quintic smootherstep with zero first and second derivatives at both ends.
#[must_use]
pub fn smootherstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Selectable easing curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// [`ease_in_out`].
    #[default]
    CubicInOut,
    /// [`smootherstep`].
    SmootherStep,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::CubicInOut => ease_in_out(t),
            Self::SmootherStep => smootherstep(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_endpoints() {
        for easing in [Easing::Linear, Easing::CubicInOut, Easing::SmootherStep] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_monotonic_on_uniform_samples() {
        let samples: Vec<f64> = (0..20).map(|i| ease_in_out(f64::from(i) / 19.0)).collect();
        for pair in samples.windows(2) {
            assert!(pair[1] >= pair[0], "{} then {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_symmetric_about_midpoint() {
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);
        for i in 0..=10 {
            let t = f64::from(i) / 20.0;
            assert!((ease_in_out(t) + ease_in_out(1.0 - t) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_slow_at_ends_fast_in_middle() {
        let start = ease_in_out(0.1) - ease_in_out(0.0);
        let middle = ease_in_out(0.55) - ease_in_out(0.45);
        let end = ease_in_out(1.0) - ease_in_out(0.9);
        assert!(start < middle);
        assert!(end < middle);
    }

    proptest! {
        #[test]
        fn test_ease_in_out_stays_in_unit_range(t in 0.0f64..=1.0) {
            let eased = ease_in_out(t);
            prop_assert!((0.0..=1.0).contains(&eased));
        }

        #[test]
        fn test_ease_in_out_non_decreasing(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ease_in_out(lo) <= ease_in_out(hi));
        }
    }
}
