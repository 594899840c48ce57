//! Piecewise linear reshaping of a single axis around a pivot value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Evaluate the two-segment line `min → center → max` at `x`.
///
/// `x` is clamped to `[min.x, max.x]`. At `x == center.x` the result is
/// exactly `center.y`, and a segment of zero width also yields `center.y`.
pub fn interpolate_gap(min: Point, center: Point, max: Point, x: f64) -> f64 {
    if !x.is_finite() {
        return center.y;
    }
    let x = x.max(min.x).min(max.x);

    if x == center.x {
        return center.y;
    }

    if x < center.x {
        let width = center.x - min.x;
        if width <= 0.0 {
            return center.y;
        }
        let t = (x - min.x) / width;
        min.y + t * (center.y - min.y)
    } else {
        let width = max.x - center.x;
        if width <= 0.0 {
            return center.y;
        }
        let t = (x - center.x) / width;
        center.y + t * (max.y - center.y)
    }
}

/// Saturate `value` to `[min, max]`.
///
/// Unlike [`Ord::clamp`] this never panics on an inverted range.
pub fn auto_range_number<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
