//! Easing curves for marker transitions.

/// Maps linear progress `0.0..=1.0` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interpolator {
    Linear,
    /// Material "standard" curve: cubic Bézier (0.4, 0.0, 0.2, 1.0).
    #[default]
    FastOutSlowIn,
    EaseOutCubic,
    /// Arbitrary cubic Bézier with control points (x1, y1) and (x2, y2).
    CubicBezier(f64, f64, f64, f64),
}

impl Interpolator {
    /// Eased progress for linear progress `t`. Input is clamped to `0..=1`.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Interpolator::Linear => t,
            Interpolator::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Interpolator::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Interpolator::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

// =============================================================================
// Cubic Bézier
// =============================================================================

/// One coordinate of a cubic Bézier from (0,0) to (1,1) at parameter `s`.
#[inline]
fn bezier_axis(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn bezier_axis_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Solve x(s) = x for s, then return y(s).
///
/// Newton iterations first; bisection when the slope flattens out.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut s = x;
    for _ in 0..8 {
        let error = bezier_axis(x1, x2, s) - x;
        if error.abs() < EPSILON {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= error / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let value = bezier_axis(x1, x2, s);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_axis(y1, y2, s)
}
