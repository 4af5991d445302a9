//! Geometry primitives.
use crate::AssemblyMode;
use nalgebra as na;
use std::f64::consts::TAU;

/// Euclidean distance between two points.
pub fn distance(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    (p2[0] - p1[0]).hypot(p2[1] - p1[1])
}

/// Map an angle in radians into `[0, 2π)`.
///
/// Negative and large-magnitude inputs are reduced as well.
pub fn normalize_angle(a: f64) -> f64 {
    let a = a.rem_euclid(TAU);
    // Rounding of tiny negative values lands on the upper bound
    if a >= TAU {
        0.
    } else {
        a
    }
}

/// Map an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(a: f64) -> f64 {
    let a = a.rem_euclid(360.);
    if a >= 360. {
        0.
    } else {
        a
    }
}

/// Radians to degrees.
pub fn to_degrees(a: f64) -> f64 {
    a.to_degrees()
}

/// Degrees to radians.
pub fn to_radians(a: f64) -> f64 {
    a.to_radians()
}

/// Arc cosine with the argument clamped into `[-1, 1]`.
///
/// Boundary configurations (tangent circles, collinear links) produce
/// arguments that drift slightly outside of the domain.
pub fn acos_clamped(x: f64) -> f64 {
    x.clamp(-1., 1.).acos()
}

/// The cosine of the angle opposite to side `c` in a triangle of sides
/// `a`, `b` and `c`. (law of cosines)
///
/// The value is unclamped, so it can be used to detect impossible triangles.
pub fn cos_law(a: f64, b: f64, c: f64) -> f64 {
    (a * a + b * b - c * c) / (2. * a * b)
}

/// Transmission angle in radians of a coupler `l3` and a follower `l4` when
/// the crank tip is `d` away from the follower pivot.
pub fn transmission_angle(l3: f64, l4: f64, d: f64) -> f64 {
    acos_clamped(cos_law(l3, l4, d))
}

/// Intersection of the circle centered at `c1` (radius `r1`) and the circle
/// centered at `c2` (radius `r2`).
///
/// [`AssemblyMode::Open`] returns the point on the left side of the directed
/// line `c1 → c2`, [`AssemblyMode::Crossed`] returns the point on the right
/// side. Returns [`None`] if the circles do not meet or are concentric.
pub fn circle_intersect(
    c1: [f64; 2],
    r1: f64,
    c2: [f64; 2],
    r2: f64,
    mode: AssemblyMode,
) -> Option<[f64; 2]> {
    let p1 = na::Point2::from(c1);
    let v = na::Point2::from(c2) - p1;
    let d = v.norm();
    if d < f64::EPSILON || d > r1 + r2 || d < (r1 - r2).abs() {
        return None;
    }
    let a = (r1 * r1 - r2 * r2 + d * d) / (2. * d);
    let h = (r1 * r1 - a * a).max(0.).sqrt();
    // (a + hi) * u = a * u + h * perp(u)
    let rot = na::UnitComplex::from_cos_sin_unchecked(a, h);
    let rot = match mode {
        AssemblyMode::Open => rot,
        AssemblyMode::Crossed => rot.conjugate(),
    };
    let p = p1 + rot * (v / d);
    Some([p.x, p.y])
}

/// Cross product of two planar vectors.
pub(crate) fn cross(v1: [f64; 2], v2: [f64; 2]) -> f64 {
    v1[0] * v2[1] - v1[1] * v2[0]
}

/// Vector from `p1` to `p2`.
pub(crate) fn sub(p2: [f64; 2], p1: [f64; 2]) -> [f64; 2] {
    [p2[0] - p1[0], p2[1] - p1[1]]
}

/// Angle of the vector from `p1` to `p2`.
pub(crate) fn heading(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    let [x, y] = sub(p2, p1);
    y.atan2(x)
}

/// Wrapped angular distance between two angles, in `[0, π]`.
pub(crate) fn angle_dist(a: f64, b: f64) -> f64 {
    let d = normalize_angle(a - b);
    d.min(TAU - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn intersect_sides() {
        use AssemblyMode::{Crossed, Open};
        // Unit circles at (0, 0) and (1, 0) meet at x = 1/2
        let (o, x) = ([0., 0.], [1., 0.]);
        let p = circle_intersect(o, 1., x, 1., Open).unwrap();
        assert_abs_diff_eq!(p[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 3f64.sqrt() / 2., epsilon = 1e-12);
        let p = circle_intersect(o, 1., x, 1., Crossed).unwrap();
        assert_abs_diff_eq!(p[1], -(3f64.sqrt()) / 2., epsilon = 1e-12);
    }

    #[test]
    fn intersect_degenerate() {
        use AssemblyMode::Open;
        let o = [0., 0.];
        // Concentric
        assert!(circle_intersect(o, 1., o, 1., Open).is_none());
        // Too far
        assert!(circle_intersect(o, 1., [3., 0.], 1., Open).is_none());
        // Contained
        assert!(circle_intersect(o, 5., [1., 0.], 1., Open).is_none());
        // Tangent
        let p = circle_intersect(o, 1., [2., 0.], 1., Open).unwrap();
        assert_abs_diff_eq!(p[0], 1., epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 0., epsilon = 1e-12);
    }

    #[test]
    fn clamp_domain() {
        assert_eq!(acos_clamped(1. + 1e-15), 0.);
        assert_abs_diff_eq!(acos_clamped(-1. - 1e-15), std::f64::consts::PI);
    }

    #[test]
    fn wrapped_distance() {
        assert_abs_diff_eq!(angle_dist(0.1, TAU - 0.1), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_dist(-0.5, 0.5), 1., epsilon = 1e-12);
    }
}
