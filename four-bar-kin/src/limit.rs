//! Limit analysis: output angle range and transmission angle range.
use crate::{
    geom::{
        acos_clamped, cos_law, normalize_angle, normalize_degrees, to_degrees, transmission_angle,
    },
    AngleBound, FourBar, MechState,
};
use std::f64::consts::PI;

/// Tolerance of the cosine when checking a triangle is possible.
const COS_TOL: f64 = 1e-12;

/// Collinear configurations of the driver and the coupler.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Collinear {
    /// Driver and coupler stretched in line, `|O2 B| = l2 + l3`
    Extended,
    /// Driver and coupler folded on each other, `|O2 B| = |l2 - l3|`
    Folded,
}

/// Extreme transmission angles in degrees.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TransmissionBound {
    /// The range over a full input rotation
    Range {
        /// Minimum transmission angle
        min: f64,
        /// Maximum transmission angle
        max: f64,
    },
    /// The crank and the coupler-follower dyad never share a distance
    Undefined,
}

impl TransmissionBound {
    /// Turn into `[min, max]`.
    pub fn to_value(self) -> Option<[f64; 2]> {
        match self {
            Self::Range { min, max } => Some([min, max]),
            Self::Undefined => None,
        }
    }

    /// Return true if the range exists.
    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

/// Result of the limit analysis.
///
/// Angles are in degrees.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct LimitAnalysis {
    /// Output angle range `[min, max]` in `[0, 360)`, if both collinear
    /// configurations are reachable
    pub rocker: Option<[f64; 2]>,
    /// Follower swing angle between the two limits
    ///
    /// Only known for a fully rotating driver. Otherwise the driver stops at
    /// its dead points before the follower travels from one limit to the
    /// other.
    pub swing: Option<f64>,
    /// Transmission angle range
    pub transmission: TransmissionBound,
    /// The state at the minimum output angle
    ///
    /// If only one collinear configuration is reachable, its state is kept
    /// here and [`LimitAnalysis::limit_state_max`] is empty.
    pub limit_state_min: Option<MechState>,
    /// The state at the maximum output angle
    pub limit_state_max: Option<MechState>,
}

impl LimitAnalysis {
    /// Return true if the follower swings between two limits.
    pub fn has_rocker_limits(&self) -> bool {
        self.rocker.is_some()
    }
}

impl FourBar {
    /// Compute the output angle limits and the transmission angle limits.
    pub fn analyze_limits(&self) -> LimitAnalysis {
        let deg = |s: &MechState| normalize_degrees(to_degrees(normalize_angle(s.theta4)));
        let states = (
            self.collinear_state(Collinear::Extended),
            self.collinear_state(Collinear::Folded),
        );
        let (rocker, limit_state_min, limit_state_max) = match states {
            (Some(s1), Some(s2)) => {
                let (lo, hi) = if deg(&s1) <= deg(&s2) {
                    (s1, s2)
                } else {
                    (s2, s1)
                };
                (Some([deg(&lo), deg(&hi)]), Some(lo), Some(hi))
            }
            (s @ Some(_), None) | (None, s @ Some(_)) => (None, s, None),
            (None, None) => (None, None, None),
        };
        // Both limits are in the same half-plane of the ground link
        let swing = match (rocker, self.angle_bound()) {
            (Some([min, max]), AngleBound::Closed) => Some(max - min),
            _ => None,
        };
        LimitAnalysis {
            rocker,
            swing,
            transmission: self.transmission_bound(),
            limit_state_min,
            limit_state_max,
        }
    }

    /// The state where the driver and the coupler are collinear.
    ///
    /// The state is on the same assembly mode as the linkage. Returns
    /// [`None`] if the configuration is unreachable.
    pub fn collinear_state(&self, kind: Collinear) -> Option<MechState> {
        let [l1, l2, l3, l4] = self.planar_loop();
        // `A = scale * B`
        let (d, scale) = match kind {
            Collinear::Extended => (l2 + l3, l2 / (l2 + l3)),
            Collinear::Folded if l2 > l3 => (l2 - l3, l2 / (l2 - l3)),
            Collinear::Folded if l2 < l3 => (l3 - l2, -l2 / (l3 - l2)),
            Collinear::Folded => {
                tracing::trace!(l2, l3, "folded state puts the joint on the pivot");
                return None;
            }
        };
        // Interior angle at `O4` of the triangle `O2, O4, B`
        let cos_g = cos_law(l1, l4, d);
        if !(-1. - COS_TOL..=1. + COS_TOL).contains(&cos_g) {
            tracing::trace!(?kind, cos_g, "collinear configuration is unreachable");
            return None;
        }
        let g = acos_clamped(cos_g);
        // Side of `B` from the line `A → O4` is the sign of `(1 - scale) * B.y`
        let side = self.mode().sign() * (1. - scale).signum();
        let theta4 = PI - side * g;
        let b = [l1 + l4 * theta4.cos(), l4 * theta4.sin()];
        let a = [scale * b[0], scale * b[1]];
        let theta2 = a[1].atan2(a[0]);
        Some(MechState::closed(self, theta2, a, b))
    }

    /// The transmission angle range over a full input rotation.
    pub fn transmission_bound(&self) -> TransmissionBound {
        let [l1, l2, l3, l4] = self.planar_loop();
        let d_min = (l1 - l2).abs().max((l3 - l4).abs());
        let d_max = (l1 + l2).min(l3 + l4);
        if d_min > d_max {
            tracing::trace!(d_min, d_max, "transmission angle is undefined");
            return TransmissionBound::Undefined;
        }
        TransmissionBound::Range {
            min: to_degrees(transmission_angle(l3, l4, d_min)),
            max: to_degrees(transmission_angle(l3, l4, d_max)),
        }
    }
}
