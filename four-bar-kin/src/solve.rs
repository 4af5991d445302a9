//! Forward and inverse position analysis.
use crate::{
    geom::{angle_dist, circle_intersect, cross, distance, heading, sub, transmission_angle},
    AngleBound, AssemblyMode, FourBar,
};
use std::f64::consts::TAU;

/// Snapshot of the linkage at one input angle.
///
/// Angles are in radians. If [`MechState::valid`] is false, the loop cannot be
/// closed at this input angle: `b` is the origin and `theta3`, `theta4` and
/// the transmission angle are zero.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct MechState {
    /// Driver pivot
    pub o2: [f64; 2],
    /// Follower pivot
    pub o4: [f64; 2],
    /// Crank tip
    pub a: [f64; 2],
    /// Coupler-follower joint
    pub b: [f64; 2],
    /// Input angle (driver)
    pub theta2: f64,
    /// Coupler angle
    pub theta3: f64,
    /// Output angle (follower)
    pub theta4: f64,
    /// Transmission angle in `[0, π]`
    pub trans: f64,
    /// The loop is closed
    pub valid: bool,
}

impl MechState {
    fn invalid(fb: &FourBar, theta2: f64, a: [f64; 2]) -> Self {
        Self {
            o2: fb.o2(),
            o4: fb.o4(),
            a,
            theta2,
            ..Self::default()
        }
    }

    /// Build a closed state from known joint positions.
    pub(crate) fn closed(fb: &FourBar, theta2: f64, a: [f64; 2], b: [f64; 2]) -> Self {
        let o4 = fb.o4();
        Self {
            o2: fb.o2(),
            o4,
            a,
            b,
            theta2,
            theta3: heading(a, b),
            theta4: heading(o4, b),
            trans: transmission_angle(fb.l3(), fb.l4(), distance(a, o4)),
            valid: true,
        }
    }

    /// Joint positions `[O2, O4, A, B]`, if valid.
    pub fn joints(&self) -> Option<[[f64; 2]; 4]> {
        self.valid.then_some([self.o2, self.o4, self.a, self.b])
    }

    /// The assembly mode this state is on, by the side of `B` from the
    /// directed line `A → O4`.
    ///
    /// Returns [`None`] if the state is invalid or `B` is on the line.
    pub fn assembly_mode(&self) -> Option<AssemblyMode> {
        if !self.valid {
            return None;
        }
        let c = cross(sub(self.o4, self.a), sub(self.b, self.a));
        if c > 0. {
            Some(AssemblyMode::Open)
        } else if c < 0. {
            Some(AssemblyMode::Crossed)
        } else {
            None
        }
    }
}

impl FourBar {
    /// Forward position analysis at the input angle `theta2` (radians).
    ///
    /// Never fails: an unreachable input angle returns an invalid state.
    pub fn solve(&self, theta2: f64) -> MechState {
        let a = [self.l2() * theta2.cos(), self.l2() * theta2.sin()];
        match circle_intersect(a, self.l3(), self.o4(), self.l4(), self.mode()) {
            Some(b) => MechState::closed(self, theta2, a, b),
            None => MechState::invalid(self, theta2, a),
        }
    }

    /// Inverse position analysis, an input angle that reaches the output angle
    /// `theta4` (radians).
    ///
    /// The canonical crank branch is the first one of
    /// [`FourBar::solve_inverse_all()`]. Returns [`None`] if the follower can
    /// not reach this angle.
    pub fn solve_inverse(&self, theta4: f64) -> Option<f64> {
        self.solve_inverse_all(theta4).map(|[t, _]| t)
    }

    /// Both crank angles that reach the output angle `theta4` (radians).
    ///
    /// The first is the crank tip on the left side of the directed line
    /// `O2 → B`, and the second is on the right side. Angles are in
    /// `(-π, π]`.
    pub fn solve_inverse_all(&self, theta4: f64) -> Option<[f64; 2]> {
        let [l1, l2, l3, l4] = self.planar_loop();
        let b = [l1 + l4 * theta4.cos(), l4 * theta4.sin()];
        let crank = |mode| {
            let [x, y] = circle_intersect(self.o2(), l2, b, l3, mode)?;
            Some(y.atan2(x))
        };
        Some([crank(AssemblyMode::Open)?, crank(AssemblyMode::Crossed)?])
    }

    /// Inverse position analysis that keeps the crank continuous, choosing
    /// the solution closest to the previous input angle `prev`.
    pub fn solve_inverse_near(&self, theta4: f64, prev: f64) -> Option<f64> {
        let [t1, t2] = self.solve_inverse_all(theta4)?;
        if angle_dist(t1, prev) <= angle_dist(t2, prev) {
            Some(t1)
        } else {
            Some(t2)
        }
    }

    /// Sample `res` states in every range of the input angle bound.
    ///
    /// A fully rotating driver is sampled in `[0, 2π)`, swinging ranges
    /// include both ends.
    pub fn sweep(&self, res: usize) -> Vec<MechState> {
        let bound = self.angle_bound();
        let closed = matches!(bound, AngleBound::Closed);
        bound
            .intervals()
            .into_iter()
            .flat_map(|[start, end]| linspace(start, end, res, closed))
            .map(|t| self.solve(t))
            .collect()
    }
}

fn linspace(start: f64, end: f64, res: usize, closed: bool) -> impl Iterator<Item = f64> {
    let end = if end > start { end } else { end + TAU };
    let step = match res {
        0 | 1 => 0.,
        _ if closed => (end - start) / res as f64,
        _ => (end - start) / (res - 1) as f64,
    };
    (0..res).map(move |n| start + n as f64 * step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn linspace_ends() {
        let v = linspace(0., 1., 5, false).collect::<Vec<_>>();
        assert_eq!(v, [0., 0.25, 0.5, 0.75, 1.]);
        let v = linspace(0., TAU, 4, true).collect::<Vec<_>>();
        assert_abs_diff_eq!(v[3], TAU * 0.75);
        assert_eq!(linspace(0., 1., 0, false).count(), 0);
    }

    #[test]
    fn mode_of_state() {
        use AssemblyMode::{Crossed, Open};
        let fb = FourBar::example();
        assert_eq!(fb.solve(FRAC_PI_2).assembly_mode(), Some(Open));
        let fb = fb.with_mode(Crossed);
        assert_eq!(fb.solve(FRAC_PI_2).assembly_mode(), Some(Crossed));
        let fb = FourBar::new(1000., 100., 300., 200., Open).unwrap();
        assert_eq!(fb.solve(0.).assembly_mode(), None);
    }
}
