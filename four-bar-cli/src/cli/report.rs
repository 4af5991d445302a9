use four_bar_kin::{FourBar, LimitAnalysis, MechState, TransmissionBound};
use serde::Serialize;

fn round4(v: f64) -> f64 {
    (v * 1e4).round() / 1e4
}

fn deg(rad: f64) -> f64 {
    round4(rad.to_degrees())
}

fn point([x, y]: [f64; 2]) -> [f64; 2] {
    [round4(x), round4(y)]
}

#[derive(Serialize)]
pub(super) struct LinkageReport {
    l1: f64,
    l2: f64,
    l3: f64,
    l4: f64,
    mode: String,
}

impl LinkageReport {
    pub(super) fn new(fb: &FourBar) -> Self {
        Self {
            l1: fb.l1(),
            l2: fb.l2(),
            l3: fb.l3(),
            l4: fb.l4(),
            mode: fb.mode().to_string(),
        }
    }
}

#[derive(Serialize)]
pub(super) struct StateReport {
    valid: bool,
    theta2_deg: f64,
    a: [f64; 2],
    b: Option<[f64; 2]>,
    theta3_deg: Option<f64>,
    theta4_deg: Option<f64>,
    transmission_deg: Option<f64>,
}

impl StateReport {
    pub(super) fn new(s: &MechState) -> Self {
        Self {
            valid: s.valid,
            theta2_deg: deg(s.theta2),
            a: point(s.a),
            b: s.valid.then_some(point(s.b)),
            theta3_deg: s.valid.then_some(deg(s.theta3)),
            theta4_deg: s.valid.then_some(deg(s.theta4)),
            transmission_deg: s.valid.then_some(deg(s.trans)),
        }
    }
}

#[derive(Serialize)]
pub(super) struct InverseReport {
    theta4_deg: f64,
    reachable: bool,
    theta2_deg: Option<f64>,
    other_deg: Option<f64>,
}

impl InverseReport {
    pub(super) fn new(fb: &FourBar, theta4: f64, near: Option<f64>) -> Self {
        let theta2 = match near {
            Some(prev) => fb.solve_inverse_near(theta4, prev),
            None => fb.solve_inverse(theta4),
        };
        // The solution on the other branch
        let other = fb
            .solve_inverse_all(theta4)
            .zip(theta2)
            .map(|([t1, t2], t)| if t1 == t { t2 } else { t1 });
        Self {
            theta4_deg: deg(theta4),
            reachable: theta2.is_some(),
            theta2_deg: theta2.map(deg),
            other_deg: other.map(deg),
        }
    }
}

#[derive(Serialize)]
pub(super) struct TypeReport {
    name: &'static str,
    grashof: bool,
    bound: &'static str,
    ranges_deg: Vec<[f64; 2]>,
}

impl TypeReport {
    pub(super) fn new(fb: &FourBar) -> Self {
        let ty = fb.classify();
        let bound = fb.angle_bound();
        Self {
            name: ty.name(),
            grashof: ty.is_grashof(),
            bound: bound.description(),
            ranges_deg: bound
                .intervals()
                .into_iter()
                .map(|[s, e]| [deg(s), deg(e)])
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub(super) struct LimitReport {
    rocker_limits: bool,
    rocker_min: Option<f64>,
    rocker_max: Option<f64>,
    rocker_swing: Option<f64>,
    transmission: &'static str,
    transmission_min: Option<f64>,
    transmission_max: Option<f64>,
}

impl LimitReport {
    pub(super) fn new(limits: &LimitAnalysis) -> Self {
        let (transmission, range) = match limits.transmission {
            TransmissionBound::Range { min, max } => ("defined", Some([min, max])),
            TransmissionBound::Undefined => ("undefined", None),
        };
        Self {
            rocker_limits: limits.has_rocker_limits(),
            rocker_min: limits.rocker.map(|[min, _]| round4(min)),
            rocker_max: limits.rocker.map(|[_, max]| round4(max)),
            rocker_swing: limits.swing.map(round4),
            transmission,
            transmission_min: range.map(|[min, _]| round4(min)),
            transmission_max: range.map(|[_, max]| round4(max)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use four_bar_kin::AssemblyMode::Open;

    #[test]
    fn inverse_branches() {
        let fb = FourBar::example();
        let theta4 = fb.solve(1.).theta4;
        let r = InverseReport::new(&fb, theta4, None);
        assert!(r.reachable);
        let t2 = r.theta2_deg.unwrap();
        let other = r.other_deg.unwrap();
        assert!((t2 - other).abs() > 1e-3);
        // Pick the other branch by a nearby guess
        let near = InverseReport::new(&fb, theta4, Some(other.to_radians()));
        assert_eq!(near.theta2_deg, Some(other));
        assert_eq!(near.other_deg, Some(t2));
    }

    #[test]
    fn valid_state_shows_joint() {
        let s = FourBar::example().solve(std::f64::consts::FRAC_PI_2);
        let r = StateReport::new(&s);
        assert!(r.valid);
        assert_eq!(r.theta2_deg, 90.);
        assert_eq!(r.a, [0., 100.]);
        assert_eq!(r.b, Some(point(s.b)));
        assert_eq!(r.theta4_deg, Some(deg(s.theta4)));
        assert_eq!(r.transmission_deg, Some(75.5225));
    }

    #[test]
    fn invalid_state_hides_joint() {
        let fb = FourBar::new(100., 50., 10., 10., Open).unwrap();
        let r = StateReport::new(&fb.solve(0.));
        assert!(!r.valid);
        assert!(r.b.is_none());
        assert!(r.transmission_deg.is_none());
        assert_eq!(r.a, [50., 0.]);
    }

    #[test]
    fn crank_rocker_limits() {
        let r = LimitReport::new(&FourBar::example().analyze_limits());
        assert!(r.rocker_limits);
        assert_eq!(r.transmission, "defined");
        assert_eq!(r.transmission_min, Some(41.4096));
        assert_eq!(r.transmission_max, Some(104.4775));
        assert_eq!(r.rocker_swing, Some(63.0679));
    }

    #[test]
    fn no_swing_across_zero() {
        let fb = FourBar::new(100., 190., 5., 100., Open).unwrap();
        let r = LimitReport::new(&fb.analyze_limits());
        assert!(r.rocker_limits);
        assert_eq!(r.rocker_swing, None);
    }
}
