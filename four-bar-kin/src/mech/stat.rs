use crate::geom::{acos_clamped, cos_law};
use std::f64::consts::TAU;

/// Assembly mode of the linkage, the branch of the coupler-follower joint.
///
/// + [`AssemblyMode::Open`] puts `B` on the left side of the directed line
///   from the crank tip `A` to the follower pivot `O4`.
/// + [`AssemblyMode::Crossed`] puts `B` on the right side.
///
/// For a crank rocker with its crank pointing up, the open mode keeps the
/// coupler and the follower above the ground link.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum AssemblyMode {
    /// Open branch
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "Open"))]
    Open,
    /// Crossed branch
    #[cfg_attr(feature = "serde", serde(alias = "Crossed"))]
    Crossed,
}

impl std::fmt::Display for AssemblyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Crossed => write!(f, "crossed"),
        }
    }
}

/// Error for assembly mode conversion.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
#[error("invalid assembly mode {0:?}, expected `open` (+1) or `crossed` (-1)")]
pub struct ModeError(String);

impl TryFrom<i8> for AssemblyMode {
    type Error = ModeError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Open),
            -1 => Ok(Self::Crossed),
            _ => Err(ModeError(value.to_string())),
        }
    }
}

impl std::str::FromStr for AssemblyMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" | "+1" | "1" => Ok(Self::Open),
            "crossed" | "-1" => Ok(Self::Crossed),
            _ => Err(ModeError(s.to_string())),
        }
    }
}

impl AssemblyMode {
    /// The sign convention, `+1` for open and `-1` for crossed.
    pub const fn sign(&self) -> f64 {
        match self {
            Self::Open => 1.,
            Self::Crossed => -1.,
        }
    }

    /// Get the other branch.
    pub const fn flip(self) -> Self {
        match self {
            Self::Open => Self::Crossed,
            Self::Crossed => Self::Open,
        }
    }
}

/// Angle boundary types. The input angle range.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub enum AngleBound {
    /// The driver rotates fully
    Closed,
    /// The driver swings in one range (`[start, end]`)
    Open([f64; 2]),
    /// The driver swings in one of two mirrored ranges
    /// (`[[start1, end1], [start2, end2]]`)
    OpenTwo([[f64; 2]; 2]),
    /// The loop never closes
    #[default]
    Invalid,
}

impl AngleBound {
    /// Name of the angle bound.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Closed => "Full rotation",
            Self::Open(_) => "Swing in one range",
            Self::OpenTwo(_) => "Swing in two mirrored ranges",
            Self::Invalid => "Invalid",
        }
    }

    /// Check angle bound from a planar loop `[l1, l2, l3, l4]`.
    ///
    /// The loop closes when the crank tip to follower pivot distance is in
    /// `[|l3 - l4|, l3 + l4]`.
    pub fn from_planar_loop(mut planar_loop: [f64; 4]) -> Self {
        let [l1, l2, l3, l4] = planar_loop;
        planar_loop.sort_unstable_by(f64::total_cmp);
        if planar_loop[3] > planar_loop[..3].iter().sum() {
            return Self::Invalid;
        }
        // Input angle where the distance reaches `d`
        let at = |d| acos_clamped(cos_law(l1, l2, d));
        match (l1 + l2 <= l3 + l4, (l1 - l2).abs() >= (l3 - l4).abs()) {
            (true, true) => Self::Closed,
            // Too close around zero
            (true, false) => {
                let a = at((l3 - l4).abs());
                Self::Open([a, TAU - a])
            }
            // Too far around π
            (false, true) => {
                let a = at(l3 + l4);
                Self::Open([-a, a])
            }
            (false, false) => {
                let a1 = at((l3 - l4).abs());
                let a2 = at(l3 + l4);
                Self::OpenTwo([[a1, a2], [TAU - a2, TAU - a1]])
            }
        }
    }

    /// Turn into the boundary ranges.
    pub fn intervals(&self) -> Vec<[f64; 2]> {
        match *self {
            Self::Closed => vec![[0., TAU]],
            Self::Open(a) => vec![a],
            Self::OpenTwo([a, b]) => vec![a, b],
            Self::Invalid => Vec::new(),
        }
    }

    /// Return true if the input angle is inside the bound.
    pub fn contains(&self, t: f64) -> bool {
        use crate::geom::normalize_angle;
        self.intervals().into_iter().any(|[start, end]| {
            let span = end - start;
            span >= TAU || normalize_angle(t - start) <= span
        })
    }

    /// Return true if the bounds is open.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed | Self::Invalid)
    }

    /// Check if the data is valid.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Type of the four-bar linkage, by Grashof's law.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FourBarTy {
    /// Grashof crank rocker, the driver is the shortest link
    CrankRocker,
    /// Grashof double crank (Drag-link), the ground is the shortest link
    DoubleCrank,
    /// Grashof double rocker, the coupler or the follower is the shortest
    /// link
    DoubleRocker,
    /// Change point, `s + l = p + q`
    ChangePoint,
    /// Non-Grashof triple rocker
    TripleRocker,
    /// The longest link is longer than the others together
    Invalid,
}

impl std::fmt::Display for FourBarTy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FourBarTy {
    /// Relative tolerance of the change point condition `s + l = p + q`.
    pub const CHANGE_POINT_TOL: f64 = 4. * f64::EPSILON;

    /// Detect from four-bar loop `[l1, l2, l3, l4]`.
    ///
    /// If several links are the shortest, the first of `l1`, `l2`, `l3`,
    /// `l4` decides the type.
    pub fn from_loop(mut fb_loop: [f64; 4]) -> Self {
        let [l1, l2, _, _] = fb_loop;
        fb_loop.sort_unstable_by(f64::total_cmp);
        let [s, p, q, l] = fb_loop;
        if l > s + p + q {
            return Self::Invalid;
        }
        let diff = (s + l) - (p + q);
        if diff.abs() <= Self::CHANGE_POINT_TOL * (s + l) {
            Self::ChangePoint
        } else if diff > 0. {
            Self::TripleRocker
        } else if s == l1 {
            Self::DoubleCrank
        } else if s == l2 {
            Self::CrankRocker
        } else {
            Self::DoubleRocker
        }
    }

    /// Name of the type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CrankRocker => "Crank-Rocker",
            Self::DoubleCrank => "Double-Crank (Drag-link)",
            Self::DoubleRocker => "Double-Rocker",
            Self::ChangePoint => "Change-Point",
            Self::TripleRocker => "Triple-Rocker (Non-Grashof)",
            Self::Invalid => "Invalid",
        }
    }

    /// Check if the type is valid.
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Return true if the type is Grashof linkage.
    pub const fn is_grashof(&self) -> bool {
        matches!(
            self,
            Self::CrankRocker | Self::DoubleCrank | Self::DoubleRocker | Self::ChangePoint
        )
    }

    /// Return true if the driver link can rotate fully.
    pub const fn is_crank_driven(&self) -> bool {
        matches!(self, Self::CrankRocker | Self::DoubleCrank)
    }
}
