//! Planar four-bar linkage configuration.
use super::{AngleBound, AssemblyMode, FourBarTy};

/// Links of the four-bar linkage.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Link {
    /// Ground link `l1`
    Ground,
    /// Driver link (crank) `l2`
    Driver,
    /// Coupler link `l3`
    Coupler,
    /// Follower link (rocker) `l4`
    Follower,
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Ground => write!(f, "ground link l1"),
            Self::Driver => write!(f, "driver link l2"),
            Self::Coupler => write!(f, "coupler link l3"),
            Self::Follower => write!(f, "follower link l4"),
        }
    }
}

/// Error for malformed link lengths.
#[derive(Debug, PartialEq, Copy, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A length is zero or negative.
    #[error("{link} must be positive, got {value}")]
    NonPositive {
        /// The offending link
        link: Link,
        /// The given length
        value: f64,
    },
    /// A length is NaN or infinite.
    #[error("{link} must be finite, got {value}")]
    NonFinite {
        /// The offending link
        link: Link,
        /// The given length
        value: f64,
    },
}

/// Four-bar linkage configuration.
///
/// # Parameters
///
/// + Ground link `l1`, from the driver pivot `O2 = (0, 0)` to the follower
///   pivot `O4 = (l1, 0)`
/// + Driver link `l2`, from `O2` to the crank tip `A`
/// + Coupler link `l3`, from `A` to the joint `B`
/// + Follower link `l4`, from `O4` to `B`
/// + Assembly mode, the branch of `B`
///
/// The value is immutable once created. Lengths are checked by
/// [`FourBar::new()`] (and by deserialization), so any value of this type has
/// positive finite lengths.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UncheckedFourBar")
)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FourBar {
    l1: f64,
    l2: f64,
    l3: f64,
    l4: f64,
    mode: AssemblyMode,
}

impl FourBar {
    /// Create a new linkage from the link lengths `l1` (ground), `l2`
    /// (driver), `l3` (coupler) and `l4` (follower).
    pub fn new(
        l1: f64,
        l2: f64,
        l3: f64,
        l4: f64,
        mode: AssemblyMode,
    ) -> Result<Self, ConfigError> {
        let links = [Link::Ground, Link::Driver, Link::Coupler, Link::Follower];
        for (link, value) in links.into_iter().zip([l1, l2, l3, l4]) {
            let err = if !value.is_finite() {
                ConfigError::NonFinite { link, value }
            } else if value <= 0. {
                ConfigError::NonPositive { link, value }
            } else {
                continue;
            };
            tracing::debug!(%err, "rejected four-bar configuration");
            return Err(err);
        }
        Ok(Self {
            l1,
            l2,
            l3,
            l4,
            mode,
        })
    }

    /// An example crank rocker.
    pub const fn example() -> Self {
        Self {
            l1: 300.,
            l2: 100.,
            l3: 300.,
            l4: 200.,
            mode: AssemblyMode::Open,
        }
    }

    /// Length of the ground link.
    pub const fn l1(&self) -> f64 {
        self.l1
    }

    /// Length of the driver link.
    pub const fn l2(&self) -> f64 {
        self.l2
    }

    /// Length of the coupler link.
    pub const fn l3(&self) -> f64 {
        self.l3
    }

    /// Length of the follower link.
    pub const fn l4(&self) -> f64 {
        self.l4
    }

    /// Length of a link.
    pub const fn link(&self, link: Link) -> f64 {
        match link {
            Link::Ground => self.l1,
            Link::Driver => self.l2,
            Link::Coupler => self.l3,
            Link::Follower => self.l4,
        }
    }

    /// Assembly mode.
    pub const fn mode(&self) -> AssemblyMode {
        self.mode
    }

    /// Get the planar loop `[l1, l2, l3, l4]`.
    pub const fn planar_loop(&self) -> [f64; 4] {
        [self.l1, self.l2, self.l3, self.l4]
    }

    /// The driver pivot `O2`.
    pub const fn o2(&self) -> [f64; 2] {
        [0., 0.]
    }

    /// The follower pivot `O4`.
    pub const fn o4(&self) -> [f64; 2] {
        [self.l1, 0.]
    }

    /// Build with another assembly mode.
    pub const fn with_mode(self, mode: AssemblyMode) -> Self {
        Self { mode, ..self }
    }

    /// Build with other link lengths, keeping the assembly mode.
    pub fn with_lengths(self, l1: f64, l2: f64, l3: f64, l4: f64) -> Result<Self, ConfigError> {
        Self::new(l1, l2, l3, l4, self.mode)
    }

    /// Classify the linkage by Grashof's law.
    pub fn classify(&self) -> FourBarTy {
        FourBarTy::from_loop(self.planar_loop())
    }

    /// Input angle bounds of the linkage.
    pub fn angle_bound(&self) -> AngleBound {
        AngleBound::from_planar_loop(self.planar_loop())
    }

    /// Return true if the loop can be closed at some input angle.
    pub fn is_valid(&self) -> bool {
        self.classify().is_valid()
    }
}

impl Default for FourBar {
    fn default() -> Self {
        Self::example()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedFourBar {
    l1: f64,
    l2: f64,
    l3: f64,
    l4: f64,
    #[serde(default)]
    mode: AssemblyMode,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedFourBar> for FourBar {
    type Error = ConfigError;

    fn try_from(fb: UncheckedFourBar) -> Result<Self, Self::Error> {
        let UncheckedFourBar {
            l1,
            l2,
            l3,
            l4,
            mode,
        } = fb;
        Self::new(l1, l2, l3, l4, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_malformed() {
        use AssemblyMode::Open;
        let err = ConfigError::NonPositive {
            link: Link::Driver,
            value: 0.,
        };
        assert_eq!(FourBar::new(300., 0., 300., 200., Open), Err(err));
        let err = ConfigError::NonPositive {
            link: Link::Coupler,
            value: -1.,
        };
        assert_eq!(FourBar::new(300., 100., -1., 200., Open), Err(err));
        let fb = FourBar::new(300., 100., 300., f64::INFINITY, Open);
        let Err(ConfigError::NonFinite { link, .. }) = fb else {
            panic!("expected a non-finite length");
        };
        assert_eq!(link, Link::Follower);
        let Err(err) = FourBar::new(f64::NAN, 100., 300., 200., Open) else {
            panic!("expected an error");
        };
        assert_eq!(err.to_string(), "ground link l1 must be finite, got NaN");
    }

    #[test]
    fn edit_by_value() {
        let fb = FourBar::example();
        let crossed = fb.with_mode(AssemblyMode::Crossed);
        assert_eq!(fb.mode(), AssemblyMode::Open);
        assert_eq!(crossed.planar_loop(), fb.planar_loop());
        let fb = crossed.with_lengths(1., 2., 3., 4.).unwrap();
        assert_eq!(fb.mode(), AssemblyMode::Crossed);
        assert_eq!(fb.link(Link::Coupler), 3.);
        assert!(crossed.with_lengths(1., 2., 3., 0.).is_err());
    }
}
