//! Four-bar kinematics: position analysis, Grashof classification and limit
//! analysis for planar four-bar linkages.
//!
//! ```
//! use four_bar_kin::*;
//!
//! let fb = FourBar::new(300., 100., 300., 200., AssemblyMode::Open).unwrap();
//! assert_eq!(fb.classify(), FourBarTy::CrankRocker);
//! let state = fb.solve(std::f64::consts::FRAC_PI_2);
//! assert!(state.valid);
//! let limits = fb.analyze_limits();
//! assert!(limits.has_rocker_limits());
//! ```
#![cfg_attr(doc_cfg, feature(doc_cfg))]
pub use crate::{
    geom::{distance, normalize_angle, to_degrees, to_radians},
    limit::*,
    mech::*,
    solve::*,
};

#[cfg(feature = "csv")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "csv")))]
pub mod csv;
pub mod geom;
mod limit;
pub mod mech;
mod solve;
