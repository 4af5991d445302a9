//! Linkage configuration types.
pub use self::{
    fb::{ConfigError, FourBar, Link},
    stat::*,
};

mod fb;
mod stat;
