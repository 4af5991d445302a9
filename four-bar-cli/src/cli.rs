use self::{logger::Logger, report::*};
use four_bar_kin::{AssemblyMode, ConfigError, FourBar};
use std::path::{Path, PathBuf};

mod logger;
mod report;

const APP_NAME: &str = env!("CARGO_BIN_NAME");

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("reading file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ron serialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("report serialization error: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("csv serialization error: {0}")]
    Csv(#[from] four_bar_kin::csv::Error),
    #[error("invalid linkage: {0}")]
    Config(#[from] ConfigError),
    #[error("expected four link lengths or a linkage file")]
    Lengths,
}

#[derive(clap::Parser)]
#[clap(name = APP_NAME, version, about)]
pub(crate) struct Entry {
    /// Log verbosity, repeat for more (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[clap(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Solve the joint positions at an input angle
    State {
        #[clap(flatten)]
        linkage: Linkage,
        #[clap(flatten)]
        angle: Angle,
    },
    /// Find the input angle that reaches an output angle
    Inverse {
        #[clap(flatten)]
        linkage: Linkage,
        #[clap(flatten)]
        angle: Angle,
        /// Previous input angle, choose the closest solution
        #[clap(long, allow_negative_numbers = true)]
        near: Option<f64>,
    },
    /// Show the linkage type, the input angle bound and the limit analysis
    Info {
        #[clap(flatten)]
        linkage: Linkage,
    },
    /// Sample states over the input angle bound in CSV format
    Sweep {
        #[clap(flatten)]
        linkage: Linkage,
        /// Number of samples in each range
        #[clap(long, default_value_t = 360)]
        res: usize,
        /// Output file, default to stdout
        #[clap(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct Linkage {
    /// Link lengths: ground, driver, coupler, follower
    #[clap(
        short,
        long,
        num_args = 4,
        value_names = ["L1", "L2", "L3", "L4"],
        allow_negative_numbers = true,
        conflicts_with = "file"
    )]
    lengths: Vec<f64>,
    /// Linkage file in RON format
    #[clap(short, long)]
    file: Option<PathBuf>,
    /// Assembly mode, override the file
    #[clap(short, long, value_enum)]
    mode: Option<AssemblyMode>,
}

impl Linkage {
    fn load(&self) -> Result<FourBar, Error> {
        let fb = match (&self.file, self.lengths.as_slice()) {
            (Some(path), _) => load_file(path)?,
            (None, &[l1, l2, l3, l4]) => FourBar::new(l1, l2, l3, l4, AssemblyMode::default())?,
            (None, _) => return Err(Error::Lengths),
        };
        let fb = match self.mode {
            Some(mode) => fb.with_mode(mode),
            None => fb,
        };
        tracing::info!(?fb, "linkage loaded");
        Ok(fb)
    }
}

fn load_file(path: &Path) -> Result<FourBar, Error> {
    tracing::debug!(path = %path.display(), "reading linkage file");
    let s = std::fs::read_to_string(path)?;
    Ok(ron::from_str(&s)?)
}

#[derive(clap::Args)]
struct Angle {
    /// Angle, in radians unless `--deg` is given
    #[clap(allow_negative_numbers = true)]
    angle: f64,
    /// The angles are in degrees
    #[clap(long)]
    deg: bool,
}

impl Angle {
    fn rad(&self) -> f64 {
        self.convert(self.angle)
    }

    fn convert(&self, v: f64) -> f64 {
        if self.deg {
            v.to_radians()
        } else {
            v
        }
    }
}

impl Entry {
    pub(super) fn main() {
        let entry = <Self as clap::Parser>::parse_from(wild::args());
        init_tracing(entry.verbose);
        if let Err(e) = entry.cmd.run() {
            tracing::debug!(?e);
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    use tracing::Level;
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

impl Cmd {
    fn run(self) -> Result<(), Error> {
        let stdout = std::io::stdout();
        let mut log = Logger::new(stdout.lock());
        match self {
            Self::State { linkage, angle } => {
                let fb = linkage.load()?;
                let state = fb.solve(angle.rad());
                if !state.valid {
                    tracing::warn!("the linkage can not be closed at this input angle");
                }
                log.section("linkage", &LinkageReport::new(&fb))?;
                log.section("state", &StateReport::new(&state))?;
            }
            Self::Inverse {
                linkage,
                angle,
                near,
            } => {
                let fb = linkage.load()?;
                let theta4 = angle.rad();
                let near = near.map(|t| angle.convert(t));
                log.section("linkage", &LinkageReport::new(&fb))?;
                log.section("inverse", &InverseReport::new(&fb, theta4, near))?;
            }
            Self::Info { linkage } => {
                let fb = linkage.load()?;
                let limits = fb.analyze_limits();
                log.section("linkage", &LinkageReport::new(&fb))?;
                log.section("type", &TypeReport::new(&fb))?;
                log.section("limit", &LimitReport::new(&limits))?;
                if let Some(s) = &limits.limit_state_min {
                    log.section("limit.state_min", &StateReport::new(s))?;
                }
                if let Some(s) = &limits.limit_state_max {
                    log.section("limit.state_max", &StateReport::new(s))?;
                }
            }
            Self::Sweep { linkage, res, out } => {
                let fb = linkage.load()?;
                let states = fb.sweep(res);
                tracing::info!(n = states.len(), "sampled states");
                match out {
                    Some(path) => {
                        let w = std::io::BufWriter::new(std::fs::File::create(&path)?);
                        four_bar_kin::csv::dump_csv(w, &states)?;
                        tracing::info!(path = %path.display(), "saved");
                    }
                    None => four_bar_kin::csv::dump_csv(log.writer(), &states)?,
                }
            }
        }
        log.flush()?;
        Ok(())
    }
}
