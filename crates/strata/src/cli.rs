//! # Command-Line Options
//!
//! Hand-rolled flag parsing for `strata_gen`. Unlike a long-running
//! server, a generator run with a mistyped flag should stop, so every
//! parse problem is an error rather than a silent default.

use std::path::PathBuf;

use strata_procedural::{GenerationError, WorldConfig};
use strata_shared::ChunkCoord;
use thiserror::Error;

/// Default region radius in chunks.
pub const DEFAULT_RADIUS: i32 = 2;

/// Largest accepted radius (a 65 x 65 x 65 chunk cube).
pub const MAX_RADIUS: i32 = 32;

/// Errors from argument parsing or configuration loading.
#[derive(Error, Debug)]
pub enum CliError {
    /// A flag that takes a value was last on the line.
    #[error("missing value for {0}")]
    MissingValue(&'static str),

    /// A flag value could not be parsed.
    #[error("invalid value for {flag}: `{value}`")]
    InvalidValue {
        /// The flag.
        flag: &'static str,
        /// What was given.
        value: String,
    },

    /// Unrecognised argument.
    #[error("unknown argument `{0}` (try --help)")]
    UnknownArgument(String),

    /// Configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] GenerationError),
}

/// Parsed `strata_gen` options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenOptions {
    /// TOML configuration file.
    pub config_path: Option<PathBuf>,
    /// Seed override.
    pub seed: Option<u64>,
    /// Chebyshev radius of the region.
    pub radius: i32,
    /// Centre chunk of the region.
    pub center: ChunkCoord,
    /// Generate on the rayon pool instead of one thread.
    pub parallel: bool,
    /// Print usage and exit.
    pub help: bool,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            seed: None,
            radius: DEFAULT_RADIUS,
            center: ChunkCoord::default(),
            parallel: false,
            help: false,
        }
    }
}

impl GenOptions {
    /// Parses arguments, excluding the program name.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] for unknown flags, missing values and values
    /// that do not parse.
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut options = Self::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    options.config_path = Some(PathBuf::from(value_of(&args, i, "--config")?));
                    i += 1;
                }
                "--seed" | "-s" => {
                    let raw = value_of(&args, i, "--seed")?;
                    options.seed = Some(parse_value(raw, "--seed")?);
                    i += 1;
                }
                "--radius" | "-r" => {
                    let raw = value_of(&args, i, "--radius")?;
                    let radius: i32 = parse_value(raw, "--radius")?;
                    if !(0..=MAX_RADIUS).contains(&radius) {
                        return Err(CliError::InvalidValue {
                            flag: "--radius",
                            value: raw.to_string(),
                        });
                    }
                    options.radius = radius;
                    i += 1;
                }
                "--center" => {
                    options.center = parse_coord(value_of(&args, i, "--center")?)?;
                    i += 1;
                }
                "--threads" | "-t" => options.parallel = true,
                "--help" | "-h" => options.help = true,
                other => return Err(CliError::UnknownArgument(other.to_string())),
            }
            i += 1;
        }

        Ok(options)
    }

    /// Builds the world configuration: file (or defaults), then overrides.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be loaded or the result fails
    /// validation.
    pub fn world_config(&self) -> Result<WorldConfig, CliError> {
        let mut config = match &self.config_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading world config");
                WorldConfig::load(path)?
            }
            None => WorldConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }

    /// Every chunk in the requested region.
    #[must_use]
    pub fn region(&self) -> Vec<ChunkCoord> {
        self.center.cube_around(self.radius)
    }
}

/// Usage text.
pub const USAGE: &str = "\
Usage: strata_gen [OPTIONS]

Options:
  -c, --config <FILE>      World configuration (TOML)
  -s, --seed <N>           Override the configured seed
  -r, --radius <R>         Region radius in chunks (default: 2, max: 32)
      --center <X,Y,Z>     Region centre chunk (default: 0,0,0)
  -t, --threads            Generate in parallel
  -h, --help               Show this help";

fn value_of<'a>(args: &'a [String], i: usize, flag: &'static str) -> Result<&'a str, CliError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or(CliError::MissingValue(flag))
}

fn parse_value<T: std::str::FromStr>(raw: &str, flag: &'static str) -> Result<T, CliError> {
    raw.trim().parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: raw.to_string(),
    })
}

fn parse_coord(raw: &str) -> Result<ChunkCoord, CliError> {
    let parts: Vec<&str> = raw.split(',').collect();
    match parts.as_slice() {
        [x, y, z] => Ok(ChunkCoord::new(
            parse_value(x, "--center")?,
            parse_value(y, "--center")?,
            parse_value(z, "--center")?,
        )),
        _ => Err(CliError::InvalidValue {
            flag: "--center",
            value: raw.to_string(),
        }),
    }
}
