//! Command-line configuration.

use clap::Parser;

/// Default number of maze columns.
pub(crate) const DEFAULT_WIDTH: u16 = 20;
/// Default number of maze rows.
pub(crate) const DEFAULT_HEIGHT: u16 = 15;
/// Largest accepted value for either dimension.
pub(crate) const MAX_DIMENSION: u16 = 256;
/// Default delay between animation frames, in milliseconds.
pub(crate) const DEFAULT_DELAY_MS: u64 = 30;

/// Runtime configuration for a maze session.
///
/// Parsed from the command line through [`Parser::parse`]; out-of-range values are rejected by the
/// parser with a usage error before any maze is built.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Number of maze columns.
    #[arg(
        short = 'W',
        long,
        default_value_t = DEFAULT_WIDTH,
        value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_DIMENSION)),
    )]
    pub width: u16,
    /// Number of maze rows.
    #[arg(
        short = 'H',
        long,
        default_value_t = DEFAULT_HEIGHT,
        value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_DIMENSION)),
    )]
    pub height: u16,
    /// Seed for the first maze; later mazes add the run number. Random when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Milliseconds between animation frames.
    #[arg(short, long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay: u64,
    /// Generation steps performed per animation frame.
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..),
    )]
    pub steps_per_frame: u16,
    /// Generate the maze without the terminal UI and print it as text.
    #[arg(long)]
    pub headless: bool,
    /// Start a new maze shortly after each one finishes.
    #[arg(long)]
    pub repeat: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            delay: DEFAULT_DELAY_MS,
            steps_per_frame: 1,
            headless: false,
            repeat: false,
        }
    }
}

impl Config {
    /// Maze dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (usize::from(self.width), usize::from(self.height))
    }
}
