//! Maze generation by randomized depth-first backtracking, animated in the terminal.
//!
//! The library is split into a generation core and a terminal shell around it:
//!
//! - [`grid`] holds cell walls and visitation state,
//! - [`generator`] carves a perfect maze over a grid one step at a time,
//! - [`text`] prints a grid as plain ASCII,
//! - the private application modules animate the carving with Ratatui.
//!
//! The core can be driven directly: build a [`generator::Generator`] with any seeded random
//! source, call [`generator::Generator::step`] between frames or
//! [`generator::Generator::run_to_completion`] at once, and read the walls back from
//! [`generator::Generator::grid`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod config;
pub mod direction;
mod events;
pub mod generator;
pub mod grid;
mod playback;
pub mod text;
mod types;
mod ui;

use color_eyre::eyre::Result;
use env_logger::Env;
use log::info;

pub use crate::{app::App, config::Config};

/// Generates one maze synchronously and returns it as text lines.
///
/// This is what headless mode prints. The maze uses the configured seed, or a random one that is
/// logged.
pub fn render_headless(config: &Config) -> Vec<String> {
    let (seed, mut generator) = app::seeded_generator(config, 0);
    let steps = generator.run_to_completion();
    info!("headless maze with seed {seed} took {steps} steps");

    text::render(generator.grid(), None)
}

/// Runs a maze session with `config`.
///
/// Logging goes to standard error and defaults to warnings only; set `RUST_LOG` to see more, and
/// redirect standard error while the terminal interface is up.
///
/// # Errors
///
/// This function may return errors if the logger was already set or the terminal fails.
pub fn run(config: Config) -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).try_init()?;

    if config.headless {
        for line in render_headless(&config) {
            println!("{line}");
        }
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let result = App::new(config).run(&mut terminal);
    ratatui::restore();

    result
}
