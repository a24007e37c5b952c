//! Core application state and logic for the maze generator.

use std::time::Instant;

use color_eyre::eyre::Result;
use log::{debug, info};
use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    events,
    generator::Generator,
    playback::AnimationManager,
    types::{MainMenuItem, Screen, SIZE_PRESETS},
    ui,
};

/// Application state container for the maze generator.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the maze and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Session configuration, including the grid size chosen in the size menu.
    pub(crate) config: Config,
    /// Generator for the maze currently on display.
    pub(crate) generator: Generator<ChaCha8Rng>,
    /// Seed the current maze was generated from.
    pub(crate) seed: u64,
    /// Number of mazes shown so far, used to derive per-run seeds.
    pub(crate) runs: u64,
    /// Animation manager pacing the generator.
    pub(crate) animation_manager: AnimationManager,
    /// Grid sizes listed in the size menu.
    pub(crate) sizes: Vec<(u16, u16)>,
    /// Index into [`sizes`](App::sizes) under the user cursor.
    pub(crate) size_cursor: usize,
    /// Scrolling offset for the size list viewport.
    ///
    /// This field holds the offset by which to scroll the sliding window into the
    /// [`sizes`](App::sizes) vector in the size menu's viewport.
    pub(crate) viewport_offset: usize,
    /// Height of the size list rendering area during the last redraw.
    pub(crate) viewport_height: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl App {
    /// Creates the application state for `config`.
    ///
    /// A first maze is prepared right away so the in-game screen always has a grid to draw. Starting
    /// to generate rebuilds it from scratch as run zero, so the first maze shown uses the configured
    /// seed itself.
    pub fn new(config: Config) -> Self {
        let (seed, generator) = seeded_generator(&config, 0);
        let animation_manager =
            AnimationManager::new(config.delay, usize::from(config.steps_per_frame));

        let mut sizes = SIZE_PRESETS.to_vec();
        let configured = (config.width, config.height);
        if !sizes.contains(&configured) {
            sizes.insert(0, configured);
        }

        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::Generate),
            config,
            generator,
            seed,
            runs: 0,
            animation_manager,
            sizes,
            size_cursor: 0,
            viewport_offset: 0,
            viewport_height: 0,
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and advances the animation. The loop continues until the
    /// exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Replaces the current maze with a freshly seeded one at the configured size.
    pub(crate) fn new_maze(&mut self) {
        let (seed, generator) = seeded_generator(&self.config, self.runs);
        self.runs += 1;
        self.seed = seed;
        self.generator = generator;
        self.animation_manager.reset();
    }

    /// Advances the animation, starting over in repeat mode once a finished maze has been shown.
    pub(crate) fn tick(&mut self) {
        let _ = self.animation_manager.update(&mut self.generator);

        if self.config.repeat && self.animation_manager.repeat_due(Instant::now()) {
            debug!("repeat mode: starting a new maze");
            self.new_maze();
        }
    }

    /// Finishes the current maze immediately.
    pub(crate) fn finish(&mut self) {
        let taken = self.generator.run_to_completion();
        debug!("finished maze on request after {taken} more steps");
    }
}

/// Builds the generator for run number `run` of a session.
///
/// A configured seed is offset by the run number so that every maze of a session differs while the
/// whole session stays reproducible. Without one, a random seed is drawn and logged.
pub(crate) fn seeded_generator(config: &Config, run: u64) -> (u64, Generator<ChaCha8Rng>) {
    let seed = config
        .seed
        .map_or_else(|| rand::thread_rng().gen(), |seed| seed.wrapping_add(run));
    info!("maze {run} uses seed {seed}");

    let (width, height) = config.dimensions();
    (
        seed,
        Generator::new(width, height, ChaCha8Rng::seed_from_u64(seed)),
    )
}
