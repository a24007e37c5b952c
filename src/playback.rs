//! Animation pacing for maze generation.
//!
//! This module decides when the generator gets to take its next steps, so the carving process can
//! be watched one frame at a time instead of appearing all at once.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::generator::Generator;

/// Fastest allowed frame delay in milliseconds.
pub(crate) const MIN_FRAME_DELAY_MS: u64 = 1;
/// Slowest allowed frame delay in milliseconds.
pub(crate) const MAX_FRAME_DELAY_MS: u64 = 1000;
/// Time a finished maze stays on screen before the next one starts in repeat mode.
pub(crate) const REPEAT_HOLD_MS: u64 = 1500;

/// Animation state manager for maze generation.
///
/// This structure tracks the frame timing, how many generator steps a frame is worth, and whether
/// playback is paused. The generator itself lives in the application state and is handed in on
/// every update.
#[derive(Debug)]
pub(crate) struct AnimationManager {
    /// Delay between two animation frames.
    ///
    /// This field controls the timing between frames. A lower value results in faster carving,
    /// while a higher value makes individual steps easier to follow.
    pub(crate) frame_delay: Duration,
    /// Number of generator steps taken per frame.
    pub(crate) steps_per_frame: usize,
    /// Whether automatic stepping is suspended.
    pub(crate) paused: bool,
    /// Timestamp of the last animation frame update.
    ///
    /// This field stores the time when the animation was last advanced, used to control the timing
    /// between frames.
    pub(crate) last_update_time: Instant,
    /// Time at which the current maze was seen to be finished.
    pub(crate) finished_at: Option<Instant>,
}

impl AnimationManager {
    /// Creates a new animation manager with the given pacing.
    pub(crate) fn new(frame_delay_ms: u64, steps_per_frame: usize) -> Self {
        Self {
            frame_delay: Duration::from_millis(
                frame_delay_ms.clamp(MIN_FRAME_DELAY_MS, MAX_FRAME_DELAY_MS),
            ),
            steps_per_frame: steps_per_frame.max(1),
            paused: false,
            last_update_time: Instant::now(),
            finished_at: None,
        }
    }

    /// Resets the timing state for a new maze, keeping the pacing settings.
    pub(crate) fn reset(&mut self) {
        self.paused = false;
        self.finished_at = None;
        self.last_update_time = Instant::now();
    }

    /// Advances the generator if a frame is due.
    ///
    /// Returns the number of steps taken. Nothing happens while paused, before the frame delay has
    /// elapsed, or once the maze is finished.
    pub(crate) fn update<R: Rng>(&mut self, generator: &mut Generator<R>) -> usize {
        self.update_at(generator, Instant::now())
    }

    /// Same as [`AnimationManager::update`] with an explicit clock reading.
    pub(crate) fn update_at<R: Rng>(&mut self, generator: &mut Generator<R>, now: Instant) -> usize {
        if generator.is_done() {
            let _ = self.finished_at.get_or_insert(now);
            return 0;
        }
        if self.paused || now.saturating_duration_since(self.last_update_time) < self.frame_delay
        {
            return 0;
        }

        self.last_update_time = now;

        let mut taken = 0;
        while taken < self.steps_per_frame && !generator.is_done() {
            let _ = generator.step();
            taken += 1;
        }
        if generator.is_done() {
            self.finished_at = Some(now);
        }

        taken
    }

    /// Performs exactly one generator step and pauses automatic playback.
    pub(crate) fn single_step<R: Rng>(&mut self, generator: &mut Generator<R>) {
        self.paused = true;
        let _ = generator.step();
    }

    /// Toggles automatic playback.
    pub(crate) const fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Halves the frame delay, down to [`MIN_FRAME_DELAY_MS`].
    pub(crate) fn faster(&mut self) {
        self.frame_delay = (self.frame_delay / 2).max(Duration::from_millis(MIN_FRAME_DELAY_MS));
    }

    /// Doubles the frame delay, up to [`MAX_FRAME_DELAY_MS`].
    pub(crate) fn slower(&mut self) {
        self.frame_delay = self
            .frame_delay
            .saturating_mul(2)
            .min(Duration::from_millis(MAX_FRAME_DELAY_MS));
    }

    /// Whether a finished maze has been on display long enough to be replaced.
    pub(crate) fn repeat_due(&self, now: Instant) -> bool {
        self.finished_at.is_some_and(|finished| {
            now.saturating_duration_since(finished) >= Duration::from_millis(REPEAT_HOLD_MS)
        })
    }
}
