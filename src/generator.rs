//! Randomized depth-first backtracking maze generator.
//!
//! The [`Generator`] carves a perfect maze one [`Step`] at a time so that a caller can render the
//! grid between steps. Each step either knocks down the wall towards a random unvisited neighbor or
//! pops the carving stack to backtrack out of a dead end. Generation ends once every cell has been
//! visited, at which point the open passages form a spanning tree over the grid.

use log::{debug, info, trace};
use rand::Rng;

use crate::{
    direction::Side,
    grid::{Coord, Grid},
};

/// Lifecycle state of a generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Cells remain unvisited and [`Generator::step`] keeps carving.
    Running,
    /// Every cell has been visited; the grid is final.
    Done,
}

impl State {
    /// Short label used by status displays.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "carving",
            Self::Done => "done",
        }
    }
}

/// Outcome of a single call to [`Generator::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The wall on `side` of `from` was removed and the cursor moved into `to`.
    Carved {
        /// Cell the cursor left.
        from: Coord,
        /// Newly visited cell.
        to: Coord,
        /// Side of `from` that was opened.
        side: Side,
    },
    /// The cursor had no unvisited neighbor and returned to `to`.
    Backtracked {
        /// Cell popped off the carving stack.
        to: Coord,
    },
    /// Nothing happened because the run was already finished.
    Finished,
}

/// Immutable copy of a generator's observable state.
///
/// Snapshots own their grid, so they can be handed to a renderer living elsewhere while the
/// generator keeps going.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Wall and visitation state at the time of the snapshot.
    pub grid: Grid,
    /// Cursor position.
    pub current: Coord,
    /// Run state.
    pub state: State,
    /// Number of steps taken so far.
    pub steps: usize,
}

/// Depth-first backtracking generator over a [`Grid`].
///
/// The random source is injected so runs can be reproduced from a seed.
#[derive(Debug)]
pub struct Generator<R> {
    /// Maze being carved.
    grid: Grid,
    /// Path from the start cell towards the cursor.
    stack: Vec<Coord>,
    /// Cell most recently moved into.
    current: Coord,
    /// Run state.
    state: State,
    /// Source of direction draws.
    rng: R,
    /// Steps performed since the run started.
    steps: usize,
}

impl<R: Rng> Generator<R> {
    /// Starts a run on a fresh `width` by `height` grid from a uniformly random cell.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize, mut rng: R) -> Self {
        let grid = Grid::new(width, height);
        let col = rng.gen_range(0..width);
        let row = rng.gen_range(0..height);

        Self::start_at(grid, col, row, rng)
    }

    /// Starts a run on a fresh `width` by `height` grid from the cell at `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or the start cell lies outside the grid.
    pub fn with_start(width: usize, height: usize, col: usize, row: usize, rng: R) -> Self {
        Self::start_at(Grid::new(width, height), col, row, rng)
    }

    /// Visits the start cell and pushes it onto the carving stack.
    fn start_at(mut grid: Grid, col: usize, row: usize, rng: R) -> Self {
        let Some(start) = grid.coord(col, row) else {
            panic!(
                "start cell ({col}, {row}) lies outside a {}x{} grid",
                grid.width(),
                grid.height()
            );
        };

        let _ = grid.mark_visited(start);
        let state = if grid.has_unvisited_cells() {
            State::Running
        } else {
            State::Done
        };

        debug!(
            "starting {}x{} maze at ({col}, {row})",
            grid.width(),
            grid.height()
        );

        Self {
            grid,
            stack: vec![start],
            current: start,
            state,
            rng,
            steps: 0,
        }
    }

    /// Performs one carving or backtracking step.
    ///
    /// Once the run is [`State::Done`] this does nothing and returns [`Step::Finished`].
    ///
    /// # Panics
    ///
    /// Panics if the carving stack runs dry while cells remain unvisited, which would mean the
    /// grid was mutated behind the generator's back.
    pub fn step(&mut self) -> Step {
        if self.state == State::Done {
            return Step::Finished;
        }

        let step = if self.grid.has_unvisited_neighbor(self.current) {
            self.carve()
        } else {
            self.backtrack()
        };
        self.steps += 1;
        trace!("step {}: {step:?}", self.steps);

        if !self.grid.has_unvisited_cells() {
            self.state = State::Done;
            info!(
                "finished {}x{} maze in {} steps",
                self.grid.width(),
                self.grid.height(),
                self.steps
            );
        }

        step
    }

    /// Opens the wall towards a random unvisited neighbor and moves into it.
    ///
    /// Sides are drawn over all four directions and redrawn until one leads to an unvisited cell
    /// inside the grid. The caller guarantees such a cell exists, otherwise this would never end.
    fn carve(&mut self) -> Step {
        let from = self.current;
        debug_assert!(
            self.grid.has_unvisited_neighbor(from),
            "carving from {from:?} without an unvisited neighbor"
        );

        let (side, to) = loop {
            let side = Side::random(&mut self.rng);
            match self.grid.neighbor(from, side) {
                Some(next) if !self.grid.cell(next).is_visited() => break (side, next),
                _ => {}
            }
        };

        self.stack.push(from);
        self.grid.set_wall(from, side, false);
        self.current = to;
        let _ = self.grid.mark_visited(to);

        Step::Carved { from, to, side }
    }

    /// Returns to the previous cell on the carving stack.
    fn backtrack(&mut self) -> Step {
        let to = self
            .stack
            .pop()
            .expect("carving stack exhausted while unvisited cells remain");
        self.current = to;

        Step::Backtracked { to }
    }

    /// Steps until the run is done and returns how many steps that took.
    ///
    /// # Panics
    ///
    /// See [`Generator::step`].
    pub fn run_to_completion(&mut self) -> usize {
        let mut taken = 0;
        while self.state == State::Running {
            let _ = self.step();
            taken += 1;
        }

        taken
    }
}

impl<R> Generator<R> {
    /// Whether every cell has been visited.
    pub const fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    /// Current run state.
    pub const fn state(&self) -> State {
        self.state
    }

    /// Grid being carved.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cursor position.
    pub const fn current(&self) -> Coord {
        self.current
    }

    /// Carving stack, oldest entry first.
    pub fn stack(&self) -> &[Coord] {
        &self.stack
    }

    /// Number of steps taken since the run started.
    pub const fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Copies the observable state of the run.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            current: self.current,
            state: self.state,
            steps: self.steps,
        }
    }

    /// Consumes the generator and returns its grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use rand::{Error, RngCore, SeedableRng as _};
    use rand_chacha::ChaCha8Rng;

    use super::*;

    /// Random source that replays a fixed sequence of sides.
    ///
    /// A draw over four values keeps the top two bits of a `u32`, so every scripted side is stored
    /// there.
    struct ScriptedSides {
        /// Sides still to be drawn, in order.
        script: VecDeque<Side>,
        /// Number of values handed out so far.
        draws: usize,
    }

    impl ScriptedSides {
        /// Creates a source that yields `sides` in order.
        fn new(sides: &[Side]) -> Self {
            Self {
                script: sides.iter().copied().collect(),
                draws: 0,
            }
        }
    }

    impl RngCore for ScriptedSides {
        fn next_u32(&mut self) -> u32 {
            let side = self.script.pop_front().expect("side script ran out");
            self.draws += 1;
            u32::try_from(side.index()).expect("side index fits in u32") << 30
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(bytes.get(..chunk.len()).expect("chunk is at most 4 bytes"));
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// Builds a generator with a seeded random source.
    fn seeded(width: usize, height: usize, seed: u64) -> Generator<ChaCha8Rng> {
        Generator::new(width, height, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Counts the cells reachable from the origin through open walls.
    fn reachable_cells(grid: &Grid) -> usize {
        let origin = grid.coord(0, 0).expect("grid should have an origin");
        let mut seen = HashSet::from([origin]);
        let mut queue = VecDeque::from([origin]);

        while let Some(coord) = queue.pop_front() {
            for side in Side::ALL {
                if grid.has_wall(coord, side) {
                    continue;
                }
                if let Some(next) = grid.neighbor(coord, side) {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        seen.len()
    }

    /// Counts the open walls of a cell that lead to another cell.
    fn open_sides(grid: &Grid, coord: Coord) -> usize {
        Side::ALL
            .into_iter()
            .filter(|side| grid.neighbor(coord, *side).is_some() && !grid.has_wall(coord, *side))
            .count()
    }

    #[test]
    fn test_completed_runs_form_spanning_trees() {
        for (width, height) in [(2, 2), (3, 5), (7, 4), (10, 10), (20, 15)] {
            for seed in 0..10 {
                let mut generator = seeded(width, height, seed);
                let _ = generator.run_to_completion();
                let grid = generator.grid();

                assert!(generator.is_done());
                assert_eq!(grid.open_passages(), width * height - 1);
                assert_eq!(reachable_cells(grid), width * height);
                assert!(grid.coords().all(|coord| grid.cell(coord).is_visited()));
            }
        }
    }

    #[test]
    fn test_walls_stay_symmetric_after_every_step() {
        let mut generator = seeded(6, 5, 42);

        while !generator.is_done() {
            let _ = generator.step();
            let grid = generator.grid();
            for coord in grid.coords() {
                for side in Side::ALL {
                    if let Some(next) = grid.neighbor(coord, side) {
                        assert_eq!(
                            grid.has_wall(coord, side),
                            grid.has_wall(next, side.opposite())
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_border_walls_are_never_removed() {
        let mut generator = seeded(8, 6, 3);
        let _ = generator.run_to_completion();
        let grid = generator.grid();

        for coord in grid.coords() {
            for side in Side::ALL {
                if grid.neighbor(coord, side).is_none() {
                    assert!(grid.has_wall(coord, side));
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let mut first = seeded(12, 9, 1234);
        let mut second = seeded(12, 9, 1234);

        let first_steps = first.run_to_completion();
        let second_steps = second.run_to_completion();

        assert_eq!(first_steps, second_steps);
        assert_eq!(first.into_grid(), second.into_grid());
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut first = seeded(12, 9, 1);
        let mut second = seeded(12, 9, 2);
        let _ = first.run_to_completion();
        let _ = second.run_to_completion();

        assert_ne!(first.into_grid(), second.into_grid());
    }

    #[test]
    fn test_single_cell_is_done_immediately() {
        let mut generator = seeded(1, 1, 0);

        assert!(generator.is_done());
        assert_eq!(generator.state(), State::Done);
        assert_eq!(generator.step(), Step::Finished);
        assert_eq!(generator.run_to_completion(), 0);
        assert_eq!(generator.steps_taken(), 0);
        assert_eq!(generator.grid().open_passages(), 0);
        assert!(!generator.grid().has_unvisited_cells());
    }

    #[test]
    fn test_single_row_and_column_form_corridors() {
        for (width, height) in [(1, 6), (6, 1), (1, 2), (9, 1)] {
            for seed in 0..5 {
                let mut generator = seeded(width, height, seed);
                let _ = generator.run_to_completion();
                let grid = generator.grid();
                let last = grid
                    .coord(width - 1, height - 1)
                    .expect("far corner should exist");
                let first = grid.coord(0, 0).expect("origin should exist");

                for coord in grid.coords() {
                    let expected = if coord == first || coord == last { 1 } else { 2 };
                    assert_eq!(open_sides(grid, coord), expected, "cell {coord:?}");
                }
            }
        }
    }

    #[test]
    fn test_two_cells_with_forced_start() {
        let mut generator = Generator::with_start(2, 1, 0, 0, ChaCha8Rng::seed_from_u64(9));
        let origin = generator.grid().coord(0, 0).expect("origin should exist");
        let other = generator.grid().coord(1, 0).expect("second cell should exist");

        assert_eq!(generator.state(), State::Running);
        assert_eq!(generator.current(), origin);
        assert_eq!(generator.stack(), &[origin]);

        assert_eq!(
            generator.step(),
            Step::Carved {
                from: origin,
                to: other,
                side: Side::Right,
            }
        );
        assert!(generator.is_done());
        assert_eq!(generator.current(), other);
        assert!(!generator.grid().has_wall(origin, Side::Right));
        assert!(!generator.grid().has_wall(other, Side::Left));
        assert_eq!(generator.grid().open_passages(), 1);
        assert_eq!(generator.step(), Step::Finished);
    }

    #[test]
    fn test_two_cells_from_the_right() {
        let mut generator = Generator::with_start(2, 1, 1, 0, ChaCha8Rng::seed_from_u64(9));
        let origin = generator.grid().coord(0, 0).expect("origin should exist");
        let other = generator.grid().coord(1, 0).expect("second cell should exist");

        assert_eq!(
            generator.step(),
            Step::Carved {
                from: other,
                to: origin,
                side: Side::Left,
            }
        );
        assert!(generator.is_done());
    }

    #[test]
    #[should_panic(expected = "lies outside")]
    fn test_start_outside_grid_panics() {
        let _ = Generator::with_start(2, 2, 5, 0, ChaCha8Rng::seed_from_u64(0));
    }

    #[test]
    fn test_carves_exactly_one_less_than_cells() {
        let mut generator = seeded(9, 7, 77);
        let mut carved = 0;
        let mut backtracked = 0;

        loop {
            match generator.step() {
                Step::Carved { .. } => carved += 1,
                Step::Backtracked { .. } => backtracked += 1,
                Step::Finished => break,
            }
        }

        assert_eq!(carved, 9 * 7 - 1);
        assert_eq!(generator.steps_taken(), carved + backtracked);
    }

    #[test]
    fn test_carved_steps_move_to_adjacent_cells() {
        let mut generator = seeded(5, 5, 11);

        while !generator.is_done() {
            if let Step::Carved { from, to, side } = generator.step() {
                assert_eq!(generator.grid().neighbor(from, side), Some(to));
                assert_eq!(generator.current(), to);
                assert_eq!(generator.stack().last(), Some(&from));
            }
        }
    }

    #[test]
    fn test_backtracking_follows_the_stack() {
        let mut generator = seeded(6, 6, 5);

        while !generator.is_done() {
            let expected = generator.stack().last().copied();
            if let Step::Backtracked { to } = generator.step() {
                assert_eq!(Some(to), expected);
                assert_eq!(generator.current(), to);
            }
        }
    }

    #[test]
    fn test_rejection_sampling_terminates_across_many_trials() {
        for seed in 0..500 {
            let mut generator = seeded(4, 3, seed);
            let taken = generator.run_to_completion();

            assert!(generator.is_done());
            assert!(taken <= 2 * 4 * 3);
        }
    }

    #[test]
    fn test_carving_redraws_until_an_unvisited_neighbor() {
        let script = [
            // From the corner: two sides off the grid, then a usable one.
            Side::Left,
            Side::Top,
            Side::Right,
            // From (1, 0): back into the visited corner, off the grid, then down.
            Side::Left,
            Side::Top,
            Side::Left,
            Side::Down,
        ];
        let mut generator = Generator::with_start(3, 3, 0, 0, ScriptedSides::new(&script));
        let corner = generator.grid().coord(0, 0).expect("corner should exist");
        let top_middle = generator.grid().coord(1, 0).expect("top middle should exist");
        let center = generator.grid().coord(1, 1).expect("center should exist");

        assert_eq!(
            generator.step(),
            Step::Carved {
                from: corner,
                to: top_middle,
                side: Side::Right,
            }
        );
        assert_eq!(generator.rng.draws, 3);

        assert_eq!(
            generator.step(),
            Step::Carved {
                from: top_middle,
                to: center,
                side: Side::Down,
            }
        );
        assert_eq!(generator.rng.draws, 7);
        assert!(generator.rng.script.is_empty());
        assert_eq!(generator.grid().open_passages(), 2);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut generator = seeded(4, 4, 8);
        let _ = generator.step();
        let snapshot = generator.snapshot();
        let _ = generator.run_to_completion();

        assert_eq!(snapshot.steps, 1);
        assert_eq!(snapshot.state, State::Running);
        assert_eq!(snapshot.grid.open_passages(), 1);
        assert_ne!(&snapshot.grid, generator.grid());
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(State::Running.label(), "carving");
        assert_eq!(State::Done.label(), "done");
    }
}
