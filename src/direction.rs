//! Cardinal sides of a grid cell.
//!
//! Sides are indexed in the order Right, Down, Left, Top. That order is what the wall arrays in
//! [`Cell`](crate::grid::Cell) are laid out by, and it makes the opposite of any side sit two
//! positions away.

use rand::Rng;

/// One of the four sides of a cell.
///
/// The side doubles as the direction of travel when carving: moving towards [`Side::Right`] means
/// crossing the right wall of the current cell into its neighbor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Positive column direction.
    Right,
    /// Positive row direction.
    Down,
    /// Negative column direction.
    Left,
    /// Negative row direction.
    Top,
}

impl Side {
    /// All sides in index order.
    pub const ALL: [Self; 4] = [Self::Right, Self::Down, Self::Left, Self::Top];

    /// Position of this side in a cell's wall array.
    pub const fn index(self) -> usize {
        match self {
            Self::Right => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Top => 3,
        }
    }

    /// The side facing this one from the neighboring cell.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Down => Self::Top,
            Self::Left => Self::Right,
            Self::Top => Self::Down,
        }
    }

    /// Column and row offsets of the neighbor across this side.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Top => (0, -1),
        }
    }

    /// Draws one side uniformly at random.
    ///
    /// Every call is an independent draw over all four sides, with no regard for whether the
    /// neighbor across it exists. Callers that need a usable side keep drawing until one fits.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..4_u8) {
            0 => Self::Right,
            1 => Self::Down,
            2 => Self::Left,
            _ => Self::Top,
        }
    }
}
