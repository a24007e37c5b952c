//! Grid topology and per-cell wall state.
//!
//! This module contains the [`Grid`] type holding every [`Cell`] of a rectangular maze in row-major
//! order, along with the bounds-checked [`Coord`] used to address it. Wall flags are only ever
//! changed through [`Grid::set_wall`], which updates both sides of a shared wall at once.

use crate::direction::Side;

/// Position of a cell inside a [`Grid`].
///
/// A coordinate can only be obtained from [`Grid::coord`] or [`Grid::neighbor`], both of which
/// check the grid bounds, so holding one means it lies inside the grid that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Zero-based column.
    col: usize,
    /// Zero-based row.
    row: usize,
}

impl Coord {
    /// Column of the cell.
    pub const fn col(self) -> usize {
        self.col
    }

    /// Row of the cell.
    pub const fn row(self) -> usize {
        self.row
    }

    /// Row-major linear index of the cell in a grid `width` columns wide.
    pub const fn index(self, width: usize) -> usize {
        self.col + self.row * width
    }
}

/// A single maze cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Wall flags indexed by [`Side::index`]; `true` means the wall stands.
    walls: [bool; 4],
    /// Whether the generator has carved into this cell.
    visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }
}

impl Cell {
    /// Whether the wall on `side` is present.
    #[expect(
        clippy::indexing_slicing,
        reason = "Side indices are always within the four-element wall array."
    )]
    pub const fn has_wall(&self, side: Side) -> bool {
        self.walls[side.index()]
    }

    /// Copy of all four wall flags in [`Side::ALL`] order.
    pub const fn walls(&self) -> [bool; 4] {
        self.walls
    }

    /// Whether the cell has been visited.
    pub const fn is_visited(&self) -> bool {
        self.visited
    }
}

/// Rectangular array of cells.
///
/// A fresh grid has every wall standing and no cell visited. The number of unvisited cells is
/// tracked as cells get marked, which keeps [`Grid::has_unvisited_cells`] constant-time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
    /// Cells whose visited flag is still unset.
    unvisited: usize,
}

impl Grid {
    /// Builds a `width` by `height` grid with all walls present.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or the cell count overflows `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be positive, got {width}x{height}"
        );

        let len = width
            .checked_mul(height)
            .expect("grid cell count overflows usize");
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            unvisited: len,
        }
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the grid holds no cells, which construction rules out.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `(col, row)` lies inside the grid.
    pub const fn is_valid(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height
    }

    /// Builds a coordinate for `(col, row)`, or `None` when it falls outside the grid.
    pub const fn coord(&self, col: usize, row: usize) -> Option<Coord> {
        if self.is_valid(col, row) {
            Some(Coord { col, row })
        } else {
            None
        }
    }

    /// Raw coordinate of the neighbor across `side`, without any bounds check.
    ///
    /// The result may be negative or past the grid edge. Use [`Grid::neighbor`] to get a checked
    /// coordinate instead.
    ///
    /// # Panics
    ///
    /// Panics if `col` or `row` is not below `isize::MAX`.
    #[expect(
        clippy::cast_possible_wrap,
        reason = "Both coordinates are asserted to fit in isize right before the cast."
    )]
    pub const fn neighbor_coord(col: usize, row: usize, side: Side) -> (isize, isize) {
        assert!(
            col < isize::MAX.unsigned_abs() && row < isize::MAX.unsigned_abs(),
            "coordinate does not fit in isize"
        );
        let (dx, dy) = side.delta();
        (col as isize + dx, row as isize + dy)
    }

    /// Coordinate of the neighbor across `side`, if that neighbor exists.
    pub fn neighbor(&self, coord: Coord, side: Side) -> Option<Coord> {
        let (dx, dy) = side.delta();
        let col = coord.col.checked_add_signed(dx)?;
        let row = coord.row.checked_add_signed(dy)?;
        self.coord(col, row)
    }

    /// Iterates over every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Coord { col, row }))
    }

    /// Linear index of `coord`.
    fn index_of(&self, coord: Coord) -> usize {
        debug_assert!(
            self.is_valid(coord.col, coord.row),
            "coordinate {coord:?} does not belong to a {}x{} grid",
            self.width,
            self.height
        );
        coord.index(self.width)
    }

    /// Cell at `coord`.
    #[expect(
        clippy::indexing_slicing,
        reason = "Coordinates are bounds-checked on construction."
    )]
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.index_of(coord)]
    }

    /// Mutable cell at `coord`.
    #[expect(
        clippy::indexing_slicing,
        reason = "Coordinates are bounds-checked on construction."
    )]
    fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let idx = self.index_of(coord);
        &mut self.cells[idx]
    }

    /// Whether the wall on `side` of the cell at `coord` is present.
    pub fn has_wall(&self, coord: Coord, side: Side) -> bool {
        self.cell(coord).has_wall(side)
    }

    /// Sets the wall on `side` of the cell at `coord`, and the matching wall of its neighbor.
    ///
    /// Border walls have no neighbor and only the cell itself is updated. This is the only place
    /// wall flags change, so the two faces of a shared wall always agree.
    #[expect(
        clippy::indexing_slicing,
        reason = "Side indices are always within the four-element wall array."
    )]
    pub fn set_wall(&mut self, coord: Coord, side: Side, present: bool) {
        self.cell_mut(coord).walls[side.index()] = present;

        if let Some(next) = self.neighbor(coord, side) {
            self.cell_mut(next).walls[side.opposite().index()] = present;
        }
    }

    /// Marks the cell at `coord` as visited.
    ///
    /// Returns `true` if the cell had not been visited before.
    pub fn mark_visited(&mut self, coord: Coord) -> bool {
        let cell = self.cell_mut(coord);
        if cell.visited {
            return false;
        }

        cell.visited = true;
        self.unvisited -= 1;
        true
    }

    /// Whether any cell is still unvisited.
    pub const fn has_unvisited_cells(&self) -> bool {
        self.unvisited > 0
    }

    /// Number of cells still unvisited.
    pub const fn unvisited_cells(&self) -> usize {
        self.unvisited
    }

    /// Counts the in-bounds neighbors of `coord` that have not been visited.
    pub fn count_unvisited_neighbors(&self, coord: Coord) -> usize {
        Side::ALL
            .into_iter()
            .filter_map(|side| self.neighbor(coord, side))
            .filter(|next| !self.cell(*next).visited)
            .count()
    }

    /// Whether `coord` has at least one in-bounds unvisited neighbor.
    pub fn has_unvisited_neighbor(&self, coord: Coord) -> bool {
        Side::ALL
            .into_iter()
            .filter_map(|side| self.neighbor(coord, side))
            .any(|next| !self.cell(next).visited)
    }

    /// Number of interior walls that have been removed.
    ///
    /// Each open passage between two adjacent cells is counted once. In a finished maze this is
    /// one less than the number of cells.
    pub fn open_passages(&self) -> usize {
        self.coords()
            .map(|coord| {
                [Side::Right, Side::Down]
                    .into_iter()
                    .filter(|side| {
                        self.neighbor(coord, *side).is_some() && !self.has_wall(coord, *side)
                    })
                    .count()
            })
            .sum()
    }
}
