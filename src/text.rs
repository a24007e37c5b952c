//! Plain-text maze renderer.
//!
//! Draws a [`Grid`] as rows of ASCII, two characters per cell, so that a finished maze can be
//! printed without a terminal UI:
//!
//! ```text
//! +--+--+--+
//! |()      |
//! +--+--+  +
//! |        |
//! +--+--+--+
//! ```

use crate::{
    direction::Side,
    grid::{Coord, Grid},
};

/// Corner joint between wall segments.
const CORNER: &str = "+";
/// Horizontal wall segment spanning one cell.
const HORIZONTAL_WALL: &str = "--";
/// Vertical wall segment.
const VERTICAL_WALL: &str = "|";
/// Body of a visited cell.
const VISITED_CELL: &str = "  ";
/// Body of a cell the generator has not reached yet.
const UNVISITED_CELL: &str = "::";
/// Body of the cell under the cursor.
const CURSOR_CELL: &str = "()";

/// Renders `grid` as text lines, marking `cursor` when given.
///
/// The output has `2 * height + 1` lines of `3 * width + 1` characters each. Only the top and
/// left walls of each cell are read, plus the right and bottom walls along the far edges; the
/// other faces are the same walls seen from the neighbor.
pub fn render(grid: &Grid, cursor: Option<Coord>) -> Vec<String> {
    let mut lines = Vec::with_capacity(2 * grid.height() + 1);

    for row in 0..grid.height() {
        let mut top = String::new();
        let mut body = String::new();

        for coord in (0..grid.width()).filter_map(|col| grid.coord(col, row)) {
            top.push_str(CORNER);
            top.push_str(if grid.has_wall(coord, Side::Top) {
                HORIZONTAL_WALL
            } else {
                VISITED_CELL
            });

            body.push_str(if grid.has_wall(coord, Side::Left) {
                VERTICAL_WALL
            } else {
                " "
            });
            body.push_str(if cursor == Some(coord) {
                CURSOR_CELL
            } else if grid.cell(coord).is_visited() {
                VISITED_CELL
            } else {
                UNVISITED_CELL
            });

            if coord.col() + 1 == grid.width() {
                top.push_str(CORNER);
                body.push_str(if grid.has_wall(coord, Side::Right) {
                    VERTICAL_WALL
                } else {
                    " "
                });
            }
        }

        lines.push(top);
        lines.push(body);
    }

    let mut bottom = String::new();
    for coord in (0..grid.width()).filter_map(|col| grid.coord(col, grid.height() - 1)) {
        bottom.push_str(CORNER);
        bottom.push_str(if grid.has_wall(coord, Side::Down) {
            HORIZONTAL_WALL
        } else {
            VISITED_CELL
        });
    }
    bottom.push_str(CORNER);
    lines.push(bottom);

    lines
}
