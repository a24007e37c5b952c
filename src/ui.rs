//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, DOT},
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Line as Segment, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    direction::Side,
    grid::{Coord, Grid},
    types::{size_label, MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Radius of the cursor marker, in cell units.
const CURSOR_RADIUS: f64 = 0.25;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from layout retrieval or coordinate conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(frame, *item),
        Screen::InGame => in_game(app, frame)?,
        Screen::SizeMenu => size_menu(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the centered block shared by both menus and returns one row per entry for
/// the caller to fill in.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders a list of menu entries, highlighting the one at `active`.
fn render_entries(frame: &mut Frame, rows: &[Rect], labels: &[&str], active: usize) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (idx, (label, row)) in labels.iter().zip(rows).enumerate() {
        let style = if idx == active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(*label).centered().style(style), *row);
    }
}

/// Renders the main menu screen with navigation options.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));
    let active = match item {
        MainMenuItem::Generate => 0,
        MainMenuItem::Options => 1,
        MainMenuItem::Quit => 2,
    };

    render_entries(frame, &inner_layout, &["Generate", "Options", "Quit"], active);
}

/// Renders the options menu screen with configuration choices.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(2));
    let active = match item {
        OptionsMenuItem::Size => 0,
        OptionsMenuItem::Back => 1,
    };

    render_entries(frame, &inner_layout, &["Grid Size", "Return"], active);
}

/// Renders the grid size menu with a scrollable list of sizes.
///
/// The entry under the cursor is highlighted and the size the next maze will use is marked with a
/// dot.
///
/// # Errors
///
/// This function may return errors if the layout cannot be retrieved.
pub(crate) fn size_menu(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(frame.area())
    .get(1)
    .copied()
    .ok_or_eyre("failed to get size menu column from layout")?;
    let layout = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Fill(1),
        Constraint::Percentage(40),
    ])
    .split(space)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get size menu row from layout")?;

    let block = Block::bordered()
        .title_top("Grid size")
        .title_bottom("(j) down / (k) up / (l) select / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    app.viewport_height = inner_space.height.into();
    if app.viewport_height > 0 && app.size_cursor >= app.viewport_offset + app.viewport_height {
        app.viewport_offset = app.size_cursor + 1 - app.viewport_height;
    }

    let columns = Layout::horizontal([Constraint::Percentage(5), Constraint::Percentage(100)])
        .split(inner_space);
    let selector_column = *columns
        .first()
        .ok_or_eyre("failed to get selector column from layout")?;
    let list_column = *columns
        .last()
        .ok_or_eyre("failed to get list column from layout")?;
    let inner_selector =
        Layout::vertical(vec![Constraint::Max(1); app.viewport_height]).split(selector_column);
    let inner_list =
        Layout::vertical(vec![Constraint::Max(1); app.viewport_height]).split(list_column);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);
    let active_size = (app.config.width, app.config.height);

    let visible = app
        .sizes
        .iter()
        .enumerate()
        .skip(app.viewport_offset)
        .take(app.viewport_height);
    for ((idx, size), (selector_area, entry_area)) in
        visible.zip(inner_selector.iter().zip(inner_list.iter()))
    {
        let style = if idx == app.size_cursor {
            active_content_style
        } else {
            content_style
        };
        let marker = if *size == active_size { DOT } else { " " };

        frame.render_widget(Line::styled(marker, style).centered(), *selector_area);
        frame.render_widget(Line::styled(size_label(*size), style), *entry_area);
    }

    Ok(())
}

/// Converts a grid position or length to canvas units.
fn to_canvas(value: usize) -> Result<f64> {
    Ok(f64::from(u32::try_from(value)?))
}

/// Canvas coordinates of the center of `coord`.
///
/// Canvas y grows upwards while grid rows grow downwards, so rows are flipped.
fn cell_center(grid: &Grid, coord: Coord) -> Result<(f64, f64)> {
    let col = to_canvas(coord.col())?;
    let row = to_canvas(coord.row())?;
    let height = to_canvas(grid.height())?;

    Ok((col + 0.5, height - row - 0.5))
}

/// Collects the standing walls of `grid` as canvas line segments `[x1, y1, x2, y2]`.
///
/// Each shared wall is emitted once, from the cell above or to the left of it, while the right
/// and bottom borders come from the last column and row.
///
/// # Errors
///
/// This function may return errors from coordinate conversion.
pub(crate) fn wall_segments(grid: &Grid) -> Result<Vec<[f64; 4]>> {
    let height = to_canvas(grid.height())?;
    let mut segments = Vec::new();

    for coord in grid.coords() {
        let left = to_canvas(coord.col())?;
        let right = left + 1.;
        let top = height - to_canvas(coord.row())?;
        let bottom = top - 1.;

        if grid.has_wall(coord, Side::Top) {
            segments.push([left, top, right, top]);
        }
        if grid.has_wall(coord, Side::Left) {
            segments.push([left, top, left, bottom]);
        }
        if coord.col() + 1 == grid.width() && grid.has_wall(coord, Side::Right) {
            segments.push([right, top, right, bottom]);
        }
        if coord.row() + 1 == grid.height() && grid.has_wall(coord, Side::Down) {
            segments.push([left, bottom, right, bottom]);
        }
    }

    Ok(segments)
}

/// Largest area inside `area` that shows cells roughly square.
///
/// Terminal cells are about twice as tall as they are wide, so each maze column is given two
/// terminal columns for every terminal row a maze row gets.
///
/// # Errors
///
/// This function may return errors from numeric conversion or layout retrieval.
pub(crate) fn fit_maze(area: Rect, width: usize, height: usize) -> Result<Rect> {
    let area_width = i32::from(area.width);
    let area_height = i32::from(area.height);
    let maze_width = i32::try_from(width)?;
    let maze_height = i32::try_from(height)?;

    let (columns, rows) = if area_width * maze_height >= area_height * 2 * maze_width {
        (
            rounded_div::i32(area_height * 2 * maze_width, maze_height),
            area_height,
        )
    } else {
        (
            area_width,
            rounded_div::i32(area_width * maze_height, 2 * maze_width),
        )
    };
    let columns = u16::try_from(columns.min(area_width))?;
    let rows = u16::try_from(rows.min(area_height))?;

    let row_area = Layout::vertical([Constraint::Length(rows)])
        .flex(Flex::Center)
        .split(area)
        .first()
        .copied()
        .ok_or_eyre("failed to center maze vertically")?;

    Layout::horizontal([Constraint::Length(columns)])
        .flex(Flex::Center)
        .split(row_area)
        .first()
        .copied()
        .ok_or_eyre("failed to center maze horizontally")
}

/// Renders the maze screen with the carving animation and a status bar.
///
/// The maze is drawn on a [`Canvas`] in cell units: walls as line segments, unvisited cells as
/// dim dots, the carving stack in yellow, the start and far corners in red and green, and the
/// cursor as a red circle.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout retrieval.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let grid = app.generator.grid();

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze area
        Constraint::Length(3), // Status bar
    ])
    .split(frame.area());
    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let status_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get status area from layout")?;

    let space = fit_maze(maze_content_area, grid.width(), grid.height())?;

    let segments = wall_segments(grid)?;
    let mut unvisited = Vec::new();
    for coord in grid.coords() {
        if !grid.cell(coord).is_visited() {
            unvisited.push(cell_center(grid, coord)?);
        }
    }
    let trail = app
        .generator
        .stack()
        .iter()
        .map(|coord| cell_center(grid, *coord))
        .collect::<Result<Vec<_>>>()?;
    let start = grid
        .coord(0, 0)
        .ok_or_eyre("failed to retrieve start cell")?;
    let goal = grid
        .coord(grid.width() - 1, grid.height() - 1)
        .ok_or_eyre("failed to retrieve goal cell")?;
    let start_center = [cell_center(grid, start)?];
    let goal_center = [cell_center(grid, goal)?];
    let (cursor_x, cursor_y) = cell_center(grid, app.generator.current())?;

    let maze = Canvas::default()
        .x_bounds([0., to_canvas(grid.width())?])
        .y_bounds([0., to_canvas(grid.height())?])
        .marker(Marker::Braille)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &unvisited,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &trail,
                color: Color::Yellow,
            });
            ctx.draw(&Points {
                coords: &start_center,
                color: Color::Red,
            });
            ctx.draw(&Points {
                coords: &goal_center,
                color: Color::Green,
            });
            ctx.layer();
            for &[x1, y1, x2, y2] in &segments {
                ctx.draw(&Segment::new(x1, y1, x2, y2, Color::Green));
            }
            ctx.layer();
            ctx.draw(&Circle {
                x: cursor_x,
                y: cursor_y,
                radius: CURSOR_RADIUS,
                color: Color::Red,
            });
        });

    frame.render_widget(maze, space);

    status_bar(app, frame, status_area);

    Ok(())
}

/// Renders the key hints and run statistics below the maze.
pub(crate) fn status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let manager = &app.animation_manager;
    let state = if manager.paused && !app.generator.is_done() {
        "paused"
    } else {
        app.generator.state().label()
    };
    let status = format!(
        "{} | seed {} | step {} | {} | {} ms/frame",
        size_label((app.config.width, app.config.height)),
        app.seed,
        app.generator.steps_taken(),
        state,
        manager.frame_delay.as_millis()
    );

    let status_block = Block::bordered()
        .title("(space) pause / (s) step / (f) finish / (n) new / (+/-) speed / (h) menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status_inner = status_block.inner(area);

    frame.render_widget(status_block, area);
    frame.render_widget(Line::raw(status).centered(), status_inner);
}
