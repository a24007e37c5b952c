//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::{
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Longest time to wait for input before giving the animation a chance to advance.
const MAX_POLL_MS: u64 = 100;

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the handler functions. The poll
/// timeout never exceeds one animation frame, so carving keeps its pace while no key is pressed.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let timeout = app
        .animation_manager
        .frame_delay
        .min(Duration::from_millis(MAX_POLL_MS));

    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            handle_key(app, key.code);
        }
    }

    if matches!(app.screen, Screen::InGame) {
        app.tick();
    }

    Ok(())
}

/// Dispatches a single key press.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app),
        KeyCode::Char('h') => handle_h_events(app),
        other if matches!(app.screen, Screen::InGame) => handle_in_game_events(app, other),
        _ => {}
    }
}

/// Handles 'j' key press events for downward navigation.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Generate) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Size) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        Screen::SizeMenu => {
            if app.size_cursor + 1 < app.sizes.len() {
                app.size_cursor += 1;
            }
            if app.viewport_height > 0
                && app.size_cursor >= app.viewport_offset + app.viewport_height
            {
                app.viewport_offset += 1;
            }
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Size);
        }
        Screen::SizeMenu => {
            app.size_cursor = app.size_cursor.saturating_sub(1);
            if app.size_cursor < app.viewport_offset {
                app.viewport_offset = app.size_cursor;
            }
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// Selecting "Generate" always starts a fresh maze, so coming back to the maze screen never shows a
/// stale one.
pub(crate) fn handle_l_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Generate) => {
            app.new_maze();
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Size);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Size) => {
            app.screen = Screen::SizeMenu;
            let active = (app.config.width, app.config.height);
            app.size_cursor = app
                .sizes
                .iter()
                .position(|size| *size == active)
                .unwrap_or_default();
            app.viewport_offset = 0;
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::SizeMenu => {
            if let Some(&(width, height)) = app.sizes.get(app.size_cursor) {
                app.config.width = width;
                app.config.height = height;
            }
        }
        Screen::InGame => {}
    }
}

/// Handles 'h' key press events for backward navigation.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => {
            app.animation_manager.reset();
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::SizeMenu => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Size);
        }
        _ => {}
    }
}

/// Handles the playback keys available on the maze screen.
pub(crate) fn handle_in_game_events(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(' ') => app.animation_manager.toggle_pause(),
        KeyCode::Char('s') => app.animation_manager.single_step(&mut app.generator),
        KeyCode::Char('f') => app.finish(),
        KeyCode::Char('n') => app.new_maze(),
        KeyCode::Char('+' | '=') => app.animation_manager.faster(),
        KeyCode::Char('-') => app.animation_manager.slower(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    /// Creates an app with a small seeded maze.
    fn create_test_app() -> App {
        App::new(Config {
            width: 5,
            height: 5,
            seed: Some(4),
            ..Config::default()
        })
    }

    #[test]
    fn test_q_exits_from_any_screen() {
        for screen in [
            Screen::MainMenu(MainMenuItem::Options),
            Screen::InGame,
            Screen::SizeMenu,
        ] {
            let mut app = create_test_app();
            app.screen = screen;

            handle_key(&mut app, KeyCode::Char('q'));

            assert!(app.exit);
        }
    }

    #[test]
    fn test_main_menu_navigation() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));
        handle_key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));
        handle_key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));
        handle_key(&mut app, KeyCode::Char('k'));
        handle_key(&mut app, KeyCode::Char('k'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));
    }

    #[test]
    fn test_generate_starts_fresh_maze() {
        let mut app = create_test_app();
        app.finish();

        handle_key(&mut app, KeyCode::Char('l'));

        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(app.generator.steps_taken(), 0);
        assert_eq!(app.seed, 4);
    }

    #[test]
    fn test_quit_item_exits() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Quit);

        handle_key(&mut app, KeyCode::Char('l'));

        assert!(app.exit);
    }

    #[test]
    fn test_size_menu_selects_new_dimensions() {
        let mut app = create_test_app();
        app.screen = Screen::OptionsMenu(OptionsMenuItem::Size);

        handle_key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.screen, Screen::SizeMenu);
        assert_eq!(app.size_cursor, 0);

        handle_key(&mut app, KeyCode::Char('j'));
        handle_key(&mut app, KeyCode::Char('l'));
        let expected = *app.sizes.get(1).expect("size list should have a second entry");
        assert_eq!((app.config.width, app.config.height), expected);

        handle_key(&mut app, KeyCode::Char('h'));
        assert_eq!(app.screen, Screen::OptionsMenu(OptionsMenuItem::Size));
    }

    #[test]
    fn test_size_menu_cursor_stays_in_bounds() {
        let mut app = create_test_app();
        app.screen = Screen::SizeMenu;
        app.viewport_height = 2;

        handle_key(&mut app, KeyCode::Char('k'));
        assert_eq!(app.size_cursor, 0);

        for _ in 0..20 {
            handle_key(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.size_cursor, app.sizes.len() - 1);
        assert_eq!(app.viewport_offset, app.sizes.len() - 2);

        for _ in 0..20 {
            handle_key(&mut app, KeyCode::Char('k'));
        }
        assert_eq!(app.size_cursor, 0);
        assert_eq!(app.viewport_offset, 0);
    }

    #[test]
    fn test_in_game_playback_keys() {
        let mut app = create_test_app();
        app.screen = Screen::InGame;

        handle_key(&mut app, KeyCode::Char(' '));
        assert!(app.animation_manager.paused);

        handle_key(&mut app, KeyCode::Char('s'));
        assert_eq!(app.generator.steps_taken(), 1);

        let delay = app.animation_manager.frame_delay;
        handle_key(&mut app, KeyCode::Char('-'));
        assert!(app.animation_manager.frame_delay > delay);
        handle_key(&mut app, KeyCode::Char('+'));
        assert_eq!(app.animation_manager.frame_delay, delay);

        handle_key(&mut app, KeyCode::Char('f'));
        assert!(app.generator.is_done());

        handle_key(&mut app, KeyCode::Char('n'));
        assert!(!app.generator.is_done());
        assert!(!app.animation_manager.paused);
    }

    #[test]
    fn test_playback_keys_ignored_outside_game() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('s'));

        assert_eq!(app.generator.steps_taken(), 0);
    }

    #[test]
    fn test_h_returns_from_game() {
        let mut app = create_test_app();
        app.screen = Screen::InGame;

        handle_key(&mut app, KeyCode::Char('h'));

        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));
    }
}
