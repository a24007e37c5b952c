//! Type definitions and enums for the application state and navigation.

/// Grid sizes offered in the size menu, as `(width, height)`.
pub(crate) const SIZE_PRESETS: [(u16, u16); 6] =
    [(8, 6), (12, 9), (20, 15), (32, 24), (48, 32), (64, 48)];

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen. This is used to determine which
/// screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    OptionsMenu(OptionsMenuItem),
    /// Maze generation screen.
    ///
    /// This variant represents the screen where the maze is carved and animated.
    InGame,
    /// Grid size selection screen.
    ///
    /// This variant represents the list of grid sizes available to the user.
    SizeMenu,
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "Generate" menu option.
    Generate,
    /// "Options" menu option.
    Options,
    /// "Quit" menu option.
    Quit,
}

/// Options menu navigation choices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum OptionsMenuItem {
    /// "Return" navigation option.
    Back,
    /// "Grid Size" selection option.
    Size,
}

/// Generic menu type configuration.
///
/// This enumeration holds the specifics particular to each generic menu in the interface, namely
/// its title and how many entries it lists.
pub(crate) enum MenuType {
    /// Main menu configuration.
    MainMenu(u8),
    /// Options menu configuration.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the display name used as the title in the menu's border.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the number of entries in the menu.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

/// Formats a grid size for the size menu and status bar.
pub(crate) fn size_label((width, height): (u16, u16)) -> String {
    format!("{width} x {height}")
}
