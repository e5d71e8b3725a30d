//! # Theme System
//!
//! Colors for the picker, grouped by the role they play on screen.
//!
//! Rendering code never hardcodes `ratatui::style::Color` values; it reads
//! them from the active [`Theme`], picked by name from the config file or the
//! `--theme` flag.
//!
//! ## Built-in Themes
//!
//! - **Catppuccin Mocha** (default)
//! - **Catppuccin Macchiato**
//! - **Catppuccin Frappe**
//! - **Dracula**
//! - **Nord**

use ratatui::style::Color;

/// All colors used by the picker.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name, matched case-insensitively.
    pub name: &'static str,

    /// Panel background.
    pub bg: Color,
    /// Device rows and description text.
    pub fg: Color,
    /// Hints, footer, inactive borders.
    pub fg_dim: Color,
    /// Focused borders, cursor row background, header.
    pub accent: Color,
    /// Sub-family headings and search text.
    pub heading: Color,
    /// Marker and text of the selected device.
    pub selected: Color,
    /// "No match" and other warnings.
    pub error: Color,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }
}

static BUILT_IN_THEMES: [Theme; 5] = [
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),          // base
        fg: Color::Rgb(205, 214, 244),       // text
        fg_dim: Color::Rgb(108, 112, 134),   // overlay0
        accent: Color::Rgb(137, 180, 250),   // blue
        heading: Color::Rgb(249, 226, 175),  // yellow
        selected: Color::Rgb(166, 227, 161), // green
        error: Color::Rgb(243, 139, 168),    // red
    },
    Theme {
        name: "Catppuccin Macchiato",
        bg: Color::Rgb(36, 39, 58),
        fg: Color::Rgb(202, 211, 245),
        fg_dim: Color::Rgb(110, 115, 141),
        accent: Color::Rgb(138, 173, 244),
        heading: Color::Rgb(238, 212, 159),
        selected: Color::Rgb(166, 218, 149),
        error: Color::Rgb(237, 135, 150),
    },
    Theme {
        name: "Catppuccin Frappe",
        bg: Color::Rgb(48, 52, 70),
        fg: Color::Rgb(198, 208, 245),
        fg_dim: Color::Rgb(115, 121, 148),
        accent: Color::Rgb(140, 170, 238),
        heading: Color::Rgb(229, 200, 144),
        selected: Color::Rgb(166, 209, 137),
        error: Color::Rgb(231, 130, 132),
    },
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(139, 233, 253),
        heading: Color::Rgb(241, 250, 140),
        selected: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
    },
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),
        heading: Color::Rgb(235, 203, 139),
        selected: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
    },
];
