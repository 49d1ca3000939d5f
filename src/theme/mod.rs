//! Color palette (Catppuccin Mocha subset).

use ratatui::style::Color;

/// Colors used across the UI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Default background.
    pub base: Color,
    /// Default foreground.
    pub text: Color,
    /// Dimmed foreground for secondary lines.
    pub subtext0: Color,
    /// Borders and separators.
    pub overlay1: Color,
    /// Focused-element accent.
    pub sapphire: Color,
    /// Positive accent (ratings).
    pub green: Color,
    /// Warning accent (stars, loading).
    pub yellow: Color,
    /// Error accent.
    pub red: Color,
    /// Selection accent.
    pub lavender: Color,
    /// Marker/highlight accent.
    pub mauve: Color,
}

/// The fixed application theme.
pub fn theme() -> Theme {
    Theme {
        base: Color::Rgb(30, 30, 46),
        text: Color::Rgb(205, 214, 244),
        subtext0: Color::Rgb(166, 173, 200),
        overlay1: Color::Rgb(127, 132, 156),
        sapphire: Color::Rgb(116, 199, 236),
        green: Color::Rgb(166, 227, 161),
        yellow: Color::Rgb(249, 226, 175),
        red: Color::Rgb(243, 139, 168),
        lavender: Color::Rgb(180, 190, 254),
        mauve: Color::Rgb(203, 166, 247),
    }
}
