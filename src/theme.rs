//! Centralized theme and styling for the wizard
//!
//! Single source of truth for the colors and styles the panels use.

use ratatui::style::{Color, Modifier, Style};

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Primary accent color - used for borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - used for selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    /// Success/positive feedback
    pub const SUCCESS: Color = Color::Green;

    /// Warning/caution feedback
    pub const WARNING: Color = Color::Yellow;

    /// Error/danger feedback
    pub const ERROR: Color = Color::Red;

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Cyan;

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item text (for contrast on highlighted bg)
    pub const SELECTED_FG: Color = Color::Black;

    /// Help bar background
    pub const HELP_BG: Color = Color::Green;
}

/// Pre-built styles
pub struct Styles;

impl Styles {
    /// Border style for a panel, depending on focus
    pub fn border(focused: bool) -> Style {
        if focused {
            Style::default().fg(Colors::BORDER_ACTIVE)
        } else {
            Style::default().fg(Colors::BORDER_INACTIVE)
        }
    }

    /// Panel title
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlighted row in a focused list
    pub fn highlight() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Reversed instruction line at the top of the details panel
    pub fn instructions() -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    /// Footer hint text
    pub fn help() -> Style {
        Style::default().fg(Colors::FG_PRIMARY).bg(Colors::HELP_BG)
    }

    /// Footer button, depending on focus
    pub fn button(focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(Colors::FG_PRIMARY)
                .bg(Colors::HELP_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Colors::FG_SECONDARY)
        }
    }

    /// Error message text
    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }
}
