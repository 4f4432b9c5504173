//! Color theme and styling definitions using ratatui colors

use crate::error::{MedlistError, Result};
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Normal text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Table header row
    pub header: Style,

    /// Row under the cursor
    pub selected_row: Style,

    /// Active panel tab
    pub active_tab: Style,

    /// Enabled pagination control
    pub control: Style,

    /// Control disabled at a page boundary
    pub disabled_control: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Warning text (refused deletes, failed loads)
    pub warning_text: Color,

    /// Panel borders
    pub border: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None,
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            selected_row: Style::default().fg(Color::Black).bg(Color::LightBlue),
            active_tab: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            control: Style::default().fg(Color::White),
            disabled_control: Style::default().fg(Color::DarkGray),
            status_bg: Color::Blue,
            status_fg: Color::White,
            warning_text: Color::Yellow,
            border: Color::Gray,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            header: Style::default().add_modifier(Modifier::BOLD),
            selected_row: Style::default().add_modifier(Modifier::REVERSED),
            active_tab: Style::default().add_modifier(Modifier::UNDERLINED),
            control: Style::default(),
            disabled_control: Style::default().add_modifier(Modifier::DIM),
            status_bg: Color::Black,
            status_fg: Color::White,
            warning_text: Color::White,
            border: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            normal_text: Some(Color::White),
            header: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            selected_row: Style::default().fg(Color::Black).bg(Color::LightYellow),
            active_tab: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            control: Style::default().fg(Color::LightGreen),
            disabled_control: Style::default().fg(Color::Gray),
            status_bg: Color::White,
            status_fg: Color::Black,
            warning_text: Color::LightRed,
            border: Color::White,
        }
    }
}

impl FromStr for ColorTheme {
    type Err = MedlistError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::default()),
            "monochrome" | "mono" => Ok(Self::monochrome()),
            "high-contrast" | "high_contrast" => Ok(Self::high_contrast()),
            other => Err(MedlistError::config(format!(
                "unknown theme '{other}' (expected default, monochrome or high-contrast)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.normal_text, None);
        assert_eq!(theme.status_fg, Color::White);
        assert_eq!(theme.status_bg, Color::Blue);
        assert_eq!(theme.disabled_control.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_monochrome_theme() {
        let theme = ColorTheme::monochrome();
        assert_eq!(theme.status_bg, Color::Black);
        assert!(theme.selected_row.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_high_contrast_theme() {
        let theme = ColorTheme::high_contrast();
        assert_eq!(theme.normal_text, Some(Color::White));
        assert_eq!(theme.warning_text, Color::LightRed);
        assert_eq!(theme.status_fg, Color::Black);
    }

    #[test]
    fn test_theme_from_name() {
        assert_eq!("Monochrome".parse::<ColorTheme>().unwrap().status_bg, Color::Black);
        assert_eq!(
            "high-contrast".parse::<ColorTheme>().unwrap().status_bg,
            Color::White
        );
        assert!("neon".parse::<ColorTheme>().is_err());
    }
}
