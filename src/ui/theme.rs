//! Theme configuration

use iced::{Color, Theme};

use crate::preferences::ThemeMode;

/// Colors for one appearance
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub surface_highlight: Color,
    pub border: Color,
    pub primary: Color,
    pub text: Color,
    pub text_muted: Color,
    pub error: Color,
    pub overlay: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Color::from_rgb(0.09, 0.09, 0.11),
        surface: Color::from_rgb(0.12, 0.12, 0.14),
        surface_highlight: Color::from_rgb(0.18, 0.18, 0.22),
        border: Color::from_rgb(0.25, 0.25, 0.28),
        primary: Color::from_rgb(0.51, 0.55, 0.97),
        text: Color::from_rgb(0.95, 0.95, 0.95),
        text_muted: Color::from_rgb(0.55, 0.55, 0.6),
        error: Color::from_rgb(0.97, 0.44, 0.44),
        overlay: Color::from_rgba(0.0, 0.0, 0.0, 0.7),
    };

    pub const LIGHT: Palette = Palette {
        background: Color::from_rgb(0.93, 0.94, 0.99),
        surface: Color::WHITE,
        surface_highlight: Color::from_rgb(0.96, 0.96, 1.0),
        border: Color::from_rgb(0.9, 0.91, 0.93),
        primary: Color::from_rgb(0.31, 0.27, 0.9),
        text: Color::from_rgb(0.12, 0.16, 0.22),
        text_muted: Color::from_rgb(0.42, 0.45, 0.5),
        error: Color::from_rgb(0.86, 0.15, 0.15),
        overlay: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
    };

    pub fn for_mode(mode: ThemeMode) -> &'static Palette {
        match mode {
            ThemeMode::Dark => &Self::DARK,
            ThemeMode::Light => &Self::LIGHT,
        }
    }
}

/// Built-in iced theme used for stock widgets
pub fn iced_theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::Light => Theme::Light,
    }
}
