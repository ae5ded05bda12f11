//! Color theme for the TUI.
//!
//! Dark and light variants built from a slate palette, with accent colors
//! for card badges.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use posterwall_grid::{Badge, BadgeTone};

/// Theme variant (dark or light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme variant.
    pub variant: ThemeVariant,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // Interactive elements
    pub selected: Style,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Style,
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,

    // Cards
    pub card: Style,
    pub card_selected: Style,
    pub card_meta: Style,
    pub poster: Style,

    // Badges
    pub badge_new: Color,
    pub badge_soon: Color,
    pub badge_watched: Color,
    pub badge_light_fg: Color,
    pub badge_dark_fg: Color,

    // Progress
    pub progress_bar: Style,
    pub progress_bg: Style,

    // Header/Footer
    pub header: Style,
    pub footer: Style,
}

impl Theme {
    /// Dark theme using a slate-based palette.
    pub fn dark() -> Self {
        // Slate palette (Tailwind CSS)
        let slate_50 = Color::Rgb(248, 250, 252);
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_300 = Color::Rgb(203, 213, 225);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        // Accent colors (Tailwind CSS)
        let blue_400 = Color::Rgb(96, 165, 250);
        let blue_500 = Color::Rgb(59, 130, 246);
        let green_500 = Color::Rgb(34, 197, 94);
        let yellow_500 = Color::Rgb(234, 179, 8);
        let red_500 = Color::Rgb(239, 68, 68);
        let violet_500 = Color::Rgb(139, 92, 246);
        let amber_500 = Color::Rgb(245, 158, 11);

        Self {
            variant: ThemeVariant::Dark,
            background: slate_900,
            foreground: slate_100,
            muted: slate_500,

            selected: Style::new().bg(slate_700).fg(slate_50).add_modifier(Modifier::BOLD),

            success: green_500,
            warning: yellow_500,
            error: red_500,
            info: blue_400,

            border: Style::new().fg(slate_600),
            title: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_key: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_400),

            card: Style::new().fg(slate_300),
            card_selected: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            card_meta: Style::new().fg(slate_500),
            poster: Style::new().fg(slate_600),

            badge_new: green_500,
            badge_soon: amber_500,
            badge_watched: violet_500,
            badge_light_fg: slate_50,
            badge_dark_fg: slate_900,

            progress_bar: Style::new().fg(blue_500),
            progress_bg: Style::new().fg(slate_700),

            header: Style::new().bg(slate_800).fg(slate_100),
            footer: Style::new().bg(slate_800).fg(slate_400),
        }
    }

    /// Light theme using a slate-based palette.
    pub fn light() -> Self {
        let slate_50 = Color::Rgb(248, 250, 252);
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_200 = Color::Rgb(226, 232, 240);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        // Darker accents for contrast on a light background
        let blue_600 = Color::Rgb(37, 99, 235);
        let blue_700 = Color::Rgb(29, 78, 216);
        let green_600 = Color::Rgb(22, 163, 74);
        let yellow_600 = Color::Rgb(202, 138, 4);
        let red_600 = Color::Rgb(220, 38, 38);
        let violet_600 = Color::Rgb(124, 58, 237);
        let amber_600 = Color::Rgb(217, 119, 6);

        Self {
            variant: ThemeVariant::Light,
            background: slate_50,
            foreground: slate_900,
            muted: slate_500,

            selected: Style::new().bg(slate_200).fg(slate_900).add_modifier(Modifier::BOLD),

            success: green_600,
            warning: yellow_600,
            error: red_600,
            info: blue_600,

            border: Style::new().fg(slate_400),
            title: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            help_key: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_600),

            card: Style::new().fg(slate_700),
            card_selected: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            card_meta: Style::new().fg(slate_500),
            poster: Style::new().fg(slate_400),

            badge_new: green_600,
            badge_soon: amber_600,
            badge_watched: violet_600,
            badge_light_fg: slate_50,
            badge_dark_fg: slate_900,

            progress_bar: Style::new().fg(blue_600),
            progress_bg: Style::new().fg(slate_200),

            header: Style::new().bg(slate_100).fg(slate_800),
            footer: Style::new().bg(slate_100).fg(slate_600),
        }
    }

    /// Create theme from variant.
    pub fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Toggle between dark and light themes.
    pub fn toggle(&self) -> Self {
        match self.variant {
            ThemeVariant::Dark => Self::light(),
            ThemeVariant::Light => Self::dark(),
        }
    }

    /// Style for a card badge.
    ///
    /// A pulsing badge blinks to flag a recent change.
    pub fn badge_style(&self, badge: Badge, tone: BadgeTone, pulse: bool) -> Style {
        let bg = match badge {
            Badge::NewRelease => self.badge_new,
            Badge::SoonRelease => self.badge_soon,
            Badge::Watched => self.badge_watched,
        };
        let fg = match tone {
            BadgeTone::Light => self.badge_light_fg,
            BadgeTone::Dark => self.badge_dark_fg,
        };
        let style = Style::new().bg(bg).fg(fg).add_modifier(Modifier::BOLD);
        if pulse {
            style.add_modifier(Modifier::SLOW_BLINK)
        } else {
            style
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
