//! Colour palettes for the terminal front end.
//!
//! Each field of [`ColorPalette`] is a semantic role; the renderer never
//! names a colour directly.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Navigation bar --
    pub nav_bar: Style,
    pub brand_primary: Style,
    pub brand_secondary: Style,
    pub nav_link: Style,
    pub nav_link_active: Style,
    pub category_tab: Style,
    pub category_tab_hovered: Style,

    // -- Dropdowns and menus --
    pub dropdown_border: Style,
    pub dropdown_heading: Style,
    pub dropdown_item: Style,
    pub dropdown_letter: Style,
    pub dropdown_view_all: Style,
    pub avatar: Style,
    pub menu_danger: Style,

    // -- Mobile --
    pub mobile_backdrop: Style,
    pub mobile_panel: Style,
    pub bottom_bar: Style,
    pub bottom_item_active: Style,
    pub badge_upgrade: Style,
    pub badge_subscribed: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub placeholder: Style,
    pub error: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            nav_bar: Style::default().bg(Color::Black),
            brand_primary: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            brand_secondary: Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            nav_link: Style::default().fg(Color::Gray),
            nav_link_active: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            category_tab: Style::default().fg(Color::White),
            category_tab_hovered: Style::default().bg(Color::DarkGray).fg(Color::LightBlue),

            dropdown_border: Style::default().fg(Color::Cyan),
            dropdown_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            dropdown_item: Style::default(),
            dropdown_letter: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            dropdown_view_all: Style::default().fg(Color::LightBlue),
            avatar: Style::default().bg(Color::Blue).fg(Color::White),
            menu_danger: Style::default().fg(Color::Red),

            mobile_backdrop: Style::default().bg(Color::Black).fg(Color::DarkGray),
            mobile_panel: Style::default().bg(Color::Black).fg(Color::White),
            bottom_bar: Style::default().bg(Color::Black).fg(Color::Gray),
            bottom_item_active: Style::default().bg(Color::DarkGray).fg(Color::LightBlue),
            badge_upgrade: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            badge_subscribed: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            placeholder: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
        }
    }

    fn light() -> Self {
        Self {
            nav_bar: Style::default().bg(Color::White).fg(Color::Black),
            brand_primary: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            brand_secondary: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            nav_link: Style::default().fg(Color::DarkGray),
            nav_link_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            category_tab: Style::default().fg(Color::Black),
            category_tab_hovered: Style::default().bg(Color::Blue).fg(Color::White),

            dropdown_border: Style::default().fg(Color::Blue),
            dropdown_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            dropdown_item: Style::default().fg(Color::Black),
            dropdown_letter: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            dropdown_view_all: Style::default().fg(Color::Blue),
            avatar: Style::default().bg(Color::Blue).fg(Color::White),
            menu_danger: Style::default().fg(Color::Red),

            mobile_backdrop: Style::default().bg(Color::Gray).fg(Color::DarkGray),
            mobile_panel: Style::default().bg(Color::White).fg(Color::Black),
            bottom_bar: Style::default().bg(Color::White).fg(Color::DarkGray),
            bottom_item_active: Style::default().bg(Color::Blue).fg(Color::White),
            badge_upgrade: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            badge_subscribed: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            placeholder: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
        }
    }
}
