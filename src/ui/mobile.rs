//! Narrow-terminal layout: hamburger bar, slide-in menu and bottom bar.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Borders, Clear},
    Frame,
};

use studynav::nav::{routes, SubscriptionBadge};
use studynav::util::truncate_to_width;

use crate::app::{App, HitMap, Target};

use super::helpers::{line, row, row_width, RowCursor};
use super::navbar::BRAND;

pub(super) const BOTTOM_BAR_HEIGHT: u16 = 2;
const PANEL_WIDTH: u16 = 34;

const BOTTOM_LINKS: [(&str, &str); 3] = [
    ("Home", routes::HOME),
    ("Quiz", routes::QUIZ),
    ("Blogs", routes::BLOG),
];

const MENU_BUTTONS: [(&str, &str); 2] = [("Blog", routes::BLOG), ("Quiz", routes::QUIZ)];

/// Top bar: menu toggle, brand and search toggle. Returns the search
/// toggle's position.
pub(super) fn render_top_bar(
    f: &mut Frame,
    app: &App,
    area: Rect,
    hits: &mut HitMap,
) -> Option<Rect> {
    let p = &app.palette;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(p.placeholder)
        .style(p.nav_bar);
    let content = block.inner(area);
    f.render_widget(block, area);

    let toggle = if app.surface.ui_state().mobile_menu_open {
        " [x] "
    } else {
        " [=] "
    };
    let mut cursor = RowCursor::new(content);
    if let Some(rect) = cursor.place(f, toggle, p.nav_link) {
        hits.push(rect, Target::MobileToggle);
    }
    if let Some(rect) = cursor.place(f, BRAND.0, p.brand_primary) {
        hits.push(rect, Target::Link(routes::HOME));
    }
    if let Some(rect) = cursor.place(f, BRAND.1, p.brand_secondary) {
        hits.push(rect, Target::Link(routes::HOME));
    }

    let search_label = " / ";
    let x = content.right().saturating_sub(row_width([search_label]));
    let mut cursor = RowCursor::new(Rect {
        x,
        width: content.right() - x,
        ..content
    });
    let search = cursor.place(f, search_label, p.nav_link);
    if let Some(rect) = search {
        hits.push(rect, Target::SearchToggle);
    }
    search
}

/// Fixed bottom navigation with the subscription badge in the last slot.
pub(super) fn render_bottom_bar(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let p = &app.palette;
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(p.placeholder)
        .style(p.bottom_bar);
    let content = block.inner(area);
    f.render_widget(block, area);

    let slots = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(content);
    for ((label, path), slot) in BOTTOM_LINKS.into_iter().zip(slots.iter()) {
        let style = if app.surface.is_active(path) {
            p.bottom_item_active
        } else {
            p.bottom_bar
        };
        line(f, *slot, centered(label, slot.width), style);
        hits.push(*slot, Target::Link(path));
    }

    let badge = app.surface.subscription_badge();
    let style = match badge {
        SubscriptionBadge::Upgrade => p.badge_upgrade,
        SubscriptionBadge::Subscribed => p.badge_subscribed,
    };
    line(f, slots[3], centered(badge.label(), slots[3].width), style);
    hits.push(slots[3], Target::Link(routes::SUBSCRIPTION_STATUS));
}

/// Full-screen overlay: dimmed backdrop plus the menu panel on the left.
/// Returns the overlay's area.
pub(super) fn render_menu(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) -> Rect {
    let p = &app.palette;

    f.render_widget(Clear, area);
    f.render_widget(Block::default().style(p.mobile_backdrop), area);
    hits.push(area, Target::MobileBackdrop);

    let panel = Rect {
        width: PANEL_WIDTH.min(area.width),
        ..area
    };
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(p.dropdown_border)
        .style(p.mobile_panel);
    let inner = block.inner(panel);
    f.render_widget(block, panel);
    hits.push(panel, Target::MobilePanel);

    let width = usize::from(inner.width);
    let mut offset = 0;
    let mut next_row = || {
        let area = row(inner, offset);
        offset += 1;
        area
    };

    if let Some(header) = next_row() {
        let mut cursor = RowCursor::new(header);
        cursor.place(f, " ", p.mobile_panel);
        cursor.place(f, BRAND.0, p.brand_primary);
        cursor.place(f, BRAND.1, p.brand_secondary);
        let close = Rect {
            x: header.right().saturating_sub(4),
            width: 4.min(header.width),
            ..header
        };
        line(f, close, "[x]", p.nav_link);
        hits.push(close, Target::MobileToggle);
    }
    next_row();

    for (label, path) in MENU_BUTTONS {
        if let Some(area) = next_row() {
            line(f, area, format!(" [ {} ]", label), p.dropdown_view_all);
            hits.push(area, Target::MobileLink(path));
        }
    }
    next_row();

    if let Some(area) = next_row() {
        line(f, area, " STUDY CATEGORIES", p.dropdown_heading);
    }
    for category in app.surface.categories() {
        let Some(area) = next_row() else {
            break;
        };
        let label = format!("   {}", category.name);
        line(f, area, truncate_to_width(&label, width), p.dropdown_item);
        hits.push(area, Target::MobileCategory(category.id.clone()));
    }
    next_row();

    match app.surface.current_user() {
        Some(user) => {
            if let Some(area) = next_row() {
                let name = format!(" {}", user.name);
                line(f, area, truncate_to_width(&name, width), p.dropdown_heading);
            }
            if let Some(area) = next_row() {
                let email = format!(" {}", user.email);
                line(f, area, truncate_to_width(&email, width), p.placeholder);
            }
            if let Some(area) = next_row() {
                line(f, area, " Logout", p.menu_danger);
                hits.push(area, Target::Logout);
            }
        }
        None => {
            if let Some(area) = next_row() {
                line(f, area, " Login", p.nav_link);
                hits.push(area, Target::Link(routes::LOGIN));
            }
            if let Some(area) = next_row() {
                line(f, area, " Register", p.nav_link);
                hits.push(area, Target::Link(routes::REGISTER));
            }
        }
    }

    area
}

fn centered(label: &str, width: u16) -> String {
    let pad = usize::from(width).saturating_sub(label.len()) / 2;
    format!("{}{}", " ".repeat(pad), label)
}
