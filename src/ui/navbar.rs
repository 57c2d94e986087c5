//! Desktop navigation bar and the popups hanging off it: category dropdown,
//! search panel and user menu.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear},
    Frame,
};

use studynav::nav::{routes, CategoriesState, OpenDropdown};
use studynav::taxonomy::Subcategory;
use studynav::util::truncate_to_width;

use crate::app::{App, HitMap, Target};

use super::helpers::{line, popup_rect, row, row_width, RowCursor};

/// Bar content row plus its bottom rule.
pub(super) const BAR_HEIGHT: u16 = 2;

const TAB_MAX_WIDTH: usize = 20;
const DROPDOWN_WIDTH: u16 = 48;
const SEARCH_WIDTH: u16 = 40;
const USER_MENU_WIDTH: u16 = 30;

pub(super) const BRAND: (&str, &str) = ("study", "nav");
pub(super) const SEARCH_PLACEHOLDER: &str = "Search for notes, topics...";
pub(super) const SEARCH_HINT: &str = "Try searching for topics, subjects, or chapters";

const DESKTOP_LINKS: [(&str, &str); 3] = [
    ("Home", routes::HOME),
    ("Blog", routes::BLOG),
    ("Quiz", routes::QUIZ),
];

/// Where the interactive parts of the bar were drawn this frame.
#[derive(Debug, Default)]
pub(super) struct BarLayout {
    pub hovered_tab: Option<Rect>,
    pub search: Option<Rect>,
    pub avatar: Option<Rect>,
}

pub(super) fn render_bar(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) -> BarLayout {
    let p = &app.palette;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(p.placeholder)
        .style(p.nav_bar);
    let content = block.inner(area);
    f.render_widget(block, area);

    let mut layout = BarLayout::default();

    // Right cluster first so the tabs know how much room is left.
    let mut right: Vec<(String, Style, Target)> =
        vec![(" / ".to_string(), p.nav_link, Target::SearchToggle)];
    if app.surface.is_authenticated() {
        right.push((
            format!(" ({}) v ", app.surface.avatar_initial()),
            p.avatar,
            Target::UserMenuToggle,
        ));
    } else {
        right.push((" Login ".to_string(), p.nav_link, Target::Link(routes::LOGIN)));
        right.push((" Register ".to_string(), p.avatar, Target::Link(routes::REGISTER)));
    }

    let right_width = row_width(right.iter().map(|(label, _, _)| label.as_str()));
    let right_x = content.right().saturating_sub(right_width).max(content.x);
    let mut cursor = RowCursor::new(Rect {
        x: right_x,
        width: content.right() - right_x,
        ..content
    });
    for (label, style, target) in right {
        let Some(rect) = cursor.place(f, &label, style) else {
            break;
        };
        match target {
            Target::SearchToggle => layout.search = Some(rect),
            Target::UserMenuToggle => layout.avatar = Some(rect),
            _ => {}
        }
        hits.push(rect, target);
    }

    let mut cursor = RowCursor::new(Rect {
        width: right_x.saturating_sub(content.x).saturating_sub(1),
        ..content
    });

    if let Some(rect) = cursor.place(f, &format!(" {}", BRAND.0), p.brand_primary) {
        hits.push(rect, Target::Link(routes::HOME));
    }
    if let Some(rect) = cursor.place(f, BRAND.1, p.brand_secondary) {
        hits.push(rect, Target::Link(routes::HOME));
    }
    cursor.skip(2);

    let hovered = app.surface.ui_state().hovered_category.as_deref();
    match app.surface.categories_state() {
        CategoriesState::Loading => {
            cursor.place(f, "Loading... ", p.placeholder);
        }
        CategoriesState::Failed(_) => {}
        CategoriesState::Loaded => {
            for category in app.surface.categories() {
                let label = format!(" {} v ", truncate_to_width(&category.name, TAB_MAX_WIDTH));
                let is_hovered = hovered == Some(category.id.as_str());
                let style = if is_hovered {
                    p.category_tab_hovered
                } else {
                    p.category_tab
                };
                let Some(rect) = cursor.place(f, &label, style) else {
                    break;
                };
                if is_hovered {
                    layout.hovered_tab = Some(rect);
                }
                hits.push(rect, Target::CategoryTab(category.id.clone()));
            }
        }
    }

    cursor.skip(1);
    for (label, path) in DESKTOP_LINKS {
        let style = if app.surface.is_active(path) {
            p.nav_link_active
        } else {
            p.nav_link
        };
        let Some(rect) = cursor.place(f, &format!(" {} ", label), style) else {
            break;
        };
        hits.push(rect, Target::Link(path));
    }

    layout
}

// ============================================================================
// Category dropdown
// ============================================================================

enum DropLine<'a> {
    /// Up to two featured entries side by side.
    Featured(&'a [Subcategory]),
    Caption(String),
    Letter(&'a str),
    Item(&'a Subcategory),
    Empty,
}

fn dropdown_lines<'a>(dropdown: &'a OpenDropdown<'_>) -> Vec<DropLine<'a>> {
    let sections = &dropdown.sections;
    let mut lines: Vec<DropLine<'a>> = sections.featured.chunks(2).map(DropLine::Featured).collect();
    if lines.is_empty() {
        lines.push(DropLine::Empty);
    }

    if let Some(grouped) = &sections.grouped {
        lines.push(DropLine::Caption(format!(
            "All {} Categories",
            dropdown.category.name
        )));
        for (letter, items) in grouped {
            lines.push(DropLine::Letter(letter));
            lines.extend(items.iter().map(|sub| DropLine::Item(*sub)));
        }
    }
    lines
}

/// Draws the hovered category's dropdown under its tab. Returns the area it
/// covers, or `None` when nothing is open or there is no room.
pub(super) fn render_dropdown(
    f: &mut Frame,
    app: &App,
    tab: Rect,
    bounds: Rect,
    hits: &mut HitMap,
) -> Option<Rect> {
    let dropdown = app.surface.open_dropdown()?;
    let p = &app.palette;
    let selected = app
        .hovered_subcategories()
        .and_then(|subs| subs.get(app.dropdown_cursor))
        .map(|sub| sub.id.as_str());
    let item_style = |sub: &Subcategory| {
        if Some(sub.id.as_str()) == selected {
            p.category_tab_hovered
        } else {
            p.dropdown_item
        }
    };

    let lines = dropdown_lines(&dropdown);
    // Body lines, the view-all row and the border.
    let wanted = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(3);
    let rect = popup_rect(tab.x, DROPDOWN_WIDTH, wanted, bounds);
    if rect.height < 4 || rect.width < 12 {
        return None;
    }

    let title = format!(
        " Browse {} Materials ",
        truncate_to_width(&dropdown.category.name, usize::from(rect.width).saturating_sub(20))
    );
    let block = Block::bordered()
        .border_style(p.dropdown_border)
        .title(title)
        .title_style(p.dropdown_heading);
    let inner = block.inner(rect);
    f.render_widget(Clear, rect);
    f.render_widget(block, rect);

    let body_rows = inner.height.saturating_sub(1);
    let text_width = usize::from(inner.width);
    for (offset, entry) in (0..body_rows).zip(lines.iter()) {
        let Some(area) = row(inner, offset) else {
            break;
        };
        match entry {
            DropLine::Featured(pair) => {
                let half = area.width / 2;
                for (i, sub) in pair.iter().enumerate() {
                    let cell = Rect {
                        x: area.x + half * i as u16,
                        width: if i == 0 { half } else { area.width - half },
                        ..area
                    };
                    let label = format!(" > {}", sub.name);
                    line(
                        f,
                        cell,
                        truncate_to_width(&label, usize::from(cell.width)),
                        item_style(sub),
                    );
                    hits.push(cell, Target::Subcategory(sub.id.clone()));
                }
            }
            DropLine::Caption(text) => {
                line(f, area, truncate_to_width(text, text_width), p.placeholder);
            }
            DropLine::Letter(letter) => {
                line(f, area, format!(" {}", letter), p.dropdown_letter);
            }
            DropLine::Item(sub) => {
                let label = format!("   - {}", sub.name);
                line(f, area, truncate_to_width(&label, text_width), item_style(sub));
                hits.push(area, Target::Subcategory(sub.id.clone()));
            }
            DropLine::Empty => {
                line(f, area, " No materials yet", p.placeholder);
            }
        }
    }

    if let Some(area) = row(inner, inner.height.saturating_sub(1)) {
        let label = format!(" View all {} materials ->", dropdown.category.name);
        line(
            f,
            area,
            truncate_to_width(&label, text_width),
            p.dropdown_view_all.add_modifier(Modifier::BOLD),
        );
        hits.push(area, Target::ViewAll(dropdown.category.id.clone()));
    }

    Some(rect)
}

// ============================================================================
// Search panel
// ============================================================================

/// Search box under the search toggle. Queries are not executed.
pub(super) fn render_search(f: &mut Frame, app: &App, anchor: Rect, bounds: Rect) -> Option<Rect> {
    let p = &app.palette;
    let x = anchor.right().saturating_sub(SEARCH_WIDTH);
    let rect = popup_rect(x, SEARCH_WIDTH, 4, bounds);
    if rect.height < 3 {
        return None;
    }

    let block = Block::bordered().border_style(p.dropdown_border).title(" Search ");
    let inner = block.inner(rect);
    f.render_widget(Clear, rect);
    f.render_widget(block, rect);

    let width = usize::from(inner.width);
    if let Some(area) = row(inner, 0) {
        line(f, area, truncate_to_width(SEARCH_PLACEHOLDER, width), p.placeholder);
    }
    if let Some(area) = row(inner, 1) {
        line(f, area, truncate_to_width(SEARCH_HINT, width), p.placeholder);
    }
    Some(rect)
}

// ============================================================================
// User menu
// ============================================================================

const ACCOUNT_LINKS: [(&str, &str); 2] = [
    ("Subscription Status", routes::SUBSCRIPTION_STATUS),
    ("Content Access Test", routes::CONTENT_ACCESS_TEST),
];

pub(super) fn render_user_menu(
    f: &mut Frame,
    app: &App,
    avatar: Rect,
    bounds: Rect,
    hits: &mut HitMap,
) -> Option<Rect> {
    let user = app.surface.current_user()?;
    let p = &app.palette;
    let x = avatar.right().saturating_sub(USER_MENU_WIDTH);
    let rect = popup_rect(x, USER_MENU_WIDTH, 7, bounds);
    if rect.height < 3 {
        return None;
    }

    let block = Block::bordered().border_style(p.dropdown_border);
    let inner = block.inner(rect);
    f.render_widget(Clear, rect);
    f.render_widget(block, rect);

    let width = usize::from(inner.width);
    let mut offset = 0;
    let mut next_row = || {
        let area = row(inner, offset);
        offset += 1;
        area
    };

    if let Some(area) = next_row() {
        line(
            f,
            area,
            truncate_to_width(&format!(" {}", user.name), width),
            p.dropdown_heading,
        );
    }
    if let Some(area) = next_row() {
        line(f, area, truncate_to_width(&format!(" {}", user.email), width), p.placeholder);
    }
    for (label, path) in ACCOUNT_LINKS {
        if let Some(area) = next_row() {
            line(f, area, format!(" {}", label), p.dropdown_item);
            hits.push(area, Target::AccountLink(path));
        }
    }
    if let Some(area) = next_row() {
        line(f, area, " Logout", p.menu_danger);
        hits.push(area, Target::Logout);
    }

    Some(rect)
}
