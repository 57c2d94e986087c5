//! Keyboard and mouse handling.
//!
//! Mouse input follows the browser model the navigation surface expects:
//! a left-button press is first offered to the outside-click listeners as a
//! global pointer-down, then dispatched to whatever was drawn under it.
//! Pointer motion drives category hover on the desktop layout only.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use studynav::nav::routes;

use crate::app::{App, LayoutMode, Target};

use super::loop_runner::Action;

/// A point no region can contain; used for keyboard dismissal.
const NOWHERE: Position = Position {
    x: u16::MAX,
    y: u16::MAX,
};

pub(super) fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Action::Quit
        }

        KeyCode::Char('/') => app.surface.toggle_search(),
        KeyCode::Char('m') => app.surface.toggle_mobile_menu(),
        KeyCode::Char('u') => {
            if app.surface.is_authenticated() {
                app.surface.toggle_user_menu();
            } else {
                app.set_status("Not signed in: [L]ogin or [R]egister");
            }
        }

        KeyCode::Left => app.focus_adjacent_category(-1),
        KeyCode::Right => app.focus_adjacent_category(1),
        KeyCode::Down => app.move_dropdown_cursor(1),
        KeyCode::Up => app.move_dropdown_cursor(-1),
        KeyCode::Enter => app.select_at_cursor(),
        KeyCode::Char('a') => {
            if let Some(id) = app.surface.ui_state().hovered_category.clone() {
                app.surface.view_all(&id);
            }
        }

        KeyCode::Esc => {
            if app.surface.ui_state().mobile_menu_open {
                app.surface.tap_mobile_backdrop();
            } else {
                app.surface.pointer_down(NOWHERE, &app.hits.regions);
            }
        }

        KeyCode::Char('h') => app.surface.follow_link(routes::HOME),
        KeyCode::Char('b') => app.surface.follow_link(routes::BLOG),
        KeyCode::Char('z') => app.surface.follow_link(routes::QUIZ),
        KeyCode::Char('L') if !app.surface.is_authenticated() => {
            app.surface.follow_link(routes::LOGIN)
        }
        KeyCode::Char('R') if !app.surface.is_authenticated() => {
            app.surface.follow_link(routes::REGISTER)
        }

        KeyCode::Char('l') => app.toggle_content_lock(),
        KeyCode::Char('o') => {
            if app.surface.is_authenticated() {
                app.surface.logout();
                app.set_status("Signed out");
            }
        }
        _ => {}
    }
    Action::Continue
}

pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let point = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.surface.pointer_down(point, &app.hits.regions);
            if let Some(target) = app.hits.target_at(point).cloned() {
                click(app, target);
            }
            app.needs_redraw = true;
        }
        MouseEventKind::Moved if app.layout_mode == LayoutMode::Desktop => {
            if hover_at(app, point) {
                app.needs_redraw = true;
            }
        }
        _ => {}
    }
}

/// Returns true when hover state changed.
fn hover_at(app: &mut App, point: Position) -> bool {
    let hovered = app.surface.ui_state().hovered_category.clone();

    if let Some(Target::CategoryTab(id)) = app.hits.target_at(point) {
        if hovered.as_deref() == Some(id.as_str()) {
            return false;
        }
        let id = id.clone();
        app.hover(&id);
        return true;
    }

    if hovered.is_some() && !app.hits.in_hover_zone(point) {
        app.surface.leave_category();
        return true;
    }
    false
}

fn click(app: &mut App, target: Target) {
    tracing::trace!(?target, "Click");
    match target {
        Target::CategoryTab(id) => app.hover(&id),
        Target::Subcategory(id) => app.select_subcategory(&id),
        Target::ViewAll(id) | Target::MobileCategory(id) => app.surface.view_all(&id),
        Target::Link(path) => app.surface.follow_link(path),
        Target::SearchToggle => app.surface.toggle_search(),
        Target::UserMenuToggle => app.surface.toggle_user_menu(),
        Target::AccountLink(path) => app.surface.follow_account_link(path),
        Target::Logout => {
            app.surface.logout();
            app.set_status("Signed out");
        }
        Target::MobileToggle => app.surface.toggle_mobile_menu(),
        Target::MobileLink(path) => app.surface.follow_mobile_link(path),
        Target::MobilePanel => {}
        Target::MobileBackdrop => app.surface.tap_mobile_backdrop(),
    }
}
