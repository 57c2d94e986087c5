//! Frame rendering.
//!
//! Besides drawing, every frame publishes a fresh [`HitMap`]: the region
//! boundaries the outside-click listeners test against and the click
//! targets mouse input dispatches to. Geometry from the previous frame is
//! replaced wholesale.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use studynav::nav::{routes, Navigator, RegionId};

use crate::app::{App, HitMap, LayoutMode};

use super::helpers::popup_rect;
use super::{mobile, navbar, status};

pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Recent routes listed on the page panel.
const HISTORY_SHOWN: usize = 5;

pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let mut hits = HitMap::default();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        app.hits = hits;
        return;
    }

    app.layout_mode = app.layout_for_width(area.width);
    match app.layout_mode {
        LayoutMode::Desktop => render_desktop(f, app, area, &mut hits),
        LayoutMode::Mobile => render_mobile(f, app, area, &mut hits),
    }
    app.hits = hits;
}

fn render_desktop(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let [bar, body, status_area] = Layout::vertical([
        Constraint::Length(navbar::BAR_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let layout = navbar::render_bar(f, app, bar, hits);
    render_page(f, app, body);
    status::render(f, app, status_area);

    let mut primary = vec![bar];
    if let Some(tab) = layout.hovered_tab {
        // Tab down to the bar's bottom rule, so moving onto the dropdown
        // never crosses a gap.
        hits.hover_zone.push(Rect {
            height: bar.bottom() - tab.y,
            ..tab
        });
        if let Some(dropdown) = navbar::render_dropdown(f, app, tab, body, hits) {
            hits.hover_zone.push(dropdown);
            primary.push(dropdown);
        }
    }
    if app.surface.ui_state().search_open {
        if let Some(panel) = layout
            .search
            .and_then(|anchor| navbar::render_search(f, app, anchor, body))
        {
            primary.push(panel);
        }
    }
    hits.regions.set(RegionId::Primary, primary);

    // Signed out there is no account control and no account region.
    if let Some(avatar) = layout.avatar {
        let mut account = vec![avatar];
        if app.surface.ui_state().user_menu_open {
            account.extend(navbar::render_user_menu(f, app, avatar, body, hits));
        }
        hits.regions.set(RegionId::Account, account);
    }
}

fn render_mobile(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let [bar, body, bottom, status_area] = Layout::vertical([
        Constraint::Length(navbar::BAR_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(mobile::BOTTOM_BAR_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(area);

    let search_anchor = mobile::render_top_bar(f, app, bar, hits);
    render_page(f, app, body);
    mobile::render_bottom_bar(f, app, bottom, hits);
    status::render(f, app, status_area);

    let mut primary = vec![bar];
    if app.surface.ui_state().search_open {
        if let Some(panel) =
            search_anchor.and_then(|anchor| navbar::render_search(f, app, anchor, body))
        {
            primary.push(panel);
        }
    }
    if app.surface.ui_state().mobile_menu_open {
        let overlay = Rect {
            height: area.height - 1,
            ..area
        };
        primary.push(mobile::render_menu(f, app, overlay, hits));
    }
    hits.regions.set(RegionId::Primary, primary);
}

/// Placeholder for the routed page: where navigation has led so far.
fn render_page(f: &mut Frame, app: &App, area: Rect) {
    let p = &app.palette;
    let router = app.surface.navigator();
    let current = router.current_path();

    let block = Block::bordered()
        .border_style(p.placeholder)
        .title(format!(" {} ", page_title(current)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::styled(format!("Route: {}", current), p.dropdown_heading),
        Line::raw(""),
    ];
    let history = router.navigations();
    if !history.is_empty() {
        lines.push(Line::styled("Recent:", p.placeholder));
        lines.extend(
            history
                .iter()
                .rev()
                .take(HISTORY_SHOWN)
                .map(|path| Line::raw(format!("  {}", path))),
        );
    }

    let text_area = popup_rect(inner.x + 1, inner.width.saturating_sub(2), inner.height, inner);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), text_area);
}

fn page_title(path: &str) -> String {
    match path {
        routes::HOME => "Home".to_string(),
        routes::BLOG => "Blog".to_string(),
        routes::QUIZ => "Quiz".to_string(),
        routes::LOGIN => "Login".to_string(),
        routes::REGISTER => "Register".to_string(),
        routes::SUBSCRIPTION_STATUS => "Subscription Status".to_string(),
        routes::CONTENT_ACCESS_TEST => "Content Access Test".to_string(),
        other => match other.strip_prefix("/study-materials/") {
            Some(id) => format!("Study Materials ({})", id),
            None => other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, layout::Position, Terminal};
    use std::time::Duration;
    use studynav::config::Config;
    use studynav::nav::NavEvent;
    use studynav::taxonomy::{Category, TaxonomyClient};
    use tokio::sync::mpsc;

    use crate::app::Target;

    fn app(width_breakpoint: u16) -> (App, mpsc::Sender<NavEvent>) {
        let client = TaxonomyClient::new(
            reqwest::Client::new(),
            "http://localhost:3300",
            Duration::from_secs(1),
        )
        .unwrap();
        let (tx, _rx) = mpsc::channel(8);
        let config = Config {
            mobile_breakpoint_columns: width_breakpoint,
            user_name: Some("Mira".to_string()),
            user_email: Some("mira@example.com".to_string()),
            ..Config::default()
        };
        let mut app = App::new(&config, client, tx.clone());
        app.surface.mount();
        app.surface.handle_event(NavEvent::CategoriesLoaded {
            generation: 1,
            result: Ok(vec![
                Category {
                    id: "phy".into(),
                    name: "Physics".into(),
                },
                Category {
                    id: "chem".into(),
                    name: "Chemistry".into(),
                },
            ]),
        });
        (app, tx)
    }

    fn draw(app: &mut App, width: u16, height: u16) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
    }

    fn find(app: &App, wanted: &Target) -> Option<Rect> {
        app.hits
            .targets
            .iter()
            .find(|(_, t)| t == wanted)
            .map(|(r, _)| *r)
    }

    #[tokio::test]
    async fn test_desktop_publishes_tabs_and_regions() {
        let (mut app, _tx) = app(100);
        draw(&mut app, 120, 30);

        assert_eq!(app.layout_mode, LayoutMode::Desktop);
        let tab = find(&app, &Target::CategoryTab("phy".into())).expect("tab");
        assert_eq!(tab.y, 0);
        assert!(find(&app, &Target::UserMenuToggle).is_some());
        assert_eq!(
            app.hits.regions.contains(RegionId::Primary, Position::new(1, 0)),
            Some(true)
        );
        assert!(app.hits.regions.get(RegionId::Account).is_some());
    }

    #[tokio::test]
    async fn test_user_menu_extends_account_region() {
        let (mut app, _tx) = app(100);
        app.surface.toggle_user_menu();
        draw(&mut app, 120, 30);

        let logout = find(&app, &Target::Logout).expect("logout row");
        assert_eq!(
            app.hits
                .regions
                .contains(RegionId::Account, Position::new(logout.x, logout.y)),
            Some(true)
        );
    }

    #[tokio::test]
    async fn test_mobile_layout_has_no_account_region() {
        let (mut app, _tx) = app(100);
        draw(&mut app, 80, 30);

        assert_eq!(app.layout_mode, LayoutMode::Mobile);
        assert!(app.hits.regions.get(RegionId::Account).is_none());
        assert!(find(&app, &Target::MobileToggle).is_some());
        assert!(find(&app, &Target::Link(routes::SUBSCRIPTION_STATUS)).is_some());
    }

    #[tokio::test]
    async fn test_mobile_menu_panel_sits_above_backdrop() {
        let (mut app, _tx) = app(100);
        app.surface.toggle_mobile_menu();
        draw(&mut app, 80, 30);

        assert_eq!(
            app.hits.target_at(Position::new(5, 15)),
            Some(&Target::MobilePanel)
        );
        assert_eq!(
            app.hits.target_at(Position::new(70, 15)),
            Some(&Target::MobileBackdrop)
        );
        assert!(find(&app, &Target::MobileCategory("chem".into())).is_some());
    }

    #[tokio::test]
    async fn test_too_small_clears_hit_map() {
        let (mut app, _tx) = app(100);
        draw(&mut app, 120, 30);
        draw(&mut app, 30, 5);
        assert!(app.hits.targets.is_empty());
    }

    #[test]
    fn test_page_titles() {
        assert_eq!(page_title("/"), "Home");
        assert_eq!(page_title("/study-materials/s1"), "Study Materials (s1)");
        assert_eq!(page_title("/elsewhere"), "/elsewhere");
    }
}
