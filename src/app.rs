use anyhow::Result;
use ratatui::layout::{Position, Rect};
use reqwest::redirect::Policy;
use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use studynav::config::Config;
use studynav::nav::{
    InMemoryRouter, LocalSession, Lookup, NavEvent, NavigationSurface, RegionMap, User,
};
use studynav::taxonomy::{Subcategory, TaxonomyClient};
use studynav::theme::{ColorPalette, ThemeVariant};

pub type Surface = NavigationSurface<LocalSession, Arc<AtomicBool>, InMemoryRouter>;

/// How long a status message stays on screen.
const STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// Redirect policy: at most 3 hops, loops rejected.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev.as_str() == url.as_str()) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );
        attempt.follow()
    })
}

pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .redirect(create_redirect_policy())
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(30))
        .connect_timeout(timeout)
        .build()?)
}

// ============================================================================
// Layout and hit testing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Desktop,
    Mobile,
}

/// What a click on a rendered element does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    CategoryTab(String),
    Subcategory(String),
    ViewAll(String),
    Link(&'static str),
    SearchToggle,
    UserMenuToggle,
    AccountLink(&'static str),
    Logout,
    MobileToggle,
    MobileLink(&'static str),
    MobileCategory(String),
    /// Menu panel body; swallows the click so the backdrop never sees it.
    MobilePanel,
    MobileBackdrop,
}

/// Geometry published by the last frame, consumed by mouse handling.
#[derive(Debug, Default)]
pub struct HitMap {
    /// Region boundaries for outside-click dismissal.
    pub regions: RegionMap<Vec<Rect>>,
    /// Click targets in draw order; later entries sit on top.
    pub targets: Vec<(Rect, Target)>,
    /// Tab plus dropdown of the hovered category. Leaving it ends the hover.
    pub hover_zone: Vec<Rect>,
}

impl HitMap {
    pub fn push(&mut self, area: Rect, target: Target) {
        if area.width > 0 && area.height > 0 {
            self.targets.push((area, target));
        }
    }

    /// Topmost target under `point`.
    pub fn target_at(&self, point: Position) -> Option<&Target> {
        self.targets
            .iter()
            .rev()
            .find(|(area, _)| area.contains(point))
            .map(|(_, target)| target)
    }

    pub fn in_hover_zone(&self, point: Position) -> bool {
        self.hover_zone.iter().any(|r| r.contains(point))
    }
}

// ============================================================================
// Application state
// ============================================================================

pub struct App {
    pub surface: Surface,
    /// Shared with the surface; `l` flips it to demo the badge.
    pub content_locked: Arc<AtomicBool>,
    pub palette: ColorPalette,
    pub mobile_breakpoint: u16,
    pub layout_mode: LayoutMode,
    pub hits: HitMap,
    /// Keyboard cursor inside the open dropdown.
    pub dropdown_cursor: usize,
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(config: &Config, client: TaxonomyClient, event_tx: mpsc::Sender<NavEvent>) -> Self {
        let session = match &config.user_name {
            Some(name) => LocalSession::signed_in(User {
                name: name.clone(),
                email: config.user_email.clone().unwrap_or_default(),
            }),
            None => LocalSession::anonymous(),
        };
        let content_locked = Arc::new(AtomicBool::new(config.content_locked));

        let variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, falling back to dark");
            ThemeVariant::Dark
        });

        let surface = NavigationSurface::new(
            client,
            event_tx,
            session,
            Arc::clone(&content_locked),
            InMemoryRouter::default(),
        );

        Self {
            surface,
            content_locked,
            palette: variant.palette(),
            mobile_breakpoint: config.mobile_breakpoint_columns,
            layout_mode: LayoutMode::Desktop,
            hits: HitMap::default(),
            dropdown_cursor: 0,
            status_message: None,
            needs_redraw: true,
        }
    }

    pub fn layout_for_width(&self, width: u16) -> LayoutMode {
        if width < self.mobile_breakpoint {
            LayoutMode::Mobile
        } else {
            LayoutMode::Desktop
        }
    }

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    pub fn toggle_content_lock(&mut self) {
        let locked = !self.content_locked.load(Ordering::Acquire);
        self.content_locked.store(locked, Ordering::Release);
        tracing::info!(locked, "Content entitlement toggled");
        self.set_status(if locked {
            "Content locked"
        } else {
            "Content unlocked"
        });
    }

    /// Hover the category `delta` steps away from the current one, wrapping.
    pub fn focus_adjacent_category(&mut self, delta: isize) {
        let categories = self.surface.categories();
        if categories.is_empty() {
            return;
        }
        let len = categories.len() as isize;
        let current = self
            .surface
            .ui_state()
            .hovered_category
            .as_deref()
            .and_then(|id| categories.iter().position(|c| c.id == id));
        let next = match current {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta >= 0 => 0,
            None => len - 1,
        } as usize;

        let id = categories[next].id.clone();
        self.hover(&id);
    }

    /// Hover through the surface, resetting the dropdown cursor when the
    /// category changes.
    pub fn hover(&mut self, category_id: &str) {
        if self.surface.ui_state().hovered_category.as_deref() != Some(category_id) {
            self.dropdown_cursor = 0;
        }
        self.surface.hover_category(category_id);
    }

    /// Subcategories of the hovered category, when cached.
    pub fn hovered_subcategories(&self) -> Option<&[Subcategory]> {
        let id = self.surface.ui_state().hovered_category.as_deref()?;
        match self.surface.cache().get(id) {
            Lookup::Present(subs) => Some(subs),
            Lookup::Absent | Lookup::Pending => None,
        }
    }

    pub fn move_dropdown_cursor(&mut self, delta: isize) {
        let Some(len) = self.hovered_subcategories().map(<[Subcategory]>::len) else {
            return;
        };
        if len == 0 {
            return;
        }
        self.dropdown_cursor = (self.dropdown_cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    pub fn select_at_cursor(&mut self) {
        let id = self
            .hovered_subcategories()
            .and_then(|subs| subs.get(self.dropdown_cursor))
            .map(|sub| sub.id.clone());
        if let Some(id) = id {
            self.select_subcategory(&id);
        }
    }

    pub fn select_subcategory(&mut self, subcategory_id: &str) {
        self.surface.select_subcategory(subcategory_id);
        self.dropdown_cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let client = TaxonomyClient::new(
            reqwest::Client::new(),
            "http://localhost:3300",
            Duration::from_secs(1),
        )
        .unwrap();
        let (tx, _rx) = mpsc::channel(4);
        App::new(&Config::default(), client, tx)
    }

    #[tokio::test]
    async fn test_layout_switches_at_breakpoint() {
        let app = app();
        assert_eq!(app.layout_for_width(99), LayoutMode::Mobile);
        assert_eq!(app.layout_for_width(100), LayoutMode::Desktop);
    }

    #[tokio::test]
    async fn test_toggle_lock_flips_badge() {
        let mut app = app();
        let before = app.surface.subscription_badge();
        app.toggle_content_lock();
        assert_ne!(app.surface.subscription_badge(), before);
    }

    #[test]
    fn test_topmost_target_wins() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 50, 20), Target::MobileBackdrop);
        hits.push(Rect::new(0, 0, 30, 20), Target::MobilePanel);
        hits.push(Rect::new(2, 3, 10, 1), Target::MobileLink("/quiz"));

        assert_eq!(hits.target_at(Position::new(4, 3)), Some(&Target::MobileLink("/quiz")));
        assert_eq!(hits.target_at(Position::new(4, 10)), Some(&Target::MobilePanel));
        assert_eq!(hits.target_at(Position::new(40, 10)), Some(&Target::MobileBackdrop));
        assert_eq!(hits.target_at(Position::new(60, 10)), None);
    }

    #[test]
    fn test_empty_targets_are_not_recorded() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(5, 5, 0, 1), Target::SearchToggle);
        assert!(hits.targets.is_empty());
    }
}
