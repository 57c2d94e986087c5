//! End-to-end navigation flows against a mocked taxonomy service.
//!
//! Each test starts its own wiremock server and drives a
//! `NavigationSurface` the way the event loop does: user actions are method
//! calls, fetch results are pulled off the channel and fed back through
//! `handle_event`.

use pretty_assertions::assert_eq;
use ratatui::layout::{Position, Rect};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use studynav::nav::{
    routes, CategoriesState, InMemoryRouter, LocalSession, Lookup, NavEvent, NavigationSurface,
    RegionId, RegionMap, SubscriptionBadge, UiState, User,
};
use studynav::taxonomy::{TaxonomyClient, DEFAULT_TIMEOUT};

const PARENTS: &str = r#"[{"parents":[
    {"_id":"math","name":"Mathematics"},
    {"_id":"sci","name":"Science"}
]}]"#;

const MATH: &str = r#"[{"subcategories":[
    {"_id":"m1","name":"Algebra"},
    {"_id":"m2","name":"algorithms"},
    {"_id":"m3","name":"Biology of numbers"},
    {"_id":"m4","name":"Calculus"},
    {"_id":"m5","name":"Arithmetic"}
]}]"#;

struct Flow {
    server: MockServer,
    surface: NavigationSurface,
    rx: mpsc::Receiver<NavEvent>,
    locked: Arc<AtomicBool>,
}

impl Flow {
    async fn start(session: LocalSession) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/categories/parents"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PARENTS))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            TaxonomyClient::new(reqwest::Client::new(), &server.uri(), DEFAULT_TIMEOUT).unwrap();
        let (tx, rx) = mpsc::channel(32);
        let locked = Arc::new(AtomicBool::new(false));
        let surface = NavigationSurface::new(
            client,
            tx,
            session,
            Arc::clone(&locked),
            InMemoryRouter::default(),
        );

        let mut flow = Flow {
            server,
            surface,
            rx,
            locked,
        };
        flow.surface.mount();
        flow.pump().await;
        flow
    }

    async fn pump(&mut self) -> bool {
        let event = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("fetch result in time")
            .expect("channel open");
        self.surface.handle_event(event)
    }

    async fn serve_math(&self, times: u64) {
        Mock::given(method("GET"))
            .and(path("/api/categories/subcategories/math"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MATH))
            .expect(times)
            .mount(&self.server)
            .await;
    }
}

fn signed_in() -> LocalSession {
    LocalSession::signed_in(User {
        name: "kiran".to_string(),
        email: "kiran@example.com".to_string(),
    })
}

fn layout() -> RegionMap {
    RegionMap::new()
        .with(RegionId::Primary, Rect::new(0, 0, 120, 2))
        .with(RegionId::Account, Rect::new(110, 0, 10, 2))
}

#[tokio::test]
async fn hovering_many_times_fetches_once() {
    let mut flow = Flow::start(LocalSession::anonymous()).await;
    flow.serve_math(1).await;

    for _ in 0..5 {
        flow.surface.hover_category("math");
    }
    assert_eq!(flow.surface.cache().get("math"), Lookup::Pending);
    assert!(flow.pump().await);

    for _ in 0..5 {
        flow.surface.leave_category();
        flow.surface.hover_category("math");
    }
    assert_eq!(flow.surface.cache().requests_issued(), 1);
}

#[tokio::test]
async fn dropdown_groups_large_lists() {
    let mut flow = Flow::start(LocalSession::anonymous()).await;
    flow.serve_math(1).await;
    flow.surface.hover_category("math");
    flow.pump().await;

    let dropdown = flow.surface.open_dropdown().expect("dropdown open");
    let featured: Vec<&str> = dropdown
        .sections
        .featured
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(
        featured,
        vec!["Algebra", "algorithms", "Biology of numbers", "Calculus"]
    );

    let grouped = dropdown.sections.grouped.expect("grouped index");
    let a: Vec<&str> = grouped["A"].iter().map(|s| s.name.as_str()).collect();
    assert_eq!(a, vec!["Algebra", "algorithms", "Arithmetic"]);
    let letters: Vec<&str> = grouped.keys().map(String::as_str).collect();
    assert_eq!(letters, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn failed_fetch_is_retried_on_next_hover() {
    let mut flow = Flow::start(LocalSession::anonymous()).await;
    Mock::given(method("GET"))
        .and(path("/api/categories/subcategories/math"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&flow.server)
        .await;
    flow.serve_math(1).await;

    flow.surface.hover_category("math");
    flow.pump().await;
    assert_eq!(flow.surface.cache().get("math"), Lookup::Absent);
    assert!(flow.surface.open_dropdown().is_none());

    flow.surface.leave_category();
    flow.surface.hover_category("math");
    flow.pump().await;
    assert!(flow.surface.open_dropdown().is_some());
    assert_eq!(flow.surface.cache().requests_issued(), 2);
}

#[tokio::test]
async fn selecting_from_any_surface_resets_everything() {
    let mut flow = Flow::start(signed_in()).await;
    flow.serve_math(1).await;
    flow.surface.hover_category("math");
    flow.pump().await;
    flow.surface.toggle_search();
    flow.surface.toggle_mobile_menu();
    flow.surface.toggle_user_menu();

    flow.surface.select_subcategory("m4");

    assert_eq!(flow.surface.ui_state(), &UiState::default());
    assert_eq!(
        flow.surface.navigator().navigations(),
        ["/study-materials/m4".to_string()]
    );
}

#[tokio::test]
async fn outside_clicks_dismiss_each_region_independently() {
    let mut flow = Flow::start(signed_in()).await;
    let regions = layout();

    flow.surface.hover_category("sci");
    flow.surface.toggle_search();
    flow.surface.toggle_user_menu();

    // Inside the account control only: nothing closes.
    flow.surface.pointer_down(Position::new(112, 1), &regions);
    assert!(flow.surface.ui_state().search_open);
    assert!(flow.surface.ui_state().user_menu_open);

    // Inside the bar, outside the account control: user menu closes.
    flow.surface.pointer_down(Position::new(40, 0), &regions);
    assert!(flow.surface.ui_state().search_open);
    assert_eq!(flow.surface.ui_state().hovered_category.as_deref(), Some("sci"));
    assert!(!flow.surface.ui_state().user_menu_open);

    // Below the bar: bar state clears too.
    flow.surface.toggle_user_menu();
    flow.surface.pointer_down(Position::new(40, 20), &regions);
    assert_eq!(flow.surface.ui_state(), &UiState::default());
}

#[tokio::test]
async fn signed_out_surface_skips_account_region() {
    let mut flow = Flow::start(LocalSession::anonymous()).await;
    let bar_only = RegionMap::new().with(RegionId::Primary, Rect::new(0, 0, 120, 2));

    flow.surface.toggle_search();
    flow.surface.pointer_down(Position::new(10, 10), &bar_only);
    assert!(!flow.surface.ui_state().search_open);
    assert_eq!(flow.surface.avatar_initial(), "U");
}

#[tokio::test]
async fn badge_follows_entitlement_without_remount() {
    let flow = Flow::start(LocalSession::anonymous()).await;
    assert_eq!(flow.surface.subscription_badge(), SubscriptionBadge::Subscribed);

    flow.locked.store(true, Ordering::Release);
    assert_eq!(flow.surface.subscription_badge().label(), "Upgrade");
}

#[tokio::test]
async fn logout_goes_to_login() {
    let mut flow = Flow::start(signed_in()).await;
    flow.surface.toggle_user_menu();
    flow.surface.logout();

    assert!(!flow.surface.is_authenticated());
    assert!(flow.surface.is_active(routes::LOGIN));
    assert!(!flow.surface.ui_state().user_menu_open);
}

#[tokio::test]
async fn teardown_drops_late_results() {
    let mut flow = Flow::start(LocalSession::anonymous()).await;
    Mock::given(method("GET"))
        .and(path("/api/categories/subcategories/math"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(MATH)
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&flow.server)
        .await;

    flow.surface.hover_category("math");
    flow.surface.teardown();

    assert!(!flow.pump().await);
    assert_eq!(flow.surface.cache().get("math"), Lookup::Absent);
    assert_eq!(flow.surface.categories_state(), &CategoriesState::Loading);
}
