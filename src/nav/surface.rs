//! The navigation surface: taxonomy data, transient UI state and routing
//! wired together.
//!
//! The surface is owned by one event loop. Background fetches report through
//! the [`NavEvent`] channel handed to [`NavigationSurface::new`]; the loop
//! feeds them back via [`NavigationSurface::handle_event`].

use ratatui::layout::Position;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::cache::{Completion, SubcategoryCache};
use super::collaborators::{
    routes, AuthSession, ContentEntitlement, InMemoryRouter, LocalSession, Navigator,
    SubscriptionBadge, User,
};
use super::events::{catch_task_panic, deliver, NavEvent};
use super::grouping::{self, DropdownSections};
use super::interaction::{InteractionController, UiState};
use super::region::{Boundary, RegionMap};
use crate::taxonomy::{Category, TaxonomyClient, TaxonomyError};
use crate::util::first_letter_upper;

/// Shown in the avatar when the user has no usable name.
const FALLBACK_INITIAL: &str = "U";

/// Load state of the top-level category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoriesState {
    Loading,
    Loaded,
    Failed(String),
}

/// The dropdown currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDropdown<'a> {
    pub category: &'a Category,
    pub sections: DropdownSections<'a>,
}

pub struct NavigationSurface<S = LocalSession, E = Arc<AtomicBool>, N = InMemoryRouter> {
    events: mpsc::Sender<NavEvent>,
    cache: SubcategoryCache,
    controller: InteractionController,
    categories: Vec<Category>,
    categories_state: CategoriesState,
    categories_generation: u64,
    mounted: bool,
    session: S,
    entitlement: E,
    navigator: N,
}

impl<S, E, N> NavigationSurface<S, E, N>
where
    S: AuthSession,
    E: ContentEntitlement,
    N: Navigator,
{
    pub fn new(
        client: TaxonomyClient,
        events: mpsc::Sender<NavEvent>,
        session: S,
        entitlement: E,
        navigator: N,
    ) -> Self {
        Self {
            cache: SubcategoryCache::new(client, events.clone()),
            events,
            controller: InteractionController::new(),
            categories: Vec::new(),
            categories_state: CategoriesState::Loading,
            categories_generation: 0,
            mounted: false,
            session,
            entitlement,
            navigator,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Attach outside-click listeners and start loading the category list.
    /// Calling it again while mounted does nothing.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.controller.attach_outside_listeners();

        self.categories_generation = self.categories_generation.wrapping_add(1);
        self.categories_state = CategoriesState::Loading;
        tracing::info!(
            base_url = %self.cache.client().base_url(),
            generation = self.categories_generation,
            "Loading categories"
        );
        spawn_categories_fetch(
            self.cache.client().clone(),
            self.categories_generation,
            self.events.clone(),
        );
    }

    /// Detach listeners and drop all session data. Results still in flight
    /// are ignored when they arrive.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.controller.detach_outside_listeners();
        self.controller.reset_transient();
        self.cache.clear();
        self.categories.clear();
        self.categories_state = CategoriesState::Loading;
        tracing::info!("Navigation surface torn down");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Apply a background fetch result. Returns `true` when visible state
    /// changed.
    ///
    /// Subcategory results always go through the cache so a Pending entry
    /// never outlives its fetch; the generation check there rejects anything
    /// issued before the last teardown.
    pub fn handle_event(&mut self, event: NavEvent) -> bool {
        match event {
            NavEvent::CategoriesLoaded { .. } if !self.mounted => {
                tracing::debug!("Ignoring category list after teardown");
                false
            }
            NavEvent::CategoriesLoaded { generation, result } => {
                if generation != self.categories_generation {
                    tracing::debug!(generation, "Discarding stale category list");
                    return false;
                }
                self.apply_categories(result);
                true
            }
            NavEvent::SubcategoriesLoaded {
                category_id,
                generation,
                result,
            } => !matches!(
                self.cache.complete(&category_id, generation, result),
                Completion::Stale
            ),
        }
    }

    fn apply_categories(&mut self, result: Result<Vec<Category>, TaxonomyError>) {
        match result {
            Ok(categories) => {
                tracing::info!(count = categories.len(), "Categories loaded");
                self.categories = categories;
                self.categories_state = CategoriesState::Loaded;
            }
            Err(e) => {
                if e.is_network() {
                    tracing::warn!(error = %e, "Category service unreachable");
                } else {
                    tracing::error!(error = %e, "Failed to load categories");
                }
                self.categories.clear();
                self.categories_state = CategoriesState::Failed(e.to_string());
            }
        }
    }

    // ========================================================================
    // Pointer and toggles
    // ========================================================================

    /// Open `category_id`'s dropdown, fetching its subcategories on first use.
    /// An unmounted surface does not fetch.
    pub fn hover_category(&mut self, category_id: &str) {
        self.controller.hover_category(category_id);
        if self.mounted {
            self.cache.ensure(category_id);
        } else {
            tracing::debug!(category_id, "Hover on unmounted surface; not fetching");
        }
    }

    pub fn leave_category(&mut self) {
        self.controller.leave_category();
    }

    pub fn toggle_search(&mut self) {
        self.controller.toggle_search();
    }

    pub fn toggle_user_menu(&mut self) {
        self.controller.toggle_user_menu();
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.controller.toggle_mobile_menu();
    }

    pub fn tap_mobile_backdrop(&mut self) {
        self.controller.close_mobile_menu();
    }

    pub fn pointer_down<B: Boundary>(&mut self, point: Position, regions: &RegionMap<B>) {
        self.controller.pointer_down(point, regions);
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Open a subcategory's study materials and close every transient
    /// surface.
    pub fn select_subcategory(&mut self, subcategory_id: &str) {
        self.navigator
            .navigate(&routes::study_materials(subcategory_id));
        self.controller.reset_transient();
    }

    /// Open the category's own page. Dropdowns stay as they are.
    pub fn view_all(&mut self, category_id: &str) {
        self.navigator.navigate(&routes::study_materials(category_id));
    }

    pub fn follow_link(&mut self, path: &str) {
        self.navigator.navigate(path);
    }

    /// Link inside the mobile menu; the menu closes behind it.
    pub fn follow_mobile_link(&mut self, path: &str) {
        self.navigator.navigate(path);
        self.controller.close_mobile_menu();
    }

    /// Link inside the user menu; the menu closes behind it.
    pub fn follow_account_link(&mut self, path: &str) {
        self.navigator.navigate(path);
        self.controller.close_user_menu();
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.navigator.navigate(routes::LOGIN);
        self.controller.close_user_menu();
    }

    // ========================================================================
    // Read side
    // ========================================================================

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn categories_state(&self) -> &CategoriesState {
        &self.categories_state
    }

    pub fn ui_state(&self) -> &UiState {
        self.controller.state()
    }

    pub fn cache(&self) -> &SubcategoryCache {
        &self.cache
    }

    /// The dropdown to draw, if any: the hovered category once its
    /// subcategories are cached.
    pub fn open_dropdown(&self) -> Option<OpenDropdown<'_>> {
        let id = self.controller.hovered_category()?;
        let subcategories = self.cache.present(id)?;
        let category = self.categories.iter().find(|c| c.id == id)?;
        Some(OpenDropdown {
            category,
            sections: grouping::present(subcategories),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn avatar_initial(&self) -> String {
        self.session
            .current_user()
            .and_then(|user| first_letter_upper(&user.name))
            .unwrap_or_else(|| FALLBACK_INITIAL.to_owned())
    }

    /// Read fresh from the entitlement on every call.
    pub fn subscription_badge(&self) -> SubscriptionBadge {
        SubscriptionBadge::from_locked(self.entitlement.is_content_locked())
    }

    pub fn is_active(&self, path: &str) -> bool {
        self.navigator.current_path() == path
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

fn spawn_categories_fetch(client: TaxonomyClient, generation: u64, tx: mpsc::Sender<NavEvent>) {
    tokio::spawn(async move {
        let result = match catch_task_panic(client.fetch_top_categories()).await {
            Ok(result) => result,
            Err(panic_msg) => {
                tracing::error!(task = "categories_fetch", error = %panic_msg, "Background task panicked");
                Err(TaxonomyError::TaskPanicked(panic_msg))
            }
        };
        deliver(&tx, NavEvent::CategoriesLoaded { generation, result }).await;
    });
}
