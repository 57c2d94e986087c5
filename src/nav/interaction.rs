//! Open/closed state of the transient navigation surfaces.
//!
//! State is a set of independent flags rather than one enum: the search
//! panel and a category dropdown may be open together, and the user menu
//! lives in its own region with its own dismissal rule. The mobile menu is a
//! full-screen overlay toggled only by its own control and its backdrop.
//!
//! Outside-click dismissal is modelled as document-level listeners, one per
//! region, attached once when the surface mounts and removed on teardown.
//! Each listener tests the pointer against its own region's boundary:
//!
//! | Listener | Pointer-down outside its region does |
//! |----------|---------------------------------------|
//! | Primary  | clear hovered category, close search  |
//! | Account  | close user menu                       |

use ratatui::layout::Position;

use super::region::{Boundary, RegionId, RegionMap};

/// Transient UI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub hovered_category: Option<String>,
    pub mobile_menu_open: bool,
    pub search_open: bool,
    pub user_menu_open: bool,
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: UiState,
    listeners: Vec<RegionId>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn hovered_category(&self) -> Option<&str> {
        self.state.hovered_category.as_deref()
    }

    // ------------------------------------------------------------------
    // Listener lifecycle
    // ------------------------------------------------------------------

    /// Register the per-region outside-click listeners. Idempotent.
    pub fn attach_outside_listeners(&mut self) {
        if !self.listeners.is_empty() {
            return;
        }
        self.listeners.extend(RegionId::ALL);
        tracing::debug!(count = self.listeners.len(), "Attached outside-click listeners");
    }

    pub fn detach_outside_listeners(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        self.listeners.clear();
        tracing::debug!("Detached outside-click listeners");
    }

    pub fn listeners_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Global pointer-down: every attached listener checks containment
    /// against its own region. Regions missing from `regions` are skipped.
    pub fn pointer_down<B: Boundary>(&mut self, point: Position, regions: &RegionMap<B>) {
        for region in self.listeners.clone() {
            match regions.contains(region, point) {
                Some(false) => self.dismiss(region),
                Some(true) | None => {}
            }
        }
    }

    fn dismiss(&mut self, region: RegionId) {
        match region {
            RegionId::Primary => {
                if self.state.hovered_category.is_some() || self.state.search_open {
                    tracing::trace!("Pointer down outside navigation bar, dismissing");
                }
                self.state.hovered_category = None;
                self.state.search_open = false;
            }
            RegionId::Account => {
                if self.state.user_menu_open {
                    tracing::trace!("Pointer down outside account control, closing user menu");
                }
                self.state.user_menu_open = false;
            }
        }
    }

    // ------------------------------------------------------------------
    // Region A: category hover and search
    // ------------------------------------------------------------------

    pub fn hover_category(&mut self, category_id: &str) {
        if self.hovered_category() != Some(category_id) {
            self.state.hovered_category = Some(category_id.to_owned());
        }
    }

    /// Pointer left the category (tab and dropdown together).
    pub fn leave_category(&mut self) {
        self.state.hovered_category = None;
    }

    pub fn toggle_search(&mut self) {
        self.state.search_open = !self.state.search_open;
    }

    // ------------------------------------------------------------------
    // Region B: user menu
    // ------------------------------------------------------------------

    pub fn toggle_user_menu(&mut self) {
        self.state.user_menu_open = !self.state.user_menu_open;
    }

    pub fn close_user_menu(&mut self) {
        self.state.user_menu_open = false;
    }

    // ------------------------------------------------------------------
    // Mobile overlay
    // ------------------------------------------------------------------

    pub fn toggle_mobile_menu(&mut self) {
        self.state.mobile_menu_open = !self.state.mobile_menu_open;
    }

    /// Backdrop tap. Taps on the menu panel itself never get here.
    pub fn close_mobile_menu(&mut self) {
        self.state.mobile_menu_open = false;
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Full reset after a subcategory is chosen, whichever surface it came
    /// from.
    pub fn reset_transient(&mut self) {
        self.state = UiState::default();
    }
}
