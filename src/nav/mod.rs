//! Category navigation: lazy subcategory cache, dropdown grouping,
//! open/closed state of the transient menus and the surface that ties them
//! to routing.
//!
//! - [`cache`] - per-category subcategory cache with request deduplication
//! - [`grouping`] - featured strip and A-Z index for a dropdown
//! - [`interaction`] - which menus are open, outside-click dismissal
//! - [`region`] - screen regions and the containment test
//! - [`collaborators`] - session, entitlement and router seams
//! - [`surface`] - everything above behind one owner

pub mod cache;
pub mod collaborators;
mod events;
pub mod grouping;
pub mod interaction;
pub mod region;
pub mod surface;

pub use cache::{Completion, Lookup, SubcategoryCache};
pub use collaborators::{
    routes, AuthSession, ContentEntitlement, InMemoryRouter, LocalSession, Navigator,
    SubscriptionBadge, User,
};
pub use events::NavEvent;
pub use grouping::{DropdownSections, GroupedSubcategories, FEATURED_LIMIT};
pub use interaction::{InteractionController, UiState};
pub use region::{Boundary, RegionId, RegionMap};
pub use surface::{CategoriesState, NavigationSurface, OpenDropdown};
