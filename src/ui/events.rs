//! Background fetch results arriving on the event loop.

use studynav::nav::{CategoriesState, NavEvent};

use crate::app::App;

/// Apply one fetch result to the surface and surface failures in the status
/// bar.
pub(super) fn handle_nav_event(app: &mut App, event: NavEvent) {
    let failed_category = match &event {
        NavEvent::SubcategoriesLoaded {
            category_id,
            result: Err(_),
            ..
        } => Some(category_id.clone()),
        _ => None,
    };

    if !app.surface.handle_event(event) {
        return;
    }
    app.needs_redraw = true;

    if let Some(category_id) = failed_category {
        let name = app
            .surface
            .categories()
            .iter()
            .find(|c| c.id == category_id)
            .map(|c| c.name.clone())
            .unwrap_or(category_id);
        app.set_status(format!("Couldn't load {}; hover again to retry", name));
    } else if let CategoriesState::Failed(_) = app.surface.categories_state() {
        app.set_status("Couldn't load categories");
    }
}
