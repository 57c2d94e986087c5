use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

use studynav::nav::CategoriesState;

use crate::app::{App, LayoutMode};

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        match app.surface.categories_state() {
            CategoriesState::Loading => Cow::Borrowed("Loading categories..."),
            CategoriesState::Failed(reason) => {
                Cow::Owned(format!("Categories unavailable: {}", reason))
            }
            CategoriesState::Loaded => match app.layout_mode {
                LayoutMode::Desktop => Cow::Borrowed(
                    "[</>]category [^/v]pick [Enter]open [a]ll [/]search [u]ser [l]ock [q]uit",
                ),
                LayoutMode::Mobile => {
                    Cow::Borrowed("[m]enu [/]search [h]ome [b]log [z]quiz [l]ock [q]uit")
                }
            },
        }
    };

    let paragraph = Paragraph::new(text).style(app.palette.status_bar);
    f.render_widget(paragraph, area);
}
