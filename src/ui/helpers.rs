//! Layout helpers shared by the bar, dropdown and menu widgets.

use ratatui::{layout::Rect, style::Style, text::Span, widgets::Paragraph, Frame};

use studynav::util::display_width;

/// Places single-line items left to right along one row.
pub(super) struct RowCursor {
    x: u16,
    y: u16,
    end: u16,
}

impl RowCursor {
    pub(super) fn new(area: Rect) -> Self {
        Self {
            x: area.x,
            y: area.y,
            end: area.right(),
        }
    }

    /// Draws `text` at the cursor and returns where it landed, or `None`
    /// (drawing nothing) when it would overflow the row.
    pub(super) fn place(&mut self, f: &mut Frame, text: &str, style: Style) -> Option<Rect> {
        let width = u16::try_from(display_width(text)).ok()?;
        if width == 0 || self.x.saturating_add(width) > self.end {
            return None;
        }
        let rect = Rect::new(self.x, self.y, width, 1);
        f.render_widget(Paragraph::new(Span::styled(text.to_owned(), style)), rect);
        self.x += width;
        Some(rect)
    }

    pub(super) fn skip(&mut self, columns: u16) {
        self.x = self.x.saturating_add(columns).min(self.end);
    }
}

/// Total display width of a set of labels, saturating at `u16::MAX`.
pub(super) fn row_width<'a>(labels: impl IntoIterator<Item = &'a str>) -> u16 {
    let total: usize = labels.into_iter().map(display_width).sum();
    u16::try_from(total).unwrap_or(u16::MAX)
}

/// A `width` x `height` box whose left edge is as close to `anchor_x` as
/// `bounds` allows, starting at the top of `bounds`.
pub(super) fn popup_rect(anchor_x: u16, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let x = anchor_x
        .min(bounds.right().saturating_sub(width))
        .max(bounds.x);
    Rect::new(x, bounds.y, width, height)
}

/// Row `offset` of `area`, or `None` past its bottom.
pub(super) fn row(area: Rect, offset: u16) -> Option<Rect> {
    (offset < area.height).then(|| Rect::new(area.x, area.y + offset, area.width, 1))
}

/// Draws one styled line filling `area`.
pub(super) fn line(f: &mut Frame, area: Rect, text: impl Into<String>, style: Style) {
    f.render_widget(Paragraph::new(Span::styled(text.into(), style)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_clamped_to_right_edge() {
        let bounds = Rect::new(0, 2, 80, 20);
        let rect = popup_rect(70, 30, 10, bounds);
        assert_eq!(rect, Rect::new(50, 2, 30, 10));
    }

    #[test]
    fn test_popup_shrinks_to_bounds() {
        let bounds = Rect::new(0, 2, 20, 5);
        let rect = popup_rect(3, 48, 12, bounds);
        assert_eq!(rect, Rect::new(0, 2, 20, 5));
    }

    #[test]
    fn test_row_past_bottom() {
        let area = Rect::new(0, 0, 10, 2);
        assert_eq!(row(area, 1), Some(Rect::new(0, 1, 10, 1)));
        assert_eq!(row(area, 2), None);
    }

    #[test]
    fn test_row_width_counts_wide_chars() {
        assert_eq!(row_width([" / ", "数学"]), 7);
    }
}
