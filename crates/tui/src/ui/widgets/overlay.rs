//! Floating overlay placement.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;

/// Place a `width` x `height` overlay whose right edge lines up with the
/// anchor's right edge and whose top sits `offset_y` rows below the anchor's
/// top. The result is clamped to `bounds`.
pub fn anchor_top_right(anchor: Rect, offset_y: u16, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let x = anchor
        .right()
        .saturating_sub(width)
        .clamp(bounds.x, bounds.right().saturating_sub(width));
    let y = anchor
        .y
        .saturating_add(offset_y)
        .clamp(bounds.y, bounds.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}

/// Blank the overlay area so the content beneath does not bleed through.
pub fn clear_overlay(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_hangs_from_the_anchor_right_edge() {
        let bounds = Rect::new(0, 0, 100, 40);
        let anchor = Rect::new(30, 5, 24, 3);
        let area = anchor_top_right(anchor, 3, 40, 10, bounds);
        assert_eq!(area, Rect::new(14, 8, 40, 10));
        assert_eq!(area.right(), anchor.right());
    }

    #[test]
    fn overlay_is_clamped_to_bounds() {
        let bounds = Rect::new(0, 0, 50, 12);
        let anchor = Rect::new(2, 8, 24, 3);
        let area = anchor_top_right(anchor, 3, 40, 10, bounds);
        assert_eq!(area.x, 0);
        assert_eq!(area.bottom(), 12);
        assert_eq!(area.width, 40);

        let tiny = anchor_top_right(anchor, 3, 80, 30, bounds);
        assert_eq!(tiny, bounds);
    }
}
