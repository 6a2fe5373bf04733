//! Hint bar listing the keys available in the current focus.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::theme::Theme;

/// Render `spans` as a single muted line, prefixed with `Hints:`.
pub fn draw_hints(frame: &mut Frame, area: Rect, theme: &dyn Theme, spans: Vec<Span<'_>>) {
    let mut line = vec![Span::styled("Hints:", theme.text_muted_style())];
    line.extend(spans);
    frame.render_widget(Paragraph::new(Line::from(line)).style(theme.text_muted_style()), area);
}
