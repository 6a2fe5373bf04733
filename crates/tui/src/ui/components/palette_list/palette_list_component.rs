use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use huepick_catalog::PaletteCatalog;
use huepick_types::{PaletteId, PickerOptions};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use rat_focus::FocusFlag;
use unicode_width::UnicodeWidthChar;

use super::state::{ListEntry, PaletteListState};
use crate::ui::theme::{Theme, theme_helpers as th};
use crate::ui::widgets::overlay::clear_overlay;
use crate::ui::widgets::swatch::swatch_spans;

/// Outer width of the popover.
pub const POPOVER_WIDTH: u16 = 44;
/// Rows of entries shown before the list scrolls.
pub const MAX_VISIBLE_ROWS: u16 = 8;
const ROW_SWATCH_WIDTH: u16 = 10;
const ROW_MARKER_WIDTH: u16 = 2;

/// Result of offering an input event to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Ignored,
    Handled,
    /// The user picked a row. The empty id is the "no selection" row.
    Commit(PaletteId),
}

/// Searchable palette list shown inside the popover.
#[derive(Debug)]
pub struct PaletteListComponent {
    state: PaletteListState,
}

impl PaletteListComponent {
    pub fn new(options: PickerOptions, value: Option<PaletteId>) -> Self {
        Self {
            state: PaletteListState::new(options, value),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &PaletteListState {
        &self.state
    }

    pub fn focus(&self) -> &FocusFlag {
        &self.state.focus
    }

    /// Outer size including border and filter row.
    pub fn preferred_size(&self, catalog: &dyn PaletteCatalog) -> (u16, u16) {
        let rows = u16::try_from(self.state.entries(catalog).len()).unwrap_or(u16::MAX);
        (POPOVER_WIDTH, rows.clamp(1, MAX_VISIBLE_ROWS) + 3)
    }

    pub fn handle_key(&mut self, catalog: &dyn PaletteCatalog, key: KeyEvent) -> ListOutcome {
        if key.kind != KeyEventKind::Press {
            return ListOutcome::Ignored;
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Up => self.state.move_highlight(catalog, -1),
            KeyCode::Down => self.state.move_highlight(catalog, 1),
            KeyCode::Char('p') if control => self.state.move_highlight(catalog, -1),
            KeyCode::Char('n') if control => self.state.move_highlight(catalog, 1),
            KeyCode::Home => self.state.highlight_first(catalog),
            KeyCode::End => self.state.highlight_last(catalog),
            KeyCode::Enter => {
                return match self.state.highlighted_entry(catalog) {
                    Some(entry) => ListOutcome::Commit(entry.id),
                    None => ListOutcome::Handled,
                };
            }
            KeyCode::Backspace => {
                self.state.pop_filter();
            }
            KeyCode::Char(ch) if !control && !ch.is_control() => self.state.push_filter(ch),
            _ => return ListOutcome::Ignored,
        }
        ListOutcome::Handled
    }

    pub fn handle_mouse(&mut self, catalog: &dyn PaletteCatalog, mouse: MouseEvent) -> ListOutcome {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match self.state.entry_at(catalog, mouse.column, mouse.row) {
                Some(entry) => ListOutcome::Commit(entry.id),
                None => ListOutcome::Handled,
            },
            MouseEventKind::ScrollUp => {
                self.state.move_highlight(catalog, -1);
                ListOutcome::Handled
            }
            MouseEventKind::ScrollDown => {
                self.state.move_highlight(catalog, 1);
                ListOutcome::Handled
            }
            _ => ListOutcome::Ignored,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, catalog: &dyn PaletteCatalog, theme: &dyn Theme) {
        clear_overlay(frame, area);
        let title = format!(" {} ", self.state.options().name);
        let focused = self.state.focus.get();
        let block = th::popover_block(theme, Some(title.as_str()), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [filter_area, rows_area] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        let filter_line = if self.state.filter().is_empty() {
            Line::from(Span::styled("Type to filter", theme.text_muted_style()))
        } else {
            Line::from(vec![
                Span::styled("/ ", theme.accent_emphasis_style()),
                Span::styled(self.state.filter().to_string(), theme.text_primary_style()),
            ])
        };
        frame.render_widget(Paragraph::new(filter_line), filter_area);
        self.state.rows_area = rows_area;

        let entries = self.state.entries(catalog);
        if entries.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No palettes match", theme.text_muted_style())),
                rows_area,
            );
            return;
        }

        let label_width = rows_area.width.saturating_sub(ROW_MARKER_WIDTH + ROW_SWATCH_WIDTH + 1);
        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| self.build_row(entry, label_width, theme))
            .collect();
        self.state.list_state.select(self.state.highlighted_index(&entries));
        let list = List::new(items).highlight_style(theme.selection_style());
        frame.render_stateful_widget(list, rows_area, &mut self.state.list_state);
    }

    fn build_row(&self, entry: &ListEntry, label_width: u16, theme: &dyn Theme) -> ListItem<'static> {
        let mut spans = Vec::new();
        if self.state.is_current(entry) {
            spans.push(Span::styled("● ", theme.status_success()));
        } else {
            spans.push(Span::raw("  "));
        }
        spans.extend(swatch_spans(self.state.options().swatch_variant, &entry.colors, ROW_SWATCH_WIDTH));
        spans.push(Span::raw(" "));
        let mut label_style = theme.text_primary_style();
        if entry.is_none_option() {
            label_style = theme.text_secondary_style().add_modifier(Modifier::ITALIC);
        }
        spans.push(Span::styled(truncate_to_width(&entry.label, label_width), label_style));
        ListItem::new(Line::from(spans))
    }
}

fn truncate_to_width(text: &str, max: u16) -> String {
    let max = usize::from(max);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > max {
            out.pop();
            out.push('…');
            return out;
        }
        used += width;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use huepick_catalog::PaletteStore;
    use huepick_types::{HexColor, Palette};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::ui::theme::NordTheme;

    fn catalog() -> PaletteStore {
        PaletteStore::from_palettes([
            Palette::new("dmg", "DMG Classic", vec![HexColor::new(0xe8, 0xf8, 0xe0)]),
            Palette::new("mono", "Mono", vec![HexColor::new(0, 0, 0), HexColor::new(255, 255, 255)]),
        ])
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_commits_the_highlighted_palette() {
        let catalog = catalog();
        let mut list = PaletteListComponent::new(PickerOptions::new("background"), Some(PaletteId::from("dmg")));
        assert_eq!(list.handle_key(&catalog, key(KeyCode::Down)), ListOutcome::Handled);
        assert_eq!(
            list.handle_key(&catalog, key(KeyCode::Enter)),
            ListOutcome::Commit(PaletteId::from("mono"))
        );
    }

    #[test]
    fn none_row_commits_the_empty_id() {
        let catalog = catalog();
        let options = PickerOptions::new("ui").with_optional(None, None);
        let mut list = PaletteListComponent::new(options, None);
        assert_eq!(list.handle_key(&catalog, key(KeyCode::Enter)), ListOutcome::Commit(PaletteId::empty()));
    }

    #[test]
    fn escape_is_left_to_the_window_listener() {
        let catalog = catalog();
        let mut list = PaletteListComponent::new(PickerOptions::new("background"), None);
        assert_eq!(list.handle_key(&catalog, key(KeyCode::Esc)), ListOutcome::Ignored);
        assert_eq!(list.handle_key(&catalog, key(KeyCode::Tab)), ListOutcome::Ignored);
    }

    #[test]
    fn typing_filters_and_ctrl_keys_navigate() {
        let catalog = catalog();
        let mut list = PaletteListComponent::new(PickerOptions::new("background"), None);
        list.handle_key(&catalog, key(KeyCode::Char('m')));
        list.handle_key(&catalog, key(KeyCode::Char('o')));
        assert_eq!(list.state().filter(), "mo");
        assert_eq!(list.preferred_size(&catalog), (POPOVER_WIDTH, 4));

        list.handle_key(&catalog, key(KeyCode::Backspace));
        list.handle_key(&catalog, key(KeyCode::Backspace));
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        list.handle_key(&catalog, ctrl_n);
        assert_eq!(list.state().filter(), "");
        assert_eq!(
            list.handle_key(&catalog, key(KeyCode::Enter)),
            ListOutcome::Commit(PaletteId::from("mono"))
        );
    }

    #[test]
    fn clicking_a_rendered_row_commits_it() {
        let catalog = catalog();
        let theme = NordTheme::new();
        let mut list = PaletteListComponent::new(PickerOptions::new("background"), None);
        let (width, height) = list.preferred_size(&catalog);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| list.render(frame, Rect::new(0, 0, width, height), &catalog, &theme))
            .unwrap();

        // Border row, filter row, then entries.
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(list.handle_mouse(&catalog, click), ListOutcome::Commit(PaletteId::from("mono")));
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate_to_width("Mono", 10), "Mono");
        assert_eq!(truncate_to_width("Gameboy Pocket", 8), "Gameboy…");
    }
}
