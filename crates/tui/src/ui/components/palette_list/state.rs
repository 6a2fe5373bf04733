use huepick_catalog::PaletteCatalog;
use huepick_types::{HexColor, PaletteId, PickerOptions};
use rat_focus::FocusFlag;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;

use crate::ui::focus;

/// One selectable row in the popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Empty for the "no selection" row.
    pub id: PaletteId,
    pub label: String,
    pub colors: Vec<HexColor>,
}

impl ListEntry {
    pub fn is_none_option(&self) -> bool {
        self.id.is_empty()
    }
}

/// State of a mounted popover list.
///
/// Entries are derived from the catalog on demand; the state keeps only the
/// filter text and the highlighted identifier so catalog edits are picked up
/// on the next keypress or frame.
#[derive(Debug)]
pub struct PaletteListState {
    options: PickerOptions,
    value: Option<PaletteId>,
    filter: String,
    highlighted: Option<PaletteId>,
    pub list_state: ListState,
    pub focus: FocusFlag,
    /// Rows area from the last render, used for mouse hit testing.
    pub rows_area: Rect,
}

impl PaletteListState {
    pub fn new(options: PickerOptions, value: Option<PaletteId>) -> Self {
        let highlighted = match value.as_ref().and_then(PaletteId::non_empty) {
            Some(id) => Some(id.clone()),
            None if options.optional => Some(PaletteId::empty()),
            None => None,
        };
        let flag = FocusFlag::named(&focus::popover_node(&options.name));
        Self {
            options,
            value,
            filter: String::new(),
            highlighted,
            list_state: ListState::default(),
            focus: flag,
            rows_area: Rect::default(),
        }
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Whether `entry` is the palette currently chosen by the owner.
    pub fn is_current(&self, entry: &ListEntry) -> bool {
        match self.value.as_ref().and_then(PaletteId::non_empty) {
            Some(id) => *id == entry.id,
            None => self.options.optional && entry.is_none_option(),
        }
    }

    /// Visible rows: the "no selection" row first when the field is
    /// optional, then catalog palettes in catalog order, narrowed by the
    /// filter (case-insensitive substring on name or id).
    pub fn entries(&self, catalog: &dyn PaletteCatalog) -> Vec<ListEntry> {
        let needle = self.filter.to_lowercase();
        let matches = |text: &str| needle.is_empty() || text.to_lowercase().contains(&needle);

        let mut entries = Vec::new();
        if self.options.optional && matches(self.options.optional_label()) {
            let colors = self
                .options
                .fallback_value()
                .and_then(|id| catalog.lookup(id))
                .map(|palette| palette.colors)
                .unwrap_or_default();
            entries.push(ListEntry {
                id: PaletteId::empty(),
                label: self.options.optional_label().to_string(),
                colors,
            });
        }
        entries.extend(
            catalog
                .palettes()
                .into_iter()
                .filter(|palette| matches(&palette.name) || matches(palette.id.as_str()))
                .map(|palette| ListEntry {
                    id: palette.id,
                    label: palette.name,
                    colors: palette.colors,
                }),
        );
        entries
    }

    /// Index of the highlighted row; the first row when the highlighted
    /// palette is filtered out or unknown.
    pub fn highlighted_index(&self, entries: &[ListEntry]) -> Option<usize> {
        if entries.is_empty() {
            return None;
        }
        let position = self
            .highlighted
            .as_ref()
            .and_then(|id| entries.iter().position(|entry| entry.id == *id));
        Some(position.unwrap_or(0))
    }

    pub fn highlighted_entry(&self, catalog: &dyn PaletteCatalog) -> Option<ListEntry> {
        let mut entries = self.entries(catalog);
        let index = self.highlighted_index(&entries)?;
        Some(entries.swap_remove(index))
    }

    /// Move the highlight by `delta` rows, wrapping at either end.
    pub fn move_highlight(&mut self, catalog: &dyn PaletteCatalog, delta: isize) {
        let entries = self.entries(catalog);
        let Some(current) = self.highlighted_index(&entries) else {
            return;
        };
        let len = entries.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;
        self.highlighted = Some(entries[next].id.clone());
    }

    pub fn highlight_first(&mut self, catalog: &dyn PaletteCatalog) {
        self.highlighted = self.entries(catalog).first().map(|entry| entry.id.clone());
    }

    pub fn highlight_last(&mut self, catalog: &dyn PaletteCatalog) {
        self.highlighted = self.entries(catalog).last().map(|entry| entry.id.clone());
    }

    pub fn push_filter(&mut self, ch: char) {
        self.filter.push(ch);
        self.list_state = ListState::default();
    }

    pub fn pop_filter(&mut self) -> bool {
        let popped = self.filter.pop().is_some();
        if popped {
            self.list_state = ListState::default();
        }
        popped
    }

    /// Entry drawn at terminal `row`, based on the last render.
    pub fn entry_at(&self, catalog: &dyn PaletteCatalog, column: u16, row: u16) -> Option<ListEntry> {
        let area = self.rows_area;
        if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
            return None;
        }
        let index = self.list_state.offset() + usize::from(row - area.y);
        self.entries(catalog).into_iter().nth(index)
    }
}
