use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use huepick_types::{Effect, PaletteId, PickerId};
use rat_focus::{FocusBuilder, FocusFlag};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::Span;
use tracing::debug;

use super::controller::{ChangeHandler, SelectionController};
use super::shell::{self, POPOVER_OFFSET_Y, RenderDescriptor};
use crate::app::{App, FieldState};
use crate::ui::components::Component;
use crate::ui::components::palette_list::{ListOutcome, PaletteListComponent};
use crate::ui::focus;
use crate::ui::keyboard::{KeyboardHub, KeySignal};
use crate::ui::theme::theme_helpers as th;
use crate::ui::widgets::overlay::anchor_top_right;

/// How the popover's mount state changed during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverChange {
    Unchanged,
    Mounted,
    Unmounted,
}

/// A trigger showing the field's palette plus the popover list it opens.
///
/// The button owns no value. It reads the owner's value for its field on
/// every render and reports commits through the change handler, which turns
/// them into [`Effect::ApplySelection`].
#[derive(Debug)]
pub struct PaletteSelectButton {
    field_index: usize,
    controller: SelectionController,
    trigger_focus: FocusFlag,
    trigger_had_focus: bool,
    popover: Option<PaletteListComponent>,
    popover_had_focus: bool,
    trigger_area: Rect,
    popover_area: Rect,
    hovered: bool,
}

impl PaletteSelectButton {
    pub fn new(field_index: usize, field: &FieldState, keyboard: KeyboardHub) -> Self {
        let field_name = field.name().to_string();
        let on_change: ChangeHandler = Box::new(move |value: PaletteId| {
            vec![Effect::ApplySelection {
                field: field_name.clone(),
                value,
            }]
        });
        Self {
            field_index,
            controller: SelectionController::new(PickerId(field_index), keyboard, Some(on_change)),
            trigger_focus: FocusFlag::named(&focus::trigger_node(field.name())),
            trigger_had_focus: false,
            popover: None,
            popover_had_focus: false,
            trigger_area: Rect::default(),
            popover_area: Rect::default(),
            hovered: false,
        }
    }

    pub fn picker(&self) -> PickerId {
        self.controller.picker()
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn trigger_focus(&self) -> &FocusFlag {
        &self.trigger_focus
    }

    pub fn popover_focus(&self) -> Option<&FocusFlag> {
        self.popover.as_ref().map(PaletteListComponent::focus)
    }

    pub fn popover_has_focus(&self) -> bool {
        self.popover_focus().is_some_and(FocusFlag::get)
    }

    pub fn contains_focus(&self) -> bool {
        self.trigger_focus.get() || self.popover_has_focus()
    }

    pub fn is_popover_mounted(&self) -> bool {
        self.popover.is_some()
    }

    pub fn trigger_area(&self) -> Rect {
        self.trigger_area
    }

    pub fn hits_trigger(&self, position: Position) -> bool {
        self.trigger_area.contains(position)
    }

    pub fn hits_popover(&self, position: Position) -> bool {
        self.popover.is_some() && self.popover_area.contains(position)
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Register the trigger, then the popover while mounted, with the focus ring.
    pub fn build_focus(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(&self.trigger_focus);
        if let Some(flag) = self.popover_focus() {
            builder.leaf_widget(flag);
        }
    }

    pub fn descriptor(&self, app: &App) -> Option<RenderDescriptor> {
        let field = app.field(self.field_index)?;
        let resolved = shell::resolve_preview(&*app.ctx.catalog, field.value.as_ref(), field.options().fallback_value());
        Some(shell::project(
            self.controller.state(),
            field.options(),
            field.value.as_ref(),
            resolved.as_ref(),
        ))
    }

    /// Mount the popover exactly while the controller is open.
    pub fn sync_popover(&mut self, app: &App) -> PopoverChange {
        let popover = self.descriptor(app).and_then(|descriptor| descriptor.popover);
        match (popover, self.popover.is_some()) {
            (Some(props), false) => {
                debug!(picker = self.picker().0, "popover mounted");
                self.popover = Some(PaletteListComponent::new(props.options, props.value));
                self.popover_had_focus = false;
                PopoverChange::Mounted
            }
            (None, true) => {
                debug!(picker = self.picker().0, "popover unmounted");
                self.popover = None;
                self.popover_had_focus = false;
                self.popover_area = Rect::default();
                PopoverChange::Unmounted
            }
            _ => PopoverChange::Unchanged,
        }
    }

    /// Report focus transitions since the last call to the controller.
    /// A mounted popover losing focus closes it. Returns whether anything
    /// changed.
    pub fn sync_focus(&mut self) -> bool {
        let mut changed = false;
        let trigger_has_focus = self.trigger_focus.get();
        if trigger_has_focus != self.trigger_had_focus {
            self.trigger_had_focus = trigger_has_focus;
            if trigger_has_focus {
                self.controller.on_trigger_focus_gained();
            } else {
                self.controller.on_trigger_focus_lost();
            }
            changed = true;
        }

        let popover_has_focus = self.popover_has_focus();
        if self.popover_had_focus && !popover_has_focus {
            debug!(picker = self.picker().0, "popover blurred");
            self.controller.close();
            changed = true;
        }
        self.popover_had_focus = popover_has_focus;
        changed
    }

    /// Dismiss the popover as if it lost focus.
    pub fn blur_popover(&mut self) {
        if self.popover.is_some() {
            self.controller.close();
        }
    }

    pub fn handle_key_signal(&mut self, signal: KeySignal) -> Vec<Effect> {
        self.controller.handle_key_signal(signal)
    }

    fn apply_list_outcome(&mut self, outcome: ListOutcome) -> Vec<Effect> {
        match outcome {
            ListOutcome::Commit(value) => self.controller.on_selection_committed(value),
            ListOutcome::Handled | ListOutcome::Ignored => Vec::new(),
        }
    }

    /// Draw the popover over everything else; call after all triggers.
    pub fn render_popover(&mut self, frame: &mut Frame, bounds: Rect, app: &App) {
        let Some(list) = self.popover.as_mut() else {
            return;
        };
        let catalog = &*app.ctx.catalog;
        let (width, height) = list.preferred_size(catalog);
        let area = anchor_top_right(self.trigger_area, POPOVER_OFFSET_Y, width, height, bounds);
        self.popover_area = area;
        list.render(frame, area, catalog, &*app.ctx.theme);
    }
}

impl Component for PaletteSelectButton {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if let Some(list) = self.popover.as_mut()
            && list.focus().get()
        {
            let outcome = list.handle_key(&*app.ctx.catalog, key);
            return self.apply_list_outcome(outcome);
        }
        if self.trigger_focus.get() && key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
        {
            self.controller.toggle();
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let position = Position::new(mouse.column, mouse.row);
        if self.hits_popover(position)
            && let Some(list) = self.popover.as_mut()
        {
            let outcome = list.handle_mouse(&*app.ctx.catalog, mouse);
            return self.apply_list_outcome(outcome);
        }
        if self.hits_trigger(position) && mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            self.controller.toggle();
            return vec![Effect::FocusTrigger(self.picker())];
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let Some(descriptor) = self.descriptor(app) else {
            return;
        };
        let (width, height) = descriptor.trigger_size();
        self.trigger_area = Rect {
            width: width.min(rect.width),
            height: height.min(rect.height),
            ..rect
        };
        shell::draw_trigger(frame, self.trigger_area, &descriptor, &*app.ctx.theme, self.hovered);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        if self.popover_has_focus() {
            th::build_hint_spans(
                &*app.ctx.theme,
                &[(" ↑/↓", " Move  "), (" Enter", " Select  "), (" Esc", " Close  "), (" Type", " Filter ")],
            )
        } else {
            th::build_hint_spans(
                &*app.ctx.theme,
                &[(" Enter/Space", " Open  "), (" ↑/↓", " Open  "), (" Tab", " Next  "), (" q", " Quit ")],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crossterm::event::KeyModifiers;
    use huepick_catalog::PaletteStore;
    use huepick_types::{HexColor, Palette};
    use huepick_util::{AppConfig, UserPreferences};

    use super::*;
    use crate::ui::components::palette_select::controller::SelectionPhase;

    fn app() -> App {
        let catalog = PaletteStore::from_palettes([
            Palette::new("dmg", "DMG Classic", vec![HexColor::new(0xe8, 0xf8, 0xe0)]),
            Palette::new("mono", "Mono", vec![HexColor::new(0, 0, 0), HexColor::new(255, 255, 255)]),
        ])
        .unwrap();
        App::new(Rc::new(catalog), AppConfig::default(), UserPreferences::ephemeral())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn popover_mounts_only_while_open() {
        let mut app = app();
        let mut button = PaletteSelectButton::new(0, &app.fields[0], app.ctx.keyboard.clone());
        assert_eq!(button.sync_popover(&app), PopoverChange::Unchanged);

        button.trigger_focus.set(true);
        button.sync_focus();
        button.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(button.sync_popover(&app), PopoverChange::Mounted);
        assert!(button.is_popover_mounted());
        assert_eq!(button.sync_popover(&app), PopoverChange::Unchanged);

        button.blur_popover();
        assert_eq!(button.sync_popover(&app), PopoverChange::Unmounted);
        assert!(!button.is_popover_mounted());
    }

    #[test]
    fn committing_from_the_list_reports_to_the_owner() {
        let mut app = app();
        let mut button = PaletteSelectButton::new(0, &app.fields[0], app.ctx.keyboard.clone());
        button.trigger_focus.set(true);
        button.sync_focus();
        button.handle_key_events(&mut app, key(KeyCode::Char(' ')));
        button.sync_popover(&app);

        button.trigger_focus.set(false);
        if let Some(flag) = button.popover_focus() {
            flag.set(true);
        }
        button.sync_focus();
        assert_eq!(button.controller().phase(), SelectionPhase::Open);

        button.handle_key_events(&mut app, key(KeyCode::Down));
        let effects = button.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![
                Effect::ApplySelection {
                    field: "background".into(),
                    value: PaletteId::from("mono"),
                },
                Effect::FocusTrigger(PickerId(0)),
            ]
        );
        assert!(!button.controller().is_open());
    }

    #[test]
    fn popover_losing_focus_closes_it() {
        let mut app = app();
        let mut button = PaletteSelectButton::new(1, &app.fields[1], app.ctx.keyboard.clone());
        button.trigger_area = Rect::new(0, 0, 24, 3);
        let effects = button.handle_mouse_events(&mut app, click(3, 1));
        assert_eq!(effects, vec![Effect::FocusTrigger(PickerId(1))]);
        button.sync_popover(&app);
        if let Some(flag) = button.popover_focus() {
            flag.set(true);
        }
        assert!(!button.sync_focus());
        assert!(button.controller().is_open());

        if let Some(flag) = button.popover_focus() {
            flag.set(false);
        }
        assert!(button.sync_focus());
        assert!(!button.controller().is_open());
    }

    #[test]
    fn clicking_outside_the_trigger_does_nothing() {
        let mut app = app();
        let mut button = PaletteSelectButton::new(0, &app.fields[0], app.ctx.keyboard.clone());
        button.trigger_area = Rect::new(0, 0, 24, 3);
        assert!(button.handle_mouse_events(&mut app, click(30, 1)).is_empty());
        assert!(!button.controller().is_open());
    }

    #[test]
    fn unset_required_field_renders_placeholder_descriptor() {
        let app = app();
        let button = PaletteSelectButton::new(0, &app.fields[0], app.ctx.keyboard.clone());
        let descriptor = button.descriptor(&app).unwrap();
        assert_eq!(descriptor.trigger, shell::TriggerContent::Placeholder);
        assert!(descriptor.popover.is_none());
    }
}
