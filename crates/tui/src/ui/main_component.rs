//! Root view: the palette form, its focus ring, and input routing.
//!
//! Every event goes through [`MainView::dispatch`]:
//! 1. the focused button (or form-level keys such as Tab and `q`) sees it;
//! 2. key events are then offered to the window-level [`KeyboardHub`] and
//!    deliveries are routed to the owning buttons;
//! 3. returned effects are applied in order;
//! 4. popovers are mounted or unmounted to match their controllers and focus
//!    transitions are reported back, repeating until nothing changes.
//!
//! [`KeyboardHub`]: crate::ui::keyboard::KeyboardHub

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use huepick_types::{Effect, Msg};
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tracing::{trace, warn};

use super::components::palette_select::shell::TRIGGER_HEIGHT;
use super::components::palette_select::{PaletteSelectButton, PopoverChange};
use super::components::Component;
use super::focus;
use super::theme::theme_helpers as th;
use super::widgets::draw_hints;
use crate::app::App;

/// Upper bound on mount/focus reconciliation rounds per event.
const MAX_SETTLE_PASSES: usize = 4;
const LABEL_WIDTH: u16 = 14;

#[derive(Debug)]
pub struct MainView {
    buttons: Vec<PaletteSelectButton>,
    focus: Focus,
    container: FocusFlag,
}

impl MainView {
    pub fn new(app: &App) -> Self {
        let buttons = app
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| PaletteSelectButton::new(index, field, app.ctx.keyboard.clone()))
            .collect();
        let mut view = Self {
            buttons,
            focus: Focus::default(),
            container: FocusFlag::named(focus::FORM),
        };
        view.focus = FocusBuilder::build_for(&view);
        view.focus.first();
        view.reconcile(app);
        view
    }

    pub fn buttons(&self) -> &[PaletteSelectButton] {
        &self.buttons
    }

    /// Route one terminal event, apply the resulting effects, and settle
    /// popovers and focus.
    pub fn dispatch(&mut self, app: &mut App, event: Event) {
        let effects = match event {
            Event::Key(key) => self.handle_key_events(app, key),
            Event::Mouse(mouse) => self.handle_mouse_events(app, mouse),
            Event::Resize(width, height) => self.handle_message(app, &Msg::Resize(width, height)),
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
        };
        self.apply_effects(app, effects);
        self.reconcile(app);
    }

    fn apply_effects(&mut self, app: &mut App, effects: Vec<Effect>) {
        for effect in effects {
            trace!(?effect, "applying effect");
            match effect {
                Effect::FocusTrigger(picker) => {
                    if let Some(button) = self.buttons.get(picker.0) {
                        self.focus.focus(button.trigger_focus());
                    }
                }
                Effect::ApplySelection { field, value } => {
                    app.apply_selection(&field, value);
                }
                Effect::Quit => app.should_quit = true,
            }
        }
    }

    fn reconcile(&mut self, app: &App) {
        for _ in 0..MAX_SETTLE_PASSES {
            let mut mounted = Vec::new();
            let mut structure_changed = false;
            for (index, button) in self.buttons.iter_mut().enumerate() {
                match button.sync_popover(app) {
                    PopoverChange::Mounted => {
                        mounted.push(index);
                        structure_changed = true;
                    }
                    PopoverChange::Unmounted => structure_changed = true,
                    PopoverChange::Unchanged => {}
                }
            }
            if structure_changed {
                self.rebuild_focus();
                for index in mounted {
                    if let Some(flag) = self.buttons[index].popover_focus() {
                        self.focus.focus(flag);
                    }
                }
            }

            let mut state_changed = false;
            for button in &mut self.buttons {
                state_changed |= button.sync_focus();
            }
            if !structure_changed && !state_changed {
                return;
            }
        }
        warn!("popover and focus state did not settle");
    }

    fn rebuild_focus(&mut self) {
        let old_focus = std::mem::take(&mut self.focus);
        self.focus = FocusBuilder::rebuild_for(&*self, Some(old_focus));
    }

    fn focused_button(&self) -> Option<usize> {
        self.buttons.iter().position(PaletteSelectButton::contains_focus)
    }
}

impl HasFocus for MainView {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        for button in &self.buttons {
            button.build_focus(builder);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

impl Component for MainView {
    fn handle_message(&mut self, _app: &mut App, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Resize(width, height) => trace!(width, height, "terminal resized"),
        }
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        let focused = self.focused_button();
        let popover_focused = focused.is_some_and(|index| self.buttons[index].popover_has_focus());

        let mut effects = Vec::new();
        match key.code {
            KeyCode::Tab => {
                self.focus.next();
            }
            KeyCode::BackTab => {
                self.focus.prev();
            }
            KeyCode::Char('q') if !popover_focused && key.modifiers == KeyModifiers::NONE => effects.push(Effect::Quit),
            _ => {
                if let Some(index) = focused {
                    effects.extend(self.buttons[index].handle_key_events(app, key));
                }
            }
        }

        for delivery in app.ctx.keyboard.dispatch(&key) {
            if let Some(button) = self.buttons.get_mut(delivery.picker.0) {
                effects.extend(button.handle_key_signal(delivery.signal));
            }
        }
        effects
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                for button in &mut self.buttons {
                    let hovered = button.hits_trigger(position);
                    button.set_hovered(hovered);
                }
                Vec::new()
            }
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                // Popovers float above the form, so they see the event first.
                if let Some(button) = self.buttons.iter_mut().find(|button| button.hits_popover(position)) {
                    return button.handle_mouse_events(app, mouse);
                }
                if !matches!(mouse.kind, MouseEventKind::Down(_)) {
                    return Vec::new();
                }
                for button in &mut self.buttons {
                    if !button.hits_trigger(position) {
                        button.blur_popover();
                    }
                }
                match self.buttons.iter_mut().find(|button| button.hits_trigger(position)) {
                    Some(button) => button.handle_mouse_events(app, mouse),
                    None => {
                        // Clicking empty space leaves nothing focused.
                        self.focus.none();
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme_bg = app.ctx.theme.roles().background;
        frame.render_widget(Paragraph::new("").style(Style::default().bg(theme_bg)), area);

        let [title_area, form_area, status_area, hints_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = Line::from(vec![
            Span::styled("huepick", app.ctx.theme.accent_emphasis_style()),
            Span::styled("  palette preferences", app.ctx.theme.text_secondary_style()),
        ]);
        frame.render_widget(Paragraph::new(title), title_area);

        let rows = Layout::vertical(self.buttons.iter().map(|_| Constraint::Length(TRIGGER_HEIGHT + 1))).split(form_area);
        for (index, (button, row)) in self.buttons.iter_mut().zip(rows.iter()).enumerate() {
            let [label_area, trigger_area] =
                Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)]).areas(*row);
            if let Some(field) = app.field(index) {
                let label_style = if button.contains_focus() {
                    app.ctx.theme.text_primary_style().add_modifier(Modifier::BOLD)
                } else {
                    app.ctx.theme.text_secondary_style()
                };
                let label_row = Rect {
                    y: label_area.y + 1,
                    height: label_area.height.saturating_sub(1).min(1),
                    ..label_area
                };
                frame.render_widget(Paragraph::new(Span::styled(field.config.label.clone(), label_style)), label_row);
            }
            button.render(frame, trigger_area, app);
        }

        let status = match app.status.as_deref() {
            Some(message) => Span::styled(message.to_string(), app.ctx.theme.status_success()),
            None => Span::styled("Choose a palette for each field", app.ctx.theme.text_muted_style()),
        };
        frame.render_widget(Paragraph::new(status), status_area);

        draw_hints(frame, hints_area, &*app.ctx.theme, self.get_hint_spans(app));

        for button in &mut self.buttons {
            button.render_popover(frame, area, app);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        match self.focused_button() {
            Some(index) => self.buttons[index].get_hint_spans(app),
            None => th::build_hint_spans(&*app.ctx.theme, &[(" Tab", " Focus form  "), (" q", " Quit ")]),
        }
    }
}
