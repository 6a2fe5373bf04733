//! Interaction state machine for the palette select button.
//!
//! The controller owns whether the popover is open and whether the trigger
//! has focus. Window-level key listeners are derived from that state: the
//! navigation listener exists only while the trigger is focused and the
//! popover closed, the cancel listener only while the popover is open. Both
//! are held as [`Subscription`] guards and reconciled after every transition,
//! so leaving a state (or dropping the controller) releases its listener.
//!
//! Clicking the trigger toggles regardless of the focus flag; opening from the
//! keyboard requires it.

use std::fmt;

use huepick_types::{Effect, PaletteId, PickerId};
use tracing::{debug, trace};

use crate::ui::keyboard::{KeyboardHub, KeySignal, Subscription};

/// Owner callback for committed selections. The returned effects are queued
/// after the popover has closed.
pub type ChangeHandler = Box<dyn FnMut(PaletteId) -> Vec<Effect>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub is_open: bool,
    pub trigger_has_focus: bool,
}

/// The three observable phases of [`SelectionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    ClosedUnfocused,
    ClosedFocused,
    Open,
}

impl SelectionState {
    pub fn phase(&self) -> SelectionPhase {
        match (self.is_open, self.trigger_has_focus) {
            (true, _) => SelectionPhase::Open,
            (false, true) => SelectionPhase::ClosedFocused,
            (false, false) => SelectionPhase::ClosedUnfocused,
        }
    }
}

pub struct SelectionController {
    picker: PickerId,
    state: SelectionState,
    keyboard: KeyboardHub,
    navigation_listener: Option<Subscription>,
    cancel_listener: Option<Subscription>,
    on_change: Option<ChangeHandler>,
}

impl fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("picker", &self.picker)
            .field("state", &self.state)
            .field("navigation_listener", &self.navigation_listener.is_some())
            .field("cancel_listener", &self.cancel_listener.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl SelectionController {
    pub fn new(picker: PickerId, keyboard: KeyboardHub, on_change: Option<ChangeHandler>) -> Self {
        Self {
            picker,
            state: SelectionState::default(),
            keyboard,
            navigation_listener: None,
            cancel_listener: None,
            on_change,
        }
    }

    pub fn picker(&self) -> PickerId {
        self.picker
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn phase(&self) -> SelectionPhase {
        self.state.phase()
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Trigger activation: flips open and closed unconditionally.
    pub fn toggle(&mut self) {
        self.set_open(!self.state.is_open);
    }

    /// Closes the popover; no-op when already closed.
    pub fn close(&mut self) {
        if self.state.is_open {
            self.set_open(false);
        }
    }

    /// A palette was picked in the popover: close, notify the owner, and hand
    /// focus back to the trigger, in that order.
    pub fn on_selection_committed(&mut self, value: PaletteId) -> Vec<Effect> {
        debug!(picker = self.picker.0, value = %value, "selection committed");
        self.close();
        let mut effects = match self.on_change.as_mut() {
            Some(handler) => handler(value),
            None => Vec::new(),
        };
        effects.push(Effect::FocusTrigger(self.picker));
        effects
    }

    pub fn on_trigger_focus_gained(&mut self) {
        self.set_trigger_focus(true);
    }

    pub fn on_trigger_focus_lost(&mut self) {
        self.set_trigger_focus(false);
    }

    /// Handle a key delivered by one of this controller's listeners.
    pub fn handle_key_signal(&mut self, signal: KeySignal) -> Vec<Effect> {
        match (signal, self.phase()) {
            (KeySignal::Navigate, SelectionPhase::ClosedFocused) => {
                self.set_open(true);
                Vec::new()
            }
            (KeySignal::Cancel, SelectionPhase::Open) => {
                self.set_open(false);
                vec![Effect::FocusTrigger(self.picker)]
            }
            (signal, phase) => {
                trace!(picker = self.picker.0, ?signal, ?phase, "key ignored");
                Vec::new()
            }
        }
    }

    fn set_open(&mut self, open: bool) {
        if self.state.is_open != open {
            debug!(picker = self.picker.0, open, "popover {}", if open { "opened" } else { "closed" });
        }
        self.state.is_open = open;
        self.sync_listeners();
    }

    fn set_trigger_focus(&mut self, focused: bool) {
        self.state.trigger_has_focus = focused;
        self.sync_listeners();
    }

    fn sync_listeners(&mut self) {
        let phase = self.phase();
        let (picker, keyboard) = (self.picker, &self.keyboard);
        scope_listener(&mut self.navigation_listener, phase == SelectionPhase::ClosedFocused, || {
            keyboard.subscribe(picker, KeySignal::Navigate)
        });
        scope_listener(&mut self.cancel_listener, phase == SelectionPhase::Open, || {
            keyboard.subscribe(picker, KeySignal::Cancel)
        });
    }
}

/// Acquire the listener on entry into the state that wants it and release it
/// on exit. An already-held listener is kept, never duplicated.
fn scope_listener(slot: &mut Option<Subscription>, wanted: bool, subscribe: impl FnOnce() -> Subscription) {
    match (wanted, slot.is_some()) {
        (true, false) => *slot = Some(subscribe()),
        (false, true) => *slot = None,
        _ => {}
    }
}
