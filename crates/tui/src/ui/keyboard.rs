//! Global keyboard listeners with scoped registration.
//!
//! Every key the terminal delivers is offered to the [`KeyboardHub`] after the
//! focused component has seen it, regardless of which widget holds focus.
//! Components that need such window-level keys call [`KeyboardHub::subscribe`]
//! and keep the returned [`Subscription`] for exactly as long as they want to
//! hear the key; dropping the guard removes the listener.
//!
//! Dispatch does not run callbacks. It returns a [`KeyDelivery`] per matching
//! listener and the host routes each one to the owning picker, so a listener
//! that is released while handling a key never observes a re-entrant borrow.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use huepick_types::PickerId;
use tracing::trace;

/// Which class of key a listener wants to hear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySignal {
    /// Up or Down arrow.
    Navigate,
    /// Escape.
    Cancel,
}

impl KeySignal {
    pub fn matches(self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match self {
            KeySignal::Navigate => matches!(key.code, KeyCode::Up | KeyCode::Down),
            KeySignal::Cancel => key.code == KeyCode::Esc,
        }
    }
}

/// A key matched by a live listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDelivery {
    pub picker: PickerId,
    pub signal: KeySignal,
}

#[derive(Debug)]
struct ListenerEntry {
    id: u64,
    picker: PickerId,
    signal: KeySignal,
}

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<ListenerEntry>,
}

/// Shared registry of window-level key listeners.
///
/// Cloning yields another handle onto the same registry.
#[derive(Debug, Clone, Default)]
pub struct KeyboardHub {
    table: Rc<RefCell<ListenerTable>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays active until the guard is dropped.
    pub fn subscribe(&self, picker: PickerId, signal: KeySignal) -> Subscription {
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push(ListenerEntry { id, picker, signal });
        trace!(listener = id, picker = picker.0, ?signal, "key listener registered");
        Subscription {
            id,
            signal,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Offer a key to every live listener, in registration order.
    pub fn dispatch(&self, key: &KeyEvent) -> Vec<KeyDelivery> {
        self.table
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.signal.matches(key))
            .map(|entry| KeyDelivery {
                picker: entry.picker,
                signal: entry.signal,
            })
            .collect()
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.table.borrow().entries.len()
    }

    #[cfg(test)]
    pub fn is_listening(&self, picker: PickerId, signal: KeySignal) -> bool {
        self.table
            .borrow()
            .entries
            .iter()
            .any(|entry| entry.picker == picker && entry.signal == signal)
    }
}

/// Guard for a registered listener; dropping it deregisters the listener.
#[derive(Debug)]
#[must_use = "dropping a subscription deregisters the listener immediately"]
pub struct Subscription {
    id: u64,
    signal: KeySignal,
    table: Weak<RefCell<ListenerTable>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().entries.retain(|entry| entry.id != self.id);
            trace!(listener = self.id, signal = ?self.signal, "key listener released");
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn dispatch_reaches_only_matching_listeners() {
        let hub = KeyboardHub::new();
        let _navigate = hub.subscribe(PickerId(0), KeySignal::Navigate);
        let _cancel = hub.subscribe(PickerId(1), KeySignal::Cancel);

        assert_eq!(
            hub.dispatch(&press(KeyCode::Down)),
            vec![KeyDelivery {
                picker: PickerId(0),
                signal: KeySignal::Navigate
            }]
        );
        assert_eq!(
            hub.dispatch(&press(KeyCode::Esc)),
            vec![KeyDelivery {
                picker: PickerId(1),
                signal: KeySignal::Cancel
            }]
        );
        assert!(hub.dispatch(&press(KeyCode::Char('x'))).is_empty());
    }

    #[test]
    fn dropping_the_guard_deregisters() {
        let hub = KeyboardHub::new();
        let guard = hub.subscribe(PickerId(3), KeySignal::Navigate);
        assert!(hub.is_listening(PickerId(3), KeySignal::Navigate));
        drop(guard);
        assert_eq!(hub.listener_count(), 0);
        assert!(hub.dispatch(&press(KeyCode::Up)).is_empty());
    }

    #[test]
    fn guards_outliving_the_hub_drop_quietly() {
        let hub = KeyboardHub::new();
        let guard = hub.subscribe(PickerId(0), KeySignal::Cancel);
        drop(hub);
        drop(guard);
    }

    #[test]
    fn key_releases_are_ignored() {
        let hub = KeyboardHub::new();
        let _guard = hub.subscribe(PickerId(0), KeySignal::Cancel);
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Esc,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert!(hub.dispatch(&release).is_empty());
    }
}
