//! Component system for the huepick TUI.
//!
//! Components are self-contained UI elements that own their local state,
//! react to input, and render themselves into a provided `Rect`. They never
//! mutate each other; side effects are reported back as [`Effect`]s which the
//! host applies in order.

use crossterm::event::{KeyEvent, MouseEvent};
use huepick_types::{Effect, Msg};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::app::App;

/// A UI component with its own state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Construction**: components are built by their parent with any
///    owner-supplied configuration.
/// 2. **Event Handling**: input reaches the component through
///    `handle_key_events()` and `handle_mouse_events()`; runtime notifications
///    arrive through `handle_message()`.
/// 3. **Rendering**: `render()` draws the component into the provided area and
///    may record layout needed for later hit testing.
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component (or one of its parts) has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events routed to this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free apart from drawing and
    /// remembering the areas they drew into.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while the component is focused.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }
}
