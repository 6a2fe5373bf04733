use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Surface of a floating popover.
pub fn popover_block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    block(theme, title, focused).style(Style::default().bg(theme.roles().popover_bg).fg(theme.roles().text))
}

/// Trigger button surface: hover lightens the background, focus swaps the
/// border for the highlight color and uses the active background.
pub fn trigger_block<'a, T: Theme + ?Sized>(theme: &'a T, focused: bool, hovered: bool) -> Block<'a> {
    let roles = theme.roles();
    let background = if focused {
        roles.input_active_bg
    } else if hovered {
        roles.input_hover_bg
    } else {
        roles.input_bg
    };
    let border = if focused {
        Style::default().fg(roles.focus).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(roles.input_border)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Thick } else { BorderType::Rounded })
        .border_style(border)
        .style(Style::default().bg(background).fg(roles.text))
}

/// Build hint spans `(key, description)` for the hint bar.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}
