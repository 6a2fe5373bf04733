//! Presentation shell: a pure projection from selection state to what the
//! button draws, plus the trigger drawing itself.

use huepick_catalog::PaletteCatalog;
use huepick_types::{HexColor, Palette, PaletteId, PickerOptions, SwatchVariant};
use ratatui::Frame;
use ratatui::layout::Rect;

use super::controller::SelectionState;
use crate::ui::theme::{Theme, theme_helpers as th};
use crate::ui::widgets::swatch::{PLACEHOLDER_WIDTH, SWATCH_WIDTH, Swatch};

/// Rows taken by the trigger (border, swatch, border).
pub const TRIGGER_HEIGHT: u16 = 3;

/// Distance from the trigger's top edge to the popover's top edge.
pub const POPOVER_OFFSET_Y: u16 = TRIGGER_HEIGHT;

/// What the trigger shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerContent {
    Swatch { variant: SwatchVariant, colors: Vec<HexColor> },
    /// Fixed-width empty box shown when nothing resolves.
    Placeholder,
}

impl TriggerContent {
    pub fn width(&self) -> u16 {
        match self {
            TriggerContent::Swatch { .. } => SWATCH_WIDTH,
            TriggerContent::Placeholder => PLACEHOLDER_WIDTH,
        }
    }
}

/// Props for the mounted popover list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverDescriptor {
    pub options: PickerOptions,
    pub value: Option<PaletteId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDescriptor {
    pub trigger: TriggerContent,
    pub trigger_focused: bool,
    /// Present only while open; the popover is mounted exactly when this is `Some`.
    pub popover: Option<PopoverDescriptor>,
}

impl RenderDescriptor {
    /// Outer size of the trigger including its border.
    pub fn trigger_size(&self) -> (u16, u16) {
        (self.trigger.width() + 2, TRIGGER_HEIGHT)
    }
}

/// The identifier to preview: the value when set, otherwise the fallback.
/// Empty identifiers count as unset.
pub fn preview_id<'a>(value: Option<&'a PaletteId>, fallback: Option<&'a PaletteId>) -> Option<&'a PaletteId> {
    value
        .and_then(PaletteId::non_empty)
        .or_else(|| fallback.and_then(PaletteId::non_empty))
}

/// Look the preview palette up in the catalog. Called on every render.
pub fn resolve_preview(
    catalog: &dyn PaletteCatalog,
    value: Option<&PaletteId>,
    fallback: Option<&PaletteId>,
) -> Option<Palette> {
    preview_id(value, fallback).and_then(|id| catalog.lookup(id))
}

pub fn project(
    state: SelectionState,
    options: &PickerOptions,
    value: Option<&PaletteId>,
    resolved: Option<&Palette>,
) -> RenderDescriptor {
    let trigger = match resolved {
        Some(palette) => TriggerContent::Swatch {
            variant: options.swatch_variant,
            colors: palette.colors.clone(),
        },
        None => TriggerContent::Placeholder,
    };
    let popover = state.is_open.then(|| PopoverDescriptor {
        options: options.clone(),
        value: value.cloned(),
    });
    RenderDescriptor {
        trigger,
        trigger_focused: state.trigger_has_focus,
        popover,
    }
}

/// Draw the trigger into `area`, which should match [`RenderDescriptor::trigger_size`].
pub fn draw_trigger(frame: &mut Frame, area: Rect, descriptor: &RenderDescriptor, theme: &dyn Theme, hovered: bool) {
    let block = th::trigger_block(theme, descriptor.trigger_focused, hovered);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if let TriggerContent::Swatch { variant, colors } = &descriptor.trigger {
        let swatch_area = Rect {
            width: inner.width.min(SWATCH_WIDTH),
            height: inner.height.min(1),
            ..inner
        };
        frame.render_widget(Swatch::new(*variant, colors), swatch_area);
    }
}

#[cfg(test)]
mod tests {
    use huepick_catalog::PaletteStore;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;

    use super::*;
    use crate::ui::theme::NordTheme;

    fn catalog() -> PaletteStore {
        PaletteStore::from_palettes([
            Palette::new("p1", "Mono", vec![HexColor::new(0, 0, 0), HexColor::new(255, 255, 255)]),
            Palette::new("fallback", "Fallback", vec![HexColor::new(255, 0, 0)]),
        ])
        .unwrap()
    }

    fn closed() -> SelectionState {
        SelectionState::default()
    }

    #[test]
    fn value_resolves_to_a_tile_swatch() {
        let catalog = catalog();
        let options = PickerOptions::new("background").with_variant(SwatchVariant::Tile);
        let value = PaletteId::from("p1");
        let resolved = resolve_preview(&catalog, Some(&value), options.fallback_value());
        let descriptor = project(closed(), &options, Some(&value), resolved.as_ref());
        assert_eq!(
            descriptor.trigger,
            TriggerContent::Swatch {
                variant: SwatchVariant::Tile,
                colors: vec![HexColor::parse("#000").unwrap(), HexColor::parse("#fff").unwrap()],
            }
        );
    }

    #[test]
    fn absent_value_previews_the_fallback() {
        let catalog = catalog();
        let options = PickerOptions::new("sprite")
            .with_variant(SwatchVariant::Sprite)
            .with_optional(None, Some(PaletteId::from("fallback")));
        for value in [None, Some(PaletteId::empty())] {
            let resolved = resolve_preview(&catalog, value.as_ref(), options.fallback_value());
            let descriptor = project(closed(), &options, value.as_ref(), resolved.as_ref());
            assert_eq!(
                descriptor.trigger,
                TriggerContent::Swatch {
                    variant: SwatchVariant::Sprite,
                    colors: vec![HexColor::new(255, 0, 0)],
                }
            );
        }
    }

    #[test]
    fn unresolvable_ids_render_the_placeholder() {
        let catalog = catalog();
        let options = PickerOptions::new("x").with_optional(None, Some(PaletteId::from("missing-too")));
        let value = PaletteId::from("missing");
        let resolved = resolve_preview(&catalog, Some(&value), options.fallback_value());
        let descriptor = project(closed(), &options, Some(&value), resolved.as_ref());
        assert_eq!(descriptor.trigger, TriggerContent::Placeholder);
        assert_eq!(descriptor.trigger_size(), (PLACEHOLDER_WIDTH + 2, TRIGGER_HEIGHT));
    }

    #[test]
    fn set_value_is_preferred_over_fallback_even_when_unresolved() {
        let value = PaletteId::from("missing");
        let fallback = PaletteId::from("fallback");
        assert_eq!(preview_id(Some(&value), Some(&fallback)), Some(&value));
        assert_eq!(resolve_preview(&catalog(), Some(&value), Some(&fallback)), None);
    }

    #[test]
    fn popover_is_projected_only_while_open() {
        let options = PickerOptions::new("background");
        let value = PaletteId::from("p1");
        assert!(project(closed(), &options, Some(&value), None).popover.is_none());

        let open = SelectionState {
            is_open: true,
            trigger_has_focus: false,
        };
        let descriptor = project(open, &options, Some(&value), None);
        assert_eq!(
            descriptor.popover,
            Some(PopoverDescriptor {
                options: options.clone(),
                value: Some(value),
            })
        );
        assert!(!descriptor.trigger_focused);
    }

    #[test]
    fn trigger_draws_swatch_colors_inside_its_border() {
        let descriptor = RenderDescriptor {
            trigger: TriggerContent::Swatch {
                variant: SwatchVariant::Tile,
                colors: vec![HexColor::new(0, 0, 0), HexColor::new(255, 255, 255)],
            },
            trigger_focused: false,
            popover: None,
        };
        let (width, height) = descriptor.trigger_size();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = NordTheme::new();
        terminal
            .draw(|frame| draw_trigger(frame, Rect::new(0, 0, width, height), &descriptor, &theme, false))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(1, 1)].bg, Color::Rgb(0, 0, 0));
        assert_eq!(buffer[(SWATCH_WIDTH, 1)].bg, Color::Rgb(255, 255, 255));
    }
}
