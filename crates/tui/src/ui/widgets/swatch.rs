//! Palette swatch: a strip of color bands.
//!
//! `Tile` swatches fill their width with contiguous bands. `Sprite` swatches
//! separate bands with a single blank cell so individual sprite colors read
//! apart. Band widths differ by at most one cell; the leftmost bands take the
//! remainder.

use huepick_types::{HexColor, SwatchVariant};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Widget;

/// Columns used by a swatch inside the trigger.
pub const SWATCH_WIDTH: u16 = 22;
/// Columns used by the empty trigger when no palette resolves.
pub const PLACEHOLDER_WIDTH: u16 = 24;

/// One color band within a swatch, relative to the swatch's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwatchSegment {
    pub offset: u16,
    pub width: u16,
    /// Index into the palette's colors.
    pub color: usize,
}

pub fn swatch_segments(variant: SwatchVariant, color_count: usize, width: u16) -> Vec<SwatchSegment> {
    let count = color_count.min(usize::from(width));
    if count == 0 {
        return Vec::new();
    }
    let count = count as u16;
    let gap = match variant {
        SwatchVariant::Sprite if width >= 2 * count - 1 => 1,
        _ => 0,
    };
    let usable = width - gap * (count - 1);
    let base = usable / count;
    let extra = usable % count;

    let mut offset = 0;
    (0..count)
        .map(|index| {
            let band = base + u16::from(index < extra);
            let segment = SwatchSegment {
                offset,
                width: band,
                color: usize::from(index),
            };
            offset += band + gap;
            segment
        })
        .collect()
}

pub fn to_color(color: HexColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// Swatch rendered as styled spans, for use inside list rows.
pub fn swatch_spans(variant: SwatchVariant, colors: &[HexColor], width: u16) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for segment in swatch_segments(variant, colors.len(), width) {
        if segment.offset > cursor {
            spans.push(Span::raw(" ".repeat(usize::from(segment.offset - cursor))));
        }
        spans.push(Span::styled(
            " ".repeat(usize::from(segment.width)),
            Style::default().bg(to_color(colors[segment.color])),
        ));
        cursor = segment.offset + segment.width;
    }
    if cursor < width {
        spans.push(Span::raw(" ".repeat(usize::from(width - cursor))));
    }
    spans
}

#[derive(Debug, Clone, Copy)]
pub struct Swatch<'a> {
    variant: SwatchVariant,
    colors: &'a [HexColor],
}

impl<'a> Swatch<'a> {
    pub fn new(variant: SwatchVariant, colors: &'a [HexColor]) -> Self {
        Self { variant, colors }
    }
}

impl Widget for Swatch<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        for segment in swatch_segments(self.variant, self.colors.len(), area.width) {
            let color = to_color(self.colors[segment.color]);
            for x in area.x + segment.offset..area.x + segment.offset + segment.width {
                for y in area.top()..area.bottom() {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_symbol(" ").set_bg(color);
                    }
                }
            }
        }
    }
}
