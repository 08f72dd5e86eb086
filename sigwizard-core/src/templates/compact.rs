//! Compact layout: the Classic skeleton without the divider, tighter spacing.

use super::classic::{palette, two_column, Density};
use super::{Layout, LayoutRenderer, PreviewLabels, RenderContext, Theme};
use crate::record::SignatureRecord;

const COMPACT: Density = Density {
    avatar: 64,
    gutter: 10,
    font_size: 12,
    name_size: 14,
    row_gap: 0,
    section_gap: 6,
    cta_padding: "4px 6px",
    cta_font_size: 11,
    divider: None,
};

pub struct CompactLayout;

impl LayoutRenderer for CompactLayout {
    fn layout(&self) -> Layout {
        Layout::Compact
    }

    fn render(&self, record: &SignatureRecord, theme: Theme, labels: &PreviewLabels) -> String {
        two_column(&RenderContext::new(record, labels), palette(theme), &COMPACT)
    }
}
