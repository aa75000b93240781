//! # Title Bands
//!
//! Titles sit in four bands around the grid. Each band is as thick as the
//! titles stacked in it (plus spacing), and the grid gets whatever is left.
//!
//! Bands are computed left, top, bottom, then right: the right band aligns
//! its titles within the height the top and bottom bands leave over, so it
//! has to come last.

use serde::{Deserialize, Serialize};

use crate::item::{CanvasItem, Label};
use crate::model::Rect;
use crate::style::{align_offset, align_offset_vertical, Color, Orientation};

/// Titles attached to the canvas, one list per side, in stacking order
/// (outermost first).
#[derive(Debug, Clone, Default)]
pub struct TitleSet {
    pub left: Vec<Label>,
    pub top: Vec<Label>,
    pub bottom: Vec<Label>,
    pub right: Vec<Label>,
}

impl TitleSet {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.top.is_empty() && self.bottom.is_empty() && self.right.is_empty()
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.top.len() + self.bottom.len() + self.right.len()
    }

    /// All titles, in band calculation order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> + '_ {
        self.left
            .iter()
            .chain(self.top.iter())
            .chain(self.bottom.iter())
            .chain(self.right.iter())
    }
}

/// Thickness of each band in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleBands {
    pub left: f64,
    pub top: f64,
    pub bottom: f64,
    pub right: f64,
}

impl TitleBands {
    /// The part of `canvas` not covered by any band. Collapses to zero
    /// size when the bands overlap.
    pub fn shrink(&self, canvas: Rect) -> Rect {
        Rect::from_edges(
            canvas.left() + self.left,
            canvas.top() + self.top,
            canvas.right() - self.right,
            canvas.bottom() - self.bottom,
        )
    }
}

/// Measure and position every title against `canvas` (pixels).
///
/// `spacing` is the pixel gap after each title. Titles whose font color
/// would vanish into `background` are switched to black or white.
pub fn calc_title_bands(
    titles: &mut TitleSet,
    canvas: Rect,
    spacing: f64,
    scaling: f64,
    dpi_scale: f64,
    background: Color,
) -> TitleBands {
    for title in titles
        .left
        .iter_mut()
        .chain(titles.top.iter_mut())
        .chain(titles.bottom.iter_mut())
        .chain(titles.right.iter_mut())
    {
        title.set_scaling(scaling);
        title.set_dpi_scale(dpi_scale);
        if title.font_color().matches(&background) {
            title.set_font_color(background.black_or_white_contrast());
        }
    }

    let mut bands = TitleBands::default();

    for title in &mut titles.left {
        title.set_orientation(Orientation::Vertical);
        let size = title.scaled_size();
        let alignment = title.info().relative_alignment.vertical();
        let y = canvas.y + align_offset_vertical(canvas.height, size.height, alignment);
        title.set_bounding_box(Rect::new(canvas.x + bands.left, y, size.width, size.height), scaling);
        bands.left += size.width + spacing;
    }

    for title in &mut titles.top {
        let size = title.scaled_size();
        let alignment = title.info().relative_alignment.horizontal();
        let x = canvas.x + align_offset(canvas.width, size.width, alignment);
        title.set_bounding_box(Rect::new(x, canvas.y + bands.top, size.width, size.height), scaling);
        bands.top += size.height + spacing;
    }

    let mut position = canvas.bottom() - spacing;
    for title in &mut titles.bottom {
        let size = title.scaled_size();
        let alignment = title.info().relative_alignment.horizontal();
        let x = canvas.x + align_offset(canvas.width, size.width, alignment);
        title.set_bounding_box(Rect::new(x, position - size.height, size.width, size.height), scaling);
        position -= size.height + spacing;
        bands.bottom += size.height + spacing;
    }

    let available = (canvas.height - bands.top - bands.bottom).max(0.0);
    let mut position = canvas.right() - spacing;
    for title in &mut titles.right {
        title.set_orientation(Orientation::Vertical);
        let size = title.scaled_size();
        let alignment = title.info().relative_alignment.vertical();
        let y = canvas.y + bands.top + align_offset_vertical(available, size.height, alignment);
        title.set_bounding_box(Rect::new(position - size.width, y, size.width, size.height), scaling);
        position -= size.width + spacing;
        bands.right += size.width + spacing;
    }

    log::trace!(
        "title bands: left {:.1} top {:.1} bottom {:.1} right {:.1}",
        bands.left,
        bands.top,
        bands.bottom,
        bands.right
    );
    bands
}
