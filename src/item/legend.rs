//! Legends: a column of swatch + text entries that keeps its natural width.

use super::label::measure_text;
use super::{CanvasItem, ItemInfo};
use crate::model::{Rect, Size};

/// Swatch width plus the gap before the entry text, in ems.
const SWATCH_EM: f64 = 1.5;

#[derive(Debug, Clone)]
pub struct Legend {
    info: ItemInfo,
    entries: Vec<String>,
    font_size: f64,
    bounding: Rect,
}

impl Legend {
    /// A legend is fixed-width on the canvas unless told otherwise.
    pub fn new(entries: &[&str]) -> Self {
        Self {
            info: ItemInfo::default().fixed_width_on_canvas(true),
            entries: entries.iter().map(|e| e.to_string()).collect(),
            font_size: 10.0,
            bounding: Rect::default(),
        }
    }

    pub fn with_info(mut self, info: ItemInfo) -> Self {
        self.info = info;
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl CanvasItem for Legend {
    fn info(&self) -> &ItemInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ItemInfo {
        &mut self.info
    }

    fn kind(&self) -> &'static str {
        "Legend"
    }

    fn measure(&self) -> Size {
        let text = measure_text(&self.entries.join("\n"), self.font_size);
        let swatch = if self.entries.is_empty() {
            0.0
        } else {
            self.font_size * SWATCH_EM
        };
        Size::new(
            text.width + swatch + self.info.padding.horizontal(),
            text.height + self.info.padding.vertical(),
        )
    }

    fn set_bounding_box(&mut self, rect: Rect, scaling: f64) {
        self.info.scaling = scaling;
        let width = if self.info.fixed_width_on_canvas {
            (self.measure().width * self.info.pixel_factor()).min(rect.width)
        } else {
            rect.width
        };
        self.bounding = Rect::new(rect.x, rect.y, width, rect.height);
    }

    fn bounding_box(&self) -> Rect {
        self.bounding
    }

    fn offset(&mut self, dx: f64, dy: f64) {
        self.bounding = self.bounding.offset(dx, dy);
    }
}
