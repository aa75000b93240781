//! Panels: the general "plot or table" item.
//!
//! A panel fills whatever box it is given and reports a content rectangle
//! (the box minus scaled padding) that the alignment passes can tighten.
//! When the right content edge is pulled in, the panel drops the unused
//! strip on its right so the row can close the gap.

use super::{CanvasItem, ItemInfo};
use crate::model::{Rect, Size};

#[derive(Debug, Clone)]
pub struct Panel {
    info: ItemInfo,
    /// Natural content size at unit scale, padding excluded.
    min_content: Size,
    /// Box handed over by the canvas; recalculation always starts here.
    allocated: Rect,
    bounding: Rect,
    content: Rect,
}

impl Panel {
    pub fn new(min_content: Size) -> Self {
        Self {
            info: ItemInfo::default(),
            min_content,
            allocated: Rect::default(),
            bounding: Rect::default(),
            content: Rect::default(),
        }
    }

    pub fn with_info(mut self, info: ItemInfo) -> Self {
        self.info = info;
        self
    }

    fn layout_content(&mut self) {
        let padding = self.info.padding.scale(self.info.pixel_factor());
        let bounds = self.info.content_bounds;
        self.bounding = self.allocated;
        self.content = bounds.apply(self.allocated.deflate(&padding));
        if bounds.right.is_some() {
            let trimmed = self.content.right() + padding.right - self.bounding.x;
            self.bounding.width = trimmed.clamp(0.0, self.allocated.width);
        }
    }
}

impl CanvasItem for Panel {
    fn info(&self) -> &ItemInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ItemInfo {
        &mut self.info
    }

    fn kind(&self) -> &'static str {
        "Panel"
    }

    fn measure(&self) -> Size {
        Size::new(
            self.min_content.width + self.info.padding.horizontal(),
            self.min_content.height + self.info.padding.vertical(),
        )
    }

    fn set_bounding_box(&mut self, rect: Rect, scaling: f64) {
        self.info.scaling = scaling;
        self.allocated = rect;
        if self.info.fixed_width_on_canvas {
            let natural = self.measure().width * self.info.pixel_factor();
            self.allocated.width = natural.min(rect.width);
        }
        self.layout_content();
    }

    fn bounding_box(&self) -> Rect {
        self.bounding
    }

    fn content_rect(&self) -> Option<Rect> {
        Some(self.content)
    }

    fn recalc_sizes(&mut self) {
        self.layout_content();
    }

    fn offset(&mut self, dx: f64, dy: f64) {
        self.allocated = self.allocated.offset(dx, dy);
        self.bounding = self.bounding.offset(dx, dy);
        self.content = self.content.offset(dx, dy);
    }
}
