//! An empty cell that still takes its share of the row.

use super::{CanvasItem, ItemInfo};
use crate::model::{Rect, Size};

#[derive(Debug, Clone, Default)]
pub struct Spacer {
    info: ItemInfo,
    bounding: Rect,
}

impl Spacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info(mut self, info: ItemInfo) -> Self {
        self.info = info;
        self
    }
}

impl CanvasItem for Spacer {
    fn info(&self) -> &ItemInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ItemInfo {
        &mut self.info
    }

    fn kind(&self) -> &'static str {
        "Spacer"
    }

    fn measure(&self) -> Size {
        Size::default()
    }

    fn set_bounding_box(&mut self, rect: Rect, scaling: f64) {
        self.info.scaling = scaling;
        self.bounding = rect;
    }

    fn bounding_box(&self) -> Rect {
        self.bounding
    }

    fn offset(&mut self, dx: f64, dy: f64) {
        self.bounding = self.bounding.offset(dx, dy);
    }
}
