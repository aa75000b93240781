//! Images. A picture never stretches: it is scaled to fit its box with the
//! aspect ratio intact and positioned by its page alignment.

use super::{CanvasItem, ItemInfo};
use crate::model::{safe_divide, Rect, Size};
use crate::style::{align_offset, align_offset_vertical};

#[derive(Debug, Clone)]
pub struct Picture {
    info: ItemInfo,
    /// Intrinsic size at unit scale.
    natural: Size,
    bounding: Rect,
}

impl Picture {
    pub fn new(natural: Size) -> Self {
        Self {
            info: ItemInfo::default(),
            natural,
            bounding: Rect::default(),
        }
    }

    pub fn with_info(mut self, info: ItemInfo) -> Self {
        self.info = info;
        self
    }

    pub fn aspect_ratio(&self) -> f64 {
        safe_divide(self.natural.width, self.natural.height)
    }
}

impl CanvasItem for Picture {
    fn info(&self) -> &ItemInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ItemInfo {
        &mut self.info
    }

    fn kind(&self) -> &'static str {
        "Picture"
    }

    fn measure(&self) -> Size {
        self.natural
    }

    fn set_bounding_box(&mut self, rect: Rect, scaling: f64) {
        self.info.scaling = scaling;
        let fit = f64::min(
            safe_divide(rect.width, self.natural.width),
            safe_divide(rect.height, self.natural.height),
        );
        let size = self.natural.scale(fit);
        let x = if self.info.fixed_width_on_canvas {
            // the canvas positions fixed-width items itself
            rect.x
        } else {
            rect.x + align_offset(rect.width, size.width, self.info.page_horizontal_alignment)
        };
        let y = rect.y + align_offset_vertical(rect.height, size.height, self.info.page_vertical_alignment);
        self.bounding = Rect::new(x, y, size.width, size.height);
    }

    fn bounding_box(&self) -> Rect {
        self.bounding
    }

    fn offset(&mut self, dx: f64, dy: f64) {
        self.bounding = self.bounding.offset(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{HorizontalAlignment, VerticalAlignment};

    #[test]
    fn keeps_aspect_ratio() {
        let mut pic = Picture::new(Size::new(200.0, 100.0));
        pic.set_bounding_box(Rect::new(0.0, 0.0, 100.0, 100.0), 1.0);
        let bbox = pic.bounding_box();
        assert!((bbox.width - 100.0).abs() < 0.001);
        assert!((bbox.height - 50.0).abs() < 0.001);
    }

    #[test]
    fn centered_within_box() {
        let mut pic = Picture::new(Size::new(100.0, 100.0)).with_info(
            ItemInfo::default()
                .page_horizontal_alignment(HorizontalAlignment::Centered)
                .page_vertical_alignment(VerticalAlignment::Centered),
        );
        pic.set_bounding_box(Rect::new(0.0, 0.0, 300.0, 100.0), 1.0);
        let bbox = pic.bounding_box();
        assert!((bbox.x - 100.0).abs() < 0.001);
        assert!((bbox.y - 0.0).abs() < 0.001);
    }

    #[test]
    fn zero_sized_image_collapses() {
        let mut pic = Picture::new(Size::new(0.0, 0.0));
        pic.set_bounding_box(Rect::new(5.0, 5.0, 100.0, 100.0), 1.0);
        assert!(pic.bounding_box().is_empty());
    }
}
