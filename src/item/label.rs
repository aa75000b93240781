//! Text labels: free-standing grid items and canvas titles.
//!
//! Text is measured with fixed em ratios rather than real font metrics;
//! the renderer that actually draws the glyphs owns the font stack.

use super::{CanvasItem, ItemInfo};
use crate::model::{Rect, Size};
use crate::style::{Color, Orientation};

/// Average glyph advance as a fraction of the font size.
pub const AVERAGE_ADVANCE_EM: f64 = 0.5;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_EM: f64 = 1.2;

/// Size of a block of text at unit scale, one line per `\n`.
pub fn measure_text(text: &str, font_size: f64) -> Size {
    let mut lines = 0usize;
    let mut longest = 0usize;
    for line in text.lines() {
        lines += 1;
        longest = longest.max(line.chars().count());
    }
    Size::new(
        longest as f64 * font_size * AVERAGE_ADVANCE_EM,
        lines as f64 * font_size * LINE_HEIGHT_EM,
    )
}

#[derive(Debug, Clone)]
pub struct Label {
    info: ItemInfo,
    text: String,
    font_size: f64,
    font_color: Color,
    background_color: Option<Color>,
    orientation: Orientation,
    bounding: Rect,
}

impl Label {
    pub fn new(text: &str) -> Self {
        Self {
            info: ItemInfo::default(),
            text: text.to_string(),
            font_size: 12.0,
            font_color: Color::BLACK,
            background_color: None,
            orientation: Orientation::Horizontal,
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

    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = color;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_color(&self) -> Color {
        self.font_color
    }

    pub fn set_font_color(&mut self, color: Color) {
        self.font_color = color;
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Measured size in pixels at the current scaling and DPI.
    pub fn scaled_size(&self) -> Size {
        self.measure().scale(self.info.pixel_factor())
    }
}

impl CanvasItem for Label {
    fn info(&self) -> &ItemInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ItemInfo {
        &mut self.info
    }

    fn kind(&self) -> &'static str {
        "Label"
    }

    fn measure(&self) -> Size {
        let text = measure_text(&self.text, self.font_size);
        let size = Size::new(
            text.width + self.info.padding.horizontal(),
            text.height + self.info.padding.vertical(),
        );
        match self.orientation {
            Orientation::Horizontal => size,
            Orientation::Vertical => size.transposed(),
        }
    }

    fn set_bounding_box(&mut self, rect: Rect, scaling: f64) {
        self.info.scaling = scaling;
        let width = if self.info.fixed_width_on_canvas {
            self.scaled_size().width.min(rect.width)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Edges;

    #[test]
    fn measures_longest_line() {
        let size = measure_text("ab\nabcd", 10.0);
        assert!((size.width - 20.0).abs() < 0.001);
        assert!((size.height - 24.0).abs() < 0.001);
    }

    #[test]
    fn vertical_label_swaps_extent() {
        let mut label = Label::new("Revenue").with_font_size(10.0);
        let flat = label.measure();
        label.set_orientation(Orientation::Vertical);
        let upright = label.measure();
        assert!((flat.width - upright.height).abs() < 0.001);
        assert!((flat.height - upright.width).abs() < 0.001);
    }

    #[test]
    fn padding_counts_toward_measure() {
        let label = Label::new("x")
            .with_font_size(10.0)
            .with_info(ItemInfo::default().padding(Edges::uniform(2.0)));
        let size = label.measure();
        assert!((size.width - 9.0).abs() < 0.001);
        assert!((size.height - 16.0).abs() < 0.001);
    }

    #[test]
    fn fixed_width_label_keeps_natural_width() {
        let mut label = Label::new("abcd")
            .with_font_size(10.0)
            .with_info(ItemInfo::default().fixed_width_on_canvas(true));
        label.set_bounding_box(Rect::new(0.0, 0.0, 100.0, 30.0), 2.0);
        assert!((label.bounding_box().width - 40.0).abs() < 0.001);
    }
}
