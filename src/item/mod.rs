//! # Canvas Items
//!
//! Anything placed on the canvas implements [`CanvasItem`]. The layout
//! engine only ever talks to items through this trait: it asks them how big
//! they want to be at unit scale, hands them a box, and asks them to
//! recalculate. Drawing is somebody else's job.
//!
//! The per-item knobs the placer reads (margins, fit flags, width share,
//! alignment) live in [`ItemInfo`], which every item carries. The trait's
//! provided methods read and write it so concrete items only implement the
//! geometry.
//!
//! Concrete items:
//! - [`Label`] — free text and canvas titles
//! - [`Panel`] — plots, tables, anything with a content region
//! - [`Legend`] — a fixed-width list of entries
//! - [`Picture`] — an image that keeps its aspect ratio
//! - [`Spacer`] — takes up a cell, draws nothing

pub mod label;
pub mod legend;
pub mod panel;
pub mod picture;
pub mod spacer;

pub use label::Label;
pub use legend::Legend;
pub use panel::Panel;
pub use picture::Picture;
pub use spacer::Spacer;

use std::fmt;

use crate::model::{Edges, Point, Rect, Size};
use crate::style::{HorizontalAlignment, RelativeAlignment, VerticalAlignment};

/// Identifier used to look items up after they are handed to the canvas.
pub type ItemId = u64;

/// Content-edge overrides applied by the row/column alignment passes.
///
/// Values are absolute canvas coordinates (pixels). `None` means the item
/// uses its own edge. The canvas clears these at the start of every pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContentBounds {
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
}

impl ContentBounds {
    /// Tighten `rect` to the overrides. An override can only move an edge
    /// inward, never grow the rectangle.
    pub fn apply(&self, rect: Rect) -> Rect {
        let left = self.left.map_or(rect.left(), |l| l.max(rect.left()));
        let top = self.top.map_or(rect.top(), |t| t.max(rect.top()));
        let right = self.right.map_or(rect.right(), |r| r.min(rect.right()));
        let bottom = self.bottom.map_or(rect.bottom(), |b| b.min(rect.bottom()));
        Rect::from_edges(left, top, right, bottom)
    }

    pub fn is_clear(&self) -> bool {
        *self == ContentBounds::default()
    }
}

/// Layout-facing settings shared by every item.
///
/// Built with chained setters, the same way callers configure an item
/// before placing it:
///
/// ```
/// use trellis::item::ItemInfo;
/// use trellis::model::Edges;
///
/// let info = ItemInfo::default()
///     .id(7)
///     .canvas_margins(Edges::uniform(5.0))
///     .fit_row_to_content(true);
/// assert_eq!(info.id, Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct ItemInfo {
    pub id: Option<ItemId>,
    /// Space inside the item's box, around its content (DIPs at unit scale).
    pub padding: Edges,
    /// Space the canvas leaves around the item's box (DIPs at unit scale).
    pub canvas_margins: Edges,
    /// Row height follows this item's measured height.
    pub fit_row_to_content: bool,
    /// Item keeps its measured width instead of stretching to its column.
    pub fixed_width_on_canvas: bool,
    /// Share (0..1) of the grid width this item's column takes.
    pub canvas_width_proportion: f64,
    /// Optional share of the grid height, overriding the row height.
    pub canvas_height_proportion: Option<f64>,
    pub page_horizontal_alignment: HorizontalAlignment,
    pub page_vertical_alignment: VerticalAlignment,
    /// Alignment used when the item is a canvas title.
    pub relative_alignment: RelativeAlignment,
    pub content_bounds: ContentBounds,
    /// Canvas scaling applied at the last placement.
    pub scaling: f64,
    /// Pixels per DIP applied at the last placement.
    pub dpi_scale: f64,
}

impl Default for ItemInfo {
    fn default() -> Self {
        Self {
            id: None,
            padding: Edges::default(),
            canvas_margins: Edges::default(),
            fit_row_to_content: false,
            fixed_width_on_canvas: false,
            canvas_width_proportion: 1.0,
            canvas_height_proportion: None,
            page_horizontal_alignment: HorizontalAlignment::default(),
            page_vertical_alignment: VerticalAlignment::default(),
            relative_alignment: RelativeAlignment::default(),
            content_bounds: ContentBounds::default(),
            scaling: 1.0,
            dpi_scale: 1.0,
        }
    }
}

impl ItemInfo {
    pub fn id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn canvas_margins(mut self, margins: Edges) -> Self {
        self.canvas_margins = margins;
        self
    }

    pub fn fit_row_to_content(mut self, fit: bool) -> Self {
        self.fit_row_to_content = fit;
        self
    }

    pub fn fixed_width_on_canvas(mut self, fixed: bool) -> Self {
        self.fixed_width_on_canvas = fixed;
        self
    }

    pub fn canvas_width_proportion(mut self, proportion: f64) -> Self {
        self.canvas_width_proportion = proportion;
        self
    }

    pub fn canvas_height_proportion(mut self, proportion: f64) -> Self {
        self.canvas_height_proportion = Some(proportion);
        self
    }

    pub fn page_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.page_horizontal_alignment = alignment;
        self
    }

    pub fn page_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.page_vertical_alignment = alignment;
        self
    }

    pub fn relative_alignment(mut self, alignment: RelativeAlignment) -> Self {
        self.relative_alignment = alignment;
        self
    }

    /// Multiplier from DIPs at unit scale to pixels at the current placement.
    pub fn pixel_factor(&self) -> f64 {
        self.scaling * self.dpi_scale
    }
}

/// The contract between the layout engine and anything it places.
///
/// Sizes from [`measure`](CanvasItem::measure) are in DIPs at unit scale and
/// exclude canvas margins. Rectangles passed to and returned from the
/// bounding-box methods are in pixels and also exclude canvas margins.
pub trait CanvasItem: fmt::Debug {
    fn info(&self) -> &ItemInfo;

    fn info_mut(&mut self) -> &mut ItemInfo;

    /// Short type name used in layout snapshots.
    fn kind(&self) -> &'static str;

    /// Natural size at scaling 1.0, padding included.
    fn measure(&self) -> Size;

    /// Assign the item's box. A fixed-width item may end up narrower than
    /// `rect`; [`bounding_box`](CanvasItem::bounding_box) reports what it took.
    fn set_bounding_box(&mut self, rect: Rect, scaling: f64);

    fn bounding_box(&self) -> Rect;

    /// The meaningful inner region (e.g. a plot's data area), if the item
    /// has one.
    fn content_rect(&self) -> Option<Rect> {
        None
    }

    /// Recompute internal layout after the box or content bounds changed.
    fn recalc_sizes(&mut self) {}

    fn offset(&mut self, dx: f64, dy: f64);

    fn hit_test(&self, point: Point) -> bool {
        self.bounding_box().contains(point)
    }

    fn id(&self) -> Option<ItemId> {
        self.info().id
    }

    fn canvas_margins(&self) -> Edges {
        self.info().canvas_margins
    }

    fn is_fixed_width_on_canvas(&self) -> bool {
        self.info().fixed_width_on_canvas
    }

    fn is_fitting_row_to_content(&self) -> bool {
        self.info().fit_row_to_content
    }

    fn canvas_width_proportion(&self) -> f64 {
        self.info().canvas_width_proportion
    }

    fn set_canvas_width_proportion(&mut self, proportion: f64) {
        self.info_mut().canvas_width_proportion = proportion;
    }

    fn canvas_height_proportion(&self) -> Option<f64> {
        self.info().canvas_height_proportion
    }

    fn page_horizontal_alignment(&self) -> HorizontalAlignment {
        self.info().page_horizontal_alignment
    }

    fn set_scaling(&mut self, scaling: f64) {
        self.info_mut().scaling = scaling;
    }

    fn set_dpi_scale(&mut self, dpi_scale: f64) {
        self.info_mut().dpi_scale = dpi_scale;
    }

    fn content_bounds(&self) -> ContentBounds {
        self.info().content_bounds
    }

    fn set_content_bounds(&mut self, bounds: ContentBounds) {
        self.info_mut().content_bounds = bounds;
    }
}
