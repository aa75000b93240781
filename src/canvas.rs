//! # Canvas
//!
//! The public face of the engine. A [`Canvas`] owns the item grid, the
//! titles around it, and any free-floating overlays, and knows its design
//! ("minimum") size and current size in DIPs.
//!
//! The usual sequence:
//!
//! ```
//! use trellis::{Canvas, Label, Panel};
//! use trellis::model::Size;
//!
//! let mut canvas = Canvas::new();
//! canvas.set_grid_size(2, 1).unwrap();
//! canvas.set_item(0, 0, Panel::new(Size::new(300.0, 200.0)));
//! canvas.set_item(1, 0, Panel::new(Size::new(300.0, 200.0)));
//! canvas.add_top_title(Label::new("Quarterly Revenue"));
//!
//! // once, after the grid is populated
//! canvas.resolve_row_heights().unwrap();
//!
//! // on every resize or export
//! let info = canvas.layout(Size::new(1400.0, 1000.0), 1.0);
//! assert_eq!(info.rows.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::item::{CanvasItem, ItemId, Label};
use crate::layout::align::{align_columns, align_rows};
use crate::layout::columns;
use crate::layout::grid::{GridStore, RowSpec, Slot};
use crate::layout::rows::resolve_row_heights;
use crate::layout::titles::{calc_title_bands, TitleSet};
use crate::layout::{ItemLayoutInfo, LayoutInfo, Placer};
use crate::model::{approx_eq, safe_divide, Point, Rect, Size};
use crate::style::Color;

/// Canvas-wide settings.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Design width in DIPs. The canvas is never laid out narrower.
    pub min_width: f64,
    /// Design height in DIPs. The canvas is never laid out shorter.
    pub min_height: f64,
    /// Keep the design size's aspect ratio when following the window.
    pub maintain_aspect_ratio: bool,
    /// Line up the content areas of items within each row.
    pub align_row_content: bool,
    /// Line up the content areas of items within each column.
    pub align_column_content: bool,
    pub background: Color,
    /// Gap after each title, in DIPs at unit scale.
    pub title_spacing: f64,
    /// Size multiplier per zoom step.
    pub zoom_factor: f64,
    pub max_zoom_level: u32,
    /// Quiet period before a coalesced resize is applied.
    pub resize_quiescence_ms: u64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_width: 700.0,
            min_height: 500.0,
            maintain_aspect_ratio: false,
            align_row_content: false,
            align_column_content: false,
            background: Color::WHITE,
            title_spacing: 2.0,
            zoom_factor: 1.5,
            max_zoom_level: 40,
            resize_quiescence_ms: 100,
        }
    }
}

impl CanvasConfig {
    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }
}

fn validate_min_size(size: Size) -> Result<(), LayoutError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(size.width) && valid(size.height) {
        Ok(())
    } else {
        Err(LayoutError::InvalidMinimumSize {
            width: size.width,
            height: size.height,
        })
    }
}

#[derive(Debug)]
pub struct Canvas {
    config: CanvasConfig,
    /// Current size in DIPs.
    size: Size,
    grid: GridStore,
    titles: TitleSet,
    overlays: Vec<Box<dyn CanvasItem>>,
    last_layout: LayoutInfo,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// An empty canvas at the default 700 × 500 DIP design size.
    pub fn new() -> Self {
        let config = CanvasConfig::default();
        Self {
            size: config.min_size(),
            config,
            grid: GridStore::new(),
            titles: TitleSet::default(),
            overlays: Vec::new(),
            last_layout: LayoutInfo::default(),
        }
    }

    pub fn with_config(config: CanvasConfig) -> Result<Self, LayoutError> {
        validate_min_size(config.min_size())?;
        Ok(Self {
            size: config.min_size(),
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    // ── Size and scaling ────────────────────────────────────────────

    pub fn min_size(&self) -> Size {
        self.config.min_size()
    }

    /// Change the design size.
    ///
    /// Locked rows are sized against the whole canvas, so a new design
    /// height changes what their proportion means. Their proportions are
    /// rescaled to keep the same absolute height, and the difference is
    /// spread over the unlocked rows.
    pub fn set_min_size(&mut self, size: Size) -> Result<(), LayoutError> {
        validate_min_size(size)?;
        let scale = safe_divide(self.config.min_height, size.height);
        let (_, specs) = self.grid.split_mut();
        let mut difference = 0.0;
        let mut unlocked = 0usize;
        for spec in specs.iter_mut() {
            if spec.lock_proportion {
                let adjusted = spec.height_proportion * scale;
                difference += spec.height_proportion - adjusted;
                spec.height_proportion = adjusted;
            } else {
                unlocked += 1;
            }
        }
        let per_row = safe_divide(difference, unlocked as f64);
        for spec in specs.iter_mut().filter(|s| !s.lock_proportion) {
            spec.height_proportion += per_row;
        }

        log::debug!(
            "design size {}x{} -> {}x{}",
            self.config.min_width,
            self.config.min_height,
            size.width,
            size.height
        );
        self.config.min_width = size.width;
        self.config.min_height = size.height;
        Ok(())
    }

    /// Current size in DIPs.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the current size in DIPs. Takes effect on the next layout pass,
    /// which also clamps it to the design size.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// How much bigger than its design width the canvas is drawn, never
    /// below 1.0.
    pub fn scaling(&self) -> f64 {
        safe_divide(self.size.width, self.config.min_width).max(1.0)
    }

    pub fn is_at_design_size(&self) -> bool {
        approx_eq(self.scaling(), 1.0)
    }

    /// Snap the current size back to the design size (scaling 1.0).
    pub fn reset_to_design_size(&mut self) {
        self.size = self.min_size();
    }

    /// The canvas in pixels at `dpi_scale`.
    pub fn canvas_rect(&self, dpi_scale: f64) -> Rect {
        Rect::from_size(self.size.scale(dpi_scale))
    }

    pub fn background(&self) -> Color {
        self.config.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.config.background = color;
    }

    pub fn set_row_content_aligned(&mut self, aligned: bool) {
        self.config.align_row_content = aligned;
    }

    pub fn set_column_content_aligned(&mut self, aligned: bool) {
        self.config.align_column_content = aligned;
    }

    pub fn set_maintain_aspect_ratio(&mut self, maintain: bool) {
        self.config.maintain_aspect_ratio = maintain;
    }

    // ── Grid ────────────────────────────────────────────────────────

    /// Resize the grid. Items inside the new bounds survive; every row's
    /// height proportion is reset to an even split.
    pub fn set_grid_size(&mut self, rows: usize, columns: usize) -> Result<(), LayoutError> {
        if rows > 0 && columns == 0 {
            return Err(LayoutError::InvalidGridSize { rows, columns });
        }
        self.grid.resize(rows, columns);
        Ok(())
    }

    /// `(rows, columns)`.
    pub fn grid_size(&self) -> (usize, usize) {
        self.grid.size()
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    /// Place `item` at `(row, column)`, growing the grid if needed. Returns
    /// the item previously in that slot.
    pub fn set_item<I: CanvasItem + 'static>(&mut self, row: usize, column: usize, item: I) -> Slot {
        self.set_slot(row, column, Some(Box::new(item)))
    }

    /// Store a boxed item, or clear the slot with `None`.
    ///
    /// A fixed-width item's width proportion is set from its measured width
    /// against the design width. Column widths are renormalized once the
    /// row is full, or right away when the new item is fixed-width.
    pub fn set_slot(&mut self, row: usize, column: usize, mut slot: Slot) -> Slot {
        let mut fixed = false;
        if let Some(item) = slot.as_mut() {
            if item.is_fixed_width_on_canvas() {
                let proportion = safe_divide(
                    item.measure().width + item.canvas_margins().horizontal(),
                    self.config.min_width,
                );
                item.set_canvas_width_proportion(proportion);
                fixed = true;
            }
        }
        let previous = self.grid.set(row, column, slot);
        if fixed || self.grid.is_row_full(row) {
            self.calc_column_widths(row);
        }
        previous
    }

    pub fn item(&self, row: usize, column: usize) -> Option<&dyn CanvasItem> {
        self.grid.get(row, column)
    }

    pub fn item_mut(&mut self, row: usize, column: usize) -> Option<&mut Box<dyn CanvasItem>> {
        self.grid.get_mut(row, column)
    }

    pub fn row_info(&self, row: usize) -> Option<&RowSpec> {
        self.grid.spec(row)
    }

    pub fn row_info_mut(&mut self, row: usize) -> Option<&mut RowSpec> {
        self.grid.spec_mut(row)
    }

    /// Renormalize one row's width proportions so they sum to 1.0.
    pub fn calc_column_widths(&mut self, row: usize) {
        if let Some(slots) = self.grid.row_mut(row) {
            columns::calc_column_widths(slots);
        }
    }

    /// Derive row heights from content. Call once the grid is populated.
    ///
    /// Only meaningful at design size, where measured DIPs and proportions
    /// of the design size agree.
    pub fn resolve_row_heights(&mut self) -> Result<(), LayoutError> {
        if !self.is_at_design_size() {
            return Err(LayoutError::NotAtDesignSize {
                scaling: self.scaling(),
            });
        }
        let min_size = self.min_size();
        resolve_row_heights(&mut self.grid, min_size);
        Ok(())
    }

    /// Look an item up by id in the grid, then the overlays.
    pub fn find_item(&self, id: ItemId) -> Option<&dyn CanvasItem> {
        self.grid.find(id).or_else(|| {
            self.overlays
                .iter()
                .map(|item| &**item)
                .find(|item| item.id() == Some(id))
        })
    }

    pub fn find_item_mut(&mut self, id: ItemId) -> Option<&mut Box<dyn CanvasItem>> {
        if self.grid.find(id).is_some() {
            return self.grid.find_mut(id);
        }
        self.overlays.iter_mut().find(|item| item.id() == Some(id))
    }

    // ── Titles ──────────────────────────────────────────────────────

    pub fn add_left_title(&mut self, title: Label) {
        self.titles.left.push(title);
    }

    pub fn add_top_title(&mut self, title: Label) {
        self.titles.top.push(title);
    }

    pub fn add_bottom_title(&mut self, title: Label) {
        self.titles.bottom.push(title);
    }

    pub fn add_right_title(&mut self, title: Label) {
        self.titles.right.push(title);
    }

    pub fn titles(&self) -> &TitleSet {
        &self.titles
    }

    pub fn clear_titles(&mut self) {
        self.titles = TitleSet::default();
    }

    // ── Overlays ────────────────────────────────────────────────────

    /// Add a free-floating item drawn above the grid. The canvas scales it
    /// but never moves it.
    pub fn add_overlay<I: CanvasItem + 'static>(&mut self, item: I) {
        self.overlays.push(Box::new(item));
    }

    pub fn overlays(&self) -> &[Box<dyn CanvasItem>] {
        &self.overlays
    }

    /// The topmost overlay under `point`.
    pub fn find_overlay_at(&self, point: Point) -> Option<&dyn CanvasItem> {
        self.overlays
            .iter()
            .rev()
            .map(|item| &**item)
            .find(|item| item.hit_test(point))
    }

    // ── Layout ──────────────────────────────────────────────────────

    /// Resize to `surface` (DIPs) and lay everything out at `dpi_scale`
    /// pixels per DIP.
    pub fn layout(&mut self, surface: Size, dpi_scale: f64) -> &LayoutInfo {
        self.size = surface;
        self.relayout(dpi_scale)
    }

    /// Lay everything out at the current size.
    pub fn relayout(&mut self, dpi_scale: f64) -> &LayoutInfo {
        let min = self.min_size();
        self.size = Size::new(self.size.width.max(min.width), self.size.height.max(min.height));

        let scaling = self.scaling();
        let canvas = self.canvas_rect(dpi_scale);
        let spacing = self.config.title_spacing * scaling * dpi_scale;
        let bands = calc_title_bands(
            &mut self.titles,
            canvas,
            spacing,
            scaling,
            dpi_scale,
            self.config.background,
        );
        let grid_rect = bands.shrink(canvas);
        log::debug!(
            "layout pass: canvas {:.0}x{:.0}px scaling {scaling:.3} grid {:.0}x{:.0}px",
            canvas.width,
            canvas.height,
            grid_rect.width,
            grid_rect.height
        );

        for item in self.grid.items_mut() {
            item.set_content_bounds(Default::default());
            item.set_dpi_scale(dpi_scale);
            item.set_scaling(scaling);
        }

        let rows = Placer::new(canvas, grid_rect, scaling, dpi_scale).place(&mut self.grid);

        if self.config.align_row_content {
            align_rows(&mut self.grid);
        }
        let column_alignment = self
            .config
            .align_column_content
            .then(|| align_columns(&mut self.grid));

        for overlay in &mut self.overlays {
            overlay.set_dpi_scale(dpi_scale);
            overlay.set_scaling(scaling);
            overlay.recalc_sizes();
        }

        self.last_layout = LayoutInfo {
            canvas,
            grid: grid_rect,
            scaling,
            dpi_scale,
            title_bands: bands,
            rows,
            items: LayoutInfo::grid_items(&self.grid),
            titles: self.titles.iter().map(|t| ItemLayoutInfo::from_item(t)).collect(),
            overlays: self
                .overlays
                .iter()
                .map(|o| ItemLayoutInfo::from_item(&**o))
                .collect(),
            column_alignment,
        };
        &self.last_layout
    }

    /// Snapshot of the last layout pass.
    pub fn layout_info(&self) -> &LayoutInfo {
        &self.last_layout
    }

    /// The last layout pass as pretty-printed JSON.
    pub fn layout_info_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.last_layout)
    }
}
