//! # Grid Layout Engine
//!
//! Turns the grid's proportions into pixel rectangles.
//!
//! ## How a pass works
//!
//! The row proportions were decided once, at design size, by
//! [`rows::resolve_row_heights`]. Every pass after that is cheap and purely
//! proportional:
//!
//! 1. Titles claim their bands around the canvas ([`titles`]). What is left
//!    is the grid rectangle.
//! 2. Rows are stacked top to bottom, each `grid height × proportion` tall.
//!    A locked row is sized against the whole canvas instead, and the rows
//!    above it give up the difference.
//! 3. Inside a row, items are placed left to right, `grid width × width
//!    proportion` wide, minus their canvas margins.
//! 4. A fixed-width item that comes back narrower than its slot hands the
//!    unused width to its neighbours (see [`columns::split_surplus`]), so a
//!    row always spans the full grid width.
//! 5. Optionally, content areas are lined up across rows and columns
//!    ([`align`]).
//!
//! Items only ever see the rectangle they're handed. The placer keeps no
//! geometry of its own beyond the per-row summary it returns.

pub mod align;
pub mod columns;
pub mod grid;
pub mod rows;
pub mod titles;

use serde::Serialize;

use crate::item::{CanvasItem, ItemId};
use crate::model::{safe_divide, Rect};

use self::align::ColumnAlignment;
use self::columns::split_surplus;
use self::grid::{GridStore, Slot};
use self::titles::TitleBands;

/// Where a row ended up after a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowLayout {
    pub index: usize,
    /// Top edge in pixels.
    pub y: f64,
    pub height: f64,
    pub proportion: f64,
    pub locked: bool,
}

/// Places every grid item for one canvas and pixel density.
#[derive(Debug, Clone, Copy)]
pub struct Placer {
    /// The whole canvas in pixels.
    pub canvas: Rect,
    /// The canvas minus title bands, in pixels.
    pub grid: Rect,
    pub scaling: f64,
    pub dpi_scale: f64,
}

impl Placer {
    pub fn new(canvas: Rect, grid: Rect, scaling: f64, dpi_scale: f64) -> Self {
        Self {
            canvas,
            grid,
            scaling,
            dpi_scale,
        }
    }

    /// DIPs at unit scale to pixels at this placement.
    fn pixel_factor(&self) -> f64 {
        self.scaling * self.dpi_scale
    }

    /// Run the row and column placement over the whole grid.
    pub fn place(&self, grid: &mut GridStore) -> Vec<RowLayout> {
        let factor = self.pixel_factor();
        let (rows, specs) = grid.split_mut();
        let mut layouts: Vec<RowLayout> = Vec::with_capacity(rows.len());
        let mut offset = 0.0;

        for index in 0..rows.len() {
            let spec = specs[index];
            let grid_height = self.grid.height * spec.height_proportion;
            let mut height = grid_height;

            if spec.lock_proportion {
                let margins = rows[index]
                    .first()
                    .and_then(|slot| slot.as_deref())
                    .map_or(0.0, |item| item.canvas_margins().scale(factor).vertical());
                height = self.canvas.height * spec.height_proportion + margins;

                if index > 0 {
                    let diff = height - grid_height;
                    offset -= diff;
                    let per_row = safe_divide(diff, index as f64);
                    log::debug!(
                        "row {index} is locked to the canvas: taking {diff:.2}px from {index} rows above"
                    );
                    for (k, previous) in rows[..index].iter_mut().enumerate() {
                        let shift = per_row * k as f64;
                        for item in previous.iter_mut().flatten() {
                            let bbox = item.bounding_box();
                            let resized = Rect {
                                y: bbox.y - shift,
                                height: (bbox.height - per_row).max(0.0),
                                ..bbox
                            };
                            item.set_bounding_box(resized, self.scaling);
                            item.recalc_sizes();
                        }
                    }
                    for (k, row_layout) in layouts.iter_mut().enumerate() {
                        row_layout.y -= per_row * k as f64;
                        row_layout.height = (row_layout.height - per_row).max(0.0);
                    }
                }
            }

            let y = self.grid.y + offset;
            log::debug!(
                "row {index}: y {y:.2} height {height:.2} proportion {:.4}{}",
                spec.height_proportion,
                if spec.lock_proportion { " (locked)" } else { "" }
            );
            self.place_row(&mut rows[index], y, height);

            layouts.push(RowLayout {
                index,
                y,
                height,
                proportion: spec.height_proportion,
                locked: spec.lock_proportion,
            });
            offset += height;
        }

        layouts
    }

    /// Lay out one row's items left to right starting at `y`.
    fn place_row(&self, row: &mut [Slot], y: f64, row_height: f64) {
        let factor = self.pixel_factor();
        let mut x = 0.0;
        let mut carried = 0.0;

        for column in 0..row.len() {
            let (before, rest) = row.split_at_mut(column);
            let (current, after) = rest.split_at_mut(1);
            let Some(item) = current[0].as_mut() else {
                continue;
            };

            let height = item
                .canvas_height_proportion()
                .map_or(row_height, |p| p * self.grid.height);
            let mut outer = Rect::new(
                self.grid.x + x,
                y,
                self.grid.width * item.canvas_width_proportion() + carried,
                height,
            );
            let inner = outer.deflate(&item.canvas_margins().scale(factor));
            item.set_bounding_box(inner, self.scaling);

            let measured = item.bounding_box();
            let mut handed_back = 0.0;
            if item.is_fixed_width_on_canvas() && measured.width < inner.width {
                let surplus = inner.width - measured.width;
                let previous = before.iter().flatten().count();
                let following = after.iter().flatten().count();
                let split = split_surplus(surplus, previous, following, item.page_horizontal_alignment());
                carried += split.per_following;
                handed_back = split.previous;

                item.set_bounding_box(
                    Rect {
                        x: inner.x + split.previous,
                        width: measured.width,
                        ..inner
                    },
                    self.scaling,
                );
                outer.width -= surplus;

                if split.previous > 0.0 {
                    let share = split.previous / previous as f64;
                    for (k, earlier) in before.iter_mut().flatten().enumerate() {
                        let bbox = earlier.bounding_box();
                        let widened = Rect {
                            x: bbox.x + share * k as f64,
                            width: bbox.width + share,
                            ..bbox
                        };
                        earlier.set_bounding_box(widened, self.scaling);
                        earlier.recalc_sizes();
                    }
                }
            }
            x += outer.width + handed_back;

            item.recalc_sizes();
            log::trace!("  column {column}: {} {:?}", item.kind(), item.bounding_box());
        }
    }
}

// ── Serializable layout metadata (for debug overlays / dev tools) ───

/// Snapshot of the last layout pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub canvas: Rect,
    pub grid: Rect,
    pub scaling: f64,
    pub dpi_scale: f64,
    pub title_bands: TitleBands,
    pub rows: Vec<RowLayout>,
    pub items: Vec<ItemLayoutInfo>,
    pub titles: Vec<ItemLayoutInfo>,
    pub overlays: Vec<ItemLayoutInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_alignment: Option<ColumnAlignment>,
}

/// Where a single item ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemLayoutInfo {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub bounding_box: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_rect: Option<Rect>,
    pub width_proportion: f64,
}

impl ItemLayoutInfo {
    pub fn from_item(item: &dyn CanvasItem) -> Self {
        ItemLayoutInfo {
            kind: item.kind().to_string(),
            id: item.id(),
            row: None,
            column: None,
            bounding_box: item.bounding_box(),
            content_rect: item.content_rect(),
            width_proportion: item.canvas_width_proportion(),
        }
    }

    fn at(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }
}

impl LayoutInfo {
    /// Collect the per-item boxes of every populated grid slot, row-major.
    pub fn grid_items(grid: &GridStore) -> Vec<ItemLayoutInfo> {
        grid.rows()
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter().enumerate().filter_map(move |(c, slot)| {
                    slot.as_deref().map(|item| ItemLayoutInfo::from_item(item).at(r, c))
                })
            })
            .collect()
    }

    /// The item entry for grid slot `(row, column)`, if it is populated.
    pub fn item_at(&self, row: usize, column: usize) -> Option<&ItemLayoutInfo> {
        self.items
            .iter()
            .find(|info| info.row == Some(row) && info.column == Some(column))
    }
}
