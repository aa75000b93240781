//! # Grid Store
//!
//! The canvas grid: rows of equal-length column slots plus one [`RowSpec`]
//! per row. Slots own their items; empty slots are placeholders.
//!
//! The grid is always rectangular. A "jagged" row is one whose trailing
//! slots are empty, see [`GridStore::effective_columns`].

use serde::{Deserialize, Serialize};

use crate::item::{CanvasItem, ItemId};
use crate::model::safe_divide;

/// A grid cell: an owned item or an empty placeholder.
pub type Slot = Option<Box<dyn CanvasItem>>;

/// Per-row sizing metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSpec {
    /// Share (0..1) of the grid height this row takes.
    pub height_proportion: f64,
    /// Height is computed against the whole canvas instead of the grid area.
    ///
    /// Meant for the first or last row of a page (typically a legend) so
    /// titles don't squeeze it. Rows in the middle of a grid are not
    /// compensated correctly.
    pub lock_proportion: bool,
    /// Weight used when auto-fit rows split the leftover height. Set by the
    /// row height resolver.
    pub row_count: usize,
}

impl RowSpec {
    pub fn new(height_proportion: f64) -> Self {
        Self {
            height_proportion,
            lock_proportion: false,
            row_count: 1,
        }
    }

    pub fn height_proportion(&mut self, proportion: f64) -> &mut Self {
        self.height_proportion = proportion;
        self
    }

    pub fn lock_proportion(&mut self, locked: bool) -> &mut Self {
        self.lock_proportion = locked;
        self
    }

    pub fn is_proportion_locked(&self) -> bool {
        self.lock_proportion
    }
}

#[derive(Debug, Default)]
pub struct GridStore {
    rows: Vec<Vec<Slot>>,
    specs: Vec<RowSpec>,
}

impl GridStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(rows, columns)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows.len(), self.rows.first().map_or(0, |r| r.len()))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.size().1
    }

    /// Resize to `rows` x `columns`. Existing items inside the new bounds
    /// are kept; anything outside is dropped. Row specs are fully reset to
    /// an even `1/rows` split.
    pub fn resize(&mut self, rows: usize, columns: usize) {
        self.rows.resize_with(rows, Vec::new);
        for row in &mut self.rows {
            row.resize_with(columns, || None);
        }
        self.specs = vec![RowSpec::new(safe_divide(1.0, rows as f64)); rows];
    }

    /// Store `slot` at `(row, column)`, growing the grid if needed. Returns
    /// whatever the slot held before.
    pub fn set(&mut self, row: usize, column: usize, slot: Slot) -> Slot {
        let (rows, columns) = self.size();
        if row >= rows || column >= columns {
            self.resize(rows.max(row + 1), columns.max(column + 1));
        }
        std::mem::replace(&mut self.rows[row][column], slot)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&dyn CanvasItem> {
        self.rows.get(row)?.get(column)?.as_deref()
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut Box<dyn CanvasItem>> {
        self.rows.get_mut(row)?.get_mut(column)?.as_mut()
    }

    pub fn row(&self, row: usize) -> Option<&[Slot]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    pub fn row_mut(&mut self, row: usize) -> Option<&mut [Slot]> {
        self.rows.get_mut(row).map(|r| r.as_mut_slice())
    }

    pub fn rows(&self) -> &[Vec<Slot>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<Slot>] {
        &mut self.rows
    }

    pub fn spec(&self, row: usize) -> Option<&RowSpec> {
        self.specs.get(row)
    }

    pub fn spec_mut(&mut self, row: usize) -> Option<&mut RowSpec> {
        self.specs.get_mut(row)
    }

    pub fn specs(&self) -> &[RowSpec] {
        &self.specs
    }

    /// Rows and their specs, borrowed together for a layout pass.
    pub fn split_mut(&mut self) -> (&mut [Vec<Slot>], &mut [RowSpec]) {
        (&mut self.rows, &mut self.specs)
    }

    /// Number of non-empty slots in a row.
    pub fn populated(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.iter().filter(|s| s.is_some()).count())
    }

    /// Is every slot in the row holding an item?
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| !r.is_empty() && r.iter().all(|s| s.is_some()))
    }

    /// Column count of a row once trailing empty slots are ignored.
    pub fn effective_columns(&self, row: usize) -> usize {
        self.rows
            .get(row)
            .and_then(|r| r.iter().rposition(|s| s.is_some()))
            .map_or(0, |last| last + 1)
    }

    pub fn items(&self) -> impl Iterator<Item = &dyn CanvasItem> + '_ {
        self.rows.iter().flatten().filter_map(|slot| slot.as_deref())
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn CanvasItem>> + '_ {
        self.rows.iter_mut().flatten().filter_map(|slot| slot.as_mut())
    }

    pub fn find(&self, id: ItemId) -> Option<&dyn CanvasItem> {
        self.items().find(|item| item.id() == Some(id))
    }

    pub fn find_mut(&mut self, id: ItemId) -> Option<&mut Box<dyn CanvasItem>> {
        self.items_mut().find(|item| item.id() == Some(id))
    }

    /// Grid coordinates of the item with `id`.
    pub fn position_of(&self, id: ItemId) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|slot| slot.as_deref().is_some_and(|item| item.id() == Some(id)))
                .map(|c| (r, c))
        })
    }
}
