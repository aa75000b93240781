//! # Content Alignment
//!
//! Optional passes run after placement that line up the content areas of
//! neighbouring items: the data areas of plots in the same row share a top
//! and bottom, and plots stacked in the same column share a left and right
//! edge. Items without a content rectangle are left alone.

use serde::{Deserialize, Serialize};

use crate::item::ContentBounds;
use crate::model::Rect;

use super::grid::GridStore;

/// What the column pass managed to do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAlignment {
    /// Columns whose content edges were tightened.
    pub aligned: Vec<usize>,
    /// First column that could not be processed because a row ran out of
    /// items.
    pub stopped_at: Option<usize>,
}

fn content_of(rect: Option<Rect>) -> Option<Rect> {
    rect.filter(|r| !r.is_empty())
}

/// Give every item in a row the same content top and bottom.
pub fn align_rows(grid: &mut GridStore) {
    for (index, row) in grid.rows_mut().iter_mut().enumerate() {
        let contents: Vec<Rect> = row
            .iter()
            .flatten()
            .filter_map(|item| content_of(item.content_rect()))
            .collect();
        if contents.is_empty() {
            continue;
        }
        let top = contents.iter().map(|r| r.top()).fold(f64::MIN, f64::max);
        let bottom = contents.iter().map(|r| r.bottom()).fold(f64::MAX, f64::min);
        if top > bottom {
            log::debug!("row {index}: content bands do not overlap, skipping alignment");
            continue;
        }

        for item in row.iter_mut().flatten() {
            if content_of(item.content_rect()).is_none() {
                continue;
            }
            let bounds = ContentBounds {
                top: Some(top),
                bottom: Some(bottom),
                ..item.content_bounds()
            };
            item.set_content_bounds(bounds);
            item.recalc_sizes();
        }
    }
}

/// Give every item in a column the same content left and right edge,
/// column by column, shifting the rest of each row left when an item gives
/// width back.
///
/// Works through the columns of the first row. Stops at the first column
/// some row has no item in (or beyond), logging a warning; the columns
/// before it stay aligned.
pub fn align_columns(grid: &mut GridStore) -> ColumnAlignment {
    let mut report = ColumnAlignment::default();
    let columns = grid.effective_columns(0);

    for column in 0..columns {
        let short_row = (0..grid.row_count()).find(|&row| grid.effective_columns(row) <= column);
        if let Some(row) = short_row {
            log::warn!(
                "grid is jagged: row {row} ends before column {column}, column content alignment stops here"
            );
            report.stopped_at = Some(column);
            break;
        }

        let contents: Vec<Rect> = grid
            .rows()
            .iter()
            .filter_map(|row| row[column].as_deref())
            .filter_map(|item| content_of(item.content_rect()))
            .collect();
        if contents.is_empty() {
            continue;
        }
        let left = contents.iter().map(|r| r.left()).fold(f64::MIN, f64::max);
        let right = contents.iter().map(|r| r.right()).fold(f64::MAX, f64::min);
        if left > right {
            log::debug!("column {column}: content bands do not overlap, skipping alignment");
            continue;
        }

        for (row_index, row) in grid.rows_mut().iter_mut().enumerate() {
            let (head, tail) = row.split_at_mut(column + 1);
            let Some(item) = head[column].as_mut() else {
                continue;
            };
            if content_of(item.content_rect()).is_none() {
                continue;
            }
            let bounds = ContentBounds {
                left: Some(left),
                right: Some(right),
                ..item.content_bounds()
            };
            item.set_content_bounds(bounds);
            let old_right = item.bounding_box().right();
            item.recalc_sizes();
            let shift = old_right - item.bounding_box().right();
            if shift > 0.0 {
                for later in tail.iter_mut().flatten() {
                    later.offset(-shift, 0.0);
                }
            } else if shift < 0.0 {
                log::warn!(
                    "row {row_index} column {column}: item grew by {:.2}px after content alignment",
                    -shift
                );
            }
        }
        report.aligned.push(column);
    }

    report
}
