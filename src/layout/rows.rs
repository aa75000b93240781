//! # Row Heights
//!
//! Derives every row's height proportion from its content, once, at design
//! size. Rows with a fit-to-content item take exactly what that item
//! measures; the remaining height is shared by the other rows. An empty row
//! donates its share to the nearest populated row above it, so a tall plot
//! spanning "two rows" gets twice the height of its neighbours.

use crate::model::{safe_divide, Size};

use super::columns::calc_column_widths;
use super::grid::GridStore;

/// Recompute row proportions (and fixed-width column proportions) from the
/// items' measured sizes against the `min_size` design area.
///
/// After this returns, the proportions sum to at most 1.0. Calling it again
/// with the same content and design size yields the same result.
pub fn resolve_row_heights(grid: &mut GridStore, min_size: Size) {
    let (rows, specs) = grid.split_mut();

    for spec in specs.iter_mut() {
        spec.height_proportion = 0.0;
    }

    let mut fit_rows = 0usize;
    let mut fit_total = 0.0;
    for (row, spec) in rows.iter_mut().zip(specs.iter_mut()) {
        let mut fitted = false;
        let mut has_fixed = false;
        for item in row.iter_mut().flatten() {
            let margins = item.canvas_margins();
            let measured = item.measure();
            if item.is_fitting_row_to_content() {
                let candidate = safe_divide(measured.height + margins.vertical(), min_size.height);
                spec.height_proportion = spec.height_proportion.max(candidate);
                fitted = true;
            }
            if item.is_fixed_width_on_canvas() {
                let proportion = safe_divide(measured.width + margins.horizontal(), min_size.width);
                item.set_canvas_width_proportion(proportion);
                has_fixed = true;
            }
        }
        if has_fixed {
            calc_column_widths(row);
        }
        if fitted {
            fit_rows += 1;
            fit_total += spec.height_proportion;
        }
    }

    // Row weights: empty rows lend their share to the last populated row.
    let mut owner: Option<usize> = None;
    for (index, row) in rows.iter().enumerate() {
        if row.iter().any(|slot| slot.is_some()) {
            specs[index].row_count = 1;
            owner = Some(index);
        } else {
            specs[index].row_count = 0;
            if let Some(owner) = owner.filter(|_| index > 0) {
                specs[owner].row_count += 1;
            }
        }
    }

    let remaining = (1.0 - fit_total).max(0.0);
    let auto_rows = specs.len().saturating_sub(fit_rows);
    let average = safe_divide(remaining, auto_rows as f64);
    for spec in specs.iter_mut() {
        if spec.height_proportion == 0.0 {
            spec.height_proportion = average * spec.row_count as f64;
        }
    }

    let total: f64 = specs.iter().map(|s| s.height_proportion).sum();
    if total > 1.0 {
        log::debug!("row proportions sum to {total:.4}, rescaling to 1.0");
        for spec in specs.iter_mut() {
            spec.height_proportion /= total;
        }
    }

    for (index, spec) in specs.iter().enumerate() {
        log::trace!(
            "row {index}: proportion {:.4} weight {}",
            spec.height_proportion,
            spec.row_count
        );
    }
}
