//! # Column Widths
//!
//! Width proportions within a row must add up to the full grid width.
//! [`calc_column_widths`] repairs a row whose proportions drift from 1.0,
//! taking the correction out of the flexible columns so fixed-width items
//! keep the share they measured.
//!
//! [`split_surplus`] decides where the width goes when a fixed-width item
//! comes back narrower than the box it was handed.

use crate::model::{approx_eq, safe_divide};
use crate::style::HorizontalAlignment;

use super::grid::Slot;

/// Normalize the width proportions of one row so they sum to 1.0.
///
/// Empty slots are ignored. A row holding a single non-fixed item simply
/// takes the full width. Otherwise the excess (or deficit) is split evenly
/// among the non-fixed items; if every item is fixed-width they all give
/// (or take) an equal part. No proportion ends up negative: a fixed item
/// wider than the row squeezes its flexible neighbours to zero and is
/// itself scaled back to fit.
pub fn calc_column_widths(row: &mut [Slot]) {
    let total: f64 = row
        .iter()
        .flatten()
        .map(|item| item.canvas_width_proportion())
        .sum();
    if approx_eq(total, 1.0) {
        return;
    }
    let diff = total - 1.0;

    if let [Some(only)] = row {
        if !only.is_fixed_width_on_canvas() {
            only.set_canvas_width_proportion(1.0);
            return;
        }
    }

    let populated = row.iter().flatten().count();
    let flexible = row
        .iter()
        .flatten()
        .filter(|item| !item.is_fixed_width_on_canvas())
        .count();
    let (adjust_fixed, divisor) = if flexible == 0 {
        (true, populated)
    } else {
        (false, flexible)
    };
    let share = safe_divide(diff, divisor as f64);

    let mut shortfall = 0.0;
    for item in row.iter_mut().flatten() {
        if adjust_fixed || !item.is_fixed_width_on_canvas() {
            let proportion = item.canvas_width_proportion() - share;
            if proportion < 0.0 {
                shortfall -= proportion;
            }
            item.set_canvas_width_proportion(proportion.max(0.0));
        }
    }

    // Columns are floored at zero; whatever they could not give up comes
    // out of every remaining column in proportion to its width.
    if shortfall > 0.0 {
        let total: f64 = row
            .iter()
            .flatten()
            .map(|item| item.canvas_width_proportion())
            .sum();
        log::debug!("row overfull by {shortfall:.4} after normalizing, rescaling from {total:.4}");
        let scale = safe_divide(1.0, total);
        for item in row.iter_mut().flatten() {
            let proportion = item.canvas_width_proportion() * scale;
            item.set_canvas_width_proportion(proportion);
        }
    }
}

/// How a shrink-back surplus is split between the items already placed in
/// a row and the ones still to come.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurplusSplit {
    /// Width handed back to the items before the shrinking one.
    pub previous: f64,
    /// Width added to each populated slot after it.
    pub per_following: f64,
}

/// Split `surplus` for an item with `previous` populated slots before it
/// and `following` populated slots after it.
///
/// With nobody before it everything carries forward. Otherwise the item's
/// horizontal alignment decides: left keeps the gap on its right, right
/// gives it all to the previous items, centered splits it. Whatever is not
/// handed back is shared evenly by the following items; if there are none
/// it is dropped.
pub fn split_surplus(
    surplus: f64,
    previous: usize,
    following: usize,
    alignment: HorizontalAlignment,
) -> SurplusSplit {
    let back = if previous == 0 {
        0.0
    } else {
        match alignment {
            HorizontalAlignment::Left => 0.0,
            HorizontalAlignment::Centered => surplus / 2.0,
            HorizontalAlignment::Right => surplus,
        }
    };
    SurplusSplit {
        previous: back,
        per_following: safe_divide(surplus - back, following as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemInfo, Spacer};

    fn cell(proportion: f64, fixed: bool) -> Slot {
        Some(Box::new(Spacer::new().with_info(
            ItemInfo::default()
                .canvas_width_proportion(proportion)
                .fixed_width_on_canvas(fixed),
        )))
    }

    fn proportions(row: &[Slot]) -> Vec<f64> {
        row.iter().flatten().map(|i| i.canvas_width_proportion()).collect()
    }

    #[test]
    fn overfull_row_takes_from_flexible_items() {
        let mut row = vec![cell(0.5, false), cell(0.3, false), cell(0.3, false)];
        calc_column_widths(&mut row);
        let p = proportions(&row);
        assert!((p[0] - 0.4667).abs() < 0.001);
        assert!((p[1] - 0.2667).abs() < 0.001);
        assert!((p[2] - 0.2667).abs() < 0.001);
    }

    #[test]
    fn fixed_items_keep_their_share() {
        let mut row = vec![cell(1.0, false), cell(0.2, true)];
        calc_column_widths(&mut row);
        let p = proportions(&row);
        assert!((p[0] - 0.8).abs() < 0.001);
        assert!((p[1] - 0.2).abs() < 0.001);
    }

    #[test]
    fn all_fixed_row_spreads_over_everyone() {
        let mut row = vec![cell(0.7, true), cell(0.5, true)];
        calc_column_widths(&mut row);
        let p = proportions(&row);
        assert!((p[0] - 0.6).abs() < 0.001);
        assert!((p[1] - 0.4).abs() < 0.001);
    }

    #[test]
    fn oversized_fixed_item_never_drives_neighbours_negative() {
        // 800 DIPs of fixed content on a 700 DIP design width
        let mut row = vec![cell(1.0, false), cell(800.0 / 700.0, true)];
        calc_column_widths(&mut row);
        let p = proportions(&row);
        assert!(p[0].abs() < 0.001);
        assert!((p[1] - 1.0).abs() < 0.001);
    }

    #[test]
    fn overfull_fixed_items_share_the_row() {
        let mut row = vec![cell(0.5, false), cell(0.6, true), cell(0.6, true)];
        calc_column_widths(&mut row);
        let p = proportions(&row);
        assert!(p.iter().all(|v| *v >= 0.0));
        assert!(p[0].abs() < 0.001);
        assert!((p[1] - 0.5).abs() < 0.001);
        assert!((p[2] - 0.5).abs() < 0.001);
    }

    #[test]
    fn single_flexible_item_fills_row() {
        let mut row = vec![cell(0.3, false)];
        calc_column_widths(&mut row);
        assert!((proportions(&row)[0] - 1.0).abs() < 0.001);
    }

    #[test]
    fn empty_slots_are_ignored() {
        let mut row = vec![cell(1.0, false), None, cell(1.0, false)];
        calc_column_widths(&mut row);
        let total: f64 = proportions(&row).iter().sum();
        assert!((total - 1.0).abs() < 0.001);
    }

    #[test]
    fn empty_row_is_a_no_op() {
        let mut row: Vec<Slot> = vec![None, None];
        calc_column_widths(&mut row);
        assert!(row.iter().all(|s| s.is_none()));
    }

    #[test]
    fn centered_surplus_splits_both_ways() {
        let split = split_surplus(40.0, 1, 1, HorizontalAlignment::Centered);
        assert!((split.previous - 20.0).abs() < 0.001);
        assert!((split.per_following - 20.0).abs() < 0.001);
    }

    #[test]
    fn first_item_carries_everything_forward() {
        let split = split_surplus(30.0, 0, 3, HorizontalAlignment::Right);
        assert!((split.previous - 0.0).abs() < 0.001);
        assert!((split.per_following - 10.0).abs() < 0.001);
    }

    #[test]
    fn last_item_has_nowhere_to_carry() {
        let split = split_surplus(30.0, 2, 0, HorizontalAlignment::Left);
        assert!((split.previous - 0.0).abs() < 0.001);
        assert!((split.per_following - 0.0).abs() < 0.001);
    }
}
