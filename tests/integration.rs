//! Integration tests for the Trellis layout pipeline.
//!
//! These tests drive a `Canvas` the way an application does: populate the
//! grid, resolve row heights at design size, then lay out at various sizes
//! and pixel densities. They verify:
//! - Rows and columns tile the grid area exactly
//! - Fixed-width items hand unused width to their neighbours
//! - Locked rows keep their height when titles take space
//! - Content alignment across rows and (jagged) columns
//! - Zoom, resize, and DPI changes only rescale

use trellis::layout::LayoutInfo;
use trellis::model::{Edges, Point, Rect, Size};
use trellis::style::{Color, HorizontalAlignment};
use trellis::*;

// ─── Helpers ────────────────────────────────────────────────────

fn make_panel(id: ItemId) -> Panel {
    Panel::new(Size::new(100.0, 100.0)).with_info(ItemInfo::default().id(id))
}

fn make_padded_panel(id: ItemId, padding: Edges) -> Panel {
    Panel::new(Size::new(100.0, 100.0)).with_info(ItemInfo::default().id(id).padding(padding))
}

fn make_legend(id: ItemId) -> Legend {
    Legend::new(&["abcd"])
        .with_font_size(10.0)
        .with_info(
            ItemInfo::default()
                .id(id)
                .fixed_width_on_canvas(true)
                .page_horizontal_alignment(HorizontalAlignment::Centered),
        )
}

/// A canvas with one column and `rows` panels, row heights resolved.
fn stacked_canvas(rows: usize) -> Canvas {
    let mut canvas = Canvas::new();
    canvas.set_grid_size(rows, 1).unwrap();
    for row in 0..rows {
        canvas.set_item(row, 0, make_panel(row as ItemId));
    }
    canvas.resolve_row_heights().unwrap();
    canvas
}

fn bbox(info: &LayoutInfo, row: usize, column: usize) -> Rect {
    info.item_at(row, column)
        .map(|item| item.bounding_box)
        .unwrap_or_else(|| panic!("no item at ({row}, {column})"))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.001
}

// ─── Rows ───────────────────────────────────────────────────────

#[test]
fn test_two_rows_split_the_canvas() {
    let mut canvas = stacked_canvas(2);
    let info = canvas.layout(Size::new(1000.0, 1000.0), 1.0).clone();

    assert_eq!(info.rows.len(), 2);
    assert!(approx(info.rows[0].y, 0.0));
    assert!(approx(info.rows[0].height, 500.0));
    assert!(approx(info.rows[1].y, 500.0));
    assert!(approx(info.rows[1].y + info.rows[1].height, 1000.0));

    let top = bbox(&info, 0, 0);
    let bottom = bbox(&info, 1, 0);
    assert!(approx(top.top(), 0.0));
    assert!(approx(top.bottom(), 500.0));
    assert!(approx(bottom.top(), 500.0));
    assert!(approx(bottom.bottom(), 1000.0));
}

#[test]
fn test_stacked_rows_tile_the_grid() {
    for rows in 1..=6 {
        let mut canvas = stacked_canvas(rows);
        let info = canvas.layout(Size::new(913.0, 677.0), 1.25).clone();
        for row in 0..rows - 1 {
            assert!(approx(bbox(&info, row, 0).bottom(), bbox(&info, row + 1, 0).top()));
        }
        assert!(approx(bbox(&info, 0, 0).top(), info.grid.top()));
        assert!(approx(bbox(&info, rows - 1, 0).bottom(), info.grid.bottom()));
    }
}

#[test]
fn test_fit_row_takes_measured_height_at_design_size() {
    let mut canvas = Canvas::new();
    canvas.set_item(0, 0, make_panel(1));
    canvas.set_item(
        1,
        0,
        Panel::new(Size::new(300.0, 90.0)).with_info(
            ItemInfo::default()
                .id(2)
                .fit_row_to_content(true)
                .canvas_margins(Edges::symmetric(5.0, 0.0)),
        ),
    );
    canvas.resolve_row_heights().unwrap();
    assert!(approx(canvas.row_info(1).unwrap().height_proportion, 0.2));

    let info = canvas.relayout(1.0).clone();
    // 90 + 10 margins at design size is exactly 100px of 500
    assert!(approx(info.rows[1].height, 100.0));
    assert!(approx(bbox(&info, 1, 0).height, 90.0));
}

#[test]
fn test_locked_row_ignores_title_bands() {
    let build = |with_title: bool| {
        let mut canvas = stacked_canvas(2);
        canvas.row_info_mut(1).unwrap().height_proportion(0.2).lock_proportion(true);
        canvas.row_info_mut(0).unwrap().height_proportion(0.8);
        if with_title {
            canvas.add_top_title(Label::new("A title that takes room").with_font_size(20.0));
        }
        canvas.layout(Size::new(700.0, 500.0), 1.0).clone()
    };

    let plain = build(false);
    let titled = build(true);
    assert!(approx(plain.rows[1].height, 100.0));
    assert!(approx(titled.rows[1].height, 100.0));
    assert!(titled.title_bands.top > 0.0);

    // The rows above absorb the title and still meet the locked row.
    assert!(approx(bbox(&titled, 0, 0).top(), titled.grid.top()));
    assert!(approx(bbox(&titled, 0, 0).bottom(), bbox(&titled, 1, 0).top()));
    assert!(approx(bbox(&titled, 1, 0).bottom(), 500.0));
}

// ─── Columns ────────────────────────────────────────────────────

#[test]
fn test_overfull_row_is_normalized() {
    let mut canvas = Canvas::new();
    canvas.set_grid_size(1, 3).unwrap();
    for column in 0..3 {
        canvas.set_item(0, column, make_panel(column as ItemId));
    }
    for (column, proportion) in [0.5, 0.3, 0.3].into_iter().enumerate() {
        canvas.item_mut(0, column).unwrap().set_canvas_width_proportion(proportion);
    }
    canvas.calc_column_widths(0);

    let expected = [0.4667, 0.2667, 0.2667];
    for (column, want) in expected.into_iter().enumerate() {
        let got = canvas.item(0, column).unwrap().canvas_width_proportion();
        assert!((got - want).abs() < 0.001, "column {column}: {got}");
    }
}

#[test]
fn test_columns_cover_the_grid_width() {
    let mut canvas = Canvas::new();
    canvas.set_grid_size(1, 4).unwrap();
    for column in 0..4 {
        canvas.set_item(0, column, make_panel(column as ItemId));
    }
    let info = canvas.layout(Size::new(1200.0, 800.0), 1.0).clone();
    let total: f64 = (0..4).map(|c| bbox(&info, 0, c).width).sum();
    assert!(approx(total, info.grid.width));
    for column in 0..3 {
        assert!(approx(bbox(&info, 0, column).right(), bbox(&info, 0, column + 1).left()));
    }
}

#[test]
fn test_centered_fixed_item_gives_width_to_both_sides() {
    let mut canvas = Canvas::new();
    canvas.set_grid_size(1, 3).unwrap();
    canvas.set_item(0, 0, make_panel(1));
    canvas.set_item(0, 1, make_legend(2));
    canvas.set_item(0, 2, make_panel(3));

    // The legend measures 35px; give its column 75px so it comes back 40px
    // narrower.
    let side = (700.0 - 75.0) / 2.0 / 700.0;
    canvas.item_mut(0, 0).unwrap().set_canvas_width_proportion(side);
    canvas.item_mut(0, 1).unwrap().set_canvas_width_proportion(75.0 / 700.0);
    canvas.item_mut(0, 2).unwrap().set_canvas_width_proportion(side);

    let info = canvas.layout(Size::new(700.0, 500.0), 1.0).clone();
    let left = bbox(&info, 0, 0);
    let legend = bbox(&info, 0, 1);
    let right = bbox(&info, 0, 2);

    assert!(approx(left.width, 312.5 + 20.0));
    assert!(approx(right.width, 312.5 + 20.0));
    assert!(approx(legend.width, 35.0));
    assert!(approx(legend.left(), left.right()));
    assert!(approx(right.left(), legend.right()));
    assert!(approx(right.right(), 700.0));
}

#[test]
fn test_oversized_fixed_item_stays_on_the_canvas() {
    let mut canvas = Canvas::new();
    canvas.set_grid_size(1, 2).unwrap();
    canvas.set_item(0, 0, make_panel(1));
    canvas.set_item(
        0,
        1,
        Panel::new(Size::new(800.0, 100.0)).with_info(ItemInfo::default().id(2).fixed_width_on_canvas(true)),
    );
    for column in 0..2 {
        assert!(canvas.item(0, column).unwrap().canvas_width_proportion() >= 0.0);
    }

    let info = canvas.layout(Size::new(700.0, 500.0), 1.0).clone();
    let flexible = bbox(&info, 0, 0);
    let wide = bbox(&info, 0, 1);
    assert!(approx(flexible.width, 0.0));
    assert!(approx(wide.left(), 0.0));
    assert!(approx(wide.right(), 700.0));
}

#[test]
fn test_resolve_gives_fixed_items_their_measured_share() {
    let mut canvas = Canvas::new();
    canvas.set_grid_size(1, 2).unwrap();
    canvas.set_item(0, 0, make_panel(1));
    canvas.set_item(0, 1, make_legend(2));
    canvas.resolve_row_heights().unwrap();
    assert!(approx(canvas.item(0, 1).unwrap().canvas_width_proportion(), 35.0 / 700.0));
    assert!(approx(canvas.item(0, 0).unwrap().canvas_width_proportion(), 665.0 / 700.0));
}

// ─── Content alignment ──────────────────────────────────────────

#[test]
fn test_row_content_alignment() {
    let mut canvas = Canvas::new();
    canvas.set_row_content_aligned(true);
    canvas.set_grid_size(1, 2).unwrap();
    canvas.set_item(0, 0, make_padded_panel(1, Edges::new(10.0, 0.0, 40.0, 0.0)));
    canvas.set_item(0, 1, make_padded_panel(2, Edges::new(30.0, 0.0, 20.0, 0.0)));
    let info = canvas.relayout(1.0).clone();

    let a = info.item_at(0, 0).unwrap().content_rect.unwrap();
    let b = info.item_at(0, 1).unwrap().content_rect.unwrap();
    assert!(approx(a.top(), 30.0));
    assert!(approx(a.top(), b.top()));
    assert!(approx(a.bottom(), 460.0));
    assert!(approx(a.bottom(), b.bottom()));
}

#[test]
fn test_jagged_grid_column_alignment_stops() {
    let mut canvas = Canvas::new();
    canvas.set_column_content_aligned(true);
    canvas.set_grid_size(2, 3).unwrap();
    for column in 0..3 {
        canvas.set_item(0, column, make_panel(column as ItemId));
    }
    for column in 0..2 {
        canvas.set_item(1, column, make_panel(10 + column as ItemId));
    }
    let info = canvas.relayout(1.0).clone();
    let report = info.column_alignment.expect("column alignment ran");
    assert_eq!(report.stopped_at, Some(2));
    assert_eq!(report.aligned, vec![0, 1]);
}

#[test]
fn test_alignment_is_cleared_between_passes() {
    let mut canvas = Canvas::new();
    canvas.set_row_content_aligned(true);
    canvas.set_grid_size(1, 2).unwrap();
    canvas.set_item(0, 0, make_padded_panel(1, Edges::new(10.0, 0.0, 10.0, 0.0)));
    canvas.set_item(0, 1, make_padded_panel(2, Edges::new(50.0, 0.0, 10.0, 0.0)));
    canvas.relayout(1.0);

    canvas.set_row_content_aligned(false);
    let info = canvas.relayout(1.0).clone();
    let a = info.item_at(0, 0).unwrap().content_rect.unwrap();
    assert!(approx(a.top(), 10.0));
}

// ─── Titles ─────────────────────────────────────────────────────

#[test]
fn test_titles_shrink_the_grid() {
    let mut canvas = stacked_canvas(1);
    canvas.add_top_title(Label::new("Top").with_font_size(10.0));
    canvas.add_bottom_title(Label::new("Bottom").with_font_size(10.0));
    canvas.add_left_title(Label::new("Left").with_font_size(10.0));
    canvas.add_right_title(Label::new("Right").with_font_size(10.0));
    let info = canvas.relayout(1.0).clone();

    let bands = info.title_bands;
    for band in [bands.left, bands.top, bands.bottom, bands.right] {
        assert!(approx(band, 14.0));
    }
    assert_eq!(info.grid, Rect::new(14.0, 14.0, 700.0 - 28.0, 500.0 - 28.0));
    assert_eq!(bbox(&info, 0, 0), info.grid);
    assert_eq!(info.titles.len(), 4);
}

#[test]
fn test_title_contrast_follows_background() {
    let mut canvas = stacked_canvas(1);
    canvas.set_background(Color::hex("#101010"));
    canvas.add_top_title(Label::new("Dark mode").with_font_color(Color::hex("#101010")));
    canvas.relayout(1.0);
    assert_eq!(canvas.titles().top[0].font_color(), Color::WHITE);
}

// ─── Sizing, zoom, DPI ──────────────────────────────────────────

#[test]
fn test_layout_is_idempotent() {
    let mut canvas = stacked_canvas(3);
    canvas.set_row_content_aligned(true);
    let first = canvas.layout(Size::new(900.0, 650.0), 1.5).clone();
    let second = canvas.relayout(1.5).clone();
    assert_eq!(first.items, second.items);

    canvas.layout(Size::new(2000.0, 2000.0), 1.0);
    let third = canvas.layout(Size::new(900.0, 650.0), 1.5).clone();
    assert_eq!(first.items, third.items);
}

#[test]
fn test_dpi_only_scales_pixels() {
    let mut canvas = stacked_canvas(2);
    let base = canvas.layout(Size::new(700.0, 500.0), 1.0).clone();
    let hi = canvas.layout(Size::new(700.0, 500.0), 2.0).clone();
    assert!(approx(hi.canvas.width, 1400.0));
    for row in 0..2 {
        let a = bbox(&base, row, 0);
        let b = bbox(&hi, row, 0);
        assert!(approx(a.y * 2.0, b.y));
        assert!(approx(a.height * 2.0, b.height));
    }
    // proportions are untouched by layout passes
    assert!(approx(canvas.row_info(0).unwrap().height_proportion, 0.5));
}

#[test]
fn test_zoom_rescales_and_blocks_row_resolution() {
    let mut canvas = stacked_canvas(2);
    let mut zoom = ZoomController::new(&canvas, 1.0);
    assert!(zoom.zoom_in(&mut canvas));
    assert!(approx(canvas.layout_info().scaling, 1.5));
    assert_eq!(zoom.state(&canvas), ViewState::Zoomed);
    assert!(matches!(
        canvas.resolve_row_heights(),
        Err(LayoutError::NotAtDesignSize { .. })
    ));

    assert!(zoom.zoom_out(&mut canvas));
    assert!(canvas.is_at_design_size());
    assert!(canvas.resolve_row_heights().is_ok());
}

#[test]
fn test_margins_follow_scaling() {
    let mut canvas = Canvas::new();
    canvas.set_item(
        0,
        0,
        Panel::new(Size::new(100.0, 100.0)).with_info(ItemInfo::default().canvas_margins(Edges::uniform(10.0))),
    );
    let info = canvas.layout(Size::new(1400.0, 1000.0), 1.0).clone();
    let b = bbox(&info, 0, 0);
    assert!(approx(b.x, 20.0));
    assert!(approx(b.width, 1400.0 - 40.0));
}

// ─── Lookup and overlays ────────────────────────────────────────

#[test]
fn test_overlays_are_scaled_not_placed() {
    let mut canvas = stacked_canvas(1);
    let mut note = make_panel(99);
    note.set_bounding_box(Rect::new(10.0, 10.0, 50.0, 50.0), 1.0);
    canvas.add_overlay(note);
    canvas.layout(Size::new(1400.0, 1000.0), 1.0);

    let overlay = canvas.find_item(99).unwrap();
    assert!(approx(overlay.info().scaling, 2.0));
    assert_eq!(overlay.bounding_box(), Rect::new(10.0, 10.0, 50.0, 50.0));
    assert!(canvas.find_overlay_at(Point::new(20.0, 20.0)).is_some());
}

#[test]
fn test_canvas_from_json_config() {
    let canvas = trellis::canvas_from_json(r#"{"minWidth": 1000, "minHeight": 800}"#).unwrap();
    assert_eq!(canvas.min_size(), Size::new(1000.0, 800.0));
    assert!(matches!(
        trellis::canvas_from_json(r#"{"minHeight": 0}"#),
        Err(LayoutError::InvalidMinimumSize { .. })
    ));
    let err = trellis::canvas_from_json(r#"{"minWidth": "wide"}"#).unwrap_err();
    assert!(matches!(err, LayoutError::ParseError { .. }));
    assert!(err.to_string().contains("Hint"));
}

#[test]
fn test_layout_json_snapshot() {
    let mut canvas = stacked_canvas(2);
    canvas.relayout(1.0);
    let json = canvas.layout_info_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["rows"].as_array().map(|r| r.len()), Some(2));
    assert_eq!(value["items"][1]["row"], 1);
    assert_eq!(value["items"][0]["kind"], "Panel");
}
