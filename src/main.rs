//! # Trellis CLI
//!
//! Lays out a sample report canvas and prints the resulting layout as JSON.
//!
//! Usage:
//!   trellis [config.json] [--width W] [--height H] [--dpi S] [--zoom N]
//!   trellis --example > canvas.json

use std::env;
use std::fs;
use std::process;

use trellis::model::{Edges, Size};
use trellis::style::{Color, HorizontalAlignment, RelativeAlignment};
use trellis::{Canvas, CanvasConfig, ItemInfo, LayoutError, Label, Legend, Panel, Picture, ZoomController};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        match serde_json::to_string_pretty(&CanvasConfig::default()) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(&format!("Failed to serialize config: {e}")),
        }
        return;
    }

    let config = if args.len() > 1 && !args[1].starts_with('-') {
        let json = fs::read_to_string(&args[1])
            .unwrap_or_else(|e| fail(&format!("Failed to read {}: {e}", args[1])));
        serde_json::from_str(&json)
            .map_err(LayoutError::from)
            .unwrap_or_else(|e| fail(&e.to_string()))
    } else {
        CanvasConfig::default()
    };

    let width = number_arg(&args, "--width").unwrap_or(config.min_width);
    let height = number_arg(&args, "--height").unwrap_or(config.min_height);
    let dpi = number_arg(&args, "--dpi").unwrap_or(1.0);
    let zoom_steps = number_arg(&args, "--zoom").unwrap_or(0.0) as u32;

    let mut canvas = Canvas::with_config(config).unwrap_or_else(|e| fail(&e.to_string()));
    build_sample_report(&mut canvas);
    if let Err(e) = canvas.resolve_row_heights() {
        fail(&e.to_string());
    }

    let mut zoom = ZoomController::new(&canvas, dpi);
    zoom.resize(&mut canvas, Size::new(width * dpi, height * dpi));
    for _ in 0..zoom_steps {
        zoom.zoom_in(&mut canvas);
    }

    match canvas.layout_info_json() {
        Ok(json) => println!("{json}"),
        Err(e) => fail(&format!("Failed to serialize layout: {e}")),
    }
    eprintln!(
        "✓ {} items on a {:.0}x{:.0} canvas (scaling {:.2})",
        canvas.layout_info().items.len(),
        canvas.size().width,
        canvas.size().height,
        canvas.scaling()
    );
}

fn number_arg(args: &[String], flag: &str) -> Option<f64> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].parse().unwrap_or_else(|_| fail(&format!("{flag} expects a number, got {}", w[1]))))
}

fn fail(message: &str) -> ! {
    eprintln!("✗ {message}");
    process::exit(1);
}

/// Two plots side by side, a full-width table under them, and a legend row
/// locked to the bottom of the page.
fn build_sample_report(canvas: &mut Canvas) {
    let plot_margins = Edges::uniform(5.0);
    let plot_padding = Edges::new(10.0, 10.0, 30.0, 40.0);

    canvas.set_item(
        0,
        0,
        Panel::new(Size::new(250.0, 200.0)).with_info(
            ItemInfo::default()
                .id(1)
                .canvas_margins(plot_margins)
                .padding(plot_padding),
        ),
    );
    canvas.set_item(
        0,
        1,
        Panel::new(Size::new(250.0, 200.0)).with_info(
            ItemInfo::default()
                .id(2)
                .canvas_margins(plot_margins)
                .padding(Edges::new(10.0, 10.0, 30.0, 60.0)),
        ),
    );
    canvas.set_item(
        0,
        2,
        Picture::new(Size::new(120.0, 120.0)).with_info(
            ItemInfo::default()
                .id(3)
                .fixed_width_on_canvas(true)
                .page_horizontal_alignment(HorizontalAlignment::Centered),
        ),
    );
    canvas.set_item(
        1,
        0,
        Panel::new(Size::new(600.0, 80.0)).with_info(
            ItemInfo::default()
                .id(4)
                .canvas_margins(plot_margins)
                .fit_row_to_content(true),
        ),
    );
    canvas.set_item(
        2,
        0,
        Legend::new(&["North", "South", "East", "West"]).with_info(
            ItemInfo::default()
                .id(5)
                .fixed_width_on_canvas(true)
                .fit_row_to_content(true)
                .page_horizontal_alignment(HorizontalAlignment::Centered),
        ),
    );
    if let Some(row) = canvas.row_info_mut(2) {
        row.lock_proportion(true);
    }

    canvas.add_top_title(Label::new("Regional Sales").with_font_size(16.0));
    canvas.add_top_title(Label::new("Fiscal year 2026").with_font_color(Color::hex("#555555")));
    canvas.add_bottom_title(
        Label::new("Source: internal ledger")
            .with_font_size(8.0)
            .with_info(ItemInfo::default().relative_alignment(RelativeAlignment::FlushRight)),
    );
    canvas.add_left_title(Label::new("Units sold"));
    canvas.set_row_content_aligned(true);
    canvas.set_column_content_aligned(true);
}
