//! # Trellis
//!
//! A grid layout engine for report canvases.
//!
//! A canvas holds plots, legends, tables, images, and free text arranged as
//! a grid of rows, with titles around the edges. The engine's job is to
//! give every item a rectangle: non-overlapping, inside its margins, and
//! the same answer every time for the same surface size and pixel density.
//! Drawing is left to whoever owns the pixels.
//!
//! Row heights are worked out once, at the canvas's design size, as
//! proportions. After that every resize, zoom, or export at another DPI is
//! a cheap proportional pass, so the canvas looks the same at any size.
//!
//! ## Architecture
//!
//! ```text
//! Items (Label, Panel, Legend, Picture, Spacer)
//!       ↓  set_item / add_*_title / add_overlay
//!   [canvas]   — Placement API, design size, config
//!       ↓  resolve_row_heights (once, at design size)
//!   [layout]   — Row proportions, column widths, title bands,
//!       ↓        placement, content alignment
//!   LayoutInfo — Per-item rectangles (serializable)
//!
//!   [viewport] — Zoom steps and (debounced) window resizes
//! ```

pub mod canvas;
pub mod error;
pub mod item;
pub mod layout;
pub mod model;
pub mod style;
pub mod viewport;

pub use canvas::{Canvas, CanvasConfig};
pub use error::LayoutError;
pub use item::{CanvasItem, ItemId, ItemInfo, Label, Legend, Panel, Picture, Spacer};
pub use layout::grid::RowSpec;
pub use layout::LayoutInfo;
pub use viewport::{ResizeDebouncer, ViewState, ZoomController};

/// Build a canvas from a JSON [`CanvasConfig`]. Missing fields take their
/// defaults.
pub fn canvas_from_json(json: &str) -> Result<Canvas, LayoutError> {
    let config: CanvasConfig = serde_json::from_str(json)?;
    Canvas::with_config(config)
}
