//! # Zoom and Resize
//!
//! Keeps a [`Canvas`] in step with the window showing it.
//!
//! Normally the canvas follows the window's client area ("fit to
//! surface"). Zooming in multiplies the canvas size instead, and while
//! zoomed, window resizes leave the canvas alone, unless the window grows
//! past the zoomed canvas in both directions, which cancels the zoom.
//!
//! Window systems deliver resize events in bursts. [`ResizeDebouncer`]
//! keeps only the latest size and releases it once the burst has been quiet
//! for a while; the caller decides when to poll. [`ZoomController::resize`]
//! skips the debouncer for callers that want the layout right away.
//!
//! Neither zooming nor resizing touches row proportions; those were fixed
//! at design size.

use std::time::{Duration, Instant};

use crate::canvas::Canvas;
use crate::model::{approx_eq, safe_divide, Size};

/// Which sizing regime the canvas is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Exactly the design size, scaling 1.0.
    Design,
    /// Enlarged by one or more zoom steps.
    Zoomed,
    /// Following the window's client area.
    FitToSurface,
}

/// Coalesces bursts of resize notifications. Latest size wins.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    window: Duration,
    pending: Option<Size>,
    last_event: Option<Instant>,
}

impl ResizeDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_event: None,
        }
    }

    /// Record a resize. Replaces any size still pending.
    pub fn push(&mut self, size: Size, now: Instant) {
        self.pending = Some(size);
        self.last_event = Some(now);
    }

    /// The pending size, once nothing new has arrived for the quiet window.
    pub fn poll(&mut self, now: Instant) -> Option<Size> {
        let last = self.last_event?;
        if now.saturating_duration_since(last) >= self.window {
            self.flush()
        } else {
            None
        }
    }

    /// Take the pending size right away.
    pub fn flush(&mut self) -> Option<Size> {
        self.last_event = None;
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Drives a canvas through zoom steps and window resizes.
#[derive(Debug, Clone)]
pub struct ZoomController {
    zoom_level: u32,
    /// Last known client area in pixels.
    client: Size,
    dpi_scale: f64,
    debouncer: ResizeDebouncer,
}

impl ZoomController {
    pub fn new(canvas: &Canvas, dpi_scale: f64) -> Self {
        let window = Duration::from_millis(canvas.config().resize_quiescence_ms);
        Self {
            zoom_level: 0,
            client: canvas.size().scale(dpi_scale),
            dpi_scale,
            debouncer: ResizeDebouncer::new(window),
        }
    }

    pub fn zoom_level(&self) -> u32 {
        self.zoom_level
    }

    pub fn dpi_scale(&self) -> f64 {
        self.dpi_scale
    }

    /// Moving the window to a screen with a different density.
    pub fn set_dpi_scale(&mut self, dpi_scale: f64) {
        self.dpi_scale = dpi_scale;
    }

    pub fn state(&self, canvas: &Canvas) -> ViewState {
        let size = canvas.size();
        let min = canvas.min_size();
        if self.zoom_level > 0 {
            ViewState::Zoomed
        } else if approx_eq(size.width, min.width) && approx_eq(size.height, min.height) {
            ViewState::Design
        } else {
            ViewState::FitToSurface
        }
    }

    /// Apply a client-area resize immediately. Returns whether the canvas
    /// was laid out again.
    pub fn resize(&mut self, canvas: &mut Canvas, client: Size) -> bool {
        self.client = client;
        let current = canvas.canvas_rect(self.dpi_scale);
        if self.zoom_level > 0 && client.width > current.width && client.height > current.height {
            log::debug!("window outgrew the zoomed canvas, leaving zoom level {}", self.zoom_level);
            self.zoom_level = 0;
        }
        if self.zoom_level > 0 {
            return false;
        }

        let mut size = self.client_dips();
        if canvas.config().maintain_aspect_ratio {
            let min = canvas.min_size();
            size.height = size.width * safe_divide(min.height, min.width);
        }
        log::debug!("resize to {:.0}x{:.0} DIPs", size.width, size.height);
        canvas.set_size(size);
        canvas.relayout(self.dpi_scale);
        true
    }

    /// Queue a resize; it is applied by [`poll`](Self::poll) once resizes
    /// stop arriving.
    pub fn notify_resize(&mut self, client: Size, now: Instant) {
        self.debouncer.push(client, now);
    }

    /// Apply a queued resize if the burst is over.
    pub fn poll(&mut self, canvas: &mut Canvas, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(client) => self.resize(canvas, client),
            None => false,
        }
    }

    pub fn has_pending_resize(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// One zoom step in. Returns `false` at the maximum level.
    pub fn zoom_in(&mut self, canvas: &mut Canvas) -> bool {
        let config = canvas.config();
        if self.zoom_level >= config.max_zoom_level {
            return false;
        }
        let factor = config.zoom_factor;
        self.zoom_level += 1;
        log::debug!("zoom in to level {}", self.zoom_level);
        canvas.set_size(canvas.size().scale(factor));
        canvas.relayout(self.dpi_scale);
        true
    }

    /// One zoom step out. Returns `false` when not zoomed.
    pub fn zoom_out(&mut self, canvas: &mut Canvas) -> bool {
        if self.zoom_level == 0 {
            return false;
        }
        let factor = canvas.config().zoom_factor;
        self.zoom_level -= 1;
        log::debug!("zoom out to level {}", self.zoom_level);
        canvas.set_size(canvas.size().scale(safe_divide(1.0, factor)));
        canvas.relayout(self.dpi_scale);
        true
    }

    /// Drop the zoom and go back to the client area. Returns `false` when
    /// not zoomed.
    pub fn zoom_reset(&mut self, canvas: &mut Canvas) -> bool {
        if self.zoom_level == 0 {
            return false;
        }
        self.zoom_level = 0;
        log::debug!("zoom reset");
        canvas.set_size(self.client_dips());
        canvas.relayout(self.dpi_scale);
        true
    }

    fn client_dips(&self) -> Size {
        self.client.scale(safe_divide(1.0, self.dpi_scale))
    }
}
