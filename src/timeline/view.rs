//! View state for the gantt region: zoom factor, today marker toggle, and
//! the hover crosshair.  Mutated only by explicit user actions; everything
//! derived from it is recomputed synchronously on change.

use chrono::NaiveDate;

use super::geometry::TimelineSpan;

pub const MIN_ZOOM: f64 = 0.3;
pub const MAX_ZOOM: f64 = 5.0;
const ZOOM_STEP: f64 = 1.5;

/// Hover crosshair derived from the pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub date: NaiveDate,
    pub position_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub zoom_level: f64,
    pub show_today_marker: bool,
    pub hover: Option<Hover>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom_level: 1.0,
            show_today_marker: true,
            hover: None,
        }
    }
}

impl ViewState {
    /// Multiply zoom by 1.5, clamped to the 5.0 ceiling.  Idempotent at the
    /// bound: the clamp yields exactly `MAX_ZOOM` on every further call.
    pub fn zoom_in(&mut self) {
        self.zoom_level = (self.zoom_level * ZOOM_STEP).min(MAX_ZOOM);
    }

    /// Divide zoom by 1.5, clamped to the 0.3 floor.
    pub fn zoom_out(&mut self) {
        self.zoom_level = (self.zoom_level / ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn toggle_today(&mut self) {
        self.show_today_marker = !self.show_today_marker;
    }

    /// Translate a pointer x coordinate (relative to the scrollable content
    /// origin) into the hover crosshair.  No-op outside a valid span.
    pub fn set_hover(
        &mut self,
        span: &TimelineSpan,
        pointer_x: f64,
        scroll_offset: f64,
        effective_width: f64,
    ) {
        if effective_width <= 0.0 {
            return;
        }
        let date = span.date_at(pointer_x, scroll_offset, effective_width);
        self.hover = Some(Hover {
            date,
            position_pct: span.position_of(date),
        });
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// Target scroll offset that lands `today` roughly a quarter of the
    /// viewport from the left edge: `max(0, pos/100*width - viewport/4)`.
    pub fn today_scroll_target(
        &self,
        span: &TimelineSpan,
        today: NaiveDate,
        viewport_width: f64,
    ) -> f64 {
        let effective_width = span.effective_width(self.zoom_level);
        let today_px = span.position_of(today) / 100.0 * effective_width;
        (today_px - viewport_width / 4.0).max(0.0)
    }
}
