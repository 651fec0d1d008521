//! Scroll coordinator — the single source of truth for the horizontal
//! offset shared by the date ruler and the bars area.
//!
//! Both panels render from `offset_px`; updates flow outward from this
//! struct, never panel-to-panel, so the two regions cannot feed back into
//! each other.  "Go to today" animates via an ease-out step per frame,
//! except the one initial jump performed when data first arrives.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollSync {
    offset_px: f64,
    target_px: f64,
    /// Set once the first data-driven centering has happened; later
    /// centerings animate instead of jumping.
    pub initialized: bool,
}

/// Fraction of the remaining distance covered per animation step.
const EASE: f64 = 0.35;
/// Distance under which an animation snaps to its target.
const SNAP_PX: f64 = 1.0;

impl ScrollSync {
    pub fn offset(&self) -> f64 {
        self.offset_px
    }

    pub fn is_animating(&self) -> bool {
        (self.target_px - self.offset_px).abs() >= SNAP_PX
    }

    /// Immediate, non-animated positioning.
    pub fn jump(&mut self, px: f64) {
        let px = px.max(0.0);
        self.offset_px = px;
        self.target_px = px;
    }

    /// Begin an animated scroll towards `px`.
    pub fn scroll_to(&mut self, px: f64) {
        self.target_px = px.max(0.0);
    }

    /// Relative scroll from keys or the mouse wheel; cancels any running
    /// animation so user input always wins.
    pub fn nudge(&mut self, delta: f64) {
        self.jump(self.offset_px + delta);
    }

    /// Advance the animation one frame.  Returns true while still moving,
    /// so the caller knows to keep redrawing.
    pub fn step(&mut self) -> bool {
        let remaining = self.target_px - self.offset_px;
        if remaining.abs() < SNAP_PX {
            self.offset_px = self.target_px;
            return false;
        }
        self.offset_px += remaining * EASE;
        true
    }

    /// Re-clamp after a zoom or resize shrank the canvas.  Offsets stay in
    /// `[0, content_width - viewport_width]`.
    pub fn clamp_to(&mut self, content_width: f64, viewport_width: f64) {
        let max_offset = (content_width - viewport_width).max(0.0);
        self.offset_px = self.offset_px.clamp(0.0, max_offset);
        self.target_px = self.target_px.clamp(0.0, max_offset);
    }
}
