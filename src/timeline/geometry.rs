//! Timeline geometry — pure mapping between calendar dates and horizontal
//! positions on the virtual gantt canvas.
//!
//! Positions are percentages of the zoom-adjusted effective width, so the
//! same numbers place day gridlines, month bands, the today marker, the
//! hover crosshair, and tender bars.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::Tender;

/// Days added on each side of the raw min/max span.
const BUFFER_DAYS: i64 = 2;

/// Base canvas width floor and the per-day width at zoom 1.0.
const MIN_BASE_WIDTH: f64 = 800.0;
const PX_PER_DAY: f64 = 30.0;

/// Minimum rendered bar width at zoom 1.0, scaled with zoom so short
/// tenders stay visible and clickable.
const MIN_BAR_PX: f64 = 80.0;

// ---------------------------------------------------------------------------
// Span
// ---------------------------------------------------------------------------

/// The buffered date range covered by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineSpan {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

impl TimelineSpan {
    /// Scan `start_date`/`expiry_date` across all tenders and apply the
    /// ±2-day buffer.  `None` for an empty collection — the caller must
    /// suppress rendering rather than draw a degenerate canvas.
    pub fn compute(tenders: &[Tender]) -> Option<Self> {
        let mut dates = tenders
            .iter()
            .flat_map(|t| [t.start_date, t.expiry_date]);
        let first = dates.next()?;
        let (raw_min, raw_max) = dates.fold((first, first), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        });
        Some(Self {
            min_date: raw_min - Duration::days(BUFFER_DAYS),
            max_date: raw_max + Duration::days(BUFFER_DAYS),
        })
    }

    /// Whole days between the buffered endpoints.  At least 1, so the
    /// linear maps below never divide by zero even for a single-day span.
    pub fn total_days(&self) -> i64 {
        (self.max_date - self.min_date).num_days().max(1)
    }

    /// Zoom-adjusted canvas width in virtual pixels:
    /// `max(800, total_days * 30) * zoom`.  Monotonic in both inputs.
    pub fn effective_width(&self, zoom_level: f64) -> f64 {
        let base = (self.total_days() as f64 * PX_PER_DAY).max(MIN_BASE_WIDTH);
        base * zoom_level
    }

    /// Linear map of a date onto `[0, 100]` percent of the span.  Dates
    /// outside the span extrapolate; callers clamp where it matters.
    pub fn position_of(&self, date: NaiveDate) -> f64 {
        let days = (date - self.min_date).num_days() as f64;
        days / self.total_days() as f64 * 100.0
    }

    /// Inverse of [`position_of`]: convert a pointer x coordinate (plus the
    /// current scroll offset) into the calendar date under the crosshair.
    /// Clamped to the span endpoints.
    ///
    /// [`position_of`]: Self::position_of
    pub fn date_at(&self, pointer_x: f64, scroll_offset: f64, effective_width: f64) -> NaiveDate {
        if effective_width <= 0.0 {
            return self.min_date;
        }
        let fraction = ((pointer_x + scroll_offset) / effective_width).clamp(0.0, 1.0);
        let days = (fraction * self.total_days() as f64).round() as i64;
        self.min_date + Duration::days(days)
    }

    /// One marker per calendar day in `[min_date, max_date]`.  Lazy and
    /// restartable: each call yields a fresh iterator.
    pub fn day_markers(&self) -> DayMarkers {
        DayMarkers {
            span: *self,
            current: Some(self.min_date),
            last_month: None,
        }
    }

    /// Merge contiguous day markers into month bands for the ruler header.
    /// A band runs from one new-month marker to the next, the final band to
    /// 100 percent.
    pub fn month_bands(&self) -> Vec<MonthBand> {
        let mut bands: Vec<MonthBand> = Vec::new();
        for marker in self.day_markers() {
            if marker.is_new_month {
                if let Some(prev) = bands.last_mut() {
                    prev.end_pct = marker.position;
                }
                bands.push(MonthBand {
                    label: marker.month_label,
                    start_pct: marker.position,
                    end_pct: 100.0,
                });
            }
        }
        bands
    }

    /// Bar placement for one tender: start percent and width percent,
    /// clamped to the zoom-scaled minimum so zero-length and inverted
    /// date ranges still render a visible, clickable bar.
    pub fn bar_geometry(&self, tender: &Tender, zoom_level: f64, effective_width: f64) -> BarGeometry {
        let start_pct = self.position_of(tender.start_date);
        let raw_width_pct = self.position_of(tender.expiry_date) - start_pct;

        let min_px = MIN_BAR_PX.max(MIN_BAR_PX * zoom_level);
        let min_pct = if effective_width > 0.0 {
            min_px / effective_width * 100.0
        } else {
            0.0
        };

        BarGeometry {
            start_pct: start_pct.clamp(0.0, 100.0),
            width_pct: raw_width_pct.max(min_pct),
        }
    }
}

// ---------------------------------------------------------------------------
// Day markers / month bands / bars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DayMarker {
    pub date: NaiveDate,
    /// Percent position within the span.
    pub position: f64,
    /// Day of month, 1–31.
    pub day_label: u32,
    /// Abbreviated month name, e.g. `"Jan"`.
    pub month_label: String,
    /// First marker of a new month (including the very first marker).
    pub is_new_month: bool,
}

/// Finite iterator over the span's calendar days.
#[derive(Debug, Clone)]
pub struct DayMarkers {
    span: TimelineSpan,
    current: Option<NaiveDate>,
    last_month: Option<(i32, u32)>,
}

impl Iterator for DayMarkers {
    type Item = DayMarker;

    fn next(&mut self) -> Option<DayMarker> {
        let date = self.current?;
        if date > self.span.max_date {
            self.current = None;
            return None;
        }
        self.current = date.succ_opt();

        let month_key = (date.year(), date.month());
        let is_new_month = self.last_month != Some(month_key);
        self.last_month = Some(month_key);

        Some(DayMarker {
            date,
            position: self.span.position_of(date),
            day_label: date.day(),
            month_label: date.format("%b").to_string(),
            is_new_month,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthBand {
    pub label: String,
    pub start_pct: f64,
    pub end_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub start_pct: f64,
    pub width_pct: f64,
}

impl BarGeometry {
    /// Pixel extent on the virtual canvas.
    pub fn to_px(&self, effective_width: f64) -> (f64, f64) {
        (
            self.start_pct / 100.0 * effective_width,
            self.width_pct / 100.0 * effective_width,
        )
    }
}
