//! Countdown engine — derives the nearest future deadline from the filtered
//! tender list and owns the at-most-once expiry notification state.
//!
//! Everything here is a pure function of `(tenders, now)` except
//! [`NotificationState`], which is an explicit owned set so the engine can be
//! unit-tested with synthetic clocks.  The 1-second tick that drives it lives
//! in the event hub.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::model::{Tender, TenderId};

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

// ---------------------------------------------------------------------------
// Countdown decomposition
// ---------------------------------------------------------------------------

/// Remaining time to a deadline, decomposed HH:MM:SS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_ms: i64,
}

impl Countdown {
    /// Decompose the delta `due - now` into hours / minutes / seconds by
    /// integer floor division, each modulo-reduced against the coarser
    /// unit.  Past deadlines report zeroed components with the (negative or
    /// zero) raw delta preserved in `total_ms`.
    pub fn until(due: NaiveDateTime, now: NaiveDateTime) -> Self {
        let total_ms = (due - now).num_milliseconds();
        if total_ms <= 0 {
            return Self {
                hours: 0,
                minutes: 0,
                seconds: 0,
                total_ms,
            };
        }
        Self {
            hours: total_ms / MS_PER_HOUR,
            minutes: (total_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (total_ms % MS_PER_MINUTE) / MS_PER_SECOND,
            total_ms,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.total_ms <= 0
    }

    /// `HHh MMm SSs` clock face for the countdown panel.
    pub fn display(&self) -> String {
        format!(
            "{:02}h {:02}m {:02}s",
            self.hours, self.minutes, self.seconds
        )
    }
}

// ---------------------------------------------------------------------------
// Severity classification
// ---------------------------------------------------------------------------

/// Colour-coding class for the active countdown; purely a function of the
/// remaining milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Less than one hour remaining.
    Critical,
    /// Less than four hours remaining.
    Warning,
    Normal,
}

impl Severity {
    pub fn classify(total_ms: i64) -> Self {
        if total_ms < MS_PER_HOUR {
            Self::Critical
        } else if total_ms < 4 * MS_PER_HOUR {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

// ---------------------------------------------------------------------------
// Next-deadline resolution
// ---------------------------------------------------------------------------

/// The tender whose `due_date` is nearest in the future, with its countdown.
#[derive(Debug, Clone)]
pub struct NextDeadline {
    pub tender: Tender,
    pub countdown: Countdown,
    pub severity: Severity,
}

/// Select the tender with the minimum future `due_date`.
///
/// Ties break in favour of the earlier list position (stable).  Returns
/// `None` when the list is empty or every deadline has passed — "no upcoming
/// deadline" is a valid state, not a failure.
pub fn next_deadline(tenders: &[Tender], now: NaiveDateTime) -> Option<NextDeadline> {
    let winner = tenders
        .iter()
        .filter(|t| t.due_date > now)
        .min_by_key(|t| t.due_date)?;

    let countdown = Countdown::until(winner.due_date, now);
    Some(NextDeadline {
        tender: winner.clone(),
        countdown,
        severity: Severity::classify(countdown.total_ms),
    })
}

// ---------------------------------------------------------------------------
// Notification state
// ---------------------------------------------------------------------------

/// An expiry alert emitted at most once per tender per session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiryAlert {
    pub id: TenderId,
    pub tender_name: String,
    pub customer: String,
}

/// Session-scoped reminder state.  Ids enter `notified` at most once and are
/// never removed, which makes `evaluate` idempotent under the repeated ticks
/// that keep firing after a deadline passes.
#[derive(Debug, Default)]
pub struct NotificationState {
    pub reminder_enabled: bool,
    notified: HashSet<TenderId>,
    /// The nearest future deadline observed on the previous tick.  When it
    /// crosses `now` it becomes the alert candidate; a deadline that was
    /// already past before it was ever armed stays silent.
    armed: Option<TenderId>,
}

impl NotificationState {
    pub fn new(reminder_enabled: bool) -> Self {
        Self {
            reminder_enabled,
            notified: HashSet::new(),
            armed: None,
        }
    }

    pub fn toggle_reminders(&mut self) {
        self.reminder_enabled = !self.reminder_enabled;
    }

    pub fn has_notified(&self, id: &TenderId) -> bool {
        self.notified.contains(id)
    }

    /// One tick's worth of notification evaluation.
    ///
    /// If the deadline armed on an earlier tick has expired by `now`,
    /// reminders are on, and its id is not yet in the notified set, the id is
    /// recorded and the alert returned — exactly once per tender per session.
    /// Afterwards the state re-arms on whatever deadline is now nearest.
    pub fn evaluate(&mut self, tenders: &[Tender], now: NaiveDateTime) -> Option<ExpiryAlert> {
        let alert = self.take_expired_alert(tenders, now);

        // Re-arm on the currently-nearest future deadline (tracked even with
        // reminders off, so the toggle has no retroactive effect).
        self.armed = next_deadline(tenders, now).map(|nd| nd.tender.id);

        alert
    }

    fn take_expired_alert(&mut self, tenders: &[Tender], now: NaiveDateTime) -> Option<ExpiryAlert> {
        if !self.reminder_enabled {
            return None;
        }
        let armed_id = self.armed.as_ref()?;
        let tender = tenders.iter().find(|t| &t.id == armed_id)?;
        if !Countdown::until(tender.due_date, now).is_expired() {
            return None;
        }
        if !self.notified.insert(tender.id.clone()) {
            return None;
        }
        Some(ExpiryAlert {
            id: tender.id.clone(),
            tender_name: tender.tender_name.clone(),
            customer: tender.customer.clone(),
        })
    }
}
