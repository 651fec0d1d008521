use chrono::{Duration, NaiveDate, NaiveDateTime};

use tender_dashboard::countdown::{next_deadline, Countdown, NotificationState, Severity};
use tender_dashboard::model::{Priority, Status, Tender, TenderId};

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 10)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn tender(id: &str, due: NaiveDateTime) -> Tender {
    Tender {
        id: TenderId::new(id),
        item: id.to_string(),
        tender_name: format!("Tender {id}"),
        customer: "Acme".into(),
        status: Status::Round1,
        priority: Priority::High,
        start_date: due.date() - Duration::days(30),
        expiry_date: due.date(),
        due_date: due,
        deal_value: 50_000.0,
        assigned_sales_rep: "Rep".into(),
    }
}

// ---------------------------------------------------------------------------
// Countdown decomposition
// ---------------------------------------------------------------------------

#[test]
fn test_countdown_decomposes_full_hours_minutes_seconds() {
    let c = Countdown::until(at(14, 30, 15), at(9, 0, 0));
    assert_eq!((c.hours, c.minutes, c.seconds), (5, 30, 15));
    assert_eq!(c.display(), "05h 30m 15s");
}

#[test]
fn test_countdown_total_ms_decreases_monotonically() {
    let due = at(18, 0, 0);
    let mut prev = i64::MAX;
    for tick in 0..120 {
        let now = at(9, 0, 0) + Duration::seconds(tick);
        let c = Countdown::until(due, now);
        assert!(c.total_ms < prev, "each tick must strictly reduce total_ms");
        prev = c.total_ms;
    }
}

#[test]
fn test_exact_deadline_counts_as_expired() {
    let c = Countdown::until(at(12, 0, 0), at(12, 0, 0));
    assert!(c.is_expired());
    assert_eq!((c.hours, c.minutes, c.seconds), (0, 0, 0));
}

#[test]
fn test_countdown_spanning_days_reports_hours_over_24() {
    let due = NaiveDate::from_ymd_opt(2025, 6, 12)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let c = Countdown::until(due, at(9, 0, 0));
    assert_eq!(c.hours, 48, "no day unit, hours keep counting");
}

// ---------------------------------------------------------------------------
// Next-deadline selection
// ---------------------------------------------------------------------------

#[test]
fn test_next_deadline_picks_nearest_future_due() {
    let tenders = vec![
        tender("far", at(20, 0, 0)),
        tender("near", at(12, 0, 0)),
        tender("past", at(1, 0, 0)),
    ];
    let nd = next_deadline(&tenders, at(9, 0, 0)).expect("two future deadlines exist");
    assert_eq!(nd.tender.id, TenderId::new("near"));
    assert_eq!(nd.countdown.hours, 3);
}

#[test]
fn test_next_deadline_ties_break_by_list_position() {
    let tenders = vec![tender("first", at(12, 0, 0)), tender("second", at(12, 0, 0))];
    let nd = next_deadline(&tenders, at(9, 0, 0)).unwrap();
    assert_eq!(nd.tender.id, TenderId::new("first"));
}

#[test]
fn test_no_future_deadline_is_a_valid_state() {
    assert!(next_deadline(&[], at(9, 0, 0)).is_none());

    let all_past = vec![tender("a", at(1, 0, 0)), tender("b", at(2, 0, 0))];
    assert!(next_deadline(&all_past, at(9, 0, 0)).is_none());
}

#[test]
fn test_severity_tracks_remaining_time() {
    let tenders = vec![tender("a", at(12, 0, 0))];
    // 5 hours out: normal.
    assert_eq!(
        next_deadline(&tenders, at(7, 0, 0)).unwrap().severity,
        Severity::Normal
    );
    // 3 hours out: warning.
    assert_eq!(
        next_deadline(&tenders, at(9, 0, 0)).unwrap().severity,
        Severity::Warning
    );
    // 30 minutes out: critical.
    assert_eq!(
        next_deadline(&tenders, at(11, 30, 0)).unwrap().severity,
        Severity::Critical
    );
}

// ---------------------------------------------------------------------------
// Notification state
// ---------------------------------------------------------------------------

#[test]
fn test_alert_fires_exactly_once_per_tender() {
    let tenders = vec![tender("a", at(10, 0, 0))];
    let mut state = NotificationState::new(true);

    // Arm before the deadline.
    assert!(state.evaluate(&tenders, at(9, 59, 59)).is_none());

    // The tick that crosses the deadline fires.
    let alert = state
        .evaluate(&tenders, at(10, 0, 0))
        .expect("crossing tick must alert");
    assert_eq!(alert.id, TenderId::new("a"));

    // Every later tick stays silent.
    for tick in 1..60 {
        assert!(
            state.evaluate(&tenders, at(10, 0, tick)).is_none(),
            "tick {tick} re-alerted"
        );
    }
    assert!(state.has_notified(&TenderId::new("a")));
}

#[test]
fn test_two_deadlines_alert_independently() {
    // One due in 30 minutes, one in 5 hours: each gets its own single alert.
    let tenders = vec![tender("soon", at(9, 30, 0)), tender("later", at(14, 0, 0))];
    let mut state = NotificationState::new(true);

    assert!(state.evaluate(&tenders, at(9, 0, 0)).is_none());

    let first = state.evaluate(&tenders, at(9, 30, 0)).expect("first expiry");
    assert_eq!(first.id, TenderId::new("soon"));

    // In between: armed on "later", nothing fires.
    assert!(state.evaluate(&tenders, at(11, 0, 0)).is_none());

    let second = state.evaluate(&tenders, at(14, 0, 0)).expect("second expiry");
    assert_eq!(second.id, TenderId::new("later"));

    assert!(state.evaluate(&tenders, at(15, 0, 0)).is_none());
}

#[test]
fn test_disabled_reminders_stay_silent() {
    let tenders = vec![tender("a", at(10, 0, 0))];
    let mut state = NotificationState::new(false);

    state.evaluate(&tenders, at(9, 59, 0));
    assert!(state.evaluate(&tenders, at(10, 0, 0)).is_none());
    assert!(!state.has_notified(&TenderId::new("a")));
}

#[test]
fn test_toggle_mid_session_applies_from_next_tick() {
    let tenders = vec![tender("a", at(10, 0, 0)), tender("b", at(11, 0, 0))];
    let mut state = NotificationState::new(false);

    // First deadline passes while reminders are off.
    state.evaluate(&tenders, at(9, 59, 0));
    assert!(state.evaluate(&tenders, at(10, 0, 30)).is_none());

    // Turn reminders on; the second deadline alerts normally.
    state.toggle_reminders();
    assert!(state.evaluate(&tenders, at(10, 30, 0)).is_none());
    let alert = state.evaluate(&tenders, at(11, 0, 0)).expect("b expires");
    assert_eq!(alert.id, TenderId::new("b"));
}

#[test]
fn test_already_past_deadlines_never_alert() {
    // A deadline in the past at startup is never armed, so it cannot fire.
    let tenders = vec![tender("stale", at(1, 0, 0))];
    let mut state = NotificationState::new(true);

    for tick in 0..10 {
        assert!(state.evaluate(&tenders, at(9, 0, tick)).is_none());
    }
}
