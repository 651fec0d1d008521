use chrono::NaiveDate;

use tender_dashboard::model::{Priority, Status, Tender, TenderId};
use tender_dashboard::timeline::{ScrollSync, TimelineSpan, ViewState, MAX_ZOOM, MIN_ZOOM};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn tender(id: &str, start: NaiveDate, expiry: NaiveDate) -> Tender {
    Tender {
        id: TenderId::new(id),
        item: id.to_string(),
        tender_name: format!("Tender {id}"),
        customer: "Acme".into(),
        status: Status::Offer,
        priority: Priority::Medium,
        start_date: start,
        expiry_date: expiry,
        due_date: expiry.and_hms_opt(17, 0, 0).expect("valid time"),
        deal_value: 1000.0,
        assigned_sales_rep: "Rep".into(),
    }
}

// ---------------------------------------------------------------------------
// Span computation
// ---------------------------------------------------------------------------

#[test]
fn test_span_buffers_min_and_max_by_two_days() {
    let tenders = vec![
        tender("a", date(2025, 3, 10), date(2025, 4, 20)),
        tender("b", date(2025, 3, 1), date(2025, 3, 15)),
    ];
    let span = TimelineSpan::compute(&tenders).expect("non-empty list has a span");
    assert_eq!(span.min_date, date(2025, 2, 27));
    assert_eq!(span.max_date, date(2025, 4, 22));
}

#[test]
fn test_empty_list_has_no_span() {
    assert_eq!(TimelineSpan::compute(&[]), None);
}

#[test]
fn test_single_day_span_never_divides_by_zero() {
    // Start == expiry: raw span is a point, buffered to 4 days.
    let tenders = vec![tender("a", date(2025, 5, 1), date(2025, 5, 1))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    assert_eq!(span.total_days(), 4);
    assert!(span.position_of(date(2025, 5, 1)).is_finite());
}

#[test]
fn test_effective_width_floor_and_zoom() {
    // 10-tender-day span → 14 buffered days → 14*30 = 420 < 800 floor.
    let tenders = vec![tender("a", date(2025, 1, 3), date(2025, 1, 13))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    assert_eq!(span.effective_width(1.0), 800.0);
    assert_eq!(span.effective_width(2.0), 1600.0);

    // 60 days → 64 buffered → 1920 > floor.
    let wide = vec![tender("b", date(2025, 1, 1), date(2025, 3, 2))];
    let span = TimelineSpan::compute(&wide).unwrap();
    assert_eq!(span.effective_width(1.0), span.total_days() as f64 * 30.0);
}

// ---------------------------------------------------------------------------
// Position mapping
// ---------------------------------------------------------------------------

#[test]
fn test_position_endpoints_are_zero_and_hundred() {
    let tenders = vec![tender("a", date(2025, 1, 1), date(2025, 1, 10))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    assert_eq!(span.position_of(span.min_date), 0.0);
    assert_eq!(span.position_of(span.max_date), 100.0);
}

#[test]
fn test_position_is_monotone_in_date() {
    let tenders = vec![tender("a", date(2025, 1, 1), date(2025, 3, 1))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let mut prev = f64::NEG_INFINITY;
    for marker in span.day_markers() {
        assert!(marker.position > prev, "positions must strictly increase");
        prev = marker.position;
    }
}

#[test]
fn test_date_at_round_trips_marker_positions() {
    let tenders = vec![tender("a", date(2025, 2, 1), date(2025, 3, 15))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let eff = span.effective_width(1.0);
    for marker in span.day_markers() {
        let px = marker.position / 100.0 * eff;
        assert_eq!(
            span.date_at(px, 0.0, eff),
            marker.date,
            "marker at {px}px should map back to its date"
        );
    }
}

#[test]
fn test_date_at_clamps_outside_canvas() {
    let tenders = vec![tender("a", date(2025, 1, 1), date(2025, 1, 10))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let eff = span.effective_width(1.0);
    assert_eq!(span.date_at(-500.0, 0.0, eff), span.min_date);
    assert_eq!(span.date_at(eff + 500.0, 0.0, eff), span.max_date);
}

// ---------------------------------------------------------------------------
// Day markers and month bands
// ---------------------------------------------------------------------------

#[test]
fn test_markers_cover_every_day_of_the_span() {
    // Jan 1–10 raw → Dec 30 to Jan 12 buffered → 14 days, 15 markers.
    let tenders = vec![tender("a", date(2025, 1, 1), date(2025, 1, 10))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let markers: Vec<_> = span.day_markers().collect();

    assert_eq!(markers.len(), span.total_days() as usize + 1);
    assert_eq!(markers.first().unwrap().position, 0.0);
    assert_eq!(markers.last().unwrap().position, 100.0);
}

#[test]
fn test_first_marker_and_month_starts_flag_new_month() {
    let tenders = vec![tender("a", date(2025, 1, 1), date(2025, 1, 10))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let markers: Vec<_> = span.day_markers().collect();

    assert!(markers[0].is_new_month, "the very first marker starts a month");
    let new_months: Vec<_> = markers.iter().filter(|m| m.is_new_month).collect();
    // Dec 30 (first) and Jan 1.
    assert_eq!(new_months.len(), 2);
    assert_eq!(new_months[1].date, date(2025, 1, 1));
    assert_eq!(new_months[1].day_label, 1);
    assert_eq!(new_months[1].month_label, "Jan");
}

#[test]
fn test_day_markers_iterator_is_restartable() {
    let tenders = vec![tender("a", date(2025, 1, 1), date(2025, 1, 5))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let first: Vec<_> = span.day_markers().collect();
    let second: Vec<_> = span.day_markers().collect();
    assert_eq!(first, second);
}

#[test]
fn test_month_bands_tile_the_span() {
    let tenders = vec![tender("a", date(2025, 1, 15), date(2025, 3, 15))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let bands = span.month_bands();

    assert_eq!(bands.len(), 3, "Jan, Feb, Mar");
    assert_eq!(bands[0].start_pct, 0.0);
    assert_eq!(bands.last().unwrap().end_pct, 100.0);
    for window in bands.windows(2) {
        assert_eq!(
            window[0].end_pct, window[1].start_pct,
            "bands must be contiguous"
        );
    }
}

// ---------------------------------------------------------------------------
// Bar geometry
// ---------------------------------------------------------------------------

#[test]
fn test_bar_minimum_width_scales_with_zoom() {
    // A one-day tender inside a three-month span renders well below 80px
    // raw; the minimum must kick in, and grow with zoom.
    let tiny = tender("tiny", date(2025, 2, 1), date(2025, 2, 2));
    let tenders = vec![
        tiny.clone(),
        tender("wide", date(2025, 1, 1), date(2025, 4, 1)),
    ];
    let span = TimelineSpan::compute(&tenders).unwrap();

    for zoom in [1.0, 2.0, 5.0] {
        let eff = span.effective_width(zoom);
        let geometry = span.bar_geometry(&tiny, zoom, eff);
        let (_, width_px) = geometry.to_px(eff);
        let expected_min = 80.0_f64.max(80.0 * zoom);
        assert!(
            width_px >= expected_min - 1e-6,
            "zoom {zoom}: bar width {width_px} below minimum {expected_min}"
        );
    }
}

#[test]
fn test_min_bar_width_does_not_shrink_below_floor_when_zoomed_out() {
    let tiny = tender("tiny", date(2025, 2, 1), date(2025, 2, 2));
    let tenders = vec![
        tiny.clone(),
        tender("wide", date(2025, 1, 1), date(2025, 4, 1)),
    ];
    let span = TimelineSpan::compute(&tenders).unwrap();

    let zoom = 0.3;
    let eff = span.effective_width(zoom);
    let (_, width_px) = span.bar_geometry(&tiny, zoom, eff).to_px(eff);
    assert!(width_px >= 80.0 - 1e-6, "80px floor holds below zoom 1.0");
}

#[test]
fn test_inverted_dates_still_render_a_visible_bar() {
    let backwards = tender("x", date(2025, 3, 1), date(2025, 2, 1));
    let tenders = vec![backwards.clone()];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let eff = span.effective_width(1.0);
    let geometry = span.bar_geometry(&backwards, 1.0, eff);
    assert!(geometry.width_pct > 0.0, "negative raw width must clamp up");
}

// ---------------------------------------------------------------------------
// Zoom clamping
// ---------------------------------------------------------------------------

#[test]
fn test_repeated_zoom_in_clamps_exactly_at_max() {
    let mut view = ViewState::default();
    for _ in 0..20 {
        view.zoom_in();
    }
    assert_eq!(view.zoom_level, MAX_ZOOM);
    view.zoom_in();
    assert_eq!(view.zoom_level, MAX_ZOOM, "further zooming is a no-op");
}

#[test]
fn test_repeated_zoom_out_clamps_exactly_at_min() {
    let mut view = ViewState::default();
    for _ in 0..20 {
        view.zoom_out();
    }
    assert_eq!(view.zoom_level, MIN_ZOOM);
}

#[test]
fn test_hover_maps_pointer_to_date_and_percent() {
    let tenders = vec![tender("a", date(2025, 1, 1), date(2025, 1, 10))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let mut view = ViewState::default();
    let eff = span.effective_width(view.zoom_level);

    view.set_hover(&span, eff / 2.0, 0.0, eff);
    let hover = view.hover.expect("hover set inside the canvas");
    assert_eq!(hover.date, span.date_at(eff / 2.0, 0.0, eff));
    assert!((hover.position_pct - 50.0).abs() < 8.0);

    view.clear_hover();
    assert_eq!(view.hover, None);
}

// ---------------------------------------------------------------------------
// Go-to-today / scroll coordination
// ---------------------------------------------------------------------------

#[test]
fn test_today_target_places_today_at_quarter_viewport() {
    let tenders = vec![tender("a", date(2025, 1, 1), date(2025, 6, 1))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let view = ViewState::default();
    let viewport = 400.0;

    let today = date(2025, 3, 1);
    let target = view.today_scroll_target(&span, today, viewport);
    let eff = span.effective_width(view.zoom_level);
    let expected = span.position_of(today) / 100.0 * eff - viewport / 4.0;
    assert_eq!(target, expected.max(0.0));
}

#[test]
fn test_today_target_clamps_to_zero_near_span_start() {
    let tenders = vec![tender("a", date(2025, 1, 1), date(2025, 6, 1))];
    let span = TimelineSpan::compute(&tenders).unwrap();
    let view = ViewState::default();

    // Today at the very start of the span: raw target is negative.
    let target = view.today_scroll_target(&span, span.min_date, 400.0);
    assert_eq!(target, 0.0);
}

#[test]
fn test_animated_centering_settles_within_a_second_of_frames() {
    // Animation frames run at ~30 fps, so a long centering must converge
    // in at most 30 steps to finish within a second.
    let mut scroll = ScrollSync::default();
    scroll.initialized = true;
    scroll.scroll_to(600.0);

    let mut frames = 0;
    while scroll.step() {
        frames += 1;
        assert!(frames <= 30, "600px centering took more than 30 frames");
    }
    assert!((scroll.offset() - 600.0).abs() < 1.0);
}

#[test]
fn test_first_centering_jumps_then_later_ones_animate() {
    let mut scroll = ScrollSync::default();
    assert!(!scroll.initialized);

    scroll.jump(300.0);
    scroll.initialized = true;
    assert_eq!(scroll.offset(), 300.0);
    assert!(!scroll.is_animating(), "initial centering is instant");

    scroll.scroll_to(600.0);
    assert!(scroll.is_animating(), "later centerings ease towards target");
    assert_eq!(scroll.offset(), 300.0, "offset moves only on step()");
    while scroll.step() {}
    assert!((scroll.offset() - 600.0).abs() < 1.0);
}
