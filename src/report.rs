//! Plain-text report export.
//!
//! The report is assembled section by section — header, timeline, detail
//! table, analytics.  Each section is captured independently: a section
//! that fails to render is logged and skipped, and the remaining sections
//! still make it into the file.  Export never takes the dashboard down.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::model::{stats, FilterSet, Tender};
use crate::timeline::TimelineSpan;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Width of the ASCII timeline lane in the report.
const LANE_WIDTH: usize = 72;
const RULE: &str =
    "================================================================================";

/// Everything the exporter needs, captured at the moment of export.
pub struct ReportSnapshot<'a> {
    pub tenders: &'a [Tender],
    pub filters: &'a FilterSet,
    pub today: NaiveDate,
}

type SectionFn = fn(&mut String, &ReportSnapshot);

const SECTIONS: [(&str, SectionFn); 3] = [
    ("timeline", render_timeline),
    ("table", render_table),
    ("analytics", render_analytics),
];

/// Write the report and return the path of the produced file.
pub fn export_report(dir: &Path, snapshot: &ReportSnapshot) -> Result<PathBuf, ReportError> {
    let now = Local::now();
    let file_name = format!("tender-report-{}.txt", now.format("%Y-%m-%d-%H%M"));
    let path = dir.join(file_name);

    let mut out = String::new();
    render_header(&mut out, snapshot, now.format("%B %d, %Y %H:%M").to_string());
    capture_sections(&mut out, snapshot, &SECTIONS);

    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    std::fs::write(&path, out).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Per-section capture: a section that panics while rendering is logged
/// and skipped, its partial output discarded; the rest of the report still
/// gets written.
fn capture_sections(out: &mut String, snapshot: &ReportSnapshot, sections: &[(&str, SectionFn)]) {
    for (name, section) in sections {
        let mut buf = String::new();
        let captured = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            section(&mut buf, snapshot);
        }));
        match captured {
            Ok(()) => out.push_str(&buf),
            Err(_) => warn!(section = *name, "report section failed to render, skipping"),
        }
    }
}

fn render_header(out: &mut String, snapshot: &ReportSnapshot, generated: String) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "SALES TENDER DASHBOARD REPORT");
    let _ = writeln!(out, "Generated: {generated}");
    let _ = writeln!(out, "Total tenders: {}", snapshot.tenders.len());
    let active = snapshot.filters.describe();
    if !active.is_empty() {
        let _ = writeln!(out, "Applied filters: {}", active.join(", "));
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
}

/// ASCII gantt rendering driven by the same geometry engine as the screen.
fn render_timeline(out: &mut String, snapshot: &ReportSnapshot) {
    let _ = writeln!(out, "PROJECT TIMELINE");
    let Some(span) = TimelineSpan::compute(snapshot.tenders) else {
        let _ = writeln!(out, "  (no tenders to plot)\n");
        return;
    };

    let _ = writeln!(
        out,
        "  {} .. {}  ({} days)",
        span.min_date, span.max_date, span.total_days()
    );

    for tender in snapshot.tenders {
        let start = pct_to_col(span.position_of(tender.start_date));
        let end = pct_to_col(span.position_of(tender.expiry_date)).max(start + 1);

        let mut lane = vec![b'.'; LANE_WIDTH];
        for cell in lane.iter_mut().take(end.min(LANE_WIDTH)).skip(start.min(LANE_WIDTH)) {
            *cell = b'#';
        }
        let today_col = pct_to_col(span.position_of(snapshot.today));
        if today_col < LANE_WIDTH {
            lane[today_col] = b'|';
        }

        let label: String = tender.tender_name.chars().take(24).collect();
        let _ = writeln!(
            out,
            "  {label:<24} [{}] {}",
            String::from_utf8_lossy(&lane),
            tender.status
        );
    }
    let _ = writeln!(out);
}

fn render_table(out: &mut String, snapshot: &ReportSnapshot) {
    let _ = writeln!(out, "DETAILED TENDERS");
    let _ = writeln!(
        out,
        "  {:<12} {:<24} {:<16} {:<16} {:<8} {:>14}  {:<10} {:<10}",
        "ID", "Name", "Customer", "Status", "Prio", "Value", "Start", "Expiry"
    );
    for t in snapshot.tenders {
        let _ = writeln!(
            out,
            "  {:<12} {:<24} {:<16} {:<16} {:<8} {:>14}  {:<10} {:<10}",
            truncate(&t.item, 12),
            truncate(&t.tender_name, 24),
            truncate(&t.customer, 16),
            t.status.label(),
            t.priority.label(),
            stats::format_value(t.deal_value),
            t.start_date,
            t.expiry_date,
        );
    }
    if snapshot.tenders.is_empty() {
        let _ = writeln!(out, "  (no tenders)");
    }
    let _ = writeln!(out);
}

fn render_analytics(out: &mut String, snapshot: &ReportSnapshot) {
    let _ = writeln!(out, "ANALYTICS OVERVIEW");

    let _ = writeln!(out, "  Pipeline funnel:");
    for bucket in stats::status_funnel(snapshot.tenders) {
        let _ = writeln!(
            out,
            "    {:<16} {:>3}  {}",
            bucket.status.label(),
            bucket.count,
            stats::format_value(bucket.total_value)
        );
    }

    let _ = writeln!(out, "  Deal value by customer:");
    for bucket in stats::customer_totals(snapshot.tenders) {
        let _ = writeln!(
            out,
            "    {:<24} {:>3}  {}",
            truncate(&bucket.customer, 24),
            bucket.count,
            stats::format_value(bucket.total_value)
        );
    }

    let _ = writeln!(out, "  Priority distribution:");
    for bucket in stats::priority_distribution(snapshot.tenders) {
        let _ = writeln!(
            out,
            "    {:<8} {:>3}  {}",
            bucket.priority.label(),
            bucket.count,
            stats::format_value(bucket.total_value)
        );
    }
    let _ = writeln!(out);
}

fn pct_to_col(pct: f64) -> usize {
    (pct.clamp(0.0, 100.0) / 100.0 * (LANE_WIDTH as f64 - 1.0)).round() as usize
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(1)).chain(['…']).collect()
    }
}
