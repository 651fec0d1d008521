//! Aggregates backing the analytics widgets: pipeline funnel, deal value by
//! customer, and priority distribution.  Pure functions over the filtered
//! tender slice; presentation draws bars from these arrays.

use std::collections::BTreeMap;

use super::enums::{Priority, Status};
use super::tender::Tender;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBucket {
    pub status: Status,
    pub count: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerBucket {
    pub customer: String,
    pub count: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriorityBucket {
    pub priority: Priority,
    pub count: usize,
    pub total_value: f64,
}

/// Funnel over the negotiation stages (offer through lost), one bucket per
/// status in process order.  Empty stages are kept so the funnel shape stays
/// stable across filters.
pub fn status_funnel(tenders: &[Tender]) -> Vec<StatusBucket> {
    Status::ALL
        .iter()
        .map(|&status| {
            let matching = tenders.iter().filter(|t| t.status == status);
            let (count, total_value) = matching.fold((0usize, 0f64), |(c, v), t| {
                (c + 1, v + t.deal_value)
            });
            StatusBucket {
                status,
                count,
                total_value,
            }
        })
        .collect()
}

/// Deal totals grouped by customer, sorted by descending value.
pub fn customer_totals(tenders: &[Tender]) -> Vec<CustomerBucket> {
    let mut grouped: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for tender in tenders {
        let entry = grouped.entry(tender.customer.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += tender.deal_value;
    }

    let mut buckets: Vec<CustomerBucket> = grouped
        .into_iter()
        .map(|(customer, (count, total_value))| CustomerBucket {
            customer: customer.to_string(),
            count,
            total_value,
        })
        .collect();
    buckets.sort_by(|a, b| {
        b.total_value
            .partial_cmp(&a.total_value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    buckets
}

/// Count and value per priority level, in High → Low order.
pub fn priority_distribution(tenders: &[Tender]) -> Vec<PriorityBucket> {
    Priority::ALL
        .iter()
        .map(|&priority| {
            let matching = tenders.iter().filter(|t| t.priority == priority);
            let (count, total_value) = matching.fold((0usize, 0f64), |(c, v), t| {
                (c + 1, v + t.deal_value)
            });
            PriorityBucket {
                priority,
                count,
                total_value,
            }
        })
        .collect()
}

/// Format a monetary amount with thousands separators for display.
pub fn format_value(value: f64) -> String {
    let whole = value.trunc() as i64;
    let mut s = String::new();
    let digits = whole.abs().to_string();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            s.push(',');
        }
        s.push(ch);
    }
    if whole < 0 {
        format!("-${s}")
    } else {
        format!("${s}")
    }
}
