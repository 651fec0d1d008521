//! Filter predicates over the tender collection.
//!
//! Each axis is independent; an unset axis matches everything.  The filtered
//! list feeds both the countdown engine and the timeline geometry, so
//! recomputation happens on every filter change.

use super::enums::{Priority, Status};
use super::tender::Tender;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub customer: Option<String>,
}

impl FilterSet {
    pub fn matches(&self, tender: &Tender) -> bool {
        if let Some(status) = self.status {
            if tender.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if tender.priority != priority {
                return false;
            }
        }
        if let Some(ref customer) = self.customer {
            if &tender.customer != customer {
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.customer.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Cycle the status axis: None → Offer → … → Lost → None.
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(Status::ALL[0]),
            Some(current) => Status::ALL
                .iter()
                .position(|s| *s == current)
                .and_then(|i| Status::ALL.get(i + 1))
                .copied(),
        };
    }

    /// Cycle the priority axis: None → High → Medium → Low → None.
    pub fn cycle_priority(&mut self) {
        self.priority = match self.priority {
            None => Some(Priority::ALL[0]),
            Some(current) => Priority::ALL
                .iter()
                .position(|p| *p == current)
                .and_then(|i| Priority::ALL.get(i + 1))
                .copied(),
        };
    }

    /// Cycle the customer axis through the distinct customer list.
    pub fn cycle_customer(&mut self, customers: &[String]) {
        if customers.is_empty() {
            self.customer = None;
            return;
        }
        self.customer = match self.customer {
            None => customers.first().cloned(),
            Some(ref current) => customers
                .iter()
                .position(|c| c == current)
                .and_then(|i| customers.get(i + 1))
                .cloned(),
        };
    }

    /// Human-readable summary for the report header and stats bar.
    pub fn describe(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(status) = self.status {
            parts.push(format!("Status: {status}"));
        }
        if let Some(priority) = self.priority {
            parts.push(format!("Priority: {priority}"));
        }
        if let Some(ref customer) = self.customer {
            parts.push(format!("Customer: {customer}"));
        }
        parts
    }
}
