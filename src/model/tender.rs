use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::{Priority, Status};

// ---------------------------------------------------------------------------
// TenderId — newtype for type safety
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenderId(pub String);

impl TenderId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TenderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TenderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tender — the core data model, an immutable snapshot from the backend
// ---------------------------------------------------------------------------

/// A tender record as served by `GET /tenders`.
///
/// `start_date`/`expiry_date` are calendar dates that place the bar on the
/// timeline; `due_date` is the exact expiration instant that drives the
/// countdown.  The backend emits naive ISO timestamps, so `due_date` carries
/// no offset and is compared against naive local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    pub id: TenderId,
    pub item: String,
    pub tender_name: String,
    pub customer: String,
    pub status: Status,
    pub priority: Priority,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub due_date: NaiveDateTime,
    pub deal_value: f64,
    pub assigned_sales_rep: String,
}

impl Tender {
    /// Duration covered on the timeline, in whole days.  Negative for
    /// records whose expiry precedes their start; the geometry layer clamps
    /// those rather than rejecting them.
    pub fn span_days(&self) -> i64 {
        (self.expiry_date - self.start_date).num_days()
    }
}

// ---------------------------------------------------------------------------
// TenderDraft — mutable form payload for POST / PUT
// ---------------------------------------------------------------------------

/// Outgoing payload for create/update.  Field set matches [`Tender`] minus
/// the server-assigned id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TenderDraft {
    pub item: String,
    pub tender_name: String,
    pub customer: String,
    pub status: Status,
    pub priority: Priority,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDateTime>,
    pub deal_value: f64,
    pub assigned_sales_rep: String,
}

impl TenderDraft {
    /// Pre-fill a draft from an existing record for editing.
    pub fn from_tender(tender: &Tender) -> Self {
        Self {
            item: tender.item.clone(),
            tender_name: tender.tender_name.clone(),
            customer: tender.customer.clone(),
            status: tender.status,
            priority: tender.priority,
            start_date: Some(tender.start_date),
            expiry_date: Some(tender.expiry_date),
            due_date: Some(tender.due_date),
            deal_value: tender.deal_value,
            assigned_sales_rep: tender.assigned_sales_rep.clone(),
        }
    }

    /// Combine a wall-clock time of day with `today` into the due instant,
    /// the way the entry form captures deadlines.
    pub fn set_due_time(&mut self, today: NaiveDate, time: chrono::NaiveTime) {
        self.due_date = Some(today.and_time(time));
    }
}
