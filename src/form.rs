//! Modal entry form for creating and editing tenders.
//!
//! A field-at-a-time text editor: Tab/arrows move between fields, Enter on
//! the last field submits.  Parsing happens on submit; a bad field keeps the
//! modal open with the problem named, nothing is sent to the backend.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{Priority, Status, Tender, TenderDraft, TenderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Status,
    Priority,
    Date,
    Time,
    Money,
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct TenderForm {
    /// Id of the record being edited; `None` for a new tender.
    pub editing: Option<TenderId>,
    pub fields: Vec<FormField>,
    pub selected: usize,
    pub error: Option<String>,
}

const FIELDS: [(&str, FieldKind); 9] = [
    ("ID / Item", FieldKind::Text),
    ("BID Name", FieldKind::Text),
    ("Customer", FieldKind::Text),
    ("Status", FieldKind::Status),
    ("Priority", FieldKind::Priority),
    ("Start Date (YYYY-MM-DD)", FieldKind::Date),
    ("Expiry Date (YYYY-MM-DD)", FieldKind::Date),
    ("Due Time (HH:MM)", FieldKind::Time),
    ("Deal Value ($)", FieldKind::Money),
];

// Field indices, matching FIELDS order plus the trailing sales-rep entry.
const IDX_ITEM: usize = 0;
const IDX_NAME: usize = 1;
const IDX_CUSTOMER: usize = 2;
const IDX_STATUS: usize = 3;
const IDX_PRIORITY: usize = 4;
const IDX_START: usize = 5;
const IDX_EXPIRY: usize = 6;
const IDX_DUE: usize = 7;
const IDX_VALUE: usize = 8;
const IDX_REP: usize = 9;

impl TenderForm {
    pub fn new() -> Self {
        let mut fields: Vec<FormField> = FIELDS
            .iter()
            .map(|&(label, kind)| FormField {
                label,
                kind,
                value: String::new(),
            })
            .collect();
        fields.push(FormField {
            label: "Assigned Sales Rep",
            kind: FieldKind::Text,
            value: String::new(),
        });
        fields[IDX_STATUS].value = Status::Offer.label().to_string();
        fields[IDX_PRIORITY].value = Priority::Medium.label().to_string();

        Self {
            editing: None,
            fields,
            selected: 0,
            error: None,
        }
    }

    /// Pre-fill from an existing record for editing.
    pub fn for_tender(tender: &Tender) -> Self {
        let mut form = Self::new();
        form.editing = Some(tender.id.clone());
        form.fields[IDX_ITEM].value = tender.item.clone();
        form.fields[IDX_NAME].value = tender.tender_name.clone();
        form.fields[IDX_CUSTOMER].value = tender.customer.clone();
        form.fields[IDX_STATUS].value = tender.status.label().to_string();
        form.fields[IDX_PRIORITY].value = tender.priority.label().to_string();
        form.fields[IDX_START].value = tender.start_date.to_string();
        form.fields[IDX_EXPIRY].value = tender.expiry_date.to_string();
        form.fields[IDX_DUE].value = tender.due_date.format("%H:%M").to_string();
        form.fields[IDX_VALUE].value = format!("{}", tender.deal_value);
        form.fields[IDX_REP].value = tender.assigned_sales_rep.clone();
        form
    }

    pub fn is_last_field(&self) -> bool {
        self.selected + 1 == self.fields.len()
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.fields.len() - 1);
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn push_char(&mut self, c: char) {
        self.fields[self.selected].value.push(c);
        self.error = None;
    }

    pub fn pop_char(&mut self) {
        self.fields[self.selected].value.pop();
        self.error = None;
    }

    /// Cycle enum-backed fields with Space instead of free typing.
    pub fn cycle_choice(&mut self) {
        let field = &mut self.fields[self.selected];
        match field.kind {
            FieldKind::Status => {
                let current = Status::from_str_loose(&field.value);
                let next = Status::ALL
                    .iter()
                    .position(|s| *s == current)
                    .map(|i| Status::ALL[(i + 1) % Status::ALL.len()])
                    .unwrap_or(Status::Offer);
                field.value = next.label().to_string();
            }
            FieldKind::Priority => {
                let current = Priority::from_str_loose(&field.value);
                let next = Priority::ALL
                    .iter()
                    .position(|p| *p == current)
                    .map(|i| Priority::ALL[(i + 1) % Priority::ALL.len()])
                    .unwrap_or(Priority::Medium);
                field.value = next.label().to_string();
            }
            _ => {}
        }
    }

    /// Validate and build the outgoing draft.  The due instant combines the
    /// entered time of day with today's date, as the entry form always has.
    pub fn to_draft(&self, today: NaiveDate) -> Result<TenderDraft, String> {
        let text = |idx: usize, what: &str| -> Result<String, String> {
            let v = self.fields[idx].value.trim().to_string();
            if v.is_empty() {
                Err(format!("{what} is required"))
            } else {
                Ok(v)
            }
        };

        let start_date: NaiveDate = self.fields[IDX_START]
            .value
            .trim()
            .parse()
            .map_err(|_| "start date must be YYYY-MM-DD".to_string())?;
        let expiry_date: NaiveDate = self.fields[IDX_EXPIRY]
            .value
            .trim()
            .parse()
            .map_err(|_| "expiry date must be YYYY-MM-DD".to_string())?;
        let due_time = NaiveTime::parse_from_str(self.fields[IDX_DUE].value.trim(), "%H:%M")
            .map_err(|_| "due time must be HH:MM".to_string())?;
        let deal_value: f64 = self.fields[IDX_VALUE]
            .value
            .trim()
            .parse()
            .map_err(|_| "deal value must be a number".to_string())?;
        if deal_value < 0.0 {
            return Err("deal value must not be negative".to_string());
        }

        let due_date: NaiveDateTime = today.and_time(due_time);

        Ok(TenderDraft {
            item: text(IDX_ITEM, "item")?,
            tender_name: text(IDX_NAME, "BID name")?,
            customer: text(IDX_CUSTOMER, "customer")?,
            status: Status::from_str_loose(&self.fields[IDX_STATUS].value),
            priority: Priority::from_str_loose(&self.fields[IDX_PRIORITY].value),
            start_date: Some(start_date),
            expiry_date: Some(expiry_date),
            due_date: Some(due_date),
            deal_value,
            assigned_sales_rep: text(IDX_REP, "sales rep")?,
        })
    }
}

impl Default for TenderForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> TenderForm {
        let mut form = TenderForm::new();
        form.fields[IDX_ITEM].value = "SW-100".into();
        form.fields[IDX_NAME].value = "Q1 Software Deal".into();
        form.fields[IDX_CUSTOMER].value = "Acme Corp".into();
        form.fields[IDX_START].value = "2025-06-01".into();
        form.fields[IDX_EXPIRY].value = "2025-07-15".into();
        form.fields[IDX_DUE].value = "17:30".into();
        form.fields[IDX_VALUE].value = "125000.50".into();
        form.fields[IDX_REP].value = "John Smith".into();
        form
    }

    #[test]
    fn draft_combines_due_time_with_today() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let draft = filled_form().to_draft(today).unwrap();
        assert_eq!(
            draft.due_date,
            Some(today.and_hms_opt(17, 30, 0).unwrap())
        );
        assert_eq!(draft.deal_value, 125000.50);
    }

    #[test]
    fn missing_required_field_is_reported() {
        let mut form = filled_form();
        form.fields[IDX_CUSTOMER].value.clear();
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let err = form.to_draft(today).unwrap_err();
        assert!(err.contains("customer"));
    }

    #[test]
    fn bad_date_is_rejected() {
        let mut form = filled_form();
        form.fields[IDX_START].value = "june 1st".into();
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert!(form.to_draft(today).is_err());
    }

    #[test]
    fn status_cycles_through_all_stages() {
        let mut form = TenderForm::new();
        form.selected = IDX_STATUS;
        for expected in Status::ALL.iter().skip(1) {
            form.cycle_choice();
            assert_eq!(form.fields[IDX_STATUS].value, expected.label());
        }
        form.cycle_choice();
        assert_eq!(form.fields[IDX_STATUS].value, Status::Offer.label());
    }
}
