use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use tender_dashboard::model::{
    stats, FilterSet, Priority, Status, Tender, TenderDraft, TenderId,
};

fn tender(id: &str, customer: &str, status: Status, priority: Priority, value: f64) -> Tender {
    Tender {
        id: TenderId::new(id),
        item: id.to_string(),
        tender_name: format!("Tender {id}"),
        customer: customer.into(),
        status,
        priority,
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        expiry_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap(),
        deal_value: value,
        assigned_sales_rep: "Rep".into(),
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[test]
fn test_tender_deserializes_from_backend_json() {
    let json = r#"{
        "id": "T-017",
        "item": "SW-BUNDLE",
        "tender_name": "Q3 Software Bundle",
        "customer": "Globex",
        "status": "Round 2",
        "priority": "High",
        "start_date": "2025-06-01",
        "expiry_date": "2025-08-15",
        "due_date": "2025-08-15T17:00:00",
        "deal_value": 250000.0,
        "assigned_sales_rep": "Dana Cole"
    }"#;

    let t: Tender = serde_json::from_str(json).expect("backend payload parses");
    assert_eq!(t.id, TenderId::new("T-017"));
    assert_eq!(t.status, Status::Round2);
    assert_eq!(t.priority, Priority::High);
    assert_eq!(t.start_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    assert_eq!(
        t.due_date,
        NaiveDate::from_ymd_opt(2025, 8, 15)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap()
    );
    assert_eq!(t.span_days(), 75);
}

#[test]
fn test_status_serializes_as_canonical_label() {
    let json = serde_json::to_string(&Status::ContractSigned).unwrap();
    assert_eq!(json, "\"Contract Signed\"");
    assert_eq!(serde_json::to_string(&Status::Bafo).unwrap(), "\"BAFO\"");
}

#[test]
fn test_status_parses_loose_variants() {
    for raw in ["Round 1", "round1", "R1"] {
        assert_eq!(Status::from_str_loose(raw), Status::Round1);
    }
    assert_eq!(Status::from_str_loose("contract_signed"), Status::ContractSigned);
    assert_eq!(Status::from_str_loose("unheard of"), Status::Offer);
}

#[test]
fn test_draft_serializes_naive_timestamps() {
    let original = tender("a", "Acme", Status::Offer, Priority::Medium, 1.0);
    let draft = TenderDraft::from_tender(&original);
    let value = serde_json::to_value(&draft).unwrap();

    assert_eq!(value["due_date"], "2025-03-01T17:00:00");
    assert_eq!(value["start_date"], "2025-01-01");
    assert_eq!(value["status"], "Offer");
    assert!(value.get("id").is_none(), "drafts carry no id");
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[test]
fn test_filters_narrow_the_collection_conjunctively() {
    let tenders = vec![
        tender("a", "Acme", Status::Round1, Priority::High, 10.0),
        tender("b", "Acme", Status::Round1, Priority::Low, 20.0),
        tender("c", "Globex", Status::Won, Priority::High, 30.0),
    ];

    let mut filters = FilterSet::default();
    filters.status = Some(Status::Round1);
    let matched: Vec<_> = tenders.iter().filter(|t| filters.matches(t)).collect();
    assert_eq!(matched.len(), 2);

    filters.priority = Some(Priority::High);
    let matched: Vec<_> = tenders.iter().filter(|t| filters.matches(t)).collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, TenderId::new("a"));
}

#[test]
fn test_clearing_filters_restores_everything() {
    let tenders = vec![
        tender("a", "Acme", Status::Round1, Priority::High, 10.0),
        tender("b", "Globex", Status::Won, Priority::Low, 20.0),
    ];
    let mut filters = FilterSet {
        status: Some(Status::Won),
        priority: Some(Priority::Low),
        customer: Some("Globex".into()),
    };
    assert_eq!(tenders.iter().filter(|t| filters.matches(t)).count(), 1);

    filters.clear();
    assert!(filters.is_empty());
    assert_eq!(tenders.iter().filter(|t| filters.matches(t)).count(), 2);
}

#[test]
fn test_customer_cycle_walks_list_then_wraps_to_none() {
    let customers = vec!["Acme".to_string(), "Globex".to_string()];
    let mut filters = FilterSet::default();

    filters.cycle_customer(&customers);
    assert_eq!(filters.customer.as_deref(), Some("Acme"));
    filters.cycle_customer(&customers);
    assert_eq!(filters.customer.as_deref(), Some("Globex"));
    filters.cycle_customer(&customers);
    assert_eq!(filters.customer, None);
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[test]
fn test_status_funnel_keeps_empty_stages() {
    let tenders = vec![
        tender("a", "Acme", Status::Offer, Priority::High, 100.0),
        tender("b", "Acme", Status::Offer, Priority::Low, 50.0),
        tender("c", "Globex", Status::Won, Priority::High, 200.0),
    ];
    let funnel = stats::status_funnel(&tenders);

    assert_eq!(funnel.len(), Status::ALL.len());
    assert_eq!(funnel[0].status, Status::Offer);
    assert_eq!(funnel[0].count, 2);
    assert_eq!(funnel[0].total_value, 150.0);

    let round3 = funnel.iter().find(|b| b.status == Status::Round3).unwrap();
    assert_eq!(round3.count, 0, "empty stages stay in the funnel");
}

#[test]
fn test_customer_totals_sort_by_descending_value() {
    let tenders = vec![
        tender("a", "Acme", Status::Offer, Priority::High, 100.0),
        tender("b", "Globex", Status::Offer, Priority::High, 500.0),
        tender("c", "Acme", Status::Won, Priority::High, 150.0),
    ];
    let totals = stats::customer_totals(&tenders);

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].customer, "Globex");
    assert_eq!(totals[0].total_value, 500.0);
    assert_eq!(totals[1].customer, "Acme");
    assert_eq!(totals[1].count, 2);
    assert_eq!(totals[1].total_value, 250.0);
}

#[test]
fn test_format_value_inserts_thousands_separators() {
    assert_eq!(stats::format_value(0.0), "$0");
    assert_eq!(stats::format_value(950.0), "$950");
    assert_eq!(stats::format_value(1_234.0), "$1,234");
    assert_eq!(stats::format_value(12_345_678.9), "$12,345,678");
    assert_eq!(stats::format_value(-4_500.0), "-$4,500");
}
