use billbook::{
    BillbookError, InvoiceDraft, InvoiceId, InvoicePatch, InvoiceService, InvoiceStore,
    LineItemDraft, MemoryStore, StoreError,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn item(description: &str, quantity: i64, unit_price: rust_decimal::Decimal) -> LineItemDraft {
    LineItemDraft {
        description: description.into(),
        quantity,
        unit_price,
    }
}

fn draft(number: &str, details: Vec<LineItemDraft>) -> InvoiceDraft {
    InvoiceDraft {
        invoice_number: number.into(),
        customer_name: "Acme".into(),
        date: Some(date(2024, 1, 1)),
        details,
    }
}

fn service() -> InvoiceService<MemoryStore> {
    let _ = env_logger::builder().is_test(true).try_init();
    InvoiceService::new(MemoryStore::new())
}

// --- Create ---

#[test]
fn create_persists_header_and_items_in_order() {
    let mut service = service();
    let invoice = service
        .create(&draft(
            "INV-001",
            vec![
                item("Widget", 2, dec!(5.00)),
                item("Gadget", 1, dec!(19.99)),
                item("Gizmo", 4, dec!(0.25)),
            ],
        ))
        .unwrap();

    assert_eq!(invoice.invoice_number, "INV-001");
    assert_eq!(invoice.details.len(), 3);

    // Each stored item is linked to the new invoice, in submission order
    let stored = service.store().line_items(invoice.id).unwrap();
    assert_eq!(stored.len(), 3);
    let names: Vec<_> = stored.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(names, ["Widget", "Gadget", "Gizmo"]);
    assert!(stored.iter().all(|i| i.invoice_id == invoice.id));

    // Line totals are derived per item
    assert_eq!(invoice.details[0].line_total(), dec!(10.00));
    assert_eq!(invoice.details[1].line_total(), dec!(19.99));
    assert_eq!(invoice.details[2].line_total(), dec!(1.00));
}

#[test]
fn create_rejects_invalid_line_items() {
    let mut service = service();
    let err = service
        .create(&draft("INV-001", vec![item("Widget", -1, dec!(5.00))]))
        .unwrap_err();

    assert!(matches!(err, BillbookError::Validation(_)));
    // Nothing was written
    assert_eq!(service.store().header_count(), 0);
    assert_eq!(service.store().line_item_count(), 0);
}

#[test]
fn create_then_duplicate_number_fails_end_to_end() {
    let mut service = service();
    let invoice = service
        .create(&draft("INV-001", vec![item("Widget", 2, dec!(5.00))]))
        .unwrap();
    assert_eq!(invoice.details[0].line_total(), dec!(10.00));

    // Same number, everything else different — still rejected
    let mut second = draft("INV-001", vec![item("Sprocket", 9, dec!(1.00))]);
    second.customer_name = "Globex".into();
    second.date = Some(date(2025, 6, 30));

    match service.create(&second).unwrap_err() {
        BillbookError::Validation(e) => {
            assert_eq!(e.message, "Invoice number must be unique.")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(service.store().header_count(), 1);
}

// --- Update ---

#[test]
fn update_fully_replaces_line_items() {
    let mut service = service();
    let invoice = service
        .create(&draft(
            "INV-001",
            vec![
                item("One", 1, dec!(1.00)),
                item("Two", 2, dec!(2.00)),
                item("Three", 3, dec!(3.00)),
            ],
        ))
        .unwrap();
    assert_eq!(service.store().line_item_count(), 3);

    let updated = service
        .update(
            invoice.id,
            &InvoicePatch {
                details: vec![item("Replacement", 5, dec!(4.00))],
                ..Default::default()
            },
        )
        .unwrap();

    // 3 items before, exactly 1 after — full replace, not merge
    assert_eq!(updated.details.len(), 1);
    assert_eq!(service.store().line_item_count(), 1);
    assert_eq!(updated.details[0].description, "Replacement");
    assert_eq!(updated.details[0].line_total(), dec!(20.00));

    // The old item records are gone for good
    for old in &invoice.details {
        assert!(matches!(
            service.store().line_item(old.id),
            Err(StoreError::LineItemNotFound(_))
        ));
    }
}

#[test]
fn update_keeps_absent_header_fields() {
    let mut service = service();
    let invoice = service
        .create(&draft("INV-001", vec![item("Widget", 2, dec!(5.00))]))
        .unwrap();

    let updated = service
        .update(
            invoice.id,
            &InvoicePatch {
                customer_name: Some("Globex".into()),
                details: vec![item("Widget", 2, dec!(5.00))],
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.customer_name, "Globex");
    // Untouched fields fall back to the stored values
    assert_eq!(updated.invoice_number, "INV-001");
    assert_eq!(updated.date, date(2024, 1, 1));
}

#[test]
fn update_keeping_own_number_is_not_a_conflict() {
    let mut service = service();
    let invoice = service
        .create(&draft("INV-001", vec![item("Widget", 2, dec!(5.00))]))
        .unwrap();

    let updated = service
        .update(
            invoice.id,
            &InvoicePatch {
                invoice_number: Some("INV-001".into()),
                details: vec![item("Widget", 2, dec!(5.00))],
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.invoice_number, "INV-001");
}

#[test]
fn update_to_another_invoices_number_fails() {
    let mut service = service();
    service
        .create(&draft("INV-001", vec![item("Widget", 2, dec!(5.00))]))
        .unwrap();
    let second = service
        .create(&draft("INV-002", vec![item("Gadget", 1, dec!(3.00))]))
        .unwrap();

    let err = service
        .update(
            second.id,
            &InvoicePatch {
                invoice_number: Some("INV-001".into()),
                details: vec![item("Gadget", 1, dec!(3.00))],
                ..Default::default()
            },
        )
        .unwrap_err();
    match err {
        BillbookError::Validation(e) => assert_eq!(e.message, "Invoice number must be unique."),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn update_with_no_items_is_rejected_and_keeps_existing_items() {
    let mut service = service();
    let invoice = service
        .create(&draft("INV-001", vec![item("Widget", 2, dec!(5.00))]))
        .unwrap();

    let err = service
        .update(invoice.id, &InvoicePatch::default())
        .unwrap_err();
    match err {
        BillbookError::Validation(e) => {
            assert_eq!(e.message, "Invoice must have at least one detail item.")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    // Validation runs before any destructive step
    assert_eq!(service.store().line_item_count(), 1);
}

#[test]
fn update_of_missing_invoice_fails_with_not_found() {
    let mut service = service();
    let err = service
        .update(InvoiceId(42), &InvoicePatch::default())
        .unwrap_err();
    assert!(matches!(
        err,
        BillbookError::Store(StoreError::InvoiceNotFound(InvoiceId(42)))
    ));
}

// --- Delete ---

#[test]
fn delete_cascades_and_subsequent_lookups_fail() {
    let mut service = service();
    let invoice = service
        .create(&draft(
            "INV-001",
            vec![item("Widget", 2, dec!(5.00)), item("Gadget", 1, dec!(3.00))],
        ))
        .unwrap();

    let receipt = service.delete(invoice.id).unwrap();
    assert_eq!(receipt.invoice_id, invoice.id);
    assert_eq!(receipt.deleted_line_items, 2);

    assert!(matches!(
        service.get(invoice.id),
        Err(BillbookError::Store(StoreError::InvoiceNotFound(_)))
    ));
    for detail in &invoice.details {
        assert!(matches!(
            service.store().line_item(detail.id),
            Err(StoreError::LineItemNotFound(_))
        ));
    }
    assert_eq!(service.store().header_count(), 0);
    assert_eq!(service.store().line_item_count(), 0);
}

#[test]
fn delete_of_missing_invoice_fails_with_not_found() {
    let mut service = service();
    let err = service.delete(InvoiceId(7)).unwrap_err();
    assert!(matches!(
        err,
        BillbookError::Store(StoreError::InvoiceNotFound(InvoiceId(7)))
    ));
}

// --- Reads ---

#[test]
fn list_returns_assembled_aggregates_in_insertion_order() {
    let mut service = service();
    service
        .create(&draft("INV-001", vec![item("Widget", 2, dec!(5.00))]))
        .unwrap();
    service
        .create(&draft("INV-002", vec![item("Gadget", 1, dec!(3.00))]))
        .unwrap();

    let all = service.list().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].invoice_number, "INV-001");
    assert_eq!(all[1].invoice_number, "INV-002");
    assert_eq!(all[0].details.len(), 1);
}

// --- Wire shapes ---

#[test]
fn serialized_output_includes_ids_and_derived_line_totals() {
    let mut service = service();
    let invoice = service
        .create(&draft("INV-001", vec![item("Widget", 2, dec!(5.00))]))
        .unwrap();

    let value = serde_json::to_value(&invoice).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 1,
            "invoice_number": "INV-001",
            "customer_name": "Acme",
            "date": "2024-01-01",
            "details": [{
                "id": 1,
                "description": "Widget",
                "quantity": 2,
                "unit_price": "5.00",
                "line_total": "10.00",
            }],
        })
    );
}

#[test]
fn drafts_deserialize_from_the_input_shape() {
    let draft: InvoiceDraft = serde_json::from_value(json!({
        "invoice_number": "INV-001",
        "customer_name": "Acme",
        "date": "2024-01-01",
        "details": [
            {"description": "Widget", "quantity": 2, "unit_price": "5.00"},
        ],
    }))
    .unwrap();

    assert_eq!(draft.date, Some(date(2024, 1, 1)));
    assert_eq!(draft.details[0].unit_price, dec!(5.00));

    // line_total is never accepted as input — a supplied value is ignored
    let draft: InvoiceDraft = serde_json::from_value(json!({
        "invoice_number": "INV-002",
        "customer_name": "Acme",
        "date": "2024-01-01",
        "details": [
            {"description": "Widget", "quantity": 2, "unit_price": "5.00", "line_total": "999.99"},
        ],
    }))
    .unwrap();
    assert_eq!(draft.details[0].quantity, 2);

    // Absent date and details deserialize, and fail validation instead
    let draft: InvoiceDraft = serde_json::from_value(json!({
        "invoice_number": "INV-003",
        "customer_name": "Acme",
        "date": null,
    }))
    .unwrap();
    assert!(draft.date.is_none());
    assert!(draft.details.is_empty());
}
