//! Scenario tests for invoice composition and the status lifecycle.

use chrono::NaiveDate;
use clinicdesk_core::billing::{
    mark_invoice_overdue, mark_invoice_paid, send_invoice, BillingError, InvoiceDraft,
};
use clinicdesk_core::models::{InvoiceStatus, NewPatient, PatientPatch};
use clinicdesk_core::seed;
use clinicdesk_core::store::Store;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_store() -> Store {
    let store = Store::in_memory().unwrap();
    seed::load_sample_data(&store).unwrap();
    store
}

fn first_patient_id(store: &Store) -> String {
    store.list_patients().unwrap()[0].id.clone()
}

#[test]
fn submit_freezes_items_and_totals() {
    let store = setup_store();
    let patient_id = first_patient_id(&store);

    let mut draft = InvoiceDraft::new(&patient_id, date(2024, 1, 15), date(2024, 2, 15));
    draft.set_item(0, "Consultation", 1, 500.0).unwrap();
    draft.add_item("Aspirin 325mg", 2, 10.99).unwrap();
    draft.set_tax_rate(18.0).unwrap();

    let invoice = draft.submit(&store).unwrap();

    assert_eq!(invoice.status, InvoiceStatus::Draft);
    assert_eq!(invoice.invoice_number, "INV-20240115-0001");
    assert_eq!(invoice.patient_name, "John Smith");
    assert_eq!(invoice.items.len(), 2);
    assert_eq!(invoice.items[0].id, "item-0");
    assert_eq!(invoice.items[1].id, "item-1");
    assert_eq!(invoice.items[1].total, 21.98);

    let subtotal = 500.0 + 21.98;
    assert!((invoice.subtotal - subtotal).abs() < 1e-9);
    assert!((invoice.tax - subtotal * 0.18).abs() < 1e-9);
    assert!((invoice.total - subtotal * 1.18).abs() < 1e-9);

    // The stored row matches what submit returned
    let stored = store.get_invoice(&invoice.id).unwrap().unwrap();
    assert_eq!(stored, invoice);
}

#[test]
fn submit_example_totals() {
    // items = [{qty 5, price 10.99}], tax 10% => 54.95 / 5.495 / 60.445
    let store = setup_store();
    let patient_id = first_patient_id(&store);

    let mut draft = InvoiceDraft::new(&patient_id, date(2024, 1, 15), date(2024, 2, 15));
    draft.set_item(0, "Aspirin 325mg", 5, 10.99).unwrap();

    let invoice = draft.submit(&store).unwrap();
    assert!((invoice.subtotal - 54.95).abs() < 1e-9);
    assert!((invoice.tax - 5.495).abs() < 1e-9);
    assert!((invoice.total - 60.445).abs() < 1e-9);
}

#[test]
fn invoice_numbers_increment_per_session() {
    let store = setup_store();
    let patient_id = first_patient_id(&store);

    let mut draft = InvoiceDraft::new(&patient_id, date(2024, 1, 15), date(2024, 2, 15));
    draft.set_item(0, "Consultation", 1, 500.0).unwrap();

    let first = draft.submit(&store).unwrap();
    let second = draft.submit(&store).unwrap();

    assert_eq!(first.invoice_number, "INV-20240115-0001");
    assert_eq!(second.invoice_number, "INV-20240115-0002");
    assert_ne!(first.id, second.id);
}

#[test]
fn submit_for_unknown_patient_creates_nothing() {
    let store = setup_store();

    let mut draft = InvoiceDraft::new("no-such-patient", date(2024, 1, 15), date(2024, 2, 15));
    draft.set_item(0, "Consultation", 1, 500.0).unwrap();

    let result = draft.submit(&store);
    assert!(matches!(result, Err(BillingError::UnknownPatient(_))));
    assert!(store.list_invoices().unwrap().is_empty());
}

#[test]
fn deleting_patient_leaves_invoice_snapshot_intact() {
    let store = setup_store();
    let patient = store
        .add_patient(NewPatient {
            name: "Walk-in Patient".into(),
            ..Default::default()
        })
        .unwrap();

    let mut draft = InvoiceDraft::new(&patient.id, date(2024, 1, 15), date(2024, 2, 15));
    draft.set_item(0, "Consultation", 1, 500.0).unwrap();
    let invoice = draft.submit(&store).unwrap();

    assert!(store.delete_patient(&patient.id).unwrap());

    let stored = store.get_invoice(&invoice.id).unwrap().unwrap();
    assert_eq!(stored.patient_name, "Walk-in Patient");
    assert_eq!(stored, invoice);
}

#[test]
fn renaming_patient_leaves_invoice_snapshot_intact() {
    let store = setup_store();
    let patient_id = first_patient_id(&store);

    let mut draft = InvoiceDraft::new(&patient_id, date(2024, 1, 15), date(2024, 2, 15));
    draft.set_item(0, "Consultation", 1, 500.0).unwrap();
    let invoice = draft.submit(&store).unwrap();

    store
        .update_patient(
            &patient_id,
            PatientPatch {
                name: Some("Johnathan Smith".into()),
                ..Default::default()
            },
        )
        .unwrap();

    let stored = store.get_invoice(&invoice.id).unwrap().unwrap();
    assert_eq!(stored.patient_name, "John Smith");
}

#[test]
fn lifecycle_happy_paths() {
    let store = setup_store();
    let patient_id = first_patient_id(&store);

    let mut draft = InvoiceDraft::new(&patient_id, date(2024, 1, 15), date(2024, 2, 15));
    draft.set_item(0, "Consultation", 1, 500.0).unwrap();

    let to_pay = draft.submit(&store).unwrap();
    send_invoice(&store, &to_pay.id).unwrap();
    let paid = mark_invoice_paid(&store, &to_pay.id).unwrap();
    assert_eq!(paid.status, InvoiceStatus::Paid);

    let to_lapse = draft.submit(&store).unwrap();
    send_invoice(&store, &to_lapse.id).unwrap();
    let overdue = mark_invoice_overdue(&store, &to_lapse.id).unwrap();
    assert_eq!(overdue.status, InvoiceStatus::Overdue);
}

#[test]
fn rejected_transitions_do_not_mutate() {
    let store = setup_store();
    let patient_id = first_patient_id(&store);

    let mut draft = InvoiceDraft::new(&patient_id, date(2024, 1, 15), date(2024, 2, 15));
    draft.set_item(0, "Consultation", 1, 500.0).unwrap();
    let invoice = draft.submit(&store).unwrap();

    // draft cannot jump straight to paid or overdue
    assert!(mark_invoice_paid(&store, &invoice.id).is_err());
    assert!(mark_invoice_overdue(&store, &invoice.id).is_err());
    assert_eq!(
        store.get_invoice(&invoice.id).unwrap().unwrap().status,
        InvoiceStatus::Draft
    );

    send_invoice(&store, &invoice.id).unwrap();
    mark_invoice_paid(&store, &invoice.id).unwrap();

    // paid is terminal: send must fail without mutating
    let result = send_invoice(&store, &invoice.id);
    assert!(matches!(
        result,
        Err(BillingError::InvalidTransition {
            from: InvoiceStatus::Paid,
            to: InvoiceStatus::Sent,
        })
    ));
    assert_eq!(
        store.get_invoice(&invoice.id).unwrap().unwrap().status,
        InvoiceStatus::Paid
    );
}
