//! Static sample data loaded into a fresh session store.

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::models::{NewExpense, NewPatient, NewProduct, Sale};
use crate::store::{Store, StoreResult};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Populate the store with the sample data set: two patients, three
/// products, two expenses, and two sales. No invoices are seeded.
pub fn load_sample_data(store: &Store) -> StoreResult<()> {
    let john = store.add_patient(NewPatient {
        name: "John Smith".into(),
        phone: "+1-555-0123".into(),
        email: "john.smith@email.com".into(),
        address: "123 Main St, Anytown, USA".into(),
        date_of_birth: Some(date(1980, 5, 15)),
        blood_group: "O+".into(),
        allergies: vec!["Penicillin".into()],
        medical_history: "Hypertension, controlled with medication".into(),
    })?;
    let sarah = store.add_patient(NewPatient {
        name: "Sarah Johnson".into(),
        phone: "+1-555-0124".into(),
        email: "sarah.johnson@email.com".into(),
        address: "456 Oak Ave, Somewhere, USA".into(),
        date_of_birth: Some(date(1992, 8, 22)),
        blood_group: "A-".into(),
        allergies: vec!["Aspirin".into(), "Shellfish".into()],
        medical_history: "No significant medical history".into(),
    })?;

    let aspirin = store.add_product(NewProduct {
        name: "Aspirin 325mg".into(),
        category: "Pain Relief".into(),
        price: 1099.0,
        stock: 150,
        min_stock: 25,
        description: "Over-the-counter pain reliever and anti-inflammatory".into(),
        manufacturer: "PharmaCorp".into(),
        expiry_date: Some(date(2025, 12, 31)),
    })?;
    let monitor = store.add_product(NewProduct {
        name: "Blood Pressure Monitor".into(),
        category: "Medical Equipment".into(),
        price: 7599.0,
        stock: 8,
        min_stock: 10,
        description: "Digital blood pressure monitor with LCD display".into(),
        manufacturer: "MedTech Solutions".into(),
        expiry_date: Some(date(2027, 6, 30)),
    })?;
    store.add_product(NewProduct {
        name: "Insulin Pens".into(),
        category: "Diabetes Care".into(),
        price: 3850.0,
        stock: 0,
        min_stock: 15,
        description: "Disposable insulin delivery pens".into(),
        manufacturer: "DiabetesCare Inc".into(),
        expiry_date: Some(date(2025, 3, 15)),
    })?;

    store.add_expense(NewExpense {
        title: "Medical Supplies Restock".into(),
        category: "Medical Supplies".into(),
        amount: 207075.0,
        description: "Monthly restock of basic medical supplies".into(),
        date: date(2024, 1, 15),
        supplier: Some("MedSupply Co.".into()),
        receipt_number: Some("MS-2024-001".into()),
    })?;
    store.add_expense(NewExpense {
        title: "Equipment Maintenance".into(),
        category: "Equipment".into(),
        amount: 71875.0,
        description: "Annual maintenance for X-ray machine".into(),
        date: date(2024, 1, 10),
        supplier: Some("TechService Ltd".into()),
        receipt_number: Some("TS-2024-045".into()),
    })?;

    let today = Utc::now().date_naive();
    store.insert_sale(&Sale::new(&aspirin, 5, today).with_customer(&john))?;
    store.insert_sale(&Sale::new(&monitor, 1, today).with_customer(&sarah))?;

    debug!("sample data loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports;

    #[test]
    fn test_sample_counts() {
        let store = Store::in_memory().unwrap();
        load_sample_data(&store).unwrap();

        assert_eq!(store.list_patients().unwrap().len(), 2);
        assert_eq!(store.list_products().unwrap().len(), 3);
        assert_eq!(store.list_expenses().unwrap().len(), 2);
        assert_eq!(store.list_sales().unwrap().len(), 2);
        assert!(store.list_invoices().unwrap().is_empty());
    }

    #[test]
    fn test_sample_aggregates() {
        let store = Store::in_memory().unwrap();
        load_sample_data(&store).unwrap();

        let snapshot = reports::dashboard_snapshot(&store).unwrap();
        assert_eq!(snapshot.total_revenue, 5.0 * 1099.0 + 7599.0);
        assert_eq!(snapshot.total_expenses, 207075.0 + 71875.0);
        // Monitor (8 <= 10) and insulin pens (0 <= 15) run low
        assert_eq!(snapshot.low_stock_count, 2);
        assert_eq!(snapshot.overdue_invoice_count, 0);
    }
}
