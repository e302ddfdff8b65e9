//! Patient store operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{Store, StoreError, StoreResult};
use crate::models::{NewPatient, Patient, PatientPatch};

/// Raw row with the allergies column still JSON-encoded.
struct PatientRow {
    id: String,
    name: String,
    phone: String,
    email: String,
    address: String,
    date_of_birth: Option<chrono::NaiveDate>,
    blood_group: String,
    allergies: String,
    medical_history: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl PatientRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            phone: row.get(2)?,
            email: row.get(3)?,
            address: row.get(4)?,
            date_of_birth: row.get(5)?,
            blood_group: row.get(6)?,
            allergies: row.get(7)?,
            medical_history: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }
}

impl TryFrom<PatientRow> for Patient {
    type Error = StoreError;

    fn try_from(row: PatientRow) -> StoreResult<Self> {
        Ok(Patient {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            address: row.address,
            date_of_birth: row.date_of_birth,
            blood_group: row.blood_group,
            allergies: serde_json::from_str(&row.allergies)?,
            medical_history: row.medical_history,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PATIENT_COLUMNS: &str = "id, name, phone, email, address, date_of_birth, \
     blood_group, allergies, medical_history, created_at, updated_at";

impl Store {
    /// Add a patient, assigning a fresh id and timestamps.
    pub fn add_patient(&self, data: NewPatient) -> StoreResult<Patient> {
        let patient = Patient::new(data);
        self.insert_patient(&patient)?;
        debug!(id = %patient.id, "added patient");
        Ok(patient)
    }

    fn insert_patient(&self, patient: &Patient) -> StoreResult<()> {
        let allergies_json = serde_json::to_string(&patient.allergies)?;
        self.conn.execute(
            r#"
            INSERT INTO patients (
                id, name, phone, email, address, date_of_birth,
                blood_group, allergies, medical_history, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                patient.id,
                patient.name,
                patient.phone,
                patient.email,
                patient.address,
                patient.date_of_birth,
                patient.blood_group,
                allergies_json,
                patient.medical_history,
                patient.created_at,
                patient.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: &str) -> StoreResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?"),
                [id],
                PatientRow::from_row,
            )
            .optional()?
            .map(Patient::try_from)
            .transpose()
    }

    /// Merge a partial update into an existing patient, refreshing
    /// `updated_at`. Unknown ids are an explicit error.
    pub fn update_patient(&self, id: &str, patch: PatientPatch) -> StoreResult<Patient> {
        let mut patient = self
            .get_patient(id)?
            .ok_or_else(|| StoreError::NotFound(format!("patient {id}")))?;
        patient.apply(patch);

        let allergies_json = serde_json::to_string(&patient.allergies)?;
        self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                phone = ?3,
                email = ?4,
                address = ?5,
                date_of_birth = ?6,
                blood_group = ?7,
                allergies = ?8,
                medical_history = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
            params![
                patient.id,
                patient.name,
                patient.phone,
                patient.email,
                patient.address,
                patient.date_of_birth,
                patient.blood_group,
                allergies_json,
                patient.medical_history,
                patient.updated_at,
            ],
        )?;
        debug!(id = %patient.id, "updated patient");
        Ok(patient)
    }

    /// Delete a patient. Idempotent: returns `false` when the id is absent.
    /// Historical sales and invoices keep their name snapshots.
    pub fn delete_patient(&self, id: &str) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id])?;
        if rows_affected > 0 {
            debug!(id, "deleted patient");
        }
        Ok(rows_affected > 0)
    }

    /// List all patients in insertion order.
    pub fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY rowid"
        ))?;
        let rows = stmt.query_map([], PatientRow::from_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_store() -> Store {
        Store::in_memory().unwrap()
    }

    fn sample_patient() -> NewPatient {
        NewPatient {
            name: "John Smith".into(),
            phone: "+1-555-0123".into(),
            email: "john.smith@email.com".into(),
            address: "123 Main St, Anytown, USA".into(),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1980, 5, 15),
            blood_group: "O+".into(),
            allergies: vec!["Penicillin".into()],
            medical_history: "Hypertension, controlled with medication".into(),
        }
    }

    #[test]
    fn test_add_and_get_round_trip() {
        let store = setup_store();
        let added = store.add_patient(sample_patient()).unwrap();

        let retrieved = store.get_patient(&added.id).unwrap().unwrap();
        assert_eq!(retrieved, added);
        assert_eq!(retrieved.allergies, vec!["Penicillin".to_string()]);
    }

    #[test]
    fn test_update_merges_fields() {
        let store = setup_store();
        let added = store.add_patient(sample_patient()).unwrap();

        let updated = store
            .update_patient(
                &added.id,
                PatientPatch {
                    phone: Some("+1-555-0999".into()),
                    allergies: Some(vec!["Penicillin".into(), "Aspirin".into()]),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.phone, "+1-555-0999");
        assert_eq!(updated.name, "John Smith");
        assert_eq!(updated.allergies.len(), 2);
        assert!(updated.updated_at >= updated.created_at);

        let retrieved = store.get_patient(&added.id).unwrap().unwrap();
        assert_eq!(retrieved, updated);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = setup_store();
        let result = store.update_patient("no-such-id", PatientPatch::default());
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = setup_store();
        let added = store.add_patient(sample_patient()).unwrap();

        assert!(store.delete_patient(&added.id).unwrap());
        assert!(!store.delete_patient(&added.id).unwrap());
        assert!(store.get_patient(&added.id).unwrap().is_none());
    }

    #[test]
    fn test_list_in_insertion_order() {
        let store = setup_store();
        let first = store.add_patient(sample_patient()).unwrap();
        let second = store
            .add_patient(NewPatient {
                name: "Sarah Johnson".into(),
                ..Default::default()
            })
            .unwrap();

        let listed = store.list_patients().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }
}
