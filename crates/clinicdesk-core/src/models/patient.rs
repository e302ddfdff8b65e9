//! Patient models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A patient record in the front-office register.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Store-assigned UUID
    pub id: String,
    /// Full name
    pub name: String,
    /// Contact phone number
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Postal address
    pub address: String,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Blood group (e.g., "O+", "A-")
    pub blood_group: String,
    /// Known allergies, in the order they were recorded
    pub allergies: Vec<String>,
    /// Free-form medical history
    pub medical_history: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a patient; the store assigns id and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub blood_group: String,
    pub allergies: Vec<String>,
    pub medical_history: String,
}

/// Partial update for a patient. `Some` fields replace the current value,
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub blood_group: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub medical_history: Option<String>,
}

impl Patient {
    /// Build a fresh patient record from command input.
    pub fn new(data: NewPatient) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            phone: data.phone,
            email: data.email,
            address: data.address,
            date_of_birth: data.date_of_birth,
            blood_group: data.blood_group,
            allergies: data.allergies,
            medical_history: data.medical_history,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update and refresh the update timestamp.
    pub fn apply(&mut self, patch: PatientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
        }
        if let Some(blood_group) = patch.blood_group {
            self.blood_group = blood_group;
        }
        if let Some(allergies) = patch.allergies {
            self.allergies = allergies;
        }
        if let Some(medical_history) = patch.medical_history {
            self.medical_history = medical_history;
        }
        self.touch();
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient() {
        let patient = Patient::new(NewPatient {
            name: "John Smith".into(),
            blood_group: "O+".into(),
            allergies: vec!["Penicillin".into()],
            ..Default::default()
        });
        assert_eq!(patient.name, "John Smith");
        assert_eq!(patient.allergies, vec!["Penicillin".to_string()]);
        assert_eq!(patient.id.len(), 36); // UUID format
        assert_eq!(patient.created_at, patient.updated_at);
    }

    #[test]
    fn test_apply_patch_merges_and_touches() {
        let mut patient = Patient::new(NewPatient {
            name: "John Smith".into(),
            phone: "+1-555-0123".into(),
            ..Default::default()
        });
        let created = patient.created_at;

        patient.apply(PatientPatch {
            phone: Some("+1-555-9999".into()),
            ..Default::default()
        });

        assert_eq!(patient.name, "John Smith");
        assert_eq!(patient.phone, "+1-555-9999");
        assert_eq!(patient.created_at, created);
        assert!(patient.updated_at >= created);
    }
}
