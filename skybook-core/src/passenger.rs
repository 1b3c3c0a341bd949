use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    #[default]
    Dni,
    Passport,
    Cedula,
    License,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Dni => "DNI",
            DocumentType::Passport => "Passport",
            DocumentType::Cedula => "ID Card",
            DocumentType::License => "Driver License",
        }
    }
}

/// A registered traveller. Document numbers and emails are unique across
/// the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub id: Uuid,
    pub name: String,
    pub document_type: DocumentType,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub active: bool,
}

/// Fields accepted when registering a passenger.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPassenger {
    pub name: String,
    #[serde(default)]
    pub document_type: DocumentType,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassengerUpdate {
    pub name: Option<String>,
    pub document_type: Option<DocumentType>,
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub active: Option<bool>,
}

impl Passenger {
    pub fn register(new: NewPassenger) -> CoreResult<Self> {
        let passenger = Self {
            id: Uuid::new_v4(),
            name: new.name.trim().to_string(),
            document_type: new.document_type,
            document: new.document.trim().to_string(),
            email: new.email.trim().to_string(),
            phone: new.phone.trim().to_string(),
            birth_date: new.birth_date,
            active: true,
        };
        passenger.validate()?;
        Ok(passenger)
    }

    /// Returns the updated passenger; `self` is left as it was when the
    /// result fails validation.
    pub fn updated(&self, update: PassengerUpdate) -> CoreResult<Self> {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name.trim().to_string();
        }
        if let Some(document_type) = update.document_type {
            next.document_type = document_type;
        }
        if let Some(document) = update.document {
            next.document = document.trim().to_string();
        }
        if let Some(email) = update.email {
            next.email = email.trim().to_string();
        }
        if let Some(phone) = update.phone {
            next.phone = phone.trim().to_string();
        }
        if let Some(birth_date) = update.birth_date {
            next.birth_date = birth_date;
        }
        if let Some(active) = update.active {
            next.active = active;
        }
        next.validate()?;
        Ok(next)
    }

    /// Age in whole years on the given day.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.birth_date.year();
        if (today.month(), today.day()) < (self.birth_date.month(), self.birth_date.day()) {
            age -= 1;
        }
        age
    }

    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ValidationError("name is required".to_string()));
        }
        if self.document.is_empty() || self.document.len() > 20 {
            return Err(CoreError::ValidationError(
                "document number must have 1 to 20 characters".to_string(),
            ));
        }
        match self.email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => {
                return Err(CoreError::ValidationError(format!(
                    "invalid email address {}",
                    self.email
                )))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_passenger() -> NewPassenger {
        NewPassenger {
            name: " Ana Gómez ".to_string(),
            document_type: DocumentType::Dni,
            document: "30111222".to_string(),
            email: "ana@example.com".to_string(),
            phone: "+54 11 5555 0000".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        }
    }

    #[test]
    fn test_register_trims_and_activates() {
        let passenger = Passenger::register(new_passenger()).unwrap();
        assert_eq!(passenger.name, "Ana Gómez");
        assert!(passenger.active);
        assert_eq!(passenger.document_type.label(), "DNI");
    }

    #[test]
    fn test_register_rejects_bad_fields() {
        let mut bad = new_passenger();
        bad.email = "not-an-email".to_string();
        assert!(matches!(Passenger::register(bad), Err(CoreError::ValidationError(_))));

        let mut bad = new_passenger();
        bad.name = "   ".to_string();
        assert!(Passenger::register(bad).is_err());

        let mut bad = new_passenger();
        bad.document = "1".repeat(21);
        assert!(Passenger::register(bad).is_err());
    }

    #[test]
    fn test_partial_update() {
        let passenger = Passenger::register(new_passenger()).unwrap();
        let updated = passenger
            .updated(PassengerUpdate {
                phone: Some("+54 261 555 1111".to_string()),
                active: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.id, passenger.id);
        assert_eq!(updated.phone, "+54 261 555 1111");
        assert_eq!(updated.email, passenger.email);
        assert!(!updated.active);

        let invalid = passenger.updated(PassengerUpdate {
            email: Some("nobody".to_string()),
            ..Default::default()
        });
        assert!(invalid.is_err());
    }

    #[test]
    fn test_age() {
        let passenger = Passenger::register(new_passenger()).unwrap();
        assert_eq!(passenger.age_on(NaiveDate::from_ymd_opt(2026, 6, 14).unwrap()), 35);
        assert_eq!(passenger.age_on(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()), 36);
    }
}
